//! Process-wide string interning for lexemes and macro names.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

lazy_static! {
    /// Every string ever interned. Entries are never removed, so only text
    /// drawn from a small vocabulary (names, operators) belongs here.
    static ref INTERNER: Mutex<HashSet<Arc<str>>> = Mutex::new(HashSet::new());
}

/// A reference-counted, interned string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternedString(Arc<str>);

impl InternedString {
    /// Create a new interned string
    pub fn new(s: &str) -> Self {
        // The set only ever grows, so a poisoned lock still holds a usable table.
        let mut set = INTERNER.lock().unwrap_or_else(|e| e.into_inner());
        match set.get(s) {
            Some(existing) => InternedString(Arc::clone(existing)),
            None => {
                let arc: Arc<str> = Arc::from(s);
                set.insert(Arc::clone(&arc));
                InternedString(arc)
            }
        }
    }

    /// Wraps `s` without entering it in the shared table. Equality and hashing
    /// still compare text, so unshared and interned values mix freely.
    pub fn unshared(s: &str) -> Self {
        InternedString(Arc::from(s))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for InternedString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InternedString {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl AsRef<str> for InternedString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::borrow::Borrow<str> for InternedString {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for InternedString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for InternedString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Display for InternedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for InternedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for InternedString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(InternedString::new(&s))
    }
}

/// Whether `s` is in the shared table.
#[cfg(test)]
pub(crate) fn is_interned(s: &str) -> bool {
    INTERNER
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .contains(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_interning() {
        let s1 = InternedString::new("FOO");
        let s2 = InternedString::new("FOO");

        // Both should point to the same underlying string
        assert!(Arc::ptr_eq(&s1.0, &s2.0));

        let s3 = InternedString::new("BAR");
        assert!(!Arc::ptr_eq(&s1.0, &s3.0));
    }

    #[test]
    fn test_unshared_strings_stay_out_of_the_table() {
        let text = "/* unshared comment text */";
        let unshared = InternedString::unshared(text);
        assert!(!is_interned(text));
        assert_eq!(unshared, InternedString::new("/* unshared comment text */"));
        assert!(is_interned(text));
    }

    #[test]
    fn test_borrow_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(InternedString::new("VERSION"), 3);
        assert_eq!(map.get("VERSION"), Some(&3));
    }
}
