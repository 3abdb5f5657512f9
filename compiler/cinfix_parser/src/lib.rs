//! Turns a token stream into a precedence-correct expression tree.
//!
//! Parsing happens in two passes. The [`TreeBuilder`] reads tokens once and
//! produces a textual-order tree: a right-leaning chain of binary operators in
//! the order they appear. The [`Fixer`] then rotates that tree until its shape
//! matches C operator precedence and left associativity.

pub mod parser;

pub use parser::{
    build, fix, parse, parse_str, render_snippet, Diagnostic, Fixer, ParseError, ParserConfig,
    TreeBuilder,
};

#[cfg(test)]
mod tests {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize the logger for tests
    pub fn init_test_logger() {
        INIT.call_once(|| {
            Builder::new()
                .filter_level(LevelFilter::Debug)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{}] {}: {}",
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .is_test(true)
                .init();
            log::info!("Test logger initialized");
        });
    }
}
