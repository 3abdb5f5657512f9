//! Tests that run several cinfix crates together.

#[cfg(test)]
mod pipeline;
#[cfg(test)]
mod preprocess_files;
