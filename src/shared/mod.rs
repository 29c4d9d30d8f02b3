//! Shared kernel: error kinds, the crate-wide `Result` alias and file safety checks.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
