//! Utility modules for the composition engine

pub mod chars;

pub use chars::*;
