//! Input acquisition and parsing.

pub mod parser;
pub mod reader;

pub use reader::{read_sources, InputSource};
