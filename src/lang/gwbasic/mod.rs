//! # GW-BASIC decoding
//!
//! This module is used by the CLI to print tokenized programs as text.
//! The pipeline runs bytes through `reader` (which also removes protection),
//! then through `detokenizer`, which emits one string per program line.

mod token_maps;
pub mod mbf;
pub mod reader;
pub mod detokenizer;
#[cfg(test)]
mod reader_test;

pub use detokenizer::{Detokenizer,Lines,line_iter};
