//! # Language Module
//!
//! Language specific operations are in the submodules.  At present the only
//! language is GW-BASIC, see `gwbasic` for the decoding pipeline.

pub mod gwbasic;

use thiserror::Error;

#[derive(Error,Debug)]
pub enum Error {
    #[error("Not a tokenized GW-BASIC file")]
    InvalidFormat,
    #[error("Unexpected end of input")]
    TruncatedInput,
}
