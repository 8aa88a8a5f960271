//! # `bascat` main library
//!
//! This library decodes tokenized GW-BASIC program files, including
//! "protected" files, back into readable source text.
//!
//! ## Architecture
//!
//! Decoding is built around three layers:
//! * `lang::gwbasic::reader` removes protection and decodes binary primitives
//! * `lang::gwbasic::detokenizer` turns the token stream into source lines
//! * `lang::gwbasic::token_maps` holds the static opcode table
//!
//! The main entry point is `lang::gwbasic::line_iter`, which wraps any byte
//! source and produces the program lines lazily.  Convenience functions in
//! this module get the bytes from a file or stdin.
//!
//! ## File Format
//!
//! A tokenized program begins with a marker byte, 0xFF for an ordinary save
//! and 0xFE for a protected save.  Lines follow, each carrying a next-line
//! pointer, a line number, and a token stream terminated by a 0x00 byte.
//! A zero next-line pointer ends the program.  In a protected file every
//! byte after the marker is enciphered.

pub mod lang;

use std::io::Read;
use lang::gwbasic;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Calls `lang::gwbasic::line_iter` getting the bytes from a file.
pub fn line_iter_from_file(path: &str) -> Result<gwbasic::Lines<std::fs::File>,DYNERR> {
    match std::fs::File::open(path) {
        Ok(f) => gwbasic::line_iter(f),
        Err(e) => Err(Box::new(e))
    }
}

/// Calls `lang::gwbasic::line_iter` getting the bytes from stdin.
pub fn line_iter_from_stdin() -> Result<gwbasic::Lines<std::io::Stdin>,DYNERR> {
    gwbasic::line_iter(std::io::stdin())
}

/// Decode an entire program held in memory, one string per line.
/// Fails at the first malformed or truncated line.
pub fn decode_bytestream(dat: &[u8]) -> Result<Vec<String>,DYNERR> {
    let mut ans = Vec::new();
    for line in gwbasic::line_iter(dat)? {
        ans.push(line?);
    }
    Ok(ans)
}

/// Calls `decode_bytestream` on a readable source, draining it first.
pub fn decode_stream<R: Read>(mut src: R) -> Result<Vec<String>,DYNERR> {
    let mut dat = Vec::new();
    match src.read_to_end(&mut dat) {
        Ok(_n) => decode_bytestream(&dat),
        Err(e) => Err(Box::new(e))
    }
}
