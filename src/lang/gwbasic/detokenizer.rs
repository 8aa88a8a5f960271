//! Module containing the GW-BASIC detokenizer
//!
//! Tokens are read one at a time from the `Reader` and gathered into lines.
//! Rendering a line applies the collapsing rules the interpreter's LIST
//! command uses, e.g. `:ELSE` prints as `ELSE`.

use std::collections::HashMap;
use std::io::Read;

use super::token_maps;
use super::reader::Reader;
use crate::DYNERR;

const COLON: u16 = 0x3a;
const REM: u16 = 0x8f;
const ELSE: u16 = 0xa1;
const WHILE: u16 = 0xb1;
const APOSTROPHE: u16 = 0xd9;
const PLUS: u16 = 0xe9;
const EOL: u16 = 0x00;

/// One element of a tokenized line.  Only characters and opcodes carry a
/// code the collapsing rules can match on; numeric literals and synthetic
/// tokens render as text and never take part in a match.
enum Token {
	Char(u8),
	Opcode { code: u16, text: String },
	Text(String)
}

impl Token {
	fn code(&self) -> Option<u16> {
		match self {
			Token::Char(b) => Some(*b as u16),
			Token::Opcode { code, .. } => Some(*code),
			Token::Text(_) => None
		}
	}
	fn push_text(&self,code: &mut String) {
		match self {
			Token::Char(b) => code.push(*b as char),
			Token::Opcode { text, .. } => code.push_str(text),
			Token::Text(s) => code.push_str(s)
		}
	}
}

/// Render a float the way printf renders `%E`, which is how the original
/// numbers were displayed: six fractional digits, explicit exponent sign,
/// at least two exponent digits.
fn exp_format(num: f64) -> String {
	let s = format!("{:.6E}",num);
	match s.split_once('E') {
		Some((mantissa,exp)) => {
			let (sign,digits) = match exp.strip_prefix('-') {
				Some(d) => ("-",d),
				None => ("+",exp)
			};
			format!("{}E{}{:0>2}",mantissa,sign,digits)
		},
		None => s
	}
}

/// Render a 16 bit value in octal or hex with the `&O`/`&H` prefix.
/// Negative values keep their sign, as the original displayed them.
fn radix_format(num: i16,base: u32) -> String {
	let (sign,mag) = match num < 0 {
		true => ("-",-(num as i32)),
		false => ("",num as i32)
	};
	match base {
		8 => format!("&O{}{:o}",sign,mag),
		_ => format!("&H{}{:X}",sign,mag)
	}
}

/// Handles detokenization of GW-BASIC
pub struct Detokenizer {
	detok_map: HashMap<u16,&'static str>
}

impl Detokenizer {
	/// Create a new `Detokenizer` structure
	pub fn new() -> Self {
		Self {
			detok_map: HashMap::from(token_maps::DETOK_MAP)
		}
	}
	fn opcode(&self,code: u16) -> Token {
		let text = match self.detok_map.get(&code) {
			Some(keyword) => keyword.to_string(),
			None => format!("<UNK 0x{:X}>",code)
		};
		Token::Opcode { code, text }
	}
	/// Read exactly one token, dispatching on the first byte.
	fn next_token<R: Read>(&self,rdr: &mut Reader<R>) -> Result<Token,DYNERR> {
		let byte = rdr.read_u8()?;
		match byte {
			0x20..=0x7e => Ok(Token::Char(byte)),
			0xfd..=0xff => {
				let second = rdr.read_u8()?;
				Ok(self.opcode(((byte as u16) << 8) | second as u16))
			},
			0x0e => Ok(Token::Text(rdr.read_u16()?.to_string())),
			0x0b => Ok(Token::Text(radix_format(rdr.read_i16()?,8))),
			0x0c => Ok(Token::Text(radix_format(rdr.read_i16()?,16))),
			0x1c => Ok(Token::Text(rdr.read_i16()?.to_string())),
			0x0f => Ok(Token::Text(rdr.read_u8()?.to_string())),
			0x1d => Ok(Token::Text(exp_format(rdr.read_f32()? as f64))),
			0x1f => Ok(Token::Text(exp_format(rdr.read_f64()?))),
			_ => Ok(self.opcode(byte as u16))
		}
	}
	/// Gather the tokens of one line, prefixed by the synthetic line number
	/// and separator tokens.  A zero next-line pointer means the program is
	/// over and `None` is returned.  The EOL token is consumed but not kept.
	fn next_line<R: Read>(&self,rdr: &mut Reader<R>) -> Result<Option<Vec<Token>>,DYNERR> {
		if rdr.read_u16()? == 0 {
			return Ok(None);
		}
		let line_num = rdr.read_u16()?;
		let mut line = vec![
			Token::Text(line_num.to_string()),
			Token::Text("  ".to_string())
		];
		loop {
			let tok = self.next_token(rdr)?;
			if tok.code()==Some(EOL) {
				break;
			}
			line.push(tok);
		}
		Ok(Some(line))
	}
	/// Detokenize a whole program image into a UTF8 string
	pub fn detokenize(&self,img: &[u8]) -> Result<String,DYNERR> {
		let mut rdr = Reader::new(img)?;
		let mut code = String::new();
		while let Some(line) = self.next_line(&mut rdr)? {
			code += &render(&line);
			code += "\n";
		}
		Ok(code)
	}
}

/// Convert a list of tokens into a string.  The first matching rule wins
/// and consumes its window, matches do not overlap.
fn render(line: &[Token]) -> String {
	let mut code = String::new();
	let mut idx = 0;
	while idx < line.len() {
		let c0 = line[idx].code();
		let c1 = line.get(idx+1).and_then(|t| t.code());
		let c2 = line.get(idx+2).and_then(|t| t.code());
		// 3A A1     --> A1   ":ELSE"  --> "ELSE"
		// 3A 8F D9  --> D9   ":REM'"  --> "'"
		// B1 E9     --> B1   "WHILE+" --> "WHILE"
		if c0==Some(COLON) && c1==Some(ELSE) {
			line[idx+1].push_text(&mut code);
			idx += 2;
		} else if c0==Some(COLON) && c1==Some(REM) && c2==Some(APOSTROPHE) {
			line[idx+2].push_text(&mut code);
			idx += 3;
		} else if c0==Some(WHILE) && c1==Some(PLUS) {
			line[idx].push_text(&mut code);
			idx += 2;
		} else {
			line[idx].push_text(&mut code);
			idx += 1;
		}
	}
	code
}

/// Iterator over the lines of a tokenized program.  Lines are produced
/// lazily, the source is only read as far as the lines pulled so far.
/// After the program ends, or any error, the iterator yields `None`.
pub struct Lines<R: Read> {
	detok: Detokenizer,
	rdr: Reader<R>,
	done: bool
}

impl<R: Read> Iterator for Lines<R> {
	type Item = Result<String,DYNERR>;
	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		match self.detok.next_line(&mut self.rdr) {
			Ok(Some(line)) => Some(Ok(render(&line))),
			Ok(None) => {
				self.done = true;
				None
			},
			Err(e) => {
				self.done = true;
				Some(Err(e))
			}
		}
	}
}

/// Decode the lines of a tokenized GW-BASIC program from any byte source.
/// The marker byte is checked up front, so an unrecognized file fails here
/// rather than on the first pull.
pub fn line_iter<R: Read>(src: R) -> Result<Lines<R>,DYNERR> {
	Ok(Lines {
		detok: Detokenizer::new(),
		rdr: Reader::new(src)?,
		done: false
	})
}
