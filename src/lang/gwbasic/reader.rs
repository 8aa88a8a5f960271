//! Byte level access to tokenized program files.
//!
//! `Reader` decodes the little endian primitives the token stream is built
//! from.  If the file was saved with protection, every byte after the marker
//! is deciphered on the way through, no matter how the reads are grouped.

use std::io::Read;
use log::debug;
use super::mbf;
use crate::lang::Error;
use crate::{STDRESULT,DYNERR};

// The protection cipher was published in The Cryptogram computer
// supplement #19, American Cryptogram Association, Summer 1994.
// An 11 byte and a 13 byte key are both applied in a cycle, together
// with reversed-index offsets.
const KEY11: [u8;11] = [
	0x1E, 0x1D, 0xC4, 0x77, 0x26,
	0x97, 0xE0, 0x74, 0x59, 0x88, 0x7C
];
const KEY13: [u8;13] = [
	0xA9, 0x84, 0x8D, 0xCD, 0x75, 0x83,
	0x43, 0x63, 0x24, 0x83, 0x19, 0xF7, 0x9A
];

/// Cipher state for a protected file.  The positions advance once per byte
/// and run for the life of the stream, they never reset between lines.
#[derive(Debug)]
struct Protection {
	pos11: usize,
	pos13: usize
}

impl Protection {
	fn new() -> Self {
		Self { pos11: 0, pos13: 0 }
	}
	fn decipher(&mut self,buf: &mut [u8]) {
		for b in buf.iter_mut() {
			let mut v = b.wrapping_sub(11 - self.pos11 as u8);
			v ^= KEY11[self.pos11] ^ KEY13[self.pos13];
			*b = v.wrapping_add(13 - self.pos13 as u8);
			self.pos11 = (self.pos11 + 1) % 11;
			self.pos13 = (self.pos13 + 1) % 13;
		}
	}
}

/// Reads binary primitives from a tokenized program, removing protection
/// if necessary.  Created with the byte source positioned at the start of
/// the file, before the marker byte.
#[derive(Debug)]
pub struct Reader<R: Read> {
	src: R,
	protection: Option<Protection>
}

impl<R: Read> Reader<R> {
	/// Consume the marker byte and select plain or deciphering reads.
	/// Fails with `Error::InvalidFormat` if the marker is not recognized.
	pub fn new(mut src: R) -> Result<Self,DYNERR> {
		let mut marker: [u8;1] = [0];
		if let Err(e) = src.read_exact(&mut marker) {
			return Err(match e.kind() {
				std::io::ErrorKind::UnexpectedEof => Box::new(Error::TruncatedInput),
				_ => Box::new(e)
			});
		}
		match marker[0] {
			0xff => Ok(Self { src, protection: None }),
			0xfe => {
				debug!("protected file detected");
				Ok(Self { src, protection: Some(Protection::new()) })
			},
			_ => Err(Box::new(Error::InvalidFormat))
		}
	}
	/// Fill `buf` exactly, retrying partial reads.  Only a genuine end of
	/// stream fails, with `Error::TruncatedInput`.
	pub fn read_exact(&mut self,buf: &mut [u8]) -> STDRESULT {
		if let Err(e) = self.src.read_exact(buf) {
			return Err(match e.kind() {
				std::io::ErrorKind::UnexpectedEof => Box::new(Error::TruncatedInput),
				_ => Box::new(e)
			});
		}
		if let Some(prot) = self.protection.as_mut() {
			prot.decipher(buf);
		}
		Ok(())
	}
	pub fn read_u8(&mut self) -> Result<u8,DYNERR> {
		let mut bs: [u8;1] = [0];
		self.read_exact(&mut bs)?;
		Ok(bs[0])
	}
	pub fn read_u16(&mut self) -> Result<u16,DYNERR> {
		let mut bs: [u8;2] = [0;2];
		self.read_exact(&mut bs)?;
		Ok(u16::from_le_bytes(bs))
	}
	pub fn read_i16(&mut self) -> Result<i16,DYNERR> {
		let mut bs: [u8;2] = [0;2];
		self.read_exact(&mut bs)?;
		Ok(i16::from_le_bytes(bs))
	}
	pub fn read_f32(&mut self) -> Result<f32,DYNERR> {
		let mut bs: [u8;4] = [0;4];
		self.read_exact(&mut bs)?;
		Ok(mbf::unpack_f32(bs))
	}
	pub fn read_f64(&mut self) -> Result<f64,DYNERR> {
		let mut bs: [u8;8] = [0;8];
		self.read_exact(&mut bs)?;
		Ok(mbf::unpack_f64(bs))
	}
}

#[cfg(test)]
pub fn encipher(buf: &mut [u8]) {
	let mut pos11 = 0;
	let mut pos13 = 0;
	for b in buf.iter_mut() {
		let mut v = b.wrapping_sub(13 - pos13 as u8);
		v ^= KEY11[pos11] ^ KEY13[pos13];
		*b = v.wrapping_add(11 - pos11 as u8);
		pos11 = (pos11 + 1) % 11;
		pos13 = (pos13 + 1) % 13;
	}
}
