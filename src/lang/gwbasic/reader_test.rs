#[cfg(test)]
use super::reader::{Reader,encipher};
#[cfg(test)]
use crate::lang::Error;

#[test]
fn plain_primitives() {
	let dat: Vec<u8> = vec![0xFF, 0x41, 0x34,0x12, 0xFF,0xFF, 0x00,0x00,0x00,0x81];
	let mut rdr = Reader::new(&dat[..]).expect("bad marker");
	assert_eq!(rdr.read_u8().expect("read failed"),0x41);
	assert_eq!(rdr.read_u16().expect("read failed"),0x1234);
	assert_eq!(rdr.read_i16().expect("read failed"),-1);
	assert_eq!(rdr.read_f32().expect("read failed"),1.0);
}

#[test]
fn unrecognized_marker() {
	let dat: Vec<u8> = vec![0x00, 0x0A, 0x00];
	let err = Reader::new(&dat[..]).expect_err("marker should be rejected");
	assert!(matches!(err.downcast_ref::<Error>(),Some(Error::InvalidFormat)));
}

#[test]
fn empty_source() {
	let dat: Vec<u8> = Vec::new();
	let err = Reader::new(&dat[..]).expect_err("empty source should fail");
	assert!(matches!(err.downcast_ref::<Error>(),Some(Error::TruncatedInput)));
}

#[test]
fn short_read_is_truncation() {
	let dat: Vec<u8> = vec![0xFF, 0x64];
	let mut rdr = Reader::new(&dat[..]).expect("bad marker");
	let err = rdr.read_u16().expect_err("short read should fail");
	assert!(matches!(err.downcast_ref::<Error>(),Some(Error::TruncatedInput)));
}

#[test]
fn cipher_round_trip() {
	// long enough to wrap both key cycles
	let plain: Vec<u8> = (0..30).collect();
	let mut dat = plain.clone();
	encipher(&mut dat);
	dat.insert(0,0xFE);
	let mut rdr = Reader::new(&dat[..]).expect("bad marker");
	let mut got: [u8;30] = [0;30];
	rdr.read_exact(&mut got).expect("read failed");
	assert_eq!(got.to_vec(),plain);
}

#[test]
fn cipher_state_spans_reads() {
	// the key positions advance per byte no matter how reads are grouped
	let plain: Vec<u8> = vec![0x11,0x22,0x33,0x44,0x55,0x66,0x77,0x88];
	let mut dat = plain.clone();
	encipher(&mut dat);
	dat.insert(0,0xFE);
	let mut rdr = Reader::new(&dat[..]).expect("bad marker");
	assert_eq!(rdr.read_u8().expect("read failed"),0x11);
	assert_eq!(rdr.read_u16().expect("read failed"),0x3322);
	let mut rest: [u8;5] = [0;5];
	rdr.read_exact(&mut rest).expect("read failed");
	assert_eq!(rest,[0x44,0x55,0x66,0x77,0x88]);
}
