//! Conversion of Microsoft Binary Format floats to IEEE 754.
//!
//! The two layouts are close enough that we re-arrange bits rather than
//! compute with powers of two.  Arithmetic decoding would lose the low
//! mantissa bits, the re-layout keeps every bit of the stored value.

/// Unpack a 4 byte little endian MBF single into an `f32`.
/// A zero exponent byte means the value is zero regardless of the rest.
pub fn unpack_f32(mut bs: [u8;4]) -> f32 {
	if bs[3]==0 {
		return 0.0;
	}
	let sign = bs[2] & 0x80;
	let exp = bs[3].wrapping_sub(2);
	bs[3] = sign | (exp >> 1);
	bs[2] = (exp << 7) | (bs[2] & 0x7f);
	f32::from_le_bytes(bs)
}

/// Unpack an 8 byte little endian MBF double into an `f64`.
/// The exponent is rebiased from 8 bits to 11, which forces the mantissa
/// one bit to the right across every byte, with a nibble of carry.
pub fn unpack_f64(mut bs: [u8;8]) -> f64 {
	if bs[7]==0 {
		return 0.0;
	}
	let sign = bs[6] & 0x80;
	let exp = (bs[3] as u16).wrapping_add(1023 - 129);
	bs[7] = sign | ((exp >> 4) & 0xff) as u8;
	let mut carry = (exp << 4) as u8;
	for i in (1..7).rev() {
		let tmp = (bs[i] << 1) | (bs[i-1] >> 7);
		bs[i] = carry | (tmp >> 4);
		carry = tmp << 4;
	}
	let tmp = bs[0] << 1;
	bs[0] = carry | (tmp >> 4);
	f64::from_le_bytes(bs)
}
