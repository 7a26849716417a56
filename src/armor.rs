//! Six-bit ASCII armor, the printable encoding of AIS binary payloads.
//!
//! <https://gpsd.gitlab.io/gpsd/AIVDM.html#_aivdmaivdo_payload_armoring>
//!
//! Every payload character carries six bits. The result keeps one element
//! per bit (each `0` or `1`), most significant bit first, so that
//! variable width sub-fields can be indexed bit by bit.

use alloc::vec::Vec;

use crate::error::ArmorError;

/// Bits carried by one armored character.
pub const BITS_PER_CHAR: usize = 6;
/// Largest number of padding bits at the end of a payload.
pub const MAX_FILL_BITS: i64 = 5;

/// Six-bit value of one armored character.
///
/// Valid characters are `0`..=`W` and `` ` ``..=`w`.
pub fn six_bit_value(byte: u8) -> Result<u8, ArmorError> {
    match byte {
        b'0'..=b'W' => Ok((byte - 48) & 0x3F),
        b'`'..=b'w' => Ok((byte - 56) & 0x3F),
        _ => Err(ArmorError::DataByte(byte)),
    }
}

/// Unpacks `payload` into bits, dropping `fill_bits` padding bits from the end.
///
/// # Examples
///
/// ```
/// let bits = nmea0183::armor::decode_six_bit_ascii("1w", 2).unwrap();
/// assert_eq!(bits, [0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
/// ```
pub fn decode_six_bit_ascii(payload: &str, fill_bits: i64) -> Result<Vec<u8>, ArmorError> {
    if !(0..=MAX_FILL_BITS).contains(&fill_bits) {
        return Err(ArmorError::FillBits(fill_bits));
    }
    let num_bits = (payload.len() * BITS_PER_CHAR)
        .checked_sub(fill_bits as usize)
        .ok_or(ArmorError::NumBits)?;

    let mut bits = Vec::with_capacity(payload.len() * BITS_PER_CHAR);
    for byte in payload.bytes() {
        let value = six_bit_value(byte)?;
        bits.extend((0..BITS_PER_CHAR).rev().map(|shift| (value >> shift) & 1));
    }
    bits.truncate(num_bits);

    Ok(bits)
}
