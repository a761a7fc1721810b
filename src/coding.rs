// Fixed-width little-endian words. Checksums are always persisted as 4 bytes, LE.
use crate::error::ChecksumError;

#[inline]
pub fn encode_fixed32(v: u32) -> [u8; 4] {
    [
        (v & 0xFF) as u8,
        ((v >> 8) & 0xFF) as u8,
        ((v >> 16) & 0xFF) as u8,
        ((v >> 24) & 0xFF) as u8,
    ]
}

#[inline]
pub fn decode_fixed32(src: &[u8; 4]) -> u32 {
    (src[0] as u32) | ((src[1] as u32) << 8) | ((src[2] as u32) << 16) | ((src[3] as u32) << 24)
}

/// Writes `v` into the first 4 bytes of `dst`. `dst` must hold at least 4 bytes.
#[inline]
pub fn put_fixed32(dst: &mut [u8], v: u32) {
    dst[..4].copy_from_slice(&encode_fixed32(v));
}

/// Reads a stored word from an untrusted slice, which must be exactly 4 bytes.
pub fn get_fixed32(src: &[u8]) -> Result<u32, ChecksumError> {
    let word: &[u8; 4] = src
        .try_into()
        .map_err(|_| ChecksumError::StoredLength(src.len()))?;
    Ok(decode_fixed32(word))
}
