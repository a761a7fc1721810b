//! Masked checksums.
//!
//! A CRC computed over data that itself embeds CRCs is prone to collisions,
//! so the value persisted next to a block is rotated right by 15 bits and
//! offset by [`MASK_DELTA`]. The same scheme LevelDB uses for its log and
//! table blocks.

use log::debug;

use crate::coding::{decode_fixed32, encode_fixed32, get_fixed32};
use crate::crc;
use crate::engine::Engine;
use crate::error::ChecksumError;

pub const MASK_DELTA: u32 = 0xA282_EAD8;

#[inline]
pub fn mask(crc: u32) -> u32 {
    crc.rotate_right(15).wrapping_add(MASK_DELTA)
}

#[inline]
pub fn unmask(masked: u32) -> u32 {
    masked.wrapping_sub(MASK_DELTA).rotate_left(15)
}

/// Masked CRC32C of `data`: the value a writer stores alongside a block.
#[inline]
pub fn masked_value(data: &[u8]) -> u32 {
    mask(crc::value(data))
}

#[inline]
pub fn masked_extend(seed: u32, data: &[u8]) -> u32 {
    mask(crc::extend(seed, data))
}

/// The 4 stored bytes for `data`.
pub fn to_stored(data: &[u8]) -> [u8; 4] {
    encode_fixed32(masked_value(data))
}

pub fn try_masked_value(data: Option<&[u8]>) -> Result<u32, ChecksumError> {
    data.map(masked_value).ok_or(ChecksumError::MissingData)
}

/// Checks a stored masked checksum against `data`.
///
/// `stored` comes straight off disk, so its length is validated rather than
/// trusted.
pub fn check(stored: &[u8], data: Option<&[u8]>) -> Result<(), ChecksumError> {
    check_with(Engine::default(), 0, stored, data)
}

/// Like [`check`], for a checksum that continues from `seed` and is computed
/// with `engine`.
pub fn check_with(
    engine: Engine,
    seed: u32,
    stored: &[u8],
    data: Option<&[u8]>,
) -> Result<(), ChecksumError> {
    let stored = get_fixed32(stored)?;
    let data = data.ok_or(ChecksumError::MissingData)?;
    let computed = mask(engine.extend(seed, data));
    if stored != computed {
        return Err(ChecksumError::Mismatch { stored, computed });
    }
    Ok(())
}

/// Returns true iff `stored` is the masked checksum of `data`.
///
/// A missing buffer is a failed verification, never a panic.
pub fn verify(stored: &[u8; 4], data: Option<&[u8]>) -> bool {
    match check(stored, data) {
        Ok(()) => true,
        Err(e) => {
            debug!("verify failed for stored {:#010x}: {}", decode_fixed32(stored), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_known_values() {
        assert_eq!(mask(0), MASK_DELTA);
        assert_eq!(masked_value(&[]), MASK_DELTA);
        assert_eq!(masked_value(b"123456789"), 0xC78A_B0E5);
    }

    #[test]
    fn mask_matches_shift_form() {
        for crc in [0u32, 1, 0x8000, 0xE306_9283, 0x7FFF_FFFF, u32::MAX] {
            let by_shift = ((crc >> 15) | (crc << 17)).wrapping_add(0xA282_EAD8);
            assert_eq!(mask(crc), by_shift);
        }
    }

    #[test]
    fn mask_roundtrip() {
        let crc = crc::value(b"foo");
        assert_ne!(crc, mask(crc));
        assert_ne!(crc, mask(mask(crc)));
        assert_eq!(crc, unmask(mask(crc)));
        assert_eq!(crc, unmask(unmask(mask(mask(crc)))));

        for x in [0u32, 1, MASK_DELTA, 0x5D7D_1527, u32::MAX] {
            assert_eq!(unmask(mask(x)), x);
            assert_eq!(mask(unmask(x)), x);
        }
    }

    #[test]
    fn stored_bytes_verify() {
        let data: &[u8] = b"some block payload";
        let stored = to_stored(data);
        assert_eq!(decode_fixed32(&stored), masked_value(data));
        assert!(verify(&stored, Some(data)));
        assert_eq!(check(&stored, Some(data)), Ok(()));
    }

    #[test]
    fn seeded_mask() {
        let head = crc::value(b"hello ");
        assert_eq!(masked_extend(head, b"world"), masked_value(b"hello world"));
        assert_eq!(masked_extend(0, b"abc"), masked_value(b"abc"));
    }

    #[test]
    fn missing_data_fails_without_panicking() {
        let stored = to_stored(&[]);
        assert!(!verify(&stored, None));
        assert_eq!(check(&stored, None), Err(ChecksumError::MissingData));
        assert_eq!(try_masked_value(None), Err(ChecksumError::MissingData));
        assert_eq!(try_masked_value(Some(&b""[..])), Ok(MASK_DELTA));
    }

    #[test]
    fn check_reports_mismatch() {
        let data: &[u8] = b"abcdef";
        let mut stored = to_stored(data);
        stored[0] ^= 0x01;
        assert!(!verify(&stored, Some(data)));
        assert_eq!(
            check(&stored, Some(data)),
            Err(ChecksumError::Mismatch {
                stored: decode_fixed32(&stored),
                computed: masked_value(data),
            })
        );
    }

    #[test]
    fn check_rejects_short_stored() {
        let stored = to_stored(b"x");
        assert_eq!(
            check(&stored[..3], Some(&b"x"[..])),
            Err(ChecksumError::StoredLength(3))
        );
    }

    #[test]
    fn seeded_check_every_engine() {
        let head = crc::value(b"hello ");
        let stored = to_stored(b"hello world");
        for e in Engine::ALL {
            assert_eq!(check_with(e, head, &stored, Some(&b"world"[..])), Ok(()));
            assert!(matches!(
                check_with(e, 0, &stored, Some(&b"world"[..])),
                Err(ChecksumError::Mismatch { .. })
            ));
        }
        assert_eq!(
            check_with(Engine::Table, head, &stored[..2], Some(&b"world"[..])),
            Err(ChecksumError::StoredLength(2))
        );
        assert_eq!(
            check_with(Engine::Table, head, &stored, None),
            Err(ChecksumError::MissingData)
        );
    }

    #[test]
    fn recover_raw_and_compare() {
        // Same answer as `verify`, but via the raw CRC rather than recomputing the mask.
        let data: &[u8] = b"record body";
        let stored = to_stored(data);
        assert_eq!(unmask(decode_fixed32(&stored)), crc::value(data));

        let other = to_stored(b"record bodY");
        assert_ne!(unmask(decode_fixed32(&other)), crc::value(data));
        assert!(!verify(&other, Some(data)));
    }
}
