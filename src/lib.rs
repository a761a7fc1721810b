pub mod coding;
pub mod crc;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod mask;

pub use coding::{decode_fixed32, encode_fixed32};
pub use crc::{extend, value};
pub use engine::Engine;
pub use error::ChecksumError;
pub use hasher::Crc32c;
pub use mask::{check, mask, masked_value, unmask, verify, MASK_DELTA};
