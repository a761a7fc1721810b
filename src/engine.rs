use std::fmt;
use std::str::FromStr;

use crate::crc;
use crate::error::ChecksumError;

/// Which CRC32C code path to run. All engines produce identical values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Table-free, one bit per step.
    Bitwise,
    /// One 256-entry table, one byte per step.
    Table,
    /// Eight tables, eight bytes per step.
    #[default]
    Slicing8,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Bitwise, Engine::Table, Engine::Slicing8];

    #[inline]
    pub fn extend(self, seed: u32, data: &[u8]) -> u32 {
        match self {
            Engine::Bitwise => crc::extend_bitwise(seed, data),
            Engine::Table => crc::extend_bytewise(seed, data),
            Engine::Slicing8 => crc::extend(seed, data),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Engine::Bitwise => "bitwise",
            Engine::Table => "table",
            Engine::Slicing8 => "slicing8",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bitwise" => Ok(Engine::Bitwise),
            "table" | "bytewise" => Ok(Engine::Table),
            "slicing8" | "slicing-by-8" => Ok(Engine::Slicing8),
            _ => Err(ChecksumError::UnknownEngine(s.to_string())),
        }
    }
}
