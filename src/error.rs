use std::fmt;

/// Error type for checksum decoding and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// No data buffer was supplied
    MissingData,
    /// Stored checksum was not exactly 4 bytes
    StoredLength(usize),
    /// Stored masked checksum does not match the data
    Mismatch { stored: u32, computed: u32 },
    /// Engine name not recognised
    UnknownEngine(String),
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumError::MissingData => write!(f, "no data to checksum"),
            ChecksumError::StoredLength(n) => {
                write!(f, "stored checksum must be 4 bytes, got {}", n)
            }
            ChecksumError::Mismatch { stored, computed } => write!(
                f,
                "checksum mismatch (stored={:#010x}, computed={:#010x})",
                stored, computed
            ),
            ChecksumError::UnknownEngine(name) => write!(f, "unknown crc engine: {}", name),
        }
    }
}

impl std::error::Error for ChecksumError {}
