use std::hash::Hasher;
use std::io;

use crate::engine::Engine;
use crate::mask;

/// Incremental CRC32C over a sequence of buffers.
///
/// Holds the finished (un-complemented) CRC, so any value already produced
/// by [`crate::crc::value`] can seed it to continue a checksum.
#[derive(Debug, Clone)]
pub struct Crc32c {
    seed: u32,
    crc: u32,
    engine: Engine,
}

impl Default for Crc32c {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32c {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            crc: seed,
            engine: Engine::default(),
        }
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.crc = self.engine.extend(self.crc, data);
    }

    /// Raw CRC32C of everything fed so far.
    #[inline]
    pub fn value(&self) -> u32 {
        self.crc
    }

    #[inline]
    pub fn masked(&self) -> u32 {
        mask::mask(self.crc)
    }

    /// Back to the seed this accumulator was created with.
    pub fn reset(&mut self) {
        self.crc = self.seed;
    }
}

impl Hasher for Crc32c {
    fn finish(&self) -> u64 {
        self.crc as u64
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

impl io::Write for Crc32c {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
