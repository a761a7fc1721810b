// CRC-32C (Castagnoli), reflected form.
// init = 0xFFFF_FFFF, process LSB-first, xorout = 0xFFFF_FFFF.
use std::sync::OnceLock;

/// Reflected form of the Castagnoli polynomial 0x1EDC6F41.
pub const POLY_REFLECTED: u32 = 0x82F6_3B78;

static TABLES: OnceLock<[[u32; 256]; 8]> = OnceLock::new();

fn build_tables() -> [[u32; 256]; 8] {
    let mut t = [[0u32; 256]; 8];
    for i in 0..256 {
        let mut crc = i as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg() & POLY_REFLECTED;
            crc = (crc >> 1) ^ mask;
        }
        t[0][i] = crc;
    }
    // t[k][i] is the CRC of byte i followed by k zero bytes.
    for k in 1..8 {
        for i in 0..256 {
            let prev = t[k - 1][i];
            t[k][i] = (prev >> 8) ^ t[0][(prev & 0xFF) as usize];
        }
    }
    t
}

/// Slicing-by-8 lookup tables, built on first use.
pub fn tables() -> &'static [[u32; 256]; 8] {
    TABLES.get_or_init(build_tables)
}

#[inline]
fn update_byte(mut crc: u32, b: u8) -> u32 {
    crc ^= b as u32;
    for _ in 0..8 {
        let mask = (crc & 1).wrapping_neg() & POLY_REFLECTED;
        crc = (crc >> 1) ^ mask;
    }
    crc
}

#[inline]
fn update_table(t0: &[u32; 256], mut crc: u32, data: &[u8]) -> u32 {
    for &b in data {
        crc = (crc >> 8) ^ t0[((crc ^ b as u32) & 0xFF) as usize];
    }
    crc
}

/// CRC32C of `data`.
#[inline]
pub fn value(data: &[u8]) -> u32 {
    extend(0, data)
}

/// Extend a prior CRC with more bytes, i.e. `value(a ++ b) == extend(value(a), b)`.
///
/// Processes 8 bytes per step while at least 8 remain, then finishes the
/// tail a byte at a time. An empty `data` returns `initial_crc` unchanged.
pub fn extend(initial_crc: u32, data: &[u8]) -> u32 {
    let t = tables();
    let mut crc = !initial_crc;

    let mut chunks = data.chunks_exact(8);
    for c in &mut chunks {
        let lo = crc ^ u32::from_le_bytes([c[0], c[1], c[2], c[3]]);
        let hi = u32::from_le_bytes([c[4], c[5], c[6], c[7]]);
        crc = t[7][(lo & 0xFF) as usize]
            ^ t[6][((lo >> 8) & 0xFF) as usize]
            ^ t[5][((lo >> 16) & 0xFF) as usize]
            ^ t[4][(lo >> 24) as usize]
            ^ t[3][(hi & 0xFF) as usize]
            ^ t[2][((hi >> 8) & 0xFF) as usize]
            ^ t[1][((hi >> 16) & 0xFF) as usize]
            ^ t[0][(hi >> 24) as usize];
    }
    crc = update_table(&t[0], crc, chunks.remainder());

    !crc
}

/// Byte-at-a-time variant using only the first table.
pub fn extend_bytewise(initial_crc: u32, data: &[u8]) -> u32 {
    !update_table(&tables()[0], !initial_crc, data)
}

/// Table-free variant. Slow; kept as the reference the table paths are checked against.
pub fn extend_bitwise(initial_crc: u32, data: &[u8]) -> u32 {
    let mut crc = !initial_crc;
    for &b in data {
        crc = update_byte(crc, b);
    }
    !crc
}
