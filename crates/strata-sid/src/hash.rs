//! CRC-32 hashing for string identifiers.
//!
//! The reflected IEEE 802.3 CRC (polynomial `0xEDB88320`, register seeded
//! with all ones, final complement), the same checksum zlib and PNG use.
//! It is deterministic and unsalted, so an id computed in one process
//! matches the id of the same text in any other. It is not a
//! cryptographic hash and makes no attempt to resist collisions.

/// Reflected CRC-32 polynomial.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Byte-at-a-time lookup table, built at compile time.
const TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Feed one byte into a CRC-32 register.
#[inline]
const fn crc32_byte(crc: u32, byte: u8) -> u32 {
    TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
}

/// CRC-32 of `bytes`.
///
/// Usable in `const` context:
///
/// ```
/// use strata_sid::crc32;
///
/// const CHECK: u32 = crc32(b"123456789");
/// assert_eq!(CHECK, 0xCBF4_3926);
/// ```
pub const fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = !0u32;
    let mut i = 0;
    while i < bytes.len() {
        crc = crc32_byte(crc, bytes[i]);
        i += 1;
    }
    !crc
}
