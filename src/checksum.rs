//! The two checksums that PNG data needs.
//!
//! * CRC-32 (IEEE 802.3, reflected polynomial `0xEDB88320`) guards each PNG
//!   chunk.
//! * Adler-32 (modulus 65521) is the trailer of a zlib stream.

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c = c >> 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

/// Runs bytes through a CRC register without the final inversion.
///
/// Start from `u32::MAX` and xor the end result with `u32::MAX` to get a
/// finished CRC. Splitting it up this way lets a chunk's type and data be
/// checksummed without joining them into one buffer first.
#[inline]
#[must_use]
pub fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// The CRC-32 of some bytes.
#[inline]
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
  update_crc(u32::MAX, bytes.iter().copied()) ^ u32::MAX
}

/// The largest prime below 2^16.
pub const ADLER_MODULUS: u32 = 65521;

/// The Adler-32 of some bytes.
#[inline]
#[must_use]
pub fn adler32(bytes: &[u8]) -> u32 {
  let mut a: u32 = 1;
  let mut b: u32 = 0;
  for &byte in bytes {
    a = (a + u32::from(byte)) % ADLER_MODULUS;
    b = (a + b) % ADLER_MODULUS;
  }
  (b << 16) | a
}
