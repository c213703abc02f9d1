#![forbid(unsafe_code)]

//! Zlib streams built only from DEFLATE "stored" blocks.
//!
//! * [RFC 1950: ZLIB Compressed Data Format][rfc1950]
//! * [RFC 1951: DEFLATE Compressed Data Format][rfc1951]
//!
//! [rfc1950]: https://www.rfc-editor.org/rfc/rfc1950
//! [rfc1951]: https://www.rfc-editor.org/rfc/rfc1951
//!
//! A stored block copies its bytes verbatim, so this "compresses" nothing, but
//! the output is a fully valid zlib stream that any inflater will accept. The
//! layout is:
//!
//! * The 2-byte zlib header, `78 01`: deflate with a 32K window, lowest
//!   compression level, header check bits set.
//! * One or more blocks of `BFINAL`, `LEN` (u16 little-endian), `NLEN` (the
//!   one's complement of `LEN`), then `LEN` raw bytes. The block type bits are
//!   always 0 (stored), so the block header is a whole byte.
//! * The Adler-32 of the uncompressed bytes, big-endian.

use alloc::vec::Vec;
use core::fmt;

use crate::checksum::adler32;

/// The zlib header bytes this module writes.
pub const ZLIB_STORED_HEADER: [u8; 2] = [0x78, 0x01];

/// The most bytes a single stored block will hold.
///
/// This is the 32K DEFLATE window size.
pub const DEFLATE_WINDOW_SIZE: usize = 0x8000;

/// The bytes each block adds on top of its data: `BFINAL`, `LEN`, `NLEN`.
const BLOCK_OVERHEAD: usize = 5;

/// An error from reading a stored-block zlib stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZlibError {
  /// The header isn't a valid zlib header for a deflate stream, or it uses a
  /// preset dictionary.
  BadHeader,
  /// A block used fixed or dynamic Huffman codes (or the reserved type).
  UnsupportedBlockType,
  /// A stored block's `NLEN` wasn't the complement of its `LEN`.
  LenNlenMismatch,
  /// The stream ended before the final block and the trailer.
  UnexpectedEnd,
  /// The trailer didn't match the Adler-32 of the decoded bytes.
  AdlerMismatch { declared: u32, actual: u32 },
  /// There were bytes after the Adler-32 trailer.
  TrailingData,
}
impl fmt::Display for ZlibError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BadHeader => f.write_str("zlib: bad stream header"),
      Self::UnsupportedBlockType => f.write_str("zlib: only stored blocks are supported"),
      Self::LenNlenMismatch => f.write_str("zlib: stored block LEN and NLEN disagree"),
      Self::UnexpectedEnd => f.write_str("zlib: unexpected end of stream"),
      Self::AdlerMismatch { declared, actual } => {
        write!(f, "zlib: adler-32 mismatch: declared {declared:#010X}, actual {actual:#010X}")
      }
      Self::TrailingData => f.write_str("zlib: trailing data after the stream"),
    }
  }
}
#[cfg(feature = "std")]
impl std::error::Error for ZlibError {}

/// Gets the exact byte length that [`zlib_stored_frame`] will produce for some
/// number of input bytes.
#[inline]
#[must_use]
pub const fn zlib_stored_len(data_len: usize) -> usize {
  let block_count = if data_len == 0 { 1 } else { (data_len + DEFLATE_WINDOW_SIZE - 1) / DEFLATE_WINDOW_SIZE };
  ZLIB_STORED_HEADER.len() + block_count * BLOCK_OVERHEAD + data_len + 4
}

/// Wraps the bytes in a zlib stream of stored blocks.
///
/// Empty input still gets one empty final block, so the stream stays valid.
#[must_use]
pub fn zlib_stored_frame(data: &[u8]) -> Vec<u8> {
  let mut out = Vec::with_capacity(zlib_stored_len(data.len()));
  out.extend_from_slice(&ZLIB_STORED_HEADER);
  let mut blocks = data.chunks(DEFLATE_WINDOW_SIZE).peekable();
  if blocks.peek().is_none() {
    push_stored_block(&mut out, &[], true);
  }
  let mut block_count = 0_usize;
  while let Some(block) = blocks.next() {
    push_stored_block(&mut out, block, blocks.peek().is_none());
    block_count += 1;
  }
  out.extend_from_slice(&adler32(data).to_be_bytes());
  log::trace!("zlib: framed {} bytes into {} stored blocks", data.len(), block_count.max(1));
  out
}

fn push_stored_block(out: &mut Vec<u8>, block: &[u8], is_final: bool) {
  debug_assert!(block.len() <= DEFLATE_WINDOW_SIZE);
  let len = block.len() as u16;
  out.push(u8::from(is_final));
  out.extend_from_slice(&len.to_le_bytes());
  out.extend_from_slice(&(!len).to_le_bytes());
  out.extend_from_slice(block);
}

#[inline]
fn pull_array<const N: usize>(bytes: &[u8]) -> Result<([u8; N], &[u8]), ZlibError> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let mut a = [0_u8; N];
    a.copy_from_slice(head);
    Ok((a, tail))
  } else {
    Err(ZlibError::UnexpectedEnd)
  }
}

/// Undoes [`zlib_stored_frame`], checking the stream as it goes.
///
/// This accepts any zlib stream that uses only stored blocks (with any block
/// sizes), not just the ones this crate writes. The Adler-32 trailer is
/// verified against the decoded bytes.
pub fn zlib_stored_unframe(zlib: &[u8]) -> Result<Vec<u8>, ZlibError> {
  let ([cmf, flg], mut rest) = pull_array::<2>(zlib)?;
  let is_deflate = (cmf & 0x0F) == 8 && (cmf >> 4) <= 7;
  let check_ok = (u16::from_be_bytes([cmf, flg]) % 31) == 0;
  let has_dict = (flg & 0b0010_0000) != 0;
  if !is_deflate || !check_ok || has_dict {
    return Err(ZlibError::BadHeader);
  }
  let mut out = Vec::new();
  loop {
    let ([header], tail) = pull_array::<1>(rest)?;
    if (header >> 1) & 0b11 != 0 {
      return Err(ZlibError::UnsupportedBlockType);
    }
    let ([l0, l1, n0, n1], tail) = pull_array::<4>(tail)?;
    let len = u16::from_le_bytes([l0, l1]);
    if len != !u16::from_le_bytes([n0, n1]) {
      return Err(ZlibError::LenNlenMismatch);
    }
    if tail.len() < usize::from(len) {
      return Err(ZlibError::UnexpectedEnd);
    }
    let (block, tail) = tail.split_at(usize::from(len));
    out.extend_from_slice(block);
    rest = tail;
    if (header & 1) != 0 {
      break;
    }
  }
  let (trailer, rest) = pull_array::<4>(rest)?;
  if !rest.is_empty() {
    return Err(ZlibError::TrailingData);
  }
  let declared = u32::from_be_bytes(trailer);
  let actual = adler32(&out);
  if declared != actual {
    return Err(ZlibError::AdlerMismatch { declared, actual });
  }
  Ok(out)
}
