#![forbid(unsafe_code)]

//! Module for writing (and reading back) PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Writing
//!
//! Call [`png_encode_canvas`] (or use [`PngEncoder`] through the
//! [`ImageEncoder`](crate::ImageEncoder) trait). The output is always the
//! simplest PNG that there is:
//!
//! * The 8 byte [`PNG_SIGNATURE`].
//! * An [`IHDR`] chunk: 8-bit RGB, not interlaced.
//! * One `IDAT` chunk. Every scanline gets filter type 0 (None), and the
//!   filtered lines are wrapped in a zlib stream of stored blocks (see
//!   [`zlib`](crate::zlib)). Nothing is compressed, so the file is a little
//!   larger than `3 * width * height` bytes.
//! * An empty `IEND` chunk.
//!
//! Each chunk is `length` (u32 BE), the 4-byte type, the data, then the CRC-32
//! of the type and data (u32 BE).
//!
//! The whole PNG is built in memory and returned as one `Vec<u8>`.
//!
//! ## Reading
//!
//! [`png_try_canvas`] turns PNG bytes back into a [`Canvas`], but only for the
//! same subset that this module writes. Anything with real compression,
//! filtering other than None, another pixel format, or interlacing is refused
//! with a [`PngError`]. Unlike most PNG decoders this one *does* check every
//! chunk CRC and the Adler-32 of the image data, since its main job is proving
//! that written data is correct. [`PngRawChunkIter`] can be used directly to
//! look at the chunks of any PNG.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Write};

use crate::{
  checksum::update_crc,
  zlib::{zlib_stored_frame, zlib_stored_len, zlib_stored_unframe, ZlibError},
  Canvas, CanvasError, ImageEncoder,
};

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

#[cfg(test)]
mod tests;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Checks if the PNG's initial 8 bytes are the correct signature.
#[inline]
#[must_use]
pub fn is_png_signature_correct(png: &[u8]) -> bool {
  png.len() >= 8 && png[..8] == PNG_SIGNATURE
}

/// The filter type byte written before every scanline.
pub const FILTER_NONE: u8 = 0;

/// An error from reading PNG data back into a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// The first 8 bytes weren't [`PNG_SIGNATURE`].
  BadSignature,
  NoChunksPresent,
  FirstChunkNotIHDR,
  /// The `IHDR` data was the wrong size or used an unknown method.
  IllegalIHDR,
  /// Only 8-bit RGB is supported.
  UnsupportedPixelFormat,
  InterlaceNotSupported,
  NoIDAT,
  /// A chunk's declared CRC didn't match its contents.
  CrcMismatch { declared: u32, actual: u32 },
  /// A scanline used a filter other than None.
  IllegalFilterType(u8),
  Zlib(ZlibError),
  Canvas(CanvasError),
}
impl From<ZlibError> for PngError {
  #[inline]
  fn from(e: ZlibError) -> Self {
    Self::Zlib(e)
  }
}
impl From<CanvasError> for PngError {
  #[inline]
  fn from(e: CanvasError) -> Self {
    Self::Canvas(e)
  }
}
impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BadSignature => f.write_str("png: bad signature"),
      Self::NoChunksPresent => f.write_str("png: no chunks present"),
      Self::FirstChunkNotIHDR => f.write_str("png: first chunk is not IHDR"),
      Self::IllegalIHDR => f.write_str("png: illegal IHDR"),
      Self::UnsupportedPixelFormat => f.write_str("png: only 8-bit RGB is supported"),
      Self::InterlaceNotSupported => f.write_str("png: interlaced images are not supported"),
      Self::NoIDAT => f.write_str("png: no IDAT chunk"),
      Self::CrcMismatch { declared, actual } => {
        write!(f, "png: chunk crc mismatch: declared {declared:#010X}, actual {actual:#010X}")
      }
      Self::IllegalFilterType(t) => write!(f, "png: unsupported filter type {t}"),
      Self::Zlib(e) => fmt::Display::fmt(e, f),
      Self::Canvas(e) => write!(f, "png: {e}"),
    }
  }
}
#[cfg(feature = "std")]
impl std::error::Error for PngError {}

/// The CRC-32 that a chunk with this type and data should declare.
#[inline]
#[must_use]
pub fn chunk_crc(type_: PngChunkType, data: &[u8]) -> u32 {
  update_crc(update_crc(u32::MAX, type_.0.iter().copied()), data.iter().copied()) ^ u32::MAX
}

/// Appends a complete chunk (length, type, data, CRC) to the output.
///
/// ## Panics
/// * If the data is longer than `u32::MAX` bytes.
pub fn png_push_chunk(out: &mut Vec<u8>, type_: PngChunkType, data: &[u8]) {
  let len = u32::try_from(data.len()).expect("png chunk data over u32::MAX bytes");
  out.extend_from_slice(&len.to_be_bytes());
  out.extend_from_slice(&type_.0);
  out.extend_from_slice(data);
  out.extend_from_slice(&chunk_crc(type_, data).to_be_bytes());
}

/// Gets the canvas as filter lines: each row of `3 * width` bytes with a
/// [`FILTER_NONE`] byte in front of it.
#[must_use]
pub fn png_filtered_scanlines(canvas: &Canvas) -> Vec<u8> {
  let ihdr = IHDR::rgb8(canvas.width(), canvas.height());
  let flat = canvas.get_planes();
  let mut out = Vec::with_capacity(ihdr.bytes_per_filterline() * (canvas.height() as usize));
  for row in flat.chunks_exact(3 * (canvas.width() as usize)) {
    out.push(FILTER_NONE);
    out.extend_from_slice(row);
  }
  out
}

/// Encodes the canvas as PNG bytes.
#[must_use]
pub fn png_encode_canvas(canvas: &Canvas) -> Vec<u8> {
  let ihdr = IHDR::rgb8(canvas.width(), canvas.height());
  let scanlines = png_filtered_scanlines(canvas);
  let idat = zlib_stored_frame(&scanlines);
  // signature, then 12 bytes of framing around each of the three chunks
  let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + IHDR::LEN + idat.len());
  out.extend_from_slice(&PNG_SIGNATURE);
  png_push_chunk(&mut out, PngChunkType::IHDR, &ihdr.to_bytes());
  png_push_chunk(&mut out, PngChunkType::IDAT, &idat);
  png_push_chunk(&mut out, PngChunkType::IEND, &[]);
  debug_assert_eq!(out.len(), png_encoded_len(canvas.width(), canvas.height()));
  log::debug!(
    "png: encoded {}x{} canvas, {} scanline bytes, {} bytes total",
    canvas.width(),
    canvas.height(),
    scanlines.len(),
    out.len()
  );
  out
}

/// The exact size of [`png_encode_canvas`] output for a canvas of this size.
#[inline]
#[must_use]
pub const fn png_encoded_len(width: u32, height: u32) -> usize {
  let scanline_bytes = (1 + 3 * (width as usize)) * (height as usize);
  PNG_SIGNATURE.len() + 3 * 12 + IHDR::LEN + zlib_stored_len(scanline_bytes)
}

/// Writes PNG data, see [`png_encode_canvas`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PngEncoder;
impl ImageEncoder for PngEncoder {
  #[inline]
  fn encode(&self, canvas: &Canvas) -> Vec<u8> {
    png_encode_canvas(canvas)
  }

  #[inline]
  fn extension(&self) -> &'static str {
    "png"
  }
}

/// Reads PNG data (of the kind this module writes) into a new [`Canvas`].
pub fn png_try_canvas(png: &[u8]) -> Result<Canvas, PngError> {
  if !is_png_signature_correct(png) {
    return Err(PngError::BadSignature);
  }
  let mut it = PngRawChunkIter::new(png).map(|raw| {
    let actual = raw.compute_actual_crc();
    if raw.declared_crc() == actual {
      Ok(raw)
    } else {
      Err(PngError::CrcMismatch { declared: raw.declared_crc(), actual })
    }
  });
  let first = it.next().ok_or(PngError::NoChunksPresent)??;
  if first.type_() != PngChunkType::IHDR {
    return Err(PngError::FirstChunkNotIHDR);
  }
  let ihdr = IHDR::try_from(first.data())?;
  if ihdr.bit_depth != 8 || ihdr.color_type != 2 {
    return Err(PngError::UnsupportedPixelFormat);
  }
  if ihdr.is_interlaced {
    return Err(PngError::InterlaceNotSupported);
  }
  Canvas::check_dimensions(ihdr.width, ihdr.height)?;
  // all IDAT chunks together form one zlib stream
  let mut zlib: Vec<u8> = Vec::new();
  let mut idat_count = 0_usize;
  for raw in it {
    let raw = raw?;
    match raw.type_() {
      PngChunkType::IDAT => {
        zlib.extend_from_slice(raw.data());
        idat_count += 1;
      }
      PngChunkType::IEND => break,
      other => log::trace!("png: skipping {:?} chunk", other),
    }
  }
  if idat_count == 0 {
    return Err(PngError::NoIDAT);
  }
  let filtered = zlib_stored_unframe(&zlib)?;
  let line_len = ihdr.bytes_per_filterline();
  let expected = line_len * (ihdr.height as usize);
  if filtered.len() != expected {
    return Err(CanvasError::SizeMismatch { expected, actual: filtered.len() }.into());
  }
  let mut flat = Vec::with_capacity(filtered.len() - (ihdr.height as usize));
  for line in filtered.chunks_exact(line_len) {
    match line {
      [FILTER_NONE, pixels @ ..] => flat.extend_from_slice(pixels),
      [filter, ..] => return Err(PngError::IllegalFilterType(*filter)),
      [] => return Err(PngError::IllegalIHDR),
    }
  }
  let mut canvas = Canvas::new(ihdr.width, ihdr.height)?;
  canvas.set_planes(&flat)?;
  log::debug!("png: read {}x{} canvas from {} IDAT chunks", ihdr.width, ihdr.height, idat_count);
  Ok(canvas)
}
