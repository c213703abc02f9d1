#![forbid(unsafe_code)]

//! This module gives support for the RGB members of the
//! [Netpbm](https://en.wikipedia.org/wiki/Netpbm) format family.
//!
//! A PPM file is a tiny ascii header followed by the pixel samples, with
//! absolutely no compression and no checksum.
//!
//! * `P3` files write every sample as ascii decimal text.
//! * `P6` files write every sample as a raw byte.
//!
//! The header is the tag, then the width, height, and max sample value as ascii
//! decimal numbers. This module always writes a max value of 255, and never
//! writes comments.
//!
//! When reading, [`ppm_try_canvas`] accepts either tag with any max value up to
//! 255 (samples are rescaled to the full `u8` range), and skips `#` comments
//! wherever the format allows them.
//!
//! Important: The colorspace of a Netpbm file is never given in the header.
//! Color images will *often* use [CIE Rec. 709](https://en.wikipedia.org/wiki/Rec._709),
//! but might be using sRGB, or they might even be linear. The canvas doesn't
//! care, it just stores whatever bytes it's given.

use alloc::{string::String, vec::Vec};
use core::{
  fmt::{self, Write},
  num::ParseIntError,
  str::{from_utf8, Utf8Error},
};

use crate::{Canvas, CanvasError, ImageEncoder, RGB8};

/// The max sample value written in every header.
pub const PPM_MAX_VALUE: u32 = 255;

/// ASCII output starts a new line after this many pixels.
pub const PPM_ASCII_PIXELS_PER_LINE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetpbmError {
  ParseError,
  /// The tag value given wasn't `P3` or `P6`
  TagError,
  /// The max value wasn't in the supported range of `1..=255`
  MaxValueError,
  /// There were fewer samples than the header said there would be.
  InsufficientData,
  Canvas(CanvasError),
}
impl From<Utf8Error> for NetpbmError {
  #[inline]
  fn from(_: Utf8Error) -> Self {
    NetpbmError::ParseError
  }
}
impl From<ParseIntError> for NetpbmError {
  #[inline]
  fn from(_: ParseIntError) -> Self {
    NetpbmError::ParseError
  }
}
impl From<CanvasError> for NetpbmError {
  #[inline]
  fn from(e: CanvasError) -> Self {
    NetpbmError::Canvas(e)
  }
}
impl fmt::Display for NetpbmError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ParseError => f.write_str("ppm: parse error"),
      Self::TagError => f.write_str("ppm: only P3 and P6 are supported"),
      Self::MaxValueError => f.write_str("ppm: max value must be 1 to 255"),
      Self::InsufficientData => f.write_str("ppm: not enough pixel data"),
      Self::Canvas(e) => write!(f, "ppm: {e}"),
    }
  }
}
#[cfg(feature = "std")]
impl std::error::Error for NetpbmError {}

/// Writes the header: tag, width and height, max value, each on its own line.
fn ppm_push_header(out: &mut String, tag: u8, width: u32, height: u32) {
  // writing to a String can't fail
  let _ = write!(out, "P{tag}\n{width} {height}\n{max}\n", max = PPM_MAX_VALUE);
}

/// Encodes the canvas as a PPM.
///
/// * `ascii`: `P3` when true, `P6` when false.
///
/// Ascii samples are written right aligned in 3 columns, each followed by a
/// space, and there's a newline after every 6th pixel.
#[must_use]
pub fn ppm_encode_canvas(canvas: &Canvas, ascii: bool) -> Vec<u8> {
  let mut header = String::with_capacity(24);
  ppm_push_header(&mut header, if ascii { 3 } else { 6 }, canvas.width(), canvas.height());
  let out = if ascii {
    let pixel_count = canvas.pixel_count();
    let mut s = header;
    s.reserve(pixel_count * 12 + pixel_count / PPM_ASCII_PIXELS_PER_LINE);
    for (i, RGB8 { r, g, b }) in canvas.pixels().enumerate() {
      let _ = write!(s, "{r:3} {g:3} {b:3} ");
      if (i + 1) % PPM_ASCII_PIXELS_PER_LINE == 0 {
        s.push('\n');
      }
    }
    s.into_bytes()
  } else {
    let mut v = header.into_bytes();
    v.extend_from_slice(&canvas.get_planes());
    v
  };
  log::debug!(
    "ppm: encoded {}x{} canvas as P{}, {} bytes",
    canvas.width(),
    canvas.height(),
    if ascii { 3 } else { 6 },
    out.len()
  );
  out
}

/// Writes PPM data, see [`ppm_encode_canvas`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PpmEncoder {
  /// `P3` when true, `P6` when false.
  pub ascii: bool,
}
impl ImageEncoder for PpmEncoder {
  #[inline]
  fn encode(&self, canvas: &Canvas) -> Vec<u8> {
    ppm_encode_canvas(canvas, self.ascii)
  }

  #[inline]
  fn extension(&self) -> &'static str {
    "ppm"
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetpbmHeader {
  /// 3 (ascii rgb) or 6 (binary rgb)
  pub tag: u8,
  pub width: u32,
  pub height: u32,
  /// Max value per channel entry.
  pub max: u32,
}

/// Trims leading whitespace and `#` comments.
#[inline]
pub fn netpbm_trim(mut bytes: &[u8]) -> &[u8] {
  loop {
    match bytes {
      // trim leading whitespace
      [u, tail @ ..] if u.is_ascii_whitespace() => bytes = tail,

      // trim single-line comment
      [b'#', tail @ ..] => {
        let mut it = tail.splitn(2, |&u| u == b'\n');
        it.next();
        bytes = it.next().unwrap_or(&[]);
      }

      // now we're done
      _ => return bytes,
    }
  }
}

/// Pulls an ascii number off the front of the bytes, without trimming after it.
#[inline]
pub fn netpbm_pull_ascii_u32(bytes: &[u8]) -> Result<(u32, &[u8]), NetpbmError> {
  let digit_count = bytes.iter().take_while(|u| u.is_ascii_digit()).count();
  let (digits, spare) = bytes.split_at(digit_count);
  let number = from_utf8(digits)?.parse::<u32>()?;
  Ok((number, spare))
}

/// Parses the header, returning it and the pixel data after it.
///
/// The pixel data starts after the single whitespace byte that ends the max
/// value, so binary samples that happen to look like whitespace are kept.
pub fn netpbm_pull_header(bytes: &[u8]) -> Result<(NetpbmHeader, &[u8]), NetpbmError> {
  let (tag, rest) = match bytes {
    [b'P', b'3', rest @ ..] => (3, rest),
    [b'P', b'6', rest @ ..] => (6, rest),
    [b'P', _, ..] => return Err(NetpbmError::TagError),
    _ => return Err(NetpbmError::ParseError),
  };
  let (width, rest) = netpbm_pull_ascii_u32(netpbm_trim(rest))?;
  let (height, rest) = netpbm_pull_ascii_u32(netpbm_trim(rest))?;
  let (max, rest) = netpbm_pull_ascii_u32(netpbm_trim(rest))?;
  if !(1..=PPM_MAX_VALUE).contains(&max) {
    return Err(NetpbmError::MaxValueError);
  }
  let rest = match rest {
    [u, tail @ ..] if u.is_ascii_whitespace() => tail,
    _ => return Err(NetpbmError::ParseError),
  };
  Ok((NetpbmHeader { tag, width, height, max }, rest))
}

/// Iterates ascii samples, stopping at the first thing that isn't a number.
#[inline]
pub fn netpbm_iter_p3(mut bytes: &[u8]) -> impl Iterator<Item = u32> + '_ {
  bytes = netpbm_trim(bytes);
  core::iter::from_fn(move || {
    let (out, tail) = netpbm_pull_ascii_u32(bytes).ok()?;
    bytes = netpbm_trim(tail);
    Some(out)
  })
}

/// Reads `P3` or `P6` data into a new [`Canvas`].
pub fn ppm_try_canvas(bytes: &[u8]) -> Result<Canvas, NetpbmError> {
  let (header, pixel_data) = netpbm_pull_header(bytes)?;
  let mut canvas = Canvas::new(header.width, header.height)?;
  let sample_count = 3 * canvas.pixel_count();
  let rescale = |s: u32| -> Result<u8, NetpbmError> {
    if s > header.max {
      Err(NetpbmError::ParseError)
    } else {
      Ok(((s * 255 + header.max / 2) / header.max) as u8)
    }
  };
  let mut flat: Vec<u8> = Vec::with_capacity(sample_count);
  if header.tag == 3 {
    for s in netpbm_iter_p3(pixel_data).take(sample_count) {
      flat.push(rescale(s)?);
    }
  } else {
    for &s in pixel_data.iter().take(sample_count) {
      flat.push(rescale(u32::from(s))?);
    }
  }
  if flat.len() < sample_count {
    return Err(NetpbmError::InsufficientData);
  }
  canvas.set_planes(&flat)?;
  log::debug!("ppm: read {}x{} canvas from P{}", header.width, header.height, header.tag);
  Ok(canvas)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ascii_single_pixel() {
    let mut c = Canvas::new(1, 1).unwrap();
    c.set_pixel(0, 0, 10, 20, 30).unwrap();
    assert_eq!(ppm_encode_canvas(&c, true), b"P3\n1 1\n255\n 10  20  30 ");
  }

  #[test]
  fn test_ascii_line_breaks() {
    let mut c = Canvas::new(7, 1).unwrap();
    c.set_pixel(6, 0, 255, 0, 7).unwrap();
    let text = String::from_utf8(ppm_encode_canvas(&c, true)).unwrap();
    let zeros = "  0   0   0 ";
    let mut expected = String::from("P3\n7 1\n255\n");
    for _ in 0..6 {
      expected.push_str(zeros);
    }
    expected.push('\n');
    expected.push_str("255   0   7 ");
    assert_eq!(text, expected);
  }

  #[test]
  fn test_binary() {
    let mut c = Canvas::new(2, 1).unwrap();
    c.set_pixel(0, 0, 1, 2, 3).unwrap();
    c.set_pixel(1, 0, 10, 32, 255).unwrap();
    assert_eq!(ppm_encode_canvas(&c, false), b"P6\n2 1\n255\n\x01\x02\x03\x0A\x20\xFF");
  }

  #[test]
  fn test_trim_comments() {
    assert_eq!(netpbm_trim(b"  # one\n\t# two\n 12"), b"12");
    assert_eq!(netpbm_trim(b"# runs to the end"), b"");
    assert_eq!(netpbm_trim(b"3 4"), b"3 4");
  }

  #[test]
  fn test_header_parsing() {
    let (h, rest) = netpbm_pull_header(b"P6 # made by hand\n 4\t2\n# max\n255\n\n\x01").unwrap();
    assert_eq!(h, NetpbmHeader { tag: 6, width: 4, height: 2, max: 255 });
    // the newline after the header's own newline is pixel data
    assert_eq!(rest, b"\n\x01");
    assert_eq!(netpbm_pull_header(b"P5\n1 1\n255\n"), Err(NetpbmError::TagError));
    assert_eq!(netpbm_pull_header(b"P3\n1 1\n65535\n"), Err(NetpbmError::MaxValueError));
    assert_eq!(netpbm_pull_header(b"P3\n1 x\n255\n"), Err(NetpbmError::ParseError));
    assert_eq!(netpbm_pull_header(b"hello"), Err(NetpbmError::ParseError));
  }

  #[test]
  fn test_read_back_both_tags() {
    let mut c = Canvas::new(5, 3).unwrap();
    for i in 0..15 {
      c.spray(i * 17, 255 - i, i * 100);
    }
    // the cursor isn't part of the image
    let mut expected = Canvas::new(5, 3).unwrap();
    expected.set_planes(&c.get_planes()).unwrap();
    assert_eq!(ppm_try_canvas(&ppm_encode_canvas(&c, true)), Ok(expected.clone()));
    assert_eq!(ppm_try_canvas(&ppm_encode_canvas(&c, false)), Ok(expected));
  }

  #[test]
  fn test_read_rescales_and_rejects() {
    let c = ppm_try_canvas(b"P3\n2 1\n1\n1 0 1 0 1 0").unwrap();
    assert_eq!(c.get_planes(), [255, 0, 255, 0, 255, 0]);
    assert_eq!(ppm_try_canvas(b"P3\n2 1\n255\n1 2 3 4"), Err(NetpbmError::InsufficientData));
    assert_eq!(ppm_try_canvas(b"P6\n2 1\n255\n\x01\x02"), Err(NetpbmError::InsufficientData));
    assert_eq!(ppm_try_canvas(b"P3\n1 1\n100\n1 2 101"), Err(NetpbmError::ParseError));
    assert_eq!(
      ppm_try_canvas(b"P6\n0 1\n255\n"),
      Err(NetpbmError::Canvas(CanvasError::WidthOrHeightZero))
    );
  }
}
