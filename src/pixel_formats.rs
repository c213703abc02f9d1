//! Module for pixel formats.
//!
//! The canvas only ever stores 8-bit truecolor, so there's just the one format
//! here. It's `Pod`, so a slice of interleaved `[r, g, b, r, g, b, ...]` bytes
//! can be viewed as a slice of pixels (and back) with `bytemuck`.

use bytemuck::{Pod, Zeroable};

/// An 8-bit per channel RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Zeroable, Pod)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}
impl RGB8 {
  /// Builds a pixel from wide sample values, each reduced modulo 256.
  #[inline]
  #[must_use]
  pub const fn from_wrapping(r: u32, g: u32, b: u32) -> Self {
    Self { r: r as u8, g: g as u8, b: b as u8 }
  }
}
impl From<[u8; 3]> for RGB8 {
  #[inline]
  fn from([r, g, b]: [u8; 3]) -> Self {
    Self { r, g, b }
  }
}
impl From<RGB8> for [u8; 3] {
  #[inline]
  fn from(RGB8 { r, g, b }: RGB8) -> Self {
    [r, g, b]
  }
}

#[test]
fn test_rgb8_wraps_samples() {
  assert_eq!(RGB8::from_wrapping(256, 257, 511), RGB8 { r: 0, g: 1, b: 255 });
  assert_eq!(RGB8::from_wrapping(10, 20, 30), RGB8::from([10, 20, 30]));
  assert_eq!(<[u8; 3]>::from(RGB8 { r: 7, g: 8, b: 9 }), [7, 8, 9]);
  let bytes: &[u8] = bytemuck::cast_slice(&[RGB8 { r: 1, g: 2, b: 3 }, RGB8 { r: 4, g: 5, b: 6 }]);
  assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
}
