use super::*;

/// Image Header
///
/// This crate only ever writes 8-bit truecolor, non-interlaced images, but the
/// header records whatever a PNG actually declares so that the reader can say
/// *why* it won't take an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// 2 is RGB, the only color type written here.
  pub color_type: u8,
  /// if the image data is stored interlaced.
  pub is_interlaced: bool,
}
impl IHDR {
  /// Length of the chunk's data.
  pub const LEN: usize = 13;

  /// The header for an 8-bit RGB image of the given size.
  #[inline]
  #[must_use]
  pub const fn rgb8(width: u32, height: u32) -> Self {
    Self { width, height, bit_depth: 8, color_type: 2, is_interlaced: false }
  }

  /// Bytes for one filter line: the filter type byte plus the pixel data.
  #[inline]
  #[must_use]
  pub const fn bytes_per_filterline(&self) -> usize {
    1 + (self.width as usize) * 3
  }

  /// The chunk data: width, height, bit depth, color type, compression method,
  /// filter method, interlace method.
  #[must_use]
  pub fn to_bytes(&self) -> [u8; Self::LEN] {
    let mut out = [0_u8; Self::LEN];
    out[0..4].copy_from_slice(&self.width.to_be_bytes());
    out[4..8].copy_from_slice(&self.height.to_be_bytes());
    out[8] = self.bit_depth;
    out[9] = self.color_type;
    out[10] = 0;
    out[11] = 0;
    out[12] = u8::from(self.is_interlaced);
    out
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, 0, 0, interlace_method] => Ok(Self {
        width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
        height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
        bit_depth: *bit_depth,
        color_type: *color_type,
        is_interlaced: match interlace_method {
          0 => false,
          1 => true,
          _ => return Err(PngError::IllegalIHDR),
        },
      }),
      _ => Err(PngError::IllegalIHDR),
    }
  }
}
