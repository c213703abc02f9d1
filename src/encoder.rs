use alloc::vec::Vec;
use core::str::FromStr;

use crate::Canvas;

/// Something that can turn a [`Canvas`] into the bytes of an image file.
///
/// The whole output is built in memory and handed back at once.
pub trait ImageEncoder {
  fn encode(&self, canvas: &Canvas) -> Vec<u8>;

  /// The usual file extension for this encoder's output.
  fn extension(&self) -> &'static str {
    "bin"
  }
}

/// Picks an output format at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasFormat {
  /// Uncompressed PNG
  #[cfg(feature = "png")]
  Png,
  /// `P3` when `ascii`, otherwise `P6`
  #[cfg(feature = "netpbm")]
  Ppm { ascii: bool },
  /// Just the interleaved `r, g, b` bytes from
  /// [`get_planes`](Canvas::get_planes), no header at all.
  Raw,
}
impl ImageEncoder for CanvasFormat {
  #[inline]
  fn encode(&self, canvas: &Canvas) -> Vec<u8> {
    match *self {
      #[cfg(feature = "png")]
      Self::Png => crate::png::png_encode_canvas(canvas),
      #[cfg(feature = "netpbm")]
      Self::Ppm { ascii } => crate::netpbm::ppm_encode_canvas(canvas, ascii),
      Self::Raw => canvas.get_planes(),
    }
  }

  #[inline]
  fn extension(&self) -> &'static str {
    match self {
      #[cfg(feature = "png")]
      Self::Png => "png",
      #[cfg(feature = "netpbm")]
      Self::Ppm { .. } => "ppm",
      Self::Raw => "rgb",
    }
  }
}
impl FromStr for CanvasFormat {
  type Err = ();
  /// Accepts `png`, `ppm` (binary), `ppm-ascii`, and `raw`, in any case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s {
      #[cfg(feature = "png")]
      s if s.eq_ignore_ascii_case("png") => Self::Png,
      #[cfg(feature = "netpbm")]
      s if s.eq_ignore_ascii_case("ppm") => Self::Ppm { ascii: false },
      #[cfg(feature = "netpbm")]
      s if s.eq_ignore_ascii_case("ppm-ascii") => Self::Ppm { ascii: true },
      s if s.eq_ignore_ascii_case("raw") => Self::Raw,
      _ => return Err(()),
    })
  }
}
