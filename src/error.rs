use core::fmt;

/// An error from working with a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasError {
  /// A flat RGB buffer didn't have exactly `3 * width * height` bytes.
  SizeMismatch { expected: usize, actual: usize },

  /// The `(x,y)` position is outside of the canvas.
  OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

  /// The requested width and/or height is 0.
  WidthOrHeightZero,

  /// The image is too large.
  ///
  /// Canvases are limited to [`MAX_DIMENSION`](crate::MAX_DIMENSION) or less
  /// on each side, which keeps every encoded PNG chunk within the 32-bit
  /// length field.
  DimensionsTooLarge,
}
impl fmt::Display for CanvasError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::SizeMismatch { expected, actual } => {
        write!(f, "flat canvas is the wrong size: expected {expected} bytes, got {actual}")
      }
      Self::OutOfBounds { x, y, width, height } => {
        write!(f, "position ({x},{y}) is outside of the {width}x{height} canvas")
      }
      Self::WidthOrHeightZero => f.write_str("canvas width and height must be non-zero"),
      Self::DimensionsTooLarge => f.write_str("canvas dimensions are too large"),
    }
  }
}
#[cfg(feature = "std")]
impl std::error::Error for CanvasError {}
