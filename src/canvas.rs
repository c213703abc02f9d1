#![forbid(unsafe_code)]

//! Provides the heap-allocated RGB canvas.

use alloc::{vec, vec::Vec};

use crate::{CanvasError, RGB8};

/// The largest width or height that a [`Canvas`] can have.
///
/// At this size the filtered scanlines of a PNG are still well under
/// `u32::MAX` bytes, so every chunk length fits its 32-bit field.
pub const MAX_DIMENSION: u32 = 17_000;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// This is how the canvas turns 2d coordinates into index values within its
/// planes. If you'd like to use the exact same function it does for some
/// reason, you can.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A fixed size RGB image.
///
/// The red, green, and blue samples are kept as three separate planes, each
/// `width * height` bytes in raster order. Use [`get_planes`](Self::get_planes)
/// and [`set_planes`](Self::set_planes) to work with the canvas as a single
/// interleaved `[r0, g0, b0, r1, g1, b1, ...]` buffer.
///
/// Samples are written with [`set_pixel`](Self::set_pixel) at a position, or
/// with [`spray`](Self::spray), which follows a raster scan from the top left to
/// the bottom right and wraps back to the start once the canvas is full. That's
/// handy for streaming bytes onto a canvas to look for patterns in them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Canvas {
  width: u32,
  height: u32,
  red: Vec<u8>,
  green: Vec<u8>,
  blue: Vec<u8>,
  spray_cursor: usize,
}
impl Canvas {
  /// Checks that a canvas of this size could be made, without allocating it.
  #[inline]
  pub const fn check_dimensions(width: u32, height: u32) -> Result<(), CanvasError> {
    if width == 0 || height == 0 {
      Err(CanvasError::WidthOrHeightZero)
    } else if width > MAX_DIMENSION || height > MAX_DIMENSION {
      Err(CanvasError::DimensionsTooLarge)
    } else {
      Ok(())
    }
  }

  /// Makes a new all-black canvas.
  pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
    Self::check_dimensions(width, height)?;
    let count = (width as usize) * (height as usize);
    Ok(Self {
      width,
      height,
      red: vec![0; count],
      green: vec![0; count],
      blue: vec![0; count],
      spray_cursor: 0,
    })
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// `width * height`
  #[inline]
  #[must_use]
  pub fn pixel_count(&self) -> usize {
    self.red.len()
  }

  /// The linear index that the next [`spray`](Self::spray) will write to.
  #[inline]
  #[must_use]
  pub const fn spray_cursor(&self) -> usize {
    self.spray_cursor
  }

  #[inline]
  fn checked_index(&self, x: u32, y: u32) -> Result<usize, CanvasError> {
    if x < self.width && y < self.height {
      Ok(xy_width_to_index(x, y, self.width))
    } else {
      Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height })
    }
  }

  #[inline]
  fn write_index(&mut self, i: usize, RGB8 { r, g, b }: RGB8) {
    self.red[i] = r;
    self.green[i] = g;
    self.blue[i] = b;
  }

  /// Gets the pixel at the position.
  #[inline]
  pub fn pixel(&self, x: u32, y: u32) -> Result<RGB8, CanvasError> {
    let i = self.checked_index(x, y)?;
    Ok(RGB8 { r: self.red[i], g: self.green[i], b: self.blue[i] })
  }

  /// Sets the pixel at the position, returning the value that was stored.
  ///
  /// Each sample is reduced modulo 256, so out of range values wrap rather
  /// than being rejected.
  #[inline]
  pub fn set_pixel(&mut self, x: u32, y: u32, r: u32, g: u32, b: u32) -> Result<RGB8, CanvasError> {
    let i = self.checked_index(x, y)?;
    let rgb = RGB8::from_wrapping(r, g, b);
    self.write_index(i, rgb);
    Ok(rgb)
  }

  /// Writes a pixel at the spray cursor then advances the cursor, wrapping to
  /// the top left after the last pixel.
  #[inline]
  pub fn spray(&mut self, r: u32, g: u32, b: u32) {
    self.write_index(self.spray_cursor, RGB8::from_wrapping(r, g, b));
    self.spray_cursor = (self.spray_cursor + 1) % self.pixel_count();
  }

  /// Sprays every complete `[r, g, b]` triplet of the bytes onto the canvas.
  ///
  /// A partial triplet at the end of the bytes is the end of the stream, not
  /// an error, and is ignored. Returns how many pixels were sprayed.
  pub fn spray_bytes(&mut self, bytes: &[u8]) -> usize {
    let triplets: &[RGB8] = bytemuck::cast_slice(&bytes[..bytes.len() - bytes.len() % 3]);
    for &RGB8 { r, g, b } in triplets {
      self.spray(r.into(), g.into(), b.into());
    }
    triplets.len()
  }

  /// Interleaves the three planes into `[r0, g0, b0, r1, g1, b1, ...]`.
  #[must_use]
  pub fn get_planes(&self) -> Vec<u8> {
    let mut out: Vec<u8> = vec![0; 3 * self.pixel_count()];
    let dest: &mut [RGB8] = bytemuck::cast_slice_mut(&mut out);
    for (d, p) in dest.iter_mut().zip(self.pixels()) {
      *d = p;
    }
    out
  }

  /// Replaces the three planes with the values of an interleaved buffer.
  ///
  /// The buffer must be exactly `3 * width * height` bytes. On error the
  /// canvas is left unchanged.
  pub fn set_planes(&mut self, flat: &[u8]) -> Result<(), CanvasError> {
    let expected = 3 * self.pixel_count();
    if flat.len() != expected {
      return Err(CanvasError::SizeMismatch { expected, actual: flat.len() });
    }
    let pixels: &[RGB8] = bytemuck::cast_slice(flat);
    for (i, &rgb) in pixels.iter().enumerate() {
      self.write_index(i, rgb);
    }
    Ok(())
  }

  /// Iterates the pixels in raster order.
  #[inline]
  pub fn pixels(&self) -> impl Iterator<Item = RGB8> + '_ {
    self
      .red
      .iter()
      .zip(self.green.iter())
      .zip(self.blue.iter())
      .map(|((&r, &g), &b)| RGB8 { r, g, b })
  }
}
