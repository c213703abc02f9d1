#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_debug_implementations)]

//! A crate for drawing on an RGB canvas and dumping it as an image.
//!
//! Draw with [`Canvas::set_pixel`], or stream bytes onto the canvas in raster
//! order with [`Canvas::spray`]. Then encode it:
//!
//! * [`png`]: uncompressed PNG. The zlib data is made of stored blocks, so no
//!   compression library is needed, only the [`checksum`] functions.
//! * [`netpbm`]: `P3` (ascii) or `P6` (binary) PPM.
//!
//! Both encoders (and the headerless raw dump) can also be picked at runtime
//! with [`CanvasFormat`], through the [`ImageEncoder`] trait.
//!
//! ```
//! # #[cfg(feature = "png")] {
//! use rawcanvas::{png::png_encode_canvas, Canvas};
//! let mut canvas = Canvas::new(2, 2).unwrap();
//! canvas.set_pixel(1, 1, 10, 20, 30).unwrap();
//! let png: Vec<u8> = png_encode_canvas(&canvas);
//! assert_eq!(&png[1..4], b"PNG");
//! # }
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod pixel_formats;
pub use pixel_formats::*;

mod canvas;
pub use canvas::*;

mod encoder;
pub use encoder::*;

pub mod checksum;

pub mod zlib;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod png;

#[cfg(feature = "netpbm")]
#[cfg_attr(docs_rs, doc(cfg(feature = "netpbm")))]
pub mod netpbm;
