#![allow(bad_style)]

#[cfg(feature = "png")]
mod png;

#[cfg(feature = "netpbm")]
mod netpbm;

use rawcanvas::Canvas;

fn rand_bytes(count: usize) -> Vec<u8> {
  let mut buffer = vec![0; count];
  getrandom::getrandom(&mut buffer).unwrap();
  buffer
}

/// A canvas of random size (up to the limits) filled with random pixels.
fn rand_canvas(max_width: u32, max_height: u32) -> Canvas {
  let dims = rand_bytes(8);
  let width = 1 + u32::from_le_bytes(dims[0..4].try_into().unwrap()) % max_width;
  let height = 1 + u32::from_le_bytes(dims[4..8].try_into().unwrap()) % max_height;
  let mut canvas = Canvas::new(width, height).unwrap();
  canvas.spray_bytes(&rand_bytes(3 * canvas.pixel_count()));
  canvas
}

#[test]
fn test_spray_wraps_at_pixel_count() {
  for _ in 0..10 {
    let mut canvas = rand_canvas(40, 40);
    let n = canvas.pixel_count();
    for _ in 0..n {
      canvas.spray(1, 2, 3);
    }
    assert_eq!(canvas.spray_cursor(), 0);
    let k = rand_bytes(1)[0] as usize % n;
    for _ in 0..k {
      canvas.spray(1, 2, 3);
    }
    assert_eq!(canvas.spray_cursor(), k);
  }
}

#[test]
fn test_planes_round_trip_random() {
  for _ in 0..10 {
    let canvas = rand_canvas(64, 64);
    let mut copy = Canvas::new(canvas.width(), canvas.height()).unwrap();
    copy.set_planes(&canvas.get_planes()).unwrap();
    assert_eq!(copy.get_planes(), canvas.get_planes());
    assert!(copy.pixels().eq(canvas.pixels()));
  }
}
