use rawcanvas::{netpbm::*, Canvas, CanvasFormat, ImageEncoder};

#[test]
fn test_ppm_round_trips_random_canvases() {
  for _ in 0..8 {
    let canvas = super::rand_canvas(50, 50);
    for ascii in [true, false] {
      let ppm = ppm_encode_canvas(&canvas, ascii);
      let back = ppm_try_canvas(&ppm).unwrap();
      assert_eq!(back.get_planes(), canvas.get_planes());
    }
  }
}

#[test]
fn test_binary_ppm_layout() {
  let canvas = super::rand_canvas(20, 20);
  let ppm = CanvasFormat::Ppm { ascii: false }.encode(&canvas);
  let (header, pixels) = netpbm_pull_header(&ppm).unwrap();
  assert_eq!(header, NetpbmHeader { tag: 6, width: canvas.width(), height: canvas.height(), max: 255 });
  assert_eq!(pixels, canvas.get_planes().as_slice());
}

#[test]
fn test_ascii_ppm_lines() {
  let mut canvas = Canvas::new(4, 4).unwrap();
  canvas.spray_bytes(&super::rand_bytes(48));
  let text = String::from_utf8(ppm_encode_canvas(&canvas, true)).unwrap();
  let lines: Vec<&str> = text.lines().collect();
  // 3 header lines, then 16 pixels at 6 per line
  assert_eq!(lines.len(), 3 + 3);
  assert_eq!(&lines[..3], &["P3", "4 4", "255"]);
  assert!(lines[3..5].iter().all(|line| line.len() == 6 * 12));
  assert_eq!(lines[5].len(), 4 * 12);
  assert!(!text.ends_with('\n'));
}
