use rawcanvas::{
  checksum::crc32,
  png::*,
  zlib::{zlib_stored_frame, zlib_stored_unframe, DEFLATE_WINDOW_SIZE},
  Canvas,
};

#[test]
fn test_PngRawChunkIter_no_panics() {
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngRawChunkIter::new(&v) {
      //
    }
    assert!(png_try_canvas(&v).is_err());
  }
}

#[test]
fn test_chunk_crcs_cover_type_and_data() {
  let canvas = super::rand_canvas(30, 30);
  let png = png_encode_canvas(&canvas);
  for chunk in PngRawChunkIter::new(&png) {
    let mut joined = chunk.type_().0.to_vec();
    joined.extend_from_slice(chunk.data());
    assert_eq!(chunk.declared_crc(), crc32(&joined));
  }
}

#[test]
fn test_idat_round_trips_random_canvases() {
  for _ in 0..8 {
    let canvas = super::rand_canvas(200, 200);
    let png = png_encode_canvas(&canvas);
    assert!(is_png_signature_correct(&png));
    let idat = PngRawChunkIter::new(&png).find(|c| c.type_() == PngChunkType::IDAT).unwrap();
    assert_eq!(zlib_stored_unframe(idat.data()).unwrap(), png_filtered_scanlines(&canvas));
    assert_eq!(png_try_canvas(&png).unwrap().get_planes(), canvas.get_planes());
  }
}

#[test]
fn test_real_inflater_accepts_idat() {
  // big enough for several stored blocks
  let mut canvas = Canvas::new(300, 120).unwrap();
  canvas.spray_bytes(&super::rand_bytes(3 * 300 * 120));
  let scanlines = png_filtered_scanlines(&canvas);
  assert!(scanlines.len() > 3 * DEFLATE_WINDOW_SIZE);
  let png = png_encode_canvas(&canvas);
  let idat = PngRawChunkIter::new(&png).nth(1).unwrap();
  let inflated = miniz_oxide::inflate::decompress_to_vec_zlib(idat.data()).unwrap();
  assert_eq!(inflated, scanlines);
}

#[test]
fn test_real_inflater_accepts_edge_sizes() {
  for len in [0, 1, DEFLATE_WINDOW_SIZE, 2 * DEFLATE_WINDOW_SIZE, 2 * DEFLATE_WINDOW_SIZE + 7] {
    let data = super::rand_bytes(len);
    let z = zlib_stored_frame(&data);
    assert_eq!(miniz_oxide::inflate::decompress_to_vec_zlib(&z).unwrap(), data);
  }
}
