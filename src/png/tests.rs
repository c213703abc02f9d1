use super::*;
use crate::MAX_DIMENSION;
use alloc::vec;

fn two_by_two() -> Canvas {
  let mut c = Canvas::new(2, 2).unwrap();
  c.set_pixel(0, 0, 255, 0, 0).unwrap();
  c.set_pixel(1, 0, 0, 255, 0).unwrap();
  c.set_pixel(0, 1, 0, 0, 255).unwrap();
  c.set_pixel(1, 1, 10, 20, 30).unwrap();
  c
}

#[test]
fn test_two_by_two_chunks() {
  let png = png_encode_canvas(&two_by_two());
  assert!(is_png_signature_correct(&png));
  assert_eq!(png.len(), png_encoded_len(2, 2));

  let chunks: Vec<PngRawChunk<'_>> = PngRawChunkIter::new(&png).collect();
  let types: Vec<PngChunkType> = chunks.iter().map(|c| c.type_()).collect();
  assert_eq!(types, [PngChunkType::IHDR, PngChunkType::IDAT, PngChunkType::IEND]);
  for chunk in chunks.iter() {
    assert_eq!(chunk.declared_crc(), chunk.compute_actual_crc());
  }

  assert_eq!(chunks[0].data(), &[0, 0, 0, 2, 0, 0, 0, 2, 8, 2, 0, 0, 0]);
  assert!(chunks[2].data().is_empty());
  // the well known IEND chunk, byte for byte
  assert_eq!(&png[png.len() - 12..], &[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);

  let scanlines = zlib_stored_unframe(chunks[1].data()).unwrap();
  assert_eq!(
    scanlines,
    [0, 255, 0, 0, 0, 255, 0, 0, 0, 0, 255, 10, 20, 30]
  );
}

#[test]
fn test_idat_is_one_stored_block() {
  let png = png_encode_canvas(&two_by_two());
  let idat = PngRawChunkIter::new(&png).nth(1).unwrap();
  let data = idat.data();
  assert_eq!(&data[..7], &[0x78, 0x01, 1, 14, 0, !14_u8, 0xFF]);
  assert_eq!(data.len(), 2 + 5 + 14 + 4);
}

#[test]
fn test_scanlines_match_unframed_idat() {
  let mut c = Canvas::new(7, 5).unwrap();
  for i in 0..35 {
    c.spray(i * 3, i * 5, i * 7);
  }
  let expected = png_filtered_scanlines(&c);
  assert_eq!(expected.len(), (1 + 7 * 3) * 5);
  assert!(expected.chunks(22).all(|line| line[0] == FILTER_NONE));
  let png = png_encode_canvas(&c);
  let idat = PngRawChunkIter::new(&png).find(|c| c.type_() == PngChunkType::IDAT).unwrap();
  assert_eq!(zlib_stored_unframe(idat.data()).unwrap(), expected);
}

#[test]
fn test_every_small_size_starts_with_signature() {
  for w in 1..6 {
    for h in 1..6 {
      let png = png_encode_canvas(&Canvas::new(w, h).unwrap());
      assert_eq!(&png[..8], &PNG_SIGNATURE);
      assert_eq!(png.len(), png_encoded_len(w, h));
    }
  }
}

#[test]
fn test_read_back() {
  let c = two_by_two();
  assert_eq!(png_try_canvas(&png_encode_canvas(&c)), Ok(c));
}

#[test]
fn test_read_rejects_damage() {
  let png = png_encode_canvas(&two_by_two());

  let mut bad_sig = png.clone();
  bad_sig[0] = 0;
  assert_eq!(png_try_canvas(&bad_sig), Err(PngError::BadSignature));

  // flip a pixel byte inside IDAT: the chunk CRC catches it first
  let mut bad_pixel = png.clone();
  let idat_data_start = 8 + 25 + 8;
  bad_pixel[idat_data_start + 8] ^= 0xFF;
  assert!(matches!(png_try_canvas(&bad_pixel), Err(PngError::CrcMismatch { .. })));

  assert_eq!(png_try_canvas(&png[..8]), Err(PngError::NoChunksPresent));
}

#[test]
fn test_read_rejects_other_filters_and_formats() {
  let mut scanlines = png_filtered_scanlines(&two_by_two());
  scanlines[7] = 1;
  let mut png = vec![];
  png.extend_from_slice(&PNG_SIGNATURE);
  png_push_chunk(&mut png, PngChunkType::IHDR, &IHDR::rgb8(2, 2).to_bytes());
  png_push_chunk(&mut png, PngChunkType::IDAT, &zlib_stored_frame(&scanlines));
  png_push_chunk(&mut png, PngChunkType::IEND, &[]);
  assert_eq!(png_try_canvas(&png), Err(PngError::IllegalFilterType(1)));

  let mut png = vec![];
  png.extend_from_slice(&PNG_SIGNATURE);
  let rgba = IHDR { color_type: 6, ..IHDR::rgb8(2, 2) };
  png_push_chunk(&mut png, PngChunkType::IHDR, &rgba.to_bytes());
  assert_eq!(png_try_canvas(&png), Err(PngError::UnsupportedPixelFormat));

  let mut png = vec![];
  png.extend_from_slice(&PNG_SIGNATURE);
  png_push_chunk(&mut png, PngChunkType::IHDR, &IHDR::rgb8(2, 2).to_bytes());
  png_push_chunk(&mut png, PngChunkType::IEND, &[]);
  assert_eq!(png_try_canvas(&png), Err(PngError::NoIDAT));
}

#[test]
fn test_read_checks_data_before_allocating() {
  // a tiny file that claims the largest canvas there is
  let mut png = vec![];
  png.extend_from_slice(&PNG_SIGNATURE);
  png_push_chunk(&mut png, PngChunkType::IHDR, &IHDR::rgb8(MAX_DIMENSION, MAX_DIMENSION).to_bytes());
  png_push_chunk(&mut png, PngChunkType::IEND, &[]);
  assert_eq!(png.len(), 8 + 25 + 12);
  assert_eq!(png_try_canvas(&png), Err(PngError::NoIDAT));

  let mut png = vec![];
  png.extend_from_slice(&PNG_SIGNATURE);
  png_push_chunk(&mut png, PngChunkType::IHDR, &IHDR::rgb8(MAX_DIMENSION, MAX_DIMENSION).to_bytes());
  png_push_chunk(&mut png, PngChunkType::IDAT, &zlib_stored_frame(&[0, 1, 2, 3]));
  png_push_chunk(&mut png, PngChunkType::IEND, &[]);
  assert!(matches!(png_try_canvas(&png), Err(PngError::Canvas(CanvasError::SizeMismatch { .. }))));

  let mut png = vec![];
  png.extend_from_slice(&PNG_SIGNATURE);
  png_push_chunk(&mut png, PngChunkType::IHDR, &IHDR::rgb8(MAX_DIMENSION + 1, 1).to_bytes());
  assert_eq!(png_try_canvas(&png), Err(PngError::Canvas(CanvasError::DimensionsTooLarge)));
}

#[test]
fn test_ihdr_round_trip() {
  let ihdr = IHDR::rgb8(1024, 768);
  assert_eq!(IHDR::try_from(&ihdr.to_bytes()[..]), Ok(ihdr));
  assert_eq!(IHDR::try_from(&[0_u8; 12][..]), Err(PngError::IllegalIHDR));
  assert!(PngChunkType::IHDR.is_critical());
  assert!(!PngChunkType(*b"tEXt").is_critical());
}
