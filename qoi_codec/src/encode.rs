use std::io;

use log::debug;

use crate::error::Error;
use crate::header::encode_header;
use crate::meta::{ImageMeta, QOI_END_MARKER, QOI_HEADER_LEN};
use crate::op::Op;
use crate::options::{validate_meta, EncodeOptions};
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Encodes raw RGB or RGBA pixel data into a QOI image using the default
/// [`EncodeOptions`].
///
/// `data` must hold exactly `width * height * channels` bytes in row-major
/// order. `channels` must be 3 or 4. `colorspace` is written to the header
/// as given.
pub fn qoi_encode(
  width: u32,
  height: u32,
  data: &[u8],
  channels: u8,
  colorspace: u8,
) -> Result<Vec<u8>, Error> {
  let meta = ImageMeta { channels, colorspace, height, width };
  encode_to_vec(data, &meta, &EncodeOptions::default())
}

/// Returns the largest number of bytes an image described by `meta` can
/// encode to: every pixel stored as a full RGB or RGBA chunk, plus the
/// header and end marker.
pub fn encoded_size_limit(meta: &ImageMeta) -> usize {
  let chunk_len = u64::from(meta.channels) + 1;
  let chunks_len = meta.num_pixels().saturating_mul(chunk_len);

  usize::try_from(chunks_len)
    .unwrap_or(usize::MAX)
    .saturating_add(QOI_HEADER_LEN + QOI_END_MARKER.len())
}

/// Encodes an image's raw pixel data described by `meta` into a new buffer.
///
/// On failure nothing is returned, there is no partially encoded output.
pub fn encode_to_vec(
  data: &[u8],
  meta: &ImageMeta,
  options: &EncodeOptions,
) -> Result<Vec<u8>, Error> {
  let channels = validate_meta(meta, options.strict, options.max_pixels)?;
  let expected = meta.pixel_bytes_len()?;

  if data.len() != expected {
    return Err(Error::PixelCountMismatch { expected, actual: data.len() });
  }

  debug!(
    "encoding {}x{} image, {} channels, colorspace {}",
    meta.width, meta.height, meta.channels, meta.colorspace
  );

  let mut out = Vec::with_capacity(encoded_size_limit(meta));
  out.extend_from_slice(&encode_header(meta.width, meta.height, meta.channels, meta.colorspace));

  let mut state = State::new();

  for chunk in data.chunks_exact(channels.bytes_per_pixel()) {
    encode_pixel(&mut state, Pixel::from_raw(chunk), &mut out);
  }

  if let Some(run) = state.flush_run() {
    run.write_to(&mut out);
  }

  out.extend_from_slice(&QOI_END_MARKER);

  debug!("encoded {} bytes of pixel data into {} bytes", data.len(), out.len());

  Ok(out)
}

/// Encodes an image's raw pixel data and `ImageMeta` data into a QOI encoded
/// image.
///
/// Exactly `width * height * channels` bytes are read from `reader`. The
/// encoded image is written to `writer` in one piece once encoding has
/// succeeded, so a failed encode leaves the destination untouched.
pub fn encode_image<R: io::Read, W: io::Write>(
  mut reader: R,
  mut writer: W,
  meta: &ImageMeta,
) -> Result<(), Error> {
  let options = EncodeOptions::default();
  validate_meta(meta, options.strict, options.max_pixels)?;

  let mut pixels = vec![0; meta.pixel_bytes_len()?];
  reader.read_exact(&mut pixels)?;

  let encoded = encode_to_vec(&pixels, meta, &options)?;

  writer.write_all(&encoded)?;
  writer.flush()?;

  Ok(())
}

// Encodes a single pixel against the provided `state`, appending any chunk
// it completes to `out`.
fn encode_pixel(state: &mut State, pixel: Pixel, out: &mut Vec<u8>) {
  if pixel == state.prev_pixel {
    if let Some(run) = state.advance_run() {
      run.write_to(out);
    }

    return;
  }

  if let Some(run) = state.flush_run() {
    run.write_to(out);
  }

  select_op(state, pixel).write_to(out);
  state.update(pixel);
  state.prev_pixel = pixel;
}

// Picks the chunk for a pixel that differs from the previous one. Candidates
// are tried in the fixed order index, diff, luma, rgb, rgba and the first
// that can represent the pixel wins.
fn select_op(state: &State, pixel: Pixel) -> Op {
  if state.lookup(pixel) {
    return Op::Index(pixel.qoi_hash());
  }

  match pixel.diff(&state.prev_pixel) {
    Some(PixelDiff::Small(diff_r, diff_g, diff_b)) => Op::Diff(diff_r, diff_g, diff_b),
    Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg)) => Op::Luma(luma_g, luma_rg, luma_bg),
    None if pixel.a == state.prev_pixel.a => Op::Rgb(pixel.r, pixel.g, pixel.b),
    None => Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn encode(state: &mut State, pixel: Pixel) -> Vec<u8> {
    let mut dest = Vec::new();
    encode_pixel(state, pixel, &mut dest);
    dest
  }

  #[test]
  fn test_encoding_rgb_op() {
    let mut state = State::new();
    let pixel = Pixel { r: 101, g: 102, b: 103, a: 255 };

    assert_eq!(
      encode(&mut state, pixel),
      vec![
        // Op::Rgb(101, 102, 103)
        0xfe, 101, 102, 103,
      ]
    );
    assert_eq!(state.prev_pixel, pixel);
    assert!(state.lookup(pixel));
  }

  #[test]
  fn test_encoding_rgba_op() {
    let mut state = State::new();
    let pixel = Pixel { r: 101, g: 102, b: 103, a: 104 };

    assert_eq!(
      encode(&mut state, pixel),
      vec![
        // Op::Rgba(101, 102, 103, 104)
        0xff, 101, 102, 103, 104,
      ]
    );
  }

  #[test]
  fn test_encoding_run_op() {
    let mut dest = Vec::new();
    let mut state = State::new();
    let mut pixel = Pixel { r: 101, g: 102, b: 103, a: 104 };

    state.prev_pixel = pixel;
    encode_pixel(&mut state, pixel, &mut dest);
    assert_eq!(dest.len(), 0);

    pixel.a = 0;
    encode_pixel(&mut state, pixel, &mut dest);
    assert_eq!(dest[0], 0xc0);
    assert_eq!(dest[1], 0xff);
  }

  #[test]
  fn test_encoding_max_run_ops() {
    let mut dest = Vec::new();
    let mut state = State::new();
    let pixel = Pixel { r: 101, g: 102, b: 103, a: 104 };

    state.prev_pixel = pixel;
    state.run_count = 61;
    encode_pixel(&mut state, pixel, &mut dest);
    assert_eq!(dest, vec![0xc0 | 61]); // Op::Run(62)

    encode_pixel(&mut state, pixel, &mut dest);
    assert_eq!(dest.len(), 1);
    assert_eq!(state.run_count, 1);
  }

  #[test]
  fn test_encoding_index_op() {
    let mut state = State::new();
    let pixel = Pixel { r: 101, g: 102, b: 103, a: 104 };

    state.update(pixel);
    assert_eq!(encode(&mut state, pixel), vec![54]); // Op::Index(pixel.qoi_hash() = 54)
  }

  #[test]
  fn test_index_takes_priority_over_diff() {
    let mut state = State::new();
    let pixel = Pixel { r: 1, g: 1, b: 1, a: 255 };

    // Representable as a diff from the initial previous pixel, but cached.
    state.update(pixel);
    assert_eq!(select_op(&state, pixel), Op::Index(pixel.qoi_hash()));
  }

  #[test]
  fn test_encoding_diff_op() {
    let mut dest = Vec::new();
    let mut state = State::new();
    let pixel_a = Pixel { r: 100, g: 100, b: 100, a: 255 };
    let pixel_b = Pixel { r: 101, g: 101, b: 101, a: 255 };
    let pixel_c = Pixel { r: 99, g: 99, b: 99, a: 255 };

    state.prev_pixel = pixel_a;
    encode_pixel(&mut state, pixel_b, &mut dest);
    assert_eq!(dest, vec![0x40 | 3 << 4 | 3 << 2 | 3]); // (101 - 100) + 2 = 3 = Op::Diff(3, 3, 3)

    encode_pixel(&mut state, pixel_c, &mut dest);
    assert_eq!(dest[1], 0x40); // (99 - 101) + 2 = 0 = Op::Diff(0, 0, 0)
  }

  #[test]
  fn test_encoding_luma_op() {
    let mut dest = Vec::new();
    let mut state = State::new();
    let pixel_a = Pixel { r: 100, g: 100, b: 100, a: 255 };
    let pixel_b = Pixel { r: 100, g: 108, b: 100, a: 255 };
    let pixel_c = Pixel { r: 99, g: 100, b: 99, a: 255 };

    state.prev_pixel = pixel_a;
    encode_pixel(&mut state, pixel_b, &mut dest);
    assert_eq!(dest, vec![0x80 | 40, 0]); // Op::Luma(40, 0, 0)

    encode_pixel(&mut state, pixel_c, &mut dest);
    assert_eq!(dest[2..], [0x80 | 24, 15 << 4 | 15]); // Op::Luma(24, 15, 15)
  }

  #[test]
  fn test_alpha_change_forces_rgba() {
    let mut state = State::new();
    state.prev_pixel = Pixel { r: 10, g: 10, b: 10, a: 255 };

    // Within diff range on every color channel, but the alpha differs.
    let pixel = Pixel { r: 11, g: 10, b: 10, a: 128 };
    assert_eq!(select_op(&state, pixel), Op::Rgba(11, 10, 10, 128));
  }

  #[test]
  fn test_run_leaves_cache_untouched() {
    let mut state = State::new();
    let pixel = Pixel { r: 20, g: 40, b: 60, a: 255 };

    encode(&mut state, pixel);
    let cache = state.cache;

    for _ in 0..10 {
      assert!(encode(&mut state, pixel).is_empty());
    }

    assert_eq!(state.cache, cache);
    assert_eq!(state.run_count, 10);
  }

  #[test]
  fn test_encoding_trailing_run_op() {
    let source = [101, 102, 103, 101, 102, 103];
    let dest = encode_to_vec(
      &source,
      &ImageMeta { width: 2, height: 1, channels: 3, colorspace: 0 },
      &EncodeOptions::default(),
    )
    .expect("Failed to encode image");

    let range_start = QOI_HEADER_LEN + 4; // Header length + Op::Rgb(101, 102, 103)
    let range_end = range_start + 1; // Op::Run(1)
    assert_eq!(&dest[range_start..range_end], &[0xc0]); // Op::Run(1)
    assert_eq!(&dest[range_end..], &QOI_END_MARKER);
  }

  #[test]
  fn test_encoding_rejects_bad_pixel_count() {
    let meta = ImageMeta { width: 2, height: 2, channels: 4, colorspace: 0 };

    assert_eq!(
      encode_to_vec(&[0; 15], &meta, &EncodeOptions::default()),
      Err(Error::PixelCountMismatch { expected: 16, actual: 15 })
    );
    assert_eq!(
      encode_to_vec(&[0; 17], &meta, &EncodeOptions::default()),
      Err(Error::PixelCountMismatch { expected: 16, actual: 17 })
    );
  }

  #[test]
  fn test_encoding_validates_header_fields() {
    let meta = ImageMeta { width: 1, height: 1, channels: 2, colorspace: 0 };
    assert_eq!(
      encode_to_vec(&[0; 2], &meta, &EncodeOptions::default()),
      Err(Error::UnsupportedChannelCount(2))
    );

    let meta = ImageMeta { width: 1, height: 1, channels: 3, colorspace: 9 };
    assert!(encode_to_vec(&[0; 3], &meta, &EncodeOptions::default()).is_ok());
    assert_eq!(
      encode_to_vec(&[0; 3], &meta, &EncodeOptions::default().with_strict(true)),
      Err(Error::UnsupportedColorspace(9))
    );
  }

  #[test]
  fn test_encoded_size_limit() {
    let meta = ImageMeta { width: 3, height: 2, channels: 4, colorspace: 0 };
    assert_eq!(encoded_size_limit(&meta), 14 + 6 * 5 + 8);

    let meta = ImageMeta { width: u32::MAX, height: u32::MAX, channels: 4, colorspace: 0 };
    assert_eq!(encoded_size_limit(&meta), usize::MAX);
  }
}
