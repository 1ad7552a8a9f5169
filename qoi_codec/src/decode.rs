use std::io;

use log::{debug, warn};

use crate::error::Error;
use crate::header::decode_header;
use crate::meta::{ImageMeta, QOI_END_MARKER};
use crate::op::Op;
use crate::options::{validate_meta, DecodeOptions, RunOverflow};
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Decodes a QOI image using the default [`DecodeOptions`], returning its raw
/// pixel data with the channel count declared in the image's header.
pub fn qoi_decode(data: &[u8]) -> Result<Vec<u8>, Error> {
  decode_to_vec(data, &DecodeOptions::default()).map(|(_, pixels)| pixels)
}

/// Decodes a QOI image into a new buffer, returning the metadata read from
/// its header alongside the raw pixel data.
///
/// The pixel data has `options.channels` channels when set, and the header's
/// channel count otherwise. On failure nothing is returned, there is no
/// partially decoded output.
pub fn decode_to_vec(data: &[u8], options: &DecodeOptions) -> Result<(ImageMeta, Vec<u8>), Error> {
  let (meta, header_len) = decode_header(data)?;
  let header_channels = validate_meta(&meta, options.strict, options.max_pixels)?;
  let channels = options.channels.unwrap_or(header_channels);

  // The chunk stream sits between the header and the end marker.
  let chunks_end = data
    .len()
    .checked_sub(QOI_END_MARKER.len())
    .filter(|&end| end >= header_len)
    .ok_or(Error::TruncatedStream)?;
  let chunks = &data[header_len..chunks_end];

  let out_meta = ImageMeta { channels: channels as u8, ..meta };
  let bytes_per_pixel = channels.bytes_per_pixel();

  debug!(
    "decoding {}x{} image, {} channels, colorspace {}, into {} channels",
    meta.width, meta.height, meta.channels, meta.colorspace, out_meta.channels
  );

  // Reserve no more than the chunk stream can expand to.
  let max_len = chunks.len().saturating_mul(62 * bytes_per_pixel);
  let mut pixels = Vec::with_capacity(out_meta.pixel_bytes_len()?.min(max_len));

  let mut state = State::new();
  let mut bytes = chunks.iter().copied();
  let num_pixels = meta.num_pixels();
  let mut produced = 0;

  while produced < num_pixels {
    match Op::try_from_bytes(&mut bytes)? {
      Op::Run(run) => {
        let remaining = num_pixels - produced;
        let mut count = u64::from(run);

        if count > remaining {
          match options.run_overflow {
            RunOverflow::Fail => {
              return Err(Error::PixelOverflow { run, remaining });
            }
            RunOverflow::Truncate => {
              warn!("run of {} pixels truncated to the {} pixels left in the image", run, remaining);
              count = remaining;
            }
          }
        }

        for _ in 0..count {
          state.prev_pixel.write_raw(bytes_per_pixel, &mut pixels);
        }

        produced += count;
      }
      op => {
        let pixel = decode_pixel(&state, op);

        state.update(pixel);
        state.prev_pixel = pixel;
        pixel.write_raw(bytes_per_pixel, &mut pixels);
        produced += 1;
      }
    }
  }

  let tail = &data[chunks_end - bytes.len()..];

  if tail != QOI_END_MARKER {
    let mut found = [0; 8];
    found.copy_from_slice(&tail[..QOI_END_MARKER.len()]);

    if options.strict {
      return Err(Error::InvalidEndMarker(found));
    }

    warn!(
      "image does not end with the QOI end marker, {} bytes follow the last chunk",
      tail.len()
    );
  }

  debug!("decoded {} bytes into {} bytes of pixel data", data.len(), pixels.len());

  Ok((meta, pixels))
}

/// Decodes a QOI encoded image. The decoded pixel data is written to the
/// provided `writer`, and upon success, the image's `ImageMeta` data is
/// returned.
///
/// The whole of `reader` is consumed before decoding starts, and the pixel
/// data is written in one piece once decoding has succeeded, so a failed
/// decode leaves the destination untouched.
pub fn decode_image<R: io::Read, W: io::Write>(
  mut reader: R,
  mut writer: W,
) -> Result<ImageMeta, Error> {
  let mut data = Vec::new();
  reader.read_to_end(&mut data)?;

  let (meta, pixels) = decode_to_vec(&data, &DecodeOptions::default())?;

  writer.write_all(&pixels)?;
  writer.flush()?;

  Ok(meta)
}

// Reconstructs the pixel a single pixel `op` describes. Runs repeat the
// previous pixel and are expanded by the caller.
fn decode_pixel(state: &State, op: Op) -> Pixel {
  match op {
    Op::Diff(diff_r, diff_g, diff_b) => {
      Pixel::from_diff(PixelDiff::Small(diff_r, diff_g, diff_b), &state.prev_pixel)
    }
    Op::Index(index) => {
      state.cache[index as usize]
    }
    Op::Luma(luma_g, luma_rg, luma_bg) => {
      Pixel::from_diff(PixelDiff::Luma(luma_g, luma_rg, luma_bg), &state.prev_pixel)
    }
    Op::Rgb(r, g, b) => {
      Pixel { r, g, b, a: state.prev_pixel.a }
    }
    Op::Rgba(r, g, b, a) => {
      Pixel { r, g, b, a }
    }
    Op::Run(_) => {
      state.prev_pixel
    }
  }
}
