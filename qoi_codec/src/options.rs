//! Configuration for encode and decode operations.
//!
//! Both option structs are plain `Copy` values built with `with_*` setters:
//!
//! ```
//! use qoi_codec::{Channels, DecodeOptions, RunOverflow};
//!
//! let options = DecodeOptions::default()
//!   .with_strict(true)
//!   .with_channels(Channels::Rgba)
//!   .with_run_overflow(RunOverflow::Truncate);
//! ```

use crate::error::Error;
use crate::meta::{Channels, ImageMeta, QOI_PIXELS_MAX};

/// What the decoder does when a run chunk claims more pixels than the image
/// has left.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RunOverflow {
  /// Fail with `Error::PixelOverflow`.
  #[default]
  Fail,
  /// Emit only the pixels the image still needs and finish decoding.
  Truncate,
}

/// Options controlling [`encode_to_vec`](crate::encode_to_vec).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncodeOptions {
  /// Reject a colorspace other than 0 or 1 and zero width or height.
  pub strict: bool,
  /// Maximum `width * height` accepted, `None` for no limit.
  pub max_pixels: Option<u64>,
}

impl Default for EncodeOptions {
  fn default() -> Self {
    Self { strict: false, max_pixels: Some(QOI_PIXELS_MAX) }
  }
}

impl EncodeOptions {
  pub fn with_strict(mut self, strict: bool) -> Self {
    self.strict = strict;
    self
  }

  pub fn with_max_pixels(mut self, max_pixels: Option<u64>) -> Self {
    self.max_pixels = max_pixels;
    self
  }
}

/// Options controlling [`decode_to_vec`](crate::decode_to_vec).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
  /// Reject a colorspace other than 0 or 1, zero width or height, and a
  /// missing or malformed end marker.
  pub strict: bool,
  /// Channel layout of the decoded pixel data. `None` uses the header's.
  pub channels: Option<Channels>,
  /// Handling of runs that overshoot the image's pixel count.
  pub run_overflow: RunOverflow,
  /// Maximum `width * height` accepted, `None` for no limit.
  pub max_pixels: Option<u64>,
}

impl Default for DecodeOptions {
  fn default() -> Self {
    Self {
      strict: false,
      channels: None,
      run_overflow: RunOverflow::default(),
      max_pixels: Some(QOI_PIXELS_MAX),
    }
  }
}

impl DecodeOptions {
  pub fn with_strict(mut self, strict: bool) -> Self {
    self.strict = strict;
    self
  }

  pub fn with_channels(mut self, channels: Channels) -> Self {
    self.channels = Some(channels);
    self
  }

  pub fn with_run_overflow(mut self, run_overflow: RunOverflow) -> Self {
    self.run_overflow = run_overflow;
    self
  }

  pub fn with_max_pixels(mut self, max_pixels: Option<u64>) -> Self {
    self.max_pixels = max_pixels;
    self
  }
}

// Checks shared by the encoder and decoder. The channel count is always
// checked, every other header field only in strict mode.
pub(crate) fn validate_meta(
  meta: &ImageMeta,
  strict: bool,
  max_pixels: Option<u64>,
) -> Result<Channels, Error> {
  let channels = meta.channels()?;

  if strict {
    meta.colorspace()?;

    if meta.width == 0 || meta.height == 0 {
      return Err(Error::InvalidDimensions { width: meta.width, height: meta.height });
    }
  }

  if let Some(max) = max_pixels {
    let pixels = meta.num_pixels();

    if pixels > max {
      return Err(Error::TooManyPixels { pixels, max });
    }
  }

  Ok(channels)
}
