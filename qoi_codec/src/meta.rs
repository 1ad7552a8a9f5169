use crate::error::Error;

pub const QOI_END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
pub const QOI_MAGIC: &[u8; 4] = b"qoif";
pub const QOI_MAX_RUN: u8 = 62;
pub const QOI_HEADER_LEN: usize = 14;

/// Largest pixel count accepted by default, matching the guard used by the
/// reference QOI implementation.
pub const QOI_PIXELS_MAX: u64 = 400_000_000;

pub const CHANNELS_RGB: u8 = 3;
pub const CHANNELS_RGBA: u8 = 4;
pub const COLORSPACE_SRGB_WITH_LINEAR_ALPHA: u8 = 0;
pub const COLORSPACE_ALL_LINEAR: u8 = 1;

/// Metadata describing an image, as carried by the 14 byte QOI header.
///
/// The `channels` and `colorspace` fields hold the raw header bytes so that
/// unknown values can be passed through when decoding leniently. Use
/// [`ImageMeta::channels`] and [`ImageMeta::colorspace`] for the typed
/// views.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageMeta {
  /// The number of color channels the image's pixels contain. RGBA pixels
  /// have four channels, and RGB have three. Color channels are assumed to
  /// not be pre-multiplied with the alpha channel ("un-premultiplied alpha").
  pub channels: u8,
  /// The image's colorspace byte, see [Colorspace]. Informative only, it
  /// does not change how pixels are encoded.
  pub colorspace: u8,
  /// The image's height.
  pub height: u32,
  /// The image's width.
  pub width: u32,
}

impl ImageMeta {
  pub fn new(width: u32, height: u32, channels: Channels, colorspace: Colorspace) -> Self {
    Self {
      channels: channels as u8,
      colorspace: colorspace as u8,
      height,
      width,
    }
  }

  /// Returns the total number of pixels that make up the image.
  pub fn num_pixels(&self) -> u64 {
    u64::from(self.width) * u64::from(self.height)
  }

  /// Returns the length in bytes of the image's raw pixel data, or
  /// `Error::InvalidDimensions` if it cannot be addressed on this platform.
  pub fn pixel_bytes_len(&self) -> Result<usize, Error> {
    self
      .num_pixels()
      .checked_mul(u64::from(self.channels))
      .and_then(|len| usize::try_from(len).ok())
      .ok_or(Error::InvalidDimensions { width: self.width, height: self.height })
  }

  pub fn channels(&self) -> Result<Channels, Error> {
    Channels::try_from(self.channels)
  }

  pub fn colorspace(&self) -> Result<Colorspace, Error> {
    Colorspace::try_from(self.colorspace)
  }
}

/// The pixel layouts QOI can carry: 8 bits per channel RGB or RGBA.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Channels {
  Rgb = 3,
  Rgba = 4,
}

impl Channels {
  /// Number of bytes a single pixel occupies in a raw buffer.
  pub fn bytes_per_pixel(self) -> usize {
    self as usize
  }
}

impl TryFrom<u8> for Channels {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      CHANNELS_RGB => Ok(Channels::Rgb),
      CHANNELS_RGBA => Ok(Channels::Rgba),
      _ => Err(Error::UnsupportedChannelCount(byte)),
    }
  }
}

/// How an image's color channels should be interpreted. `Srgb` means sRGB
/// color channels with a linear alpha channel, `Linear` means every channel
/// is linear.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Colorspace {
  Srgb = 0,
  Linear = 1,
}

/// `0` maps to `Colorspace::Srgb`, and `1` maps to `Colorspace::Linear`. All
/// other `u8` values are invalid.
impl TryFrom<u8> for Colorspace {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      COLORSPACE_SRGB_WITH_LINEAR_ALPHA => Ok(Colorspace::Srgb),
      COLORSPACE_ALL_LINEAR => Ok(Colorspace::Linear),
      _ => Err(Error::UnsupportedColorspace(byte)),
    }
  }
}
