use std::io;

use thiserror::Error;

/// An enumeration of all error values this crate may produce.
#[derive(Debug, Error)]
pub enum Error {
  /// The first four bytes of an encoded image are not `qoif`.
  #[error("invalid QOI magic bytes {0:?}, expected \"qoif\"")]
  InvalidMagic([u8; 4]),

  /// Fewer than 14 bytes were available to decode the image header.
  #[error("truncated QOI header, got {0} of 14 bytes")]
  TruncatedHeader(usize),

  /// The encoded image ran out of chunk data before every pixel was decoded,
  /// or is too short to hold the end marker.
  #[error("unexpectedly reached end of the chunk stream before decoding was completed")]
  TruncatedStream,

  /// A decoded run would produce more pixels than the header declares.
  #[error("run of {run} pixels overflows the {remaining} pixels left in the image")]
  PixelOverflow { run: u8, remaining: u64 },

  /// The raw pixel data's length does not match `width * height * channels`.
  #[error("pixel data is {actual} bytes, expected {expected}")]
  PixelCountMismatch { expected: usize, actual: usize },

  #[error("unsupported channel count {0}, expected 3 for RGB or 4 for RGBA")]
  UnsupportedChannelCount(u8),

  #[error("unsupported colorspace {0}, expected 0 for sRGB or 1 for linear")]
  UnsupportedColorspace(u8),

  /// The image's dimensions are zero (strict mode), or its pixel data would
  /// not fit in memory on this platform.
  #[error("invalid image dimensions {width}x{height}")]
  InvalidDimensions { width: u32, height: u32 },

  #[error("image has {pixels} pixels, more than the limit of {max}")]
  TooManyPixels { pixels: u64, max: u64 },

  /// The bytes following the chunk stream are not the QOI end marker. Only
  /// reported when decoding in strict mode.
  #[error("invalid QOI end marker {0:?}")]
  InvalidEndMarker([u8; 8]),

  /// Any `std::io::Error` raised while reading an image source or writing to
  /// an image destination.
  #[error("i/o error: {0}")]
  Io(#[from] io::Error),
}

#[cfg(test)]
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Error::InvalidMagic(a), Error::InvalidMagic(b)) => a == b,
      (Error::TruncatedHeader(a), Error::TruncatedHeader(b)) => a == b,
      (Error::TruncatedStream, Error::TruncatedStream) => true,
      (
        Error::PixelOverflow { run: a, remaining: b },
        Error::PixelOverflow { run: c, remaining: d },
      ) => a == c && b == d,
      (
        Error::PixelCountMismatch { expected: a, actual: b },
        Error::PixelCountMismatch { expected: c, actual: d },
      ) => a == c && b == d,
      (Error::UnsupportedChannelCount(a), Error::UnsupportedChannelCount(b)) => a == b,
      (Error::UnsupportedColorspace(a), Error::UnsupportedColorspace(b)) => a == b,
      (
        Error::InvalidDimensions { width: a, height: b },
        Error::InvalidDimensions { width: c, height: d },
      ) => a == c && b == d,
      (
        Error::TooManyPixels { pixels: a, max: b },
        Error::TooManyPixels { pixels: c, max: d },
      ) => a == c && b == d,
      (Error::InvalidEndMarker(a), Error::InvalidEndMarker(b)) => a == b,
      (Error::Io(..), Error::Io(..)) => true,
      _ => false,
    }
  }
}
