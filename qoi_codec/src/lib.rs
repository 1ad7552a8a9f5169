//! This crate implements a lossless encoder and decoder for the
//! [QOI image format](https://qoiformat.org).
//!
//! The two primary exports are the `qoi_encode` and `qoi_decode` functions,
//! which convert between raw, row-major RGB or RGBA pixel data and QOI
//! encoded bytes entirely in memory. `encode_to_vec` and `decode_to_vec`
//! accept [`EncodeOptions`] and [`DecodeOptions`] for stricter validation,
//! pixel limits, and choosing the decoded channel layout.
//!
//! `encode_image` and `decode_image` adapt the codec to `std::io::Read` and
//! `std::io::Write` sources and destinations.
//!
//! To keep this crate simple, it does not support decoding other image
//! formats. To encode an image, it will first need to be decoded using another
//! method. From there, the decoded pixel data can then be encoded.
//!
//! The crate logs through the `log` facade and never installs a logger.
//!
//! # In-memory encode example
//!
//! ```rust
//! use qoi_codec::{qoi_encode, CHANNELS_RGBA, COLORSPACE_SRGB_WITH_LINEAR_ALPHA};
//!
//! // A 1x1 representation of an image's pixel data made up of an opaque black pixel.
//! let pixels = vec![0, 0, 0, 255];
//!
//! let encoded = qoi_encode(1, 1, &pixels, CHANNELS_RGBA, COLORSPACE_SRGB_WITH_LINEAR_ALPHA)
//!   .expect("Failed to encode image");
//!
//! // Header, a single run chunk, and the end marker.
//! assert_eq!(encoded.len(), 14 + 1 + 8);
//! ```
//!
//! # Decode with options example
//!
//! ```rust
//! use qoi_codec::{decode_to_vec, qoi_encode, Channels, DecodeOptions};
//!
//! let encoded = qoi_encode(2, 1, &[10, 20, 30, 40, 50, 60], 3, 0)
//!   .expect("Failed to encode image");
//!
//! let options = DecodeOptions::default().with_channels(Channels::Rgba);
//!
//! match decode_to_vec(&encoded, &options) {
//!   Ok((meta, pixels)) => {
//!     assert_eq!((meta.width, meta.height, meta.channels), (2, 1, 3));
//!     assert_eq!(pixels, vec![10, 20, 30, 255, 40, 50, 60, 255]);
//!   }
//!   Err(e) => {
//!     // See `error.rs` for all possible errors.
//!     panic!("{}", e);
//!   }
//! }
//! ```
//!

pub use crate::decode::{decode_image, decode_to_vec, qoi_decode};
pub use crate::encode::{encode_image, encode_to_vec, encoded_size_limit, qoi_encode};
pub use crate::error::Error;
pub use crate::header::{decode_header, encode_header};
pub use crate::meta::{
  Channels, Colorspace, ImageMeta, CHANNELS_RGB, CHANNELS_RGBA, COLORSPACE_ALL_LINEAR,
  COLORSPACE_SRGB_WITH_LINEAR_ALPHA, QOI_END_MARKER, QOI_HEADER_LEN, QOI_MAGIC, QOI_MAX_RUN,
  QOI_PIXELS_MAX,
};
pub use crate::options::{DecodeOptions, EncodeOptions, RunOverflow};

mod decode;
mod encode;
mod error;
mod header;
mod meta;
mod op;
mod options;
mod pixel;
mod state;
