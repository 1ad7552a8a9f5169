use crate::error::Error;
use crate::meta::{ImageMeta, QOI_HEADER_LEN, QOI_MAGIC};

/// Serializes a QOI header: the `qoif` magic, big-endian width and height,
/// then the channels and colorspace bytes.
///
/// No range checks are performed, the values are written as given.
pub fn encode_header(width: u32, height: u32, channels: u8, colorspace: u8) -> [u8; QOI_HEADER_LEN] {
  let mut header = [0; QOI_HEADER_LEN];

  header[..4].copy_from_slice(QOI_MAGIC);
  header[4..8].copy_from_slice(&width.to_be_bytes());
  header[8..12].copy_from_slice(&height.to_be_bytes());
  header[12] = channels;
  header[13] = colorspace;

  header
}

/// Parses the QOI header at the start of `bytes`, returning the image's
/// metadata and the number of bytes consumed.
///
/// The channels and colorspace bytes are passed through unchecked.
pub fn decode_header(bytes: &[u8]) -> Result<(ImageMeta, usize), Error> {
  if let Some(magic) = bytes.get(..4) {
    if magic != QOI_MAGIC {
      return Err(Error::InvalidMagic([magic[0], magic[1], magic[2], magic[3]]));
    }
  }

  let header: &[u8; QOI_HEADER_LEN] = bytes
    .get(..QOI_HEADER_LEN)
    .and_then(|header| header.try_into().ok())
    .ok_or(Error::TruncatedHeader(bytes.len()))?;

  let meta = ImageMeta {
    width: u32::from_be_bytes([header[4], header[5], header[6], header[7]]),
    height: u32::from_be_bytes([header[8], header[9], header[10], header[11]]),
    channels: header[12],
    colorspace: header[13],
  };

  Ok((meta, QOI_HEADER_LEN))
}
