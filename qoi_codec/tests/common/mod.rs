#![allow(dead_code)]

pub const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

// 4x3 RGBA image that exercises every chunk type at least once.
pub const ALL_OPS_RGBA: [[u8; 4]; 12] = [
  [255, 255, 255, 255], [255, 255, 255, 255], [255, 255, 255, 255], [255, 255, 255, 255],
  [255, 255, 255, 255], [0, 0, 0, 255], [0, 255, 0, 127], [0, 0, 0, 255],
  [252, 250, 254, 255], [0, 255, 0, 127], [0, 255, 0, 127], [127, 127, 255, 127],
];

// Chunk stream of `ALL_OPS_RGBA`, without header and end marker.
pub const ALL_OPS_RGBA_CHUNKS: [u8; 17] = [
  0x55, // Op::Diff(1, 1, 1)
  0xc3, // Op::Run(4)
  0x7f, // Op::Diff(3, 3, 3)
  0xff, 0, 255, 0, 127, // Op::Rgba(0, 255, 0, 127)
  0x35, // Op::Index(53)
  0x9a, 0xac, // Op::Luma(26, 10, 12)
  0x30, // Op::Index(48)
  0xc0, // Op::Run(1)
  0xfe, 127, 127, 255, // Op::Rgb(127, 127, 255)
];

// 3x3 RGB image.
pub const MIXED_RGB: [[u8; 3]; 9] = [
  [255, 0, 0], [255, 255, 255], [0, 0, 255],
  [0, 0, 0], [1, 1, 1], [5, 5, 5],
  [255, 0, 0], [255, 0, 0], [255, 0, 0],
];

// Chunk stream of `MIXED_RGB`, without header and end marker.
pub const MIXED_RGB_CHUNKS: [u8; 9] = [
  0x5a, // Op::Diff(1, 2, 2)
  0x65, // Op::Diff(2, 1, 1)
  0x7e, // Op::Diff(3, 3, 2)
  0x6b, // Op::Diff(2, 2, 3)
  0x7f, // Op::Diff(3, 3, 3)
  0xa4, 0x88, // Op::Luma(36, 8, 8)
  0x32, // Op::Index(50)
  0xc1, // Op::Run(2)
];

pub fn header(width: u32, height: u32, channels: u8, colorspace: u8) -> Vec<u8> {
  let mut header = b"qoif".to_vec();
  header.extend_from_slice(&width.to_be_bytes());
  header.extend_from_slice(&height.to_be_bytes());
  header.extend_from_slice(&[channels, colorspace]);
  header
}

// Assembles a complete encoded image from its parts.
pub fn encoded(width: u32, height: u32, channels: u8, chunks: &[u8]) -> Vec<u8> {
  let mut data = header(width, height, channels, 0);
  data.extend_from_slice(chunks);
  data.extend_from_slice(&END_MARKER);
  data
}

// Generates a `width` x `height` image with flat areas, gradients, a
// translucent band, and pseudo random noise, so that every chunk type shows
// up in its encoding.
pub fn testcard(width: u32, height: u32, channels: usize) -> Vec<u8> {
  let mut pixels = Vec::with_capacity((width * height) as usize * channels);
  let mut seed: u32 = 0x2545_f491;

  for y in 0..height {
    for x in 0..width {
      seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);

      let pixel = match (x * 4 / width.max(1), y * 3 / height.max(1)) {
        (0, _) => [200, 30, 30, 255],
        (1, 0) => [(x * 3) as u8, (y * 5) as u8, 128, 255],
        (1, _) => [(x + y) as u8, (x + y) as u8, (x + y) as u8, 255],
        (2, 1) => [40, 90, 200, (x * 8) as u8],
        (2, _) => [[0, 0, 0, 255], [255, 255, 255, 255], [10, 200, 10, 255]][(x % 3) as usize],
        _ => {
          let [r, g, b, a] = seed.to_be_bytes();
          [r, g, b, a | 0x80]
        }
      };

      pixels.extend_from_slice(&pixel[..channels]);
    }
  }

  pixels
}
