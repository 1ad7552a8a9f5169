// An enumeration of the possible pixel "diffs".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelDiff {
  // A `QOI_OP_DIFF` diff with bias applied.
  Small(u8, u8, u8),
  // A `QOI_OP_LUMA` diff with bias applied.
  Luma(u8, u8, u8),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pixel {
  // Red channel value.
  pub r: u8,
  // Green channel value.
  pub g: u8,
  // Blue channel value.
  pub b: u8,
  // Alpha channel value.
  pub a: u8,
}

// Opaque black, the "previous pixel" every stream starts from.
impl Default for Pixel {
  fn default() -> Self {
    Self { r: 0, g: 0, b: 0, a: 255 }
  }
}

impl Pixel {
  // Fully transparent black, the initial value of every cache slot.
  pub const ZERO: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

  // Reads a pixel from a raw RGB or RGBA chunk. RGB pixels are opaque.
  pub fn from_raw(chunk: &[u8]) -> Self {
    Self {
      r: chunk[0],
      g: chunk[1],
      b: chunk[2],
      a: chunk.get(3).copied().unwrap_or(255),
    }
  }

  // Appends the pixel's first `channels` components to `out`.
  pub fn write_raw(&self, channels: usize, out: &mut Vec<u8>) {
    out.extend_from_slice(&[self.r, self.g, self.b, self.a][..channels]);
  }

  // Attempts to produce a `PixelDiff` against the provided `other` pixel.
  // Returns `Some(PixelDiff)` when there is a diff within range, otherwise
  // `None` is returned. Channel differences wrap modulo 256.
  pub fn diff(&self, other: &Pixel) -> Option<PixelDiff> {
    if self.a != other.a {
      return None;
    }

    let diff_r = self.r.wrapping_sub(other.r);
    let diff_g = self.g.wrapping_sub(other.g);
    let diff_b = self.b.wrapping_sub(other.b);

    let small_r = diff_r.wrapping_add(2);
    let small_g = diff_g.wrapping_add(2);
    let small_b = diff_b.wrapping_add(2);
    let range = 0..=3;

    if range.contains(&small_r) && range.contains(&small_g) && range.contains(&small_b) {
      return Some(PixelDiff::Small(small_r, small_g, small_b));
    }

    let luma_g = diff_g.wrapping_add(32);

    if !(0..=63).contains(&luma_g) {
      return None;
    }

    let luma_rg = diff_r.wrapping_add(8).wrapping_sub(diff_g);
    let luma_bg = diff_b.wrapping_add(8).wrapping_sub(diff_g);
    let range = 0..=15;

    if range.contains(&luma_rg) && range.contains(&luma_bg) {
      return Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg));
    }

    None
  }

  // Recreates a `Pixel` from the provided `diff` against `prev`.
  pub fn from_diff(diff: PixelDiff, prev: &Pixel) -> Self {
    match diff {
      PixelDiff::Small(small_r, small_g, small_b) => Self {
        r: prev.r.wrapping_add(small_r).wrapping_sub(2),
        g: prev.g.wrapping_add(small_g).wrapping_sub(2),
        b: prev.b.wrapping_add(small_b).wrapping_sub(2),
        a: prev.a,
      },
      PixelDiff::Luma(luma_g, luma_rg, luma_bg) => {
        let diff_g = luma_g.wrapping_sub(32);
        let diff_r = luma_rg.wrapping_sub(8).wrapping_add(diff_g);
        let diff_b = luma_bg.wrapping_sub(8).wrapping_add(diff_g);

        Self {
          r: prev.r.wrapping_add(diff_r),
          g: prev.g.wrapping_add(diff_g),
          b: prev.b.wrapping_add(diff_b),
          a: prev.a,
        }
      }
    }
  }

  // Position of the pixel in the 64 slot index cache:
  // `(r * 3 + g * 5 + b * 7 + a * 11) % 64`.
  pub fn qoi_hash(&self) -> u8 {
    let r = self.r as usize;
    let g = self.g as usize;
    let b = self.b as usize;
    let a = self.a as usize;

    ((r * 3 + g * 5 + b * 7 + a * 11) % 64) as u8
  }
}
