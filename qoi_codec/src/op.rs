use crate::error::Error;

// An enumeration of each possible QOI encoding "chunk", or Op. Diff values are
// stored with their bias applied, exactly as they appear on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
  // `QOI_OP_DIFF`, contains the red, green, and blue color difference from the
  // previous pixel with a bias of +2.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 1 |  dr |  dg |  db  |
  //
  Diff(u8, u8, u8),

  // `QOI_OP_INDEX`, index into the state's pixel cache.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 0 |      index       |
  //
  Index(u8),

  // `QOI_OP_LUMA`, contains the red, green, and blue luma difference from the
  // previous pixel. The green difference has a bias of +32, the red-green, and
  // blue-green difference has a bias of +8.
  //
  // | 7 6   5  4  3  2  1  0 | 7  6  5  4   3  2  1  0 |
  // |------------------------|-------------------------|
  // | 1 0 |       dg         |   dr - dg  |   db - dg  |
  //
  Luma(u8, u8, u8),

  // `QOI_OP_RGB`, contains the red, green, and blue values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|
  // | 1  1  1  1  1  1  1  0 |   r  |   g  |   b  |
  //
  Rgb(u8, u8, u8),

  // `QOI_OP_RGBA`, contains the red, green, blue, and alpha values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|------|
  // | 1  1  1  1  1  1  1  1 |   r  |   g  |   b  |   a  |
  //
  Rgba(u8, u8, u8, u8),

  // `QOI_OP_RUN`, contains the length of the run, 1 to 62. Stored on the
  // wire with a bias of -1.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 1 1 |      run         |
  Run(u8),
}

impl Op {
  const MASK_DIFF: u8 = 0x03;
  const MASK_INDEX: u8 = 0x3f;
  const MASK_LUMA_1: u8 = 0x3f;
  const MASK_LUMA_2: u8 = 0x0f;
  const MASK_RUN: u8 = 0x3f;
  const MASK_TAG: u8 = 0xc0;

  const TAG_DIFF: u8 = 0x40;
  const TAG_INDEX: u8 = 0x00;
  const TAG_LUMA: u8 = 0x80;
  const TAG_RGB: u8 = 0xfe;
  const TAG_RGBA: u8 = 0xff;
  const TAG_RUN: u8 = 0xc0;

  // Encodes the `Op` and appends its bytes to `out`.
  pub fn write_to(self, out: &mut Vec<u8>) {
    match self {
      Op::Diff(diff_r, diff_g, diff_b) => {
        out.push(Op::TAG_DIFF | (diff_r << 4) | (diff_g << 2) | diff_b);
      }
      Op::Index(index) => {
        out.push(Op::TAG_INDEX | index);
      }
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        out.extend_from_slice(&[Op::TAG_LUMA | luma_g, (luma_rg << 4) | luma_bg]);
      }
      Op::Rgb(r, g, b) => {
        out.extend_from_slice(&[Op::TAG_RGB, r, g, b]);
      }
      Op::Rgba(r, g, b, a) => {
        out.extend_from_slice(&[Op::TAG_RGBA, r, g, b, a]);
      }
      Op::Run(run_count) => {
        out.push(Op::TAG_RUN | (run_count - 1));
      }
    }
  }

  // Attempts to decode an `Op` from the given bytes. Running out of bytes
  // part way through a chunk is reported as `Error::TruncatedStream`.
  pub fn try_from_bytes<I>(bytes: &mut I) -> Result<Self, Error>
  where
    I: Iterator<Item = u8>,
  {
    let mut next = || bytes.next().ok_or(Error::TruncatedStream);
    let byte = next()?;

    // The 8 bit tags take precedence over the 2 bit run tag they overlap.
    if byte == Op::TAG_RGB {
      return Ok(Op::Rgb(next()?, next()?, next()?));
    }

    if byte == Op::TAG_RGBA {
      return Ok(Op::Rgba(next()?, next()?, next()?, next()?));
    }

    let op = match byte & Op::MASK_TAG {
      Op::TAG_INDEX => Op::Index(byte & Op::MASK_INDEX),
      Op::TAG_DIFF => Op::Diff(
        byte >> 4 & Op::MASK_DIFF,
        byte >> 2 & Op::MASK_DIFF,
        byte & Op::MASK_DIFF,
      ),
      Op::TAG_LUMA => {
        let next_byte = next()?;

        Op::Luma(
          byte & Op::MASK_LUMA_1,
          next_byte >> 4 & Op::MASK_LUMA_2,
          next_byte & Op::MASK_LUMA_2,
        )
      }
      _ => Op::Run((byte & Op::MASK_RUN) + 1),
    };

    Ok(op)
  }
}
