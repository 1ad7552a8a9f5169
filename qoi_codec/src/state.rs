use crate::meta::QOI_MAX_RUN;
use crate::op::Op;
use crate::pixel::Pixel;

// The pixel history shared by the encoder and decoder. A fresh `State` is
// created for every image and threaded through each step, since every chunk
// depends on the pixels that came before it.
#[derive(Debug)]
pub struct State {
  // A cache of previously seen pixels, indexed by `Pixel::qoi_hash`.
  pub cache: [Pixel; 64],
  // The previously decoded/encoded pixel.
  pub prev_pixel: Pixel,
  // Length of the current, not yet emitted, run. Always below 62 between
  // calls to `advance_run`.
  pub run_count: u8,
}

impl State {
  pub fn new() -> Self {
    Self {
      cache: [Pixel::ZERO; 64],
      prev_pixel: Pixel::default(),
      run_count: 0,
    }
  }

  // Returns true if the cache slot for `pixel` currently holds `pixel`.
  pub fn lookup(&self, pixel: Pixel) -> bool {
    self.cache[pixel.qoi_hash() as usize] == pixel
  }

  // Stores `pixel` in its cache slot, overwriting whatever was there.
  pub fn update(&mut self, pixel: Pixel) {
    self.cache[pixel.qoi_hash() as usize] = pixel;
  }

  // Extends the current run by one pixel. Once the run reaches its maximum
  // length it is returned for emission and the counter resets.
  pub fn advance_run(&mut self) -> Option<Op> {
    self.run_count += 1;

    if self.run_count == QOI_MAX_RUN {
      return self.flush_run();
    }

    None
  }

  // Ends the current run, returning it if any pixels were pending.
  pub fn flush_run(&mut self) -> Option<Op> {
    if self.run_count == 0 {
      return None;
    }

    let run = Op::Run(self.run_count);
    self.run_count = 0;

    Some(run)
  }
}

impl Default for State {
  fn default() -> Self {
    Self::new()
  }
}
