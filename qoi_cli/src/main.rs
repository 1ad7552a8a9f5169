//! `qoiconv` converts PNG images to QOI and QOI images back to PNG.
//!
//! ```sh
//! qoiconv photo.png            # writes photo.qoi
//! qoiconv photo.qoi out.png -y # overwrites out.png without asking
//! qoiconv photo.png -vv --linear --strict
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use image::{DynamicImage, ImageBuffer, Rgb, Rgba};
use log::{debug, info, LevelFilter};
use qoi_codec::{
  decode_to_vec, encode_to_vec, Channels, Colorspace, DecodeOptions, EncodeOptions, ImageMeta,
};

// Settings shared by both conversion directions.
struct Settings {
  force: bool,
  colorspace: Colorspace,
  strict: bool,
}

#[derive(Debug, PartialEq)]
enum Direction {
  Encode,
  Decode,
}

fn cli() -> Command {
  Command::new("qoiconv")
    .version(env!("CARGO_PKG_VERSION"))
    .about("simple QOI encoder/decoder")
    .arg(Arg::new("input").required(true).help("input file (.png or .qoi)"))
    .arg(Arg::new("output").help("optional output file"))
    .arg(Arg::new("verbose").short('v').action(ArgAction::Count).help("increase log verbosity (-v, -vv, -vvv)"))
    .arg(Arg::new("force").short('y').long("yes").action(ArgAction::SetTrue).help("force overwrite output file without asking"))
    .arg(Arg::new("linear").long("linear").action(ArgAction::SetTrue).help("mark encoded images as having all channels linear"))
    .arg(Arg::new("strict").long("strict").action(ArgAction::SetTrue).help("reject unusual header values and malformed end markers"))
}

fn log_level(verbose: u8) -> LevelFilter {
  match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

fn direction_of(input: &Path) -> Result<Direction> {
  match input.extension().and_then(|ext| ext.to_str()) {
    Some("png") => Ok(Direction::Encode),
    Some("qoi") => Ok(Direction::Decode),
    _ => bail!("unsupported file format for {}, use `.png` or `.qoi`", input.display()),
  }
}

fn derive_output_path(input: &Path, direction: &Direction) -> PathBuf {
  match direction {
    Direction::Encode => input.with_extension("qoi"),
    Direction::Decode => input.with_extension("png"),
  }
}

fn prompt_overwrite(file: &Path) -> Result<bool> {
  print!("The file '{}' already exists. Overwrite? [y/N]: ", file.display());
  io::stdout().flush().context("failed to flush stdout")?;

  let mut response = String::new();
  io::stdin().read_line(&mut response).context("failed to read input")?;

  Ok(matches!(response.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn check_and_prepare_output(output: &Path, force: bool) -> Result<bool> {
  if force || !output.exists() {
    return Ok(true);
  }

  prompt_overwrite(output)
}

// Flattens a loaded image to the RGB or RGBA layout QOI can store. Layouts
// with alpha become RGBA, everything else RGB.
fn image_to_pixels(image: DynamicImage) -> (u32, u32, Channels, Vec<u8>) {
  let (width, height) = (image.width(), image.height());

  if image.color().has_alpha() {
    (width, height, Channels::Rgba, image.into_rgba8().into_raw())
  } else {
    (width, height, Channels::Rgb, image.into_rgb8().into_raw())
  }
}

fn encode(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
  let image = image::open(input).with_context(|| format!("failed to open {}", input.display()))?;
  let (width, height, channels, pixels) = image_to_pixels(image);
  let meta = ImageMeta::new(width, height, channels, settings.colorspace);

  info!("encoding {} -> {}", input.display(), output.display());
  info!("dimensions: {}x{}, channels: {:?}", width, height, channels);

  if !check_and_prepare_output(output, settings.force)? {
    println!("Operation canceled.");
    return Ok(());
  }

  let options = EncodeOptions::default().with_strict(settings.strict);
  let start = Instant::now();
  let encoded = encode_to_vec(&pixels, &meta, &options)
    .with_context(|| format!("failed to encode {}", input.display()))?;
  let duration = start.elapsed();

  fs::write(output, &encoded).with_context(|| format!("failed to write {}", output.display()))?;

  info!("encoding completed in {:.2?}", duration);
  debug!("{} bytes of pixel data became {} bytes", pixels.len(), encoded.len());

  Ok(())
}

fn decode(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
  let data = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

  let options = DecodeOptions::default().with_strict(settings.strict);
  let start = Instant::now();
  let (meta, pixels) = decode_to_vec(&data, &options)
    .with_context(|| format!("failed to decode {}", input.display()))?;
  let duration = start.elapsed();

  info!("decoding {} -> {}", input.display(), output.display());
  info!("dimensions: {}x{}, channels: {}", meta.width, meta.height, meta.channels);
  info!("decoding completed in {:.2?}", duration);

  if !check_and_prepare_output(output, settings.force)? {
    println!("Operation canceled.");
    return Ok(());
  }

  let saved = match meta.channels()? {
    Channels::Rgb => ImageBuffer::<Rgb<u8>, _>::from_raw(meta.width, meta.height, pixels)
      .map(|buffer| buffer.save(output)),
    Channels::Rgba => ImageBuffer::<Rgba<u8>, _>::from_raw(meta.width, meta.height, pixels)
      .map(|buffer| buffer.save(output)),
  };

  match saved {
    Some(result) => result.with_context(|| format!("failed to save {}", output.display())),
    None => bail!("decoded pixel data does not fit a {}x{} image", meta.width, meta.height),
  }
}

fn main() -> Result<()> {
  let matches = cli().get_matches();

  env_logger::Builder::new()
    .filter_level(log_level(matches.get_count("verbose")))
    .parse_default_env()
    .init();

  let input = matches
    .get_one::<String>("input")
    .map(PathBuf::from)
    .context("missing input file")?;
  let direction = direction_of(&input)?;
  let output = matches
    .get_one::<String>("output")
    .map(PathBuf::from)
    .unwrap_or_else(|| derive_output_path(&input, &direction));

  let settings = Settings {
    force: matches.get_flag("force"),
    colorspace: if matches.get_flag("linear") { Colorspace::Linear } else { Colorspace::Srgb },
    strict: matches.get_flag("strict"),
  };

  match direction {
    Direction::Encode => encode(&input, &output, &settings),
    Direction::Decode => decode(&input, &output, &settings),
  }
}
