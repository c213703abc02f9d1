//! Sprays bytes from stdin onto a canvas, then writes the canvas to stdout.
//!
//! Each 3 bytes of input become one pixel, in raster order, until the input
//! runs out or the canvas is full. It's a simple way to look at a stream of
//! binary data for patterns:
//!
//! ```text
//! head -c 3000000 /dev/urandom | spray --format png 1024 768 > noise.png
//! ```
//!
//! Set `RAWCANVAS_LOG` to `error`, `warn`, `info`, `debug`, or `trace` to get
//! log output on stderr.

use std::{
  error::Error,
  io::{Read, Write},
  str::FromStr,
};

use log::{LevelFilter, Log, Metadata, Record};
use rawcanvas::{Canvas, CanvasFormat, ImageEncoder};

const USAGE: &str = "usage: spray [--format png|ppm|ppm-ascii|raw] [WIDTH HEIGHT]";

struct StderrLogger;
impl Log for StderrLogger {
  fn enabled(&self, metadata: &Metadata<'_>) -> bool {
    metadata.level() <= log::max_level()
  }
  fn log(&self, record: &Record<'_>) {
    if self.enabled(record.metadata()) {
      eprintln!("[{}] {}", record.level(), record.args());
    }
  }
  fn flush(&self) {}
}
static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
  let level = std::env::var("RAWCANVAS_LOG")
    .ok()
    .and_then(|s| LevelFilter::from_str(&s).ok())
    .unwrap_or(LevelFilter::Warn);
  if log::set_logger(&LOGGER).is_ok() {
    log::set_max_level(level);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Config {
  format: CanvasFormat,
  width: u32,
  height: u32,
}

/// `Ok(None)` means that help was asked for.
fn parse_args(args: impl Iterator<Item = String>) -> Result<Option<Config>, String> {
  let mut format = CanvasFormat::Png;
  let mut dims: Vec<u32> = Vec::new();
  let mut args = args;
  while let Some(arg) = args.next() {
    match arg.as_str() {
      "-h" | "--help" => return Ok(None),
      "-f" | "--format" => {
        let name = args.next().ok_or_else(|| String::from("--format needs a value"))?;
        format = name.parse().map_err(|_| format!("unknown format: {name}"))?;
      }
      other => {
        let n = other.parse::<u32>().map_err(|_| format!("not a dimension: {other}"))?;
        dims.push(n);
      }
    }
  }
  let (width, height) = match dims.as_slice() {
    [] => match format {
      CanvasFormat::Ppm { .. } => (400, 400),
      _ => (1024, 768),
    },
    [w, h] => (*w, *h),
    _ => return Err(String::from("give both WIDTH and HEIGHT, or neither")),
  };
  Ok(Some(Config { format, width, height }))
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
  let mut canvas = Canvas::new(config.width, config.height)?;
  let byte_limit = 3 * canvas.pixel_count();
  let mut input = Vec::with_capacity(byte_limit);
  std::io::stdin().lock().take(byte_limit as u64).read_to_end(&mut input)?;
  let sprayed = canvas.spray_bytes(&input);
  log::info!(
    "sprayed {} of {} pixels from {} input bytes",
    sprayed,
    canvas.pixel_count(),
    input.len()
  );
  let bytes = config.format.encode(&canvas);
  log::info!("writing {} bytes of {}", bytes.len(), config.format.extension());
  let mut stdout = std::io::stdout().lock();
  stdout.write_all(&bytes)?;
  stdout.flush()?;
  Ok(())
}

fn main() {
  init_logging();
  let config = match parse_args(std::env::args().skip(1)) {
    Ok(Some(config)) => config,
    Ok(None) => {
      println!("{USAGE}");
      return;
    }
    Err(msg) => {
      eprintln!("spray: {msg}\n{USAGE}");
      std::process::exit(2);
    }
  };
  log::debug!("{:?}", config);
  if let Err(e) = run(config) {
    eprintln!("spray: {e}");
    std::process::exit(1);
  }
}
