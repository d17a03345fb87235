//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::request::{normalize_extension, validate_template};
use crate::size::parse_size;

/// Generate placeholder files of a given extension, size and count.
///
/// Anything not passed as a flag is asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "dummygen", version, about)]
pub struct Cli {
    /// File extension (png/jpg/jpeg → image, xlsx → spreadsheet, else zero-filled).
    #[arg(short, long, value_parser = normalize_extension)]
    pub ext: Option<String>,

    /// Target size, e.g. 100, 512KB, 10MB, 2.5GB.
    #[arg(short, long, value_parser = parse_size)]
    pub size: Option<u64>,

    /// Filename template without extension; `{n}` becomes the file index.
    #[arg(short, long, value_parser = validate_template)]
    pub name: Option<String>,

    /// Number of files to generate.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Image width in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Destination directory (defaults to the configured one, then the working directory).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Never prompt; use config defaults for anything not given.
    #[arg(long)]
    pub no_input: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
