//! polyread Command Line Interface
//!
//! Usage:
//!   polyread [OPTIONS] <input-file>
//!   polyread --help
//!
//! Examples:
//!   polyread domain.isl                        # Read a map, print it back
//!   polyread --kind set --nparam 1 dom.isl     # Require a set with one parameter
//!   polyread --emit json constraints.polylib   # Dump the rows as JSON
//!   polyread --kind vector point.polylib       # Read a PolyLib vector

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use polyread::utils::{PolyReadError, SourceMap};
use polyread::{Context, InputFormat, ReadConfig};
use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;

/// polyread - read integer constraint systems from text
#[derive(Parser, Debug)]
#[command(name = "polyread")]
#[command(author = "polyread Contributors")]
#[command(version)]
#[command(about = "Reads integer constraint systems in set/map or PolyLib notation", long_about = None)]
struct Cli {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// What kind of object the input holds
    #[arg(short, long, default_value = "map")]
    kind: KindArg,

    /// Expected number of parameters
    #[arg(long, value_name = "N")]
    nparam: Option<usize>,

    /// Input format (vectors only support polylib)
    #[arg(short, long, default_value = "polylib")]
    format: FormatArg,

    /// Output representation
    #[arg(long, default_value = "text")]
    emit: EmitKind,

    /// Keep constraints exactly as written
    #[arg(long)]
    no_simplify: bool,

    /// Reject input left over after the object
    #[arg(long)]
    strict: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress warnings)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// A single conjunction of constraints
    BasicMap,
    /// A single conjunction without input dimensions
    BasicSet,
    /// A union of basic maps
    Map,
    /// A union of basic sets
    Set,
    /// A PolyLib vector
    Vector,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Set/map notation
    Isl,
    /// PolyLib matrices and vectors
    Polylib,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Isl => InputFormat::Isl,
            FormatArg::Polylib => InputFormat::PolyLib,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitKind {
    /// The notation the reader accepts
    Text,
    /// Dimensions and rows as JSON
    Json,
    /// Rust debug representation
    Debug,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    info!("polyread v{}", polyread::VERSION);
    debug!("Input file: {:?}", cli.input);

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;

    let config = build_config(&cli);
    debug!("Read config: {:?}", config);
    let ctx = Context::new(config);

    info!("Reading {:?}...", cli.kind);
    let output = match cli.kind {
        KindArg::BasicMap => ctx
            .read_basic_map_from_str(&source, cli.nparam)
            .map(|v| render(&v, cli.emit)),
        KindArg::BasicSet => ctx
            .read_basic_set_from_str(&source, cli.nparam)
            .map(|v| render(&v, cli.emit)),
        KindArg::Map => ctx
            .read_map_from_str(&source, cli.nparam)
            .map(|v| render(&v, cli.emit)),
        KindArg::Set => ctx
            .read_set_from_str(&source, cli.nparam)
            .map(|v| render(&v, cli.emit)),
        KindArg::Vector => ctx
            .read_vector_from_str(&source, cli.format.into())
            .map(|v| render(&v, cli.emit)),
    };

    let output = match output {
        Ok(output) => output?,
        Err(e) => {
            report(&source, &e);
            return Err(e).with_context(|| format!("Failed to read {:?}", cli.input));
        }
    };
    write_output(&cli.output, &output)
}

fn build_config(cli: &Cli) -> ReadConfig {
    ReadConfig::default()
        .with_simplify(!cli.no_simplify)
        .with_reject_trailing_input(cli.strict)
}

fn render<T: std::fmt::Display + Debug + Serialize>(value: &T, emit: EmitKind) -> Result<String> {
    Ok(match emit {
        EmitKind::Text => value.to_string(),
        EmitKind::Json => serde_json::to_string_pretty(value).context("Failed to serialize output")?,
        EmitKind::Debug => format!("{:#?}", value),
    })
}

/// Log the error together with the source line it points at.
fn report(source: &str, err: &PolyReadError) {
    error!("{}", err);
    if let Some(snippet) = err
        .span()
        .and_then(|span| SourceMap::new(source.to_string()).snippet(&span))
    {
        error!("\n{}", snippet);
    }
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content)
                .with_context(|| format!("Failed to write output file: {:?}", p))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
