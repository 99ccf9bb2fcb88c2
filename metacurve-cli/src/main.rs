//! `metacurve` CLI: solve JSON path descriptions and print SVG or
//! MetaPost-style control points.

mod error;
mod input;
mod output;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use metacurve_svg::RenderOptions;

use crate::error::CliError;
use crate::input::Document;

#[derive(Parser)]
#[command(version, about = "Smooth curves through points, the METAFONT/MetaPost way")]
struct Cli {
    /// JSON path description; read from stdin when omitted
    file: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Decimal places for output coordinates
    #[arg(long, default_value_t = 4)]
    precision: usize,

    /// Overlay each segment's control polygon (SVG only)
    #[arg(long)]
    show_controls: bool,

    /// Stroke width of the curves (SVG only)
    #[arg(long, default_value_t = 0.5)]
    stroke_width: f64,

    /// More log output: -v info, -vv debug, -vvv trace. `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Text,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Default: WARN, raised by `-v`. Override with the `RUST_LOG` env var
/// (e.g. `RUST_LOG=metacurve_core=trace`).
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let source = read_source(cli.file.as_deref())?;
    let doc: Document = serde_json::from_str(&source)?;
    info!(paths = doc.paths.len(), "parsed input");

    let solved = doc
        .paths
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let path = spec.to_path(index)?;
            debug!(index, segments = path.len(), closed = path.is_closed(), "solving path");
            metacurve_core::solve(path).map_err(CliError::curve(index))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rendered = match cli.format {
        Format::Svg => {
            let opts = RenderOptions {
                precision: cli.precision,
                stroke_width: cli.stroke_width,
                show_controls: cli.show_controls,
                ..RenderOptions::default()
            };
            let mut svg = metacurve_svg::render_to_string(&solved, &opts);
            svg.push('\n');
            svg
        }
        Format::Text => output::format_text(&solved, cli.precision),
    };

    write_result(cli.output.as_deref(), &rendered)
}

fn read_source(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

fn write_result(target: Option<&Path>, content: &str) -> Result<(), CliError> {
    match target {
        Some(path) => {
            fs::write(path, content).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!("wrote {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
