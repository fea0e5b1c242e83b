//! bmpinfo command line interface
//!
//! Prints every header field of an uncompressed BMP followed by the decoded
//! pixels. A file that fails validation gets a diagnosis and a hex dump of
//! its first bytes instead.

use std::fmt::Write as _;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bmpinfo::{
    BmpError, DEFAULT_DUMP_LIMIT, HexDump, InspectRequest, Inspection, Limits,
    PIXEL_LISTING_HEADER, ValidationEvent, load_file, write_field, write_pixel,
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// Show the header fields and pixel data of a BMP file.
#[derive(Parser)]
#[command(name = "bmpinfo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// BMP file to inspect
    file: PathBuf,

    /// Print the header fields only, skip the pixel listing
    #[arg(long)]
    no_pixels: bool,

    /// Refuse images with more pixels than this
    #[arg(long, value_name = "N")]
    max_pixels: Option<u64>,

    /// Bytes shown in the hex dump of a rejected file
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DUMP_LIMIT)]
    dump_limit: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let data = load_file(&cli.file)?;
    tracing::debug!(path = %cli.file.display(), bytes = data.len(), "loaded");

    let limits = Limits {
        max_pixels: cli.max_pixels,
        ..Default::default()
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    // Fields are printed as each check passes, so a rejected file still
    // shows everything that was verified before the failure.
    let mut line = String::new();
    let mut write_error: Option<io::Error> = None;
    let inspected = InspectRequest::new(&data)
        .with_limits(&limits)
        .inspect_with(|event| match event {
            ValidationEvent::Passed(field) => {
                line.clear();
                let _ = write_field(&mut line, &field);
                if write_error.is_none() {
                    write_error = out.write_all(line.as_bytes()).err();
                }
            }
            ValidationEvent::Advisory(advisory) => {
                tracing::warn!("{advisory}");
            }
        });
    if let Some(e) = write_error {
        return Err(e).context("writing report");
    }

    match inspected {
        Ok(inspection) => {
            tracing::debug!(
                width = inspection.info.width,
                height = inspection.info.height,
                bpp = inspection.info.depth.bits(),
                "validated"
            );
            if !cli.no_pixels {
                match list_pixels(&mut out, &inspection) {
                    Ok(()) => {}
                    Err(ListingError::Decode(e)) => {
                        writeln!(out).context("writing report")?;
                        return reject(&mut out, &data, cli.dump_limit, &e);
                    }
                    Err(ListingError::Io(e)) => return Err(e).context("writing report"),
                }
            }
            out.flush().context("writing report")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => reject(&mut out, &data, cli.dump_limit, &e),
    }
}

#[derive(Debug, thiserror::Error)]
enum ListingError {
    #[error(transparent)]
    Decode(#[from] BmpError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Stream the pixel listing row by row.
///
/// On a decode error the pixels of the current row decoded so far are
/// flushed, leaving the output line unterminated.
fn list_pixels(out: &mut impl Write, inspection: &Inspection<'_>) -> Result<(), ListingError> {
    let info = &inspection.info;
    let mut row = String::new();

    writeln!(out, "{PIXEL_LISTING_HEADER}")?;
    for pixel in inspection.pixels() {
        let pixel = match pixel {
            Ok(pixel) => pixel,
            Err(e) => {
                out.write_all(row.as_bytes())?;
                return Err(e.into());
            }
        };
        // Writing into a String cannot fail.
        let _ = write_pixel(&mut row, &pixel, info.depth, info.width);
        if pixel.x + 1 == info.width {
            out.write_all(row.as_bytes())?;
            row.clear();
        }
    }
    Ok(())
}

/// Report a fatal diagnosis followed by the hex dump.
fn reject(out: &mut impl Write, data: &[u8], dump_limit: usize, err: &BmpError) -> Result<ExitCode> {
    out.flush().context("writing report")?;
    tracing::error!(check = ?err.check(), "{err}");

    let mut dump = String::new();
    write!(dump, "{}", HexDump::new(data).limit(dump_limit)).context("formatting dump")?;
    out.write_all(dump.as_bytes()).context("writing dump")?;
    out.flush().context("writing dump")?;
    Ok(ExitCode::FAILURE)
}
