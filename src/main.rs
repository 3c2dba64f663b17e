//! hydroframe - NWIS response to CSV
//!
//! Reads one saved NWIS JSON response (IV or DV service), aligns every
//! series onto a shared time axis and writes the wide table to stdout as
//! CSV. Warnings and progress go to stderr.
//!
//! Usage:
//!   hydroframe response.json                      # gaps left null and tagged
//!   hydroframe response.json --interpolate        # fill interior gaps
//!   hydroframe response.json --config hydroframe.toml
//!
//! Environment:
//!   RUST_LOG - log filter (default: hydroframe=info)

use hydroframe::config::{ExtractOptions, load_options};
use hydroframe::extract::extract_nwis_table;
use std::env;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::{error, info};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let mut input: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut interpolate = false;
    let mut mark_interpolated = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--interpolate" => {
                interpolate = true;
                i += 1;
            }
            "--mark-interpolated" => {
                mark_interpolated = true;
                i += 1;
            }
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
            }
            arg if input.is_none() && !arg.starts_with("--") => {
                input = Some(arg.to_string());
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!(
                    "Usage: {} <response.json> [--interpolate] [--mark-interpolated] [--config PATH]",
                    args[0]
                );
                process::exit(1);
            }
        }
    }

    let Some(input) = input else {
        eprintln!("Error: no input file given");
        eprintln!("Usage: {} <response.json> [--interpolate] [--mark-interpolated] [--config PATH]", args[0]);
        process::exit(1);
    };

    let mut options = match config_path {
        Some(path) => match load_options(&path) {
            Ok(options) => options,
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        },
        None => ExtractOptions::default(),
    };
    // Flags can only switch features on.
    options.interpolate |= interpolate;
    options.mark_interpolated |= mark_interpolated;

    let body = match fs::read_to_string(&input) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read {}: {}", input, e);
            process::exit(1);
        }
    };

    let extraction = match extract_nwis_table(&body, &options) {
        Ok(extraction) => extraction,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    for meta in &extraction.series {
        info!("{}: {} [{}]", meta.key, meta.site_name, meta.unit);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = extraction.table.write_csv(&mut out).and_then(|_| out.flush()) {
        error!("Failed to write CSV: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hydroframe=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}
