//! Parses dates with the configured calendar and prints their JSON record.
//!
//! Usage: `carbon [--config <file>] [text ...]`
//!
//! Each argument is parsed on its own; without arguments lines are read from
//! stdin. The words `now`, `today` and `tomorrow` are understood as well.
//! Settings come from the optional file and `SUPPORTS__*` environment variables,
//! logging is controlled through `RUST_LOG`.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use supports::carbon::{Calendar, Carbon, Settings};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut config: Option<PathBuf> = None;
    let mut inputs: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => {
                    error!("--config needs a file");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            inputs.push(arg);
        }
    }

    let settings = match Settings::load(config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "could not load settings");
            return ExitCode::FAILURE;
        }
    };
    let calendar = Calendar::install(Calendar::new(settings));
    info!(layouts = ?calendar.current_layouts(), "calendar ready");

    if inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => inputs.push(line),
                Err(e) => {
                    error!(error = %e, "could not read stdin");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    let mut failed = false;
    for input in &inputs {
        let parsed = match input.trim() {
            "now" => Ok(calendar.now(None)),
            "today" => Ok(calendar.today()),
            "tomorrow" => Ok(calendar.tomorrow()),
            text => calendar.parse(text, None, None),
        };
        match parsed.and_then(|carbon: Carbon| Ok(serde_json::to_string(&carbon)?)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "skipped");
                failed = true;
            }
        }
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
