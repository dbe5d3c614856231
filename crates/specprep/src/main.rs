//! specprep: prepares the Typesense OpenAPI spec for client code generation.
//!
//! Downloads the upstream spec, unwraps object-style query parameters and
//! writes the edited copy for the generator.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use specprep_core::{FetchOutcome, DEFAULT_SPEC_URL};
use specprep_lib::{Settings, DEFAULT_INPUT, DEFAULT_OUTPUT};
use specprep_telemetry::{LogFormat, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(
    name = "specprep",
    about = "Prepare the Typesense OpenAPI spec for client code generation",
    version
)]
struct Cli {
    /// URL of the upstream spec.
    #[arg(long, env = "SPECPREP_URL", default_value = DEFAULT_SPEC_URL)]
    url: String,

    /// Local copy of the upstream spec (download target and transform input).
    #[arg(short, long, env = "SPECPREP_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Edited spec for the generator.
    #[arg(short, long, env = "SPECPREP_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Skip the download and transform the existing local copy.
    #[arg(long, env = "SPECPREP_OFFLINE")]
    offline: bool,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, env = "SPECPREP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (pretty or json).
    #[arg(long, env = "SPECPREP_LOG_FORMAT", default_value = "pretty", value_parser = parse_log_format)]
    log_format: LogFormat,
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    specprep_telemetry::parse_log_format(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::new()
        .with_log_level(cli.log_level)
        .with_log_format(cli.log_format);
    if let Err(e) = specprep_telemetry::init(&telemetry) {
        eprintln!("error: {}", e);
        return ExitCode::from(1);
    }

    let settings = Settings {
        url: cli.url,
        input: cli.input,
        output: cli.output,
        offline: cli.offline,
    };

    match specprep_lib::run(&settings) {
        Ok(summary) => {
            let source = match summary.fetch {
                Some(FetchOutcome::Refreshed(_)) => "fresh download",
                Some(FetchOutcome::Kept { .. }) => "cached copy",
                None => "local copy",
            };
            eprintln!(
                "wrote {} ({} edits, from {})",
                summary.report.output.display(),
                summary.report.edits,
                source
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
