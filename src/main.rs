use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
#[cfg(feature = "colors")]
use owo_colors::OwoColorize;
use tracing::error;
use tracing_subscriber::EnvFilter;

use twitchlive::cli::Args;
use twitchlive::config::load_settings;
use twitchlive::display::render;
use twitchlive::error::ApiError;
use twitchlive::fetch_live_channels;
use twitchlive::helix::HelixClient;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(body) = err.downcast_ref::<ApiError>().and_then(ApiError::body) {
                error!("{body}");
            }
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = load_settings(args).context("load configuration")?;
    let client = HelixClient::new(&settings.client_id, settings.token.clone());

    let live = fetch_live_channels(&client, &settings.username)
        .with_context(|| format!("fetch live channels for '{}'", settings.username))?;

    let output = render(
        &live,
        settings.output_format,
        settings.time_mode,
        &settings.delimiter,
        Utc::now(),
    )
    .context("encode output")?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).context("write output")?;
    stdout.flush().context("flush output")?;
    Ok(())
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_error(err: &anyhow::Error) {
    #[cfg(feature = "colors")]
    let prefix = "error:".red().bold().to_string();
    #[cfg(not(feature = "colors"))]
    let prefix = "error:".to_string();
    eprintln!("{prefix} {err:#}");
}
