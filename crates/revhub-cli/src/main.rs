//! RevHub CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;
use revhub_core::config::logging::LoggingConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(&cli.env) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging);

    if let Err(e) = cli.execute(&config).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber from the logging configuration.
/// `RUST_LOG` overrides the configured level.
fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
}
