use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tallycmp::cli::{Cli, Commands};
use tallycmp::commands::{self, CompareConfig};
use tallycmp::config::{self, TallycmpConfig};
use tallycmp::messages::{TracingNotifier, Verbosity};
use tallycmp::settings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_configuration(&cli)?;
    let verbosity = cli.verbosity.unwrap_or_else(|| config.verbosity());
    init_logging(verbosity);
    settings::set_verbosity_persistent(verbosity);

    let tolerances = cli.command.tolerance_overrides();
    match cli.command {
        Commands::Compare { first, second, .. } => {
            let compare_config = CompareConfig {
                first,
                second,
                options: config.compare_options(tolerances),
            };
            let similar = commands::compare_documents(&compare_config, &TracingNotifier)?;
            if similar {
                println!("similar");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("different");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Slice {
            detector,
            fixed,
            data,
        } => {
            let sliced = commands::slice_detector(&detector, &fixed, data, &TracingNotifier)?;
            println!("{}", serde_json::to_string(&sliced)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Edges { detector, quantity } => {
            println!("{}", commands::print_edges(&detector, &quantity)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            let path = commands::init_config(&std::env::current_dir()?, force)?;
            println!("Created {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_configuration(cli: &Cli) -> Result<TallycmpConfig> {
    match &cli.config {
        Some(path) => Ok(config::load_config_from(path)?),
        None => Ok(std::env::current_dir()
            .map(config::load_config)
            .unwrap_or_default()),
    }
}

// RUST_LOG takes precedence over the configured verbosity
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.as_filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
