//! Archlens CLI entry point.

use archlens::cli::{self, Cli, Commands, EXIT_ERROR};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `archlens=debug`.
const LOG_ENV: &str = "ARCHLENS_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    archlens::init();

    let result = match &cli.command {
        Commands::Analyze(args) => cli::run_analyze(args),
        Commands::Graph(args) => cli::run_graph(args),
        Commands::Show(args) => cli::run_show(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
