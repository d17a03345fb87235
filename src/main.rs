//! Dummygen - placeholder file generator CLI.

mod adapters;
mod cli;
mod config;
mod context;
mod error;
mod orchestrator;
mod output;
mod ports;
mod prompt;
mod request;
mod size;

use std::io;
use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::GeneratorSet;
use crate::error::GenError;
use crate::orchestrator::generate_all;
use crate::prompt::{collect_request, Prompter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "warn,dummygen=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<(), GenError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load(&config_path).map_err(GenError::Config)?;
    let generators = GeneratorSet::live(&config)?;

    // Collect the request, prompting for anything not given as a flag
    let request = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stderr(), !cli.no_input);
        collect_request(&cli, &config.defaults, &mut prompter)?
    };

    let out_dir = config.output_dir(cli.output_dir.as_deref());
    tokio::fs::create_dir_all(&out_dir).await?;

    let report = generate_all(&request, &out_dir, &generators).await;

    eprintln!(
        "Done: {}/{} file(s) generated in {}",
        report.generated.len(),
        request.count,
        out_dir.display()
    );
    if !report.failed.is_empty() {
        log::warn!("{} file(s) failed", report.failed.len());
    }
    Ok(())
}
