mod cleaning;
mod cli;
mod config;
mod error;
mod inference;
mod logging;
mod output;
mod pipeline;
mod readers;
mod report;
mod roles;
mod stats;
mod table;
mod types;

use clap::Parser;
use cli::{Cli, Commands};
use types::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Clean {
            input,
            out,
            report_dir,
            config,
            summary,
        } => {
            let config = cli::load_config(config.as_deref())?;
            let paths = cli::run_paths(&config, input, out, report_dir, summary);

            let result = pipeline::run(&paths, &config.cleaning)?;

            eprintln!(
                "Cleaned {} ({} rows loaded, {} duplicates removed)",
                result.input.display(),
                result.report.rows_loaded,
                result.report.duplicates_removed
            );
            eprintln!("Cleaned data written to: {}", result.cleaned.display());
            eprintln!(
                "Missing-value reports written to: {} and {}",
                result.before_report.display(),
                result.after_report.display()
            );
            if let Some(summary) = result.summary {
                eprintln!("Run summary written to: {}", summary.display());
            }
        }
        Commands::Roles { input, config } => {
            let config = cli::load_config(config.as_deref())?;
            let input = input.unwrap_or_else(|| config.paths.raw.clone());

            let roles = pipeline::detect_roles(&input, &config.cleaning)?;
            output::write_json_stdout(&roles)?;
        }
    }

    Ok(())
}
