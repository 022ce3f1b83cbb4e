use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::pipeline::RunPaths;
use crate::types::Result;

/// Clean messy tabular hospital records
#[derive(Parser, Debug)]
#[command(name = "hospital-records-clean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log every stage decision (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the cleaning pipeline and write the cleaned table plus missing-value reports
    Clean {
        /// Raw file, or a directory whose first CSV is used
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Cleaned output file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Directory for missing-value reports
        #[arg(short, long)]
        report_dir: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write a JSON run summary to the report directory
        #[arg(long, default_value_t = false)]
        summary: bool,
    },

    /// Print the detected column roles as JSON
    Roles {
        /// Raw file, or a directory whose first CSV is used
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Config file contents, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Resolve run locations: command-line flags win over the config file
pub fn run_paths(
    config: &Config,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    report_dir: Option<PathBuf>,
    summary: bool,
) -> RunPaths {
    RunPaths {
        input: input.unwrap_or_else(|| config.paths.raw.clone()),
        cleaned: out.unwrap_or_else(|| config.paths.cleaned.clone()),
        report_dir: report_dir.unwrap_or_else(|| config.paths.report_dir.clone()),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_flags() {
        let cli = Cli::try_parse_from([
            "hospital-records-clean",
            "clean",
            "-i",
            "raw.csv",
            "-o",
            "out/clean.csv",
            "--summary",
        ])
        .unwrap();

        match cli.command {
            Commands::Clean {
                input,
                out,
                report_dir,
                config,
                summary,
            } => {
                assert_eq!(input, Some(PathBuf::from("raw.csv")));
                assert_eq!(out, Some(PathBuf::from("out/clean.csv")));
                assert_eq!(report_dir, None);
                assert_eq!(config, None);
                assert!(summary);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_roles_with_verbose() {
        let cli = Cli::try_parse_from(["hospital-records-clean", "roles", "-v", "-i", "raw.csv"])
            .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Roles { .. }));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["hospital-records-clean"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::default();
        let paths = run_paths(&config, None, Some(PathBuf::from("x.csv")), None, false);

        assert_eq!(paths.input, PathBuf::from("data/raw"));
        assert_eq!(paths.cleaned, PathBuf::from("x.csv"));
        assert_eq!(paths.report_dir, PathBuf::from("reports"));
        assert!(!paths.summary);
    }

    #[test]
    fn test_no_config_file_means_defaults() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }
}
