use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rulescope", about = "DNR ruleset companion for extension manifests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest's required fields
    Check { manifest: PathBuf },
    /// Import a manifest's rulesets into the session
    Import {
        manifest: PathBuf,
        /// Discard previously imported rulesets first
        #[arg(long)]
        replace: bool,
    },
    /// List rulesets tracked in this session
    List,
    /// Flip a ruleset's enabled flag by file name
    Toggle { file_name: String },
    /// Clear all tracked rulesets
    Reset,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check { manifest } => {
            rulescope_cli::commands::check::run_check(&manifest)?;
        }
        Commands::Import { manifest, replace } => {
            rulescope_cli::commands::rulesets::run_import(&manifest, replace)?;
        }
        Commands::List => {
            rulescope_cli::commands::rulesets::run_list()?;
        }
        Commands::Toggle { file_name } => {
            rulescope_cli::commands::rulesets::run_toggle(&file_name)?;
        }
        Commands::Reset => {
            rulescope_cli::commands::rulesets::run_reset()?;
        }
    }
    Ok(())
}
