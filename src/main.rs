use clap::Parser;
use fxgym::cli::{self, Cli, Commands, OutputMode};
use fxgym::config::AppConfig;
use tracing::warn;

mod main_runtime;

use main_runtime::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Missing files fall back to built-in defaults; a malformed file is an error
    let config = AppConfig::load_from(&cli.config)?;

    init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for error in &errors {
            warn!("Config: {}", error);
        }
        anyhow::bail!("invalid configuration: {}", errors.join("; "));
    }

    match cli.command {
        Commands::Run {
            data,
            policy,
            seed,
            json,
        } => {
            cli::run_command(&config, data, policy, seed, OutputMode::from_json_flag(json))?;
        }
        Commands::Space { json } => {
            cli::space_command(&config, OutputMode::from_json_flag(json))?;
        }
    }

    Ok(())
}
