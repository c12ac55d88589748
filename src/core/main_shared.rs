use std::env;
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, warn};

use crate::core::cli::Args;
use crate::core::logging::init_logging;
use crate::core::pipeline::run_pipeline;
use crate::github::Commenter;
use crate::types::AppResult;
use crate::types::config::GradingConfig;

pub fn run_main() -> AppResult<()> {
    let args = Args::parse();

    init_logging(args.debug);

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        let _ = env::set_current_dir(&cwd);
    }
    let cwd = env::current_dir()?;
    debug!("Current working directory: {}", cwd.display());

    if args.token.is_none() {
        warn!("No token provided, so we'll skip the comment!");
    }

    let exit_code = match resolve_config(&args) {
        Ok(config) => match run_pipeline(&cwd, &config) {
            Ok(score) => {
                if let Some(token) = args.token.as_deref() {
                    if let Err(e) = Commenter::new(&score, token).deliver() {
                        error!("{e}");
                    }
                }
                0
            }
            // The run is abandoned, but only configuration problems exit nonzero
            Err(e) => {
                error!("{e}");
                0
            }
        },
        Err(e) => {
            error!("{e}");
            1
        }
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn resolve_config(args: &Args) -> AppResult<GradingConfig> {
    match args.config.as_deref() {
        Some(input) => GradingConfig::from_arg(input),
        None => {
            warn!("No config provided, so going to use the default config!");
            GradingConfig::bundled_default()
        }
    }
}
