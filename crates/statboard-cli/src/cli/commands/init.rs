use statboard_core::config::write_sample_config;

use super::exit_codes;
use crate::cli::args::InitArgs;

pub async fn run(args: InitArgs) -> anyhow::Result<i32> {
    if args.config.exists() {
        eprintln!("{} already exists; leaving it untouched", args.config.display());
        return Ok(exit_codes::OK);
    }
    write_sample_config(&args.config)?;
    eprintln!("Created {}", args.config.display());
    Ok(exit_codes::OK)
}
