pub mod init;
pub mod metrics;
pub mod validate;

use crate::cli::args::{Cli, Command};
use statboard_core::config::{self, Config, DEFAULT_CONFIG_FILE};
use statboard_core::errors::{ConfigError, LoadError};
use statboard_core::fingerprint;
use statboard_core::report::InputInfo;
use statboard_core::Table;
use std::path::{Path, PathBuf};

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const FINDINGS: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Metrics(args) => metrics::run(args).await,
        Command::Validate(args) => validate::run(args).await,
        Command::Init(args) => init::run(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// An explicit `--config` must exist. Without one, `statboard.yaml` in the
/// working directory is used if present, otherwise the built-in defaults.
pub(crate) fn resolve_config(
    explicit: Option<&Path>,
    strict: bool,
) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                tracing::debug!(event = "statboard.config.defaults");
                return Ok(Config::default());
            }
            default
        }
    };
    let cfg = config::load_config(&path, strict)?;
    tracing::debug!(event = "statboard.config.loaded", file = %path.display());
    Ok(cfg)
}

/// One loaded export together with its provenance for the report header.
pub(crate) struct Input {
    pub table: Table,
    pub info: InputInfo,
}

pub(crate) async fn read_input(path: &Path) -> Result<Input, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = Table::from_reader(&bytes[..], path)?;
    let info = InputInfo {
        path: path.display().to_string(),
        sha256: fingerprint::digest(&bytes),
        rows: table.len(),
    };
    Ok(Input { table, info })
}
