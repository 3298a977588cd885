use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "statboard",
    version,
    about = "Automation status metrics for test plan exports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Log filter directive (e.g. `warn`, `statboard_core=debug`)
    #[arg(long, global = true, env = "STATBOARD_LOG", default_value = "warn")]
    pub log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute and render the metrics for a baseline and a plan export
    Metrics(MetricsArgs),
    /// Check that the exports carry the columns the metrics read
    Validate(ValidateArgs),
    /// Write a sample config file
    Init(InitArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MetricsArgs {
    /// CSV export of the automation baseline
    #[arg(long)]
    pub baseline: PathBuf,

    /// CSV export of the test plan (desktop section, blank row, mobile section)
    #[arg(long)]
    pub plan: PathBuf,

    /// Config file; `statboard.yaml` is used when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also show not-applicable counted over the whole plan, without the section split
    #[arg(long)]
    pub explain: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long)]
    pub baseline: PathBuf,

    #[arg(long)]
    pub plan: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    pub format: String, // text|json

    /// Warnings fail the run (exit 1) and unknown config keys are rejected
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "statboard.yaml")]
    pub config: PathBuf,
}
