use statboard_core::errors::LoadError;
use statboard_core::{load_metrics, try_load_metrics, Config};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{}", contents)?;
    Ok(file)
}

#[test]
fn missing_file_yields_no_metrics() -> anyhow::Result<()> {
    let plan = csv_file("ID,Device\nT-1,Desktop\n")?;
    let missing = Path::new("/definitely/not/here/baseline.csv");

    assert!(load_metrics(missing, plan.path(), &Config::default()).is_none());

    let err = try_load_metrics(missing, plan.path(), &Config::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
    assert_eq!(err.path(), missing);
    Ok(())
}

#[test]
fn empty_file_is_a_load_failure() -> anyhow::Result<()> {
    let baseline = csv_file("")?;
    let plan = csv_file("ID\nT-1\n")?;

    let err = try_load_metrics(baseline.path(), plan.path(), &Config::default()).unwrap_err();
    assert!(matches!(err, LoadError::Empty { .. }), "{err:?}");
    assert!(err.to_string().contains("empty"));
    assert!(load_metrics(baseline.path(), plan.path(), &Config::default()).is_none());
    Ok(())
}

#[test]
fn header_only_files_give_zero_metrics() -> anyhow::Result<()> {
    let baseline = csv_file("Automation Status Testim Desktop,Automation Status Testim Mobile View\n")?;
    let plan = csv_file("ID,Device,Status\n")?;

    let metrics = load_metrics(baseline.path(), plan.path(), &Config::default())
        .expect("header-only tables are valid input");
    assert_eq!(metrics, statboard_core::MetricsResult::default());
    Ok(())
}

#[test]
fn plan_failure_is_reported_for_the_plan_path() -> anyhow::Result<()> {
    let baseline = csv_file("Automation Status Testim Desktop\nAutomated UAT\n")?;
    let plan = csv_file("")?;

    let err = try_load_metrics(baseline.path(), plan.path(), &Config::default()).unwrap_err();
    assert_eq!(err.path(), plan.path());
    Ok(())
}
