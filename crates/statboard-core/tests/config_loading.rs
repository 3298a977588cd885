use statboard_core::config::{load_config, write_sample_config, SAMPLE_CONFIG};
use statboard_core::{get_all_metrics, Config, Table};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn sample_config_round_trips_to_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("statboard.yaml");
    write_sample_config(&path)?;

    assert_eq!(std::fs::read_to_string(&path)?, SAMPLE_CONFIG);
    assert_eq!(load_config(&path, true)?, Config::default());
    Ok(())
}

#[test]
fn renamed_columns_drive_the_metrics() -> anyhow::Result<()> {
    let mut config = NamedTempFile::new()?;
    writeln!(config, "version: 1")?;
    writeln!(config, "columns:")?;
    writeln!(config, "  desktop_status: Web")?;
    writeln!(config, "  mobile_status: App")?;
    writeln!(config, "  device: Platform")?;
    writeln!(config, "x-owner: qa-platform")?;

    let cfg = load_config(config.path(), true)?;
    assert_eq!(cfg.columns.device, "Platform");

    let baseline = Table::from_reader(
        "Web,App\nAutomated UAT,Automated Prod\n".as_bytes(),
        Path::new("baseline.csv"),
    )?;
    let plan = Table::from_reader(
        "ID,Platform,Web,App\nT-1,Both,Blocked,In progress\n".as_bytes(),
        Path::new("plan.csv"),
    )?;
    let r = get_all_metrics(&baseline, &plan, &cfg);
    assert_eq!(r.automated.total, 2);
    assert_eq!(r.blocked, 1);
    assert_eq!(r.backlog.mobile, 1);
    Ok(())
}

#[test]
fn strict_mode_rejects_typos() -> anyhow::Result<()> {
    let mut config = NamedTempFile::new()?;
    writeln!(config, "version: 1")?;
    writeln!(config, "statuse:")?;
    writeln!(config, "  blocked: [On hold]")?;

    let err = load_config(config.path(), true).unwrap_err();
    assert!(err.to_string().contains("statuse"), "{err}");

    // Lenient mode keeps the defaults.
    assert_eq!(load_config(config.path(), false)?, Config::default());
    Ok(())
}

#[test]
fn unreadable_config_path_is_an_error() {
    let err = load_config(Path::new("/no/such/statboard.yaml"), false).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}
