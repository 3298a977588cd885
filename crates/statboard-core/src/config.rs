use crate::errors::ConfigError;
use crate::normalize::{normalize, normalize_all};
use crate::table::ColumnNames;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "statboard.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub columns: ColumnConfig,
    pub statuses: StatusConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            columns: ColumnConfig::default(),
            statuses: StatusConfig::default(),
        }
    }
}

/// Header names in the exported tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub desktop_status: String,
    pub mobile_status: String,
    pub device: String,
    /// Only used to find the blank separator row in the plan table.
    pub identifier: String,
    pub status: String,
    pub na_reason: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            desktop_status: "Automation Status Testim Desktop".into(),
            mobile_status: "Automation Status Testim Mobile View".into(),
            device: "Device".into(),
            identifier: "ID".into(),
            status: "Status".into(),
            na_reason: "Automation Not Applicable Reason".into(),
        }
    }
}

impl ColumnConfig {
    pub fn names(&self) -> ColumnNames<'_> {
        ColumnNames {
            identifier: &self.identifier,
            desktop_status: &self.desktop_status,
            mobile_status: &self.mobile_status,
            device: &self.device,
            status: &self.status,
            na_reason: &self.na_reason,
        }
    }

    /// Columns read from the baseline table.
    pub fn baseline_columns(&self) -> Vec<&str> {
        vec![self.desktop_status.as_str(), self.mobile_status.as_str()]
    }

    /// Columns read from the plan table.
    pub fn plan_columns(&self) -> Vec<&str> {
        vec![
            self.desktop_status.as_str(),
            self.mobile_status.as_str(),
            self.device.as_str(),
            self.identifier.as_str(),
            self.status.as_str(),
            self.na_reason.as_str(),
        ]
    }
}

/// Status vocabularies as written in the exports. Matching is done on the
/// normalized form, so case and surrounding whitespace do not matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub automated: Vec<String>,
    pub backlog: Vec<String>,
    pub blocked: Vec<String>,
    pub not_applicable: Vec<String>,
    pub in_review: Vec<String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            automated: vec!["Automated UAT".into(), "Automated Prod".into()],
            backlog: vec!["In progress".into(), "Ready to be automated".into()],
            blocked: vec!["Blocked".into()],
            not_applicable: vec!["Automation not applicable".into()],
            in_review: vec!["Passed with issue".into()],
        }
    }
}

/// A normalized set of status values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary(Vec<String>);

impl Vocabulary {
    pub fn new<S: AsRef<str>>(values: &[S]) -> Self {
        Self(normalize_all(values))
    }

    pub fn matches(&self, raw: Option<&str>) -> bool {
        let n = normalize(raw);
        self.0.iter().any(|v| *v == n)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }
}

/// [`StatusConfig`] compiled into matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSets {
    pub automated: Vocabulary,
    pub backlog: Vocabulary,
    pub blocked: Vocabulary,
    pub not_applicable: Vocabulary,
    pub in_review: Vocabulary,
}

impl StatusConfig {
    pub fn compile(&self) -> StatusSets {
        StatusSets {
            automated: Vocabulary::new(&self.automated),
            backlog: Vocabulary::new(&self.backlog),
            blocked: Vocabulary::new(&self.blocked),
            not_applicable: Vocabulary::new(&self.not_applicable),
            in_review: Vocabulary::new(&self.in_review),
        }
    }

    fn empty_lists(&self) -> Vec<&'static str> {
        [
            ("automated", &self.automated),
            ("backlog", &self.backlog),
            ("blocked", &self.blocked),
            ("not_applicable", &self.not_applicable),
            ("in_review", &self.in_review),
        ]
        .into_iter()
        .filter(|(_, v)| v.iter().all(|s| s.trim().is_empty()))
        .map(|(k, _)| k)
        .collect()
    }
}

pub fn load_config(path: &Path, strict: bool) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    parse_config(&raw, path, strict)
}

/// Parses YAML config text. `origin` only labels error messages.
pub fn parse_config(raw: &str, origin: &Path, strict: bool) -> Result<Config, ConfigError> {
    // An empty file is a valid, all-defaults config.
    if raw.trim().is_empty() {
        return Ok(Config::default());
    }

    let mut ignored_keys = std::collections::BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(raw);

    let cfg: Config = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    let meaningful_unknowns: Vec<_> = ignored_keys
        .iter()
        .filter(|k| !k.starts_with('_') && !k.starts_with("x-"))
        .collect();

    if !meaningful_unknowns.is_empty() {
        if strict {
            return Err(ConfigError(format!(
                "Unknown fields detected in strict mode: {:?} (file: {})",
                meaningful_unknowns,
                origin.display()
            )));
        }
        tracing::warn!(
            event = "statboard.config.ignored_keys",
            file = %origin.display(),
            keys = ?meaningful_unknowns,
            "ignored unknown config fields"
        );
    }

    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }

    let empty = cfg.statuses.empty_lists();
    if !empty.is_empty() {
        return Err(ConfigError(format!(
            "status lists must not be empty: {} (file: {})",
            empty.join(", "),
            origin.display()
        )));
    }

    Ok(cfg)
}

pub const SAMPLE_CONFIG: &str = r#"version: 1
columns:
  desktop_status: Automation Status Testim Desktop
  mobile_status: Automation Status Testim Mobile View
  device: Device
  identifier: ID
  status: Status
  na_reason: Automation Not Applicable Reason
statuses:
  automated: [Automated UAT, Automated Prod]
  backlog: [In progress, Ready to be automated]
  blocked: [Blocked]
  not_applicable: [Automation not applicable]
  in_review: [Passed with issue]
"#;

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, SAMPLE_CONFIG)
        .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str, strict: bool) -> Result<Config, ConfigError> {
        parse_config(raw, Path::new("statboard.yaml"), strict)
    }

    #[test]
    fn sample_config_equals_defaults() {
        assert_eq!(parse(SAMPLE_CONFIG, true).unwrap(), Config::default());
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(parse("", true).unwrap(), Config::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = parse("columns:\n  device: Platform\n", true).unwrap();
        assert_eq!(cfg.columns.device, "Platform");
        assert_eq!(cfg.columns.identifier, "ID");
        assert_eq!(cfg.statuses, StatusConfig::default());
    }

    #[test]
    fn unknown_keys_fail_in_strict_mode_only() {
        let raw = "version: 1\ncolums:\n  device: Platform\n";
        let err = parse(raw, true).unwrap_err();
        assert!(err.to_string().contains("colums"), "{err}");
        assert!(parse(raw, false).is_ok());
    }

    #[test]
    fn extension_keys_are_allowed() {
        assert!(parse("x-owner: qa\n_anchor: 1\n", true).is_ok());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let err = parse("version: 2\n", false).unwrap_err();
        assert!(err.to_string().contains("unsupported config version 2"));
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        let err = parse("statuses:\n  blocked: []\n", false).unwrap_err();
        assert!(err.to_string().contains("blocked"));
    }

    #[test]
    fn vocabulary_matches_normalized_cells() {
        let sets = StatusConfig::default().compile();
        assert!(sets.automated.matches(Some("  AUTOMATED prod ")));
        assert!(sets.backlog.matches(Some("in Progress")));
        assert!(!sets.backlog.matches(None));
        assert!(!sets.blocked.matches(Some("blocked by infra")));
    }
}
