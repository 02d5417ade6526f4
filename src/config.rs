use anyhow::{Context, Result, anyhow, bail, ensure};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::models::severity::Severity;
use crate::models::tracker::Tracker;

/// Tables shipped with the binary, used when no config file is given.
const DEFAULT_CONFIG: &str = include_str!("../config.yml");

/// Fields the payload always carries; custom field ids must not shadow them.
const BUILT_IN_FIELDS: [&str; 8] = [
    "project",
    "issuetype",
    "summary",
    "description",
    "priority",
    "components",
    "versions",
    "fixVersions",
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub tracker: Tracker,
    pub jira: JiraConfig,
    #[serde(default)]
    pub custom_fields: CustomFieldIds,
    /// Keyed by the fixed scanner severity codes 1 to 4.
    pub severities: BTreeMap<u8, SeverityInfo>,
    #[serde(default)]
    pub teams: BTreeMap<u64, String>,
    #[serde(default)]
    pub team_overrides: Vec<TeamOverride>,
    pub security_categories: SecurityCategories,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JiraConfig {
    pub project_key: String,
    pub issue_type: String,
    pub component_prefix: Option<String>,
    pub affects_version: Option<String>,
    pub fix_version: Option<String>,
    pub impact_id: Option<String>,
    pub epic_link: Option<String>,
}

/// Tracker-specific ids of the optional custom fields. A field without an id is
/// left out of the payload.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CustomFieldIds {
    pub impact: Option<String>,
    pub epic_link: Option<String>,
    pub team: Option<String>,
    pub security_category: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeverityInfo {
    pub priority_id: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamOverride {
    pub category_contains: String,
    pub team_id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityCategories {
    pub open_source_marker: String,
    pub open_source: SeverityBandIds,
    pub static_analysis: SeverityBandIds,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeverityBandIds {
    pub critical: String,
    pub high: String,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Loads the config from `path`, or the built-in tables, and freezes it for the
/// rest of the process. `tracker` overrides the configured tracker.
pub fn init(path: Option<&Path>, tracker: Option<Tracker>) -> Result<&'static Config> {
    let mut config = match path {
        Some(path) => {
            let config_str = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&config_str).with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => defaults()?,
    };
    if let Some(tracker) = tracker {
        config.tracker = tracker;
    }
    CONFIG
        .set(config)
        .map_err(|_| anyhow!("config already initialized"))?;
    get()
}

pub fn get() -> Result<&'static Config> {
    CONFIG.get().context("config not initialized")
}

pub fn defaults() -> Result<Config> {
    parse(DEFAULT_CONFIG).context("invalid built-in config")
}

pub fn parse(config_str: &str) -> Result<Config> {
    let deserializer = serde_yaml::Deserializer::from_str(config_str);
    let config: Config = serde_path_to_error::deserialize(deserializer)
        .map_err(|e| anyhow!("failed to parse config: {}", e))?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<()> {
        ensure!(!self.jira.project_key.trim().is_empty(), "jira.project_key is empty");
        ensure!(!self.jira.issue_type.trim().is_empty(), "jira.issue_type is empty");
        ensure!(!self.severities.is_empty(), "severities table is empty");

        for (code, info) in &self.severities {
            ensure!(
                Severity::try_from(*code).is_ok(),
                "severity {code} is outside the scanner scale 1 to 4"
            );
            ensure!(!info.priority_id.is_empty(), "severity {code} has no priority_id");
            ensure!(!info.title.is_empty(), "severity {code} has no title");
        }
        for (application_id, team_id) in &self.teams {
            ensure!(!team_id.is_empty(), "application {application_id} has no team id");
        }
        for team_override in &self.team_overrides {
            ensure!(
                !team_override.category_contains.is_empty(),
                "team override without category_contains"
            );
            ensure!(
                !team_override.team_id.is_empty(),
                "team override for '{}' has no team_id",
                team_override.category_contains
            );
        }

        let categories = &self.security_categories;
        ensure!(
            !categories.open_source_marker.is_empty(),
            "security_categories.open_source_marker is empty"
        );
        for (name, band) in [
            ("open_source", &categories.open_source),
            ("static_analysis", &categories.static_analysis),
        ] {
            ensure!(
                !band.critical.is_empty() && !band.high.is_empty(),
                "security_categories.{name} has an empty id"
            );
        }
        self.validate_custom_fields()
    }

    fn validate_custom_fields(&self) -> Result<()> {
        let ids = &self.custom_fields;
        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (name, id) in [
            ("impact", &ids.impact),
            ("epic_link", &ids.epic_link),
            ("team", &ids.team),
            ("security_category", &ids.security_category),
        ] {
            let Some(id) = id else { continue };
            ensure!(!id.trim().is_empty(), "custom_fields.{name} is empty");
            ensure!(
                !BUILT_IN_FIELDS.contains(&id.as_str()),
                "custom_fields.{name} '{id}' collides with a built-in field"
            );
            if let Some(other) = seen.insert(id.as_str(), name) {
                bail!("custom_fields.{other} and custom_fields.{name} share the id '{id}'");
            }
        }
        Ok(())
    }
}
