use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraFields {
    pub project: JiraProject,
    #[serde(rename = "issuetype")]
    pub issue_type: JiraIssueType,
    pub summary: String,
    pub description: String,
    pub priority: JiraPriority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<JiraNamed>,
    /// Affects Version/s
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<JiraNamed>,
    #[serde(rename = "fixVersions", skip_serializing_if = "Vec::is_empty")]
    pub fix_versions: Vec<JiraNamed>,
    /// Tracker-specific fields keyed by field id, e.g. `customfield_12362`.
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraProject {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraIssueType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraPriority {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraNamed {
    pub name: String,
}

impl JiraNamed {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
