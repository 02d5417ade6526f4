use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::severity::Severity;

/// A single scanner finding as reported by the scan service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: u64,
    pub vuln_id: String,
    pub category: String,
    pub severity: Severity,
    pub primary_location: String,
    pub line_number: Option<u32>,
    /// CVE id for open source findings.
    pub check_id: Option<String>,
}

/// Findings sharing a key are filed as one issue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey {
    pub name: String,
    pub severity: Severity,
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category [{}, {}]", self.name, self.severity.code())
    }
}

pub fn group_by_category(findings: Vec<Finding>) -> BTreeMap<CategoryKey, Vec<Finding>> {
    let mut groups: BTreeMap<CategoryKey, Vec<Finding>> = BTreeMap::new();
    for finding in findings {
        let key = CategoryKey {
            name: finding.category.clone(),
            severity: finding.severity,
        };
        groups.entry(key).or_default().push(finding);
    }
    groups
}

pub fn issue_base_url(issue_url: &str, release_id: u64) -> String {
    format!("{}/Releases/{}/Issues/", issue_url.trim_end_matches('/'), release_id)
}
