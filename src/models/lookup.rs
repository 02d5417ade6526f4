use crate::config::{Config, SeverityInfo};
use crate::error::{PayloadError, Result};

use super::severity::Severity;

impl Config {
    pub fn severity_info(&self, severity: Severity) -> Result<&SeverityInfo> {
        self.severities
            .get(&severity.code())
            .ok_or(PayloadError::UnknownSeverity(severity.code()))
    }

    /// Category overrides win over the application table.
    pub fn team_for(&self, category: &str, application_id: u64) -> Result<&str> {
        if let Some(team_override) = self
            .team_overrides
            .iter()
            .find(|o| category.contains(&o.category_contains))
        {
            return Ok(team_override.team_id.as_str());
        }
        self.teams
            .get(&application_id)
            .map(String::as_str)
            .ok_or(PayloadError::UnknownApplication(application_id))
    }

    pub fn is_open_source(&self, category: &str) -> bool {
        category.contains(&self.security_categories.open_source_marker)
    }

    pub fn security_category_for(&self, severity: Severity, category: &str) -> &str {
        let band = if self.is_open_source(category) {
            &self.security_categories.open_source
        } else {
            &self.security_categories.static_analysis
        };
        if severity == Severity::Critical {
            band.critical.as_str()
        } else {
            band.high.as_str()
        }
    }
}
