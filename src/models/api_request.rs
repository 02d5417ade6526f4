use super::jira::{JiraFields, JiraIssueType, JiraNamed, JiraPriority, JiraProject};
use super::severity::Severity;
use crate::config::Config;
use crate::error::{PayloadError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::debug;

/// One group of findings to be filed as a single tracker issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadInput {
    pub application_id: u64,
    pub application_name: String,
    pub severity: u8,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraCreateIssueRequest {
    pub fields: JiraFields,
}

impl JiraCreateIssueRequest {
    pub fn from_payload_input(config: &Config, input: &PayloadInput) -> Result<Self> {
        debug!("Payload input: {:?}", input);

        if input.category.trim().is_empty() {
            return Err(PayloadError::InvalidInput("category must not be empty"));
        }
        if input.application_name.trim().is_empty() {
            return Err(PayloadError::InvalidInput("application name must not be empty"));
        }

        let severity = Severity::try_from(input.severity)?;
        let severity_info = config.severity_info(severity)?;
        let jira = &config.jira;

        let mut custom_fields = BTreeMap::new();
        let ids = &config.custom_fields;
        if let (Some(field), Some(impact_id)) = (&ids.impact, &jira.impact_id) {
            custom_fields.insert(field.clone(), json!({ "id": impact_id }));
        }
        if let (Some(field), Some(epic_link)) = (&ids.epic_link, &jira.epic_link) {
            custom_fields.insert(field.clone(), Value::String(epic_link.clone()));
        }
        if let Some(field) = &ids.team {
            let team_id = config.team_for(&input.category, input.application_id)?;
            custom_fields.insert(field.clone(), json!({ "id": team_id }));
        }
        if let Some(field) = &ids.security_category {
            let category_id = config.security_category_for(severity, &input.category);
            custom_fields.insert(field.clone(), json!({ "id": category_id }));
        }

        Ok(Self {
            fields: JiraFields {
                project: JiraProject {
                    key: jira.project_key.clone(),
                },
                issue_type: JiraIssueType {
                    name: jira.issue_type.clone(),
                },
                summary: format!(
                    "Fortify {} scan: {} {} issues",
                    input.application_name, severity_info.title, input.category
                ),
                description: input.description.clone(),
                priority: JiraPriority {
                    id: severity_info.priority_id.clone(),
                },
                components: jira
                    .component_prefix
                    .iter()
                    .map(|prefix| JiraNamed::new(format!("{}{}", prefix, input.application_name)))
                    .collect(),
                versions: jira.affects_version.iter().map(JiraNamed::new).collect(),
                fix_versions: jira.fix_version.iter().map(JiraNamed::new).collect(),
                custom_fields,
            },
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
