use serde::Deserialize;
use tracing::{debug, info};

use super::api_request::{JiraCreateIssueRequest, PayloadInput};
use super::description::{issue_table, open_source_issue_table};
use super::finding::{Finding, group_by_category, issue_base_url};
use crate::config::Config;
use crate::error::Result;

/// All unsubmitted findings of one application release.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub application_id: u64,
    pub application_name: String,
    pub release_id: u64,
    pub issue_url: String,
    pub findings: Vec<Finding>,
}

/// Builds one payload per (category, severity) group. Stops at the first group
/// that cannot be mapped.
pub fn build_batch(config: &Config, request: BatchRequest) -> Result<Vec<JiraCreateIssueRequest>> {
    let base_url = issue_base_url(&request.issue_url, request.release_id);
    let groups = group_by_category(request.findings);
    info!(
        "Building {} payload(s) for application {} release {} ({} descriptions)",
        groups.len(),
        request.application_id,
        request.release_id,
        config.tracker
    );

    let mut payloads = Vec::with_capacity(groups.len());
    for (counter, (category, findings)) in groups.into_iter().enumerate() {
        let description = if config.is_open_source(&category.name) {
            open_source_issue_table(config.tracker, &base_url, &findings)
        } else {
            issue_table(config.tracker, &base_url, &findings)
        };

        let input = PayloadInput {
            application_id: request.application_id,
            application_name: request.application_name.clone(),
            severity: category.severity.code(),
            category: category.name.clone(),
            description,
        };
        let payload = JiraCreateIssueRequest::from_payload_input(config, &input)?;
        debug!("{} BUG-{} : {:?}", category, counter + 1, payload);
        payloads.push(payload);
    }
    Ok(payloads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::error::PayloadError;
    use crate::models::finding::tests::finding;
    use crate::models::severity::Severity;
    use crate::models::tracker::Tracker;
    use serde_json::json;

    fn request(application_id: u64, findings: Vec<Finding>) -> BatchRequest {
        BatchRequest {
            application_id,
            application_name: "Apollo Workers".to_string(),
            release_id: 5,
            issue_url: "https://fod.example.com".to_string(),
            findings,
        }
    }

    #[test]
    fn one_payload_per_group() {
        let config = config::defaults().unwrap();
        let mut component = finding(11, "Open Source", Severity::Critical, "com.acme:util@1.0");
        component.check_id = Some("CVE-2018-1270".to_string());

        let payloads = build_batch(
            &config,
            request(
                111426,
                vec![
                    finding(1, "Log Forging", Severity::High, "src/Log.java"),
                    component,
                    finding(2, "Log Forging", Severity::High, "src/App.java"),
                ],
            ),
        )
        .unwrap();

        assert_eq!(payloads.len(), 2);

        let forging = &payloads[0].fields;
        assert_eq!(forging.summary, "Fortify Apollo Workers scan: High Priority Log Forging issues");
        assert_eq!(forging.priority.id, "3");
        assert_eq!(
            forging.description,
            "||Issue Id||Description||\
             \n|[2|https://fod.example.com/Releases/5/Issues/2]|src/App.java|\
             \n|[1|https://fod.example.com/Releases/5/Issues/1]|src/Log.java|"
        );

        let open_source = &payloads[1].fields;
        assert_eq!(open_source.priority.id, "2");
        assert!(open_source.description.starts_with("||Issue Id||CVE ID||Component||"));
        assert!(open_source.description.contains("CVE-2018-1270"));
        assert_eq!(
            open_source.custom_fields["customfield_10543"],
            json!({ "id": "34561" })
        );
    }

    #[test]
    fn octane_tracker_renders_html_descriptions() {
        let mut config = config::defaults().unwrap();
        config.tracker = Tracker::Octane;

        let payloads = build_batch(
            &config,
            request(111426, vec![finding(4, "Path Manipulation", Severity::High, "src/Io.java")]),
        )
        .unwrap();

        assert_eq!(payloads.len(), 1);
        assert_eq!(
            payloads[0].fields.description,
            "<table><body><tr><th>&nbsp;Issue Id&nbsp;</th><th>&nbsp;Description&nbsp;</th></tr>\
             <tr><td>&nbsp;<a href=\"https://fod.example.com/Releases/5/Issues/4\">4</a>&nbsp;</td>\
             <td>&nbsp;src/Io.java&nbsp;</td></tr></body></table>"
        );
    }

    #[test]
    fn empty_batch_yields_nothing() {
        let config = config::defaults().unwrap();
        assert!(build_batch(&config, request(111426, vec![])).unwrap().is_empty());
    }

    #[test]
    fn unmapped_application_aborts_batch() {
        let config = config::defaults().unwrap();
        let err = build_batch(
            &config,
            request(1, vec![finding(1, "SQL Injection", Severity::High, "a")]),
        )
        .unwrap_err();
        assert!(matches!(err, PayloadError::UnknownApplication(1)));
    }
}
