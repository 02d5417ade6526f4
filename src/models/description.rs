//! Tables listing the findings behind an issue, as Jira wiki markup or Octane HTML.

use std::fmt::Write as _;

use super::finding::Finding;
use super::tracker::Tracker;

const ISSUE_COLUMNS: [&str; 2] = ["Issue Id", "Description"];
const OPEN_SOURCE_COLUMNS: [&str; 3] = ["Issue Id", "CVE ID", "Component"];

/// Rows are ordered by location, then id.
pub fn issue_table(tracker: Tracker, issue_base_url: &str, findings: &[Finding]) -> String {
    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| {
        a.primary_location
            .cmp(&b.primary_location)
            .then(a.id.cmp(&b.id))
    });

    let rows = sorted.into_iter().map(|f| (f.id, vec![location(f)]));
    render(tracker, &ISSUE_COLUMNS, issue_base_url, rows)
}

pub fn open_source_issue_table(tracker: Tracker, issue_base_url: &str, findings: &[Finding]) -> String {
    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| a.primary_location.cmp(&b.primary_location));

    let rows = sorted.into_iter().map(|f| {
        let cve = f.check_id.clone().unwrap_or_default();
        (f.id, vec![cve, location(f)])
    });
    render(tracker, &OPEN_SOURCE_COLUMNS, issue_base_url, rows)
}

fn location(finding: &Finding) -> String {
    match finding.line_number {
        Some(line) => format!("{} : {}", finding.primary_location, line),
        None => finding.primary_location.clone(),
    }
}

// Writing to a String cannot fail, so write! results are ignored below.
fn render(
    tracker: Tracker,
    columns: &[&str],
    issue_base_url: &str,
    rows: impl Iterator<Item = (u64, Vec<String>)>,
) -> String {
    let mut table = String::new();
    match tracker {
        Tracker::Jira => {
            table.push_str("||");
            for column in columns {
                let _ = write!(table, "{column}||");
            }
            for (id, cells) in rows {
                let _ = write!(table, "\n|[{id}|{issue_base_url}{id}]|");
                for cell in cells {
                    let _ = write!(table, "{cell}|");
                }
            }
        }
        Tracker::Octane => {
            table.push_str("<table><body><tr>");
            for column in columns {
                let _ = write!(table, "<th>&nbsp;{column}&nbsp;</th>");
            }
            table.push_str("</tr>");
            for (id, cells) in rows {
                let _ = write!(
                    table,
                    "<tr><td>&nbsp;<a href=\"{issue_base_url}{id}\">{id}</a>&nbsp;</td>"
                );
                for cell in cells {
                    let _ = write!(table, "<td>&nbsp;{cell}&nbsp;</td>");
                }
                table.push_str("</tr>");
            }
            table.push_str("</body></table>");
        }
    }
    table
}
