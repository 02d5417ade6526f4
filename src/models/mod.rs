pub mod api_request;
pub mod batch;
pub mod description;
pub mod finding;
pub mod jira;
pub mod lookup;
pub mod severity;
pub mod tracker;
