//! Azure DevOps API response types.
//!
//! These represent the raw JSON returned by the pull requests endpoint.
//! Fields the data model requires are declared without defaults, so a
//! payload missing one of them fails deserialization instead of producing
//! a partially populated entity. Extra fields are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The `{ "value": [...], "count": n }` envelope around list responses.
#[derive(Debug, Clone, Deserialize)]
pub struct AdoPullRequestList {
    pub value: Vec<AdoPullRequest>,
}

/// A raw pull request record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoPullRequest {
    pub pull_request_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub creation_date: DateTime<Utc>,
    pub created_by: AdoIdentity,
    pub source_ref_name: String,
    pub target_ref_name: String,
    pub url: String,
}

/// A raw identity reference (PR author).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoIdentity {
    pub display_name: String,
    #[serde(default)]
    pub unique_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}
