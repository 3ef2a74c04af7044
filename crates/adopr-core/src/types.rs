//! Common types shared across the detector, the API client, and the MCP layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fully resolved Azure DevOps repository coordinates.
///
/// All three components are non-empty once a value of this type exists;
/// partially resolved states never cross a component boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCoordinates {
    pub organization: String,
    pub project: String,
    pub repository: String,
}

impl RepoCoordinates {
    pub fn new(
        organization: impl Into<String>,
        project: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            project: project.into(),
            repository: repository.into(),
        }
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.organization, self.project, self.repository
        )
    }
}

/// Pull request status filter for a listing query.
///
/// `All` means "do not narrow by status"; the API client omits the status
/// query parameter entirely for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Active,
    Completed,
    Abandoned,
    All,
}

impl StatusFilter {
    /// The value to send as `searchCriteria.status`, or `None` for `All`.
    pub fn as_query_value(self) -> Option<&'static str> {
        match self {
            StatusFilter::Active => Some("active"),
            StatusFilter::Completed => Some("completed"),
            StatusFilter::Abandoned => Some("abandoned"),
            StatusFilter::All => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
            StatusFilter::Abandoned => "abandoned",
            StatusFilter::All => "all",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            "abandoned" => Ok(StatusFilter::Abandoned),
            "all" => Ok(StatusFilter::All),
            other => Err(Error::InvalidStatusFilter(other.to_string())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an individual pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    Active,
    Completed,
    Abandoned,
}

impl FromStr for PrStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PrStatus::Active),
            "completed" => Ok(PrStatus::Completed),
            "abandoned" => Ok(PrStatus::Abandoned),
            other => Err(Error::MalformedResponse(format!(
                "unknown pull request status '{}'",
                other
            ))),
        }
    }
}

/// A single pull request, constructed fresh per request from the API
/// response. Never persisted; identity is the remote `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source_branch: String,
    pub target_branch: String,
    pub status: PrStatus,
    pub created_by: String,
    pub creation_date: DateTime<Utc>,
    pub url: String,
}

/// The resource payload: resolved coordinates, applied filter, and the
/// ordered pull request list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestListing {
    pub organization: String,
    pub project: String,
    pub repository: String,
    pub status: StatusFilter,
    pub count: usize,
    pub pull_requests: Vec<PullRequest>,
}

impl PullRequestListing {
    pub fn new(
        coordinates: &RepoCoordinates,
        status: StatusFilter,
        pull_requests: Vec<PullRequest>,
    ) -> Self {
        Self {
            organization: coordinates.organization.clone(),
            project: coordinates.project.clone(),
            repository: coordinates.repository.clone(),
            status,
            count: pull_requests.len(),
            pull_requests,
        }
    }
}
