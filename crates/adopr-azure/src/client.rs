//! Azure DevOps API client implementation.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use adopr_core::{
    Error, PrStatus, PullRequest, PullRequestSource, RepoCoordinates, Result, Settings,
    StatusFilter,
};
use tracing::{debug, warn};

use crate::types::{AdoPullRequest, AdoPullRequestList};
use crate::{API_VERSION, DEFAULT_AZURE_DEVOPS_URL};

/// Azure DevOps API client.
///
/// Holds the optional personal access token; the `MissingCredential` check
/// happens at call time, so a client can be constructed before a token is
/// known to be present.
pub struct AzureDevOpsClient {
    base_url: String,
    pat: Option<String>,
    client: reqwest::Client,
}

impl AzureDevOpsClient {
    /// Create a new client against the public Azure DevOps service.
    pub fn new(pat: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_AZURE_DEVOPS_URL, pat)
    }

    /// Create a new client with a custom base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>, pat: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            pat,
            client: reqwest::Client::builder()
                .user_agent("adopr-tools")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create a client from process settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.pat.clone())
    }

    /// The Basic auth header Azure DevOps expects: empty username, PAT as
    /// the password.
    fn auth_header(&self) -> Result<String> {
        let pat = self.pat.as_deref().ok_or(Error::MissingCredential)?;
        Ok(format!("Basic {}", STANDARD.encode(format!(":{}", pat))))
    }

    /// Query parameters for a listing call. `All` sends no status filter
    /// at all; the server-side default then returns every status.
    fn list_query(status: StatusFilter) -> Vec<(&'static str, &'static str)> {
        let mut query = vec![("api-version", API_VERSION)];
        if let Some(literal) = status.as_query_value() {
            query.push(("searchCriteria.status", literal));
        }
        query
    }

    /// Fetch pull requests for the given repository.
    pub async fn get_pull_requests(
        &self,
        coordinates: &RepoCoordinates,
        status: StatusFilter,
    ) -> Result<Vec<PullRequest>> {
        let auth = self.auth_header()?;
        let url = format!(
            "{}/{}/{}/_apis/git/repositories/{}/pullrequests",
            self.base_url, coordinates.organization, coordinates.project, coordinates.repository
        );

        debug!(url = %url, status = %status, "fetching pull requests");

        let response = self
            .client
            .get(&url)
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .query(&Self::list_query(status))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let http_status = response.status();

        if !http_status.is_success() {
            let status_code = http_status.as_u16();
            warn!(status = status_code, "Azure DevOps API error response");

            return Err(match status_code {
                401 | 403 => Error::Authentication {
                    status: status_code,
                },
                404 => Error::RepositoryNotFound {
                    organization: coordinates.organization.clone(),
                    project: coordinates.project.clone(),
                    repository: coordinates.repository.clone(),
                },
                _ => Error::Api {
                    status: status_code,
                    message: response.text().await.unwrap_or_default(),
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let list: AdoPullRequestList = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        list.value.iter().map(map_pull_request).collect()
    }
}

#[async_trait]
impl PullRequestSource for AzureDevOpsClient {
    async fn list_pull_requests(
        &self,
        coordinates: &RepoCoordinates,
        status: StatusFilter,
    ) -> Result<Vec<PullRequest>> {
        self.get_pull_requests(coordinates, status).await
    }
}

// =============================================================================
// Mapping functions: ADO wire types -> shared model
// =============================================================================

fn map_pull_request(raw: &AdoPullRequest) -> Result<PullRequest> {
    let status: PrStatus = raw.status.parse()?;

    Ok(PullRequest {
        id: raw.pull_request_id,
        title: raw.title.clone(),
        description: raw.description.clone(),
        source_branch: branch_name(&raw.source_ref_name),
        target_branch: branch_name(&raw.target_ref_name),
        status,
        created_by: raw.created_by.display_name.clone(),
        creation_date: raw.creation_date,
        url: raw.url.clone(),
    })
}

/// ADO returns full refs (`refs/heads/main`); the model carries branch
/// names. Refs outside `refs/heads/` pass through unchanged.
fn branch_name(ref_name: &str) -> String {
    ref_name
        .strip_prefix("refs/heads/")
        .unwrap_or(ref_name)
        .to_string()
}
