//! Provider trait for pull request sources.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PullRequest, RepoCoordinates, StatusFilter};

/// A backend that can list pull requests for a repository.
///
/// The MCP layer depends on this seam rather than on a concrete HTTP
/// client, so handler tests can substitute an in-process fake.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// List pull requests for the given repository, narrowed by `status`.
    ///
    /// Issues exactly one request; whatever page the backend returns by
    /// default is the result.
    async fn list_pull_requests(
        &self,
        coordinates: &RepoCoordinates,
        status: StatusFilter,
    ) -> Result<Vec<PullRequest>>;
}
