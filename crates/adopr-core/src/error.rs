//! Error types for adopr-tools.

use thiserror::Error;

/// Main error type for adopr operations.
///
/// Every component fails with the most specific variant available; nothing
/// substitutes a default on error. The MCP resource handler is the only
/// place these are translated into protocol-level error responses.
#[derive(Error, Debug)]
pub enum Error {
    /// The given directory is not inside a git work tree
    #[error("not a git repository (no .git found from '{0}' upward)")]
    NotAGitRepository(String),

    /// The repository has no remote named `origin`
    #[error("no remote named 'origin' found in the git configuration")]
    NoRemoteFound,

    /// The origin remote URL matches no known Azure DevOps format
    #[error("unrecognized remote URL format: '{0}'")]
    UnrecognizedRemoteFormat(String),

    /// The resource URI does not follow `ado://pull-requests/{selector}`
    #[error("invalid resource URI: '{0}'")]
    InvalidResourceUri(String),

    /// The status query parameter is not a recognized literal
    #[error("invalid status filter '{0}' (expected one of: active, completed, abandoned, all)")]
    InvalidStatusFilter(String),

    /// No personal access token available for an authenticated call
    #[error("missing credential: set the AZURE_DEVOPS_PAT environment variable")]
    MissingCredential,

    /// Azure DevOps rejected the credential (401/403)
    #[error("authentication failed (HTTP {status}): check the personal access token and its scopes")]
    Authentication { status: u16 },

    /// Azure DevOps returned 404; the missing piece may be the
    /// organization, the project, or the repository
    #[error("repository not found: {organization}/{project}/{repository}")]
    RepositoryNotFound {
        organization: String,
        project: String,
        repository: String,
    },

    /// Any other non-2xx API response
    #[error("Azure DevOps API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network-level failure (DNS, connection refused, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The API response body could not be mapped into the data model
    #[error("malformed API response: {0}")]
    MalformedResponse(String),
}

/// Result type alias for adopr operations.
pub type Result<T> = std::result::Result<T, Error>;
