//! Azure DevOps REST API client.
//!
//! Issues the authenticated "list pull requests" call and maps the raw
//! JSON payload into the shared data model. One request per call; no
//! retries, no pagination.

mod client;
mod types;

pub use client::AzureDevOpsClient;

/// Default Azure DevOps service URL.
pub const DEFAULT_AZURE_DEVOPS_URL: &str = "https://dev.azure.com";

/// Pinned REST API version.
pub const API_VERSION: &str = "7.1";
