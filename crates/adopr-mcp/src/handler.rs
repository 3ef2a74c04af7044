//! Resource handler: the MCP-facing entry point.
//!
//! Orchestrates URI parsing, coordinate resolution, the API call, and
//! response serialization. This is the sole boundary where internal error
//! kinds become protocol-level error responses.

use std::path::PathBuf;
use std::sync::Arc;

use adopr_core::{Error, PullRequestListing, PullRequestSource, Settings};
use tracing::{info, warn};

use crate::protocol::{
    JsonRpcError, ReadResourceResult, ResourceContent, ResourceDefinition,
    ResourceTemplateDefinition,
};
use crate::router::{parse_resource_uri, resolve_coordinates, RESOURCE_PREFIX};

const PAYLOAD_MIME_TYPE: &str = "application/json";

/// Handles MCP resource requests for pull request listings.
pub struct ResourceHandler {
    settings: Settings,
    source: Arc<dyn PullRequestSource>,
    workdir: PathBuf,
}

impl ResourceHandler {
    /// Create a handler resolving `current` against the process working
    /// directory.
    pub fn new(settings: Settings, source: Arc<dyn PullRequestSource>) -> Self {
        let workdir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            settings,
            source,
            workdir,
        }
    }

    /// Override the directory `current` detection starts from (tests).
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Concrete resources for resources/list.
    pub fn available_resources(&self) -> Vec<ResourceDefinition> {
        vec![ResourceDefinition {
            uri: format!("{}current", RESOURCE_PREFIX),
            name: "Current repository pull requests".to_string(),
            description:
                "Pull requests for the Azure DevOps repository detected from the local git remote \
                 (status defaults to active; pass ?status=active|completed|abandoned|all)"
                    .to_string(),
            mime_type: PAYLOAD_MIME_TYPE.to_string(),
        }]
    }

    /// Parameterized resources for resources/templates/list.
    pub fn available_templates(&self) -> Vec<ResourceTemplateDefinition> {
        vec![ResourceTemplateDefinition {
            uri_template: format!("{}{{organization}}/{{project}}/{{repository}}", RESOURCE_PREFIX),
            name: "Repository pull requests".to_string(),
            description:
                "Pull requests for an explicit Azure DevOps repository \
                 (status defaults to active; pass ?status=active|completed|abandoned|all)"
                    .to_string(),
            mime_type: PAYLOAD_MIME_TYPE.to_string(),
        }]
    }

    /// Serve a resources/read request.
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult, JsonRpcError> {
        let result = self.read_inner(uri).await;

        result.map_err(|err| {
            warn!(uri = uri, error = %err, "resource read failed");
            translate_error(&err)
        })
    }

    async fn read_inner(&self, uri: &str) -> adopr_core::Result<ReadResourceResult> {
        let request = parse_resource_uri(uri)?;
        let coordinates = resolve_coordinates(request.selector, &self.settings, &self.workdir)?;

        info!(
            coordinates = %coordinates,
            status = %request.status,
            "listing pull requests"
        );

        let pull_requests = self
            .source
            .list_pull_requests(&coordinates, request.status)
            .await?;

        let listing = PullRequestListing::new(&coordinates, request.status, pull_requests);
        let text = serde_json::to_string_pretty(&listing)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: PAYLOAD_MIME_TYPE.to_string(),
                text,
            }],
        })
    }
}

/// Map an internal error kind onto a JSON-RPC error. Request-shape errors
/// are invalid params; everything downstream is an internal error. The
/// message keeps whatever context the error carries (URI, remote URL,
/// coordinates).
fn translate_error(err: &Error) -> JsonRpcError {
    match err {
        Error::InvalidResourceUri(_) | Error::InvalidStatusFilter(_) => {
            JsonRpcError::invalid_params(&err.to_string())
        }
        _ => JsonRpcError::internal_error(&err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adopr_core::{
        PrStatus, PullRequest, RepoCoordinates, Result as CoreResult, StatusFilter,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-process fake source recording the calls it receives.
    struct FakeSource {
        response: Mutex<Option<CoreResult<Vec<PullRequest>>>>,
        calls: Mutex<Vec<(RepoCoordinates, StatusFilter)>>,
    }

    impl FakeSource {
        fn returning(response: CoreResult<Vec<PullRequest>>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(response)),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(RepoCoordinates, StatusFilter)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PullRequestSource for FakeSource {
        async fn list_pull_requests(
            &self,
            coordinates: &RepoCoordinates,
            status: StatusFilter,
        ) -> CoreResult<Vec<PullRequest>> {
            self.calls
                .lock()
                .unwrap()
                .push((coordinates.clone(), status));
            self.response.lock().unwrap().take().unwrap()
        }
    }

    fn sample_pr() -> PullRequest {
        PullRequest {
            id: 7,
            title: "Fix bug".to_string(),
            description: None,
            source_branch: "fix/bug".to_string(),
            target_branch: "main".to_string(),
            status: PrStatus::Active,
            created_by: "Jane Doe".to_string(),
            creation_date: "2024-05-01T12:34:56Z".parse().unwrap(),
            url: "https://dev.azure.com/org/_apis/git/pullRequests/7".to_string(),
        }
    }

    fn handler(source: Arc<FakeSource>) -> ResourceHandler {
        let settings = Settings {
            pat: Some("secret".to_string()),
            ..Default::default()
        };
        // Workdir never consulted for explicit selectors.
        ResourceHandler::new(settings, source).with_workdir("/nonexistent")
    }

    #[tokio::test]
    async fn test_read_explicit_coordinates() {
        let source = FakeSource::returning(Ok(vec![sample_pr()]));
        let result = handler(source.clone())
            .read("ado://pull-requests/myorg/MyProject/MyRepo?status=active")
            .await
            .unwrap();

        assert_eq!(result.contents.len(), 1);
        let content = &result.contents[0];
        assert_eq!(content.mime_type, "application/json");
        assert_eq!(
            content.uri,
            "ado://pull-requests/myorg/MyProject/MyRepo?status=active"
        );

        let payload: serde_json::Value = serde_json::from_str(&content.text).unwrap();
        assert_eq!(payload["organization"], "myorg");
        assert_eq!(payload["status"], "active");
        assert_eq!(payload["count"], 1);
        assert_eq!(payload["pull_requests"][0]["id"], 7);

        let calls = source.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (
                RepoCoordinates::new("myorg", "MyProject", "MyRepo"),
                StatusFilter::Active
            )
        );
    }

    #[tokio::test]
    async fn test_invalid_uri_is_invalid_params_and_no_call() {
        let source = FakeSource::returning(Ok(vec![]));
        let err = handler(source.clone())
            .read("ado://pull-requests/only/two")
            .await
            .unwrap_err();

        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);
        assert!(err.message.contains("ado://pull-requests/only/two"));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_status_is_invalid_params_and_no_call() {
        let source = FakeSource::returning(Ok(vec![]));
        let err = handler(source.clone())
            .read("ado://pull-requests/a/b/c?status=merged")
            .await
            .unwrap_err();

        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);
        assert!(err.message.contains("merged"));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repository_not_found_surfaces_coordinates() {
        let source = FakeSource::returning(Err(Error::RepositoryNotFound {
            organization: "myorg".to_string(),
            project: "MyProject".to_string(),
            repository: "MyRepo".to_string(),
        }));

        let err = handler(source)
            .read("ado://pull-requests/myorg/MyProject/MyRepo")
            .await
            .unwrap_err();

        assert_eq!(err.code, JsonRpcError::INTERNAL_ERROR);
        assert!(err.message.contains("myorg/MyProject/MyRepo"));
    }

    #[tokio::test]
    async fn test_current_without_git_repo_fails() {
        let source = FakeSource::returning(Ok(vec![]));
        let dir = tempfile::TempDir::new().unwrap();
        let settings = Settings {
            pat: Some("secret".to_string()),
            ..Default::default()
        };
        let handler =
            ResourceHandler::new(settings, source.clone()).with_workdir(dir.path());

        let err = handler.read("ado://pull-requests/current").await.unwrap_err();

        assert_eq!(err.code, JsonRpcError::INTERNAL_ERROR);
        assert!(err.message.contains("not a git repository"));
        assert!(source.calls().is_empty());
    }

    #[test]
    fn test_resource_listings() {
        let source = FakeSource::returning(Ok(vec![]));
        let handler = handler(source);

        let resources = handler.available_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].uri, "ado://pull-requests/current");

        let templates = handler.available_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(
            templates[0].uri_template,
            "ado://pull-requests/{organization}/{project}/{repository}"
        );
    }
}
