//! End-to-end tests: resource URI -> router -> Azure DevOps client -> payload.
//!
//! These run the real resource handler against a mock Azure DevOps server,
//! exercising the same path a live MCP request takes.

use std::fs;
use std::sync::Arc;

use adopr_azure::AzureDevOpsClient;
use adopr_core::Settings;
use adopr_mcp::ResourceHandler;
use httpmock::prelude::*;
use tempfile::TempDir;

fn pr_json(id: u64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "pullRequestId": id,
        "title": format!("PR {}", id),
        "description": "body",
        "status": status,
        "creationDate": "2024-05-01T12:34:56Z",
        "createdBy": { "displayName": "Jane Doe", "uniqueName": "jane@example.com", "id": "abc" },
        "sourceRefName": "refs/heads/feature/x",
        "targetRefName": "refs/heads/main",
        "url": format!("https://dev.azure.com/org/_apis/git/pullRequests/{}", id)
    })
}

fn handler_for(server: &MockServer, settings: Settings) -> ResourceHandler {
    let client = AzureDevOpsClient::with_base_url(server.base_url(), Some("secret".to_string()));
    ResourceHandler::new(settings, Arc::new(client))
}

fn git_repo(url: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let git_dir = dir.path().join(".git");
    fs::create_dir(&git_dir).unwrap();
    fs::write(
        git_dir.join("config"),
        format!("[remote \"origin\"]\n\turl = {}\n", url),
    )
    .unwrap();
    dir
}

#[tokio::test]
async fn explicit_coordinates_return_active_pull_requests() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/myorg/MyProject/_apis/git/repositories/MyRepo/pullrequests")
            .query_param("searchCriteria.status", "active");
        then.status(200).json_body(serde_json::json!({
            "value": [pr_json(1, "active"), pr_json(2, "active")],
            "count": 2
        }));
    });

    let handler = handler_for(&server, Settings::default());
    let result = handler
        .read("ado://pull-requests/myorg/MyProject/MyRepo?status=active")
        .await
        .unwrap();

    mock.assert();

    let payload: serde_json::Value = serde_json::from_str(&result.contents[0].text).unwrap();
    assert_eq!(payload["organization"], "myorg");
    assert_eq!(payload["project"], "MyProject");
    assert_eq!(payload["repository"], "MyRepo");
    assert_eq!(payload["status"], "active");
    assert_eq!(payload["count"], 2);

    let prs = payload["pull_requests"].as_array().unwrap();
    assert_eq!(prs.len(), 2);
    assert!(prs.iter().all(|pr| pr["status"] == "active"));
}

#[tokio::test]
async fn all_filter_sends_no_status_parameter() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/myorg/MyProject/_apis/git/repositories/MyRepo/pullrequests")
            .query_param("api-version", "7.1");
        then.status(200).json_body(serde_json::json!({
            "value": [pr_json(1, "active"), pr_json(2, "completed")],
            "count": 2
        }));
    });

    let handler = handler_for(&server, Settings::default());
    let result = handler
        .read("ado://pull-requests/myorg/MyProject/MyRepo?status=all")
        .await
        .unwrap();

    mock.assert();

    let payload: serde_json::Value = serde_json::from_str(&result.contents[0].text).unwrap();
    assert_eq!(payload["status"], "all");
    assert_eq!(payload["count"], 2);
}

#[tokio::test]
async fn not_found_surfaces_requested_coordinates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_includes("pullrequests");
        then.status(404);
    });

    let handler = handler_for(&server, Settings::default());
    let err = handler
        .read("ado://pull-requests/myorg/MyProject/MyRepo")
        .await
        .unwrap_err();

    assert!(err.message.contains("myorg/MyProject/MyRepo"));
}

#[tokio::test]
async fn invalid_status_issues_no_http_call() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path_includes("pullrequests");
        then.status(200)
            .json_body(serde_json::json!({ "value": [], "count": 0 }));
    });

    let handler = handler_for(&server, Settings::default());
    let err = handler
        .read("ado://pull-requests/myorg/MyProject/MyRepo?status=wip")
        .await
        .unwrap_err();

    assert!(err.message.contains("wip"));
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn current_with_full_environment_bypasses_git() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/envorg/EnvProj/_apis/git/repositories/EnvRepo/pullrequests");
        then.status(200)
            .json_body(serde_json::json!({ "value": [], "count": 0 }));
    });

    // The workdir is not a git repository; the environment alone must
    // resolve the coordinates.
    let not_a_repo = TempDir::new().unwrap();
    let settings = Settings {
        organization: Some("envorg".to_string()),
        project: Some("EnvProj".to_string()),
        repository: Some("EnvRepo".to_string()),
        ..Default::default()
    };
    let handler = handler_for(&server, settings).with_workdir(not_a_repo.path());

    let result = handler.read("ado://pull-requests/current").await.unwrap();

    mock.assert();

    let payload: serde_json::Value = serde_json::from_str(&result.contents[0].text).unwrap();
    assert_eq!(payload["organization"], "envorg");
    assert_eq!(payload["project"], "EnvProj");
    assert_eq!(payload["repository"], "EnvRepo");
}

#[tokio::test]
async fn current_merges_environment_over_detected_values() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/envorg/GitProj/_apis/git/repositories/GitRepo/pullrequests");
        then.status(200)
            .json_body(serde_json::json!({ "value": [], "count": 0 }));
    });

    let repo = git_repo("https://dev.azure.com/gitorg/GitProj/_git/GitRepo");
    let settings = Settings {
        organization: Some("envorg".to_string()),
        ..Default::default()
    };
    let handler = handler_for(&server, settings).with_workdir(repo.path());

    let result = handler.read("ado://pull-requests/current").await.unwrap();

    mock.assert();

    let payload: serde_json::Value = serde_json::from_str(&result.contents[0].text).unwrap();
    assert_eq!(payload["organization"], "envorg");
    assert_eq!(payload["project"], "GitProj");
    assert_eq!(payload["repository"], "GitRepo");
}

#[tokio::test]
async fn current_outside_a_repo_reports_detection_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path_includes("pullrequests");
        then.status(200)
            .json_body(serde_json::json!({ "value": [], "count": 0 }));
    });

    let not_a_repo = TempDir::new().unwrap();
    let handler = handler_for(&server, Settings::default()).with_workdir(not_a_repo.path());

    let err = handler.read("ado://pull-requests/current").await.unwrap_err();

    assert!(err.message.contains("not a git repository"));
    assert_eq!(mock.hits(), 0);
}
