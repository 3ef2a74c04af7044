//! Remote URL pattern matchers.
//!
//! Azure DevOps produces four remote URL shapes; each gets a pure matcher
//! function, tried in a fixed priority order. The first match wins.

use adopr_core::{Error, RepoCoordinates, Result};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

/// Coordinates parsed out of a single remote URL.
///
/// Ephemeral: produced and consumed within one detection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemoteInfo {
    pub raw_url: String,
    pub organization: String,
    pub project: String,
    pub repository: String,
}

impl GitRemoteInfo {
    pub fn into_coordinates(self) -> RepoCoordinates {
        RepoCoordinates {
            organization: self.organization,
            project: self.project,
            repository: self.repository,
        }
    }
}

// https://{org}@dev.azure.com/{org}/{project}/_git/{repo} — the userinfo
// part is optional; some clients clone without it.
static HTTPS_MODERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(?:[^@/]+@)?dev\.azure\.com/([^/]+)/([^/]+)/_git/([^/]+?)(?:\.git)?/?$")
        .unwrap()
});

// https://{org}.visualstudio.com/{project}/_git/{repo}
static HTTPS_LEGACY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://([^./@]+)\.visualstudio\.com/([^/]+)/_git/([^/]+?)(?:\.git)?/?$")
        .unwrap()
});

// git@ssh.dev.azure.com:v3/{org}/{project}/{repo}
static SSH_MODERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@ssh\.dev\.azure\.com:v3/([^/]+)/([^/]+)/([^/]+?)(?:\.git)?$").unwrap()
});

// {org}@vs-ssh.visualstudio.com:v3/{org}/{project}/{repo} — the path
// components are authoritative, the userinfo is ignored.
static SSH_LEGACY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@]+@vs-ssh\.visualstudio\.com:v3/([^/]+)/([^/]+)/([^/]+?)(?:\.git)?$")
        .unwrap()
});

type Matcher = fn(&str) -> Option<GitRemoteInfo>;

/// Matchers in priority order; modern forms are tried before legacy ones.
const MATCHERS: &[Matcher] = &[
    match_https_modern,
    match_https_legacy,
    match_ssh_modern,
    match_ssh_legacy,
];

fn match_https_modern(url: &str) -> Option<GitRemoteInfo> {
    let caps = HTTPS_MODERN.captures(url)?;
    remote_info(url, &caps[1], &caps[2], &caps[3])
}

fn match_https_legacy(url: &str) -> Option<GitRemoteInfo> {
    let caps = HTTPS_LEGACY.captures(url)?;
    remote_info(url, &caps[1], &caps[2], &caps[3])
}

fn match_ssh_modern(url: &str) -> Option<GitRemoteInfo> {
    let caps = SSH_MODERN.captures(url)?;
    remote_info(url, &caps[1], &caps[2], &caps[3])
}

fn match_ssh_legacy(url: &str) -> Option<GitRemoteInfo> {
    let caps = SSH_LEGACY.captures(url)?;
    remote_info(url, &caps[1], &caps[2], &caps[3])
}

/// Percent-decode the matched components. A component that does not decode
/// to valid UTF-8 rejects the match.
fn remote_info(url: &str, org: &str, project: &str, repo: &str) -> Option<GitRemoteInfo> {
    Some(GitRemoteInfo {
        raw_url: url.to_string(),
        organization: decode(org)?,
        project: decode(project)?,
        repository: decode(repo)?,
    })
}

fn decode(component: &str) -> Option<String> {
    percent_decode_str(component)
        .decode_utf8()
        .ok()
        .map(|c| c.into_owned())
}

/// Parse a remote URL into `GitRemoteInfo`.
///
/// Tries every known Azure DevOps URL shape in priority order; a URL that
/// matches none of them fails with `UnrecognizedRemoteFormat` carrying the
/// raw URL for diagnostics.
pub fn parse_remote_url(url: &str) -> Result<GitRemoteInfo> {
    let url = url.trim();

    MATCHERS
        .iter()
        .find_map(|matcher| matcher(url))
        .ok_or_else(|| Error::UnrecognizedRemoteFormat(url.to_string()))
}
