//! Resource URI parsing and coordinate resolution.
//!
//! Request URIs take the form `ado://pull-requests/{selector}?status={filter}`
//! where `{selector}` is either `current` or
//! `{organization}/{project}/{repository}`.

use std::path::Path;
use std::str::FromStr;

use adopr_core::{Error, RepoCoordinates, Result, Settings, StatusFilter};
use percent_encoding::percent_decode_str;
use tracing::debug;

/// URI prefix all pull request resources share.
pub const RESOURCE_PREFIX: &str = "ado://pull-requests/";

/// How the target repository is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Auto-detect from the caller's working directory, with environment
    /// overrides applied component by component.
    Current,
    /// Explicit organization/project/repository coordinates.
    Explicit(RepoCoordinates),
}

/// A parsed resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub selector: Selector,
    pub status: StatusFilter,
}

/// Parse a resource URI into a `ResourceRequest`.
///
/// Exactly one selector segment (`current`) or exactly three
/// (org/project/repo) are valid. The `status` query parameter defaults to
/// `active` when absent; an unrecognized literal is a request error, not a
/// silent fallback.
pub fn parse_resource_uri(uri: &str) -> Result<ResourceRequest> {
    let rest = uri
        .strip_prefix(RESOURCE_PREFIX)
        .ok_or_else(|| Error::InvalidResourceUri(uri.to_string()))?;

    let (selector_part, query) = match rest.split_once('?') {
        Some((selector, query)) => (selector, Some(query)),
        None => (rest, None),
    };

    let status = match query.and_then(status_param) {
        Some(raw) => StatusFilter::from_str(&raw)?,
        None => StatusFilter::default(),
    };

    let segments: Vec<String> = selector_part
        .split('/')
        .map(|segment| decode_segment(uri, segment))
        .collect::<Result<_>>()?;

    let selector = match segments.as_slice() {
        [single] if single == "current" => Selector::Current,
        [organization, project, repository] => Selector::Explicit(RepoCoordinates::new(
            organization.clone(),
            project.clone(),
            repository.clone(),
        )),
        _ => return Err(Error::InvalidResourceUri(uri.to_string())),
    };

    Ok(ResourceRequest { selector, status })
}

/// The first `status` query parameter value, percent-decoded. Later
/// duplicates and unknown parameters are ignored.
fn status_param(query: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key != "status" {
                return None;
            }
            Some(
                percent_decode_str(value)
                    .decode_utf8()
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string()),
            )
        })
}

/// Percent-decode one selector segment. Empty segments and segments that
/// do not decode to UTF-8 invalidate the whole URI.
fn decode_segment(uri: &str, segment: &str) -> Result<String> {
    if segment.is_empty() {
        return Err(Error::InvalidResourceUri(uri.to_string()));
    }

    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| Error::InvalidResourceUri(uri.to_string()))?
        .into_owned();

    if decoded.is_empty() {
        return Err(Error::InvalidResourceUri(uri.to_string()));
    }

    Ok(decoded)
}

/// Resolve a selector into full coordinates.
///
/// Explicit coordinates pass through unchanged. For `current`, environment
/// values take precedence over git-derived values component by component;
/// when the environment supplies all three, git detection is bypassed
/// entirely. Detection errors propagate only when detection was needed.
pub fn resolve_coordinates(
    selector: Selector,
    settings: &Settings,
    workdir: &Path,
) -> Result<RepoCoordinates> {
    match selector {
        Selector::Explicit(coordinates) => Ok(coordinates),
        Selector::Current => {
            if let (Some(organization), Some(project), Some(repository)) = (
                settings.organization.as_ref(),
                settings.project.as_ref(),
                settings.repository.as_ref(),
            ) {
                debug!("environment supplies full coordinates, skipping git detection");
                return Ok(RepoCoordinates::new(
                    organization.clone(),
                    project.clone(),
                    repository.clone(),
                ));
            }

            let detected = adopr_git::detect(workdir)?;

            Ok(RepoCoordinates {
                organization: settings
                    .organization
                    .clone()
                    .unwrap_or(detected.organization),
                project: settings.project.clone().unwrap_or(detected.project),
                repository: settings.repository.clone().unwrap_or(detected.repository),
            })
        }
    }
}
