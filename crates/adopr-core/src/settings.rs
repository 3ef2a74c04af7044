//! Environment-backed configuration.
//!
//! `Settings` is constructed once at process start and passed by reference
//! into the components that need it; there is no ambient global state.
//! Coordinate values are optional defaults — a missing organization,
//! project, or repository can still be filled in by git remote detection.
//! The personal access token is only checked at the point a live API call
//! needs it.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable holding the personal access token.
pub const ENV_PAT: &str = "AZURE_DEVOPS_PAT";
/// Environment variable holding the default organization.
pub const ENV_ORGANIZATION: &str = "ADO_ORGANIZATION";
/// Environment variable holding the default project.
pub const ENV_PROJECT: &str = "ADO_PROJECT";
/// Environment variable holding the default repository.
pub const ENV_REPOSITORY: &str = "ADO_REPOSITORY";

/// Process configuration, read from the environment once at startup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Settings {
    /// Personal access token; required for any live API call.
    #[serde(skip_serializing)]
    pub pat: Option<String>,
    /// Default/override organization.
    pub organization: Option<String>,
    /// Default/override project.
    pub project: Option<String>,
    /// Default/override repository.
    pub repository: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    ///
    /// Tests use this to avoid mutating the process environment. Empty
    /// values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let settings = Self {
            pat: get(ENV_PAT),
            organization: get(ENV_ORGANIZATION),
            project: get(ENV_PROJECT),
            repository: get(ENV_REPOSITORY),
        };

        debug!(
            has_pat = settings.pat.is_some(),
            organization = ?settings.organization,
            project = ?settings.project,
            repository = ?settings.repository,
            "settings resolved"
        );

        settings
    }

    /// The personal access token, or `MissingCredential` if unset.
    pub fn token(&self) -> Result<&str> {
        self.pat.as_deref().ok_or(Error::MissingCredential)
    }

    /// Whether all three coordinate overrides are present, letting the
    /// router skip git detection entirely.
    pub fn has_full_coordinates(&self) -> bool {
        self.organization.is_some() && self.project.is_some() && self.repository.is_some()
    }
}
