//! Core types, error handling, and configuration for adopr-tools.
//!
//! This crate provides the foundational abstractions shared by the git
//! detector, the Azure DevOps client, and the MCP layer.

pub mod error;
pub mod provider;
pub mod settings;
pub mod types;

pub use error::{Error, Result};
pub use provider::PullRequestSource;
pub use settings::Settings;
pub use types::{PrStatus, PullRequest, PullRequestListing, RepoCoordinates, StatusFilter};
