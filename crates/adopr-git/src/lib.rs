//! Azure DevOps coordinate detection from local git remotes.
//!
//! Given a working directory, this crate locates the enclosing git
//! repository, reads the `origin` remote URL from its configuration, and
//! parses the URL into organization/project/repository coordinates. All
//! access is read-only filesystem access; no subprocess, no network.

mod matchers;
mod remote;

pub use matchers::{parse_remote_url, GitRemoteInfo};
pub use remote::detect;
