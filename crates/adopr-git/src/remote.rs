//! Locating the git repository and reading the origin remote URL.

use std::fs;
use std::path::{Path, PathBuf};

use adopr_core::{Error, Result};
use tracing::debug;

use crate::matchers::{parse_remote_url, GitRemoteInfo};

/// Detect Azure DevOps coordinates for the repository enclosing `start`.
///
/// Walks up from `start` to find the `.git` directory, reads the `origin`
/// remote URL from the repository config, and parses it. Read-only
/// filesystem access; no subprocess, no network.
pub fn detect(start: &Path) -> Result<GitRemoteInfo> {
    let config_path = find_git_config(start)?;

    debug!(config = %config_path.display(), "reading git config");

    let contents = fs::read_to_string(&config_path).map_err(|e| {
        debug!(error = %e, "git config unreadable");
        Error::NoRemoteFound
    })?;

    let url = origin_url(&contents).ok_or(Error::NoRemoteFound)?;

    let info = parse_remote_url(&url)?;
    debug!(
        url = %info.raw_url,
        organization = %info.organization,
        project = %info.project,
        repository = %info.repository,
        "detected Azure DevOps remote"
    );

    Ok(info)
}

/// Walk ancestors of `start` looking for `.git` and return the path of the
/// repository config file.
///
/// `.git` is normally a directory, but worktrees and submodules use a
/// `.git` file holding a `gitdir: <path>` pointer; both are recognized.
fn find_git_config(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        let dot_git = dir.join(".git");

        if dot_git.is_dir() {
            return Ok(dot_git.join("config"));
        }

        if dot_git.is_file() {
            if let Some(git_dir) = read_gitdir_pointer(&dot_git, dir) {
                return Ok(git_dir.join("config"));
            }
        }
    }

    Err(Error::NotAGitRepository(start.display().to_string()))
}

/// Resolve a `.git` file's `gitdir:` pointer, relative to the directory
/// containing the file.
fn read_gitdir_pointer(dot_git_file: &Path, base: &Path) -> Option<PathBuf> {
    let contents = fs::read_to_string(dot_git_file).ok()?;
    let target = contents.strip_prefix("gitdir:")?.trim();

    let path = Path::new(target);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(base.join(path))
    }
}

/// Extract the `url` of the `origin` remote from git config contents.
///
/// Git config is INI-like: sections in brackets, `key = value` lines.
/// Only the `[remote "origin"]` section is consulted.
fn origin_url(config: &str) -> Option<String> {
    let mut in_origin = false;

    for line in config.lines() {
        let line = line.trim();

        if line.starts_with('[') {
            in_origin = is_origin_section(line);
            continue;
        }

        if !in_origin {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "url" {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

fn is_origin_section(header: &str) -> bool {
    let inner = header.trim_start_matches('[').trim_end_matches(']').trim();

    match inner.split_once(char::is_whitespace) {
        Some((kind, name)) => {
            kind == "remote" && name.trim().trim_matches('"') == "origin"
        }
        None => false,
    }
}
