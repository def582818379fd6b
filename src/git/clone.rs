use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Clone a git repository into `target`.
///
/// Returns `Ok(None)` without touching the filesystem when `target` already
/// exists. Otherwise performs a full clone and returns the target path.
pub fn clone_repository(url: &str, target: &Path, token: Option<&str>) -> Result<Option<PathBuf>> {
    if target.exists() {
        tracing::warn!("Clone target {} already exists, not cloning", target.display());
        return Ok(None);
    }

    tracing::info!("Cloning {} into {}", url, target.display());

    let mut callbacks = git2::RemoteCallbacks::new();
    if let Some(token) = token {
        let token = token.to_string();
        callbacks.credentials(move |_url, _username, _allowed| {
            git2::Cred::userpass_plaintext("x-access-token", &token)
        });
    }

    let mut fetch_options = git2::FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    git2::build::RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(url, target)
        .with_context(|| format!("Failed to clone {url}"))?;

    tracing::info!("Clone complete: {}", target.display());
    Ok(Some(target.to_path_buf()))
}
