use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{RankError, Result};

/// Whether `source` should be cloned rather than read from disk.
pub fn is_remote_url(source: &str) -> bool {
    source.starts_with("https://")
        || source.starts_with("http://")
        || source.starts_with("ssh://")
        || source.starts_with("git://")
        || source.starts_with("git@")
}

/// Local checkout directory for a repository URL: `<name>-<hash8>`.
pub fn checkout_dir(repos_dir: &Path, url: &str) -> PathBuf {
    let trimmed = url.trim_end_matches('/');
    let name = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed)
        .trim_end_matches(".git");
    let name = if name.is_empty() { "repo" } else { name };

    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = format!("{:x}", hasher.finalize());

    repos_dir.join(format!("{}-{}", name, &digest[..8]))
}

/// Produce a local directory holding the source tree for `source`.
///
/// Existing local directories are used in place. Remote URLs are cloned
/// into `repos_dir` once; later calls reuse the checkout without fetching.
pub fn acquire(source: &str, repos_dir: &Path) -> Result<PathBuf> {
    let local = Path::new(source);
    if !is_remote_url(source) {
        if local.is_dir() {
            tracing::info!("Indexing local directory {}", local.display());
            return Ok(local.to_path_buf());
        }
        return Err(RankError::Clone(format!(
            "{} is neither a repository URL nor a directory",
            source
        )));
    }

    let target = checkout_dir(repos_dir, source);
    if target.exists() {
        tracing::info!("Using existing repository at {}", target.display());
        return Ok(target);
    }

    clone_repo(source, &target)?;
    Ok(target)
}

fn clone_repo(url: &str, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("Cloning {} into {}", url, target.display());
    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(target)
        .output()
        .map_err(|e| RankError::Clone(format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RankError::Clone(format!(
            "git clone {} failed: {}",
            url,
            stderr.trim()
        )));
    }

    tracing::info!("Clone complete: {}", target.display());
    Ok(())
}
