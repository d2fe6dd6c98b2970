use std::cmp::Ordering;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use which::which;

use crate::config::PackageManager;

/// Minimum supported Node.js major version.
pub const MIN_NODE_MAJOR: u64 = 10;

#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("Node.js was not found on PATH. Node {MIN_NODE_MAJOR}.* or above is required.")]
    NodeMissing,
    #[error("could not parse a Node version out of `node --version` output {output:?}")]
    UnparseableNodeVersion { output: String },
    #[error(
        "Your current Node version is {found}. Your Node version must be {MIN_NODE_MAJOR}.* or above."
    )]
    UnsupportedNodeVersion { found: String },
    #[error("{name} was not found on PATH")]
    MissingTool { name: &'static str },
    #[error("That project already exists.")]
    TargetExists,
}

/// Query `node --version` and reject anything below the supported floor.
pub fn check_node_version() -> Result<(), PreconditionError> {
    let output = Command::new("node")
        .arg("--version")
        .output()
        .map_err(|_| PreconditionError::NodeMissing)?;

    if !output.status.success() {
        return Err(PreconditionError::NodeMissing);
    }

    let reported = String::from_utf8_lossy(&output.stdout).trim().to_string();
    check_reported_version(&reported)
}

fn check_reported_version(reported: &str) -> Result<(), PreconditionError> {
    let version =
        parse_node_version(reported).ok_or_else(|| PreconditionError::UnparseableNodeVersion {
            output: reported.to_string(),
        })?;

    if compare_versions(&version, &[MIN_NODE_MAJOR]) == Ordering::Less {
        return Err(PreconditionError::UnsupportedNodeVersion {
            found: reported.to_string(),
        });
    }

    Ok(())
}

/// Reject a run whose chosen package manager is not installed.
pub fn check_package_manager(manager: PackageManager) -> Result<(), PreconditionError> {
    if which(manager.binary()).is_err() {
        return Err(PreconditionError::MissingTool {
            name: manager.binary(),
        });
    }
    Ok(())
}

/// Reject a run whose target path already exists.
pub fn check_target_absent(target: &Path) -> Result<(), PreconditionError> {
    if target.exists() {
        return Err(PreconditionError::TargetExists);
    }
    Ok(())
}

fn parse_node_version(raw: &str) -> Option<Vec<u64>> {
    let trimmed = raw.trim().trim_start_matches('v');
    let mut parts = Vec::new();
    for part in trimmed.split('.') {
        parts.push(part.trim().parse::<u64>().ok()?);
    }
    Some(parts)
}

fn compare_versions(a: &[u64], b: &[u64]) -> Ordering {
    let max_len = a.len().max(b.len());
    for i in 0..max_len {
        let left = *a.get(i).unwrap_or(&0);
        let right = *b.get(i).unwrap_or(&0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
