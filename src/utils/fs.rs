//! File system utilities

use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Safely remove directory and all its contents
pub fn remove_dir_safe(system: &dyn System, dir_path: &Path) -> Result<()> {
    if system.exists(dir_path) && system.is_dir(dir_path) {
        system
            .remove_dir_all(dir_path)
            .with_context(|| format!("Failed to remove directory: {}", dir_path.display()))?;
    }
    Ok(())
}

/// Remove the `.git` directory from a checked out tree, if present
pub fn strip_git_dir(system: &dyn System, tree_path: &Path) -> Result<()> {
    let git_dir = tree_path.join(".git");
    if system.is_dir(&git_dir) {
        system
            .remove_dir_all(&git_dir)
            .with_context(|| format!("Failed to remove Git metadata: {}", git_dir.display()))?;
    }
    Ok(())
}
