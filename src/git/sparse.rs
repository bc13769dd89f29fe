//! Sparse clone pipeline
//!
//! Sequences the fixed set of `git` invocations that fetch a single
//! branch (optionally narrowed to one subdirectory) at depth 1. The
//! network-facing clone runs with inherited stdio so credential helpers,
//! SSH passphrase prompts and git's own progress output reach the
//! terminal; the local sparse-checkout commands capture stderr for
//! error reporting.

use crate::error::SliceError;
use crate::git::RemoteRef;
use anyhow::{Context as _, Result};
use core::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::debug;

/// Performs a shallow sparse clone of a single branch
#[non_exhaustive]
pub struct SparseClone {
    pub remote: RemoteRef,
    /// Branch override from the CLI; falls back to the branch parsed
    /// from the URL, then to the remote default
    pub branch: Option<String>,
    staging: TempDir,
}

impl SparseClone {
    /// Create a new sparse clone operation
    ///
    /// The staging directory is created inside `staging_parent` so the
    /// final rename into the output directory stays on one filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The staging directory cannot be created
    #[inline]
    pub fn new(remote: RemoteRef, branch: Option<String>, staging_parent: &Path) -> Result<Self> {
        let staging = tempfile::Builder::new()
            .prefix(".gitslice-")
            .tempdir_in(staging_parent)
            .context("Failed to create staging directory for Git operations")?;

        Ok(Self {
            remote,
            branch,
            staging,
        })
    }

    /// The branch handed to `git clone --branch`, if any
    #[must_use]
    pub fn effective_branch(&self) -> Option<&str> {
        self.branch.as_deref().or(self.remote.branch.as_deref())
    }

    /// Execute the sparse clone pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository cannot be cloned
    /// - The sparse checkout cannot be initialized
    /// - The sparse checkout patterns cannot be set or disabled
    #[inline]
    pub fn execute(&self) -> Result<PathBuf> {
        let staging_path = self.staging.path();

        debug!("Executing sparse clone into: {staging_path:?}");
        // Step 1: Shallow clone, blobs filtered, sparse worktree
        self.clone_repository(staging_path)?;

        debug!("Repository cloned");

        if let Some(subdir) = self.remote.subdir.as_deref() {
            // Step 2: Narrow the worktree to the requested subdirectory
            debug!("Narrowing sparse checkout to: {subdir}");
            Self::init_sparse_checkout(staging_path)?;
            self.set_sparse_patterns(staging_path, subdir)?;
        } else {
            // Step 2 (whole tree): materialize everything
            debug!("Disabling sparse checkout for full tree");
            Self::disable_sparse_checkout(staging_path)?;
        }

        let result_path = match self.remote.subdir.as_deref() {
            Some(subdir) => staging_path.join(subdir),
            None => staging_path.to_path_buf(),
        };
        debug!("Checked out content at: {result_path:?}");

        Ok(result_path)
    }

    /// Clone the repository with inherited stdio
    fn clone_repository(&self, staging_path: &Path) -> Result<()> {
        let args = build_clone_args(
            &self.remote,
            self.effective_branch(),
            staging_path.to_str().ok_or_else(|| {
                anyhow::anyhow!("Failed to convert staging path to string")
            })?,
        );

        debug!("git {}", args.join(" "));

        // status() inherits stdin/stdout/stderr: auth prompts and git's
        // progress output go straight to the user's terminal
        let status = Command::new("git")
            .args(&args)
            .status()
            .context("Failed to execute git clone command")?;

        if !status.success() {
            return Err(SliceError::git(format!(
                "Failed to clone repository '{}' (git clone exited with {})",
                self.remote.original_url(),
                status
            ))
            .into());
        }

        Ok(())
    }

    /// Initialize sparse checkout configuration
    fn init_sparse_checkout(staging_path: &Path) -> Result<()> {
        let output = Command::new("git")
            .args(["sparse-checkout", "init", "--cone"])
            .current_dir(staging_path)
            .output()
            .context("Failed to execute git sparse-checkout init")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SliceError::git(format!(
                "Failed to initialize sparse checkout: {}",
                stderr.trim()
            ))
            .into());
        }

        Ok(())
    }

    /// Set sparse checkout patterns
    fn set_sparse_patterns(&self, staging_path: &Path, subdir: &str) -> Result<()> {
        let output = Command::new("git")
            .args(["sparse-checkout", "set", subdir])
            .current_dir(staging_path)
            .output()
            .context("Failed to execute git sparse-checkout set")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SliceError::git(format!(
                "Failed to set sparse checkout patterns: {}",
                stderr.trim()
            ))
            .into());
        }

        Ok(())
    }

    /// Disable sparse checkout, materializing the full tree
    fn disable_sparse_checkout(staging_path: &Path) -> Result<()> {
        let output = Command::new("git")
            .args(["sparse-checkout", "disable"])
            .current_dir(staging_path)
            .output()
            .context("Failed to execute git sparse-checkout disable")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SliceError::git(format!(
                "Failed to disable sparse checkout: {}",
                stderr.trim()
            ))
            .into());
        }

        Ok(())
    }

    /// Get the path to the staging directory
    #[must_use]
    #[inline]
    pub fn staging_path(&self) -> &Path {
        self.staging.path()
    }

    /// Check if the requested subdirectory exists after checkout
    #[must_use]
    #[inline]
    pub fn subdir_exists(&self) -> bool {
        match self.remote.subdir.as_deref() {
            Some(subdir) => self.staging.path().join(subdir).exists(),
            None => true,
        }
    }

    /// Persist the staging clone, taking ownership of its path
    ///
    /// Used for whole-tree fetches where the staging directory itself
    /// becomes the output. The caller is responsible for the directory
    /// from this point on.
    #[must_use]
    #[inline]
    pub fn persist(self) -> PathBuf {
        self.staging.keep()
    }

    /// Describe what was actually checked out, for the error shown when
    /// `subdir_exists()` returns false
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The diagnostics string cannot be built
    #[inline]
    pub fn checkout_diagnostics(&self) -> Result<String> {
        use std::fs;
        let staging_path = self.staging.path();
        let mut diagnostics = String::new();

        writeln!(
            diagnostics,
            "Sparse clone diagnostics:\n  Repository: {}\n  Branch: {}\n  Requested path: {}\n",
            self.remote.original_url(),
            self.effective_branch().unwrap_or("(remote default)"),
            self.remote.subdir.as_deref().unwrap_or("(whole tree)")
        )?;

        writeln!(diagnostics, "  Staging directory: {}", staging_path.display())?;

        // List what was actually checked out
        diagnostics.push_str("  Checked out entries:\n");
        if let Ok(entries) = fs::read_dir(staging_path) {
            let mut found_items = Vec::new();
            for entry in entries.flatten() {
                if let Ok(file_name) = entry.file_name().into_string() {
                    // Skip .git directory
                    if file_name != ".git" {
                        found_items.push(file_name);
                    }
                }
            }

            if found_items.is_empty() {
                writeln!(diagnostics, "    (empty - nothing was checked out)")?;
            } else {
                for item in found_items {
                    writeln!(diagnostics, "    - {item}")?;
                }
            }
        } else {
            writeln!(diagnostics, "    (unable to read directory)")?;
        }

        Ok(diagnostics)
    }
}

/// Build the argument vector for the clone step
#[must_use]
pub fn build_clone_args(remote: &RemoteRef, branch: Option<&str>, dest: &str) -> Vec<String> {
    let mut args = vec![
        "clone".to_owned(),
        "--depth".to_owned(),
        "1".to_owned(),
        "--filter=blob:none".to_owned(),
        "--sparse".to_owned(),
    ];

    if let Some(branch) = branch {
        args.push("--branch".to_owned());
        args.push(branch.to_owned());
    }

    args.push(remote.clone_url());
    args.push(dest.to_owned());

    args
}

/// Check if Git is available and meets minimum version requirements
///
/// # Errors
///
/// Returns an error if:
/// - The Git command is not found
/// - The Git command failed to execute properly
/// - The Git version is too old
#[inline]
pub fn check_git_availability() -> Result<()> {
    let output = Command::new("git")
        .args(["--version"])
        .output()
        .context("Git command not found. Please ensure Git is installed and available in PATH")?;

    if !output.status.success() {
        return Err(SliceError::git("Git command failed to execute properly".to_owned()).into());
    }

    let version_output = String::from_utf8_lossy(&output.stdout);

    // Extract version number and check if it meets requirements
    // Git sparse-checkout --cone requires Git 2.25+
    if let Some(version_part) = version_output.split_whitespace().nth(2)
        && let Ok(version) = parse_git_version(version_part)
        && version < (2, 25, 0)
    {
        return Err(SliceError::git(format!(
            "Git version {version_part} is too old. gitslice requires Git 2.25.0 or later for sparse checkout support"
        ))
        .into());
    }

    Ok(())
}

/// Parse Git version string into tuple (major, minor, patch)
///
/// # Errors
///
/// Returns an error if:
/// - The version string is invalid
#[inline]
pub fn parse_git_version(version: &str) -> Result<(u32, u32, u32)> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() >= 3 {
        let major = parts[0].parse().context("Invalid major version")?;
        let minor = parts[1].parse().context("Invalid minor version")?;
        let patch = parts[2].parse().context("Invalid patch version")?;
        Ok((major, minor, patch))
    } else {
        Err(anyhow::anyhow!("Invalid version format"))
    }
}
