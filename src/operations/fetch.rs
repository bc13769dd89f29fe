//! Fetch operation coordination

use crate::cli::Args;
use crate::error::SliceError;
use crate::git::sparse::build_clone_args;
use crate::git::{RemoteRef, SparseClone, check_git_availability};
use crate::system::System;
use crate::utils::fs::{remove_dir_safe, strip_git_dir};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Coordinates the complete fetch operation
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "FetchOperation")]
pub struct FetchOperation<'src> {
    remote: RemoteRef,
    branch: Option<String>,
    output: PathBuf,
    keep_git: bool,
    dry_run: bool,
    system: &'src dyn System,
}

impl core::fmt::Debug for FetchOperation<'_> {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FetchOperation")
            .field("remote", &self.remote)
            .field("branch", &self.branch)
            .field("output", &self.output)
            .field("keep_git", &self.keep_git)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'src> FetchOperation<'src> {
    /// Create a new fetch operation from CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL does not match a supported shape
    /// - The output directory already exists
    /// - Git availability check fails
    #[inline]
    pub fn new(args: &Args, system: &'src dyn System) -> Result<Self> {
        let remote = RemoteRef::parse(&args.url)?;

        let output = resolve_output_path(system, &args.output, &remote)?;
        debug!("Resolved output path: {}", output.display());

        // Checked before any subprocess runs
        if system.exists(&output) {
            return Err(SliceError::target(format!(
                "Output directory already exists: '{}'. Remove it or pick another with --output",
                output.display()
            ))
            .into());
        }

        if !args.dry_run {
            check_git_availability().context("Git validation failed")?;
        }

        Ok(FetchOperation {
            remote,
            branch: args.branch.clone(),
            output,
            keep_git: args.keep_git,
            dry_run: args.dry_run,
            system,
        })
    }

    /// The resolved output directory
    #[must_use]
    #[inline]
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Execute the fetch operation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The git pipeline fails
    /// - The checked out content cannot be moved into place
    #[inline]
    pub fn execute(&self) -> Result<()> {
        if self.dry_run {
            return self.preview_operations();
        }

        info!(
            "Fetching {} \u{2192} {}",
            self.remote.original_url(),
            self.output.display()
        );

        let result = self.fetch_and_finalize();

        if result.is_err() {
            // Best-effort removal of a partially created output directory
            if let Err(cleanup_err) = remove_dir_safe(self.system, &self.output) {
                warn!("Cleanup of partial output failed: {cleanup_err}");
            }
        }

        result?;

        info!("\u{2713} Done: {}", self.output.display());

        Ok(())
    }

    /// Run the git pipeline and move the result into the output directory
    fn fetch_and_finalize(&self) -> Result<()> {
        let staging_parent = self.prepare_staging_parent()?;

        let sparse = SparseClone::new(self.remote.clone(), self.branch.clone(), &staging_parent)
            .context("Failed to create sparse clone")?;

        let content_path = sparse.execute().context("Sparse clone failed")?;

        if let Some(subdir) = self.remote.subdir.as_deref() {
            if !sparse.subdir_exists() {
                let diagnostics = sparse.checkout_diagnostics()?;
                return Err(SliceError::target(format!(
                    "Path '{}' not found in repository '{}' at branch '{}'\n\n{}",
                    subdir,
                    self.remote.original_url(),
                    sparse.effective_branch().unwrap_or("(remote default)"),
                    diagnostics
                ))
                .into());
            }

            debug!(
                "Moving {} \u{2192} {}",
                content_path.display(),
                self.output.display()
            );
            self.system
                .rename(&content_path, &self.output)
                .with_context(|| {
                    format!(
                        "Failed to move checked out path into place: {}",
                        self.output.display()
                    )
                })?;
            // The staging clone (including .git) goes away when `sparse` drops
        } else {
            // Whole tree: the staging clone itself becomes the output
            let staging = sparse.persist();
            debug!(
                "Moving {} \u{2192} {}",
                staging.display(),
                self.output.display()
            );
            if let Err(err) = self.system.rename(&staging, &self.output) {
                if let Err(cleanup_err) = remove_dir_safe(self.system, &staging) {
                    warn!("Cleanup of staging directory failed: {cleanup_err}");
                }
                return Err(err).with_context(|| {
                    format!(
                        "Failed to move checked out tree into place: {}",
                        self.output.display()
                    )
                });
            }

            if !self.keep_git {
                strip_git_dir(self.system, &self.output)?;
            }
        }

        Ok(())
    }

    /// Ensure the output's parent directory exists and return it
    fn prepare_staging_parent(&self) -> Result<PathBuf> {
        let parent = self
            .output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        if !self.system.exists(&parent) {
            self.system.create_dir_all(&parent).map_err(|e| {
                SliceError::filesystem(format!(
                    "Cannot create parent directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        Ok(parent)
    }

    /// Preview the git invocations without executing them
    fn preview_operations(&self) -> Result<()> {
        info!("Dry run preview - nothing will be fetched:");
        info!("");
        info!("Planned operations:");

        let clone_args = build_clone_args(
            &self.remote,
            self.branch.as_deref().or(self.remote.branch.as_deref()),
            "<staging>",
        );
        info!("  git {}", clone_args.join(" "));

        if let Some(subdir) = self.remote.subdir.as_deref() {
            info!("  git sparse-checkout init --cone");
            info!("  git sparse-checkout set {subdir}");
            info!("  move <staging>/{subdir} \u{2192} {}", self.output.display());
        } else {
            info!("  git sparse-checkout disable");
            info!("  move <staging> \u{2192} {}", self.output.display());
            if !self.keep_git {
                info!("  remove {}/.git", self.output.display());
            }
        }

        info!("");
        info!("Run without --dry-run to execute these operations.");

        Ok(())
    }
}

/// Resolve the output directory from the CLI argument or the URL
fn resolve_output_path(
    system: &dyn System,
    output: &Option<String>,
    remote: &RemoteRef,
) -> Result<PathBuf> {
    let path = match output {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(remote.default_output_name()),
    };

    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = system
        .current_dir()
        .map_err(|e| SliceError::filesystem(format!("Cannot get current directory: {e}")))?;
    Ok(cwd.join(path))
}
