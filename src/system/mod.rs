//! System abstraction for environment and filesystem operations
//!
//! This module provides a unified trait for the external system
//! interactions the fetch operation performs, allowing for easy testing
//! with a mock implementation. Subprocess invocation is deliberately not
//! part of the trait; the git pipeline always drives the real binary.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for system operations
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::env` and `std::fs`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Get the current working directory
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path points to a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Recursively create a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and all its contents
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Rename (move) a file or directory
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}
