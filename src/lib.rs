//! `gitslice` - A CLI tool for downloading a slice of a Git repository
//!
//! This library downloads a single branch - optionally narrowed to a
//! single subdirectory - of a GitHub/GitLab repository without fetching
//! full history, by driving the host `git` binary's sparse-checkout
//! feature. What lands on disk is a plain directory tree.

pub mod cli;
pub mod error;
pub mod git;
pub mod operations;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::Args;
use operations::FetchOperation;
use system::RealSystem;

/// Main entry point for the gitslice library
pub fn run(args: &Args) -> Result<()> {
    let system = RealSystem;
    let fetch_operation = FetchOperation::new(args, &system)?;
    fetch_operation.execute()
}
