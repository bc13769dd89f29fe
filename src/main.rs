//! # `gitslice`
//!
//! `gitslice` downloads a subset of a remote Git repository - a single
//! branch, optionally a single subdirectory - without fetching full
//! history, by driving the host `git` binary's sparse-checkout feature.
//!
//! ## Usage
//!
//! **Whole repository (one branch, depth 1):**
//! ```sh
//! gitslice https://github.com/user/repo
//! ```
//!
//! **One subdirectory at a branch:**
//! ```sh
//! gitslice https://github.com/user/repo/tree/main/src/utils -o ./utils
//! ```
//!
//! See `gitslice --help` for more options.

use anyhow::Result;
use clap::Parser as _;
use gitslice::cli::Args;
use gitslice::error::SliceError;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber based on verbose flag
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    match gitslice::run(&args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{}", err);
            std::process::exit(
                err.downcast_ref::<SliceError>()
                    .map_or(1, SliceError::exit_code),
            );
        }
    }
}
