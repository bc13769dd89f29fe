//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for gitslice operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SliceError {
    /// Url Error - the URL did not match a supported shape
    #[error("URL error: {message}")]
    Url { message: String },

    /// Target Error - output path already present, or the requested
    /// path is missing from the repository
    #[error("Target error: {message}")]
    Target { message: String },

    /// Git Error - Git operation failed
    #[error("Git error: {message}")]
    Git { message: String },

    /// Filesystem Error - file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl SliceError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Url { .. } => 1,
            Self::Target { .. } => 2,
            Self::Git { .. } => 3,
            Self::Filesystem { .. } => 4,
        }
    }

    /// Create a URL error
    #[inline]
    pub fn url<S: Into<String>>(message: S) -> Self {
        Self::Url {
            message: message.into(),
        }
    }

    /// Create a target error
    #[inline]
    pub fn target<S: Into<String>>(message: S) -> Self {
        Self::Target {
            message: message.into(),
        }
    }

    /// Create a git error
    #[inline]
    pub fn git<S: Into<String>>(message: S) -> Self {
        Self::Git {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}
