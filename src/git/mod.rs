//! Git operations: URL classification and the sparse clone pipeline

pub mod remote;
pub mod sparse;

pub use remote::{Platform, RemoteRef};
pub use sparse::{SparseClone, check_git_availability};
