//! High-level operations

pub mod fetch;

pub use fetch::FetchOperation;
