//! Utility modules

pub mod fs;
