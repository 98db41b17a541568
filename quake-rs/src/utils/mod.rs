//! Shared utilities for the quake-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
