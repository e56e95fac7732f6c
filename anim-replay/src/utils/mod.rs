//! Shared utilities for the anim-replay CLI

pub mod table;
pub mod tree;

pub use table::*;
pub use tree::*;
