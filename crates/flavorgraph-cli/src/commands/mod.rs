//! CLI command implementations

pub mod categories;
pub mod completions;
pub mod config;
pub mod pairings;
pub mod recipe;
pub mod search;
pub mod suggest;
