//! Output generation for the operator console and saved files.
//!
//! # Submodules
//!
//! - [`listing`]: numbered, human-readable article blocks for the terminal
//! - [`json`]: writes the filtered articles to a pretty-printed JSON file

pub mod json;
pub mod listing;
