//! CLI library components for the tag record converter.

pub mod logging;
pub mod pipeline;
pub mod settings;
