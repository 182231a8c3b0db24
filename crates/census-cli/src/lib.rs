//! CLI library components for the customer demographics enricher.

pub mod logging;
pub mod pipeline;
pub mod preview;
pub mod summary;
