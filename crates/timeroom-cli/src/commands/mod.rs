pub mod completions;
pub mod config;
pub mod kinds;
pub mod plan;
pub mod timer;
