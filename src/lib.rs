pub mod charts;
pub mod config;
pub mod error;
pub mod explore;
pub mod insights;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod trends;
pub mod types;
pub mod util;
