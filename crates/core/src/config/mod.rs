//! Configuration management for seo-projector

pub mod loader;
mod settings;

// Re-export main types
pub use loader::{CONFIG_ENV, CONFIG_FILE_NAMES, ConfigLoader};
pub use settings::ProjectorConfig;
