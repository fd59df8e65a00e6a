//! Configuration discovery
//!
//! Walks up from a starting directory to the nearest config file, stopping
//! at `PROJECT_ROOT` or `HOME`.

use super::ProjectorConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Names checked in every directory, in order
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    ".seo-projector.json",
    "seo-projector.json",
    "seo-projector.toml",
];

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SEO_PROJECTOR_CONFIG";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `SEO_PROJECTOR_CONFIG`, or by discovery from
    /// the current directory
    pub fn load() -> Result<ProjectorConfig> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            tracing::debug!("Loading config from {}={:?}", CONFIG_ENV, path);
            return ProjectorConfig::load_from_file(Path::new(&path));
        }

        match std::env::current_dir() {
            Ok(cwd) => Self::load_from_path(&cwd),
            Err(_) => Ok(ProjectorConfig::default()),
        }
    }

    /// Load configuration by discovery from `path`, bounded by `PROJECT_ROOT`
    /// or, failing that, `HOME`
    pub fn load_from_path(path: &Path) -> Result<ProjectorConfig> {
        let boundary = std::env::var("PROJECT_ROOT")
            .ok()
            .or_else(|| std::env::var("HOME").ok())
            .map(PathBuf::from);
        Self::load_with_boundary(path, boundary.as_deref())
    }

    /// Load configuration by discovery from `path`, never looking above `boundary`
    pub fn load_with_boundary(path: &Path, boundary: Option<&Path>) -> Result<ProjectorConfig> {
        match Self::find_config_file(path, boundary) {
            Some(found) => {
                tracing::debug!("Found config at {:?}", found);
                ProjectorConfig::load_from_file(&found)
            }
            None => {
                tracing::debug!("No config found from {:?}, using defaults", path);
                Ok(ProjectorConfig::default())
            }
        }
    }

    /// Nearest config file at or above `start`
    pub fn find_config_file(start: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
        let mut current = if start.is_file() {
            start.parent().unwrap_or(start)
        } else {
            start
        };

        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if boundary == Some(current) {
                return None;
            }

            current = current.parent()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_nearest_config_wins() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = root.join("site").join("theme");
        fs::create_dir_all(&nested).unwrap();

        fs::write(root.join(".seo-projector.json"), r#"{ "field_name": "outer" }"#).unwrap();
        fs::write(
            root.join("site").join("seo-projector.toml"),
            "field_name = \"inner\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_with_boundary(&nested, Some(root)).unwrap();
        assert_eq!(config.field_name, "inner");
    }

    #[test]
    fn test_boundary_stops_discovery() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let project = root.join("project");
        fs::create_dir_all(&project).unwrap();
        fs::write(root.join(".seo-projector.json"), r#"{ "field_name": "outer" }"#).unwrap();

        let config = ConfigLoader::load_with_boundary(&project, Some(&project)).unwrap();
        assert_eq!(config, ProjectorConfig::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".seo-projector.json"),
            r#"{ "seo_type": "not valid" }"#,
        )
        .unwrap();

        let result = ConfigLoader::load_with_boundary(temp_dir.path(), Some(temp_dir.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_start_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("fixture.json");
        fs::write(&file, "{}").unwrap();
        fs::write(temp_dir.path().join("seo-projector.json"), r#"{ "media_type": "Attachment" }"#)
            .unwrap();

        let found = ConfigLoader::find_config_file(&file, Some(temp_dir.path())).unwrap();
        assert_eq!(found, temp_dir.path().join("seo-projector.json"));
    }
}
