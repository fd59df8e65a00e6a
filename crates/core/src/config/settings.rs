use crate::{
    error::{Error, Result},
    field::is_valid_name,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names and switches controlling what the projector registers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct ProjectorConfig {
    /// Root query type; the host's own root type when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_type: Option<String>,

    pub seo_type: String,
    pub settings_type: String,

    /// Field attached to every content type and taxonomy
    pub field_name: String,

    /// Field attached to the root query type
    pub settings_field: String,

    /// Host type social images resolve to
    pub media_type: String,

    /// Metadata or settings fields to leave out
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_fields: Vec<String>,

    /// Skip subject kinds without a GraphQL type name instead of failing
    pub skip_unnamed_kinds: bool,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            root_type: None,
            seo_type: "SEO".to_string(),
            settings_type: "SeoSettings".to_string(),
            field_name: "seo".to_string(),
            settings_field: "seoSettings".to_string(),
            media_type: "MediaItem".to_string(),
            exclude_fields: Vec::new(),
            skip_unnamed_kinds: true,
        }
    }
}

impl ProjectorConfig {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a config file, picking the format from its extension
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            _ => Self::from_json(&contents)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every configured type and field name against the GraphQL name grammar
    pub fn validate(&self) -> Result<()> {
        let mut names = vec![
            ("seo_type", self.seo_type.as_str()),
            ("settings_type", self.settings_type.as_str()),
            ("field_name", self.field_name.as_str()),
            ("settings_field", self.settings_field.as_str()),
            ("media_type", self.media_type.as_str()),
        ];
        if let Some(root_type) = &self.root_type {
            names.push(("root_type", root_type.as_str()));
        }

        for (key, name) in names {
            if !is_valid_name(name) {
                return Err(Error::ConfigError(format!(
                    "{key} '{name}' is not a valid GraphQL name"
                )));
            }
        }

        if self.seo_type == self.settings_type {
            return Err(Error::ConfigError(format!(
                "seo_type and settings_type must differ (both '{}')",
                self.seo_type
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProjectorConfig::default();
        assert_eq!(config.seo_type, "SEO");
        assert_eq!(config.settings_type, "SeoSettings");
        assert_eq!(config.field_name, "seo");
        assert_eq!(config.settings_field, "seoSettings");
        assert_eq!(config.media_type, "MediaItem");
        assert!(config.skip_unnamed_kinds);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ProjectorConfig::from_json(
            r#"{ "root_type": "Query", "exclude_fields": ["twitterTitle"] }"#,
        )
        .unwrap();
        assert_eq!(config.root_type.as_deref(), Some("Query"));
        assert_eq!(config.exclude_fields, vec!["twitterTitle"]);
        assert_eq!(config.seo_type, "SEO");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ProjectorConfig::from_json(r#"{ "seo_typo": "X" }"#).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_toml() {
        let config = ProjectorConfig::from_toml(
            "field_name = \"meta\"\nskip_unnamed_kinds = false\n",
        )
        .unwrap();
        assert_eq!(config.field_name, "meta");
        assert!(!config.skip_unnamed_kinds);
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let config = ProjectorConfig {
            field_name: "seo-data".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(msg)) if msg.contains("field_name")));

        let config = ProjectorConfig {
            settings_type: "SEO".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
