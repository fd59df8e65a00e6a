use anyhow::Result;
use seo_projector_core::ProjectorConfig;

/// File name `init` writes the configuration to
pub const CONFIG_FILE: &str = ".seo-projector.json";

/// Default configuration with every option spelled out
pub fn create_default_config() -> Result<String> {
    let mut config = serde_json::to_value(ProjectorConfig::default())?;
    if let Some(map) = config.as_object_mut() {
        map.insert("root_type".to_string(), "RootQuery".into());
        map.insert("exclude_fields".to_string(), serde_json::json!([]));
    }
    Ok(serde_json::to_string_pretty(&config)?)
}

/// A small site: posts, pages, categories and one kind without a GraphQL name
pub fn create_sample_fixture() -> String {
    // Raw JSON keeps the field order readable
    r#"{
  "subject_kinds": [
    { "name": "post", "category": "content", "graphql_single_name": "Post" },
    { "name": "page", "category": "content", "graphql_single_name": "Page" },
    { "name": "category", "category": "taxonomy", "graphql_single_name": "Category" },
    { "name": "wp_block", "category": "content" }
  ],
  "metadata": {
    "separator": "–",
    "posts": {
      "1": {
        "title": "Hello world – My Site",
        "description": "Welcome to WordPress.",
        "canonicalUrl": "https://example.com/hello-world/",
        "images": [
          { "id": 7, "url": "https://example.com/uploads/hello.jpg", "width": 1200, "height": 630, "alt": "Hello" }
        ],
        "openGraphTitle": "Hello world",
        "openGraphType": "article",
        "twitterTitle": "Hello world"
      },
      "2": {
        "title": "About – My Site"
      }
    },
    "terms": {
      "category": {
        "4": {
          "title": "News – My Site",
          "description": "Latest news"
        }
      }
    }
  }
}
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Fixture, build_site};

    #[test]
    fn test_default_config_round_trips() {
        let config = ProjectorConfig::from_json(&create_default_config().unwrap()).unwrap();
        assert_eq!(config.root_type.as_deref(), Some("RootQuery"));
        assert_eq!(config.field_name, "seo");
    }

    #[test]
    fn test_sample_fixture_builds() {
        let fixture: Fixture = serde_json::from_str(&create_sample_fixture()).unwrap();
        let site = build_site(&fixture, ProjectorConfig::default()).unwrap();

        assert_eq!(site.report.registered, vec!["Post", "Page", "Category"]);
        assert_eq!(site.report.skipped, vec!["wp_block"]);
    }
}
