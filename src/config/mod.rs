//! Site configuration management for `veridoc.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Site metadata (title, base url)                  |
//! | `[content]` | Content tree root and releases data file         |
//! | `[[area]]`  | Content areas: version scope per top-level dir   |

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::release::ReleaseRegistry;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),
}

/// Root configuration structure representing veridoc.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    pub site: SiteInfo,

    /// Content tree settings
    pub content: ContentConfig,

    /// Content areas (top-level content directories)
    #[serde(rename = "area")]
    pub areas: Vec<AreaConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SiteInfo {
    pub title: String,
    /// Full site origin used for absolute URL generation
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root; language trees live at `<root>/<language code>`
    pub root: PathBuf,
    /// Releases data file (supported/deprecated lists + lifecycle dates)
    pub releases: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
            releases: PathBuf::from("data/releases.toml"),
        }
    }
}

/// One content area: a top-level content directory with its own version
/// scope. Pages must declare versions within their area's set.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaConfig {
    /// Area id; matches the top-level directory of page relative paths
    pub id: String,

    /// Whether pages in this area carry version qualifiers in their URLs
    #[serde(default = "default_true")]
    pub versioned: bool,

    /// Versions this area supports. Empty means every known version.
    #[serde(default)]
    pub versions: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            site: SiteInfo::default(),
            content: ContentConfig::default(),
            areas: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file; the project root is the
    /// config file's parent directory.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::Io(config_path.to_path_buf(), e))?;
        let mut config: SiteConfig = toml::from_str(&raw)?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Content tree root for one language.
    pub fn language_dir(&self, code: &str) -> PathBuf {
        self.root.join(&self.content.root).join(code)
    }

    /// Absolute path of the releases data file.
    pub fn releases_file(&self) -> PathBuf {
        self.root.join(&self.content.releases)
    }

    /// Area config by id, if declared.
    pub fn area(&self, id: &str) -> Option<&AreaConfig> {
        self.areas.iter().find(|a| a.id == id)
    }

    /// Whether pages under an area derive versioned permalinks.
    /// Undeclared areas default to versioned.
    pub fn area_is_versioned(&self, id: &str) -> bool {
        self.area(id).map(|a| a.versioned).unwrap_or(true)
    }

    /// The version set an area supports. An undeclared area, or one with
    /// an empty `versions` list, supports every known version.
    pub fn area_versions(&self, id: &str, registry: &ReleaseRegistry) -> Vec<String> {
        match self.area(id) {
            Some(area) if !area.versions.is_empty() => area.versions.clone(),
            _ => registry.all_version_ids().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn registry() -> ReleaseRegistry {
        let mut dates = BTreeMap::new();
        dates.insert(
            "2.20".to_string(),
            crate::release::Lifecycle {
                release: "2020-02-11".to_string(),
                deprecation: "2021-02-11".to_string(),
            },
        );
        ReleaseRegistry::from_parts(
            vec!["2.21".to_string(), "2.20".to_string()],
            vec!["2.19".to_string()],
            dates,
        )
        .unwrap()
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("veridoc.toml");
        fs::write(
            &path,
            r#"
[site]
title = "Docs"
base_url = "https://docs.example.com"

[content]
root = "pages"

[[area]]
id = "guide"
versions = ["cloud", "2.21"]

[[area]]
id = "legal"
versioned = false
"#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.site.title, "Docs");
        assert_eq!(config.root, dir.path());
        assert_eq!(config.language_dir("en"), dir.path().join("pages/en"));
        assert!(config.area_is_versioned("guide"));
        assert!(!config.area_is_versioned("legal"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiteConfig::load(Path::new("/nonexistent/veridoc.toml"));
        assert!(matches!(err, Err(ConfigError::Io(_, _))));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("veridoc.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();
        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_area_versions_declared() {
        let mut config = SiteConfig::default();
        config.areas.push(AreaConfig {
            id: "guide".to_string(),
            versioned: true,
            versions: vec!["cloud".to_string(), "2.21".to_string()],
        });
        assert_eq!(
            config.area_versions("guide", &registry()),
            vec!["cloud", "2.21"]
        );
    }

    #[test]
    fn test_area_versions_default_to_all() {
        let config = SiteConfig::default();
        let versions = config.area_versions("guide", &registry());
        assert_eq!(versions, vec!["cloud", "2.21", "2.20", "2.19"]);
    }

    #[test]
    fn test_undeclared_area_is_versioned() {
        let config = SiteConfig::default();
        assert!(config.area_is_versioned("anything"));
    }
}
