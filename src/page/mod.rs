//! Page types: one (content path × language) edition of an article.

mod index;
mod loader;
mod meta;
mod permalink;

pub use index::PageIndex;
pub use loader::{LoadedPages, list_content_files, load_pages};
pub use meta::{JsonMap, PageMeta};
pub use permalink::{Permalink, content_path, href_for};

use std::path::Path;

use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::release::ReleaseRegistry;

/// One edition of one article
///
/// Constructed once by the loader and held immutably for the lifetime of
/// the index. Rendering never mutates a `Page`; it derives a request-scoped
/// view instead (see [`crate::render::RenderedView`]).
#[derive(Debug, Clone)]
pub struct Page {
    /// Language-independent key, forward slashes (e.g. `guide/setup.md`)
    pub relative_path: String,
    /// Derived content path without extension (e.g. `guide/setup`)
    pub path: String,
    /// Owning language code
    pub language: String,
    /// Parent content area (top-level directory of `relative_path`)
    pub area: String,
    /// Parsed frontmatter. Title, short title and intro stay raw here;
    /// a render pass reads them through [`Page::raw_field`].
    pub meta: PageMeta,
    /// Frontmatter-free body markup
    pub body: String,
    /// Applicable versions in registry resolution order
    pub versions: Vec<String>,
    /// Canonical URLs, one per applicable version (or a single
    /// unqualified one for versionless areas)
    pub permalinks: Vec<Permalink>,
}

impl Page {
    /// Construct the page edition at `base/relative_path`.
    ///
    /// A missing file is an expected non-event (an untranslated page) and
    /// yields `Ok(None)`; any other failure is a load defect.
    pub fn load(
        base: &Path,
        relative_path: &str,
        language: &str,
        config: &SiteConfig,
        registry: &ReleaseRegistry,
    ) -> Result<Option<Page>, LoadError> {
        let relative_path = relative_path.replace('\\', "/");
        let full_path = base.join(&relative_path);

        // Read and handle the error rather than probing for existence first
        let raw = match std::fs::read_to_string(&full_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LoadError::Structural {
                    path: full_path,
                    detail: format!("unreadable file: {e}"),
                });
            }
        };

        let (meta, body) = meta::parse(&raw).map_err(|detail| LoadError::Structural {
            path: full_path.clone(),
            detail,
        })?;

        let area = area_of(&relative_path).to_string();
        let area_versions = config.area_versions(&area, registry);

        // Empty frontmatter versions means the area's full set
        let mut versions = if meta.versions.is_empty() {
            area_versions.clone()
        } else {
            meta.versions.clone()
        };

        let unsupported: Vec<String> = versions
            .iter()
            .filter(|v| !area_versions.contains(v))
            .cloned()
            .collect();
        if !unsupported.is_empty() {
            return Err(LoadError::VersionMismatch {
                path: full_path,
                area,
                versions: unsupported,
            });
        }

        versions.sort_by_key(|v| registry.version_order(v));
        versions.dedup();

        let path = permalink::content_path(&relative_path);
        let permalinks = Permalink::derive(
            language,
            &path,
            config.area_is_versioned(&area),
            &versions,
        );

        Ok(Some(Page {
            relative_path,
            path,
            language: language.to_string(),
            area,
            meta,
            body: body.to_string(),
            versions,
            permalinks,
        }))
    }

    /// Pre-render value of a display field, for the rendering collaborator.
    ///
    /// `short_title` falls back to `title` so every page has a short form.
    pub fn raw_field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => self.meta.title.as_deref(),
            "short_title" => self.meta.short_title.as_deref().or(self.meta.title.as_deref()),
            "intro" => self.meta.intro.as_deref(),
            "body" => Some(&self.body),
            _ => None,
        }
    }

    /// Page title; load-time validation guarantees presence.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or_default()
    }

    /// Whether this page applies to the given version.
    pub fn applies_to(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }
}

/// Parent content area of a relative path: its top-level directory.
/// Root-level files (e.g. the homepage `index.md`) have no area.
pub fn area_of(relative_path: &str) -> &str {
    match relative_path.split_once('/') {
        Some((area, _)) => area,
        None => "",
    }
}
