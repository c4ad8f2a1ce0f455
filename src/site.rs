//! Site assembly: one frozen value holding everything resolution needs.
//!
//! Built once at startup (or wholesale on explicit reload) and passed by
//! reference into every resolution call. No module-level shared state:
//! synthetic sites in tests construct the same type directly.

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::log;
use crate::page::{PageIndex, load_pages};
use crate::redirect::RedirectTable;
use crate::release::ReleaseRegistry;
use crate::resolver::Resolver;

/// Frozen load output: registry, index, redirect table
///
/// Immutable for the lifetime of the process; all load-time defects abort
/// construction (no partial index is ever served).
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub registry: ReleaseRegistry,
    pub index: PageIndex,
    pub redirects: RedirectTable,
    /// Translation files with no authoritative counterpart
    pub stray_translations: Vec<(String, String)>,
}

impl Site {
    /// Load the full site: registry, pages, index, redirect table.
    pub fn load(config: SiteConfig) -> Result<Site> {
        let registry = ReleaseRegistry::load(&config.releases_file())
            .context("failed to load release registry")?;

        let loaded = match load_pages(&config, &registry) {
            Ok(loaded) => loaded,
            Err(diagnostics) => bail!("{diagnostics}"),
        };
        log!("load"; "{} page editions", loaded.pages.len());

        let index = match PageIndex::build(loaded.pages) {
            Ok(index) => index,
            Err(diagnostics) => bail!("{diagnostics}"),
        };
        let redirects = match RedirectTable::build(&index, &registry) {
            Ok(redirects) => redirects,
            Err(diagnostics) => bail!("{diagnostics}"),
        };
        log!("index"; "{} permalinks, {} redirects", index.permalink_count(), redirects.len());

        Ok(Site {
            config,
            registry,
            index,
            redirects,
            stray_translations: loaded.stray_translations,
        })
    }

    /// A resolver over this site's frozen tables.
    pub fn resolver(&self, strict: bool) -> Resolver<'_> {
        Resolver::new(&self.index, &self.redirects, &self.registry, strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    const RELEASES: &str = r#"
supported = ["2.1", "2.0"]
deprecated = []

[dates."2.0"]
release = "2019-11-12"
deprecation = "2020-11-12"
"#;

    fn fixture_site(dir: &TempDir) -> SiteConfig {
        write(dir.path(), "data/releases.toml", RELEASES);
        write(
            dir.path(),
            "veridoc.toml",
            r#"
[site]
title = "Docs"

[[area]]
id = "guide"
versions = ["2.1", "2.0"]
"#,
        );
        SiteConfig::load(&dir.path().join("veridoc.toml")).unwrap()
    }

    #[test]
    fn test_end_to_end_load_and_resolve() {
        let dir = TempDir::new().unwrap();
        let config = fixture_site(&dir);
        write(
            dir.path(),
            "content/en/guide/setup.md",
            "+++\ntitle = \"Setup\"\nversions = [\"2.1\", \"2.0\"]\n+++\nbody",
        );

        let site = Site::load(config).unwrap();
        assert_eq!(site.index.permalink_count(), 2);

        let resolver = site.resolver(true);
        let a = resolver.find_page("/en/2.1/guide/setup").unwrap().unwrap();
        let b = resolver.find_page("/en/2.0/guide/setup").unwrap().unwrap();
        assert!(std::ptr::eq(a, b));

        // Untranslated French edition falls back to the authoritative page
        let fr = resolver
            .find_page_in("/fr/2.1/guide/setup", "fr")
            .unwrap()
            .unwrap();
        assert!(std::ptr::eq(a, fr));
    }

    #[test]
    fn test_load_aborts_on_defective_content() {
        let dir = TempDir::new().unwrap();
        let config = fixture_site(&dir);
        write(dir.path(), "content/en/guide/bad.md", "no frontmatter");

        assert!(Site::load(config).is_err());
    }

    #[test]
    fn test_load_aborts_on_missing_registry() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "veridoc.toml", "[site]\ntitle = \"Docs\"\n");
        let config = SiteConfig::load(&dir.path().join("veridoc.toml")).unwrap();

        assert!(Site::load(config).is_err());
    }
}
