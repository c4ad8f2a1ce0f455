//! Redirect table: historical URL -> current URL.
//!
//! Derived once from the immutable page set, immediately after the index.
//! Two kinds of entries per permalink:
//!
//! - prior-format paths implied by the permalink's version era (releases
//!   that predate the flat URL scheme lived under `/<lang>/server/<v>/`),
//! - author-declared `redirect_from` paths, registered under the same
//!   language and version qualifier as the permalink.
//!
//! Legacy-form equivalents of `redirect_from` paths map to their
//! current-format old path, one hop at a time, so a page renamed across
//! the format cutover resolves through a two-hop chain.

use rustc_hash::FxHashMap;

use crate::core::UrlPath;
use crate::error::{LoadDiagnostics, LoadError};
use crate::page::{PageIndex, href_for};
use crate::release::ReleaseRegistry;

/// Flat old-path -> new-path mapping
#[derive(Debug, Default)]
pub struct RedirectTable {
    entries: FxHashMap<UrlPath, UrlPath>,
    /// Non-fatal findings from derivation (shadowed entries)
    warnings: Vec<String>,
}

impl RedirectTable {
    /// Derive the table from every indexed page.
    ///
    /// Two pages claiming the same old path with different targets is a
    /// build defect; identical claims are deduplicated. An old path that
    /// shadows a live permalink is skipped and reported as a warning.
    pub fn build(
        index: &PageIndex,
        registry: &ReleaseRegistry,
    ) -> Result<RedirectTable, LoadDiagnostics> {
        let mut table = RedirectTable::default();
        let mut diagnostics = LoadDiagnostics::new();

        for page in index.pages() {
            for permalink in &page.permalinks {
                let lang = permalink.language.as_str();
                let version = permalink.version.as_deref();
                let legacy_era =
                    version.is_some_and(|v| registry.uses_legacy_path_scheme(v));

                // Prior-format equivalent of the canonical path
                if legacy_era {
                    table.insert(
                        legacy_href(lang, version, &page.path),
                        permalink.href.clone(),
                        index,
                        &mut diagnostics,
                    );
                }

                // Author-declared old paths, qualified like the permalink
                for old in &page.meta.redirect_from {
                    let old_path = old.trim_matches('/');
                    let current_form = href_for(lang, version, old_path);

                    if legacy_era {
                        table.insert(
                            legacy_href(lang, version, old_path),
                            current_form.clone(),
                            index,
                            &mut diagnostics,
                        );
                    }
                    table.insert(
                        current_form,
                        permalink.href.clone(),
                        index,
                        &mut diagnostics,
                    );
                }
            }
        }

        if diagnostics.has_errors() {
            return Err(diagnostics);
        }
        Ok(table)
    }

    fn insert(
        &mut self,
        old: UrlPath,
        new: UrlPath,
        index: &PageIndex,
        diagnostics: &mut LoadDiagnostics,
    ) {
        if index.contains(old.as_str()) {
            self.warnings.push(format!(
                "redirect source `{old}` shadows a live permalink; entry skipped"
            ));
            return;
        }

        match self.entries.get(&old) {
            None => {
                self.entries.insert(old, new);
            }
            Some(existing) if *existing == new => {}
            Some(existing) => diagnostics.push(LoadError::RedirectCollision {
                old_path: old.as_str().to_string(),
                first: existing.as_str().to_string(),
                second: new.as_str().to_string(),
            }),
        }
    }

    /// Apply one redirect hop; unmatched paths pass through unchanged.
    pub fn resolve_hop<'a>(&'a self, path: &'a str) -> &'a str {
        self.entries.get(path).map_or(path, UrlPath::as_str)
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-fatal findings from derivation.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Entries that fail to reach a live index key within two hops.
    ///
    /// Dead entries are a content defect to report, never to keep
    /// silently. Returns (old path, terminal path) pairs.
    pub fn dead_entries(&self, index: &PageIndex) -> Vec<(String, String)> {
        let mut dead: Vec<(String, String)> = self
            .entries
            .iter()
            .filter_map(|(old, new)| {
                let once = new.as_str();
                let twice = self.resolve_hop(once);
                if index.contains(once) || index.contains(twice) {
                    None
                } else {
                    Some((old.as_str().to_string(), twice.to_string()))
                }
            })
            .collect();
        dead.sort();
        dead
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: &[(&str, &str)]) -> RedirectTable {
        RedirectTable {
            entries: entries
                .iter()
                .map(|(old, new)| (UrlPath::from_request(old), UrlPath::from_request(new)))
                .collect(),
            warnings: Vec::new(),
        }
    }
}

/// Prior-format href: releases before the flat URL scheme nested under a
/// `server/` prefix.
fn legacy_href(language: &str, version: Option<&str>, page_path: &str) -> UrlPath {
    let v = version.unwrap_or_default();
    let path = page_path.trim_matches('/');
    let href = if path.is_empty() {
        format!("/{language}/server/{v}")
    } else {
        format!("/{language}/server/{v}/{path}")
    };
    UrlPath::from_request(&href)
}
