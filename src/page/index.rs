//! Page index: permalink string -> page, collision checked.

use rustc_hash::FxHashMap;

use crate::core::UrlPath;
use crate::error::{LoadDiagnostics, LoadError};

use super::Page;

/// Immutable mapping from every permalink to its owning page
///
/// Built once after loading; resolution reads it without locks. Pages are
/// stored once and shared across all of their permalinks.
#[derive(Debug, Default)]
pub struct PageIndex {
    pages: Vec<Page>,
    by_permalink: FxHashMap<UrlPath, usize>,
}

impl PageIndex {
    /// Fold a page list into the permalink index.
    ///
    /// A permalink claimed by two distinct pages is a build defect: the
    /// collision is reported, never masked by overwriting. All collisions
    /// are aggregated before failing.
    pub fn build(pages: Vec<Page>) -> Result<PageIndex, LoadDiagnostics> {
        let mut by_permalink = FxHashMap::default();
        by_permalink.reserve(pages.len());
        let mut diagnostics = LoadDiagnostics::new();

        for (idx, page) in pages.iter().enumerate() {
            for permalink in &page.permalinks {
                match by_permalink.entry(permalink.href.clone()) {
                    std::collections::hash_map::Entry::Vacant(entry) => {
                        entry.insert(idx);
                    }
                    std::collections::hash_map::Entry::Occupied(entry) => {
                        let first: &Page = &pages[*entry.get()];
                        diagnostics.push(LoadError::PermalinkCollision {
                            permalink: permalink.href.as_str().to_string(),
                            first: format!("{} ({})", first.relative_path, first.language),
                            second: format!("{} ({})", page.relative_path, page.language),
                        });
                    }
                }
            }
        }

        if diagnostics.has_errors() {
            return Err(diagnostics);
        }

        Ok(PageIndex {
            pages,
            by_permalink,
        })
    }

    /// Look up a page by exact permalink.
    pub fn get(&self, href: &str) -> Option<&Page> {
        self.by_permalink.get(href).map(|&idx| &self.pages[idx])
    }

    #[inline]
    pub fn contains(&self, href: &str) -> bool {
        self.by_permalink.contains_key(href)
    }

    /// All indexed pages, in load order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of indexed permalinks (not pages).
    pub fn permalink_count(&self) -> usize {
        self.by_permalink.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
