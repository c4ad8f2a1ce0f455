//! Page loading: authoritative tree walk mirrored across languages.
//!
//! Translation completeness is driven entirely by the authoritative
//! language's structure: the same relative-path set is reused for every
//! other language, so a stray file in a translation tree never becomes a
//! page.

use std::path::Path;

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::SiteConfig;
use crate::error::{LoadDiagnostics, LoadError};
use crate::release::ReleaseRegistry;
use crate::{debug, language};

use super::Page;

/// Result of one full load pass
#[derive(Debug, Default)]
pub struct LoadedPages {
    /// Every constructed page edition, authoritative language first
    pub pages: Vec<Page>,
    /// Translation-tree files with no authoritative counterpart,
    /// as (language code, relative path) pairs
    pub stray_translations: Vec<(String, String)>,
}

/// Enumerate every markup file's relative path under a content root.
///
/// Order is not guaranteed by the walker, so results are sorted for
/// deterministic load output. `README.md` files document the tree itself
/// and are skipped.
pub fn list_content_files(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<String> = jwalk::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path();
            let rel = path.strip_prefix(root).ok()?;
            let rel = rel.to_string_lossy().replace('\\', "/");
            let name = rel.rsplit('/').next().unwrap_or(&rel);
            if !name.ends_with(".md") || name == "README.md" {
                return None;
            }
            Some(rel)
        })
        .collect();

    files.sort();
    files
}

/// Load every page edition across all configured languages.
///
/// The authoritative tree is walked once; all other languages attempt the
/// same relative paths and silently skip untranslated files. Construction
/// is order-independent, so each language's batch runs in parallel.
/// Defects are aggregated across all offending files before surfacing.
pub fn load_pages(
    config: &SiteConfig,
    registry: &ReleaseRegistry,
) -> Result<LoadedPages, LoadDiagnostics> {
    let authoritative = language::authoritative();
    let authoritative_dir = config.language_dir(authoritative.code);
    let relative_paths = list_content_files(&authoritative_dir);
    debug!("load"; "{} files in authoritative tree", relative_paths.len());

    let mut diagnostics = LoadDiagnostics::new();
    let mut pages = Vec::new();

    for lang in language::LANGUAGES {
        let base = config.language_dir(lang.code);

        let results: Vec<Result<Option<Page>, LoadError>> = relative_paths
            .par_iter()
            .map(|rel| Page::load(&base, rel, lang.code, config, registry))
            .collect();

        for result in results {
            match result {
                Ok(Some(page)) => pages.push(page),
                // Untranslated file: expected, silent
                Ok(None) => {}
                Err(err) => diagnostics.push(err),
            }
        }
    }

    let stray = stray_translations(config, &relative_paths);
    for (lang, rel) in &stray {
        diagnostics.warn(format!(
            "stray translation file `{rel}` ({lang}) has no authoritative counterpart"
        ));
    }

    if diagnostics.has_errors() {
        return Err(diagnostics);
    }

    Ok(LoadedPages {
        pages,
        stray_translations: stray,
    })
}

/// Files present in a translation tree but absent from the authoritative
/// one. Never surfaced as pages; reported so they can be pruned.
fn stray_translations(
    config: &SiteConfig,
    authoritative_paths: &[String],
) -> Vec<(String, String)> {
    let known: FxHashSet<&str> = authoritative_paths.iter().map(String::as_str).collect();

    language::LANGUAGES
        .iter()
        .filter(|lang| !lang.authoritative)
        .flat_map(|lang| {
            list_content_files(&config.language_dir(lang.code))
                .into_iter()
                .filter(|rel| !known.contains(rel.as_str()))
                .map(|rel| (lang.code.to_string(), rel))
                .collect::<Vec<_>>()
        })
        .collect()
}
