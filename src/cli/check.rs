//! `check` command: load everything, report every defect.

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::site::Site;
use crate::{debug, log};

/// Load the full site and surface aggregated diagnostics.
///
/// Fatal defects (structural errors, version mismatches, collisions)
/// already abort `Site::load`; this adds the non-fatal findings a content
/// author should clean up: dead redirects, shadowed redirect sources and
/// stray translation files.
pub fn run_check(config: SiteConfig) -> Result<()> {
    let site = Site::load(config)?;

    debug!("check"; "releases with legacy paths: [{}]",
        site.registry.deprecated_with_legacy_paths().join(", "));
    debug!("check"; "releases on archive host: [{}]",
        site.registry.deprecated_on_archive_host().join(", "));
    debug!("check"; "releases with legacy search: [{}]",
        site.registry.deprecated_with_legacy_search().join(", "));

    let mut findings = 0usize;

    let dead = site.redirects.dead_entries(&site.index);
    for (old, terminal) in &dead {
        log!("warning"; "dead redirect `{old}` ends at `{terminal}` with no page behind it");
    }
    findings += dead.len();

    for warning in site.redirects.warnings() {
        log!("warning"; "{warning}");
    }
    findings += site.redirects.warnings().len();

    for (lang, rel) in &site.stray_translations {
        log!("warning"; "stray translation file `{rel}` ({lang})");
    }
    findings += site.stray_translations.len();

    if site.registry.is_oldest_release_deprecated() {
        log!("warning"; "oldest supported release {} passed its deprecation date ({})",
            site.registry.oldest_supported(), site.registry.next_deprecation_date());
    }

    if findings > 0 {
        bail!("check found {findings} non-fatal finding(s)");
    }

    log!("check"; "ok: {} pages, {} permalinks, {} redirects",
        site.index.pages().len(),
        site.index.permalink_count(),
        site.redirects.len());
    Ok(())
}
