//! Versioned candidate path synthesis.
//!
//! Models the case where a request supplies a bare or differently
//! qualified path and the resolver must guess which version/qualifier
//! form is actually indexed.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::core::UrlPath;
use crate::language;
use crate::page::href_for;
use crate::release::{HOSTED_CHANNEL, ReleaseRegistry};

/// A dotted release number segment (`2.21`, `11.10.340`). Requests for
/// retired or unknown releases still look version-qualified and must be
/// stripped before candidate synthesis.
static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+){1,2}$").expect("valid pattern"));

/// Strip any recognized language prefix and version qualifier from a
/// request path, leaving the bare content path.
///
/// Recognized qualifier forms, checked after the language segment:
/// - a known version id (`2.21`, `cloud`)
/// - any version-shaped segment (a stale release the registry no longer knows)
/// - the legacy `server/<version>` pair
pub fn content_suffix<'a>(href: &'a UrlPath, registry: &ReleaseRegistry) -> &'a str {
    let (_, rest) = language::strip_language(href.as_str());

    let (first, tail) = match rest.split_once('/') {
        Some((first, tail)) => (first, tail),
        None => (rest, ""),
    };

    if registry.is_known_version(first) || VERSION_SEGMENT.is_match(first) {
        return tail;
    }

    // Legacy scheme: `server/<version>/<path>`
    if first == "server" {
        let (second, legacy_tail) = match tail.split_once('/') {
            Some((second, legacy_tail)) => (second, legacy_tail),
            None => (tail, ""),
        };
        if registry.is_known_version(second) || VERSION_SEGMENT.is_match(second) {
            return legacy_tail;
        }
    }

    rest
}

/// Synthesize the version-and-language-qualified form of `href` for every
/// known version, deduplicated in the registry's declared order.
///
/// Many versions collapse to the same unqualified path (the hosted
/// channel, versionless content), hence the dedup.
pub fn versioned_candidates(
    href: &UrlPath,
    language_code: &str,
    registry: &ReleaseRegistry,
) -> Vec<UrlPath> {
    let suffix = content_suffix(href, registry);

    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();
    for version in registry.all_version_ids() {
        let qualifier = if version == HOSTED_CHANNEL {
            None
        } else {
            Some(version)
        };
        let candidate = href_for(language_code, qualifier, suffix);
        if seen.insert(candidate.clone()) {
            candidates.push(candidate);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Lifecycle;
    use std::collections::BTreeMap;

    fn registry() -> ReleaseRegistry {
        let mut dates = BTreeMap::new();
        dates.insert(
            "2.20".to_string(),
            Lifecycle {
                release: "2020-02-11".to_string(),
                deprecation: "2021-02-11".to_string(),
            },
        );
        ReleaseRegistry::from_parts(
            vec!["2.21".to_string(), "2.20".to_string()],
            vec!["2.18".to_string()],
            dates,
        )
        .unwrap()
    }

    #[test]
    fn test_content_suffix_strips_language_and_version() {
        let reg = registry();
        let href = UrlPath::from_request("/en/2.21/guide/setup");
        assert_eq!(content_suffix(&href, &reg), "guide/setup");
    }

    #[test]
    fn test_content_suffix_bare_path() {
        let reg = registry();
        let href = UrlPath::from_request("/guide/setup");
        assert_eq!(content_suffix(&href, &reg), "guide/setup");
    }

    #[test]
    fn test_content_suffix_hosted_channel() {
        let reg = registry();
        let href = UrlPath::from_request("/en/cloud/guide/setup");
        assert_eq!(content_suffix(&href, &reg), "guide/setup");
    }

    #[test]
    fn test_content_suffix_stale_version_shaped_segment() {
        let reg = registry();
        // 9.9 is unknown but version-shaped; still stripped
        let href = UrlPath::from_request("/en/9.9/guide/setup");
        assert_eq!(content_suffix(&href, &reg), "guide/setup");
    }

    #[test]
    fn test_content_suffix_legacy_pair() {
        let reg = registry();
        let href = UrlPath::from_request("/en/server/2.18/guide/setup");
        assert_eq!(content_suffix(&href, &reg), "guide/setup");
    }

    #[test]
    fn test_content_suffix_keeps_ordinary_segments() {
        let reg = registry();
        let href = UrlPath::from_request("/en/guide/setup");
        assert_eq!(content_suffix(&href, &reg), "guide/setup");
        // `server` without a version segment after it is a normal path
        let href = UrlPath::from_request("/en/server/administration");
        assert_eq!(content_suffix(&href, &reg), "server/administration");
    }

    #[test]
    fn test_candidates_order_and_dedup() {
        let reg = registry();
        let href = UrlPath::from_request("/guide/setup");
        let candidates = versioned_candidates(&href, "en", &reg);

        // Hosted channel first, then releases newest first
        assert_eq!(
            candidates,
            vec![
                UrlPath::from_request("/en/guide/setup"),
                UrlPath::from_request("/en/2.21/guide/setup"),
                UrlPath::from_request("/en/2.20/guide/setup"),
                UrlPath::from_request("/en/2.18/guide/setup"),
            ]
        );
    }

    #[test]
    fn test_candidates_replace_language() {
        let reg = registry();
        let href = UrlPath::from_request("/fr/2.21/guide/setup");
        let candidates = versioned_candidates(&href, "en", &reg);
        assert!(candidates.iter().all(|c| c.starts_with("/en")));
    }

    #[test]
    fn test_version_segment_shape() {
        assert!(VERSION_SEGMENT.is_match("2.21"));
        assert!(VERSION_SEGMENT.is_match("11.10.340"));
        assert!(!VERSION_SEGMENT.is_match("cloud"));
        assert!(!VERSION_SEGMENT.is_match("2"));
        assert!(!VERSION_SEGMENT.is_match("v2.1"));
    }
}
