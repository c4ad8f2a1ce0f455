//! Permalink derivation: the canonical URL forms of one page.

use serde::Serialize;

use crate::core::UrlPath;
use crate::release::HOSTED_CHANNEL;

/// One canonical URL under which a page is reachable
///
/// A (language, version qualifier, path) triple. The hosted channel and
/// versionless content areas produce unqualified hrefs; self-managed
/// releases qualify the path with their bare release id:
///
/// ```text
/// /en/guide/setup        (hosted channel, or versionless area)
/// /en/2.21/guide/setup   (self-managed release 2.21)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permalink {
    /// Owning language code
    pub language: String,
    /// Version qualifier; `None` for the hosted channel and for
    /// versionless content areas
    pub version: Option<String>,
    /// Derived canonical URL
    pub href: UrlPath,
}

impl Permalink {
    /// Derive the ordered permalink set for one page.
    ///
    /// Versionless areas get exactly one permalink; versioned areas get
    /// one per applicable version, in the caller-supplied version order.
    pub fn derive(
        language: &str,
        page_path: &str,
        versioned: bool,
        versions: &[String],
    ) -> Vec<Permalink> {
        if !versioned {
            return vec![Self::new(language, None, page_path)];
        }

        versions
            .iter()
            .map(|v| {
                let qualifier = if v == HOSTED_CHANNEL {
                    None
                } else {
                    Some(v.as_str())
                };
                Self::new(language, qualifier, page_path)
            })
            .collect()
    }

    fn new(language: &str, version: Option<&str>, page_path: &str) -> Permalink {
        Permalink {
            language: language.to_string(),
            version: version.map(str::to_string),
            href: href_for(language, version, page_path),
        }
    }
}

/// Build the canonical href for a (language, version qualifier, path)
/// triple. An empty path yields the language homepage.
pub fn href_for(language: &str, version: Option<&str>, page_path: &str) -> UrlPath {
    let path = page_path.trim_matches('/');
    let href = match (version, path.is_empty()) {
        (None, true) => format!("/{language}"),
        (None, false) => format!("/{language}/{path}"),
        (Some(v), true) => format!("/{language}/{v}"),
        (Some(v), false) => format!("/{language}/{v}/{path}"),
    };
    UrlPath::from_request(&href)
}

/// Derive the language-independent content path from a relative file path.
///
/// `guide/setup.md` -> `guide/setup`
/// `guide/index.md` -> `guide`
/// `index.md` -> `` (site homepage)
pub fn content_path(relative_path: &str) -> String {
    let path = relative_path.trim_matches('/');
    let stripped = path.strip_suffix(".md").unwrap_or(path);

    let stripped = match stripped.strip_suffix("/index") {
        Some(parent) => parent,
        None if stripped == "index" => "",
        None => stripped,
    };

    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_path() {
        assert_eq!(content_path("guide/setup.md"), "guide/setup");
        assert_eq!(content_path("guide/index.md"), "guide");
        assert_eq!(content_path("index.md"), "");
        assert_eq!(content_path("admin/install/prereqs.md"), "admin/install/prereqs");
    }

    #[test]
    fn test_versionless_area_single_permalink() {
        let permalinks = Permalink::derive(
            "en",
            "legal/terms",
            false,
            &["cloud".to_string(), "2.21".to_string()],
        );
        assert_eq!(permalinks.len(), 1);
        assert_eq!(permalinks[0].href, "/en/legal/terms");
        assert!(permalinks[0].version.is_none());
    }

    #[test]
    fn test_versioned_area_one_per_version() {
        let versions = vec!["cloud".to_string(), "2.21".to_string(), "2.20".to_string()];
        let permalinks = Permalink::derive("en", "guide/setup", true, &versions);

        assert_eq!(permalinks.len(), versions.len());
        assert_eq!(permalinks[0].href, "/en/guide/setup");
        assert!(permalinks[0].version.is_none());
        assert_eq!(permalinks[1].href, "/en/2.21/guide/setup");
        assert_eq!(permalinks[1].version.as_deref(), Some("2.21"));
        assert_eq!(permalinks[2].href, "/en/2.20/guide/setup");
    }

    #[test]
    fn test_language_carries_into_href() {
        let permalinks =
            Permalink::derive("ja", "guide/setup", true, &["2.21".to_string()]);
        assert_eq!(permalinks[0].href, "/ja/2.21/guide/setup");
        assert_eq!(permalinks[0].language, "ja");
    }

    #[test]
    fn test_homepage_permalink() {
        let permalinks = Permalink::derive("en", "", false, &[]);
        assert_eq!(permalinks[0].href, "/en");
    }

    #[test]
    fn test_href_for_versioned_root() {
        assert_eq!(href_for("en", Some("2.20"), ""), "/en/2.20");
    }
}
