//! Release registry: self-managed release catalog with lifecycle dates.
//!
//! Static lookup tables built once at startup from the releases data file.
//! Downstream components branch on a release's URL-format era through the
//! precomputed partitions here instead of re-deriving version ranges.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use semver::Version;
use serde::Deserialize;

use crate::core::Date;

/// The hosted rolling channel. Always supported, never deprecated, and
/// versionless in URLs (its edition is the site default).
pub const HOSTED_CHANNEL: &str = "cloud";

/// Last self-managed release whose URLs nested under a `server/` prefix
/// (`/<lang>/server/<release>/<path>`) before the flat URL scheme.
const LEGACY_PATH_CUTOVER: &str = "2.18";

/// Last release served from the external archive host after deprecation.
const ARCHIVE_HOST_CUTOVER: &str = "2.12";

/// Last release whose search UI predates the current client.
const LEGACY_SEARCH_CUTOVER: &str = "2.16";

/// Lifecycle dates for one release
#[derive(Debug, Clone, Deserialize)]
pub struct Lifecycle {
    /// General availability date (`YYYY-MM-DD`)
    pub release: String,
    /// End-of-support date (`YYYY-MM-DD`)
    pub deprecation: String,
}

/// On-disk shape of the releases data file
#[derive(Debug, Deserialize)]
struct ReleaseFile {
    supported: Vec<String>,
    deprecated: Vec<String>,
    #[serde(default)]
    dates: BTreeMap<String, Lifecycle>,
}

/// Catalog of self-managed releases, newest first.
#[derive(Debug, Clone)]
pub struct ReleaseRegistry {
    supported: Vec<String>,
    deprecated: Vec<String>,
    all: Vec<String>,
    dates: BTreeMap<String, Lifecycle>,
    next_deprecation_date: Date,
    /// Deprecated releases whose URLs used the `server/` path prefix.
    deprecated_with_legacy_paths: Vec<String>,
    /// Deprecated releases served from the external archive host.
    deprecated_on_archive_host: Vec<String>,
    /// Deprecated releases whose search UI predates the current client.
    deprecated_with_legacy_search: Vec<String>,
}

impl ReleaseRegistry {
    /// Load the registry from a TOML data file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read releases file `{}`", path.display()))?;
        let file: ReleaseFile = toml::from_str(&raw)
            .with_context(|| format!("malformed releases file `{}`", path.display()))?;
        Self::from_parts(file.supported, file.deprecated, file.dates)
    }

    /// Build the registry from already-parsed tables.
    ///
    /// Fails fast if the oldest supported release has no deprecation date:
    /// that date drives the deprecation banner and must exist.
    pub fn from_parts(
        supported: Vec<String>,
        deprecated: Vec<String>,
        dates: BTreeMap<String, Lifecycle>,
    ) -> Result<Self> {
        if supported.is_empty() {
            bail!("releases file lists no supported releases");
        }
        for id in supported.iter().chain(&deprecated) {
            if release_version(id).is_none() {
                bail!("release id `{id}` is not a dotted version number");
            }
        }

        let oldest_supported = supported.last().expect("supported is non-empty");
        let next_deprecation_date = dates
            .get(oldest_supported)
            .and_then(|l| Date::parse(&l.deprecation))
            .with_context(|| {
                format!("releases file has no deprecation date for oldest supported release `{oldest_supported}`")
            })?;

        let partition = |cutover: &str| -> Vec<String> {
            deprecated
                .iter()
                .filter(|id| at_or_before(id, cutover))
                .cloned()
                .collect()
        };
        let deprecated_with_legacy_paths = partition(LEGACY_PATH_CUTOVER);
        let deprecated_on_archive_host = partition(ARCHIVE_HOST_CUTOVER);
        let deprecated_with_legacy_search = partition(LEGACY_SEARCH_CUTOVER);

        let all = supported.iter().chain(deprecated.iter()).cloned().collect();
        Ok(Self {
            deprecated_with_legacy_paths,
            deprecated_on_archive_host,
            deprecated_with_legacy_search,
            supported,
            deprecated,
            all,
            dates,
            next_deprecation_date,
        })
    }

    /// Supported releases, newest first.
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Deprecated releases, newest first.
    pub fn deprecated(&self) -> &[String] {
        &self.deprecated
    }

    /// Every self-managed release, supported then deprecated.
    pub fn all(&self) -> &[String] {
        &self.all
    }

    /// Newest supported release.
    pub fn latest(&self) -> &str {
        &self.supported[0]
    }

    /// Oldest release still in support.
    pub fn oldest_supported(&self) -> &str {
        self.supported.last().expect("supported is non-empty")
    }

    /// When the oldest supported release leaves support.
    pub fn next_deprecation_date(&self) -> Date {
        self.next_deprecation_date
    }

    /// Whether the oldest supported release has passed its deprecation date.
    pub fn is_oldest_release_deprecated(&self) -> bool {
        Date::today() > self.next_deprecation_date
    }

    /// Lifecycle dates for a release, if the data file has them.
    pub fn lifecycle(&self, id: &str) -> Option<&Lifecycle> {
        self.dates.get(id)
    }

    pub fn deprecated_with_legacy_paths(&self) -> &[String] {
        &self.deprecated_with_legacy_paths
    }

    pub fn deprecated_on_archive_host(&self) -> &[String] {
        &self.deprecated_on_archive_host
    }

    pub fn deprecated_with_legacy_search(&self) -> &[String] {
        &self.deprecated_with_legacy_search
    }

    /// Whether a release's URLs predate the flat scheme and nested under
    /// the `server/` prefix. Any tier, not just deprecated releases.
    pub fn uses_legacy_path_scheme(&self, id: &str) -> bool {
        at_or_before(id, LEGACY_PATH_CUTOVER)
    }

    /// Every known version id in resolution order: the hosted channel
    /// first, then self-managed releases newest first.
    pub fn all_version_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(HOSTED_CHANNEL).chain(self.all.iter().map(String::as_str))
    }

    /// Check whether an id names the hosted channel or a known release.
    pub fn is_known_version(&self, id: &str) -> bool {
        id == HOSTED_CHANNEL || self.all.iter().any(|v| v == id)
    }

    /// Position of a version id in resolution order (for sorting page
    /// version sets). Unknown ids sort last.
    pub fn version_order(&self, id: &str) -> usize {
        self.all_version_ids()
            .position(|v| v == id)
            .unwrap_or(usize::MAX)
    }
}

/// Parse a release id (`2.22`, `11.10.340`) into a comparable version,
/// padding missing components with zeroes.
fn release_version(id: &str) -> Option<Version> {
    let dots = id.bytes().filter(|&b| b == b'.').count();
    let padded = match dots {
        0 => format!("{id}.0.0"),
        1 => format!("{id}.0"),
        2 => id.to_string(),
        _ => return None,
    };
    Version::parse(&padded).ok()
}

/// Semantic comparison of two release ids (never string comparison:
/// `2.9` must sort before `2.18`).
fn at_or_before(id: &str, cutover: &str) -> bool {
    match (release_version(id), release_version(cutover)) {
        (Some(a), Some(b)) => a <= b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifecycle(release: &str, deprecation: &str) -> Lifecycle {
        Lifecycle {
            release: release.to_string(),
            deprecation: deprecation.to_string(),
        }
    }

    fn registry() -> ReleaseRegistry {
        let supported = vec!["2.22".to_string(), "2.21".to_string(), "2.20".to_string()];
        let deprecated = vec![
            "2.19".to_string(),
            "2.18".to_string(),
            "2.17".to_string(),
            "2.16".to_string(),
            "2.13".to_string(),
            "2.9".to_string(),
            "11.10.340".to_string(),
        ];
        let mut dates = BTreeMap::new();
        dates.insert("2.20".to_string(), lifecycle("2020-02-11", "2021-02-11"));
        dates.insert("2.21".to_string(), lifecycle("2020-06-09", "2021-06-09"));
        dates.insert("2.22".to_string(), lifecycle("2020-09-23", "2021-09-23"));
        ReleaseRegistry::from_parts(supported, deprecated, dates).unwrap()
    }

    #[test]
    fn test_latest_and_oldest() {
        let reg = registry();
        assert_eq!(reg.latest(), "2.22");
        assert_eq!(reg.oldest_supported(), "2.20");
        assert_eq!(reg.all().len(), 10);
    }

    #[test]
    fn test_missing_deprecation_date_fails() {
        let supported = vec!["2.22".to_string(), "2.20".to_string()];
        let err = ReleaseRegistry::from_parts(supported, vec![], BTreeMap::new());
        assert!(err.is_err());
        let msg = format!("{:#}", err.unwrap_err());
        assert!(msg.contains("2.20"));
    }

    #[test]
    fn test_empty_supported_fails() {
        assert!(ReleaseRegistry::from_parts(vec![], vec![], BTreeMap::new()).is_err());
    }

    #[test]
    fn test_non_version_id_fails() {
        let supported = vec!["banana".to_string()];
        assert!(ReleaseRegistry::from_parts(supported, vec![], BTreeMap::new()).is_err());
    }

    #[test]
    fn test_legacy_path_partition() {
        let reg = registry();
        // Everything <= 2.18, semantically compared
        assert_eq!(
            reg.deprecated_with_legacy_paths(),
            &["2.18", "2.17", "2.16", "2.13", "2.9"]
        );
    }

    #[test]
    fn test_archive_host_partition() {
        let reg = registry();
        assert_eq!(reg.deprecated_on_archive_host(), &["2.9"]);
    }

    #[test]
    fn test_legacy_search_partition() {
        let reg = registry();
        assert_eq!(
            reg.deprecated_with_legacy_search(),
            &["2.16", "2.13", "2.9"]
        );
    }

    #[test]
    fn test_semantic_not_string_comparison() {
        // String comparison would put "2.9" after "2.18"
        assert!(at_or_before("2.9", "2.18"));
        assert!(!at_or_before("2.19", "2.18"));
        // Three-component historical release ids still compare
        assert!(!at_or_before("11.10.340", "2.18"));
    }

    #[test]
    fn test_uses_legacy_path_scheme() {
        let reg = registry();
        assert!(reg.uses_legacy_path_scheme("2.18"));
        assert!(reg.uses_legacy_path_scheme("2.0"));
        assert!(!reg.uses_legacy_path_scheme("2.20"));
        assert!(!reg.uses_legacy_path_scheme(HOSTED_CHANNEL));
    }

    #[test]
    fn test_all_version_ids_order() {
        let reg = registry();
        let ids: Vec<_> = reg.all_version_ids().collect();
        assert_eq!(ids[0], HOSTED_CHANNEL);
        assert_eq!(ids[1], "2.22");
        assert!(reg.is_known_version("cloud"));
        assert!(reg.is_known_version("2.13"));
        assert!(!reg.is_known_version("9.9"));
    }

    #[test]
    fn test_version_order() {
        let reg = registry();
        assert_eq!(reg.version_order(HOSTED_CHANNEL), 0);
        assert!(reg.version_order("2.22") < reg.version_order("2.20"));
        assert_eq!(reg.version_order("9.9"), usize::MAX);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("releases.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"
supported = ["2.22", "2.21"]
deprecated = ["2.20"]

[dates."2.21"]
release = "2020-06-09"
deprecation = "2021-06-09"
"#
        )
        .unwrap();

        let reg = ReleaseRegistry::load(&path).unwrap();
        assert_eq!(reg.latest(), "2.22");
        assert_eq!(reg.next_deprecation_date(), Date::new(2021, 6, 9));
    }
}
