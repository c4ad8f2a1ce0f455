//! Page metadata from TOML (`+++`) frontmatter.

use serde::Deserialize;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Page metadata from `+++` frontmatter in markup files
///
/// # Standard Fields
///
/// | Field           | Type           | Description                         |
/// |-----------------|----------------|-------------------------------------|
/// | `title`         | `String`       | Page title (required)               |
/// | `short_title`   | `String`       | Abbreviated title for nav/TOC       |
/// | `intro`         | `String`       | Lead paragraph (may contain markup) |
/// | `versions`      | `Vec<String>`  | Applicable versions (empty = area's full set) |
/// | `redirect_from` | `Vec<String>`  | Old content paths forwarding here   |
/// | `hidden`        | `bool`         | Exclude from navigation surfaces    |
///
/// # Custom Fields (`extra`)
///
/// Any additional fields are captured in `extra` as raw JSON; feature
/// flags live here rather than growing the struct per experiment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub intro: Option<String>,
    /// Versions this page applies to, in any order. Validated against the
    /// parent content area's version set at construction.
    pub versions: Vec<String>,
    /// Author-declared old content paths that should forward to this page.
    pub redirect_from: Vec<String>,
    pub hidden: bool,
    /// Additional user-defined fields (raw JSON).
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Split `+++` fenced TOML frontmatter from the body and parse it.
///
/// Errors carry field-level detail from the TOML parser; the caller owns
/// attaching the file path.
pub fn parse(raw: &str) -> Result<(PageMeta, &str), String> {
    let (fm, body) = detect_frontmatter(raw)
        .ok_or_else(|| "missing `+++` frontmatter fence".to_string())?;

    let meta: PageMeta =
        toml::from_str(fm).map_err(|e| format!("invalid frontmatter: {}", e.message()))?;

    match &meta.title {
        Some(t) if !t.trim().is_empty() => {}
        _ => return Err("missing required field `title`".to_string()),
    }

    Ok((meta, body))
}

/// Detect and extract `+++` fenced frontmatter.
/// Returns `(frontmatter, body)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str)> {
    let trimmed = content.trim_start();

    if trimmed.starts_with("+++")
        && let Some(end) = trimmed[3..].find("\n+++")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('\n');
        return Some((fm, body));
    }

    None
}
