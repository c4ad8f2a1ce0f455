//! Language catalog.
//!
//! Process-wide constant table. Exactly one language is authoritative; its
//! content tree defines which content paths exist, and every other language
//! mirrors that structure.

use serde::Serialize;

/// One site language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO-like language code used as the URL prefix (e.g. `en`)
    pub code: &'static str,
    /// Display name in the language itself
    pub name: &'static str,
    /// hreflang tag for alternate-link generation
    pub hreflang: &'static str,
    /// Whether this language's content tree is the source of truth
    pub authoritative: bool,
}

/// All configured site languages, authoritative language first.
pub const LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        name: "English",
        hreflang: "en",
        authoritative: true,
    },
    Language {
        code: "es",
        name: "Español",
        hreflang: "es",
        authoritative: false,
    },
    Language {
        code: "fr",
        name: "Français",
        hreflang: "fr",
        authoritative: false,
    },
    Language {
        code: "ja",
        name: "日本語",
        hreflang: "ja",
        authoritative: false,
    },
];

/// The single authoritative language.
pub fn authoritative() -> &'static Language {
    // LANGUAGES is a compile-time constant with the authoritative entry first
    &LANGUAGES[0]
}

/// Look up a language by its code.
pub fn by_code(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// Check whether a code names a configured language.
#[inline]
pub fn is_known(code: &str) -> bool {
    by_code(code).is_some()
}

/// Split a leading language segment off a path.
///
/// `/en/guide/setup` -> `(Some(en), "guide/setup")`
/// `/guide/setup` -> `(None, "guide/setup")`
pub fn strip_language(path: &str) -> (Option<&'static Language>, &str) {
    let trimmed = path.trim_matches('/');
    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };
    match by_code(first) {
        Some(lang) => (Some(lang), rest),
        None => (None, trimmed),
    }
}

/// One language's href for a logical content path.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageVariant {
    pub name: &'static str,
    pub code: &'static str,
    pub hreflang: &'static str,
    pub href: String,
}

/// Hrefs for one logical path across every configured language.
///
/// The language prefix of `href` (if any) is replaced per language; the
/// version qualifier and content path carry over unchanged.
pub fn language_variants(href: &str) -> Vec<LanguageVariant> {
    let (_, suffix) = strip_language(href);
    LANGUAGES
        .iter()
        .map(|lang| {
            let href = if suffix.is_empty() {
                format!("/{}", lang.code)
            } else {
                format!("/{}/{}", lang.code, suffix)
            };
            LanguageVariant {
                name: lang.name,
                code: lang.code,
                hreflang: lang.hreflang,
                href,
            }
        })
        .collect()
}
