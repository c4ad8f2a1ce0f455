//! Path resolution: inbound request path -> indexed page.
//!
//! Layered fallback, short-circuiting on first success:
//!
//! 1. normalize the path
//! 2. direct index lookup
//! 3. versioned candidate synthesis (every known version)
//! 4. redirect hops over the candidates (chains of two resolve)
//! 5. cross-language fallback to the authoritative edition
//!
//! Resolution is pure and read-only against the frozen index and redirect
//! table; any number of calls may run concurrently without coordination.

mod candidates;

pub use candidates::{content_suffix, versioned_candidates};

use crate::core::UrlPath;
use crate::error::ResolveError;
use crate::language;
use crate::log;
use crate::page::{Page, PageIndex};
use crate::redirect::RedirectTable;
use crate::release::ReleaseRegistry;

/// Read-only resolver over a frozen index and redirect table
///
/// `strict` selects the failure-mode policy for unresolved
/// authoritative-language paths: serving mode reports them (fatal when the
/// request itself was authoritative), test tooling gets a plain "not
/// found" so suites over intentionally-missing fixtures don't abort.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a PageIndex,
    redirects: &'a RedirectTable,
    registry: &'a ReleaseRegistry,
    strict: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(
        index: &'a PageIndex,
        redirects: &'a RedirectTable,
        registry: &'a ReleaseRegistry,
        strict: bool,
    ) -> Self {
        Self {
            index,
            redirects,
            registry,
            strict,
        }
    }

    /// Resolve a path in the authoritative language.
    pub fn find_page(&self, href: &str) -> Result<Option<&'a Page>, ResolveError> {
        self.find_page_in(href, language::authoritative().code)
    }

    /// Resolve a path for one language, falling back to the authoritative
    /// edition when the translation is missing.
    ///
    /// Fallback depth is always exactly one, so it runs as a bounded
    /// two-step pipeline rather than open recursion.
    pub fn find_page_in(
        &self,
        href: &str,
        language_code: &str,
    ) -> Result<Option<&'a Page>, ResolveError> {
        let normalized = UrlPath::from_request(href);
        let authoritative = language::authoritative().code;

        if let Some(page) = self.attempt(&normalized, language_code) {
            return Ok(Some(page));
        }
        if language_code == authoritative {
            // Original request already targeted the authoritative language
            return self.unresolved(&normalized, None);
        }

        // Untranslated content: retry against the authoritative edition.
        // An expected non-event; only the terminal miss below is notable.
        if let Some(page) = self.attempt(&normalized, authoritative) {
            return Ok(Some(page));
        }
        self.unresolved(&normalized, Some(language_code))
    }

    /// One resolution pass for one language: direct hit, then versioned
    /// candidates with redirect correction.
    fn attempt(&self, href: &UrlPath, language_code: &str) -> Option<&'a Page> {
        if let Some(page) = self.index.get(href.as_str()) {
            return Some(page);
        }

        let candidates = versioned_candidates(href, language_code, self.registry);

        // First candidate (in version order) that reaches an index key
        // after at most one redirect hop; a candidate whose hop target is
        // itself a redirect source counts if the second hop lands.
        let selected = candidates.iter().find(|candidate| {
            let once = self.redirects.resolve_hop(candidate.as_str());
            self.index.contains(once) || self.index.contains(self.redirects.resolve_hop(once))
        })?;

        // Chained-redirect correction: an old path may point to a
        // once-new, now-also-old path, so hop again after selection.
        let mut path = self.redirects.resolve_hop(selected.as_str());
        if !self.index.contains(path) {
            path = self.redirects.resolve_hop(path);
        }
        self.index.get(path)
    }

    /// Terminal authoritative-language miss.
    fn unresolved(
        &self,
        href: &UrlPath,
        source_language: Option<&str>,
    ) -> Result<Option<&'a Page>, ResolveError> {
        if !self.strict {
            return Ok(None);
        }
        match source_language {
            // The request itself was authoritative: surface and fix right away
            None => Err(ResolveError::UnresolvedAuthoritativePage {
                href: href.as_str().to_string(),
            }),
            // Tail of a translation fallback chain: report, keep serving
            Some(source) => {
                log!("resolve"; "no authoritative fallback for {source} request: {href}");
                Ok(None)
            }
        }
    }
}
