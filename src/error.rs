//! Load-time and resolution-time error types.

use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

// ============================================================================
// LoadError
// ============================================================================

/// A single load-time defect. All variants abort startup; no partial index
/// is ever served.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// Malformed frontmatter or body structure in one content file.
    #[error("{}: malformed page\n  {detail}", path.display())]
    Structural { path: PathBuf, detail: String },

    /// A page declares versions its content area does not support.
    #[error(
        "{}: versions [{}] are not supported by content area `{area}`",
        path.display(),
        versions.join(", ")
    )]
    VersionMismatch {
        path: PathBuf,
        area: String,
        versions: Vec<String>,
    },

    /// Two distinct pages derive the same permalink string.
    #[error("permalink `{permalink}` claimed by both `{first}` and `{second}`")]
    PermalinkCollision {
        permalink: String,
        first: String,
        second: String,
    },

    /// Two redirect sources claim the same old path with different targets.
    #[error("redirect `{old_path}` points at both `{first}` and `{second}`")]
    RedirectCollision {
        old_path: String,
        first: String,
        second: String,
    },
}

// ============================================================================
// LoadDiagnostics
// ============================================================================

/// Aggregate of every defect found during one load attempt.
///
/// Errors are collected across all offending files before surfacing, so a
/// single load reports every problem rather than only the first.
#[derive(Debug, Default)]
pub struct LoadDiagnostics {
    errors: Vec<LoadError>,
    /// Non-fatal findings (stray translation files, dead redirects).
    warnings: Vec<String>,
}

impl LoadDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Fold another aggregate into this one.
    pub fn merge(&mut self, other: LoadDiagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[LoadError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Convert to Result, preserving warnings on the Ok side.
    pub fn into_result(self) -> Result<Vec<String>, Self> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for LoadDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "content load failed:".red().bold())?;
        for err in &self.errors {
            writeln!(f)?;
            write!(f, "{} {err}", "→".red())?;
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadDiagnostics {}

// ============================================================================
// ResolveError
// ============================================================================

/// The only resolution-time fault: an authoritative-language path with no
/// page behind it. Raised only by a strict resolver, and only when the
/// original request already targeted the authoritative language.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("no page found for authoritative path `{href}`")]
    UnresolvedAuthoritativePage { href: String },
}
