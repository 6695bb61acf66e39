//! Round-trip validation
//!
//! A freshly parsed tree must print back to exactly its input. This module
//! performs that comparison and describes any difference as a unified diff.
//!
//! # Example
//!
//! ```rust,ignore
//! use lst_core::round_trip::RoundTripResult;
//!
//! let result = RoundTripResult::compare("main.tf", "a = 1\n", "a = 1\n");
//! assert!(result.is_valid());
//! ```

use crate::markers::RoundTripMismatch;
use crate::source::SourceFile;
use similar::TextDiff;
use std::path::Path;

/// Result of comparing a printed tree against its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripResult {
    /// Unified diff when the texts differ
    diff: Option<String>,
}

impl RoundTripResult {
    pub fn compare(path: &Path, original: &str, printed: &str) -> Self {
        if original == printed {
            return Self { diff: None };
        }
        Self {
            diff: Some(unified_diff(path, original, printed)),
        }
    }

    /// Print `source` without decorations and compare with `original`
    pub fn check<S: SourceFile>(source: &S, original: &str) -> Self {
        Self::compare(source.source_path(), original, &source.print_sanitized())
    }

    pub fn is_valid(&self) -> bool {
        self.diff.is_none()
    }

    pub fn diff(&self) -> Option<&str> {
        self.diff.as_deref()
    }

    /// Marker recording the mismatch, if there is one
    pub fn into_marker(self) -> Option<RoundTripMismatch> {
        self.diff.map(RoundTripMismatch::new)
    }
}

/// Line-based unified diff between the input and the printed output
pub fn unified_diff(path: &Path, original: &str, printed: &str) -> String {
    let label = path.display().to_string();
    TextDiff::from_lines(original, printed)
        .unified_diff()
        .context_radius(2)
        .header(&format!("{label} (input)"), &format!("{label} (printed)"))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_valid() {
        let result = RoundTripResult::compare(Path::new("a.tf"), "x = 1\n", "x = 1\n");
        assert!(result.is_valid());
        assert!(result.into_marker().is_none());
    }

    #[test]
    fn mismatch_produces_diff() {
        let result = RoundTripResult::compare(Path::new("a.tf"), "x = 1\n", "x=1\n");
        assert!(!result.is_valid());
        let diff = result.diff().unwrap();
        assert!(diff.contains("-x = 1"));
        assert!(diff.contains("+x=1"));
        assert!(diff.contains("a.tf (input)"));
    }
}
