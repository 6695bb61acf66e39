//! Source file roots and the parse-error placeholder

use crate::error::LstError;
use crate::markers::Markers;
use crate::print::MarkerPrinter;
use crate::tree::{HasMarkers, TreeId};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Root of a parsed file in any language
pub trait SourceFile: HasMarkers + Send + Sync + 'static {
    fn id(&self) -> TreeId;

    fn source_path(&self) -> &Path;

    fn with_source_path(&self, path: PathBuf) -> Self
    where
        Self: Sized;

    fn print_with(&self, marker_printer: MarkerPrinter) -> String;

    /// Print with marker decorations
    fn print_all(&self) -> String {
        self.print_with(MarkerPrinter::Default)
    }

    /// Print exactly the source text, ignoring markers
    fn print_sanitized(&self) -> String {
        self.print_with(MarkerPrinter::Sanitized)
    }
}

/// Stand-in for a file that could not be parsed
///
/// Holds the original text so printing reproduces the input verbatim.
#[derive(Debug, Clone)]
pub struct ParseErrorTree {
    id: TreeId,
    source_path: PathBuf,
    markers: Markers,
    text: String,
    error: String,
    offset: Option<usize>,
}

impl ParseErrorTree {
    pub fn new(source_path: impl Into<PathBuf>, text: impl Into<String>, error: &LstError) -> Self {
        Self {
            id: TreeId::random(),
            source_path: source_path.into(),
            markers: Markers::empty(),
            text: text.into(),
            error: error.to_string(),
            offset: error.offset(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Detail message of the failure
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Byte offset of a syntax error
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl HasMarkers for ParseErrorTree {
    fn markers(&self) -> &Markers {
        &self.markers
    }

    fn with_markers(&self, markers: Markers) -> Self {
        Self {
            markers,
            ..self.clone()
        }
    }
}

impl SourceFile for ParseErrorTree {
    fn id(&self) -> TreeId {
        self.id
    }

    fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn with_source_path(&self, path: PathBuf) -> Self {
        Self {
            source_path: path,
            ..self.clone()
        }
    }

    fn print_with(&self, _marker_printer: MarkerPrinter) -> String {
        self.text.clone()
    }
}

/// Outcome of parsing one input: a language root or a placeholder
#[derive(Debug)]
pub enum Parsed<S> {
    Source(Arc<S>),
    Error(Arc<ParseErrorTree>),
}

impl<S> Clone for Parsed<S> {
    fn clone(&self) -> Self {
        match self {
            Parsed::Source(source) => Parsed::Source(Arc::clone(source)),
            Parsed::Error(error) => Parsed::Error(Arc::clone(error)),
        }
    }
}

impl<S> Parsed<S> {
    pub fn as_source(&self) -> Option<&Arc<S>> {
        match self {
            Parsed::Source(source) => Some(source),
            Parsed::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&Arc<ParseErrorTree>> {
        match self {
            Parsed::Source(_) => None,
            Parsed::Error(error) => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Parsed::Error(_))
    }
}

impl<S: SourceFile> HasMarkers for Parsed<S> {
    fn markers(&self) -> &Markers {
        match self {
            Parsed::Source(source) => source.markers(),
            Parsed::Error(error) => error.markers(),
        }
    }

    fn with_markers(&self, markers: Markers) -> Self {
        match self {
            Parsed::Source(source) => Parsed::Source(source.with_markers(markers)),
            Parsed::Error(error) => Parsed::Error(error.with_markers(markers)),
        }
    }
}

impl<S: SourceFile> SourceFile for Parsed<S> {
    fn id(&self) -> TreeId {
        match self {
            Parsed::Source(source) => source.id(),
            Parsed::Error(error) => error.id(),
        }
    }

    fn source_path(&self) -> &Path {
        match self {
            Parsed::Source(source) => source.source_path(),
            Parsed::Error(error) => error.source_path(),
        }
    }

    fn with_source_path(&self, path: PathBuf) -> Self {
        match self {
            Parsed::Source(source) => Parsed::Source(Arc::new(source.with_source_path(path))),
            Parsed::Error(error) => Parsed::Error(Arc::new(error.with_source_path(path))),
        }
    }

    fn print_with(&self, marker_printer: MarkerPrinter) -> String {
        match self {
            Parsed::Source(source) => source.print_with(marker_printer),
            Parsed::Error(error) => error.print_with(marker_printer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_prints_original_text() {
        let err = LstError::syntax("broken.tf", 4, "unexpected end of input");
        let tree = ParseErrorTree::new("broken.tf", "a = {", &err);
        assert_eq!(tree.print_all(), "a = {");
        assert_eq!(tree.offset(), Some(4));
        assert!(tree.error().contains("unexpected end of input"));
    }

    #[test]
    fn parsed_dispatches_to_placeholder() {
        let err = LstError::internal("boom");
        let parsed: Parsed<ParseErrorTree> =
            Parsed::Error(Arc::new(ParseErrorTree::new("x", "text", &err)));
        assert!(parsed.is_error());
        assert_eq!(parsed.print_sanitized(), "text");

        let moved = parsed.with_source_path(PathBuf::from("y"));
        assert_eq!(moved.source_path(), Path::new("y"));
        assert_eq!(moved.id(), parsed.id());
    }
}
