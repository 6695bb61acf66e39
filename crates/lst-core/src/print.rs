//! Output buffer shared by every language printer

use crate::markers::{Markers, SearchResult};
use crate::space::Space;

/// How markers are rendered into printed output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPrinter {
    /// Render search results as `~~>` or `~~(description)~~>`
    #[default]
    Default,
    /// Render nothing; output is exactly the source text
    Sanitized,
}

impl MarkerPrinter {
    /// Decoration to emit before an element carrying `markers`
    ///
    /// Returns `None` when nothing is to be rendered.
    pub fn before_syntax(&self, markers: &Markers) -> Option<String> {
        if *self == MarkerPrinter::Sanitized {
            return None;
        }
        let hit = markers.find_first::<SearchResult>()?;
        Some(match hit.description() {
            Some(description) => format!("~~({description})~~>"),
            None => "~~>".to_string(),
        })
    }
}

/// Append-only text buffer used by printers
#[derive(Debug, Default)]
pub struct PrintOutputCapture {
    out: String,
    marker_printer: MarkerPrinter,
}

impl PrintOutputCapture {
    pub fn new(marker_printer: MarkerPrinter) -> Self {
        Self {
            out: String::new(),
            marker_printer,
        }
    }

    pub fn sanitized() -> Self {
        Self::new(MarkerPrinter::Sanitized)
    }

    pub fn marker_printer(&self) -> MarkerPrinter {
        self.marker_printer
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        self
    }

    pub fn append_space(&mut self, space: &Space) -> &mut Self {
        space.print_to(&mut self.out);
        self
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::CommentSyntax;

    #[test]
    fn default_printer_renders_search_results() {
        let markers = Markers::empty().search_result(None);
        assert_eq!(
            MarkerPrinter::Default.before_syntax(&markers).as_deref(),
            Some("~~>")
        );

        let markers = Markers::empty().search_result(Some("found"));
        assert_eq!(
            MarkerPrinter::Default.before_syntax(&markers).as_deref(),
            Some("~~(found)~~>")
        );
        assert_eq!(MarkerPrinter::Sanitized.before_syntax(&markers), None);
        assert_eq!(MarkerPrinter::Default.before_syntax(&Markers::empty()), None);
    }

    #[test]
    fn capture_appends_spaces_verbatim() {
        let mut capture = PrintOutputCapture::sanitized();
        capture
            .append("a")
            .append_space(&Space::parse(" /* c */ ", &CommentSyntax::HCL))
            .append("b");
        assert_eq!(capture.into_output(), "a /* c */ b");
    }
}
