//! Human-readable reporting of parse failures and round-trip mismatches

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use lst_core::{HasMarkers, ParseErrorTree, Parsed, RoundTripMismatch, SourceFile};
use std::io::Write;

/// Problems found while checking one batch of files
#[derive(Debug, Default)]
pub struct CheckSummary {
    pub files_checked: usize,
    pub parse_errors: usize,
    pub mismatches: usize,
}

impl CheckSummary {
    pub fn failures(&self) -> usize {
        self.parse_errors + self.mismatches
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

/// Writes diagnostics for parsed files
pub struct Reporter {
    colors: bool,
}

impl Reporter {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Report whatever is wrong with `parsed`, updating `summary`
    pub fn report<S: SourceFile>(
        &self,
        parsed: &Parsed<S>,
        summary: &mut CheckSummary,
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        summary.files_checked += 1;
        match parsed {
            Parsed::Error(error) => {
                summary.parse_errors += 1;
                self.parse_error(error, out)
            }
            Parsed::Source(source) => match source.markers().find_first::<RoundTripMismatch>() {
                Some(mismatch) => {
                    summary.mismatches += 1;
                    writeln!(
                        out,
                        "{} does not print back to its input:",
                        source.source_path().display()
                    )?;
                    writeln!(out, "{}", mismatch.diff())
                }
                None => Ok(()),
            },
        }
    }

    /// Render a parse failure, pointing at the offending byte when known
    pub fn parse_error(&self, error: &ParseErrorTree, out: &mut impl Write) -> std::io::Result<()> {
        let name = error.source_path().display().to_string();
        let Some(offset) = error.offset() else {
            return writeln!(out, "error: {}: {}", name, error.error());
        };

        let text = error.text();
        let start = offset.min(text.len());
        let end = text[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());
        Report::build(ReportKind::Error, (name.as_str(), start..end))
            .with_config(Config::default().with_color(self.colors))
            .with_message(error.error())
            .with_label(
                Label::new((name.as_str(), start..end))
                    .with_message("parsing stopped here")
                    .with_color(Color::Red),
            )
            .finish()
            .write((name.as_str(), Source::from(text)), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lst_core::{LstError, Markers};
    use std::path::Path;
    use std::sync::Arc;

    fn render(parsed: &Parsed<ParseErrorTree>) -> (String, CheckSummary) {
        let mut summary = CheckSummary::default();
        let mut out = Vec::new();
        Reporter::new(false)
            .report(parsed, &mut summary, &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn syntax_errors_point_at_their_offset() {
        let error = LstError::syntax("main.tf", 4, "unexpected `=`");
        let tree = ParseErrorTree::new(Path::new("main.tf"), "a = = 1\n", &error);
        let (out, summary) = render(&Parsed::Error(Arc::new(tree)));

        assert_eq!(summary.parse_errors, 1);
        assert!(!summary.is_clean());
        assert!(out.contains("unexpected `=`"));
        assert!(out.contains("main.tf"));
        assert!(out.contains("parsing stopped here"));
    }

    #[test]
    fn io_errors_have_no_source_excerpt() {
        let error = LstError::io(
            "gone.tf",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let tree = ParseErrorTree::new(Path::new("gone.tf"), "", &error);
        let (out, _) = render(&Parsed::Error(Arc::new(tree)));
        assert!(out.starts_with("error: gone.tf:"));
    }

    #[test]
    fn clean_sources_report_nothing() {
        let error = LstError::internal("unused");
        let tree = ParseErrorTree::new(Path::new("ok.tf"), "a = 1\n", &error)
            .with_markers(Markers::empty());
        let mut summary = CheckSummary::default();
        let mut out = Vec::new();
        Reporter::new(false)
            .report(
                &Parsed::<ParseErrorTree>::Source(Arc::new(tree)),
                &mut summary,
                &mut out,
            )
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(summary.files_checked, 1);
        assert!(summary.is_clean());
    }
}
