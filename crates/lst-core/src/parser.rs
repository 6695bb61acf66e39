//! Parser interface and batch driver
//!
//! A language implements [`Parser::parse_text`] for a single file. The
//! provided methods turn that into a batch operation that never fails as a
//! whole: unreadable or malformed inputs are reported to the
//! [`ExecutionContext`]'s [`ErrorSink`] and represented by a
//! [`ParseErrorTree`] placeholder, and every fresh tree is checked to print
//! back to its input.

use crate::config::ParserOptions;
use crate::error::{ErrorKind, LstError, Result};
use crate::markers::ParseWarning;
use crate::round_trip::RoundTripResult;
use crate::source::{ParseErrorTree, Parsed, SourceFile};
use crate::space::{CommentSyntax, Space, trivia_len};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Where the text of an input comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
}

/// One unit of parser input
#[derive(Debug, Clone)]
pub struct Input {
    path: PathBuf,
    source: InputSource,
}

impl Input {
    pub fn from_string(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: InputSource::Text(text.into()),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            source: InputSource::File(path.clone()),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &InputSource {
        &self.source
    }

    pub fn read(&self) -> Result<String> {
        match &self.source {
            InputSource::Text(text) => Ok(text.clone()),
            InputSource::File(path) => fs::read_to_string(path).map_err(|e| LstError::io(path, e)),
        }
    }
}

/// Receiver of per-file failures during a batch
pub trait ErrorSink: Send + Sync {
    fn report(&self, path: &Path, error: &LstError);
}

/// Logs every failure through `tracing`
#[derive(Debug, Default)]
pub struct LoggingErrorSink;

impl ErrorSink for LoggingErrorSink {
    fn report(&self, path: &Path, error: &LstError) {
        tracing::warn!("Failed to parse {}: {}", path.display(), error);
    }
}

/// A failure recorded by [`CollectingErrorSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub offset: Option<usize>,
    pub message: String,
}

/// Keeps every failure for later inspection
#[derive(Debug, Default)]
pub struct CollectingErrorSink {
    errors: Mutex<Vec<ReportedError>>,
}

impl CollectingErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<ReportedError> {
        match self.errors.lock() {
            Ok(errors) => errors.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors().is_empty()
    }
}

impl ErrorSink for CollectingErrorSink {
    fn report(&self, path: &Path, error: &LstError) {
        let reported = ReportedError {
            path: path.to_path_buf(),
            kind: error.kind(),
            offset: error.offset(),
            message: error.to_string(),
        };
        match self.errors.lock() {
            Ok(mut errors) => errors.push(reported),
            Err(poisoned) => poisoned.into_inner().push(reported),
        }
    }
}

/// Per-batch collaborators
#[derive(Clone)]
pub struct ExecutionContext {
    sink: Arc<dyn ErrorSink>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(Arc::new(LoggingErrorSink))
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext").finish_non_exhaustive()
    }
}

impl ExecutionContext {
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        Self { sink }
    }

    pub fn report(&self, path: &Path, error: &LstError) {
        self.sink.report(path, error);
    }
}

/// Text to tree conversion for one language
pub trait Parser: Send + Sync {
    type Source: SourceFile;

    /// Whether this parser handles files at `path`
    fn accept(&self, path: &Path) -> bool;

    /// Plausible path for text that arrived without one
    fn source_path_from_source_text(&self, prefix: &Path, text: &str) -> PathBuf;

    fn options(&self) -> ParserOptions;

    /// Parse the complete text of one file
    fn parse_text(&self, path: &Path, text: &str) -> Result<Self::Source>;

    /// Parse one input, turning every failure into a placeholder
    fn parse_input(
        &self,
        input: &Input,
        relative_to: Option<&Path>,
        ctx: &ExecutionContext,
    ) -> Parsed<Self::Source> {
        let path = relativize(input.path(), relative_to);
        let text = match input.read() {
            Ok(text) => text,
            Err(err) => {
                ctx.report(&path, &err);
                return Parsed::Error(Arc::new(ParseErrorTree::new(path, "", &err)));
            }
        };

        tracing::debug!("Parsing {}", path.display());
        match self.parse_text(&path, &text) {
            Ok(source) => {
                let source = if self.options().require_print_equals_input {
                    check_round_trip(source, &text)
                } else {
                    source
                };
                Parsed::Source(Arc::new(source))
            }
            Err(err) => {
                ctx.report(&path, &err);
                Parsed::Error(Arc::new(ParseErrorTree::new(path, text, &err)))
            }
        }
    }

    /// Lazily parse every accepted input, one tree per input
    fn parse_inputs<'a, I>(
        &'a self,
        inputs: I,
        relative_to: Option<&'a Path>,
        ctx: &'a ExecutionContext,
    ) -> ParsedInputs<'a, Self, I::IntoIter>
    where
        I: IntoIterator<Item = Input>,
        Self: Sized,
    {
        ParsedInputs {
            parser: self,
            inputs: inputs.into_iter(),
            relative_to,
            ctx,
        }
    }

    /// Parse accepted inputs on the rayon pool, keeping input order
    fn parse_inputs_parallel(
        &self,
        inputs: &[Input],
        relative_to: Option<&Path>,
        ctx: &ExecutionContext,
    ) -> Vec<Parsed<Self::Source>>
    where
        Self: Sized,
    {
        inputs
            .par_iter()
            .filter(|input| self.accept(input.path()))
            .map(|input| self.parse_input(input, relative_to, ctx))
            .collect()
    }

    /// Parse in-memory sources under synthesized paths
    fn parse(&self, ctx: &ExecutionContext, sources: &[&str]) -> Vec<Parsed<Self::Source>>
    where
        Self: Sized,
    {
        let inputs: Vec<Input> = sources
            .iter()
            .map(|text| {
                let path = self.source_path_from_source_text(Path::new(""), text);
                Input::from_string(path, *text)
            })
            .collect();
        self.parse_inputs(inputs, None, ctx).collect()
    }
}

/// Iterator returned by [`Parser::parse_inputs`]
pub struct ParsedInputs<'a, P, I> {
    parser: &'a P,
    inputs: I,
    relative_to: Option<&'a Path>,
    ctx: &'a ExecutionContext,
}

impl<P, I> Iterator for ParsedInputs<'_, P, I>
where
    P: Parser,
    I: Iterator<Item = Input>,
{
    type Item = Parsed<P::Source>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let input = self.inputs.next()?;
            if !self.parser.accept(input.path()) {
                tracing::debug!("Skipping {}", input.path().display());
                continue;
            }
            return Some(self.parser.parse_input(&input, self.relative_to, self.ctx));
        }
    }
}

fn relativize(path: &Path, relative_to: Option<&Path>) -> PathBuf {
    match relative_to.and_then(|base| path.strip_prefix(base).ok()) {
        Some(relative) => relative.to_path_buf(),
        None => path.to_path_buf(),
    }
}

fn check_round_trip<S: SourceFile>(source: S, text: &str) -> S {
    let result = RoundTripResult::check(&source, text);
    match result.into_marker() {
        Some(mismatch) => {
            tracing::warn!(
                "{} does not print back to its input:\n{}",
                source.source_path().display(),
                mismatch.diff()
            );
            let markers = source.markers().add(mismatch);
            source.with_markers(markers)
        }
        None => source,
    }
}

/// Monotonic offset into the text being parsed
///
/// Language parsers use it to slice the whitespace and comments between
/// tokens into [`Space`] values. The offset only ever moves forward.
#[derive(Debug)]
pub struct SourceCursor<'s> {
    path: &'s Path,
    source: &'s str,
    offset: usize,
    syntax: CommentSyntax,
    strict: bool,
    warnings: Vec<ParseWarning>,
}

impl<'s> SourceCursor<'s> {
    pub fn new(
        path: &'s Path,
        source: &'s str,
        syntax: CommentSyntax,
        options: &ParserOptions,
    ) -> Self {
        Self {
            path,
            source,
            offset: 0,
            syntax,
            strict: options.strict_delimiters,
            warnings: Vec::new(),
        }
    }

    pub fn path(&self) -> &'s Path {
        self.path
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn syntax(&self) -> &CommentSyntax {
        &self.syntax
    }

    /// Switch comment rules mid-file, e.g. after an escape directive
    pub fn set_syntax(&mut self, syntax: CommentSyntax) {
        self.syntax = syntax;
    }

    pub fn is_at_line_start(&self) -> bool {
        self.offset == 0 || self.source[..self.offset].ends_with('\n')
    }

    /// Text not yet consumed
    pub fn rest(&self) -> &'s str {
        &self.source[self.offset..]
    }

    /// Consume everything up to `offset` as a [`Space`]
    ///
    /// An offset behind the cursor yields an empty space.
    pub fn space_to(&mut self, offset: usize) -> Space {
        if offset <= self.offset {
            return Space::EMPTY;
        }
        let end = offset.min(self.source.len());
        let space = Space::parse_at(
            &self.source[self.offset..end],
            &self.syntax,
            self.is_at_line_start(),
        );
        self.offset = end;
        space
    }

    /// Consume `len` bytes of token text and return it
    pub fn take(&mut self, len: usize) -> &'s str {
        let end = (self.offset + len).min(self.source.len());
        let text = &self.source[self.offset..end];
        self.offset = end;
        text
    }

    /// Move the cursor to `offset`, returning the skipped text
    pub fn take_to(&mut self, offset: usize) -> &'s str {
        if offset <= self.offset {
            return "";
        }
        let end = offset.min(self.source.len());
        let text = &self.source[self.offset..end];
        self.offset = end;
        text
    }

    /// Space before the fixed punctuation `delimiter`, consuming both
    ///
    /// Only whitespace and comments may precede the delimiter. When anything
    /// else comes first the scan stops: in strict mode that is a syntax
    /// error, otherwise a [`ParseWarning`] is recorded, the cursor stays put
    /// and an empty space is returned.
    pub fn source_before(&mut self, delimiter: &str) -> Result<Space> {
        let trivia = trivia_len(self.rest(), &self.syntax, self.is_at_line_start());
        let at = self.offset + trivia;
        if self.source[at..].starts_with(delimiter) {
            let space = self.space_to(at);
            self.offset = at + delimiter.len();
            return Ok(space);
        }

        self.missing_delimiter_at(delimiter, at)
    }

    /// Record that `delimiter` is absent at the next significant offset
    ///
    /// Used when the token stream already shows the delimiter is missing.
    pub fn missing_delimiter(&mut self, delimiter: &str) -> Result<Space> {
        let at = self.offset + trivia_len(self.rest(), &self.syntax, self.is_at_line_start());
        self.missing_delimiter_at(delimiter, at)
    }

    fn missing_delimiter_at(&mut self, delimiter: &str, at: usize) -> Result<Space> {
        let message = format!("expected `{delimiter}`");
        if self.strict {
            return Err(LstError::syntax(self.path, at, message));
        }
        tracing::warn!(
            "{}: {} at offset {}, continuing with empty space",
            self.path.display(),
            message,
            at
        );
        self.warnings.push(ParseWarning::new(at, message));
        Ok(Space::EMPTY)
    }

    /// Whether `delimiter` is next after whitespace and comments
    pub fn peek_delimiter(&self, delimiter: &str) -> bool {
        let trivia = trivia_len(self.rest(), &self.syntax, self.is_at_line_start());
        self.rest()[trivia..].starts_with(delimiter)
    }

    /// All remaining text as a [`Space`], e.g. the end-of-file whitespace
    pub fn remaining_space(&mut self) -> Space {
        self.space_to(self.source.len())
    }

    /// Warnings collected by soft delimiter misses
    pub fn take_warnings(&mut self) -> Vec<ParseWarning> {
        std::mem::take(&mut self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{Markers, RoundTripMismatch};
    use crate::print::MarkerPrinter;
    use crate::tree::{HasMarkers, TreeId};

    /// Trivial language: the whole file is one token
    #[derive(Debug, Clone)]
    struct Blob {
        id: TreeId,
        path: PathBuf,
        markers: Markers,
        text: String,
    }

    impl HasMarkers for Blob {
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

    impl SourceFile for Blob {
        fn id(&self) -> TreeId {
            self.id
        }

        fn source_path(&self) -> &Path {
            &self.path
        }

        fn with_source_path(&self, path: PathBuf) -> Self {
            Self {
                path,
                ..self.clone()
            }
        }

        fn print_with(&self, _marker_printer: MarkerPrinter) -> String {
            self.text.clone()
        }
    }

    /// Rejects text containing `!` and drops a trailing `~` when printing
    struct BlobParser;

    impl Parser for BlobParser {
        type Source = Blob;

        fn accept(&self, path: &Path) -> bool {
            path.extension().is_some_and(|ext| ext == "blob")
        }

        fn source_path_from_source_text(&self, _prefix: &Path, _text: &str) -> PathBuf {
            PathBuf::from("file.blob")
        }

        fn options(&self) -> ParserOptions {
            ParserOptions::default()
        }

        fn parse_text(&self, path: &Path, text: &str) -> Result<Blob> {
            if let Some(offset) = text.find('!') {
                return Err(LstError::syntax(path, offset, "unexpected `!`"));
            }
            Ok(Blob {
                id: TreeId::random(),
                path: path.to_path_buf(),
                markers: Markers::empty(),
                text: text.trim_end_matches('~').to_string(),
            })
        }
    }

    #[test]
    fn batch_continues_after_bad_file() {
        let sink = Arc::new(CollectingErrorSink::new());
        let ctx = ExecutionContext::new(sink.clone());
        let inputs = vec![
            Input::from_string("a.blob", "fine"),
            Input::from_string("b.blob", "bad!"),
            Input::from_string("c.txt", "ignored"),
            Input::from_string("d.blob", "also fine"),
        ];

        let parsed: Vec<_> = BlobParser.parse_inputs(inputs, None, &ctx).collect();
        assert_eq!(parsed.len(), 3);
        assert!(!parsed[0].is_error());
        assert!(parsed[1].is_error());
        assert_eq!(parsed[1].print_sanitized(), "bad!");
        assert_eq!(parsed[2].print_sanitized(), "also fine");

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, PathBuf::from("b.blob"));
        assert_eq!(errors[0].offset, Some(3));
    }

    #[test]
    fn mismatch_is_marked_not_thrown() {
        let ctx = ExecutionContext::default();
        let parsed = BlobParser.parse(&ctx, &["text~"]);
        let tree = parsed[0].as_source().unwrap();
        let mismatch = tree.markers().find_first::<RoundTripMismatch>().unwrap();
        assert!(mismatch.diff().contains("-text~"));
    }

    #[test]
    fn parallel_parse_keeps_order() {
        let ctx = ExecutionContext::default();
        let inputs: Vec<Input> = (0..32)
            .map(|i| Input::from_string(format!("{i}.blob"), format!("item {i}")))
            .collect();
        let parsed = BlobParser.parse_inputs_parallel(&inputs, None, &ctx);
        let printed: Vec<String> = parsed.iter().map(|p| p.print_sanitized()).collect();
        let expected: Vec<String> = (0..32).map(|i| format!("item {i}")).collect();
        assert_eq!(printed, expected);
    }

    #[test]
    fn unreadable_file_becomes_placeholder() {
        let sink = Arc::new(CollectingErrorSink::new());
        let ctx = ExecutionContext::new(sink.clone());
        let inputs = vec![Input::from_file("/definitely/not/here.blob")];
        let parsed: Vec<_> = BlobParser.parse_inputs(inputs, None, &ctx).collect();
        assert!(parsed[0].is_error());
        assert_eq!(sink.errors()[0].kind, ErrorKind::Io);
    }

    #[test]
    fn paths_are_made_relative() {
        let ctx = ExecutionContext::default();
        let inputs = vec![Input::from_string("/work/infra/main.blob", "x")];
        let parsed: Vec<_> = BlobParser
            .parse_inputs(inputs, Some(Path::new("/work")), &ctx)
            .collect();
        assert_eq!(parsed[0].source_path(), Path::new("infra/main.blob"));
    }

    #[test]
    fn source_before_skips_comments() {
        let options = ParserOptions::default();
        let mut cursor =
            SourceCursor::new(Path::new("t"), "a /* c */ = b", CommentSyntax::HCL, &options);
        assert_eq!(cursor.take(1), "a");
        let space = cursor.source_before("=").unwrap();
        assert_eq!(space.to_string(), " /* c */ ");
        assert_eq!(cursor.rest(), " b");
        assert!(cursor.take_warnings().is_empty());
    }

    #[test]
    fn source_before_fails_soft() {
        let options = ParserOptions::default();
        let mut cursor = SourceCursor::new(Path::new("t"), "a b", CommentSyntax::HCL, &options);
        cursor.take(1);
        let space = cursor.source_before("=").unwrap();
        assert!(space.is_empty());
        assert_eq!(cursor.offset(), 1);
        let warnings = cursor.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].offset(), 2);
    }

    #[test]
    fn source_before_strict() {
        let options = ParserOptions {
            strict_delimiters: true,
            ..ParserOptions::default()
        };
        let mut cursor = SourceCursor::new(Path::new("t"), "a b", CommentSyntax::HCL, &options);
        cursor.take(1);
        let err = cursor.source_before("=").unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }
}
