//! Whitespace and comments as data
//!
//! A [`Space`] is the run of whitespace and comments found between two
//! tokens. It is stored in the node that follows it (its `prefix`) or in the
//! padded wrapper that owns the position, and printed back verbatim.
//!
//! The text is classified by a [`CommentSyntax`], so every language decides
//! which comment forms exist:
//!
//! ```rust,ignore
//! use lst_core::{CommentSyntax, Space};
//!
//! let space = Space::parse("  # note\n  ", &CommentSyntax::HCL);
//! assert_eq!(space.comments().len(), 1);
//! assert_eq!(space.to_string(), "  # note\n  ");
//! ```

use std::fmt;

/// Character sequence that opens a line comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineMarker {
    /// `#`
    Hash,
    /// `//`
    DoubleSlash,
}

impl LineMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineMarker::Hash => "#",
            LineMarker::DoubleSlash => "//",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    Line(LineMarker),
    /// `/* ... */`
    Block,
}

/// A single comment with the whitespace that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    style: CommentStyle,
    text: String,
    suffix: String,
}

impl Comment {
    pub fn new(style: CommentStyle, text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            suffix: suffix.into(),
        }
    }

    pub fn line(marker: LineMarker, text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::new(CommentStyle::Line(marker), text, suffix)
    }

    pub fn block(text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::new(CommentStyle::Block, text, suffix)
    }

    pub fn style(&self) -> CommentStyle {
        self.style
    }

    /// Comment body without its delimiters
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..self.clone()
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.style, CommentStyle::Block)
    }

    /// Append the delimiters, body and suffix in their original style
    pub fn print_to(&self, out: &mut String) {
        match self.style {
            CommentStyle::Line(marker) => {
                out.push_str(marker.as_str());
                out.push_str(&self.text);
            }
            CommentStyle::Block => {
                out.push_str("/*");
                out.push_str(&self.text);
                out.push_str("*/");
            }
        }
        out.push_str(&self.suffix);
    }
}

/// Comment rules of one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub line_markers: &'static [LineMarker],
    pub block_comments: bool,
    /// Line comments are only recognized as the first non-blank text of a line
    pub line_comments_at_line_start_only: bool,
    /// Escape character that, followed by a newline, continues a logical line
    pub continuation: Option<char>,
}

impl CommentSyntax {
    pub const HCL: CommentSyntax = CommentSyntax {
        line_markers: &[LineMarker::Hash, LineMarker::DoubleSlash],
        block_comments: true,
        line_comments_at_line_start_only: false,
        continuation: None,
    };

    pub const DOCKERFILE: CommentSyntax = CommentSyntax {
        line_markers: &[LineMarker::Hash],
        block_comments: false,
        line_comments_at_line_start_only: true,
        continuation: Some('\\'),
    };

    pub fn with_continuation(self, continuation: char) -> Self {
        Self {
            continuation: Some(continuation),
            ..self
        }
    }
}

/// Whitespace followed by zero or more comments, each carrying its suffix
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Space {
    whitespace: String,
    comments: Vec<Comment>,
}

impl std::hash::Hash for Comment {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.style.hash(state);
        self.text.hash(state);
        self.suffix.hash(state);
    }
}

impl Space {
    pub const EMPTY: Space = Space {
        whitespace: String::new(),
        comments: Vec::new(),
    };

    pub fn new(whitespace: impl Into<String>, comments: Vec<Comment>) -> Self {
        Self {
            whitespace: whitespace.into(),
            comments,
        }
    }

    pub fn from_whitespace(whitespace: impl Into<String>) -> Self {
        Self::new(whitespace, Vec::new())
    }

    pub fn single_space() -> Self {
        Self::from_whitespace(" ")
    }

    /// Classify a raw inter-token run that starts at the beginning of a line
    pub fn parse(text: &str, syntax: &CommentSyntax) -> Self {
        Self::parse_at(text, syntax, true)
    }

    /// Classify a raw inter-token run
    ///
    /// `starts_line` tells whether the first character sits at the start of a
    /// line, which matters for languages whose comments must open a line.
    /// Text that is neither whitespace nor a comment is kept verbatim in the
    /// whitespace so that printing stays lossless.
    pub fn parse_at(text: &str, syntax: &CommentSyntax, starts_line: bool) -> Self {
        if text.is_empty() {
            return Space::EMPTY;
        }

        let mut whitespace: Option<String> = None;
        let mut comments: Vec<Comment> = Vec::new();
        let mut pending = String::new();
        let mut line_start = starts_line;
        let mut i = 0usize;

        let flush = |pending: &mut String,
                     whitespace: &mut Option<String>,
                     comments: &mut Vec<Comment>| {
            let taken = std::mem::take(pending);
            match comments.last_mut() {
                Some(last) => last.suffix.push_str(&taken),
                None => whitespace.get_or_insert_with(String::new).push_str(&taken),
            }
        };

        while let Some((c, size)) = next_char(text, i) {
            if syntax.continuation == Some(c)
                && let Some(end) = continuation_end(text, i + size)
            {
                pending.push_str(&text[i..end]);
                i = end;
                line_start = true;
                continue;
            }

            if c.is_whitespace() {
                pending.push(c);
                if c == '\n' {
                    line_start = true;
                }
                i += size;
                continue;
            }

            // An unterminated `/*` is not a comment and stays verbatim below
            if syntax.block_comments
                && text[i..].starts_with("/*")
                && let Some(rel) = text[i + 2..].find("*/")
            {
                let body_end = i + 2 + rel;
                flush(&mut pending, &mut whitespace, &mut comments);
                comments.push(Comment::block(&text[i + 2..body_end], ""));
                i = body_end + 2;
                line_start = false;
                continue;
            }

            let line_marker = syntax
                .line_markers
                .iter()
                .find(|marker| text[i..].starts_with(marker.as_str()));
            if let Some(marker) = line_marker
                && (line_start || !syntax.line_comments_at_line_start_only)
            {
                let body_start = i + marker.as_str().len();
                let end = text[body_start..]
                    .find('\n')
                    .map(|rel| body_start + rel)
                    .unwrap_or(text.len());
                flush(&mut pending, &mut whitespace, &mut comments);
                comments.push(Comment::line(*marker, &text[body_start..end], ""));
                i = end;
                line_start = false;
                continue;
            }

            pending.push(c);
            line_start = false;
            i += size;
        }

        flush(&mut pending, &mut whitespace, &mut comments);

        Self {
            whitespace: whitespace.unwrap_or_default(),
            comments,
        }
    }

    /// Whitespace preceding the first comment
    pub fn whitespace(&self) -> &str {
        &self.whitespace
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_empty(&self) -> bool {
        self.whitespace.is_empty() && self.comments.is_empty()
    }

    pub fn with_whitespace(&self, whitespace: impl Into<String>) -> Self {
        Self {
            whitespace: whitespace.into(),
            comments: self.comments.clone(),
        }
    }

    pub fn with_comments(&self, comments: Vec<Comment>) -> Self {
        Self {
            whitespace: self.whitespace.clone(),
            comments,
        }
    }

    /// The whitespace printed last: the final comment's suffix, or the
    /// leading whitespace when there are no comments
    pub fn last_whitespace(&self) -> &str {
        match self.comments.last() {
            Some(comment) => comment.suffix(),
            None => &self.whitespace,
        }
    }

    pub fn with_last_whitespace(&self, whitespace: impl Into<String>) -> Self {
        match self.comments.split_last() {
            Some((last, rest)) => {
                let mut comments = rest.to_vec();
                comments.push(last.with_suffix(whitespace));
                self.with_comments(comments)
            }
            None => self.with_whitespace(whitespace),
        }
    }

    /// Text after the last newline of the trailing whitespace
    pub fn indent(&self) -> &str {
        let last = self.last_whitespace();
        match last.rfind('\n') {
            Some(pos) => &last[pos + 1..],
            None => last,
        }
    }

    pub fn contains_newline(&self) -> bool {
        self.whitespace.contains('\n') || self.comments.iter().any(|c| c.suffix.contains('\n'))
    }

    pub fn print_to(&self, out: &mut String) {
        out.push_str(&self.whitespace);
        for comment in &self.comments {
            comment.print_to(out);
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.print_to(&mut out);
        f.write_str(&out)
    }
}

/// Length of the whitespace and comment run at the start of `text`
///
/// Stops at the first character that is neither, so the result never
/// covers text that [`Space::parse`] would have to keep verbatim.
pub fn trivia_len(text: &str, syntax: &CommentSyntax, starts_line: bool) -> usize {
    let mut line_start = starts_line;
    let mut i = 0usize;
    while let Some((c, size)) = next_char(text, i) {
        if syntax.continuation == Some(c)
            && let Some(end) = continuation_end(text, i + size)
        {
            i = end;
            line_start = true;
        } else if c.is_whitespace() {
            if c == '\n' {
                line_start = true;
            }
            i += size;
        } else if syntax.block_comments
            && text[i..].starts_with("/*")
            && let Some(rel) = text[i + 2..].find("*/")
        {
            i = i + 2 + rel + 2;
            line_start = false;
        } else if (line_start || !syntax.line_comments_at_line_start_only)
            && syntax
                .line_markers
                .iter()
                .any(|marker| text[i..].starts_with(marker.as_str()))
        {
            i = text[i..].find('\n').map(|rel| i + rel).unwrap_or(text.len());
            line_start = false;
        } else {
            break;
        }
    }
    i
}

/// Get the character at `pos` and its UTF-8 width
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input[pos..].chars().next().map(|c| (c, c.len_utf8()))
}

/// End of an escape-newline sequence whose escape character ended at `from`
///
/// Trailing blanks between the escape and the newline are allowed.
pub fn continuation_end(text: &str, from: usize) -> Option<usize> {
    let mut i = from;
    while let Some((c, size)) = next_char(text, i) {
        match c {
            ' ' | '\t' | '\r' => i += size,
            '\n' => return Some(i + size),
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str, syntax: &CommentSyntax) -> Space {
        let space = Space::parse(text, syntax);
        assert_eq!(space.to_string(), text);
        space
    }

    #[test]
    fn plain_whitespace() {
        let space = round_trip("\n  \t", &CommentSyntax::HCL);
        assert_eq!(space.whitespace(), "\n  \t");
        assert!(space.comments().is_empty());
        assert_eq!(space.indent(), "  \t");
    }

    #[test]
    fn line_comment_does_not_consume_newline() {
        let space = round_trip("  # hello\n  // world\n", &CommentSyntax::HCL);
        assert_eq!(space.whitespace(), "  ");
        assert_eq!(space.comments().len(), 2);
        assert_eq!(space.comments()[0].text(), " hello");
        assert_eq!(space.comments()[0].suffix(), "\n  ");
        assert_eq!(
            space.comments()[1].style(),
            CommentStyle::Line(LineMarker::DoubleSlash)
        );
        assert_eq!(space.comments()[1].suffix(), "\n");
    }

    #[test]
    fn block_comment_consumes_closer() {
        let space = round_trip(" /* a\n b */ ", &CommentSyntax::HCL);
        assert_eq!(space.comments()[0].text(), " a\n b ");
        assert!(space.comments()[0].is_multiline());
        assert_eq!(space.comments()[0].suffix(), " ");
    }

    #[test]
    fn unterminated_block_comment_is_lossless() {
        let space = round_trip(" /* dangling", &CommentSyntax::HCL);
        assert!(space.comments().is_empty());
        assert_eq!(space.whitespace(), " /* dangling");
    }

    #[test]
    fn dockerfile_hash_only_at_line_start() {
        let space = round_trip("\n# comment\n", &CommentSyntax::DOCKERFILE);
        assert_eq!(space.comments().len(), 1);

        let space = Space::parse_at(" #x", &CommentSyntax::DOCKERFILE, false);
        assert!(space.comments().is_empty());
        assert_eq!(space.to_string(), " #x");
    }

    #[test]
    fn continuation_counts_as_whitespace() {
        let space = round_trip(" \\\n    ", &CommentSyntax::DOCKERFILE);
        assert!(space.comments().is_empty());
        assert!(space.contains_newline());

        let backtick = CommentSyntax::DOCKERFILE.with_continuation('`');
        let space = round_trip(" ` \r\n  ", &backtick);
        assert!(space.comments().is_empty());
    }

    #[test]
    fn trivia_len_stops_at_code() {
        assert_eq!(trivia_len("  # c\n  = 1", &CommentSyntax::HCL, false), 8);
        assert_eq!(trivia_len(" /* x */{", &CommentSyntax::HCL, false), 8);
        assert_eq!(trivia_len(" /* open", &CommentSyntax::HCL, false), 1);
        assert_eq!(trivia_len(" #x", &CommentSyntax::DOCKERFILE, false), 1);
        assert_eq!(trivia_len(" \\\n# c\nx", &CommentSyntax::DOCKERFILE, false), 7);
    }

    #[test]
    fn last_whitespace_replacement() {
        let space = Space::parse(" # c\n    ", &CommentSyntax::HCL);
        let reindented = space.with_last_whitespace("\n  ");
        assert_eq!(reindented.to_string(), " # c\n  ");
        assert_eq!(reindented.indent(), "  ");
    }
}
