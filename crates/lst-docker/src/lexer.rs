//! Dockerfile tokenizer
//!
//! A Dockerfile is a sequence of logical lines. Each one starts with an
//! instruction keyword and runs to the first newline that is not escaped by
//! the escape character; comment lines and blank lines inside a continuation
//! belong to the instruction. The tokenizer only finds the keyword and
//! argument spans. Everything between them is left to
//! [`Space`](lst_core::Space) parsing with the Dockerfile comment rules.

use lst_core::CommentSyntax;
use lst_core::space::{continuation_end, trivia_len};
use std::ops::Range;

pub type Span = Range<usize>;

pub const DEFAULT_ESCAPE: char = '\\';

/// One instruction: keyword plus arguments up to the last significant byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub keyword: Span,
    pub arguments: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub offset: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Lexed {
    pub escape: char,
    pub lines: Vec<LogicalLine>,
}

impl Lexed {
    pub fn syntax(&self) -> CommentSyntax {
        CommentSyntax::DOCKERFILE.with_continuation(self.escape)
    }
}

/// Escape character chosen by a leading `# escape=` parser directive
///
/// Directives are only read before the first blank line, instruction or
/// ordinary comment.
pub fn escape_directive(text: &str, from: usize) -> Result<char, LexError> {
    let mut offset = from;
    for line in text[from..].split_inclusive('\n') {
        let trimmed = line.trim();
        let Some(directive) = trimmed.strip_prefix('#') else {
            break;
        };
        let Some((key, value)) = directive.split_once('=') else {
            break;
        };
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            break;
        }
        if key.eq_ignore_ascii_case("escape") {
            return match value.trim() {
                "\\" => Ok('\\'),
                "`" => Ok('`'),
                other => Err(LexError {
                    offset,
                    message: format!("invalid escape directive value `{other}`"),
                }),
            };
        }
        offset += line.len();
    }
    Ok(DEFAULT_ESCAPE)
}

fn starts_line(text: &str, at: usize) -> bool {
    at == 0 || text[..at].ends_with('\n')
}

/// Split `text` into logical instruction lines, starting at `from`
pub fn lex(text: &str, from: usize) -> Result<Lexed, LexError> {
    let escape = escape_directive(text, from)?;
    let syntax = CommentSyntax::DOCKERFILE.with_continuation(escape);

    let mut lines = Vec::new();
    let mut i = from;
    loop {
        i += trivia_len(&text[i..], &syntax, starts_line(text, i));
        if i >= text.len() {
            break;
        }

        let keyword_end = text[i..]
            .find(|c: char| c.is_whitespace() || c == escape)
            .map(|rel| i + rel)
            .unwrap_or(text.len());
        let keyword = &text[i..keyword_end];
        if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
            let shown: String = text[i..]
                .chars()
                .take_while(|c| !c.is_whitespace())
                .collect();
            return Err(LexError {
                offset: i,
                message: format!("expected an instruction, found `{shown}`"),
            });
        }

        let line_end = logical_line_end(text, keyword_end, escape);
        let arguments_end = keyword_end
            + text[keyword_end..line_end]
                .trim_end_matches(|c: char| c.is_whitespace())
                .len();
        lines.push(LogicalLine {
            keyword: i..keyword_end,
            arguments: keyword_end..arguments_end.max(keyword_end),
        });
        i = line_end;
    }

    Ok(Lexed { escape, lines })
}

/// Offset of the newline that ends the logical line, or the end of text
fn logical_line_end(text: &str, from: usize, escape: char) -> usize {
    let mut i = from;
    while let Some(c) = text[i..].chars().next() {
        if c == escape
            && let Some(end) = continuation_end(text, i + c.len_utf8())
        {
            i = skip_continued_lines(text, end);
            continue;
        }
        if c == '\n' {
            return i;
        }
        i += c.len_utf8();
    }
    text.len()
}

/// Skip comment and blank lines that follow a line continuation
fn skip_continued_lines(text: &str, mut i: usize) -> usize {
    loop {
        let rest = &text[i..];
        let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let line = &rest[indent..];
        if line.starts_with('#') {
            i += indent + line.find('\n').map(|rel| rel + 1).unwrap_or(line.len());
        } else if line.starts_with('\n') {
            i += indent + 1;
        } else if line.starts_with("\r\n") {
            i += indent + 2;
        } else {
            return i;
        }
    }
}

/// Whitespace-separated words of `span`, honoring quotes and continuations
pub fn words(text: &str, span: Span, syntax: &CommentSyntax) -> Vec<Span> {
    let bounded = &text[..span.end];
    let escape = syntax.continuation;
    let mut words = Vec::new();
    let mut i = span.start;
    loop {
        i += trivia_len(&bounded[i..], syntax, starts_line(text, i));
        if i >= span.end {
            return words;
        }

        let start = i;
        let mut quote: Option<char> = None;
        while let Some(c) = bounded[i..].chars().next() {
            let size = c.len_utf8();
            if let Some(open) = quote {
                if open == '"' && Some(c) == escape {
                    i += size;
                    i += bounded[i..].chars().next().map_or(0, char::len_utf8);
                    continue;
                }
                if c == open {
                    quote = None;
                }
                i += size;
                continue;
            }
            if c == '"' || c == '\'' {
                quote = Some(c);
            } else if c.is_whitespace()
                || (Some(c) == escape && continuation_end(bounded, i + size).is_some())
            {
                break;
            }
            i += size;
        }
        words.push(start..i);
    }
}

/// Spans of a JSON exec form `["a", "b"]` filling `span` exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecSpans {
    pub open: usize,
    /// Quoted strings, quotes included
    pub elements: Vec<Span>,
}

/// Recognize an exec form; anything else is shell form
pub fn exec_form(text: &str, span: Span, syntax: &CommentSyntax) -> Option<ExecSpans> {
    let bounded = &text[..span.end];
    let skip = |i: usize| i + trivia_len(&bounded[i..], syntax, starts_line(text, i));

    let open = skip(span.start);
    if !bounded[open..].starts_with('[') {
        return None;
    }
    let mut elements = Vec::new();
    let mut i = skip(open + 1);
    if bounded[i..].starts_with(']') {
        return (skip(i + 1) == span.end).then_some(ExecSpans { open, elements });
    }

    loop {
        let end = json_string_end(bounded, i)?;
        serde_json::from_str::<String>(&bounded[i..end]).ok()?;
        elements.push(i..end);
        i = skip(end);
        match bounded[i..].chars().next()? {
            ',' => i = skip(i + 1),
            ']' => {
                return (skip(i + 1) == span.end).then_some(ExecSpans { open, elements });
            }
            _ => return None,
        }
    }
}

/// End of the double-quoted JSON string starting at `start`
fn json_string_end(text: &str, start: usize) -> Option<usize> {
    if !text[start..].starts_with('"') {
        return None;
    }
    let mut escaped = false;
    for (rel, c) in text[start + 1..].char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(start + 1 + rel + 1),
            '\n' => return None,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(text: &str) -> Vec<&str> {
        lex(text, 0)
            .unwrap()
            .lines
            .iter()
            .map(|line| &text[line.keyword.clone()])
            .collect()
    }

    fn word_texts<'t>(text: &'t str, line: &LogicalLine) -> Vec<&'t str> {
        words(text, line.arguments.clone(), &CommentSyntax::DOCKERFILE)
            .into_iter()
            .map(|span| &text[span])
            .collect()
    }

    #[test]
    fn splits_instructions() {
        let text = "# comment\nFROM alpine AS base\n\nrun echo hi  \n";
        assert_eq!(keywords(text), vec!["FROM", "run"]);
        let lexed = lex(text, 0).unwrap();
        assert_eq!(&text[lexed.lines[1].arguments.clone()], " echo hi");
    }

    #[test]
    fn continuation_joins_lines() {
        let text = "RUN apt-get update && \\\n    # inline comment\n    apt-get install -y curl\nCMD x\n";
        let lexed = lex(text, 0).unwrap();
        assert_eq!(lexed.lines.len(), 2);
        assert!(text[lexed.lines[0].arguments.clone()].ends_with("curl"));
        assert_eq!(
            word_texts(text, &lexed.lines[0]),
            vec!["apt-get", "update", "&&", "apt-get", "install", "-y", "curl"]
        );
    }

    #[test]
    fn escape_directive_switches_continuation() {
        let text = "# escape=`\nRUN dir c:\\ `\n  /w\n";
        let lexed = lex(text, 0).unwrap();
        assert_eq!(lexed.escape, '`');
        assert_eq!(lexed.lines.len(), 1);

        let err = lex("# escape=x\nFROM a\n", 0).unwrap_err();
        assert!(err.message.contains("escape"));
    }

    #[test]
    fn directives_stop_at_first_blank_line() {
        assert_eq!(escape_directive("\n# escape=`\n", 0), Ok('\\'));
        assert_eq!(escape_directive("# comment\n# escape=`\n", 0), Ok('\\'));
    }

    #[test]
    fn quoted_words_keep_spaces() {
        let text = "LABEL a=\"x y\" b='z w' c=1\n";
        let lexed = lex(text, 0).unwrap();
        assert_eq!(
            word_texts(text, &lexed.lines[0]),
            vec!["a=\"x y\"", "b='z w'", "c=1"]
        );
    }

    #[test]
    fn rejects_non_instructions() {
        let err = lex("FROM a\n[\"oops\"]\n", 0).unwrap_err();
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn recognizes_exec_forms() {
        let syntax = CommentSyntax::DOCKERFILE;
        let text = "CMD [ \"a\", \"b c\" ]";
        let exec = exec_form(text, 3..text.len(), &syntax).unwrap();
        assert_eq!(exec.open, 4);
        assert_eq!(exec.elements.len(), 2);

        let text = "CMD []";
        assert!(exec_form(text, 3..text.len(), &syntax).unwrap().elements.is_empty());

        for shell in ["CMD [a]", "CMD [\"a\"] tail", "CMD [\"a\",]", "CMD echo [\"a\"]"] {
            assert!(exec_form(shell, 3..shell.len(), &syntax).is_none(), "{shell}");
        }
    }
}
