//! HCL tokenizer
//!
//! Produces the significant tokens of an HCL file. Whitespace and comments are
//! skipped: the tree builder re-derives them from the source text between
//! token spans. Each token records whether a newline was skipped before it,
//! which is all the parser needs to find the end of an attribute.
//!
//! Quoted strings and heredocs are split into template tokens; `${ ... }`
//! interpolations switch back to ordinary expression lexing until the
//! matching `}`.

use std::ops::Range;

pub type Span = Range<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Number,

    /// Opening `"` of a quoted template
    StringStart,
    /// Closing `"` of a quoted template
    StringEnd,
    /// Literal text inside a quoted template or heredoc
    TemplateText,
    /// `${`
    InterpStart,
    /// `}` closing an interpolation
    InterpEnd,
    /// `<<ID` or `<<-ID`
    HeredocStart,
    /// Closing heredoc identifier
    HeredocEnd,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Dot,
    Ellipsis,
    Colon,
    Question,
    Equals,
    FatArrow,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,

    Eof,
}

impl TokenKind {
    /// Fixed source text of punctuation tokens
    pub fn text(&self) -> &'static str {
        match self {
            TokenKind::StringStart | TokenKind::StringEnd => "\"",
            TokenKind::InterpStart => "${",
            TokenKind::InterpEnd | TokenKind::RBrace => "}",
            TokenKind::LBrace => "{",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Equals => "=",
            TokenKind::FatArrow => "=>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            TokenKind::Ident
            | TokenKind::Number
            | TokenKind::TemplateText
            | TokenKind::HeredocStart
            | TokenKind::HeredocEnd
            | TokenKind::Eof => "",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::TemplateText => "template text",
            TokenKind::HeredocStart => "heredoc",
            TokenKind::HeredocEnd => "end of heredoc",
            TokenKind::Eof => "end of input",
            other => other.text(),
        }
    }
}

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: Span,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A newline was skipped between the previous token and this one
    pub newline_before: bool,
}

/// Result returned by the lexer; the token list always ends with `Eof`
pub type LexResult = (Vec<Token>, Vec<LexerError>);

#[derive(Debug, Clone)]
enum Mode {
    /// Inside `{ ... }` in expression context
    Brace,
    /// Inside `${ ... }`
    Interpolation,
    Quoted,
    Heredoc { delimiter: String, at_line_start: bool },
}

pub fn lex(input: &str) -> LexResult {
    let mut lexer = Lexer {
        input,
        pos: 0,
        modes: Vec::new(),
        tokens: Vec::new(),
        errors: Vec::new(),
        newline_pending: false,
    };
    lexer.run();
    let end = input.len();
    lexer.tokens.push(Token {
        kind: TokenKind::Eof,
        span: span(end, end),
        newline_before: lexer.newline_pending,
    });
    (lexer.tokens, lexer.errors)
}

struct Lexer<'s> {
    input: &'s str,
    pos: usize,
    modes: Vec<Mode>,
    tokens: Vec<Token>,
    errors: Vec<LexerError>,
    newline_pending: bool,
}

impl Lexer<'_> {
    fn run(&mut self) {
        while self.pos < self.input.len() {
            match self.modes.last() {
                Some(Mode::Quoted) => self.lex_quoted(),
                Some(Mode::Heredoc { .. }) => self.lex_heredoc(),
                _ => self.lex_code(),
            }
        }

        match self.modes.last() {
            Some(Mode::Quoted) => {
                let start = self.open_start();
                self.errors
                    .push(LexerError::new("unterminated string", span(start, self.pos)));
            }
            Some(Mode::Heredoc { delimiter, .. }) => {
                let message = format!("unterminated heredoc, expected `{delimiter}`");
                let start = self.open_start();
                self.errors
                    .push(LexerError::new(message, span(start, self.pos)));
            }
            _ => {}
        }
    }

    fn open_start(&self) -> usize {
        self.tokens
            .iter()
            .rev()
            .find(|t| matches!(t.kind, TokenKind::StringStart | TokenKind::HeredocStart))
            .map(|t| t.span.start)
            .unwrap_or(0)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token {
            kind,
            span: span(start, end),
            newline_before: self.newline_pending,
        });
        self.newline_pending = false;
        self.pos = end;
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Skip whitespace and comments, remembering newlines
    fn skip_trivia(&mut self) {
        while let Some((c, size)) = next_char(self.input, self.pos) {
            if c == '\n' {
                self.newline_pending = true;
                self.pos += size;
            } else if c.is_whitespace() {
                self.pos += size;
            } else if c == '#' || self.rest().starts_with("//") {
                self.pos = self.rest().find('\n').map_or(self.input.len(), |i| self.pos + i);
            } else if self.rest().starts_with("/*") {
                match self.input[self.pos + 2..].find("*/") {
                    Some(rel) => {
                        let end = self.pos + 2 + rel + 2;
                        if self.input[self.pos..end].contains('\n') {
                            self.newline_pending = true;
                        }
                        self.pos = end;
                    }
                    None => {
                        self.errors.push(LexerError::new(
                            "unterminated block comment",
                            span(self.pos, self.input.len()),
                        ));
                        self.pos = self.input.len();
                    }
                }
            } else {
                break;
            }
        }
    }

    fn lex_code(&mut self) {
        self.skip_trivia();
        let start = self.pos;
        let Some((c, size)) = next_char(self.input, start) else {
            return;
        };
        let two = self.peek_at(1);

        match c {
            '"' => {
                self.push(TokenKind::StringStart, start, start + size);
                self.modes.push(Mode::Quoted);
            }
            '{' => {
                self.push(TokenKind::LBrace, start, start + size);
                self.modes.push(Mode::Brace);
            }
            '}' => match self.modes.last() {
                Some(Mode::Interpolation) => {
                    self.modes.pop();
                    self.push(TokenKind::InterpEnd, start, start + size);
                }
                Some(Mode::Brace) => {
                    self.modes.pop();
                    self.push(TokenKind::RBrace, start, start + size);
                }
                _ => self.push(TokenKind::RBrace, start, start + size),
            },
            '<' if two == Some('<') => self.lex_heredoc_start(start),
            '[' => self.push(TokenKind::LBracket, start, start + 1),
            ']' => self.push(TokenKind::RBracket, start, start + 1),
            '(' => self.push(TokenKind::LParen, start, start + 1),
            ')' => self.push(TokenKind::RParen, start, start + 1),
            ',' => self.push(TokenKind::Comma, start, start + 1),
            ':' => self.push(TokenKind::Colon, start, start + 1),
            '?' => self.push(TokenKind::Question, start, start + 1),
            '+' => self.push(TokenKind::Plus, start, start + 1),
            '-' => self.push(TokenKind::Minus, start, start + 1),
            '*' => self.push(TokenKind::Star, start, start + 1),
            '/' => self.push(TokenKind::Slash, start, start + 1),
            '%' => self.push(TokenKind::Percent, start, start + 1),
            '.' if self.rest().starts_with("...") => {
                self.push(TokenKind::Ellipsis, start, start + 3)
            }
            '.' => self.push(TokenKind::Dot, start, start + 1),
            '=' if two == Some('=') => self.push(TokenKind::EqEq, start, start + 2),
            '=' if two == Some('>') => self.push(TokenKind::FatArrow, start, start + 2),
            '=' => self.push(TokenKind::Equals, start, start + 1),
            '!' if two == Some('=') => self.push(TokenKind::NotEq, start, start + 2),
            '!' => self.push(TokenKind::Bang, start, start + 1),
            '<' if two == Some('=') => self.push(TokenKind::Le, start, start + 2),
            '<' => self.push(TokenKind::Lt, start, start + 1),
            '>' if two == Some('=') => self.push(TokenKind::Ge, start, start + 2),
            '>' => self.push(TokenKind::Gt, start, start + 1),
            '&' if two == Some('&') => self.push(TokenKind::AndAnd, start, start + 2),
            '|' if two == Some('|') => self.push(TokenKind::OrOr, start, start + 2),
            c if c.is_ascii_digit() => {
                let end = lex_number(self.input, start);
                self.push(TokenKind::Number, start, end);
            }
            c if is_ident_start(c) => {
                let end = lex_ident(self.input, start);
                self.push(TokenKind::Ident, start, end);
            }
            other => {
                self.errors.push(LexerError::new(
                    format!("unexpected character `{other}`"),
                    span(start, start + size),
                ));
                self.pos = start + size;
            }
        }
    }

    /// `<<ID` or `<<-ID`, then the rest of the line must be empty
    fn lex_heredoc_start(&mut self, start: usize) {
        let mut ident_start = start + 2;
        if self.input[ident_start..].starts_with('-') {
            ident_start += 1;
        }
        let ident_end = lex_ident(self.input, ident_start);
        let starts_ident = next_char(self.input, ident_start).is_some_and(|(c, _)| is_ident_start(c));
        if !starts_ident {
            // Not a heredoc: two less-than operators
            self.push(TokenKind::Lt, start, start + 1);
            return;
        }

        let delimiter = self.input[ident_start..ident_end].to_string();
        self.push(TokenKind::HeredocStart, start, ident_end);

        let line_end = match self.rest().find('\n') {
            Some(rel) => self.pos + rel + 1,
            None => {
                self.errors.push(LexerError::new(
                    "heredoc introducer must be followed by a newline",
                    span(start, self.input.len()),
                ));
                self.pos = self.input.len();
                return;
            }
        };
        if !self.input[self.pos..line_end].trim().is_empty() {
            self.errors.push(LexerError::new(
                "unexpected text after heredoc introducer",
                span(self.pos, line_end),
            ));
        }
        self.pos = line_end;
        self.modes.push(Mode::Heredoc {
            delimiter,
            at_line_start: true,
        });
    }

    fn lex_quoted(&mut self) {
        let text_start = self.pos;
        while let Some((c, size)) = next_char(self.input, self.pos) {
            match c {
                '"' => {
                    self.flush_text(text_start);
                    self.modes.pop();
                    self.push(TokenKind::StringEnd, self.pos, self.pos + size);
                    return;
                }
                '\\' => {
                    let escaped = next_char(self.input, self.pos + size).map_or(0, |(_, s)| s);
                    self.pos += size + escaped;
                }
                // `$${` and `%%{` are literal
                '$' | '%' if self.rest().starts_with("$${") || self.rest().starts_with("%%{") => {
                    self.pos += 3;
                }
                '$' if self.rest().starts_with("${") => {
                    self.flush_text(text_start);
                    self.push(TokenKind::InterpStart, self.pos, self.pos + 2);
                    self.modes.push(Mode::Interpolation);
                    return;
                }
                '%' if self.rest().starts_with("%{") => {
                    self.errors.push(LexerError::new(
                        "template directives are not supported",
                        span(self.pos, self.pos + 2),
                    ));
                    self.pos += 2;
                }
                '\n' => {
                    self.errors.push(LexerError::new(
                        "unterminated string",
                        span(self.open_start(), self.pos),
                    ));
                    self.flush_text(text_start);
                    self.modes.pop();
                    return;
                }
                _ => self.pos += size,
            }
        }
        self.flush_text(text_start);
    }

    fn lex_heredoc(&mut self) {
        let (delimiter, mut at_line_start) = match self.modes.last() {
            Some(Mode::Heredoc {
                delimiter,
                at_line_start,
            }) => (delimiter.clone(), *at_line_start),
            _ => return,
        };
        let text_start = self.pos;

        loop {
            if at_line_start {
                let line = &self.input[self.pos..];
                let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
                let candidate = &line[indent..];
                if let Some(after) = candidate.strip_prefix(delimiter.as_str())
                    && (after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n"))
                {
                    self.flush_text(text_start);
                    self.modes.pop();
                    let start = self.pos + indent;
                    self.push(TokenKind::HeredocEnd, start, start + delimiter.len());
                    return;
                }
            }

            let Some((c, size)) = next_char(self.input, self.pos) else {
                self.flush_text(text_start);
                return;
            };

            if (c == '$' && self.rest().starts_with("$${"))
                || (c == '%' && self.rest().starts_with("%%{"))
            {
                self.pos += 3;
                at_line_start = false;
                continue;
            }
            if c == '$' && self.rest().starts_with("${") {
                self.flush_text(text_start);
                if let Some(Mode::Heredoc { at_line_start, .. }) = self.modes.last_mut() {
                    *at_line_start = false;
                }
                self.push(TokenKind::InterpStart, self.pos, self.pos + 2);
                self.modes.push(Mode::Interpolation);
                return;
            }
            if c == '%' && self.rest().starts_with("%{") {
                self.errors.push(LexerError::new(
                    "template directives are not supported",
                    span(self.pos, self.pos + 2),
                ));
            }

            at_line_start = c == '\n';
            self.pos += size;
        }
    }

    fn flush_text(&mut self, text_start: usize) {
        if self.pos > text_start {
            let end = self.pos;
            self.tokens.push(Token {
                kind: TokenKind::TemplateText,
                span: span(text_start, end),
                newline_before: false,
            });
        }
    }
}

/// Get the character at `pos` and its UTF-8 width
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input[pos..].chars().next().map(|c| (c, c.len_utf8()))
}

fn span(start: usize, end: usize) -> Span {
    start..end
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '-' || c.is_alphanumeric()
}

fn lex_ident(input: &str, start: usize) -> usize {
    let mut end = start;
    while let Some((c, size)) = next_char(input, end) {
        if !is_ident_continue(c) {
            break;
        }
        end += size;
    }
    end
}

fn lex_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = digits(start);
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end = digits(end + 1);
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            end = digits(exp);
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let (tokens, errors) = lex(input);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn attribute_tokens() {
        use TokenKind::*;
        assert_eq!(kinds("a = 1.5e3 # c\n"), vec![Ident, Equals, Number, Eof]);
    }

    #[test]
    fn newline_before_is_tracked() {
        let (tokens, _) = lex("a = 1\n// c\nb = 2");
        let b = &tokens[3];
        assert_eq!(b.kind, TokenKind::Ident);
        assert!(b.newline_before);
        assert!(!tokens[1].newline_before);
    }

    #[test]
    fn operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("a == b != c <= d >= e && f || !g => ..."),
            vec![
                Ident, EqEq, Ident, NotEq, Ident, Le, Ident, Ge, Ident, AndAnd, Ident, OrOr, Bang,
                Ident, FatArrow, Ellipsis, Eof
            ]
        );
    }

    #[test]
    fn quoted_template_with_interpolation() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"x = "a-${b + {c = 1}.c}-d""#),
            vec![
                Ident,
                Equals,
                StringStart,
                TemplateText,
                InterpStart,
                Ident,
                Plus,
                LBrace,
                Ident,
                Equals,
                Number,
                RBrace,
                Dot,
                Ident,
                InterpEnd,
                TemplateText,
                StringEnd,
                Eof
            ]
        );
    }

    #[test]
    fn escaped_quote_and_literal_dollar() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"x = "say \"hi\" $${x}""#),
            vec![Ident, Equals, StringStart, TemplateText, StringEnd, Eof]
        );
    }

    #[test]
    fn heredoc() {
        let input = "x = <<-EOT\n  hello ${name}\n  EOT\n";
        let (tokens, errors) = lex(input);
        assert!(errors.is_empty());
        let texts: Vec<(TokenKind, &str)> = tokens
            .iter()
            .map(|t| (t.kind, &input[t.span.clone()]))
            .collect();
        assert_eq!(
            texts,
            vec![
                (TokenKind::Ident, "x"),
                (TokenKind::Equals, "="),
                (TokenKind::HeredocStart, "<<-EOT"),
                (TokenKind::TemplateText, "  hello "),
                (TokenKind::InterpStart, "${"),
                (TokenKind::Ident, "name"),
                (TokenKind::InterpEnd, "}"),
                (TokenKind::TemplateText, "\n"),
                (TokenKind::HeredocEnd, "EOT"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn errors_are_reported() {
        let (_, errors) = lex("x = \"open\ny = 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unterminated string");

        let (_, errors) = lex("x = <<EOT\nnever closed\n");
        assert_eq!(errors.len(), 1);

        let (_, errors) = lex("x = @");
        assert_eq!(errors[0].message, "unexpected character `@`");
    }
}
