//! HCL text to LST
//!
//! The tokenizer supplies token kinds and spans; this module walks them with
//! recursive descent while a [`SourceCursor`] follows along in the raw text.
//! Before each node the gap between the cursor and the node's first token
//! becomes its prefix, and fixed punctuation between children is consumed with
//! [`SourceCursor::source_before`].

use crate::lexer::{Token, TokenKind, lex};
use crate::tree::*;
use lst_core::{
    CommentSyntax, Container, LeftPadded, LstError, Markers, ParserOptions, Result, RightPadded,
    SourceCursor, Space, TreeId,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const BOM: char = '\u{feff}';

/// Deepest nesting of bodies and expressions before parsing gives up
const MAX_NESTING: usize = 128;

/// HCL implementation of [`lst_core::Parser`]
#[derive(Debug, Clone, Default)]
pub struct HclParser {
    options: ParserOptions,
}

impl HclParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl lst_core::Parser for HclParser {
    type Source = ConfigFile;

    fn accept(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "hcl" | "tf" | "tfvars"))
    }

    fn source_path_from_source_text(&self, prefix: &Path, _text: &str) -> PathBuf {
        prefix.join("file.tf")
    }

    fn options(&self) -> ParserOptions {
        self.options
    }

    fn parse_text(&self, path: &Path, text: &str) -> Result<ConfigFile> {
        parse_config_file(path, text, &self.options)
    }
}

/// Parse a whole HCL file
pub fn parse_config_file(path: &Path, text: &str, options: &ParserOptions) -> Result<ConfigFile> {
    let bom_len = if text.starts_with(BOM) {
        BOM.len_utf8()
    } else {
        0
    };

    let (mut tokens, errors) = lex(&text[bom_len..]);
    if let Some(first) = errors.first() {
        return Err(LstError::syntax(
            path,
            first.span.start + bom_len,
            first.message.clone(),
        ));
    }
    if bom_len > 0 {
        for token in &mut tokens {
            token.span = token.span.start + bom_len..token.span.end + bom_len;
        }
    }

    let mut builder = HclTreeBuilder::new(path, text, tokens, options);
    builder.cursor.take(bom_len);
    let body = builder.parse_body(TokenKind::Eof)?;
    let eof = builder.cursor.remaining_space();

    let warnings = builder.cursor.take_warnings();
    let markers = warnings
        .into_iter()
        .fold(Markers::empty(), |markers, warning| markers.add(warning));

    debug!(
        "Parsed {} with {} top-level items",
        path.display(),
        body.len()
    );
    Ok(ConfigFile {
        id: TreeId::random(),
        prefix: Space::EMPTY,
        markers,
        source_path: path.to_path_buf(),
        charset_bom: bom_len > 0,
        body,
        eof,
    })
}

/// Parse a standalone expression, e.g. a template snippet
pub fn parse_expression(text: &str, options: &ParserOptions) -> Result<Expression> {
    let path = Path::new("expression.hcl");
    let (tokens, errors) = lex(text);
    if let Some(first) = errors.first() {
        return Err(LstError::syntax(path, first.span.start, first.message.clone()));
    }

    let mut builder = HclTreeBuilder::new(path, text, tokens, options);
    builder.newline_sensitive.push(false);
    let expression = builder.parse_expression()?;
    if !builder.at(TokenKind::Eof) {
        return Err(builder.unexpected("end of expression"));
    }
    Ok(expression)
}

struct HclTreeBuilder<'s> {
    tokens: Vec<Token>,
    pos: usize,
    cursor: SourceCursor<'s>,
    /// Whether a newline ends the expression being parsed, innermost last
    newline_sensitive: Vec<bool>,
    depth: usize,
}

impl<'s> HclTreeBuilder<'s> {
    fn new(path: &'s Path, text: &'s str, tokens: Vec<Token>, options: &ParserOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            cursor: SourceCursor::new(path, text, CommentSyntax::HCL, options),
            newline_sensitive: Vec::new(),
            depth: 0,
        }
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn nth_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn token_text(&self, token: &Token) -> &'s str {
        &self.cursor.source()[token.span.clone()]
    }

    fn at_keyword(&self, word: &str) -> bool {
        self.at(TokenKind::Ident) && self.token_text(self.peek()) == word
    }

    /// Consume the whitespace and comments before the next token
    fn prefix(&mut self) -> Space {
        let start = self.peek().span.start;
        self.cursor.space_to(start)
    }

    /// Consume the next token, whose prefix must already be consumed
    fn bump(&mut self) -> &'s str {
        let token = self.peek().clone();
        let text = self.token_text(&token);
        self.cursor.take_to(token.span.end);
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        text
    }

    /// Space before fixed punctuation of `kind`, consuming both
    fn delimiter(&mut self, kind: TokenKind) -> Result<Space> {
        if self.at(kind) {
            let space = self.cursor.source_before(kind.text())?;
            self.pos += 1;
            Ok(space)
        } else {
            self.cursor.missing_delimiter(kind.text())
        }
    }

    fn keyword(&mut self, word: &str) -> Result<Space> {
        if self.at_keyword(word) {
            let space = self.cursor.source_before(word)?;
            self.pos += 1;
            Ok(space)
        } else {
            self.cursor.missing_delimiter(word)
        }
    }

    fn unexpected(&self, expected: &str) -> LstError {
        let token = self.peek();
        let found = match token.kind {
            TokenKind::Ident | TokenKind::Number => format!("`{}`", self.token_text(token)),
            other => other.describe().to_string(),
        };
        LstError::syntax(
            self.cursor.path(),
            token.span.start,
            format!("expected {expected}, found {found}"),
        )
    }

    /// A newline before the next token ends the current expression
    fn newline_ends(&self) -> bool {
        self.newline_sensitive.last().copied().unwrap_or(false) && self.peek().newline_before
    }

    fn with_newlines<T>(
        &mut self,
        sensitive: bool,
        parse: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.newline_sensitive.push(sensitive);
        let result = parse(self);
        self.newline_sensitive.pop();
        result
    }

    /// Run a recursive parse one level deeper, failing past [`MAX_NESTING`]
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(LstError::syntax(
                self.cursor.path(),
                self.peek().span.start,
                format!("nesting deeper than {MAX_NESTING} levels"),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_body(&mut self, closer: TokenKind) -> Result<Vec<BodyContent>> {
        self.nested(|p| p.with_newlines(true, |p| {
            let mut body = Vec::new();
            while !p.at(closer) && !p.at(TokenKind::Eof) {
                body.push(p.parse_body_content()?);
                if !p.peek().newline_before && !p.at(closer) && !p.at(TokenKind::Eof) {
                    return Err(p.unexpected("newline"));
                }
            }
            Ok(body)
        }))
    }

    fn parse_body_content(&mut self) -> Result<BodyContent> {
        if !self.at(TokenKind::Ident) {
            return Err(self.unexpected("attribute or block"));
        }
        let prefix = self.prefix();
        let name = self.bump();

        if self.at(TokenKind::Equals) {
            let before = self.delimiter(TokenKind::Equals)?;
            let value = self.parse_expression()?;
            return Ok(BodyContent::Attribute(Arc::new(Attribute {
                id: TreeId::random(),
                prefix,
                markers: Markers::empty(),
                name: Expression::Identifier(Arc::new(Identifier::build(name))),
                type_: LeftPadded::new(before, AttributeType::Assignment),
                value,
                comma: None,
            })));
        }

        let type_name = Arc::new(Identifier::build(name));
        let mut labels = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::StringStart => labels.push(self.parse_quoted_template()?),
                TokenKind::Ident => {
                    let label_prefix = self.prefix();
                    let label = self.bump();
                    labels.push(Expression::Identifier(Arc::new(Identifier::new(
                        label_prefix,
                        label,
                    ))));
                }
                TokenKind::LBrace => break,
                _ => return Err(self.unexpected("`=`, block label or `{`")),
            }
        }
        let open = self.delimiter(TokenKind::LBrace)?;
        let body = self.parse_body(TokenKind::RBrace)?;
        let end = self.delimiter(TokenKind::RBrace)?;

        Ok(BodyContent::Block(Arc::new(Block {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            type_name,
            labels,
            open,
            body,
            end,
        })))
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.nested(Self::parse_conditional)
    }

    fn parse_conditional(&mut self) -> Result<Expression> {
        let condition = self.parse_binary(1)?;
        if !self.at(TokenKind::Question) || self.newline_ends() {
            return Ok(condition);
        }

        let before_true = self.delimiter(TokenKind::Question)?;
        let true_part = self.parse_expression()?;
        let before_false = self.delimiter(TokenKind::Colon)?;
        let false_part = self.parse_expression()?;
        let (prefix, condition) = lift_prefix(condition);
        Ok(Expression::Conditional(Arc::new(Conditional {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            condition,
            true_part: LeftPadded::new(before_true, true_part),
            false_part: LeftPadded::new(before_false, false_part),
        })))
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let kind = self.peek_kind();
            let Some(operator) = binary_operator(kind) else {
                break;
            };
            if operator.precedence() < min_precedence || self.newline_ends() {
                break;
            }
            let before = self.delimiter(kind)?;
            let right = self.parse_binary(operator.precedence() + 1)?;
            let (prefix, lhs) = lift_prefix(left);
            left = Expression::Binary(Arc::new(Binary {
                id: TreeId::random(),
                prefix,
                markers: Markers::empty(),
                left: lhs,
                operator: LeftPadded::new(before, operator),
                right,
            }));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let operator = match self.peek_kind() {
            TokenKind::Minus => UnaryOperator::Negative,
            TokenKind::Bang => UnaryOperator::Not,
            _ => return self.parse_postfix(),
        };
        let prefix = self.prefix();
        self.bump();
        let expression = self.nested(Self::parse_unary)?;
        Ok(Expression::Unary(Arc::new(Unary {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            operator,
            expression,
        })))
    }

    fn parse_postfix(&mut self) -> Result<Expression> {
        let mut expression = self.parse_primary()?;
        while !self.newline_ends() {
            expression = match (self.peek_kind(), self.nth_kind(1), self.nth_kind(2)) {
                (TokenKind::Dot, TokenKind::Star, _) => {
                    let before = self.delimiter(TokenKind::Dot)?;
                    let star = self.delimiter(TokenKind::Star)?;
                    let operator = SplatOperator {
                        kind: SplatKind::Attribute,
                        star,
                        close: Space::EMPTY,
                    };
                    splat(expression, LeftPadded::new(before, operator))
                }
                (TokenKind::Dot, TokenKind::Ident | TokenKind::Number, _) => {
                    let before = self.delimiter(TokenKind::Dot)?;
                    let name_prefix = self.prefix();
                    let name = self.bump();
                    let (prefix, object) = lift_prefix(expression);
                    Expression::AttributeAccess(Arc::new(AttributeAccess {
                        id: TreeId::random(),
                        prefix,
                        markers: Markers::empty(),
                        object,
                        name: LeftPadded::new(before, Arc::new(Identifier::new(name_prefix, name))),
                    }))
                }
                (TokenKind::LBracket, TokenKind::Star, TokenKind::RBracket) => {
                    let before = self.delimiter(TokenKind::LBracket)?;
                    let star = self.delimiter(TokenKind::Star)?;
                    let close = self.delimiter(TokenKind::RBracket)?;
                    let operator = SplatOperator {
                        kind: SplatKind::Full,
                        star,
                        close,
                    };
                    splat(expression, LeftPadded::new(before, operator))
                }
                (TokenKind::LBracket, _, _) => {
                    let open = self.delimiter(TokenKind::LBracket)?;
                    let (position, after) = self.with_newlines(false, |p| {
                        let position = p.parse_expression()?;
                        let after = p.delimiter(TokenKind::RBracket)?;
                        Ok((position, after))
                    })?;
                    let (prefix, object) = lift_prefix(expression);
                    Expression::Index(Arc::new(Index {
                        id: TreeId::random(),
                        prefix,
                        markers: Markers::empty(),
                        object,
                        open,
                        position: RightPadded::new(position, after),
                    }))
                }
                _ => break,
            };
        }
        Ok(expression)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek_kind() {
            TokenKind::Number => {
                let prefix = self.prefix();
                let value = self.bump();
                Ok(literal(prefix, LiteralKind::Number, value))
            }
            TokenKind::Ident if self.nth_kind(1) == TokenKind::LParen => self.parse_function_call(),
            TokenKind::Ident => {
                let prefix = self.prefix();
                let name = self.bump();
                Ok(match name {
                    "true" | "false" => literal(prefix, LiteralKind::Bool, name),
                    "null" => literal(prefix, LiteralKind::Null, name),
                    _ => Expression::VariableExpression(Arc::new(VariableExpression::new(
                        prefix,
                        Arc::new(Identifier::build(name)),
                    ))),
                })
            }
            TokenKind::StringStart => self.parse_quoted_template(),
            TokenKind::HeredocStart => self.parse_heredoc(),
            TokenKind::LParen => self.parse_parentheses(),
            TokenKind::LBracket => self.parse_tuple(),
            TokenKind::LBrace => self.parse_object(),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_function_call(&mut self) -> Result<Expression> {
        let prefix = self.prefix();
        let name = Arc::new(Identifier::build(self.bump()));
        let before = self.delimiter(TokenKind::LParen)?;
        let arguments = self.with_newlines(false, |p| p.parse_list(TokenKind::RParen))?;
        Ok(Expression::FunctionCall(Arc::new(FunctionCall {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            name,
            arguments: Container::new(before, arguments),
        })))
    }

    /// Comma separated expressions up to and including `closer`
    ///
    /// An empty list holds one [`Empty`] element whose trailing space
    /// precedes the closer.
    fn parse_list(&mut self, closer: TokenKind) -> Result<Vec<RightPadded<Expression>>> {
        if self.at(closer) {
            let after = self.delimiter(closer)?;
            return Ok(vec![RightPadded::new(empty(), after)]);
        }

        let mut elements = Vec::new();
        loop {
            let element = self.parse_expression()?;
            if self.at(TokenKind::Ellipsis) {
                return Err(LstError::syntax(
                    self.cursor.path(),
                    self.peek().span.start,
                    "argument expansion with `...` is not supported",
                ));
            }
            if !self.at(TokenKind::Comma) {
                let after = self.delimiter(closer)?;
                elements.push(RightPadded::new(element, after));
                return Ok(elements);
            }

            let after = self.delimiter(TokenKind::Comma)?;
            if self.at(closer) {
                let suffix = self.delimiter(closer)?;
                let markers = Markers::empty().add(TrailingComma::new(suffix));
                elements.push(RightPadded::from_parts(element, after, markers));
                return Ok(elements);
            }
            elements.push(RightPadded::new(element, after));
        }
    }

    fn parse_parentheses(&mut self) -> Result<Expression> {
        let prefix = self.prefix();
        self.bump();
        let (expression, after) = self.with_newlines(false, |p| {
            let expression = p.parse_expression()?;
            let after = p.delimiter(TokenKind::RParen)?;
            Ok((expression, after))
        })?;
        Ok(Expression::Parentheses(Arc::new(Parentheses {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            expression: RightPadded::new(expression, after),
        })))
    }

    fn at_for(&self) -> bool {
        self.at_keyword("for") && self.nth_kind(1) == TokenKind::Ident
    }

    fn parse_tuple(&mut self) -> Result<Expression> {
        let prefix = self.prefix();
        self.bump();
        if self.at_for() {
            return self.with_newlines(false, |p| p.parse_for_tuple(prefix));
        }
        let values = self.with_newlines(false, |p| p.parse_list(TokenKind::RBracket))?;
        Ok(Expression::Tuple(Arc::new(Tuple {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            values: Container::new(Space::EMPTY, values),
        })))
    }

    fn parse_for_intro(&mut self) -> Result<Arc<ForIntro>> {
        let prefix = self.prefix();
        self.bump();

        let mut variables = Vec::new();
        loop {
            if !self.at(TokenKind::Ident) {
                return Err(self.unexpected("loop variable"));
            }
            let variable_prefix = self.prefix();
            let variable = Arc::new(Identifier::new(variable_prefix, self.bump()));
            if self.at(TokenKind::Comma) {
                let after = self.delimiter(TokenKind::Comma)?;
                variables.push(RightPadded::new(variable, after));
            } else {
                let after = self.keyword("in")?;
                variables.push(RightPadded::new(variable, after));
                break;
            }
        }
        let input = self.parse_expression()?;

        Ok(Arc::new(ForIntro {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            variables: Container::new(Space::EMPTY, variables),
            input,
        }))
    }

    fn parse_for_condition(&mut self) -> Result<Option<LeftPadded<Expression>>> {
        if !self.at_keyword("if") {
            return Ok(None);
        }
        let before = self.keyword("if")?;
        let condition = self.parse_expression()?;
        Ok(Some(LeftPadded::new(before, condition)))
    }

    fn parse_for_tuple(&mut self, prefix: Space) -> Result<Expression> {
        let intro = self.parse_for_intro()?;
        let before = self.delimiter(TokenKind::Colon)?;
        let update = self.parse_expression()?;
        let condition = self.parse_for_condition()?;
        let end = self.delimiter(TokenKind::RBracket)?;
        Ok(Expression::ForTuple(Arc::new(ForTuple {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            intro,
            update: LeftPadded::new(before, update),
            condition,
            end,
        })))
    }

    fn parse_object(&mut self) -> Result<Expression> {
        let prefix = self.prefix();
        self.bump();
        if self.at_for() {
            return self.with_newlines(false, |p| p.parse_for_object(prefix));
        }
        let arguments = self.with_newlines(true, |p| p.parse_object_elements())?;
        Ok(Expression::ObjectValue(Arc::new(ObjectValue {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            arguments: Container::new(Space::EMPTY, arguments),
        })))
    }

    fn parse_object_elements(&mut self) -> Result<Vec<RightPadded<Expression>>> {
        if self.at(TokenKind::RBrace) {
            let after = self.delimiter(TokenKind::RBrace)?;
            return Ok(vec![RightPadded::new(empty(), after)]);
        }

        let mut elements = Vec::new();
        loop {
            let key = self.parse_expression()?;
            let (prefix, name) = lift_prefix(key);
            let type_ = match self.peek_kind() {
                TokenKind::Equals => {
                    LeftPadded::new(self.delimiter(TokenKind::Equals)?, AttributeType::Assignment)
                }
                TokenKind::Colon => LeftPadded::new(
                    self.delimiter(TokenKind::Colon)?,
                    AttributeType::ObjectElement,
                ),
                _ => return Err(self.unexpected("`=` or `:`")),
            };
            let value = self.parse_expression()?;
            let comma = if self.at(TokenKind::Comma) {
                Some(self.delimiter(TokenKind::Comma)?)
            } else {
                None
            };
            let separated = comma.is_some();
            let element = Expression::Attribute(Arc::new(Attribute {
                id: TreeId::random(),
                prefix,
                markers: Markers::empty(),
                name,
                type_,
                value,
                comma,
            }));

            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                let after = self.delimiter(TokenKind::RBrace)?;
                elements.push(RightPadded::new(element, after));
                return Ok(elements);
            }
            if !separated && !self.peek().newline_before {
                return Err(self.unexpected("newline, `,` or `}`"));
            }
            elements.push(RightPadded::build(element));
        }
    }

    fn parse_for_object(&mut self, prefix: Space) -> Result<Expression> {
        let intro = self.parse_for_intro()?;
        let before_name = self.delimiter(TokenKind::Colon)?;
        let update_name = self.parse_expression()?;
        let before_value = self.delimiter(TokenKind::FatArrow)?;
        let update_value = self.parse_expression()?;
        let ellipsis = if self.at(TokenKind::Ellipsis) {
            Some(self.delimiter(TokenKind::Ellipsis)?)
        } else {
            None
        };
        let condition = self.parse_for_condition()?;
        let end = self.delimiter(TokenKind::RBrace)?;
        Ok(Expression::ForObject(Arc::new(ForObject {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            intro,
            update_name: LeftPadded::new(before_name, update_name),
            update_value: LeftPadded::new(before_value, update_value),
            ellipsis,
            condition,
            end,
        })))
    }

    /// Text and interpolation parts up to the closing token
    fn parse_template_parts(&mut self) -> Result<Vec<Expression>> {
        let mut parts = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::TemplateText => {
                    let prefix = self.prefix();
                    let text = self.bump();
                    parts.push(literal(prefix, LiteralKind::TemplateText, text));
                }
                TokenKind::InterpStart => {
                    let prefix = self.prefix();
                    self.bump();
                    let (expression, after) = self.with_newlines(false, |p| {
                        let expression = p.parse_expression()?;
                        let after = p.delimiter(TokenKind::InterpEnd)?;
                        Ok((expression, after))
                    })?;
                    parts.push(Expression::TemplateInterpolation(Arc::new(
                        TemplateInterpolation {
                            id: TreeId::random(),
                            prefix,
                            markers: Markers::empty(),
                            expression: RightPadded::new(expression, after),
                        },
                    )));
                }
                _ => return Ok(parts),
            }
        }
    }

    fn parse_quoted_template(&mut self) -> Result<Expression> {
        let prefix = self.prefix();
        self.bump();
        let expressions = self.parse_template_parts()?;
        self.delimiter(TokenKind::StringEnd)?;
        Ok(Expression::QuotedTemplate(Arc::new(QuotedTemplate::new(
            prefix,
            expressions,
        ))))
    }

    fn parse_heredoc(&mut self) -> Result<Expression> {
        let prefix = self.prefix();
        let introducer = self.bump();
        let (arrow, name) = match introducer.strip_prefix("<<-") {
            Some(name) => (HeredocArrow::Indented, name),
            None => (
                HeredocArrow::Plain,
                introducer.strip_prefix("<<").unwrap_or(introducer),
            ),
        };
        let expressions = self.parse_template_parts()?;
        if !self.at(TokenKind::HeredocEnd) {
            return Err(self.unexpected(&format!("`{name}`")));
        }
        let end = self.prefix();
        self.bump();

        Ok(Expression::HeredocTemplate(Arc::new(HeredocTemplate {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            arrow,
            delimiter: Arc::new(Identifier::build(name)),
            expressions,
            end,
        })))
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Plus => BinaryOperator::Addition,
        TokenKind::Minus => BinaryOperator::Subtraction,
        TokenKind::Star => BinaryOperator::Multiplication,
        TokenKind::Slash => BinaryOperator::Division,
        TokenKind::Percent => BinaryOperator::Modulo,
        TokenKind::EqEq => BinaryOperator::Equal,
        TokenKind::NotEq => BinaryOperator::NotEqual,
        TokenKind::Lt => BinaryOperator::LessThan,
        TokenKind::Le => BinaryOperator::LessThanOrEqual,
        TokenKind::Gt => BinaryOperator::GreaterThan,
        TokenKind::Ge => BinaryOperator::GreaterThanOrEqual,
        TokenKind::AndAnd => BinaryOperator::And,
        TokenKind::OrOr => BinaryOperator::Or,
        _ => return None,
    })
}

/// Move an operand's prefix onto the node being built around it
fn lift_prefix(expression: Expression) -> (Space, Expression) {
    let prefix = expression.prefix().clone();
    if prefix.is_empty() {
        return (prefix, expression);
    }
    (prefix, expression.with_prefix(Space::EMPTY))
}

fn literal(prefix: Space, kind: LiteralKind, value: &str) -> Expression {
    Expression::Literal(Arc::new(Literal::new(prefix, kind, value)))
}

fn empty() -> Expression {
    Expression::Empty(Arc::new(Empty::new(Space::EMPTY)))
}

fn splat(object: Expression, operator: LeftPadded<SplatOperator>) -> Expression {
    let (prefix, object) = lift_prefix(object);
    Expression::Splat(Arc::new(Splat {
        id: TreeId::random(),
        prefix,
        markers: Markers::empty(),
        object,
        operator,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lst_core::{HasMarkers, ParseWarning};

    fn parse(text: &str) -> ConfigFile {
        parse_config_file(Path::new("test.tf"), text, &ParserOptions::default()).unwrap()
    }

    fn value_of(text: &str) -> Expression {
        let file = parse(text);
        file.attributes().next().unwrap().value().clone()
    }

    #[test]
    fn deep_nesting_is_a_syntax_error() {
        let options = ParserOptions::default();
        for text in [
            format!("x = {}", "(".repeat(100_000)),
            format!("x = {}1", "!".repeat(100_000)),
            "a {\n".repeat(100_000),
        ] {
            let err = parse_config_file(Path::new("deep.tf"), &text, &options).unwrap_err();
            assert_eq!(err.kind(), lst_core::ErrorKind::Syntax);
            assert!(err.to_string().contains("nesting deeper than 128 levels"));
        }

        let nested = format!("x = {}1{}\n", "(".repeat(50), ")".repeat(50));
        assert_eq!(parse(&nested).attributes().count(), 1);
    }

    #[test]
    fn attributes_and_blocks() {
        let file = parse("a = 1\nresource \"aws_instance\" \"web\" {\n  ami = \"x\"\n}\n");
        assert_eq!(file.body().len(), 2);
        let block = file.blocks().next().unwrap();
        assert_eq!(block.type_name().name(), "resource");
        assert_eq!(block.label_values(), vec!["aws_instance", "web"]);
        assert_eq!(block.end().whitespace(), "\n");
        assert_eq!(file.eof().whitespace(), "\n");
    }

    #[test]
    fn prefixes_hold_comments() {
        let file = parse("# first\na = 1 // trailing\nb = 2");
        let b = &file.body()[1];
        assert_eq!(b.prefix().whitespace(), " ");
        assert_eq!(b.prefix().comments()[0].text(), " trailing");
        assert_eq!(b.prefix().comments()[0].suffix(), "\n");
    }

    #[test]
    fn precedence_climbing() {
        let Expression::Binary(sum) = value_of("x = 1 + 2 * 3") else {
            panic!("expected binary");
        };
        assert_eq!(sum.operator(), BinaryOperator::Addition);
        assert_eq!(sum.prefix.whitespace(), " ");
        assert!(sum.left().prefix().is_empty());
        let Expression::Binary(product) = sum.right() else {
            panic!("expected nested binary");
        };
        assert_eq!(product.operator(), BinaryOperator::Multiplication);
    }

    #[test]
    fn newline_ends_attribute_value() {
        let file = parse("a = b\nc = d\n");
        assert_eq!(file.attributes().count(), 2);

        let err = parse_config_file(Path::new("t.tf"), "a = 1\n+ 2\n", &ParserOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn newlines_inside_brackets_are_ignored() {
        let Expression::Tuple(tuple) = value_of("x = [\n  1,\n  2\n  + 3,\n]") else {
            panic!("expected tuple");
        };
        assert_eq!(tuple.values().len(), 2);
        let last = tuple.padding().values.padded_elements().last().unwrap();
        assert!(last.markers().contains::<TrailingComma>());
    }

    #[test]
    fn traversals_and_splats() {
        let Expression::AttributeAccess(access) = value_of("x = var.list[*].id") else {
            panic!("expected attribute access");
        };
        assert_eq!(access.name().name(), "id");
        let Expression::Splat(splat) = access.object() else {
            panic!("expected splat");
        };
        assert_eq!(splat.kind(), SplatKind::Full);
    }

    #[test]
    fn for_expressions() {
        let Expression::ForObject(for_object) =
            value_of("x = { for k, v in var.m : k => upper(v)... if v != \"\" }")
        else {
            panic!("expected for object");
        };
        assert_eq!(for_object.intro().variables().len(), 2);
        assert!(for_object.is_grouped());
        assert!(for_object.condition().is_some());

        let Expression::ForTuple(for_tuple) = value_of("x = [for s in var.l : s]") else {
            panic!("expected for tuple");
        };
        assert!(for_tuple.condition().is_none());
    }

    #[test]
    fn templates() {
        let Expression::QuotedTemplate(template) = value_of("x = \"a-${b}-c\"") else {
            panic!("expected template");
        };
        assert_eq!(template.expressions().len(), 3);

        let Expression::HeredocTemplate(heredoc) = value_of("x = <<-EOT\n  hi\n  EOT\n") else {
            panic!("expected heredoc");
        };
        assert_eq!(heredoc.arrow(), HeredocArrow::Indented);
        assert_eq!(heredoc.delimiter().name(), "EOT");
        assert_eq!(heredoc.end().whitespace(), "  ");
    }

    #[test]
    fn object_elements_carry_commas() {
        let Expression::ObjectValue(object) = value_of("x = { a = 1, b: 2 }") else {
            panic!("expected object");
        };
        let elements = object.elements();
        assert_eq!(elements.len(), 2);
        assert!(elements[0].comma().is_some());
        assert_eq!(elements[1].type_(), AttributeType::ObjectElement);
    }

    #[test]
    fn bom_is_remembered() {
        let file = parse("\u{feff}a = 1\n");
        assert!(file.charset_bom());
        assert!(file.body()[0].prefix().is_empty());
    }

    #[test]
    fn lexer_errors_are_syntax_errors() {
        let err = parse_config_file(
            Path::new("bad.tf"),
            "a = \"open\n",
            &ParserOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn missing_brace_warns() {
        let file = parse("block {\n  a = 1\n");
        assert!(file.markers().contains::<ParseWarning>());
    }

    #[test]
    fn missing_brace_is_fatal_when_strict() {
        let options = ParserOptions {
            strict_delimiters: true,
            ..ParserOptions::default()
        };
        assert!(parse_config_file(Path::new("t.tf"), "block {\n", &options).is_err());
    }

    #[test]
    fn argument_expansion_is_rejected() {
        let err = parse_config_file(
            Path::new("t.tf"),
            "x = f(a...)",
            &ParserOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("..."));
    }

    #[test]
    fn standalone_expression() {
        let expression = parse_expression("merge(a, {b = 1})", &ParserOptions::default()).unwrap();
        assert_eq!(expression.kind_name(), "FunctionCall");
    }
}
