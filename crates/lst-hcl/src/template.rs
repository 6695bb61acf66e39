//! Code templates spliced into HCL trees
//!
//! A template is a snippet with `#{}` placeholders. Applying it substitutes
//! the parameters, parses the result with the regular parser and splices the
//! new nodes at a coordinate inside the scope tree. Only the inserted nodes
//! are auto-formatted; everything else keeps its identity and prints as
//! before.
//!
//! ```rust,ignore
//! let template = HclTemplate::builder("#{} = #{}").build();
//! let file = template.apply_to_file(&file, block.coordinates().last(), &["count", "2"])?;
//! ```

use crate::format::{AutoFormat, detect_style};
use crate::location::Location;
use crate::parser::{parse_config_file, parse_expression};
use crate::tree::*;
use crate::visitor::{
    HclCursor, HclElement, HclVisitor, visit_tree, walk_block, walk_config_file, walk_expression,
};
use lst_core::{FormatStyle, LstError, ParserOptions, Space, TreeId};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const PLACEHOLDER: &str = "#{}";

/// Orders body items for [`InsertMode::Ordered`]
pub type Comparator = Arc<dyn Fn(&BodyContent, &BodyContent) -> Ordering + Send + Sync>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template expects {expected} parameter(s) but {actual} were supplied")]
    ParameterCount { expected: usize, actual: usize },

    #[error("generated code does not parse: {0}")]
    Parse(#[from] LstError),

    #[error("no tree with id {0} inside the template scope")]
    CoordinateNotFound(TreeId),

    #[error("cannot {mode} a {kind}")]
    UnsupportedCoordinate {
        mode: &'static str,
        kind: &'static str,
    },
}

impl From<TemplateError> for LstError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Parse(err) => err,
            other => LstError::Template {
                message: other.to_string(),
            },
        }
    }
}

/// How generated code relates to the coordinate's tree
#[derive(Clone)]
pub enum InsertMode {
    Replace,
    Before,
    After,
    /// Append to the body of a file or block
    Last,
    /// Insert into the body of a file or block before the first greater item
    Ordered(Comparator),
}

impl InsertMode {
    fn name(&self) -> &'static str {
        match self {
            InsertMode::Replace => "replace",
            InsertMode::Before => "insert before",
            InsertMode::After => "insert after",
            InsertMode::Last => "append to",
            InsertMode::Ordered(_) => "insert into",
        }
    }
}

impl fmt::Debug for InsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertMode::Ordered(_) => f.write_str("Ordered(..)"),
            other => f.write_str(other.name()),
        }
    }
}

/// Where a template's output goes
#[derive(Debug, Clone)]
pub struct HclCoordinates {
    tree: Hcl,
    location: Location,
    mode: InsertMode,
}

impl HclCoordinates {
    pub fn tree(&self) -> &Hcl {
        &self.tree
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn mode(&self) -> &InsertMode {
        &self.mode
    }
}

/// Coordinates relative to one tree
#[derive(Debug, Clone)]
pub struct CoordinateBuilder {
    tree: Hcl,
}

impl CoordinateBuilder {
    fn at(self, location: Location, mode: InsertMode) -> HclCoordinates {
        HclCoordinates {
            tree: self.tree,
            location,
            mode,
        }
    }

    fn prefix_location(&self) -> Location {
        match &self.tree {
            Hcl::ConfigFile(_) => Location::ConfigFilePrefix,
            Hcl::Block(_) => Location::BlockPrefix,
            Hcl::ForIntro(_) => Location::ForIntroPrefix,
            Hcl::Expression(Expression::Attribute(_)) => Location::AttributePrefix,
            Hcl::Expression(_) => Location::IdentifierPrefix,
        }
    }

    fn body_end(&self) -> Location {
        match &self.tree {
            Hcl::ConfigFile(_) => Location::ConfigFileEof,
            _ => Location::BlockClose,
        }
    }

    pub fn replace(self) -> HclCoordinates {
        let location = self.prefix_location();
        self.at(location, InsertMode::Replace)
    }

    pub fn before(self) -> HclCoordinates {
        let location = self.prefix_location();
        self.at(location, InsertMode::Before)
    }

    pub fn after(self) -> HclCoordinates {
        let location = self.prefix_location();
        self.at(location, InsertMode::After)
    }

    pub fn last(self) -> HclCoordinates {
        let location = self.body_end();
        self.at(location, InsertMode::Last)
    }

    pub fn add(self, comparator: Comparator) -> HclCoordinates {
        let location = self.body_end();
        self.at(location, InsertMode::Ordered(comparator))
    }
}

/// Trees that can anchor a template
pub trait Coordinates {
    fn coordinates(&self) -> CoordinateBuilder;
}

impl Coordinates for Hcl {
    fn coordinates(&self) -> CoordinateBuilder {
        CoordinateBuilder { tree: self.clone() }
    }
}

impl Coordinates for Arc<ConfigFile> {
    fn coordinates(&self) -> CoordinateBuilder {
        Hcl::ConfigFile(self.clone()).coordinates()
    }
}

impl Coordinates for Arc<Block> {
    fn coordinates(&self) -> CoordinateBuilder {
        Hcl::Block(self.clone()).coordinates()
    }
}

impl Coordinates for Arc<Attribute> {
    fn coordinates(&self) -> CoordinateBuilder {
        Hcl::Expression(Expression::Attribute(self.clone())).coordinates()
    }
}

impl Coordinates for Expression {
    fn coordinates(&self) -> CoordinateBuilder {
        Hcl::Expression(self.clone()).coordinates()
    }
}

impl Coordinates for BodyContent {
    fn coordinates(&self) -> CoordinateBuilder {
        Hcl::from(self.clone()).coordinates()
    }
}

#[derive(Debug, Clone)]
pub struct HclTemplateBuilder {
    code: String,
    style: Option<FormatStyle>,
}

impl HclTemplateBuilder {
    /// Formatting for inserted code; detected from the file when unset
    pub fn style(mut self, style: FormatStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn build(self) -> HclTemplate {
        let parameter_count = self.code.matches(PLACEHOLDER).count();
        HclTemplate {
            code: self.code,
            style: self.style,
            parameter_count,
        }
    }
}

/// Snippet of HCL with `#{}` positional placeholders
#[derive(Debug, Clone)]
pub struct HclTemplate {
    code: String,
    style: Option<FormatStyle>,
    parameter_count: usize,
}

enum Generated {
    Body(Vec<BodyContent>),
    Expression(Expression),
}

impl HclTemplate {
    pub fn builder(code: impl Into<String>) -> HclTemplateBuilder {
        HclTemplateBuilder {
            code: code.into(),
            style: None,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Code with every placeholder replaced, in order
    pub fn substitute(&self, parameters: &[&str]) -> Result<String, TemplateError> {
        self.check_parameters(parameters)?;
        let mut code = String::with_capacity(self.code.len());
        let mut rest = self.code.as_str();
        let mut parameters = parameters.iter();
        while let Some(pos) = rest.find(PLACEHOLDER) {
            code.push_str(&rest[..pos]);
            if let Some(parameter) = parameters.next() {
                code.push_str(parameter);
            }
            rest = &rest[pos + PLACEHOLDER.len()..];
        }
        code.push_str(rest);
        Ok(code)
    }

    fn check_parameters(&self, parameters: &[&str]) -> Result<(), TemplateError> {
        if parameters.len() != self.parameter_count {
            return Err(TemplateError::ParameterCount {
                expected: self.parameter_count,
                actual: parameters.len(),
            });
        }
        Ok(())
    }

    /// Splice the generated code into the tree under `scope`
    ///
    /// Returns the rebuilt scope tree. The coordinate's tree must be the
    /// scope itself or one of its descendants.
    pub fn apply(
        &self,
        scope: &HclCursor<'_>,
        coordinates: HclCoordinates,
        parameters: &[&str],
    ) -> Result<Hcl, TemplateError> {
        self.check_parameters(parameters)?;
        check_coordinates(&coordinates)?;

        let target = coordinates.tree.id();
        let Some(scope_tree) = element_tree(scope.value()) else {
            return Err(TemplateError::CoordinateNotFound(target));
        };

        if matches!(coordinates.mode, InsertMode::Before | InsertMode::After)
            && is_object_element(&scope_tree, target)
        {
            return Err(TemplateError::UnsupportedCoordinate {
                mode: coordinates.mode.name(),
                kind: "ObjectElement",
            });
        }

        let code = self.substitute(parameters)?;
        let generated = generate(&coordinates, &code)?;
        let style = self.style.unwrap_or_else(|| {
            scope
                .first_enclosing::<&Arc<ConfigFile>>()
                .map(|file| detect_style(file))
                .unwrap_or_default()
        });
        debug!(
            "Applying template {:?} with {:?} at {:?}",
            self.code, coordinates.mode, coordinates.location
        );

        if scope_tree.id() == target && matches!(coordinates.mode, InsertMode::Replace) {
            return replace_root(&scope_tree, &generated);
        }

        let mut splice = Splice {
            target,
            mode: &coordinates.mode,
            generated: &generated,
            style,
            done: false,
        };
        let root = HclCursor::root(HclElement::Root);
        let parent = scope.parent().unwrap_or(&root);
        let spliced = visit_tree(&mut splice, &scope_tree, parent, &mut ()).unwrap_or(scope_tree);
        if !splice.done {
            return Err(TemplateError::CoordinateNotFound(target));
        }
        Ok(spliced)
    }

    /// Apply with a whole file as the scope
    pub fn apply_to_file(
        &self,
        file: &Arc<ConfigFile>,
        coordinates: HclCoordinates,
        parameters: &[&str],
    ) -> Result<Arc<ConfigFile>, TemplateError> {
        let scope = HclCursor::root(HclElement::ConfigFile(file));
        match self.apply(&scope, coordinates, parameters)? {
            Hcl::ConfigFile(file) => Ok(file),
            _ => Err(TemplateError::UnsupportedCoordinate {
                mode: "replace",
                kind: "ConfigFile",
            }),
        }
    }
}

fn kind_of(tree: &Hcl) -> &'static str {
    match tree {
        Hcl::ConfigFile(_) => "ConfigFile",
        Hcl::Block(_) => "Block",
        Hcl::ForIntro(_) => "ForIntro",
        Hcl::Expression(expression) => expression.kind_name(),
    }
}

fn check_coordinates(coordinates: &HclCoordinates) -> Result<(), TemplateError> {
    let supported = match (&coordinates.tree, &coordinates.mode) {
        (Hcl::ConfigFile(_) | Hcl::Block(_), InsertMode::Last | InsertMode::Ordered(_)) => true,
        (Hcl::Block(_), InsertMode::Replace | InsertMode::Before | InsertMode::After) => true,
        (Hcl::Expression(Expression::Attribute(_)), _) => {
            !matches!(coordinates.mode, InsertMode::Last | InsertMode::Ordered(_))
        }
        (Hcl::Expression(_), InsertMode::Replace) => true,
        _ => false,
    };
    if supported {
        Ok(())
    } else {
        Err(TemplateError::UnsupportedCoordinate {
            mode: coordinates.mode.name(),
            kind: kind_of(&coordinates.tree),
        })
    }
}

/// Whether `target` is an element of some object value under `scope`
///
/// Body insertion only splices into file and block bodies.
fn is_object_element(scope: &Hcl, target: TreeId) -> bool {
    let mut finder = ObjectElementFinder {
        target,
        found: false,
    };
    let root = HclCursor::root(HclElement::Root);
    visit_tree(&mut finder, scope, &root, &mut ());
    finder.found
}

struct ObjectElementFinder {
    target: TreeId,
    found: bool,
}

impl HclVisitor<()> for ObjectElementFinder {
    fn visit_expression(
        &mut self,
        expression: &Expression,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Option<Expression> {
        if self.found {
            return Some(expression.clone());
        }
        if let Expression::ObjectValue(object) = expression
            && object.elements().iter().any(|element| element.id == self.target)
        {
            self.found = true;
            return Some(expression.clone());
        }
        walk_expression(self, expression, cursor, p)
    }
}

/// Parse the substituted code in the shape the coordinate needs
fn generate(coordinates: &HclCoordinates, code: &str) -> Result<Generated, TemplateError> {
    let options = ParserOptions::default();
    if let (Hcl::Expression(target), InsertMode::Replace) = (&coordinates.tree, &coordinates.mode)
        && !matches!(target, Expression::Attribute(_))
    {
        return Ok(Generated::Expression(parse_expression(code, &options)?));
    }

    let file = parse_config_file(Path::new("template.tf"), code, &options)?;
    if file.body.is_empty() {
        return Err(LstError::Template {
            message: format!("template {code:?} produced no attribute or block"),
        }
        .into());
    }
    Ok(Generated::Body(file.body))
}

fn prefix_of(tree: &Hcl) -> Space {
    match tree {
        Hcl::ConfigFile(file) => file.prefix.clone(),
        Hcl::Block(block) => block.prefix.clone(),
        Hcl::ForIntro(intro) => intro.prefix.clone(),
        Hcl::Expression(expression) => expression.prefix().clone(),
    }
}

/// Replacement for a scope that is itself the coordinate
fn replace_root(scope: &Hcl, generated: &Generated) -> Result<Hcl, TemplateError> {
    let prefix = prefix_of(scope);
    match generated {
        Generated::Expression(expression) => {
            Ok(Hcl::Expression(expression.with_prefix(prefix)))
        }
        Generated::Body(items) => match items.first() {
            Some(first) => Ok(Hcl::from(first.with_prefix(prefix))),
            None => Err(TemplateError::UnsupportedCoordinate {
                mode: "replace",
                kind: kind_of(scope),
            }),
        },
    }
}

/// Owned tree behind a cursor frame
fn element_tree(element: HclElement<'_>) -> Option<Hcl> {
    let expression = match element {
        HclElement::Root | HclElement::Padding(_) => return None,
        HclElement::ConfigFile(file) => return Some(Hcl::ConfigFile(file.clone())),
        HclElement::Block(block) => return Some(Hcl::Block(block.clone())),
        HclElement::ForIntro(intro) => return Some(Hcl::ForIntro(intro.clone())),
        HclElement::Attribute(e) => Expression::Attribute(e.clone()),
        HclElement::AttributeAccess(e) => Expression::AttributeAccess(e.clone()),
        HclElement::Binary(e) => Expression::Binary(e.clone()),
        HclElement::Conditional(e) => Expression::Conditional(e.clone()),
        HclElement::Empty(e) => Expression::Empty(e.clone()),
        HclElement::ForObject(e) => Expression::ForObject(e.clone()),
        HclElement::ForTuple(e) => Expression::ForTuple(e.clone()),
        HclElement::FunctionCall(e) => Expression::FunctionCall(e.clone()),
        HclElement::HeredocTemplate(e) => Expression::HeredocTemplate(e.clone()),
        HclElement::Identifier(e) => Expression::Identifier(e.clone()),
        HclElement::Index(e) => Expression::Index(e.clone()),
        HclElement::Literal(e) => Expression::Literal(e.clone()),
        HclElement::ObjectValue(e) => Expression::ObjectValue(e.clone()),
        HclElement::Parentheses(e) => Expression::Parentheses(e.clone()),
        HclElement::QuotedTemplate(e) => Expression::QuotedTemplate(e.clone()),
        HclElement::Splat(e) => Expression::Splat(e.clone()),
        HclElement::TemplateInterpolation(e) => Expression::TemplateInterpolation(e.clone()),
        HclElement::Tuple(e) => Expression::Tuple(e.clone()),
        HclElement::Unary(e) => Expression::Unary(e.clone()),
        HclElement::VariableExpression(e) => Expression::VariableExpression(e.clone()),
    };
    Some(Hcl::Expression(expression))
}

/// Visitor placing generated code at one coordinate
struct Splice<'t> {
    target: TreeId,
    mode: &'t InsertMode,
    generated: &'t Generated,
    style: FormatStyle,
    done: bool,
}

impl Splice<'_> {
    /// Put `item` at `index`, keeping the first line of a file unindented
    fn insert_at(
        &self,
        body: &mut Vec<BodyContent>,
        index: usize,
        item: BodyContent,
        formatter: &AutoFormat,
        file_start: bool,
    ) {
        if index == 0 && file_start {
            let first_prefix = body.first().map(|first| first.prefix().clone());
            let item = item.with_prefix(first_prefix.clone().unwrap_or(Space::EMPTY));
            if let Some(prefix) = first_prefix {
                body[0] = body[0].with_prefix(formatter.line_start(&prefix, formatter.depth()));
            }
            body.insert(0, item);
        } else {
            body.insert(index, item);
        }
    }

    fn splice_body(
        &mut self,
        owner: TreeId,
        body: &[BodyContent],
        depth: usize,
        file_start: bool,
    ) -> Option<Vec<BodyContent>> {
        if self.done {
            return None;
        }
        let Generated::Body(items) = self.generated else {
            return None;
        };

        let owns_body = owner == self.target;
        let index = match self.mode {
            InsertMode::Last | InsertMode::Ordered(_) if owns_body => None,
            InsertMode::Replace | InsertMode::Before | InsertMode::After => {
                Some(body.iter().position(|content| content.id() == self.target)?)
            }
            _ => return None,
        };

        let mut formatter = AutoFormat::new(self.style).at_depth(depth);
        let items: Vec<BodyContent> = items
            .iter()
            .map(|item| formatter.format_body_content(item))
            .collect();
        let mut spliced = body.to_vec();

        match (self.mode, index) {
            (InsertMode::Last, _) => {
                for item in items {
                    let at = spliced.len();
                    self.insert_at(&mut spliced, at, item, &formatter, file_start);
                }
            }
            (InsertMode::Ordered(comparator), _) => {
                for item in items {
                    let at = spliced
                        .iter()
                        .position(|existing| comparator(existing, &item) == Ordering::Greater)
                        .unwrap_or(spliced.len());
                    self.insert_at(&mut spliced, at, item, &formatter, file_start);
                }
            }
            (InsertMode::Before, Some(index)) => {
                for (offset, item) in items.into_iter().enumerate() {
                    self.insert_at(&mut spliced, index + offset, item, &formatter, file_start);
                }
            }
            (InsertMode::After, Some(index)) => {
                for (offset, item) in items.into_iter().enumerate() {
                    spliced.insert(index + 1 + offset, item);
                }
            }
            (InsertMode::Replace, Some(index)) => {
                let replaced = spliced.remove(index);
                for (offset, item) in items.into_iter().enumerate() {
                    let item = if offset == 0 {
                        item.with_prefix(replaced.prefix().clone())
                    } else {
                        item
                    };
                    spliced.insert(index + offset, item);
                }
            }
            _ => return None,
        }

        self.done = true;
        Some(spliced)
    }

    fn replacement_expression(&self, original: &Expression) -> Option<Expression> {
        let replacement = match self.generated {
            Generated::Expression(expression) => expression.clone(),
            Generated::Body(items) => Expression::Attribute(items.first()?.as_attribute()?.clone()),
        };
        let replacement = match (original, &replacement) {
            (Expression::Attribute(original), Expression::Attribute(generated)) => {
                Expression::Attribute(Arc::new(Attribute {
                    comma: original.comma.clone(),
                    ..(**generated).clone()
                }))
            }
            _ => replacement,
        };
        Some(replacement.with_prefix(original.prefix().clone()))
    }
}

impl HclVisitor<()> for Splice<'_> {
    fn visit_config_file(
        &mut self,
        file: &Arc<ConfigFile>,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Arc<ConfigFile> {
        let visited = walk_config_file(self, file, cursor, p);
        match self.splice_body(file.id, &visited.body, 0, true) {
            Some(body) => Arc::new(visited.with_body(body)),
            None => visited,
        }
    }

    fn visit_block(
        &mut self,
        block: &Arc<Block>,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Option<Arc<Block>> {
        let depth = cursor.count_enclosing::<&Arc<Block>>();
        let visited = walk_block(self, block, cursor, p)?;
        let Some(body) = self.splice_body(block.id, &visited.body, depth + 1, false) else {
            return Some(visited);
        };
        let end = if visited.body.is_empty() && !visited.end.contains_newline() {
            AutoFormat::new(self.style).line_start(&visited.end, depth)
        } else {
            visited.end.clone()
        };
        Some(Arc::new(Block {
            body,
            end,
            ..(*visited).clone()
        }))
    }

    fn visit_expression(
        &mut self,
        expression: &Expression,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Option<Expression> {
        if !self.done
            && expression.id() == self.target
            && matches!(self.mode, InsertMode::Replace)
            && let Some(replacement) = self.replacement_expression(expression)
        {
            self.done = true;
            return Some(replacement);
        }
        walk_expression(self, expression, cursor, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lst_core::SourceFile;

    fn parse(text: &str) -> Arc<ConfigFile> {
        Arc::new(parse_config_file(Path::new("t.tf"), text, &ParserOptions::default()).unwrap())
    }

    #[test]
    fn parameter_count_is_checked_before_parsing() {
        let template = HclTemplate::builder("#{} = = #{}").build();
        let file = parse("a {}\n");
        let err = template
            .apply_to_file(&file, file.coordinates().last(), &["x"])
            .unwrap_err();
        assert!(matches!(
            err,
            TemplateError::ParameterCount {
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(
            err.to_string(),
            "template expects 2 parameter(s) but 1 were supplied"
        );
    }

    #[test]
    fn substitutes_in_order() {
        let template = HclTemplate::builder("#{} = #{}").build();
        assert_eq!(template.parameter_count(), 2);
        assert_eq!(template.substitute(&["a", "1"]).unwrap(), "a = 1");
    }

    #[test]
    fn snippet_parse_errors_are_typed() {
        let template = HclTemplate::builder("a = = 1").build();
        let file = parse("b = 1\n");
        let err = template
            .apply_to_file(&file, file.coordinates().last(), &[])
            .unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }

    #[test]
    fn replaces_an_expression() {
        let file = parse("a = 1 + 2\nb = 3\n");
        let value = file.attributes().next().unwrap().value().clone();
        let template = HclTemplate::builder("max(#{}, 10)").build();
        let updated = template
            .apply_to_file(&file, value.coordinates().replace(), &["x"])
            .unwrap();
        assert_eq!(updated.print_sanitized(), "a = max(x, 10)\nb = 3\n");
        assert!(Arc::ptr_eq(
            updated.body()[1].as_attribute().unwrap(),
            file.body()[1].as_attribute().unwrap()
        ));
    }

    #[test]
    fn inserts_before_and_after() {
        let file = parse("a = 1\nb = 2\n");
        let b = file.attributes().nth(1).unwrap().clone();
        let template = HclTemplate::builder("x = 0").build();

        let before = template
            .apply_to_file(&file, b.coordinates().before(), &[])
            .unwrap();
        assert_eq!(before.print_sanitized(), "a = 1\nx = 0\nb = 2\n");

        let after = template
            .apply_to_file(&file, b.coordinates().after(), &[])
            .unwrap();
        assert_eq!(after.print_sanitized(), "a = 1\nb = 2\nx = 0\n");
    }

    #[test]
    fn inserting_before_the_first_line() {
        let file = parse("a = 1\n");
        let a = file.attributes().next().unwrap().clone();
        let updated = HclTemplate::builder("x = 0")
            .build()
            .apply_to_file(&file, a.coordinates().before(), &[])
            .unwrap();
        assert_eq!(updated.print_sanitized(), "x = 0\na = 1\n");
    }

    #[test]
    fn ordered_insertion() {
        let file = parse("l {\n  a = 1\n  c = 3\n}\n");
        let block = file.blocks().next().unwrap().clone();
        let by_name: Comparator = Arc::new(|left, right| {
            let name = |content: &BodyContent| {
                content
                    .as_attribute()
                    .and_then(|a| a.simple_name().map(str::to_string))
                    .unwrap_or_default()
            };
            name(left).cmp(&name(right))
        });
        let updated = HclTemplate::builder("b = 2")
            .build()
            .apply_to_file(&file, block.coordinates().add(by_name), &[])
            .unwrap();
        assert_eq!(updated.print_sanitized(), "l {\n  a = 1\n  b = 2\n  c = 3\n}\n");
    }

    #[test]
    fn unsupported_coordinates_are_rejected() {
        let file = parse("a = 1\n");
        let err = HclTemplate::builder("b = 2")
            .build()
            .apply_to_file(&file, file.coordinates().before(), &[])
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot insert before a ConfigFile");
    }

    #[test]
    fn object_elements_only_support_replace() {
        let file = parse("x = {\n  a = 1\n}\n");
        let Expression::ObjectValue(object) = file.attributes().next().unwrap().value() else {
            panic!("expected an object value");
        };
        let element = object.elements()[0].clone();
        let template = HclTemplate::builder("b = 2").build();
        for coordinates in [element.coordinates().before(), element.coordinates().after()] {
            let err = template
                .apply_to_file(&file, coordinates, &[])
                .unwrap_err();
            assert!(matches!(
                err,
                TemplateError::UnsupportedCoordinate {
                    kind: "ObjectElement",
                    ..
                }
            ));
        }
        assert_eq!(
            template
                .apply_to_file(&file, element.coordinates().before(), &[])
                .unwrap_err()
                .to_string(),
            "cannot insert before a ObjectElement"
        );

        let replaced = template
            .apply_to_file(&file, element.coordinates().replace(), &[])
            .unwrap();
        assert_eq!(replaced.print_sanitized(), "x = {\n  b = 2\n}\n");
    }

    #[test]
    fn missing_coordinate() {
        let file = parse("a = 1\n");
        let elsewhere = parse("z {}\n");
        let block = elsewhere.blocks().next().unwrap().clone();
        let err = HclTemplate::builder("b = 2")
            .build()
            .apply_to_file(&file, block.coordinates().last(), &[])
            .unwrap_err();
        assert!(matches!(err, TemplateError::CoordinateNotFound(_)));
    }
}
