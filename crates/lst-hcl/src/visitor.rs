//! Visitor engine for HCL trees
//!
//! [`HclVisitor`] has one method per node kind. Every default method calls the
//! matching `walk_*` function, which visits prefix, markers and children in
//! source order and rebuilds the node only if some child came back different.
//! An untouched subtree is returned as the same `Arc`, so a no-op visit costs
//! no allocation and keeps every node identity.
//!
//! Returning `None` from a kind's visit deletes the node. Deleting an optional
//! child or a list element drops it; deleting a required child is a bug in the
//! visitor and panics with the parent kind and field.

use crate::location::Location;
use crate::tree::*;
use lst_core::padding::close_list;
use lst_core::{
    Container, Cursor, HasMarkers, LeftPadded, Markers, Projection, RightPadded, Same, Space, Tree,
};
use std::sync::Arc;

/// Value of one cursor frame during an HCL visit
#[derive(Debug, Clone, Copy)]
pub enum HclElement<'a> {
    Root,
    ConfigFile(&'a Arc<ConfigFile>),
    Block(&'a Arc<Block>),
    Attribute(&'a Arc<Attribute>),
    AttributeAccess(&'a Arc<AttributeAccess>),
    Binary(&'a Arc<Binary>),
    Conditional(&'a Arc<Conditional>),
    Empty(&'a Arc<Empty>),
    ForIntro(&'a Arc<ForIntro>),
    ForObject(&'a Arc<ForObject>),
    ForTuple(&'a Arc<ForTuple>),
    FunctionCall(&'a Arc<FunctionCall>),
    HeredocTemplate(&'a Arc<HeredocTemplate>),
    Identifier(&'a Arc<Identifier>),
    Index(&'a Arc<Index>),
    Literal(&'a Arc<Literal>),
    ObjectValue(&'a Arc<ObjectValue>),
    Parentheses(&'a Arc<Parentheses>),
    QuotedTemplate(&'a Arc<QuotedTemplate>),
    Splat(&'a Arc<Splat>),
    TemplateInterpolation(&'a Arc<TemplateInterpolation>),
    Tuple(&'a Arc<Tuple>),
    Unary(&'a Arc<Unary>),
    VariableExpression(&'a Arc<VariableExpression>),
    /// A padded wrapper or container slot
    Padding(Location),
}

pub type HclCursor<'a> = Cursor<'a, HclElement<'a>>;

macro_rules! project {
    ($($variant:ident),* $(,)?) => {
        $(
            impl<'a> Projection<&'a Arc<$variant>> for HclElement<'a> {
                fn project(&self) -> Option<&'a Arc<$variant>> {
                    match *self {
                        HclElement::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            }
        )*
    };
}

project!(
    ConfigFile,
    Block,
    Attribute,
    AttributeAccess,
    Binary,
    Conditional,
    Empty,
    ForIntro,
    ForObject,
    ForTuple,
    FunctionCall,
    HeredocTemplate,
    Identifier,
    Index,
    Literal,
    ObjectValue,
    Parentheses,
    QuotedTemplate,
    Splat,
    TemplateInterpolation,
    Tuple,
    Unary,
    VariableExpression,
);

impl Projection<Location> for HclElement<'_> {
    fn project(&self) -> Option<Location> {
        match *self {
            HclElement::Padding(location) => Some(location),
            _ => None,
        }
    }
}

/// Element types that can sit inside a padded wrapper
pub trait HclVisitable: Clone + Same {
    fn accept<V: HclVisitor<P>, P>(&self, v: &mut V, cursor: &HclCursor<'_>, p: &mut P)
    -> Option<Self>;

    /// Copy of `self` carrying the prefix of `other`
    fn with_prefix_of(&self, _other: &Self) -> Self {
        self.clone()
    }
}

impl HclVisitable for Expression {
    fn accept<V: HclVisitor<P>, P>(
        &self,
        v: &mut V,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Self> {
        v.visit_expression(self, cursor, p)
    }

    fn with_prefix_of(&self, other: &Self) -> Self {
        self.with_prefix(other.prefix().clone())
    }
}

impl HclVisitable for Arc<Identifier> {
    fn accept<V: HclVisitor<P>, P>(
        &self,
        v: &mut V,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Self> {
        v.visit_identifier(self, cursor, p)
    }

    fn with_prefix_of(&self, other: &Self) -> Self {
        Arc::new(Tree::with_prefix(self.as_ref(), other.prefix.clone()))
    }
}

impl HclVisitable for AttributeType {
    fn accept<V: HclVisitor<P>, P>(&self, _: &mut V, _: &HclCursor<'_>, _: &mut P) -> Option<Self> {
        Some(*self)
    }
}

impl HclVisitable for BinaryOperator {
    fn accept<V: HclVisitor<P>, P>(&self, _: &mut V, _: &HclCursor<'_>, _: &mut P) -> Option<Self> {
        Some(*self)
    }
}

impl HclVisitable for SplatOperator {
    fn accept<V: HclVisitor<P>, P>(
        &self,
        v: &mut V,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Self> {
        let star = v.visit_space(&self.star, Location::SplatStar, cursor, p);
        let close = v.visit_space(&self.close, Location::SplatClose, cursor, p);
        Some(SplatOperator {
            kind: self.kind,
            star,
            close,
        })
    }
}

/// Per-kind visitor over HCL trees
///
/// Override the kinds of interest and call the matching `walk_*` function to
/// keep descending. `P` is caller state threaded through the whole visit.
pub trait HclVisitor<P>: Sized {
    /// Whether this visitor has anything to do with `file` at all
    fn is_acceptable(&self, _file: &ConfigFile, _p: &P) -> bool {
        true
    }

    /// Visit a whole file with a fresh cursor chain
    fn visit(&mut self, file: &Arc<ConfigFile>, p: &mut P) -> Arc<ConfigFile> {
        if !self.is_acceptable(file, p) {
            return file.clone();
        }
        let root = HclCursor::root(HclElement::Root);
        self.visit_config_file(file, &root, p)
    }

    fn visit_config_file(
        &mut self,
        file: &Arc<ConfigFile>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Arc<ConfigFile> {
        walk_config_file(self, file, cursor, p)
    }

    /// Dispatch on the kind of a body item; may return another kind
    fn visit_body_content(
        &mut self,
        content: &BodyContent,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<BodyContent> {
        walk_body_content(self, content, cursor, p)
    }

    /// Dispatch on the kind of an expression; may return another kind
    fn visit_expression(
        &mut self,
        expression: &Expression,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Expression> {
        walk_expression(self, expression, cursor, p)
    }

    fn visit_block(
        &mut self,
        block: &Arc<Block>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Block>> {
        walk_block(self, block, cursor, p)
    }

    fn visit_attribute(
        &mut self,
        attribute: &Arc<Attribute>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Attribute>> {
        walk_attribute(self, attribute, cursor, p)
    }

    fn visit_attribute_access(
        &mut self,
        access: &Arc<AttributeAccess>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<AttributeAccess>> {
        walk_attribute_access(self, access, cursor, p)
    }

    fn visit_binary(
        &mut self,
        binary: &Arc<Binary>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Binary>> {
        walk_binary(self, binary, cursor, p)
    }

    fn visit_conditional(
        &mut self,
        conditional: &Arc<Conditional>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Conditional>> {
        walk_conditional(self, conditional, cursor, p)
    }

    fn visit_empty(
        &mut self,
        empty: &Arc<Empty>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Empty>> {
        walk_empty(self, empty, cursor, p)
    }

    fn visit_for_intro(
        &mut self,
        intro: &Arc<ForIntro>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<ForIntro>> {
        walk_for_intro(self, intro, cursor, p)
    }

    fn visit_for_object(
        &mut self,
        for_object: &Arc<ForObject>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<ForObject>> {
        walk_for_object(self, for_object, cursor, p)
    }

    fn visit_for_tuple(
        &mut self,
        for_tuple: &Arc<ForTuple>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<ForTuple>> {
        walk_for_tuple(self, for_tuple, cursor, p)
    }

    fn visit_function_call(
        &mut self,
        call: &Arc<FunctionCall>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<FunctionCall>> {
        walk_function_call(self, call, cursor, p)
    }

    fn visit_heredoc_template(
        &mut self,
        heredoc: &Arc<HeredocTemplate>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<HeredocTemplate>> {
        walk_heredoc_template(self, heredoc, cursor, p)
    }

    fn visit_identifier(
        &mut self,
        identifier: &Arc<Identifier>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Identifier>> {
        walk_identifier(self, identifier, cursor, p)
    }

    fn visit_index(
        &mut self,
        index: &Arc<Index>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Index>> {
        walk_index(self, index, cursor, p)
    }

    fn visit_literal(
        &mut self,
        literal: &Arc<Literal>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Literal>> {
        walk_literal(self, literal, cursor, p)
    }

    fn visit_object_value(
        &mut self,
        object: &Arc<ObjectValue>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<ObjectValue>> {
        walk_object_value(self, object, cursor, p)
    }

    fn visit_parentheses(
        &mut self,
        parentheses: &Arc<Parentheses>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Parentheses>> {
        walk_parentheses(self, parentheses, cursor, p)
    }

    fn visit_quoted_template(
        &mut self,
        template: &Arc<QuotedTemplate>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<QuotedTemplate>> {
        walk_quoted_template(self, template, cursor, p)
    }

    fn visit_splat(
        &mut self,
        splat: &Arc<Splat>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Splat>> {
        walk_splat(self, splat, cursor, p)
    }

    fn visit_template_interpolation(
        &mut self,
        interpolation: &Arc<TemplateInterpolation>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<TemplateInterpolation>> {
        walk_template_interpolation(self, interpolation, cursor, p)
    }

    fn visit_tuple(
        &mut self,
        tuple: &Arc<Tuple>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Tuple>> {
        walk_tuple(self, tuple, cursor, p)
    }

    fn visit_unary(
        &mut self,
        unary: &Arc<Unary>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Unary>> {
        walk_unary(self, unary, cursor, p)
    }

    fn visit_variable_expression(
        &mut self,
        variable: &Arc<VariableExpression>,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<VariableExpression>> {
        walk_variable_expression(self, variable, cursor, p)
    }

    fn visit_space(
        &mut self,
        space: &Space,
        _location: Location,
        _cursor: &HclCursor<'_>,
        _p: &mut P,
    ) -> Space {
        space.clone()
    }

    fn visit_markers(&mut self, markers: &Markers, _cursor: &HclCursor<'_>, _p: &mut P) -> Markers {
        markers.clone()
    }

    fn visit_right_padded<T: HclVisitable>(
        &mut self,
        padded: &RightPadded<T>,
        location: Location,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<RightPadded<T>> {
        walk_right_padded(self, padded, location, cursor, p)
    }

    fn visit_left_padded<T: HclVisitable>(
        &mut self,
        padded: &LeftPadded<T>,
        location: Location,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Option<LeftPadded<T>> {
        walk_left_padded(self, padded, location, cursor, p)
    }

    fn visit_container<T: HclVisitable>(
        &mut self,
        container: &Container<T>,
        location: Location,
        element_location: Location,
        cursor: &HclCursor<'_>,
        p: &mut P,
    ) -> Container<T> {
        walk_container(self, container, location, element_location, cursor, p)
    }
}

/// Visit any HCL tree below `cursor`
pub fn visit_tree<V: HclVisitor<P>, P>(
    v: &mut V,
    tree: &Hcl,
    cursor: &HclCursor<'_>,
    p: &mut P,
) -> Option<Hcl> {
    match tree {
        Hcl::ConfigFile(file) => Some(Hcl::ConfigFile(v.visit_config_file(file, cursor, p))),
        Hcl::Block(block) => v.visit_block(block, cursor, p).map(Hcl::Block),
        Hcl::ForIntro(intro) => v.visit_for_intro(intro, cursor, p).map(Hcl::ForIntro),
        Hcl::Expression(expression) => v.visit_expression(expression, cursor, p).map(Hcl::Expression),
    }
}

/// Unwrap a child the grammar requires
///
/// # Panics
///
/// When a visitor deleted the child.
fn required<T>(value: Option<T>, kind: &str, field: &str) -> T {
    match value {
        Some(value) => value,
        None => panic!("visitor deleted required child `{field}` of {kind}"),
    }
}

macro_rules! all_same {
    ($($new:expr => $old:expr),* $(,)?) => {
        true $(&& $new.same(&$old))*
    };
}

/// Keep the visited elements of a list, dropping deleted ones
///
/// When leading elements are deleted the first survivor takes over the
/// prefix of the original first element.
fn rebuild_list<T: Clone>(
    original: &[T],
    visited: Vec<Option<T>>,
    inherit_prefix: impl Fn(&T, &T) -> T,
) -> Vec<T> {
    let mut leading_deleted = false;
    let mut rebuilt = Vec::with_capacity(visited.len());
    for item in visited {
        match item {
            None if rebuilt.is_empty() => leading_deleted = true,
            None => {}
            Some(item) => match original.first() {
                Some(first) if leading_deleted && rebuilt.is_empty() => {
                    rebuilt.push(inherit_prefix(&item, first))
                }
                _ => rebuilt.push(item),
            },
        }
    }
    rebuilt
}

fn visit_body<V: HclVisitor<P>, P>(
    v: &mut V,
    body: &[BodyContent],
    cursor: &HclCursor<'_>,
    p: &mut P,
) -> Vec<BodyContent> {
    let visited = body
        .iter()
        .map(|content| v.visit_body_content(content, cursor, p))
        .collect();
    rebuild_list(body, visited, |item, first| {
        item.with_prefix(first.prefix().clone())
    })
}

fn visit_expressions<V: HclVisitor<P>, P>(
    v: &mut V,
    expressions: &[Expression],
    cursor: &HclCursor<'_>,
    p: &mut P,
) -> Vec<Expression> {
    let visited = expressions
        .iter()
        .map(|expression| v.visit_expression(expression, cursor, p))
        .collect();
    rebuild_list(expressions, visited, HclVisitable::with_prefix_of)
}

pub fn walk_right_padded<V: HclVisitor<P>, P, T: HclVisitable>(
    v: &mut V,
    padded: &RightPadded<T>,
    location: Location,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<RightPadded<T>> {
    let cursor = parent.push(HclElement::Padding(location));
    let element = padded.element().accept(v, &cursor, p)?;
    let after = v.visit_space(padded.after(), location, &cursor, p);
    let markers = v.visit_markers(HasMarkers::markers(padded), &cursor, p);
    if all_same!(element => *padded.element(), after => *padded.after(), markers => *HasMarkers::markers(padded)) {
        return Some(padded.clone());
    }
    Some(RightPadded::from_parts(element, after, markers))
}

pub fn walk_left_padded<V: HclVisitor<P>, P, T: HclVisitable>(
    v: &mut V,
    padded: &LeftPadded<T>,
    location: Location,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<LeftPadded<T>> {
    let cursor = parent.push(HclElement::Padding(location));
    let before = v.visit_space(padded.before(), location, &cursor, p);
    let element = padded.element().accept(v, &cursor, p)?;
    let markers = v.visit_markers(HasMarkers::markers(padded), &cursor, p);
    if all_same!(before => *padded.before(), element => *padded.element(), markers => *HasMarkers::markers(padded)) {
        return Some(padded.clone());
    }
    Some(LeftPadded::from_parts(before, element, markers))
}

pub fn walk_container<V: HclVisitor<P>, P, T: HclVisitable>(
    v: &mut V,
    container: &Container<T>,
    location: Location,
    element_location: Location,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Container<T> {
    let cursor = parent.push(HclElement::Padding(location));
    let before = v.visit_space(container.before(), location, &cursor, p);
    let visited: Vec<_> = container
        .padded_elements()
        .iter()
        .map(|element| v.visit_right_padded(element, element_location, &cursor, p))
        .collect();
    let last_deleted = matches!(visited.last(), Some(None));
    let mut elements = rebuild_list(container.padded_elements(), visited, |item, first| {
        item.with_element(item.element().with_prefix_of(first.element()))
    });
    if last_deleted {
        close_list(&mut elements, container.padded_elements());
    }
    let markers = v.visit_markers(HasMarkers::markers(container), &cursor, p);
    let original = container.padded_elements();
    if before.same(container.before())
        && elements.len() == original.len()
        && elements.iter().zip(original).all(|(new, old)| new.same(old))
        && markers.same(HasMarkers::markers(container))
    {
        return container.clone();
    }
    Container::from_parts(before, elements, markers)
}

pub fn walk_config_file<V: HclVisitor<P>, P>(
    v: &mut V,
    file: &Arc<ConfigFile>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Arc<ConfigFile> {
    let cursor = parent.push(HclElement::ConfigFile(file));
    let prefix = v.visit_space(&file.prefix, Location::ConfigFilePrefix, &cursor, p);
    let markers = v.visit_markers(&file.markers, &cursor, p);
    let body = visit_body(v, &file.body, &cursor, p);
    let eof = v.visit_space(&file.eof, Location::ConfigFileEof, &cursor, p);
    if all_same!(prefix => file.prefix, markers => file.markers, body => file.body, eof => file.eof) {
        return file.clone();
    }
    Arc::new(ConfigFile {
        id: file.id,
        prefix,
        markers,
        source_path: file.source_path.clone(),
        charset_bom: file.charset_bom,
        body,
        eof,
    })
}

pub fn walk_body_content<V: HclVisitor<P>, P>(
    v: &mut V,
    content: &BodyContent,
    cursor: &HclCursor<'_>,
    p: &mut P,
) -> Option<BodyContent> {
    match content {
        BodyContent::Attribute(attribute) => v
            .visit_attribute(attribute, cursor, p)
            .map(BodyContent::Attribute),
        BodyContent::Block(block) => v.visit_block(block, cursor, p).map(BodyContent::Block),
    }
}

pub fn walk_expression<V: HclVisitor<P>, P>(
    v: &mut V,
    expression: &Expression,
    cursor: &HclCursor<'_>,
    p: &mut P,
) -> Option<Expression> {
    match expression {
        Expression::Attribute(e) => v.visit_attribute(e, cursor, p).map(Expression::Attribute),
        Expression::AttributeAccess(e) => v
            .visit_attribute_access(e, cursor, p)
            .map(Expression::AttributeAccess),
        Expression::Binary(e) => v.visit_binary(e, cursor, p).map(Expression::Binary),
        Expression::Conditional(e) => v
            .visit_conditional(e, cursor, p)
            .map(Expression::Conditional),
        Expression::Empty(e) => v.visit_empty(e, cursor, p).map(Expression::Empty),
        Expression::ForObject(e) => v.visit_for_object(e, cursor, p).map(Expression::ForObject),
        Expression::ForTuple(e) => v.visit_for_tuple(e, cursor, p).map(Expression::ForTuple),
        Expression::FunctionCall(e) => v
            .visit_function_call(e, cursor, p)
            .map(Expression::FunctionCall),
        Expression::HeredocTemplate(e) => v
            .visit_heredoc_template(e, cursor, p)
            .map(Expression::HeredocTemplate),
        Expression::Identifier(e) => v.visit_identifier(e, cursor, p).map(Expression::Identifier),
        Expression::Index(e) => v.visit_index(e, cursor, p).map(Expression::Index),
        Expression::Literal(e) => v.visit_literal(e, cursor, p).map(Expression::Literal),
        Expression::ObjectValue(e) => v
            .visit_object_value(e, cursor, p)
            .map(Expression::ObjectValue),
        Expression::Parentheses(e) => v
            .visit_parentheses(e, cursor, p)
            .map(Expression::Parentheses),
        Expression::QuotedTemplate(e) => v
            .visit_quoted_template(e, cursor, p)
            .map(Expression::QuotedTemplate),
        Expression::Splat(e) => v.visit_splat(e, cursor, p).map(Expression::Splat),
        Expression::TemplateInterpolation(e) => v
            .visit_template_interpolation(e, cursor, p)
            .map(Expression::TemplateInterpolation),
        Expression::Tuple(e) => v.visit_tuple(e, cursor, p).map(Expression::Tuple),
        Expression::Unary(e) => v.visit_unary(e, cursor, p).map(Expression::Unary),
        Expression::VariableExpression(e) => v
            .visit_variable_expression(e, cursor, p)
            .map(Expression::VariableExpression),
    }
}

pub fn walk_block<V: HclVisitor<P>, P>(
    v: &mut V,
    block: &Arc<Block>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Block>> {
    let cursor = parent.push(HclElement::Block(block));
    let prefix = v.visit_space(&block.prefix, Location::BlockPrefix, &cursor, p);
    let markers = v.visit_markers(&block.markers, &cursor, p);
    let type_name = required(
        v.visit_identifier(&block.type_name, &cursor, p),
        "Block",
        "type_name",
    );
    let labels = visit_expressions(v, &block.labels, &cursor, p);
    let open = v.visit_space(&block.open, Location::BlockOpen, &cursor, p);
    let body = visit_body(v, &block.body, &cursor, p);
    let end = v.visit_space(&block.end, Location::BlockClose, &cursor, p);
    if all_same!(
        prefix => block.prefix,
        markers => block.markers,
        type_name => block.type_name,
        labels => block.labels,
        open => block.open,
        body => block.body,
        end => block.end,
    ) {
        return Some(block.clone());
    }
    Some(Arc::new(Block {
        id: block.id,
        prefix,
        markers,
        type_name,
        labels,
        open,
        body,
        end,
    }))
}

pub fn walk_attribute<V: HclVisitor<P>, P>(
    v: &mut V,
    attribute: &Arc<Attribute>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Attribute>> {
    let cursor = parent.push(HclElement::Attribute(attribute));
    let prefix = v.visit_space(&attribute.prefix, Location::AttributePrefix, &cursor, p);
    let markers = v.visit_markers(&attribute.markers, &cursor, p);
    let name = required(
        v.visit_expression(&attribute.name, &cursor, p),
        "Attribute",
        "name",
    );
    let type_ = required(
        v.visit_left_padded(&attribute.type_, Location::AttributeAssignment, &cursor, p),
        "Attribute",
        "type",
    );
    let value = required(
        v.visit_expression(&attribute.value, &cursor, p),
        "Attribute",
        "value",
    );
    let comma = attribute
        .comma
        .as_ref()
        .map(|comma| v.visit_space(comma, Location::AttributeComma, &cursor, p));
    if all_same!(
        prefix => attribute.prefix,
        markers => attribute.markers,
        name => attribute.name,
        type_ => attribute.type_,
        value => attribute.value,
        comma => attribute.comma,
    ) {
        return Some(attribute.clone());
    }
    Some(Arc::new(Attribute {
        id: attribute.id,
        prefix,
        markers,
        name,
        type_,
        value,
        comma,
    }))
}

pub fn walk_attribute_access<V: HclVisitor<P>, P>(
    v: &mut V,
    access: &Arc<AttributeAccess>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<AttributeAccess>> {
    let cursor = parent.push(HclElement::AttributeAccess(access));
    let prefix = v.visit_space(&access.prefix, Location::AttributeAccessPrefix, &cursor, p);
    let markers = v.visit_markers(&access.markers, &cursor, p);
    let object = required(
        v.visit_expression(&access.object, &cursor, p),
        "AttributeAccess",
        "object",
    );
    let name = required(
        v.visit_left_padded(&access.name, Location::AttributeAccessName, &cursor, p),
        "AttributeAccess",
        "name",
    );
    if all_same!(
        prefix => access.prefix,
        markers => access.markers,
        object => access.object,
        name => access.name,
    ) {
        return Some(access.clone());
    }
    Some(Arc::new(AttributeAccess {
        id: access.id,
        prefix,
        markers,
        object,
        name,
    }))
}

pub fn walk_binary<V: HclVisitor<P>, P>(
    v: &mut V,
    binary: &Arc<Binary>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Binary>> {
    let cursor = parent.push(HclElement::Binary(binary));
    let prefix = v.visit_space(&binary.prefix, Location::BinaryPrefix, &cursor, p);
    let markers = v.visit_markers(&binary.markers, &cursor, p);
    let left = required(v.visit_expression(&binary.left, &cursor, p), "Binary", "left");
    let operator = required(
        v.visit_left_padded(&binary.operator, Location::BinaryOperator, &cursor, p),
        "Binary",
        "operator",
    );
    let right = required(
        v.visit_expression(&binary.right, &cursor, p),
        "Binary",
        "right",
    );
    if all_same!(
        prefix => binary.prefix,
        markers => binary.markers,
        left => binary.left,
        operator => binary.operator,
        right => binary.right,
    ) {
        return Some(binary.clone());
    }
    Some(Arc::new(Binary {
        id: binary.id,
        prefix,
        markers,
        left,
        operator,
        right,
    }))
}

pub fn walk_conditional<V: HclVisitor<P>, P>(
    v: &mut V,
    conditional: &Arc<Conditional>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Conditional>> {
    let cursor = parent.push(HclElement::Conditional(conditional));
    let prefix = v.visit_space(&conditional.prefix, Location::ConditionalPrefix, &cursor, p);
    let markers = v.visit_markers(&conditional.markers, &cursor, p);
    let condition = required(
        v.visit_expression(&conditional.condition, &cursor, p),
        "Conditional",
        "condition",
    );
    let true_part = required(
        v.visit_left_padded(&conditional.true_part, Location::ConditionalTrue, &cursor, p),
        "Conditional",
        "true_part",
    );
    let false_part = required(
        v.visit_left_padded(
            &conditional.false_part,
            Location::ConditionalFalse,
            &cursor,
            p,
        ),
        "Conditional",
        "false_part",
    );
    if all_same!(
        prefix => conditional.prefix,
        markers => conditional.markers,
        condition => conditional.condition,
        true_part => conditional.true_part,
        false_part => conditional.false_part,
    ) {
        return Some(conditional.clone());
    }
    Some(Arc::new(Conditional {
        id: conditional.id,
        prefix,
        markers,
        condition,
        true_part,
        false_part,
    }))
}

pub fn walk_empty<V: HclVisitor<P>, P>(
    v: &mut V,
    empty: &Arc<Empty>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Empty>> {
    let cursor = parent.push(HclElement::Empty(empty));
    let prefix = v.visit_space(&empty.prefix, Location::EmptyPrefix, &cursor, p);
    let markers = v.visit_markers(&empty.markers, &cursor, p);
    if all_same!(prefix => empty.prefix, markers => empty.markers) {
        return Some(empty.clone());
    }
    Some(Arc::new(Empty {
        id: empty.id,
        prefix,
        markers,
    }))
}

pub fn walk_for_intro<V: HclVisitor<P>, P>(
    v: &mut V,
    intro: &Arc<ForIntro>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<ForIntro>> {
    let cursor = parent.push(HclElement::ForIntro(intro));
    let prefix = v.visit_space(&intro.prefix, Location::ForIntroPrefix, &cursor, p);
    let markers = v.visit_markers(&intro.markers, &cursor, p);
    let variables = v.visit_container(
        &intro.variables,
        Location::ForIntroVariables,
        Location::ForIntroVariableSuffix,
        &cursor,
        p,
    );
    let input = required(
        v.visit_expression(&intro.input, &cursor, p),
        "ForIntro",
        "input",
    );
    if all_same!(
        prefix => intro.prefix,
        markers => intro.markers,
        variables => intro.variables,
        input => intro.input,
    ) {
        return Some(intro.clone());
    }
    Some(Arc::new(ForIntro {
        id: intro.id,
        prefix,
        markers,
        variables,
        input,
    }))
}

fn visit_for_condition<V: HclVisitor<P>, P>(
    v: &mut V,
    condition: &Option<LeftPadded<Expression>>,
    cursor: &HclCursor<'_>,
    p: &mut P,
) -> Option<LeftPadded<Expression>> {
    condition
        .as_ref()
        .and_then(|condition| v.visit_left_padded(condition, Location::ForCondition, cursor, p))
}

pub fn walk_for_object<V: HclVisitor<P>, P>(
    v: &mut V,
    for_object: &Arc<ForObject>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<ForObject>> {
    let cursor = parent.push(HclElement::ForObject(for_object));
    let prefix = v.visit_space(&for_object.prefix, Location::ForObjectPrefix, &cursor, p);
    let markers = v.visit_markers(&for_object.markers, &cursor, p);
    let intro = required(
        v.visit_for_intro(&for_object.intro, &cursor, p),
        "ForObject",
        "intro",
    );
    let update_name = required(
        v.visit_left_padded(
            &for_object.update_name,
            Location::ForObjectUpdateName,
            &cursor,
            p,
        ),
        "ForObject",
        "update_name",
    );
    let update_value = required(
        v.visit_left_padded(
            &for_object.update_value,
            Location::ForObjectUpdateValue,
            &cursor,
            p,
        ),
        "ForObject",
        "update_value",
    );
    let ellipsis = for_object
        .ellipsis
        .as_ref()
        .map(|space| v.visit_space(space, Location::ForObjectEllipsis, &cursor, p));
    let condition = visit_for_condition(v, &for_object.condition, &cursor, p);
    let end = v.visit_space(&for_object.end, Location::ForObjectSuffix, &cursor, p);
    if all_same!(
        prefix => for_object.prefix,
        markers => for_object.markers,
        intro => for_object.intro,
        update_name => for_object.update_name,
        update_value => for_object.update_value,
        ellipsis => for_object.ellipsis,
        condition => for_object.condition,
        end => for_object.end,
    ) {
        return Some(for_object.clone());
    }
    Some(Arc::new(ForObject {
        id: for_object.id,
        prefix,
        markers,
        intro,
        update_name,
        update_value,
        ellipsis,
        condition,
        end,
    }))
}

pub fn walk_for_tuple<V: HclVisitor<P>, P>(
    v: &mut V,
    for_tuple: &Arc<ForTuple>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<ForTuple>> {
    let cursor = parent.push(HclElement::ForTuple(for_tuple));
    let prefix = v.visit_space(&for_tuple.prefix, Location::ForTuplePrefix, &cursor, p);
    let markers = v.visit_markers(&for_tuple.markers, &cursor, p);
    let intro = required(
        v.visit_for_intro(&for_tuple.intro, &cursor, p),
        "ForTuple",
        "intro",
    );
    let update = required(
        v.visit_left_padded(
            &for_tuple.update,
            Location::ForTupleExpression,
            &cursor,
            p,
        ),
        "ForTuple",
        "update",
    );
    let condition = visit_for_condition(v, &for_tuple.condition, &cursor, p);
    let end = v.visit_space(&for_tuple.end, Location::ForTupleSuffix, &cursor, p);
    if all_same!(
        prefix => for_tuple.prefix,
        markers => for_tuple.markers,
        intro => for_tuple.intro,
        update => for_tuple.update,
        condition => for_tuple.condition,
        end => for_tuple.end,
    ) {
        return Some(for_tuple.clone());
    }
    Some(Arc::new(ForTuple {
        id: for_tuple.id,
        prefix,
        markers,
        intro,
        update,
        condition,
        end,
    }))
}

pub fn walk_function_call<V: HclVisitor<P>, P>(
    v: &mut V,
    call: &Arc<FunctionCall>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<FunctionCall>> {
    let cursor = parent.push(HclElement::FunctionCall(call));
    let prefix = v.visit_space(&call.prefix, Location::FunctionCallPrefix, &cursor, p);
    let markers = v.visit_markers(&call.markers, &cursor, p);
    let name = required(
        v.visit_identifier(&call.name, &cursor, p),
        "FunctionCall",
        "name",
    );
    let arguments = v.visit_container(
        &call.arguments,
        Location::FunctionCallArguments,
        Location::FunctionCallArgumentSuffix,
        &cursor,
        p,
    );
    if all_same!(
        prefix => call.prefix,
        markers => call.markers,
        name => call.name,
        arguments => call.arguments,
    ) {
        return Some(call.clone());
    }
    Some(Arc::new(FunctionCall {
        id: call.id,
        prefix,
        markers,
        name,
        arguments,
    }))
}

pub fn walk_heredoc_template<V: HclVisitor<P>, P>(
    v: &mut V,
    heredoc: &Arc<HeredocTemplate>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<HeredocTemplate>> {
    let cursor = parent.push(HclElement::HeredocTemplate(heredoc));
    let prefix = v.visit_space(&heredoc.prefix, Location::HeredocTemplatePrefix, &cursor, p);
    let markers = v.visit_markers(&heredoc.markers, &cursor, p);
    let delimiter = required(
        v.visit_identifier(&heredoc.delimiter, &cursor, p),
        "HeredocTemplate",
        "delimiter",
    );
    let expressions = visit_expressions(v, &heredoc.expressions, &cursor, p);
    let end = v.visit_space(&heredoc.end, Location::HeredocEnd, &cursor, p);
    if all_same!(
        prefix => heredoc.prefix,
        markers => heredoc.markers,
        delimiter => heredoc.delimiter,
        expressions => heredoc.expressions,
        end => heredoc.end,
    ) {
        return Some(heredoc.clone());
    }
    Some(Arc::new(HeredocTemplate {
        id: heredoc.id,
        prefix,
        markers,
        arrow: heredoc.arrow,
        delimiter,
        expressions,
        end,
    }))
}

pub fn walk_identifier<V: HclVisitor<P>, P>(
    v: &mut V,
    identifier: &Arc<Identifier>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Identifier>> {
    let cursor = parent.push(HclElement::Identifier(identifier));
    let prefix = v.visit_space(&identifier.prefix, Location::IdentifierPrefix, &cursor, p);
    let markers = v.visit_markers(&identifier.markers, &cursor, p);
    if all_same!(prefix => identifier.prefix, markers => identifier.markers) {
        return Some(identifier.clone());
    }
    Some(Arc::new(Identifier {
        id: identifier.id,
        prefix,
        markers,
        name: identifier.name.clone(),
    }))
}

pub fn walk_index<V: HclVisitor<P>, P>(
    v: &mut V,
    index: &Arc<Index>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Index>> {
    let cursor = parent.push(HclElement::Index(index));
    let prefix = v.visit_space(&index.prefix, Location::IndexPrefix, &cursor, p);
    let markers = v.visit_markers(&index.markers, &cursor, p);
    let object = required(v.visit_expression(&index.object, &cursor, p), "Index", "object");
    let open = v.visit_space(&index.open, Location::IndexOpen, &cursor, p);
    let position = required(
        v.visit_right_padded(&index.position, Location::IndexPosition, &cursor, p),
        "Index",
        "position",
    );
    if all_same!(
        prefix => index.prefix,
        markers => index.markers,
        object => index.object,
        open => index.open,
        position => index.position,
    ) {
        return Some(index.clone());
    }
    Some(Arc::new(Index {
        id: index.id,
        prefix,
        markers,
        object,
        open,
        position,
    }))
}

pub fn walk_literal<V: HclVisitor<P>, P>(
    v: &mut V,
    literal: &Arc<Literal>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Literal>> {
    let cursor = parent.push(HclElement::Literal(literal));
    let prefix = v.visit_space(&literal.prefix, Location::LiteralPrefix, &cursor, p);
    let markers = v.visit_markers(&literal.markers, &cursor, p);
    if all_same!(prefix => literal.prefix, markers => literal.markers) {
        return Some(literal.clone());
    }
    Some(Arc::new(Literal {
        id: literal.id,
        prefix,
        markers,
        kind: literal.kind,
        value_source: literal.value_source.clone(),
    }))
}

pub fn walk_object_value<V: HclVisitor<P>, P>(
    v: &mut V,
    object: &Arc<ObjectValue>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<ObjectValue>> {
    let cursor = parent.push(HclElement::ObjectValue(object));
    let prefix = v.visit_space(&object.prefix, Location::ObjectValuePrefix, &cursor, p);
    let markers = v.visit_markers(&object.markers, &cursor, p);
    let arguments = v.visit_container(
        &object.arguments,
        Location::ObjectValueArguments,
        Location::ObjectValueArgumentSuffix,
        &cursor,
        p,
    );
    if all_same!(
        prefix => object.prefix,
        markers => object.markers,
        arguments => object.arguments,
    ) {
        return Some(object.clone());
    }
    Some(Arc::new(ObjectValue {
        id: object.id,
        prefix,
        markers,
        arguments,
    }))
}

pub fn walk_parentheses<V: HclVisitor<P>, P>(
    v: &mut V,
    parentheses: &Arc<Parentheses>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Parentheses>> {
    let cursor = parent.push(HclElement::Parentheses(parentheses));
    let prefix = v.visit_space(&parentheses.prefix, Location::ParenthesesPrefix, &cursor, p);
    let markers = v.visit_markers(&parentheses.markers, &cursor, p);
    let expression = required(
        v.visit_right_padded(
            &parentheses.expression,
            Location::ParenthesesSuffix,
            &cursor,
            p,
        ),
        "Parentheses",
        "expression",
    );
    if all_same!(
        prefix => parentheses.prefix,
        markers => parentheses.markers,
        expression => parentheses.expression,
    ) {
        return Some(parentheses.clone());
    }
    Some(Arc::new(Parentheses {
        id: parentheses.id,
        prefix,
        markers,
        expression,
    }))
}

pub fn walk_quoted_template<V: HclVisitor<P>, P>(
    v: &mut V,
    template: &Arc<QuotedTemplate>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<QuotedTemplate>> {
    let cursor = parent.push(HclElement::QuotedTemplate(template));
    let prefix = v.visit_space(&template.prefix, Location::QuotedTemplatePrefix, &cursor, p);
    let markers = v.visit_markers(&template.markers, &cursor, p);
    let expressions = visit_expressions(v, &template.expressions, &cursor, p);
    if all_same!(
        prefix => template.prefix,
        markers => template.markers,
        expressions => template.expressions,
    ) {
        return Some(template.clone());
    }
    Some(Arc::new(QuotedTemplate {
        id: template.id,
        prefix,
        markers,
        expressions,
    }))
}

pub fn walk_splat<V: HclVisitor<P>, P>(
    v: &mut V,
    splat: &Arc<Splat>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Splat>> {
    let cursor = parent.push(HclElement::Splat(splat));
    let prefix = v.visit_space(&splat.prefix, Location::SplatPrefix, &cursor, p);
    let markers = v.visit_markers(&splat.markers, &cursor, p);
    let object = required(v.visit_expression(&splat.object, &cursor, p), "Splat", "object");
    let operator = required(
        v.visit_left_padded(&splat.operator, Location::SplatOperator, &cursor, p),
        "Splat",
        "operator",
    );
    if all_same!(
        prefix => splat.prefix,
        markers => splat.markers,
        object => splat.object,
        operator => splat.operator,
    ) {
        return Some(splat.clone());
    }
    Some(Arc::new(Splat {
        id: splat.id,
        prefix,
        markers,
        object,
        operator,
    }))
}

pub fn walk_template_interpolation<V: HclVisitor<P>, P>(
    v: &mut V,
    interpolation: &Arc<TemplateInterpolation>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<TemplateInterpolation>> {
    let cursor = parent.push(HclElement::TemplateInterpolation(interpolation));
    let prefix = v.visit_space(
        &interpolation.prefix,
        Location::TemplateInterpolationPrefix,
        &cursor,
        p,
    );
    let markers = v.visit_markers(&interpolation.markers, &cursor, p);
    let expression = required(
        v.visit_right_padded(
            &interpolation.expression,
            Location::TemplateInterpolationSuffix,
            &cursor,
            p,
        ),
        "TemplateInterpolation",
        "expression",
    );
    if all_same!(
        prefix => interpolation.prefix,
        markers => interpolation.markers,
        expression => interpolation.expression,
    ) {
        return Some(interpolation.clone());
    }
    Some(Arc::new(TemplateInterpolation {
        id: interpolation.id,
        prefix,
        markers,
        expression,
    }))
}

pub fn walk_tuple<V: HclVisitor<P>, P>(
    v: &mut V,
    tuple: &Arc<Tuple>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Tuple>> {
    let cursor = parent.push(HclElement::Tuple(tuple));
    let prefix = v.visit_space(&tuple.prefix, Location::TuplePrefix, &cursor, p);
    let markers = v.visit_markers(&tuple.markers, &cursor, p);
    let values = v.visit_container(
        &tuple.values,
        Location::TupleValues,
        Location::TupleValueSuffix,
        &cursor,
        p,
    );
    if all_same!(prefix => tuple.prefix, markers => tuple.markers, values => tuple.values) {
        return Some(tuple.clone());
    }
    Some(Arc::new(Tuple {
        id: tuple.id,
        prefix,
        markers,
        values,
    }))
}

pub fn walk_unary<V: HclVisitor<P>, P>(
    v: &mut V,
    unary: &Arc<Unary>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<Unary>> {
    let cursor = parent.push(HclElement::Unary(unary));
    let prefix = v.visit_space(&unary.prefix, Location::UnaryPrefix, &cursor, p);
    let markers = v.visit_markers(&unary.markers, &cursor, p);
    let expression = required(
        v.visit_expression(&unary.expression, &cursor, p),
        "Unary",
        "expression",
    );
    if all_same!(
        prefix => unary.prefix,
        markers => unary.markers,
        expression => unary.expression,
    ) {
        return Some(unary.clone());
    }
    Some(Arc::new(Unary {
        id: unary.id,
        prefix,
        markers,
        operator: unary.operator,
        expression,
    }))
}

pub fn walk_variable_expression<V: HclVisitor<P>, P>(
    v: &mut V,
    variable: &Arc<VariableExpression>,
    parent: &HclCursor<'_>,
    p: &mut P,
) -> Option<Arc<VariableExpression>> {
    let cursor = parent.push(HclElement::VariableExpression(variable));
    let prefix = v.visit_space(&variable.prefix, Location::VariableExpressionPrefix, &cursor, p);
    let markers = v.visit_markers(&variable.markers, &cursor, p);
    let name = required(
        v.visit_identifier(&variable.name, &cursor, p),
        "VariableExpression",
        "name",
    );
    if all_same!(
        prefix => variable.prefix,
        markers => variable.markers,
        name => variable.name,
    ) {
        return Some(variable.clone());
    }
    Some(Arc::new(VariableExpression {
        id: variable.id,
        prefix,
        markers,
        name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_config_file;
    use lst_core::ParserOptions;
    use std::path::Path;

    fn parse(text: &str) -> Arc<ConfigFile> {
        Arc::new(parse_config_file(Path::new("test.tf"), text, &ParserOptions::default()).unwrap())
    }

    const SAMPLE: &str = r#"
locals {
  names = [for s in var.list : upper(s) if s != ""]
  tags  = { Name = "web-${var.env}", "k" : 1 }
  pick  = var.enabled ? var.items[0].id : -1
}
"#;

    struct Noop;
    impl HclVisitor<()> for Noop {}

    #[test]
    fn noop_visit_keeps_the_root() {
        let file = parse(SAMPLE);
        let visited = Noop.visit(&file, &mut ());
        assert!(Arc::ptr_eq(&file, &visited));
    }

    /// Collects the type of the nearest enclosing block of every literal
    struct EnclosingBlocks(Vec<String>);

    impl HclVisitor<()> for EnclosingBlocks {
        fn visit_literal(
            &mut self,
            literal: &Arc<Literal>,
            cursor: &HclCursor<'_>,
            p: &mut (),
        ) -> Option<Arc<Literal>> {
            if let Some(block) = cursor.first_enclosing::<&Arc<Block>>() {
                self.0.push(block.type_name().name().clone());
            }
            walk_literal(self, literal, cursor, p)
        }
    }

    #[test]
    fn cursor_finds_enclosing_block() {
        let file = parse("a = 1\nlocals {\n  b = 2\n}\n");
        let mut visitor = EnclosingBlocks(Vec::new());
        visitor.visit(&file, &mut ());
        assert_eq!(visitor.0, vec!["locals".to_string()]);
    }

    /// Counts spaces visited before `}` of a block
    struct BlockCloses;

    impl HclVisitor<usize> for BlockCloses {
        fn visit_space(
            &mut self,
            space: &Space,
            location: Location,
            _cursor: &HclCursor<'_>,
            count: &mut usize,
        ) -> Space {
            if location == Location::BlockClose {
                *count += 1;
            }
            space.clone()
        }
    }

    #[test]
    fn spaces_carry_their_location() {
        let file = parse("a {\n  b {}\n}\n");
        let mut count = 0;
        BlockCloses.visit(&file, &mut count);
        assert_eq!(count, 2);
    }

    struct SkipEverything;

    impl HclVisitor<usize> for SkipEverything {
        fn is_acceptable(&self, _file: &ConfigFile, _p: &usize) -> bool {
            false
        }

        fn visit_attribute(
            &mut self,
            attribute: &Arc<Attribute>,
            cursor: &HclCursor<'_>,
            count: &mut usize,
        ) -> Option<Arc<Attribute>> {
            *count += 1;
            walk_attribute(self, attribute, cursor, count)
        }
    }

    #[test]
    fn unacceptable_files_are_not_descended() {
        let file = parse("a = 1\n");
        let mut count = 0;
        let visited = SkipEverything.visit(&file, &mut count);
        assert_eq!(count, 0);
        assert!(Arc::ptr_eq(&file, &visited));
    }

    #[test]
    fn rebuild_list_hands_leading_prefix_on() {
        let original = vec![
            Expression::Literal(Arc::new(Literal::new(
                Space::EMPTY,
                LiteralKind::Number,
                "1",
            ))),
            Expression::Literal(Arc::new(Literal::new(
                Space::single_space(),
                LiteralKind::Number,
                "2",
            ))),
        ];
        let rebuilt = rebuild_list(
            &original,
            vec![None, Some(original[1].clone())],
            HclVisitable::with_prefix_of,
        );
        assert_eq!(rebuilt.len(), 1);
        assert!(rebuilt[0].prefix().is_empty());
    }
}
