//! HCL node model
//!
//! Every node kind is an immutable struct carrying an identity, a prefix
//! [`Space`] and [`Markers`]. Children that own positional whitespace are
//! wrapped in [`LeftPadded`], [`RightPadded`] or [`Container`]; the primary
//! accessors return the unwrapped values and `padding()` returns a borrowed
//! view of the wrappers for printers and formatters.
//!
//! Kinds are closed: [`Expression`] and [`BodyContent`] are the sum types a
//! visitor dispatches over.

use lst_core::{
    Container, HasMarkers, LeftPadded, Marker, Markers, RightPadded, Same, Space, Tree, TreeId,
};
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

macro_rules! tree_node {
    ($($kind:ident),* $(,)?) => {
        $(
            impl HasMarkers for $kind {
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

            impl Tree for $kind {
                fn id(&self) -> TreeId {
                    self.id
                }

                fn prefix(&self) -> &Space {
                    &self.prefix
                }

                fn with_prefix(&self, prefix: Space) -> Self {
                    Self {
                        prefix,
                        ..self.clone()
                    }
                }
            }
        )*
    };
}

macro_rules! accessors {
    ($kind:ident { $($field:ident / $with:ident : $ty:ty),* $(,)? }) => {
        impl $kind {
            $(
                pub fn $field(&self) -> &$ty {
                    &self.$field
                }

                pub fn $with(&self, $field: $ty) -> Self {
                    Self {
                        $field,
                        ..self.clone()
                    }
                }
            )*
        }
    };
}

macro_rules! padding_view {
    ($view:ident for $kind:ident { $($field:ident: $ty:ty),* $(,)? }) => {
        #[doc = concat!("Padded fields of [`", stringify!($kind), "`]")]
        #[derive(Debug, Clone, Copy)]
        pub struct $view<'a> {
            $(pub $field: &'a $ty,)*
        }

        impl $kind {
            pub fn padding(&self) -> $view<'_> {
                $view {
                    $($field: &self.$field,)*
                }
            }
        }
    };
}

macro_rules! same_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Same for $ty {
                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

/// Root of an HCL file
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) source_path: PathBuf,
    pub(crate) charset_bom: bool,
    pub(crate) body: Vec<BodyContent>,
    pub(crate) eof: Space,
}

impl ConfigFile {
    pub fn new(source_path: impl Into<PathBuf>, body: Vec<BodyContent>, eof: Space) -> Self {
        Self {
            id: TreeId::random(),
            prefix: Space::EMPTY,
            markers: Markers::empty(),
            source_path: source_path.into(),
            charset_bom: false,
            body,
            eof,
        }
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The file started with a UTF-8 byte order mark
    pub fn charset_bom(&self) -> bool {
        self.charset_bom
    }

    /// Attributes directly in the file body
    pub fn attributes(&self) -> impl Iterator<Item = &Arc<Attribute>> {
        self.body.iter().filter_map(BodyContent::as_attribute)
    }

    /// Blocks directly in the file body
    pub fn blocks(&self) -> impl Iterator<Item = &Arc<Block>> {
        self.body.iter().filter_map(BodyContent::as_block)
    }
}

accessors!(ConfigFile {
    body / with_body: Vec<BodyContent>,
    eof / with_eof: Space,
});

/// Item of a file or block body
#[derive(Debug, Clone)]
pub enum BodyContent {
    Attribute(Arc<Attribute>),
    Block(Arc<Block>),
}

impl BodyContent {
    pub fn id(&self) -> TreeId {
        match self {
            BodyContent::Attribute(a) => a.id,
            BodyContent::Block(b) => b.id,
        }
    }

    pub fn prefix(&self) -> &Space {
        match self {
            BodyContent::Attribute(a) => &a.prefix,
            BodyContent::Block(b) => &b.prefix,
        }
    }

    pub fn with_prefix(&self, prefix: Space) -> Self {
        match self {
            BodyContent::Attribute(a) => BodyContent::Attribute(Arc::new(a.with_prefix(prefix))),
            BodyContent::Block(b) => BodyContent::Block(Arc::new(b.with_prefix(prefix))),
        }
    }

    pub fn markers(&self) -> &Markers {
        match self {
            BodyContent::Attribute(a) => &a.markers,
            BodyContent::Block(b) => &b.markers,
        }
    }

    pub fn as_attribute(&self) -> Option<&Arc<Attribute>> {
        match self {
            BodyContent::Attribute(a) => Some(a),
            BodyContent::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Arc<Block>> {
        match self {
            BodyContent::Attribute(_) => None,
            BodyContent::Block(b) => Some(b),
        }
    }
}

impl Same for BodyContent {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (BodyContent::Attribute(a), BodyContent::Attribute(b)) => Arc::ptr_eq(a, b),
            (BodyContent::Block(a), BodyContent::Block(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// `type "label" { ... }`
#[derive(Debug, Clone)]
pub struct Block {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) type_name: Arc<Identifier>,
    pub(crate) labels: Vec<Expression>,
    /// Space before `{`
    pub(crate) open: Space,
    pub(crate) body: Vec<BodyContent>,
    /// Space before `}`
    pub(crate) end: Space,
}

impl Block {
    pub fn new(
        prefix: Space,
        type_name: Arc<Identifier>,
        labels: Vec<Expression>,
        open: Space,
        body: Vec<BodyContent>,
        end: Space,
    ) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            type_name,
            labels,
            open,
            body,
            end,
        }
    }

    /// Label values with quotes removed
    pub fn label_values(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|label| match label {
                Expression::Identifier(ident) => ident.name.clone(),
                Expression::QuotedTemplate(template) => template.text(),
                other => other.kind_name().to_string(),
            })
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&Arc<Attribute>> {
        self.body
            .iter()
            .filter_map(BodyContent::as_attribute)
            .find(|a| a.simple_name() == Some(name))
    }
}

accessors!(Block {
    type_name / with_type_name: Arc<Identifier>,
    labels / with_labels: Vec<Expression>,
    open / with_open: Space,
    body / with_body: Vec<BodyContent>,
    end / with_end: Space,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// `name = value`
    Assignment,
    /// `name: value` inside an object
    ObjectElement,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Assignment => "=",
            AttributeType::ObjectElement => ":",
        }
    }
}

/// `name = value`, in a body or as an object element
#[derive(Debug, Clone)]
pub struct Attribute {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) name: Expression,
    pub(crate) type_: LeftPadded<AttributeType>,
    pub(crate) value: Expression,
    /// Space before a separating `,` in an object
    pub(crate) comma: Option<Space>,
}

impl Attribute {
    pub fn new(
        prefix: Space,
        name: Expression,
        type_: LeftPadded<AttributeType>,
        value: Expression,
    ) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            name,
            type_,
            value,
            comma: None,
        }
    }

    /// The name when it is a plain identifier
    pub fn simple_name(&self) -> Option<&str> {
        match &self.name {
            Expression::Identifier(ident) => Some(&ident.name),
            Expression::VariableExpression(var) => Some(&var.name.name),
            _ => None,
        }
    }

    pub fn type_(&self) -> AttributeType {
        *self.type_.element()
    }

    pub fn with_type_padded(&self, type_: LeftPadded<AttributeType>) -> Self {
        Self {
            type_,
            ..self.clone()
        }
    }

    pub fn comma(&self) -> Option<&Space> {
        self.comma.as_ref()
    }
}

accessors!(Attribute {
    name / with_name: Expression,
    value / with_value: Expression,
});

padding_view!(AttributePadding for Attribute { type_: LeftPadded<AttributeType> });

/// `object.name`
#[derive(Debug, Clone)]
pub struct AttributeAccess {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) object: Expression,
    pub(crate) name: LeftPadded<Arc<Identifier>>,
}

impl AttributeAccess {
    pub fn name(&self) -> &Arc<Identifier> {
        self.name.element()
    }

    pub fn with_name(&self, name: Arc<Identifier>) -> Self {
        Self {
            name: self.name.with_element(name),
            ..self.clone()
        }
    }
}

accessors!(AttributeAccess {
    object / with_object: Expression,
});

padding_view!(AttributeAccessPadding for AttributeAccess { name: LeftPadded<Arc<Identifier>> });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }

    /// Binding strength, higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Equal | BinaryOperator::NotEqual => 3,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => 4,
            BinaryOperator::Addition | BinaryOperator::Subtraction => 5,
            BinaryOperator::Multiplication | BinaryOperator::Division | BinaryOperator::Modulo => {
                6
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Binary {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) left: Expression,
    pub(crate) operator: LeftPadded<BinaryOperator>,
    pub(crate) right: Expression,
}

impl Binary {
    pub fn operator(&self) -> BinaryOperator {
        *self.operator.element()
    }

    pub fn with_operator(&self, operator: BinaryOperator) -> Self {
        Self {
            operator: self.operator.with_element(operator),
            ..self.clone()
        }
    }
}

accessors!(Binary {
    left / with_left: Expression,
    right / with_right: Expression,
});

padding_view!(BinaryPadding for Binary { operator: LeftPadded<BinaryOperator> });

/// `condition ? true_part : false_part`
#[derive(Debug, Clone)]
pub struct Conditional {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) condition: Expression,
    pub(crate) true_part: LeftPadded<Expression>,
    pub(crate) false_part: LeftPadded<Expression>,
}

impl Conditional {
    pub fn true_part(&self) -> &Expression {
        self.true_part.element()
    }

    pub fn false_part(&self) -> &Expression {
        self.false_part.element()
    }

    pub fn with_true_part(&self, expression: Expression) -> Self {
        Self {
            true_part: self.true_part.with_element(expression),
            ..self.clone()
        }
    }

    pub fn with_false_part(&self, expression: Expression) -> Self {
        Self {
            false_part: self.false_part.with_element(expression),
            ..self.clone()
        }
    }
}

accessors!(Conditional {
    condition / with_condition: Expression,
});

padding_view!(ConditionalPadding for Conditional {
    true_part: LeftPadded<Expression>,
    false_part: LeftPadded<Expression>,
});

/// Placeholder for the inside of `()`, `[]` or `{}` with no elements
#[derive(Debug, Clone)]
pub struct Empty {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
}

impl Empty {
    pub fn new(prefix: Space) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
        }
    }
}

/// `for k, v in collection`
#[derive(Debug, Clone)]
pub struct ForIntro {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    /// Loop variables; the last one's trailing space precedes `in`
    pub(crate) variables: Container<Arc<Identifier>>,
    pub(crate) input: Expression,
}

impl ForIntro {
    pub fn variables(&self) -> impl ExactSizeIterator<Item = &Arc<Identifier>> {
        self.variables.elements()
    }
}

accessors!(ForIntro {
    input / with_input: Expression,
});

padding_view!(ForIntroPadding for ForIntro { variables: Container<Arc<Identifier>> });

/// `{ for k, v in x : key => value... if cond }`
#[derive(Debug, Clone)]
pub struct ForObject {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) intro: Arc<ForIntro>,
    pub(crate) update_name: LeftPadded<Expression>,
    pub(crate) update_value: LeftPadded<Expression>,
    /// Space before the grouping `...`
    pub(crate) ellipsis: Option<Space>,
    pub(crate) condition: Option<LeftPadded<Expression>>,
    pub(crate) end: Space,
}

impl ForObject {
    pub fn update_name(&self) -> &Expression {
        self.update_name.element()
    }

    pub fn update_value(&self) -> &Expression {
        self.update_value.element()
    }

    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref().map(LeftPadded::element)
    }

    pub fn is_grouped(&self) -> bool {
        self.ellipsis.is_some()
    }
}

accessors!(ForObject {
    intro / with_intro: Arc<ForIntro>,
    end / with_end: Space,
});

padding_view!(ForObjectPadding for ForObject {
    update_name: LeftPadded<Expression>,
    update_value: LeftPadded<Expression>,
    condition: Option<LeftPadded<Expression>>,
});

/// `[ for v in x : value if cond ]`
#[derive(Debug, Clone)]
pub struct ForTuple {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) intro: Arc<ForIntro>,
    pub(crate) update: LeftPadded<Expression>,
    pub(crate) condition: Option<LeftPadded<Expression>>,
    pub(crate) end: Space,
}

impl ForTuple {
    pub fn update(&self) -> &Expression {
        self.update.element()
    }

    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref().map(LeftPadded::element)
    }
}

accessors!(ForTuple {
    intro / with_intro: Arc<ForIntro>,
    end / with_end: Space,
});

padding_view!(ForTuplePadding for ForTuple {
    update: LeftPadded<Expression>,
    condition: Option<LeftPadded<Expression>>,
});

/// `name(arg, ...)`
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) name: Arc<Identifier>,
    pub(crate) arguments: Container<Expression>,
}

impl FunctionCall {
    /// Arguments, without the placeholder of an empty list
    pub fn arguments(&self) -> Vec<&Expression> {
        self.arguments
            .elements()
            .filter(|e| !matches!(e, Expression::Empty(_)))
            .collect()
    }

    pub fn with_arguments(&self, arguments: Vec<Expression>) -> Self {
        Self {
            arguments: self.arguments.with_elements(arguments),
            ..self.clone()
        }
    }
}

accessors!(FunctionCall {
    name / with_name: Arc<Identifier>,
});

padding_view!(FunctionCallPadding for FunctionCall { arguments: Container<Expression> });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeredocArrow {
    /// `<<`
    Plain,
    /// `<<-`
    Indented,
}

impl HeredocArrow {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeredocArrow::Plain => "<<",
            HeredocArrow::Indented => "<<-",
        }
    }
}

/// `<<EOT ... EOT`
#[derive(Debug, Clone)]
pub struct HeredocTemplate {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) arrow: HeredocArrow,
    pub(crate) delimiter: Arc<Identifier>,
    pub(crate) expressions: Vec<Expression>,
    /// Space before the closing delimiter
    pub(crate) end: Space,
}

impl HeredocTemplate {
    pub fn arrow(&self) -> HeredocArrow {
        self.arrow
    }
}

accessors!(HeredocTemplate {
    delimiter / with_delimiter: Arc<Identifier>,
    expressions / with_expressions: Vec<Expression>,
    end / with_end: Space,
});

#[derive(Debug, Clone)]
pub struct Identifier {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) name: String,
}

impl Identifier {
    pub fn new(prefix: Space, name: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            name: name.into(),
        }
    }

    pub fn build(name: impl Into<String>) -> Self {
        Self::new(Space::EMPTY, name)
    }
}

accessors!(Identifier {
    name / with_name: String,
});

/// `object[position]`
#[derive(Debug, Clone)]
pub struct Index {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) object: Expression,
    /// Space before `[`
    pub(crate) open: Space,
    pub(crate) position: RightPadded<Expression>,
}

impl Index {
    pub fn position(&self) -> &Expression {
        self.position.element()
    }

    pub fn with_position(&self, position: Expression) -> Self {
        Self {
            position: self.position.with_element(position),
            ..self.clone()
        }
    }
}

accessors!(Index {
    object / with_object: Expression,
    open / with_open: Space,
});

padding_view!(IndexPadding for Index { position: RightPadded<Expression> });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Number,
    Bool,
    Null,
    /// Literal text of a quoted template or heredoc, escapes kept as written
    TemplateText,
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) kind: LiteralKind,
    pub(crate) value_source: String,
}

impl Literal {
    pub fn new(prefix: Space, kind: LiteralKind, value_source: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            kind,
            value_source: value_source.into(),
        }
    }

    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    pub fn as_bool(&self) -> Option<bool> {
        match (self.kind, self.value_source.as_str()) {
            (LiteralKind::Bool, "true") => Some(true),
            (LiteralKind::Bool, "false") => Some(false),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            LiteralKind::Number => self.value_source.parse().ok(),
            _ => None,
        }
    }
}

accessors!(Literal {
    value_source / with_value_source: String,
});

/// `{ key = value, ... }`
///
/// Elements are [`Attribute`]s with [`AttributeType::ObjectElement`] or
/// [`AttributeType::Assignment`] separators; commas are recorded on the
/// attributes. The last element's trailing space precedes `}`.
#[derive(Debug, Clone)]
pub struct ObjectValue {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) arguments: Container<Expression>,
}

impl ObjectValue {
    pub fn elements(&self) -> Vec<&Arc<Attribute>> {
        self.arguments
            .elements()
            .filter_map(|e| match e {
                Expression::Attribute(a) => Some(a),
                _ => None,
            })
            .collect()
    }
}

padding_view!(ObjectValuePadding for ObjectValue { arguments: Container<Expression> });

#[derive(Debug, Clone)]
pub struct Parentheses {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) expression: RightPadded<Expression>,
}

impl Parentheses {
    pub fn expression(&self) -> &Expression {
        self.expression.element()
    }

    pub fn with_expression(&self, expression: Expression) -> Self {
        Self {
            expression: self.expression.with_element(expression),
            ..self.clone()
        }
    }
}

padding_view!(ParenthesesPadding for Parentheses { expression: RightPadded<Expression> });

/// `"text ${interpolation} text"`
#[derive(Debug, Clone)]
pub struct QuotedTemplate {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    /// Template text literals and interpolations in order
    pub(crate) expressions: Vec<Expression>,
}

impl QuotedTemplate {
    pub fn new(prefix: Space, expressions: Vec<Expression>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            expressions,
        }
    }

    /// Literal text of a template without interpolations
    pub fn text(&self) -> String {
        self.expressions
            .iter()
            .filter_map(|e| match e {
                Expression::Literal(l) => Some(l.value_source.as_str()),
                _ => None,
            })
            .collect()
    }
}

accessors!(QuotedTemplate {
    expressions / with_expressions: Vec<Expression>,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplatKind {
    /// `.*`
    Attribute,
    /// `[*]`
    Full,
}

/// Operator of a [`Splat`]; the padding's space precedes `.` or `[`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplatOperator {
    pub kind: SplatKind,
    /// Space before `*`
    pub star: Space,
    /// Space before `]` of a full splat
    pub close: Space,
}

#[derive(Debug, Clone)]
pub struct Splat {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) object: Expression,
    pub(crate) operator: LeftPadded<SplatOperator>,
}

impl Splat {
    pub fn kind(&self) -> SplatKind {
        self.operator.element().kind
    }
}

accessors!(Splat {
    object / with_object: Expression,
});

padding_view!(SplatPadding for Splat { operator: LeftPadded<SplatOperator> });

/// `${ expression }` inside a template
#[derive(Debug, Clone)]
pub struct TemplateInterpolation {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) expression: RightPadded<Expression>,
}

impl TemplateInterpolation {
    pub fn expression(&self) -> &Expression {
        self.expression.element()
    }
}

padding_view!(TemplateInterpolationPadding for TemplateInterpolation {
    expression: RightPadded<Expression>,
});

/// `[a, b, c]`
#[derive(Debug, Clone)]
pub struct Tuple {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) values: Container<Expression>,
}

impl Tuple {
    /// Values, without the placeholder of an empty tuple
    pub fn values(&self) -> Vec<&Expression> {
        self.values
            .elements()
            .filter(|e| !matches!(e, Expression::Empty(_)))
            .collect()
    }

    pub fn with_values(&self, values: Vec<Expression>) -> Self {
        Self {
            values: self.values.with_elements(values),
            ..self.clone()
        }
    }
}

padding_view!(TuplePadding for Tuple { values: Container<Expression> });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negative,
    Not,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Negative => "-",
            UnaryOperator::Not => "!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Unary {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) operator: UnaryOperator,
    pub(crate) expression: Expression,
}

impl Unary {
    pub fn operator(&self) -> UnaryOperator {
        self.operator
    }
}

accessors!(Unary {
    expression / with_expression: Expression,
});

/// Reference to a variable, e.g. `var` in `var.region`
#[derive(Debug, Clone)]
pub struct VariableExpression {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) name: Arc<Identifier>,
}

impl VariableExpression {
    pub fn new(prefix: Space, name: Arc<Identifier>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            name,
        }
    }
}

accessors!(VariableExpression {
    name / with_name: Arc<Identifier>,
});

tree_node!(
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

same_by_value!(AttributeType, BinaryOperator, SplatOperator);

/// Any HCL expression
#[derive(Debug, Clone)]
pub enum Expression {
    Attribute(Arc<Attribute>),
    AttributeAccess(Arc<AttributeAccess>),
    Binary(Arc<Binary>),
    Conditional(Arc<Conditional>),
    Empty(Arc<Empty>),
    ForObject(Arc<ForObject>),
    ForTuple(Arc<ForTuple>),
    FunctionCall(Arc<FunctionCall>),
    HeredocTemplate(Arc<HeredocTemplate>),
    Identifier(Arc<Identifier>),
    Index(Arc<Index>),
    Literal(Arc<Literal>),
    ObjectValue(Arc<ObjectValue>),
    Parentheses(Arc<Parentheses>),
    QuotedTemplate(Arc<QuotedTemplate>),
    Splat(Arc<Splat>),
    TemplateInterpolation(Arc<TemplateInterpolation>),
    Tuple(Arc<Tuple>),
    Unary(Arc<Unary>),
    VariableExpression(Arc<VariableExpression>),
}

macro_rules! for_each_expression {
    ($value:expr, $node:ident => $body:expr) => {
        match $value {
            Expression::Attribute($node) => $body,
            Expression::AttributeAccess($node) => $body,
            Expression::Binary($node) => $body,
            Expression::Conditional($node) => $body,
            Expression::Empty($node) => $body,
            Expression::ForObject($node) => $body,
            Expression::ForTuple($node) => $body,
            Expression::FunctionCall($node) => $body,
            Expression::HeredocTemplate($node) => $body,
            Expression::Identifier($node) => $body,
            Expression::Index($node) => $body,
            Expression::Literal($node) => $body,
            Expression::ObjectValue($node) => $body,
            Expression::Parentheses($node) => $body,
            Expression::QuotedTemplate($node) => $body,
            Expression::Splat($node) => $body,
            Expression::TemplateInterpolation($node) => $body,
            Expression::Tuple($node) => $body,
            Expression::Unary($node) => $body,
            Expression::VariableExpression($node) => $body,
        }
    };
}

macro_rules! map_expression {
    ($value:expr, $node:ident => $body:expr) => {
        match $value {
            Expression::Attribute($node) => Expression::Attribute(Arc::new($body)),
            Expression::AttributeAccess($node) => Expression::AttributeAccess(Arc::new($body)),
            Expression::Binary($node) => Expression::Binary(Arc::new($body)),
            Expression::Conditional($node) => Expression::Conditional(Arc::new($body)),
            Expression::Empty($node) => Expression::Empty(Arc::new($body)),
            Expression::ForObject($node) => Expression::ForObject(Arc::new($body)),
            Expression::ForTuple($node) => Expression::ForTuple(Arc::new($body)),
            Expression::FunctionCall($node) => Expression::FunctionCall(Arc::new($body)),
            Expression::HeredocTemplate($node) => Expression::HeredocTemplate(Arc::new($body)),
            Expression::Identifier($node) => Expression::Identifier(Arc::new($body)),
            Expression::Index($node) => Expression::Index(Arc::new($body)),
            Expression::Literal($node) => Expression::Literal(Arc::new($body)),
            Expression::ObjectValue($node) => Expression::ObjectValue(Arc::new($body)),
            Expression::Parentheses($node) => Expression::Parentheses(Arc::new($body)),
            Expression::QuotedTemplate($node) => Expression::QuotedTemplate(Arc::new($body)),
            Expression::Splat($node) => Expression::Splat(Arc::new($body)),
            Expression::TemplateInterpolation($node) => {
                Expression::TemplateInterpolation(Arc::new($body))
            }
            Expression::Tuple($node) => Expression::Tuple(Arc::new($body)),
            Expression::Unary($node) => Expression::Unary(Arc::new($body)),
            Expression::VariableExpression($node) => {
                Expression::VariableExpression(Arc::new($body))
            }
        }
    };
}

impl Expression {
    pub fn id(&self) -> TreeId {
        for_each_expression!(self, node => node.id)
    }

    pub fn prefix(&self) -> &Space {
        for_each_expression!(self, node => &node.prefix)
    }

    pub fn with_prefix(&self, prefix: Space) -> Self {
        if *self.prefix() == prefix {
            return self.clone();
        }
        map_expression!(self, node => node.with_prefix(prefix))
    }

    pub fn markers(&self) -> &Markers {
        for_each_expression!(self, node => &node.markers)
    }

    pub fn with_markers(&self, markers: Markers) -> Self {
        if markers.same(self.markers()) {
            return self.clone();
        }
        map_expression!(self, node => (**node).with_markers(markers))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Attribute(_) => "Attribute",
            Expression::AttributeAccess(_) => "AttributeAccess",
            Expression::Binary(_) => "Binary",
            Expression::Conditional(_) => "Conditional",
            Expression::Empty(_) => "Empty",
            Expression::ForObject(_) => "ForObject",
            Expression::ForTuple(_) => "ForTuple",
            Expression::FunctionCall(_) => "FunctionCall",
            Expression::HeredocTemplate(_) => "HeredocTemplate",
            Expression::Identifier(_) => "Identifier",
            Expression::Index(_) => "Index",
            Expression::Literal(_) => "Literal",
            Expression::ObjectValue(_) => "ObjectValue",
            Expression::Parentheses(_) => "Parentheses",
            Expression::QuotedTemplate(_) => "QuotedTemplate",
            Expression::Splat(_) => "Splat",
            Expression::TemplateInterpolation(_) => "TemplateInterpolation",
            Expression::Tuple(_) => "Tuple",
            Expression::Unary(_) => "Unary",
            Expression::VariableExpression(_) => "VariableExpression",
        }
    }
}

impl Same for Expression {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Expression::Attribute(a), Expression::Attribute(b)) => Arc::ptr_eq(a, b),
            (Expression::AttributeAccess(a), Expression::AttributeAccess(b)) => Arc::ptr_eq(a, b),
            (Expression::Binary(a), Expression::Binary(b)) => Arc::ptr_eq(a, b),
            (Expression::Conditional(a), Expression::Conditional(b)) => Arc::ptr_eq(a, b),
            (Expression::Empty(a), Expression::Empty(b)) => Arc::ptr_eq(a, b),
            (Expression::ForObject(a), Expression::ForObject(b)) => Arc::ptr_eq(a, b),
            (Expression::ForTuple(a), Expression::ForTuple(b)) => Arc::ptr_eq(a, b),
            (Expression::FunctionCall(a), Expression::FunctionCall(b)) => Arc::ptr_eq(a, b),
            (Expression::HeredocTemplate(a), Expression::HeredocTemplate(b)) => Arc::ptr_eq(a, b),
            (Expression::Identifier(a), Expression::Identifier(b)) => Arc::ptr_eq(a, b),
            (Expression::Index(a), Expression::Index(b)) => Arc::ptr_eq(a, b),
            (Expression::Literal(a), Expression::Literal(b)) => Arc::ptr_eq(a, b),
            (Expression::ObjectValue(a), Expression::ObjectValue(b)) => Arc::ptr_eq(a, b),
            (Expression::Parentheses(a), Expression::Parentheses(b)) => Arc::ptr_eq(a, b),
            (Expression::QuotedTemplate(a), Expression::QuotedTemplate(b)) => Arc::ptr_eq(a, b),
            (Expression::Splat(a), Expression::Splat(b)) => Arc::ptr_eq(a, b),
            (Expression::TemplateInterpolation(a), Expression::TemplateInterpolation(b)) => {
                Arc::ptr_eq(a, b)
            }
            (Expression::Tuple(a), Expression::Tuple(b)) => Arc::ptr_eq(a, b),
            (Expression::Unary(a), Expression::Unary(b)) => Arc::ptr_eq(a, b),
            (Expression::VariableExpression(a), Expression::VariableExpression(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

/// Owned handle to any HCL tree
#[derive(Debug, Clone)]
pub enum Hcl {
    ConfigFile(Arc<ConfigFile>),
    Block(Arc<Block>),
    ForIntro(Arc<ForIntro>),
    Expression(Expression),
}

impl Hcl {
    pub fn id(&self) -> TreeId {
        match self {
            Hcl::ConfigFile(file) => file.id,
            Hcl::Block(block) => block.id,
            Hcl::ForIntro(intro) => intro.id,
            Hcl::Expression(expression) => expression.id(),
        }
    }

    pub fn as_config_file(&self) -> Option<&Arc<ConfigFile>> {
        match self {
            Hcl::ConfigFile(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Arc<Block>> {
        match self {
            Hcl::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Hcl::Expression(expression) => Some(expression),
            _ => None,
        }
    }
}

impl From<BodyContent> for Hcl {
    fn from(content: BodyContent) -> Self {
        match content {
            BodyContent::Attribute(a) => Hcl::Expression(Expression::Attribute(a)),
            BodyContent::Block(b) => Hcl::Block(b),
        }
    }
}

/// A tuple or argument list ended with `,` before its closer
///
/// Attached to the last element; `suffix` is the space between the comma
/// and the closing delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingComma {
    id: TreeId,
    suffix: Space,
}

impl TrailingComma {
    pub fn new(suffix: Space) -> Self {
        Self {
            id: TreeId::random(),
            suffix,
        }
    }

    pub fn suffix(&self) -> &Space {
        &self.suffix
    }
}

impl Marker for TrailingComma {
    fn id(&self) -> TreeId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
