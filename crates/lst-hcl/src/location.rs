//! Grammar positions of HCL whitespace
//!
//! Every [`Space`](lst_core::Space) a visitor sees is tagged with one of
//! these, and padded wrappers push a cursor frame carrying the location of
//! the slot they fill.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    // Node prefixes
    AttributePrefix,
    AttributeAccessPrefix,
    BinaryPrefix,
    BlockPrefix,
    ConditionalPrefix,
    ConfigFilePrefix,
    EmptyPrefix,
    ForIntroPrefix,
    ForObjectPrefix,
    ForTuplePrefix,
    FunctionCallPrefix,
    HeredocTemplatePrefix,
    IdentifierPrefix,
    IndexPrefix,
    LiteralPrefix,
    ObjectValuePrefix,
    ParenthesesPrefix,
    QuotedTemplatePrefix,
    SplatPrefix,
    TemplateInterpolationPrefix,
    TuplePrefix,
    UnaryPrefix,
    VariableExpressionPrefix,

    /// Before `=` or `:` of an attribute
    AttributeAssignment,
    /// Before `,` after an object element
    AttributeComma,
    /// Before `.` of an attribute access
    AttributeAccessName,
    BinaryOperator,
    /// Before `{` of a block
    BlockOpen,
    /// Before `}` of a block
    BlockClose,
    /// Before `?`
    ConditionalTrue,
    /// Before `:` of a conditional
    ConditionalFalse,
    /// End of the file
    ConfigFileEof,
    /// Before `if` of a `for` expression
    ForCondition,
    ForIntroVariables,
    /// Before `,` or `in` after a loop variable
    ForIntroVariableSuffix,
    /// Before `:` of a `for` object
    ForObjectUpdateName,
    /// Before `=>`
    ForObjectUpdateValue,
    /// Before `...`
    ForObjectEllipsis,
    /// Before `}` closing a `for` object
    ForObjectSuffix,
    /// Before `:` of a `for` tuple
    ForTupleExpression,
    /// Before `]` closing a `for` tuple
    ForTupleSuffix,
    /// Before `(`
    FunctionCallArguments,
    /// Before `,` or `)` after an argument
    FunctionCallArgumentSuffix,
    /// Before the closing heredoc delimiter
    HeredocEnd,
    /// Before `[` of an index
    IndexOpen,
    /// Before `]` of an index
    IndexPosition,
    ObjectValueArguments,
    /// Before `}` after the last object element
    ObjectValueArgumentSuffix,
    /// Before `)`
    ParenthesesSuffix,
    /// Before `.` or `[` of a splat
    SplatOperator,
    /// Before `*` of a splat
    SplatStar,
    /// Before `]` of a full splat
    SplatClose,
    /// Before `}` of an interpolation
    TemplateInterpolationSuffix,
    TupleValues,
    /// Before `,` or `]` after a tuple value
    TupleValueSuffix,
}

impl Location {
    /// Whether this is the prefix of a node rather than a position inside one
    pub fn is_prefix(&self) -> bool {
        matches!(
            self,
            Location::AttributePrefix
                | Location::AttributeAccessPrefix
                | Location::BinaryPrefix
                | Location::BlockPrefix
                | Location::ConditionalPrefix
                | Location::ConfigFilePrefix
                | Location::EmptyPrefix
                | Location::ForIntroPrefix
                | Location::ForObjectPrefix
                | Location::ForTuplePrefix
                | Location::FunctionCallPrefix
                | Location::HeredocTemplatePrefix
                | Location::IdentifierPrefix
                | Location::IndexPrefix
                | Location::LiteralPrefix
                | Location::ObjectValuePrefix
                | Location::ParenthesesPrefix
                | Location::QuotedTemplatePrefix
                | Location::SplatPrefix
                | Location::TemplateInterpolationPrefix
                | Location::TuplePrefix
                | Location::UnaryPrefix
                | Location::VariableExpressionPrefix
        )
    }
}
