//! Grammar positions of Dockerfile whitespace

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    CommandPrefix,
    DocumentPrefix,
    ExecFormPrefix,
    FlagPrefix,
    FromPrefix,
    GenericPrefix,
    KeyValuePairPrefix,
    KeyValuesPrefix,
    LiteralPrefix,
    ShellFormPrefix,
    StageAliasPrefix,

    DocumentEof,
    ExecFormArguments,
    /// Before `,` or `]` after an exec argument
    ExecFormArgumentSuffix,
    /// Inside `[ ]` without arguments
    ExecFormClose,
}

impl Location {
    pub fn is_prefix(&self) -> bool {
        matches!(
            self,
            Location::CommandPrefix
                | Location::DocumentPrefix
                | Location::ExecFormPrefix
                | Location::FlagPrefix
                | Location::FromPrefix
                | Location::GenericPrefix
                | Location::KeyValuePairPrefix
                | Location::KeyValuesPrefix
                | Location::LiteralPrefix
                | Location::ShellFormPrefix
                | Location::StageAliasPrefix
        )
    }
}
