//! Dockerfile node model
//!
//! A [`Document`] is a list of [`Instruction`]s. Instructions with structure
//! worth editing get their own kind (`FROM`, the command instructions and the
//! key/value instructions); everything else is a [`GenericInstruction`] over
//! words or an exec form. Keywords keep the case they were written in.

use lst_core::{Container, HasMarkers, Markers, Same, Space, Tree, TreeId};
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

/// Root of a Dockerfile
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) source_path: PathBuf,
    pub(crate) charset_bom: bool,
    pub(crate) escape: char,
    pub(crate) instructions: Vec<Instruction>,
    pub(crate) eof: Space,
}

impl Document {
    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn charset_bom(&self) -> bool {
        self.charset_bom
    }

    /// Escape character in effect, `\` unless a directive changed it
    pub fn escape(&self) -> char {
        self.escape
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn with_instructions(&self, instructions: Vec<Instruction>) -> Self {
        Self {
            instructions,
            ..self.clone()
        }
    }

    pub fn eof(&self) -> &Space {
        &self.eof
    }

    /// `FROM` instructions in order, one per build stage
    pub fn stages(&self) -> impl Iterator<Item = &Arc<FromInstruction>> {
        self.instructions.iter().filter_map(Instruction::as_from)
    }
}

/// Instruction keywords known to the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Add,
    Arg,
    Cmd,
    Copy,
    Entrypoint,
    Env,
    Expose,
    From,
    Healthcheck,
    Label,
    Maintainer,
    OnBuild,
    Run,
    Shell,
    StopSignal,
    User,
    Volume,
    Workdir,
    Unknown,
}

impl InstructionKind {
    pub fn of(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "ADD" => Self::Add,
            "ARG" => Self::Arg,
            "CMD" => Self::Cmd,
            "COPY" => Self::Copy,
            "ENTRYPOINT" => Self::Entrypoint,
            "ENV" => Self::Env,
            "EXPOSE" => Self::Expose,
            "FROM" => Self::From,
            "HEALTHCHECK" => Self::Healthcheck,
            "LABEL" => Self::Label,
            "MAINTAINER" => Self::Maintainer,
            "ONBUILD" => Self::OnBuild,
            "RUN" => Self::Run,
            "SHELL" => Self::Shell,
            "STOPSIGNAL" => Self::StopSignal,
            "USER" => Self::User,
            "VOLUME" => Self::Volume,
            "WORKDIR" => Self::Workdir,
            _ => Self::Unknown,
        }
    }

    pub fn command_kind(self) -> Option<CommandKind> {
        match self {
            Self::Run => Some(CommandKind::Run),
            Self::Cmd => Some(CommandKind::Cmd),
            Self::Entrypoint => Some(CommandKind::Entrypoint),
            Self::Shell => Some(CommandKind::Shell),
            _ => None,
        }
    }

    pub fn key_value_kind(self) -> Option<KeyValueKind> {
        match self {
            Self::Env => Some(KeyValueKind::Env),
            Self::Label => Some(KeyValueKind::Label),
            Self::Arg => Some(KeyValueKind::Arg),
            _ => None,
        }
    }
}

/// One instruction of a Dockerfile
#[derive(Debug, Clone)]
pub enum Instruction {
    From(Arc<FromInstruction>),
    Command(Arc<CommandInstruction>),
    KeyValues(Arc<KeyValueInstruction>),
    Generic(Arc<GenericInstruction>),
}

impl Instruction {
    pub fn id(&self) -> TreeId {
        match self {
            Instruction::From(i) => i.id,
            Instruction::Command(i) => i.id,
            Instruction::KeyValues(i) => i.id,
            Instruction::Generic(i) => i.id,
        }
    }

    pub fn prefix(&self) -> &Space {
        match self {
            Instruction::From(i) => &i.prefix,
            Instruction::Command(i) => &i.prefix,
            Instruction::KeyValues(i) => &i.prefix,
            Instruction::Generic(i) => &i.prefix,
        }
    }

    pub fn with_prefix(&self, prefix: Space) -> Self {
        match self {
            Instruction::From(i) => Instruction::From(Arc::new(i.with_prefix(prefix))),
            Instruction::Command(i) => Instruction::Command(Arc::new(i.with_prefix(prefix))),
            Instruction::KeyValues(i) => Instruction::KeyValues(Arc::new(i.with_prefix(prefix))),
            Instruction::Generic(i) => Instruction::Generic(Arc::new(i.with_prefix(prefix))),
        }
    }

    pub fn markers(&self) -> &Markers {
        match self {
            Instruction::From(i) => &i.markers,
            Instruction::Command(i) => &i.markers,
            Instruction::KeyValues(i) => &i.markers,
            Instruction::Generic(i) => &i.markers,
        }
    }

    pub fn with_markers(&self, markers: Markers) -> Self {
        match self {
            Instruction::From(i) => Instruction::From(i.with_markers(markers)),
            Instruction::Command(i) => Instruction::Command(i.with_markers(markers)),
            Instruction::KeyValues(i) => Instruction::KeyValues(i.with_markers(markers)),
            Instruction::Generic(i) => Instruction::Generic(i.with_markers(markers)),
        }
    }

    /// Keyword as written
    pub fn keyword(&self) -> &str {
        match self {
            Instruction::From(i) => &i.keyword,
            Instruction::Command(i) => &i.keyword,
            Instruction::KeyValues(i) => &i.keyword,
            Instruction::Generic(i) => &i.keyword,
        }
    }

    pub fn kind(&self) -> InstructionKind {
        InstructionKind::of(self.keyword())
    }

    pub fn as_from(&self) -> Option<&Arc<FromInstruction>> {
        match self {
            Instruction::From(from) => Some(from),
            _ => None,
        }
    }

    pub fn as_command(&self) -> Option<&Arc<CommandInstruction>> {
        match self {
            Instruction::Command(command) => Some(command),
            _ => None,
        }
    }

    pub fn as_key_values(&self) -> Option<&Arc<KeyValueInstruction>> {
        match self {
            Instruction::KeyValues(instruction) => Some(instruction),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Instruction::From(_) => "From",
            Instruction::Command(_) => "Command",
            Instruction::KeyValues(_) => "KeyValues",
            Instruction::Generic(_) => "Generic",
        }
    }
}

impl Same for Instruction {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Instruction::From(a), Instruction::From(b)) => Arc::ptr_eq(a, b),
            (Instruction::Command(a), Instruction::Command(b)) => Arc::ptr_eq(a, b),
            (Instruction::KeyValues(a), Instruction::KeyValues(b)) => Arc::ptr_eq(a, b),
            (Instruction::Generic(a), Instruction::Generic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Raw argument text, quotes included
#[derive(Debug, Clone)]
pub struct Literal {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) text: String,
}

impl Literal {
    pub fn new(prefix: Space, text: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Text with surrounding quotes removed
    ///
    /// Double-quoted text is decoded as a JSON string when it is one.
    pub fn value(&self) -> String {
        let text = self.text.as_str();
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            return serde_json::from_str::<String>(text)
                .unwrap_or_else(|_| text[1..text.len() - 1].to_string());
        }
        if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
            return text[1..text.len() - 1].to_string();
        }
        text.to_string()
    }
}

/// `--name` or `--name=value`
#[derive(Debug, Clone)]
pub struct Flag {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) name: String,
    pub(crate) value: Option<Arc<Literal>>,
}

impl Flag {
    pub fn new(prefix: Space, name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            name: name.into(),
            value: value.map(|value| Arc::new(Literal::new(Space::EMPTY, value))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Arc<Literal>> {
        self.value.as_ref()
    }
}

/// `AS name` after a `FROM` image
#[derive(Debug, Clone)]
pub struct StageAlias {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) keyword: String,
    pub(crate) name: Arc<Literal>,
}

impl StageAlias {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn name(&self) -> &Arc<Literal> {
        &self.name
    }
}

/// `FROM [--flags] image [AS name]`
#[derive(Debug, Clone)]
pub struct FromInstruction {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) keyword: String,
    pub(crate) flags: Vec<Arc<Flag>>,
    pub(crate) image: Arc<Literal>,
    pub(crate) alias: Option<Arc<StageAlias>>,
}

impl FromInstruction {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn flags(&self) -> &[Arc<Flag>] {
        &self.flags
    }

    pub fn image(&self) -> &Arc<Literal> {
        &self.image
    }

    pub fn alias(&self) -> Option<&Arc<StageAlias>> {
        self.alias.as_ref()
    }

    pub fn stage_name(&self) -> Option<&str> {
        self.alias.as_ref().map(|alias| alias.name.text())
    }

    /// Image reference split into name, tag and digest
    fn reference(&self) -> (&str, Option<&str>, Option<&str>) {
        let text = self.image.text();
        let (name_tag, digest) = match text.split_once('@') {
            Some((name_tag, digest)) => (name_tag, Some(digest)),
            None => (text, None),
        };
        let path_end = name_tag.rfind('/').map(|slash| slash + 1).unwrap_or(0);
        match name_tag[path_end..].rfind(':') {
            Some(colon) => {
                let colon = path_end + colon;
                (&name_tag[..colon], Some(&name_tag[colon + 1..]), digest)
            }
            None => (name_tag, None, digest),
        }
    }

    /// Repository part, e.g. `registry:5000/team/app`
    pub fn image_name(&self) -> &str {
        self.reference().0
    }

    pub fn tag(&self) -> Option<&str> {
        self.reference().1
    }

    pub fn digest(&self) -> Option<&str> {
        self.reference().2
    }

    /// Copy with the image tag set, keeping name and digest
    pub fn with_tag(&self, tag: &str) -> Self {
        let (name, _, digest) = self.reference();
        let text = match digest {
            Some(digest) => format!("{name}:{tag}@{digest}"),
            None => format!("{name}:{tag}"),
        };
        Self {
            image: Arc::new(self.image.with_text(text)),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Run,
    Cmd,
    Entrypoint,
    Shell,
}

/// Command text handed to the shell as is
#[derive(Debug, Clone)]
pub struct ShellForm {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) text: String,
}

impl ShellForm {
    pub fn new(prefix: Space, text: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// JSON array form `["executable", "arg"]`
///
/// Each argument's `after` is the space before the following `,` or `]`.
/// `close` holds the space inside `[ ]` when there are no arguments.
#[derive(Debug, Clone)]
pub struct ExecForm {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) arguments: Container<Arc<Literal>>,
    pub(crate) close: Space,
}

impl ExecForm {
    pub fn arguments(&self) -> impl ExactSizeIterator<Item = &Arc<Literal>> {
        self.arguments.elements()
    }

    /// Decoded argument strings
    pub fn values(&self) -> Vec<String> {
        self.arguments().map(|argument| argument.value()).collect()
    }

    pub fn padding(&self) -> &Container<Arc<Literal>> {
        &self.arguments
    }

    pub fn close(&self) -> &Space {
        &self.close
    }
}

#[derive(Debug, Clone)]
pub enum CommandForm {
    Shell(Arc<ShellForm>),
    Exec(Arc<ExecForm>),
}

impl Same for CommandForm {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (CommandForm::Shell(a), CommandForm::Shell(b)) => Arc::ptr_eq(a, b),
            (CommandForm::Exec(a), CommandForm::Exec(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// `RUN`, `CMD`, `ENTRYPOINT` or `SHELL`
#[derive(Debug, Clone)]
pub struct CommandInstruction {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) kind: CommandKind,
    pub(crate) keyword: String,
    pub(crate) flags: Vec<Arc<Flag>>,
    pub(crate) form: CommandForm,
}

impl CommandInstruction {
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn flags(&self) -> &[Arc<Flag>] {
        &self.flags
    }

    pub fn form(&self) -> &CommandForm {
        &self.form
    }

    pub fn with_form(&self, form: CommandForm) -> Self {
        Self {
            form,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyValueKind {
    Env,
    Label,
    Arg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// `key=value`
    Equals,
    /// Legacy `ENV key value`; the whitespace is the value's prefix
    Whitespace,
}

/// One `key=value` of `ENV`, `LABEL` or `ARG`
#[derive(Debug, Clone)]
pub struct KeyValuePair {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) key: String,
    pub(crate) separator: Separator,
    pub(crate) value: Option<Arc<Literal>>,
}

impl KeyValuePair {
    pub fn new(prefix: Space, key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            key: key.into(),
            separator: Separator::Equals,
            value: value.map(|value| Arc::new(Literal::new(Space::EMPTY, value))),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn value(&self) -> Option<&Arc<Literal>> {
        self.value.as_ref()
    }

    pub fn with_value(&self, value: Option<Arc<Literal>>) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

/// `ENV`, `LABEL` or `ARG`
#[derive(Debug, Clone)]
pub struct KeyValueInstruction {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) kind: KeyValueKind,
    pub(crate) keyword: String,
    pub(crate) pairs: Vec<Arc<KeyValuePair>>,
}

impl KeyValueInstruction {
    pub fn kind(&self) -> KeyValueKind {
        self.kind
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn pairs(&self) -> &[Arc<KeyValuePair>] {
        &self.pairs
    }

    pub fn with_pairs(&self, pairs: Vec<Arc<KeyValuePair>>) -> Self {
        Self {
            pairs,
            ..self.clone()
        }
    }

    pub fn get(&self, key: &str) -> Option<&Arc<KeyValuePair>> {
        self.pairs.iter().find(|pair| pair.key == key)
    }
}

#[derive(Debug, Clone)]
pub enum Arguments {
    Words(Vec<Arc<Literal>>),
    Exec(Arc<ExecForm>),
}

impl Same for Arguments {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Arguments::Words(a), Arguments::Words(b)) => a.same(b),
            (Arguments::Exec(a), Arguments::Exec(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Any other instruction: `COPY`, `WORKDIR`, `EXPOSE`, unknown keywords, ...
#[derive(Debug, Clone)]
pub struct GenericInstruction {
    pub(crate) id: TreeId,
    pub(crate) prefix: Space,
    pub(crate) markers: Markers,
    pub(crate) kind: InstructionKind,
    pub(crate) keyword: String,
    pub(crate) flags: Vec<Arc<Flag>>,
    pub(crate) arguments: Arguments,
}

impl GenericInstruction {
    pub fn kind(&self) -> InstructionKind {
        self.kind
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn flags(&self) -> &[Arc<Flag>] {
        &self.flags
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn flag(&self, name: &str) -> Option<&Arc<Flag>> {
        self.flags.iter().find(|flag| flag.name == name)
    }
}

tree_node!(
    Document,
    Literal,
    Flag,
    StageAlias,
    FromInstruction,
    ShellForm,
    ExecForm,
    CommandInstruction,
    KeyValuePair,
    KeyValueInstruction,
    GenericInstruction,
);

/// Owned handle to any Dockerfile tree
#[derive(Debug, Clone)]
pub enum Docker {
    Document(Arc<Document>),
    Instruction(Instruction),
}

impl Docker {
    pub fn id(&self) -> TreeId {
        match self {
            Docker::Document(document) => document.id,
            Docker::Instruction(instruction) => instruction.id(),
        }
    }
}
