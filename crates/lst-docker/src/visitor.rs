//! Visitor engine for Dockerfile trees
//!
//! Same contract as every LST visitor: `walk_*` visits prefix, markers and
//! children in source order and hands back the original `Arc` when nothing
//! changed. Returning `None` deletes an instruction, a flag, a pair or a
//! word; deleting a required child panics.

use crate::location::Location;
use crate::tree::*;
use lst_core::padding::close_list;
use lst_core::{Container, Cursor, HasMarkers, Markers, Projection, RightPadded, Same, Space, Tree};
use std::sync::Arc;

/// Value of one cursor frame during a Dockerfile visit
#[derive(Debug, Clone, Copy)]
pub enum DockerElement<'a> {
    Root,
    Document(&'a Arc<Document>),
    FromInstruction(&'a Arc<FromInstruction>),
    CommandInstruction(&'a Arc<CommandInstruction>),
    KeyValueInstruction(&'a Arc<KeyValueInstruction>),
    GenericInstruction(&'a Arc<GenericInstruction>),
    Flag(&'a Arc<Flag>),
    Literal(&'a Arc<Literal>),
    StageAlias(&'a Arc<StageAlias>),
    ShellForm(&'a Arc<ShellForm>),
    ExecForm(&'a Arc<ExecForm>),
    KeyValuePair(&'a Arc<KeyValuePair>),
    Padding(Location),
}

pub type DockerCursor<'a> = Cursor<'a, DockerElement<'a>>;

macro_rules! project {
    ($($variant:ident),* $(,)?) => {
        $(
            impl<'a> Projection<&'a Arc<$variant>> for DockerElement<'a> {
                fn project(&self) -> Option<&'a Arc<$variant>> {
                    match *self {
                        DockerElement::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            }
        )*
    };
}

project!(
    Document,
    FromInstruction,
    CommandInstruction,
    KeyValueInstruction,
    GenericInstruction,
    Flag,
    Literal,
    StageAlias,
    ShellForm,
    ExecForm,
    KeyValuePair,
);

impl Projection<Location> for DockerElement<'_> {
    fn project(&self) -> Option<Location> {
        match *self {
            DockerElement::Padding(location) => Some(location),
            _ => None,
        }
    }
}

/// Per-kind visitor over Dockerfile trees
pub trait DockerVisitor<P>: Sized {
    fn is_acceptable(&self, _document: &Document, _p: &P) -> bool {
        true
    }

    fn visit(&mut self, document: &Arc<Document>, p: &mut P) -> Arc<Document> {
        if !self.is_acceptable(document, p) {
            return document.clone();
        }
        let root = DockerCursor::root(DockerElement::Root);
        self.visit_document(document, &root, p)
    }

    fn visit_document(
        &mut self,
        document: &Arc<Document>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Arc<Document> {
        walk_document(self, document, cursor, p)
    }

    /// Dispatch on the kind of an instruction; may return another kind
    fn visit_instruction(
        &mut self,
        instruction: &Instruction,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Instruction> {
        walk_instruction(self, instruction, cursor, p)
    }

    fn visit_from(
        &mut self,
        from: &Arc<FromInstruction>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<FromInstruction>> {
        walk_from(self, from, cursor, p)
    }

    fn visit_command(
        &mut self,
        command: &Arc<CommandInstruction>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<CommandInstruction>> {
        walk_command(self, command, cursor, p)
    }

    fn visit_key_values(
        &mut self,
        instruction: &Arc<KeyValueInstruction>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<KeyValueInstruction>> {
        walk_key_values(self, instruction, cursor, p)
    }

    fn visit_generic(
        &mut self,
        instruction: &Arc<GenericInstruction>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<GenericInstruction>> {
        walk_generic(self, instruction, cursor, p)
    }

    fn visit_flag(
        &mut self,
        flag: &Arc<Flag>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Flag>> {
        walk_flag(self, flag, cursor, p)
    }

    fn visit_literal(
        &mut self,
        literal: &Arc<Literal>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<Literal>> {
        walk_literal(self, literal, cursor, p)
    }

    fn visit_stage_alias(
        &mut self,
        alias: &Arc<StageAlias>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<StageAlias>> {
        walk_stage_alias(self, alias, cursor, p)
    }

    fn visit_shell_form(
        &mut self,
        shell: &Arc<ShellForm>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<ShellForm>> {
        walk_shell_form(self, shell, cursor, p)
    }

    fn visit_exec_form(
        &mut self,
        exec: &Arc<ExecForm>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<ExecForm>> {
        walk_exec_form(self, exec, cursor, p)
    }

    fn visit_key_value_pair(
        &mut self,
        pair: &Arc<KeyValuePair>,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<Arc<KeyValuePair>> {
        walk_key_value_pair(self, pair, cursor, p)
    }

    fn visit_space(
        &mut self,
        space: &Space,
        _location: Location,
        _cursor: &DockerCursor<'_>,
        _p: &mut P,
    ) -> Space {
        space.clone()
    }

    fn visit_markers(
        &mut self,
        markers: &Markers,
        _cursor: &DockerCursor<'_>,
        _p: &mut P,
    ) -> Markers {
        markers.clone()
    }

    fn visit_right_padded(
        &mut self,
        padded: &RightPadded<Arc<Literal>>,
        location: Location,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Option<RightPadded<Arc<Literal>>> {
        walk_right_padded(self, padded, location, cursor, p)
    }

    fn visit_container(
        &mut self,
        container: &Container<Arc<Literal>>,
        location: Location,
        element_location: Location,
        cursor: &DockerCursor<'_>,
        p: &mut P,
    ) -> Container<Arc<Literal>> {
        walk_container(self, container, location, element_location, cursor, p)
    }
}

/// Visit any Dockerfile tree below `cursor`
pub fn visit_tree<V: DockerVisitor<P>, P>(
    v: &mut V,
    tree: &Docker,
    cursor: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Docker> {
    match tree {
        Docker::Document(document) => Some(Docker::Document(v.visit_document(document, cursor, p))),
        Docker::Instruction(instruction) => v
            .visit_instruction(instruction, cursor, p)
            .map(Docker::Instruction),
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

/// Keep the visited elements of a list; a survivor that becomes first takes
/// over the prefix of the original first element
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

fn with_prefix_of<T: Tree + Clone>(item: &Arc<T>, first: &Arc<T>) -> Arc<T> {
    Arc::new(Tree::with_prefix(item.as_ref(), first.prefix().clone()))
}

fn visit_flags<V: DockerVisitor<P>, P>(
    v: &mut V,
    flags: &[Arc<Flag>],
    cursor: &DockerCursor<'_>,
    p: &mut P,
) -> Vec<Arc<Flag>> {
    let visited = flags.iter().map(|flag| v.visit_flag(flag, cursor, p)).collect();
    rebuild_list(flags, visited, with_prefix_of)
}

fn visit_literals<V: DockerVisitor<P>, P>(
    v: &mut V,
    literals: &[Arc<Literal>],
    cursor: &DockerCursor<'_>,
    p: &mut P,
) -> Vec<Arc<Literal>> {
    let visited = literals
        .iter()
        .map(|literal| v.visit_literal(literal, cursor, p))
        .collect();
    rebuild_list(literals, visited, with_prefix_of)
}

pub fn walk_right_padded<V: DockerVisitor<P>, P>(
    v: &mut V,
    padded: &RightPadded<Arc<Literal>>,
    location: Location,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<RightPadded<Arc<Literal>>> {
    let cursor = parent.push(DockerElement::Padding(location));
    let element = v.visit_literal(padded.element(), &cursor, p)?;
    let after = v.visit_space(padded.after(), location, &cursor, p);
    let markers = v.visit_markers(HasMarkers::markers(padded), &cursor, p);
    if all_same!(element => *padded.element(), after => *padded.after(), markers => *HasMarkers::markers(padded)) {
        return Some(padded.clone());
    }
    Some(RightPadded::from_parts(element, after, markers))
}

pub fn walk_container<V: DockerVisitor<P>, P>(
    v: &mut V,
    container: &Container<Arc<Literal>>,
    location: Location,
    element_location: Location,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Container<Arc<Literal>> {
    let cursor = parent.push(DockerElement::Padding(location));
    let before = v.visit_space(container.before(), location, &cursor, p);
    let original = container.padded_elements();
    let visited: Vec<_> = original
        .iter()
        .map(|element| v.visit_right_padded(element, element_location, &cursor, p))
        .collect();
    let last_deleted = matches!(visited.last(), Some(None));
    let mut elements = rebuild_list(original, visited, |item, first| {
        item.with_element(with_prefix_of(item.element(), first.element()))
    });
    if last_deleted {
        close_list(&mut elements, original);
    }
    let markers = v.visit_markers(HasMarkers::markers(container), &cursor, p);
    if before.same(container.before())
        && elements.len() == original.len()
        && elements.iter().zip(original).all(|(new, old)| new.same(old))
        && markers.same(HasMarkers::markers(container))
    {
        return container.clone();
    }
    Container::from_parts(before, elements, markers)
}

pub fn walk_document<V: DockerVisitor<P>, P>(
    v: &mut V,
    document: &Arc<Document>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Arc<Document> {
    let cursor = parent.push(DockerElement::Document(document));
    let prefix = v.visit_space(&document.prefix, Location::DocumentPrefix, &cursor, p);
    let markers = v.visit_markers(&document.markers, &cursor, p);
    let visited = document
        .instructions
        .iter()
        .map(|instruction| v.visit_instruction(instruction, &cursor, p))
        .collect();
    let instructions = rebuild_list(&document.instructions, visited, |item, first| {
        item.with_prefix(first.prefix().clone())
    });
    let eof = v.visit_space(&document.eof, Location::DocumentEof, &cursor, p);
    if all_same!(
        prefix => document.prefix,
        markers => document.markers,
        instructions => document.instructions,
        eof => document.eof,
    ) {
        return document.clone();
    }
    Arc::new(Document {
        id: document.id,
        prefix,
        markers,
        source_path: document.source_path.clone(),
        charset_bom: document.charset_bom,
        escape: document.escape,
        instructions,
        eof,
    })
}

pub fn walk_instruction<V: DockerVisitor<P>, P>(
    v: &mut V,
    instruction: &Instruction,
    cursor: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Instruction> {
    match instruction {
        Instruction::From(i) => v.visit_from(i, cursor, p).map(Instruction::From),
        Instruction::Command(i) => v.visit_command(i, cursor, p).map(Instruction::Command),
        Instruction::KeyValues(i) => v.visit_key_values(i, cursor, p).map(Instruction::KeyValues),
        Instruction::Generic(i) => v.visit_generic(i, cursor, p).map(Instruction::Generic),
    }
}

pub fn walk_from<V: DockerVisitor<P>, P>(
    v: &mut V,
    from: &Arc<FromInstruction>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<FromInstruction>> {
    let cursor = parent.push(DockerElement::FromInstruction(from));
    let prefix = v.visit_space(&from.prefix, Location::FromPrefix, &cursor, p);
    let markers = v.visit_markers(&from.markers, &cursor, p);
    let flags = visit_flags(v, &from.flags, &cursor, p);
    let image = required(v.visit_literal(&from.image, &cursor, p), "From", "image");
    let alias = from
        .alias
        .as_ref()
        .and_then(|alias| v.visit_stage_alias(alias, &cursor, p));
    if all_same!(
        prefix => from.prefix,
        markers => from.markers,
        flags => from.flags,
        image => from.image,
        alias => from.alias,
    ) {
        return Some(from.clone());
    }
    Some(Arc::new(FromInstruction {
        id: from.id,
        prefix,
        markers,
        keyword: from.keyword.clone(),
        flags,
        image,
        alias,
    }))
}

pub fn walk_command<V: DockerVisitor<P>, P>(
    v: &mut V,
    command: &Arc<CommandInstruction>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<CommandInstruction>> {
    let cursor = parent.push(DockerElement::CommandInstruction(command));
    let prefix = v.visit_space(&command.prefix, Location::CommandPrefix, &cursor, p);
    let markers = v.visit_markers(&command.markers, &cursor, p);
    let flags = visit_flags(v, &command.flags, &cursor, p);
    let form = match &command.form {
        CommandForm::Shell(shell) => CommandForm::Shell(required(
            v.visit_shell_form(shell, &cursor, p),
            "Command",
            "form",
        )),
        CommandForm::Exec(exec) => CommandForm::Exec(required(
            v.visit_exec_form(exec, &cursor, p),
            "Command",
            "form",
        )),
    };
    if all_same!(
        prefix => command.prefix,
        markers => command.markers,
        flags => command.flags,
        form => command.form,
    ) {
        return Some(command.clone());
    }
    Some(Arc::new(CommandInstruction {
        id: command.id,
        prefix,
        markers,
        kind: command.kind,
        keyword: command.keyword.clone(),
        flags,
        form,
    }))
}

pub fn walk_key_values<V: DockerVisitor<P>, P>(
    v: &mut V,
    instruction: &Arc<KeyValueInstruction>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<KeyValueInstruction>> {
    let cursor = parent.push(DockerElement::KeyValueInstruction(instruction));
    let prefix = v.visit_space(&instruction.prefix, Location::KeyValuesPrefix, &cursor, p);
    let markers = v.visit_markers(&instruction.markers, &cursor, p);
    let visited = instruction
        .pairs
        .iter()
        .map(|pair| v.visit_key_value_pair(pair, &cursor, p))
        .collect();
    let pairs = rebuild_list(&instruction.pairs, visited, with_prefix_of);
    if all_same!(
        prefix => instruction.prefix,
        markers => instruction.markers,
        pairs => instruction.pairs,
    ) {
        return Some(instruction.clone());
    }
    Some(Arc::new(KeyValueInstruction {
        id: instruction.id,
        prefix,
        markers,
        kind: instruction.kind,
        keyword: instruction.keyword.clone(),
        pairs,
    }))
}

pub fn walk_generic<V: DockerVisitor<P>, P>(
    v: &mut V,
    instruction: &Arc<GenericInstruction>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<GenericInstruction>> {
    let cursor = parent.push(DockerElement::GenericInstruction(instruction));
    let prefix = v.visit_space(&instruction.prefix, Location::GenericPrefix, &cursor, p);
    let markers = v.visit_markers(&instruction.markers, &cursor, p);
    let flags = visit_flags(v, &instruction.flags, &cursor, p);
    let arguments = match &instruction.arguments {
        Arguments::Words(words) => Arguments::Words(visit_literals(v, words, &cursor, p)),
        Arguments::Exec(exec) => Arguments::Exec(required(
            v.visit_exec_form(exec, &cursor, p),
            "Generic",
            "arguments",
        )),
    };
    if all_same!(
        prefix => instruction.prefix,
        markers => instruction.markers,
        flags => instruction.flags,
        arguments => instruction.arguments,
    ) {
        return Some(instruction.clone());
    }
    Some(Arc::new(GenericInstruction {
        id: instruction.id,
        prefix,
        markers,
        kind: instruction.kind,
        keyword: instruction.keyword.clone(),
        flags,
        arguments,
    }))
}

pub fn walk_flag<V: DockerVisitor<P>, P>(
    v: &mut V,
    flag: &Arc<Flag>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<Flag>> {
    let cursor = parent.push(DockerElement::Flag(flag));
    let prefix = v.visit_space(&flag.prefix, Location::FlagPrefix, &cursor, p);
    let markers = v.visit_markers(&flag.markers, &cursor, p);
    let value = flag
        .value
        .as_ref()
        .and_then(|value| v.visit_literal(value, &cursor, p));
    if all_same!(prefix => flag.prefix, markers => flag.markers, value => flag.value) {
        return Some(flag.clone());
    }
    Some(Arc::new(Flag {
        id: flag.id,
        prefix,
        markers,
        name: flag.name.clone(),
        value,
    }))
}

pub fn walk_literal<V: DockerVisitor<P>, P>(
    v: &mut V,
    literal: &Arc<Literal>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<Literal>> {
    let cursor = parent.push(DockerElement::Literal(literal));
    let prefix = v.visit_space(&literal.prefix, Location::LiteralPrefix, &cursor, p);
    let markers = v.visit_markers(&literal.markers, &cursor, p);
    if all_same!(prefix => literal.prefix, markers => literal.markers) {
        return Some(literal.clone());
    }
    Some(Arc::new(Literal {
        id: literal.id,
        prefix,
        markers,
        text: literal.text.clone(),
    }))
}

pub fn walk_stage_alias<V: DockerVisitor<P>, P>(
    v: &mut V,
    alias: &Arc<StageAlias>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<StageAlias>> {
    let cursor = parent.push(DockerElement::StageAlias(alias));
    let prefix = v.visit_space(&alias.prefix, Location::StageAliasPrefix, &cursor, p);
    let markers = v.visit_markers(&alias.markers, &cursor, p);
    let name = required(v.visit_literal(&alias.name, &cursor, p), "StageAlias", "name");
    if all_same!(prefix => alias.prefix, markers => alias.markers, name => alias.name) {
        return Some(alias.clone());
    }
    Some(Arc::new(StageAlias {
        id: alias.id,
        prefix,
        markers,
        keyword: alias.keyword.clone(),
        name,
    }))
}

pub fn walk_shell_form<V: DockerVisitor<P>, P>(
    v: &mut V,
    shell: &Arc<ShellForm>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<ShellForm>> {
    let cursor = parent.push(DockerElement::ShellForm(shell));
    let prefix = v.visit_space(&shell.prefix, Location::ShellFormPrefix, &cursor, p);
    let markers = v.visit_markers(&shell.markers, &cursor, p);
    if all_same!(prefix => shell.prefix, markers => shell.markers) {
        return Some(shell.clone());
    }
    Some(Arc::new(ShellForm {
        id: shell.id,
        prefix,
        markers,
        text: shell.text.clone(),
    }))
}

pub fn walk_exec_form<V: DockerVisitor<P>, P>(
    v: &mut V,
    exec: &Arc<ExecForm>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<ExecForm>> {
    let cursor = parent.push(DockerElement::ExecForm(exec));
    let prefix = v.visit_space(&exec.prefix, Location::ExecFormPrefix, &cursor, p);
    let markers = v.visit_markers(&exec.markers, &cursor, p);
    let arguments = v.visit_container(
        &exec.arguments,
        Location::ExecFormArguments,
        Location::ExecFormArgumentSuffix,
        &cursor,
        p,
    );
    let close = v.visit_space(&exec.close, Location::ExecFormClose, &cursor, p);
    if all_same!(
        prefix => exec.prefix,
        markers => exec.markers,
        arguments => exec.arguments,
        close => exec.close,
    ) {
        return Some(exec.clone());
    }
    Some(Arc::new(ExecForm {
        id: exec.id,
        prefix,
        markers,
        arguments,
        close,
    }))
}

pub fn walk_key_value_pair<V: DockerVisitor<P>, P>(
    v: &mut V,
    pair: &Arc<KeyValuePair>,
    parent: &DockerCursor<'_>,
    p: &mut P,
) -> Option<Arc<KeyValuePair>> {
    let cursor = parent.push(DockerElement::KeyValuePair(pair));
    let prefix = v.visit_space(&pair.prefix, Location::KeyValuePairPrefix, &cursor, p);
    let markers = v.visit_markers(&pair.markers, &cursor, p);
    let value = pair
        .value
        .as_ref()
        .and_then(|value| v.visit_literal(value, &cursor, p));
    if all_same!(prefix => pair.prefix, markers => pair.markers, value => pair.value) {
        return Some(pair.clone());
    }
    Some(Arc::new(KeyValuePair {
        id: pair.id,
        prefix,
        markers,
        key: pair.key.clone(),
        separator: pair.separator,
        value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use lst_core::ParserOptions;
    use std::path::Path;

    fn parse(text: &str) -> Arc<Document> {
        Arc::new(parse_document(Path::new("Dockerfile"), text, &ParserOptions::default()).unwrap())
    }

    const SAMPLE: &str = "FROM golang:1.22 AS build\nRUN --mount=type=cache go build\nENV A=1 B=2\nCMD [\"app\", \"--serve\"]\nCOPY --from=build /out /app\n";

    struct Noop;
    impl DockerVisitor<()> for Noop {}

    #[test]
    fn noop_visit_keeps_the_root() {
        let document = parse(SAMPLE);
        let visited = Noop.visit(&document, &mut ());
        assert!(Arc::ptr_eq(&document, &visited));
    }

    /// Records the keyword of the instruction enclosing each flag
    struct FlagOwners(Vec<String>);

    impl DockerVisitor<()> for FlagOwners {
        fn visit_flag(
            &mut self,
            flag: &Arc<Flag>,
            cursor: &DockerCursor<'_>,
            p: &mut (),
        ) -> Option<Arc<Flag>> {
            if let Some(run) = cursor.first_enclosing::<&Arc<CommandInstruction>>() {
                self.0.push(run.keyword().to_string());
            }
            if let Some(copy) = cursor.first_enclosing::<&Arc<GenericInstruction>>() {
                self.0.push(copy.keyword().to_string());
            }
            walk_flag(self, flag, cursor, p)
        }
    }

    #[test]
    fn cursor_finds_enclosing_instruction() {
        let document = parse(SAMPLE);
        let mut visitor = FlagOwners(Vec::new());
        visitor.visit(&document, &mut ());
        assert_eq!(visitor.0, vec!["RUN".to_string(), "COPY".to_string()]);
    }

    struct ArgumentSuffixes;

    impl DockerVisitor<usize> for ArgumentSuffixes {
        fn visit_space(
            &mut self,
            space: &Space,
            location: Location,
            _cursor: &DockerCursor<'_>,
            count: &mut usize,
        ) -> Space {
            if location == Location::ExecFormArgumentSuffix {
                *count += 1;
            }
            space.clone()
        }
    }

    #[test]
    fn exec_arguments_are_padded() {
        let document = parse(SAMPLE);
        let mut count = 0;
        ArgumentSuffixes.visit(&document, &mut count);
        assert_eq!(count, 2);
    }

    struct DropPair(&'static str);

    impl DockerVisitor<()> for DropPair {
        fn visit_key_value_pair(
            &mut self,
            pair: &Arc<KeyValuePair>,
            cursor: &DockerCursor<'_>,
            p: &mut (),
        ) -> Option<Arc<KeyValuePair>> {
            if pair.key() == self.0 {
                return None;
            }
            walk_key_value_pair(self, pair, cursor, p)
        }
    }

    #[test]
    fn deleting_the_first_pair_hands_its_prefix_on() {
        let document = parse("ENV A=1   B=2\n");
        let visited = DropPair("A").visit(&document, &mut ());
        let env = visited.instructions()[0].as_key_values().unwrap();
        assert_eq!(env.pairs().len(), 1);
        assert_eq!(env.pairs()[0].key(), "B");
        assert_eq!(env.pairs()[0].prefix().whitespace(), " ");
    }

    struct DropLiterals;

    impl DockerVisitor<()> for DropLiterals {
        fn visit_literal(
            &mut self,
            _literal: &Arc<Literal>,
            _cursor: &DockerCursor<'_>,
            _p: &mut (),
        ) -> Option<Arc<Literal>> {
            None
        }
    }

    #[test]
    #[should_panic(expected = "required child `image` of From")]
    fn deleting_a_required_child_panics() {
        let document = parse("FROM alpine\n");
        DropLiterals.visit(&document, &mut ());
    }
}
