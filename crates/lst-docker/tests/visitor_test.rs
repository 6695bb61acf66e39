//! Rewriting Dockerfiles with visitors

use lst_core::{HasMarkers, MarkerPrinter, ParserOptions, SourceFile, Tree};
use lst_docker::visitor::{walk_from, walk_instruction};
use lst_docker::{
    CommandForm, Document, DockerCursor, DockerVisitor, FromInstruction, Instruction,
    InstructionKind, parse_document, print_document,
};
use std::path::Path;
use std::sync::Arc;

fn parse(text: &str) -> Arc<Document> {
    Arc::new(parse_document(Path::new("Dockerfile"), text, &ParserOptions::default()).unwrap())
}

/// Pins every stage built from `image` to `tag`
struct Retag<'a> {
    image: &'a str,
    tag: &'a str,
}

impl DockerVisitor<usize> for Retag<'_> {
    fn visit_from(
        &mut self,
        from: &Arc<FromInstruction>,
        cursor: &DockerCursor<'_>,
        changed: &mut usize,
    ) -> Option<Arc<FromInstruction>> {
        let from = walk_from(self, from, cursor, changed)?;
        if from.image_name() != self.image || from.tag() == Some(self.tag) {
            return Some(from);
        }
        *changed += 1;
        Some(Arc::new(from.with_tag(self.tag)))
    }
}

const MULTI_STAGE: &str = "# build\nFROM node:18 AS build\nRUN npm ci\n\n# runtime\nFROM  node:18-alpine\nCOPY --from=build /app /app\nFROM node AS test\n";

#[test]
fn test_retag_only_touches_matching_stages() {
    let document = parse(MULTI_STAGE);
    let mut changed = 0;
    let updated = Retag {
        image: "node",
        tag: "20",
    }
    .visit(&document, &mut changed);

    assert_eq!(changed, 3);
    assert_eq!(
        updated.print_all(),
        "# build\nFROM node:20 AS build\nRUN npm ci\n\n# runtime\nFROM  node:20\nCOPY --from=build /app /app\nFROM node:20 AS test\n"
    );
    assert_eq!(updated.id(), document.id());
    for (old, new) in document.stages().zip(updated.stages()) {
        assert_eq!(old.id(), new.id());
    }
    assert!(Arc::ptr_eq(
        document.instructions()[1].as_command().unwrap(),
        updated.instructions()[1].as_command().unwrap()
    ));
}

#[test]
fn test_visit_without_changes_shares_everything() {
    let document = parse(MULTI_STAGE);
    let mut changed = 0;
    let updated = Retag {
        image: "python",
        tag: "3",
    }
    .visit(&document, &mut changed);
    assert_eq!(changed, 0);
    assert!(Arc::ptr_eq(&document, &updated));
}

/// Removes every instruction of one kind
struct Remove(InstructionKind);

impl DockerVisitor<()> for Remove {
    fn visit_instruction(
        &mut self,
        instruction: &Instruction,
        cursor: &DockerCursor<'_>,
        p: &mut (),
    ) -> Option<Instruction> {
        if instruction.kind() == self.0 {
            return None;
        }
        walk_instruction(self, instruction, cursor, p)
    }
}

#[test]
fn test_deleting_instructions() {
    let document = parse("MAINTAINER me\nFROM a\nMAINTAINER you\nRUN b\n");
    let updated = Remove(InstructionKind::Maintainer).visit(&document, &mut ());
    assert_eq!(updated.instructions().len(), 2);
    assert_eq!(updated.print_all(), "FROM a\nRUN b\n");

    let updated = Remove(InstructionKind::Run).visit(&document, &mut ());
    assert_eq!(updated.print_all(), "MAINTAINER me\nFROM a\nMAINTAINER you\n");
}

/// Marks command instructions written in shell form
struct FindShellCommands;

impl DockerVisitor<()> for FindShellCommands {
    fn visit_instruction(
        &mut self,
        instruction: &Instruction,
        cursor: &DockerCursor<'_>,
        p: &mut (),
    ) -> Option<Instruction> {
        let instruction = walk_instruction(self, instruction, cursor, p)?;
        let is_shell = instruction
            .as_command()
            .is_some_and(|command| matches!(command.form(), CommandForm::Shell(_)));
        if !is_shell {
            return Some(instruction);
        }
        let markers = instruction.markers().search_result(None);
        Some(instruction.with_markers(markers))
    }
}

#[test]
fn test_search_results_print_with_decorations() {
    let document = parse("FROM a\nRUN make \\\n    install\nCMD [\"run\"]\nENTRYPOINT serve\n");
    let found = FindShellCommands.visit(&document, &mut ());

    insta::assert_snapshot!(print_document(&found, MarkerPrinter::Default), @r#"
    FROM a
    ~~>RUN make \
        install
    CMD ["run"]
    ~~>ENTRYPOINT serve
    "#);
    assert_eq!(found.print_sanitized(), document.print_all());
    assert!(found.markers().is_empty());
}
