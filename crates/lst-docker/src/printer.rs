//! LST to Dockerfile text
//!
//! Search result decorations are written bare (`~~>`) in front of the
//! marked node; Dockerfiles have no inline comment to wrap them in.

use crate::tree::*;
use crate::visitor::{DockerCursor, DockerElement, DockerVisitor};
use lst_core::{MarkerPrinter, Markers, PrintOutputCapture, SourceFile, Space, TreeId};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const BOM: &str = "\u{feff}";

/// Visitor that renders Dockerfile trees into a [`PrintOutputCapture`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DockerPrinter;

impl DockerPrinter {
    pub fn print(tree: &Docker, marker_printer: MarkerPrinter) -> String {
        let mut out = PrintOutputCapture::new(marker_printer);
        let root = DockerCursor::root(DockerElement::Root);
        crate::visitor::visit_tree(&mut DockerPrinter, tree, &root, &mut out);
        out.into_output()
    }

    fn document(
        &mut self,
        document: &Document,
        cursor: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) {
        if document.charset_bom {
            p.append(BOM);
        }
        before_syntax(&document.prefix, &document.markers, p);
        for instruction in &document.instructions {
            self.visit_instruction(instruction, cursor, p);
        }
        p.append_space(&document.eof);
    }

    fn flags(&mut self, flags: &[Arc<Flag>], cursor: &DockerCursor<'_>, p: &mut PrintOutputCapture) {
        for flag in flags {
            self.visit_flag(flag, cursor, p);
        }
    }
}

fn before_syntax(prefix: &Space, markers: &Markers, p: &mut PrintOutputCapture) {
    p.append_space(prefix);
    if let Some(decoration) = p.marker_printer().before_syntax(markers) {
        p.append(&decoration);
    }
}

impl DockerVisitor<PrintOutputCapture> for DockerPrinter {
    fn visit_document(
        &mut self,
        document: &Arc<Document>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Arc<Document> {
        let cursor = parent.push(DockerElement::Document(document));
        self.document(document, &cursor, p);
        document.clone()
    }

    fn visit_from(
        &mut self,
        from: &Arc<FromInstruction>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<FromInstruction>> {
        let cursor = parent.push(DockerElement::FromInstruction(from));
        before_syntax(&from.prefix, &from.markers, p);
        p.append(&from.keyword);
        self.flags(&from.flags, &cursor, p);
        self.visit_literal(&from.image, &cursor, p);
        if let Some(alias) = &from.alias {
            self.visit_stage_alias(alias, &cursor, p);
        }
        Some(from.clone())
    }

    fn visit_command(
        &mut self,
        command: &Arc<CommandInstruction>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<CommandInstruction>> {
        let cursor = parent.push(DockerElement::CommandInstruction(command));
        before_syntax(&command.prefix, &command.markers, p);
        p.append(&command.keyword);
        self.flags(&command.flags, &cursor, p);
        match &command.form {
            CommandForm::Shell(shell) => {
                self.visit_shell_form(shell, &cursor, p);
            }
            CommandForm::Exec(exec) => {
                self.visit_exec_form(exec, &cursor, p);
            }
        }
        Some(command.clone())
    }

    fn visit_key_values(
        &mut self,
        instruction: &Arc<KeyValueInstruction>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<KeyValueInstruction>> {
        let cursor = parent.push(DockerElement::KeyValueInstruction(instruction));
        before_syntax(&instruction.prefix, &instruction.markers, p);
        p.append(&instruction.keyword);
        for pair in &instruction.pairs {
            self.visit_key_value_pair(pair, &cursor, p);
        }
        Some(instruction.clone())
    }

    fn visit_generic(
        &mut self,
        instruction: &Arc<GenericInstruction>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<GenericInstruction>> {
        let cursor = parent.push(DockerElement::GenericInstruction(instruction));
        before_syntax(&instruction.prefix, &instruction.markers, p);
        p.append(&instruction.keyword);
        self.flags(&instruction.flags, &cursor, p);
        match &instruction.arguments {
            Arguments::Words(words) => {
                for word in words {
                    self.visit_literal(word, &cursor, p);
                }
            }
            Arguments::Exec(exec) => {
                self.visit_exec_form(exec, &cursor, p);
            }
        }
        Some(instruction.clone())
    }

    fn visit_flag(
        &mut self,
        flag: &Arc<Flag>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Flag>> {
        let cursor = parent.push(DockerElement::Flag(flag));
        before_syntax(&flag.prefix, &flag.markers, p);
        p.append("--").append(&flag.name);
        if let Some(value) = &flag.value {
            p.append("=");
            self.visit_literal(value, &cursor, p);
        }
        Some(flag.clone())
    }

    fn visit_literal(
        &mut self,
        literal: &Arc<Literal>,
        _parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Literal>> {
        before_syntax(&literal.prefix, &literal.markers, p);
        p.append(&literal.text);
        Some(literal.clone())
    }

    fn visit_stage_alias(
        &mut self,
        alias: &Arc<StageAlias>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<StageAlias>> {
        let cursor = parent.push(DockerElement::StageAlias(alias));
        before_syntax(&alias.prefix, &alias.markers, p);
        p.append(&alias.keyword);
        self.visit_literal(&alias.name, &cursor, p);
        Some(alias.clone())
    }

    fn visit_shell_form(
        &mut self,
        shell: &Arc<ShellForm>,
        _parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<ShellForm>> {
        before_syntax(&shell.prefix, &shell.markers, p);
        p.append(&shell.text);
        Some(shell.clone())
    }

    fn visit_exec_form(
        &mut self,
        exec: &Arc<ExecForm>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<ExecForm>> {
        let cursor = parent.push(DockerElement::ExecForm(exec));
        before_syntax(&exec.prefix, &exec.markers, p);
        p.append("[").append_space(exec.arguments.before());
        let arguments = exec.arguments.padded_elements();
        let last = arguments.len().saturating_sub(1);
        for (i, argument) in arguments.iter().enumerate() {
            self.visit_literal(argument.element(), &cursor, p);
            p.append_space(argument.after());
            if i < last {
                p.append(",");
            }
        }
        p.append_space(&exec.close).append("]");
        Some(exec.clone())
    }

    fn visit_key_value_pair(
        &mut self,
        pair: &Arc<KeyValuePair>,
        parent: &DockerCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<KeyValuePair>> {
        let cursor = parent.push(DockerElement::KeyValuePair(pair));
        before_syntax(&pair.prefix, &pair.markers, p);
        p.append(&pair.key);
        if let Some(value) = &pair.value {
            if pair.separator == Separator::Equals {
                p.append("=");
            }
            self.visit_literal(value, &cursor, p);
        }
        Some(pair.clone())
    }
}

impl SourceFile for Document {
    fn id(&self) -> TreeId {
        self.id
    }

    fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn with_source_path(&self, path: PathBuf) -> Self {
        Self {
            source_path: path,
            ..self.clone()
        }
    }

    fn print_with(&self, marker_printer: MarkerPrinter) -> String {
        let mut out = PrintOutputCapture::new(marker_printer);
        let root = DockerCursor::root(DockerElement::Root);
        DockerPrinter.document(self, &root, &mut out);
        out.into_output()
    }
}

/// Print a whole Dockerfile, rendering markers with `marker_printer`
pub fn print_document(document: &Document, marker_printer: MarkerPrinter) -> String {
    document.print_with(marker_printer)
}

impl Instruction {
    /// Source text of this instruction including its prefix
    pub fn print(&self) -> String {
        DockerPrinter::print(&Docker::Instruction(self.clone()), MarkerPrinter::Sanitized)
    }
}
