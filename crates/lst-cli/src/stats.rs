//! Node counts per kind

use lst_docker::{
    DockerCursor, DockerVisitor, Document, ExecForm, Flag, Instruction, KeyValuePair,
    Literal as DockerLiteral, ShellForm, StageAlias,
};
use lst_hcl::{Attribute, Block, ConfigFile, Expression, ForIntro, HclCursor, HclVisitor, Identifier};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

pub type KindCounts = BTreeMap<&'static str, usize>;

/// Totals across every inspected file
#[derive(Debug, Default, Serialize)]
pub struct NodeCounts {
    pub files: usize,
    pub failed_files: usize,
    pub kinds: KindCounts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

impl NodeCounts {
    /// Fold in one file; `None` means it did not parse
    pub fn add_file(&mut self, path: &Path, counts: Option<KindCounts>) {
        self.files += 1;
        match counts {
            Some(counts) => {
                for (kind, count) in counts {
                    *self.kinds.entry(kind).or_default() += count;
                }
            }
            None => {
                self.failed_files += 1;
                self.failed.push(path.display().to_string());
            }
        }
    }

    pub fn table(&self) -> String {
        let width = self
            .kinds
            .keys()
            .map(|kind| kind.len())
            .max()
            .unwrap_or(0)
            .max("Kind".len());
        let mut out = String::new();
        let _ = writeln!(out, "{:<width$}  Count", "Kind");
        for (kind, count) in &self.kinds {
            let _ = writeln!(out, "{kind:<width$}  {count:>5}");
        }
        let _ = writeln!(
            out,
            "\n{} files, {} failed to parse",
            self.files, self.failed_files
        );
        for path in &self.failed {
            let _ = writeln!(out, "  {path}");
        }
        out
    }
}

fn bump(counts: &mut KindCounts, kind: &'static str) {
    *counts.entry(kind).or_default() += 1;
}

pub fn count_hcl(file: &Arc<ConfigFile>) -> KindCounts {
    let mut counts = KindCounts::new();
    bump(&mut counts, "ConfigFile");
    HclCounter.visit(file, &mut counts);
    counts
}

pub fn count_docker(document: &Arc<Document>) -> KindCounts {
    let mut counts = KindCounts::new();
    DockerCounter.visit(document, &mut counts);
    counts
}

/// Counts every HCL node it passes
struct HclCounter;

impl HclVisitor<KindCounts> for HclCounter {
    fn visit_expression(
        &mut self,
        expression: &Expression,
        cursor: &HclCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Expression> {
        // these two are counted by their own visit methods
        if !matches!(
            expression,
            Expression::Attribute(_) | Expression::Identifier(_)
        ) {
            bump(p, expression.kind_name());
        }
        lst_hcl::visitor::walk_expression(self, expression, cursor, p)
    }

    fn visit_block(
        &mut self,
        block: &Arc<Block>,
        cursor: &HclCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<Block>> {
        bump(p, "Block");
        lst_hcl::visitor::walk_block(self, block, cursor, p)
    }

    fn visit_attribute(
        &mut self,
        attribute: &Arc<Attribute>,
        cursor: &HclCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<Attribute>> {
        bump(p, "Attribute");
        lst_hcl::visitor::walk_attribute(self, attribute, cursor, p)
    }

    fn visit_identifier(
        &mut self,
        identifier: &Arc<Identifier>,
        cursor: &HclCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<Identifier>> {
        bump(p, "Identifier");
        lst_hcl::visitor::walk_identifier(self, identifier, cursor, p)
    }

    fn visit_for_intro(
        &mut self,
        intro: &Arc<ForIntro>,
        cursor: &HclCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<ForIntro>> {
        bump(p, "ForIntro");
        lst_hcl::visitor::walk_for_intro(self, intro, cursor, p)
    }
}

/// Counts every Dockerfile node it passes
struct DockerCounter;

impl DockerVisitor<KindCounts> for DockerCounter {
    fn visit_document(
        &mut self,
        document: &Arc<Document>,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Arc<Document> {
        bump(p, "Document");
        lst_docker::visitor::walk_document(self, document, cursor, p)
    }

    fn visit_instruction(
        &mut self,
        instruction: &Instruction,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Instruction> {
        bump(p, instruction.kind_name());
        lst_docker::visitor::walk_instruction(self, instruction, cursor, p)
    }

    fn visit_flag(
        &mut self,
        flag: &Arc<Flag>,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<Flag>> {
        bump(p, "Flag");
        lst_docker::visitor::walk_flag(self, flag, cursor, p)
    }

    fn visit_literal(
        &mut self,
        literal: &Arc<DockerLiteral>,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<DockerLiteral>> {
        bump(p, "Literal");
        lst_docker::visitor::walk_literal(self, literal, cursor, p)
    }

    fn visit_stage_alias(
        &mut self,
        alias: &Arc<StageAlias>,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<StageAlias>> {
        bump(p, "StageAlias");
        lst_docker::visitor::walk_stage_alias(self, alias, cursor, p)
    }

    fn visit_shell_form(
        &mut self,
        shell: &Arc<ShellForm>,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<ShellForm>> {
        bump(p, "ShellForm");
        lst_docker::visitor::walk_shell_form(self, shell, cursor, p)
    }

    fn visit_exec_form(
        &mut self,
        exec: &Arc<ExecForm>,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<ExecForm>> {
        bump(p, "ExecForm");
        lst_docker::visitor::walk_exec_form(self, exec, cursor, p)
    }

    fn visit_key_value_pair(
        &mut self,
        pair: &Arc<KeyValuePair>,
        cursor: &DockerCursor<'_>,
        p: &mut KindCounts,
    ) -> Option<Arc<KeyValuePair>> {
        bump(p, "KeyValuePair");
        lst_docker::visitor::walk_key_value_pair(self, pair, cursor, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lst_core::ParserOptions;

    #[test]
    fn counts_hcl_nodes() {
        let file = lst_hcl::parse_config_file(
            Path::new("main.tf"),
            "resource \"a\" \"b\" {\n  count = 2\n}\n",
            &ParserOptions::default(),
        )
        .unwrap();
        let counts = count_hcl(&Arc::new(file));
        assert_eq!(counts["ConfigFile"], 1);
        assert_eq!(counts["Block"], 1);
        assert_eq!(counts["Attribute"], 1);
    }

    #[test]
    fn counts_dockerfile_nodes() {
        let document = lst_docker::parse_document(
            Path::new("Dockerfile"),
            "FROM a AS b\nRUN make\nCMD [\"x\", \"y\"]\nENV A=1 B=2\n",
            &ParserOptions::default(),
        )
        .unwrap();
        let counts = count_docker(&Arc::new(document));
        assert_eq!(counts["Document"], 1);
        assert_eq!(counts["From"], 1);
        assert_eq!(counts["StageAlias"], 1);
        assert_eq!(counts["ShellForm"], 1);
        assert_eq!(counts["ExecForm"], 1);
        assert_eq!(counts["KeyValuePair"], 2);
    }

    #[test]
    fn failed_files_are_listed() {
        let mut totals = NodeCounts::default();
        totals.add_file(Path::new("ok.tf"), Some(KindCounts::from([("Block", 2)])));
        totals.add_file(Path::new("bad.tf"), None);
        assert_eq!(totals.files, 2);
        assert_eq!(totals.failed_files, 1);
        let table = totals.table();
        assert!(table.contains("Block"));
        assert!(table.contains("2 files, 1 failed to parse"));
        assert!(table.contains("  bad.tf"));
    }
}
