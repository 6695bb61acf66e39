//! Command implementations

use crate::discover::discover_files;
use crate::report::{CheckSummary, Reporter};
use crate::stats::{NodeCounts, count_docker, count_hcl};
use anyhow::{Context, Result, bail};
use lst_core::{
    CollectingErrorSink, ExecutionContext, HasMarkers, Input, LstConfig, Parsed, Parser,
    ParserOptions, SourceFile,
};
use lst_docker::{DockerCursor, DockerParser, DockerVisitor, Instruction};
use lst_hcl::{HclCursor, HclParser, HclVisitor, Identifier};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Parse every supported file and verify it prints back unchanged
pub fn check_command(
    paths: &[PathBuf],
    include: &[String],
    config: &LstConfig,
    colors: bool,
) -> Result<bool> {
    let inputs = inputs_for(paths, include)?;
    let options = ParserOptions {
        require_print_equals_input: true,
        ..config.parser
    };
    let sink = Arc::new(CollectingErrorSink::new());
    let ctx = ExecutionContext::new(sink.clone());

    let hcl_parser = HclParser::new(options);
    let (hcl_inputs, other_inputs) = split_inputs(&inputs, &hcl_parser);
    let hcl = hcl_parser.parse_inputs_parallel(&hcl_inputs, None, &ctx);
    let docker = DockerParser::new(options).parse_inputs_parallel(&other_inputs, None, &ctx);
    debug!("{} inputs failed to parse", sink.errors().len());

    let reporter = Reporter::new(colors);
    let mut summary = CheckSummary::default();
    let mut stderr = std::io::stderr().lock();
    report_all(&reporter, &hcl, &mut summary, &mut stderr)?;
    report_all(&reporter, &docker, &mut summary, &mut stderr)?;

    let skipped = inputs.len().saturating_sub(summary.files_checked);
    if skipped > 0 {
        info!("Skipped {} files without a supported language", skipped);
    }
    println!(
        "Checked {} files, {} failed",
        summary.files_checked,
        summary.failures()
    );
    Ok(summary.is_clean())
}

fn report_all<S: SourceFile>(
    reporter: &Reporter,
    parsed: &[Parsed<S>],
    summary: &mut CheckSummary,
    out: &mut impl Write,
) -> Result<()> {
    for tree in parsed {
        reporter
            .report(tree, summary, out)
            .context("failed to write diagnostics")?;
    }
    Ok(())
}

/// Parse one file and print it back, optionally marking nodes named `find`
pub fn print_command(
    file: &Path,
    find: Option<&str>,
    config: &LstConfig,
    colors: bool,
) -> Result<bool> {
    let input = Input::from_file(file);
    let ctx = ExecutionContext::default();

    let hcl = HclParser::new(config.parser);
    let docker = DockerParser::new(config.parser);
    let printed = if hcl.accept(file) {
        match hcl.parse_input(&input, None, &ctx) {
            Parsed::Source(tree) => match find {
                Some(name) => FindIdentifiers { name }.visit(&tree, &mut ()).print_all(),
                None => tree.print_all(),
            },
            Parsed::Error(error) => return print_failure(&error, colors),
        }
    } else if docker.accept(file) {
        match docker.parse_input(&input, None, &ctx) {
            Parsed::Source(tree) => match find {
                Some(keyword) => FindInstructions { keyword }.visit(&tree, &mut ()).print_all(),
                None => tree.print_all(),
            },
            Parsed::Error(error) => return print_failure(&error, colors),
        }
    } else {
        bail!("unsupported file type: {}", file.display());
    };

    print!("{printed}");
    Ok(true)
}

fn print_failure(error: &lst_core::ParseErrorTree, colors: bool) -> Result<bool> {
    Reporter::new(colors)
        .parse_error(error, &mut std::io::stderr().lock())
        .context("failed to write diagnostics")?;
    Ok(false)
}

/// Count tree nodes per kind across every supported file
pub fn stats_command(
    paths: &[PathBuf],
    include: &[String],
    config: &LstConfig,
    json: bool,
) -> Result<bool> {
    let inputs = inputs_for(paths, include)?;
    let ctx = ExecutionContext::default();

    let mut counts = NodeCounts::default();
    let hcl_parser = HclParser::new(config.parser);
    let (hcl_inputs, other_inputs) = split_inputs(&inputs, &hcl_parser);
    let hcl = hcl_parser.parse_inputs_parallel(&hcl_inputs, None, &ctx);
    for parsed in &hcl {
        counts.add_file(parsed.source_path(), parsed.as_source().map(count_hcl));
    }
    let docker = DockerParser::new(config.parser).parse_inputs_parallel(&other_inputs, None, &ctx);
    for parsed in &docker {
        counts.add_file(parsed.source_path(), parsed.as_source().map(count_docker));
    }

    if json {
        let rendered =
            serde_json::to_string_pretty(&counts).context("failed to serialize node counts")?;
        println!("{rendered}");
    } else {
        print!("{}", counts.table());
    }
    Ok(counts.failed_files == 0)
}

fn inputs_for(paths: &[PathBuf], include: &[String]) -> Result<Vec<Input>> {
    let files = discover_files(paths, include)?;
    Ok(files.into_iter().map(Input::from_file).collect())
}

/// Inputs `first` claims and the rest, so no file reaches two parsers
///
/// Names like `Dockerfile.tf` are accepted by more than one language; the
/// earlier parser wins, as it does for `print`.
fn split_inputs(inputs: &[Input], first: &impl Parser) -> (Vec<Input>, Vec<Input>) {
    inputs
        .iter()
        .cloned()
        .partition(|input| first.accept(input.path()))
}

/// Marks every identifier called `name`
struct FindIdentifiers<'a> {
    name: &'a str,
}

impl HclVisitor<()> for FindIdentifiers<'_> {
    fn visit_identifier(
        &mut self,
        identifier: &Arc<Identifier>,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Option<Arc<Identifier>> {
        let identifier = lst_hcl::visitor::walk_identifier(self, identifier, cursor, p)?;
        if identifier.name() == self.name {
            return Some(identifier.with_markers(identifier.markers().search_result(None)));
        }
        Some(identifier)
    }
}

/// Marks every instruction whose keyword is `keyword`, ignoring case
struct FindInstructions<'a> {
    keyword: &'a str,
}

impl DockerVisitor<()> for FindInstructions<'_> {
    fn visit_instruction(
        &mut self,
        instruction: &Instruction,
        cursor: &DockerCursor<'_>,
        p: &mut (),
    ) -> Option<Instruction> {
        let instruction = lst_docker::visitor::walk_instruction(self, instruction, cursor, p)?;
        if instruction.keyword().eq_ignore_ascii_case(self.keyword) {
            return Some(instruction.with_markers(instruction.markers().search_result(None)));
        }
        Some(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lst_docker::Document;
    use lst_hcl::ConfigFile;

    fn find_in_hcl(text: &str, name: &str) -> String {
        let tree: ConfigFile = lst_hcl::parse_config_file(
            Path::new("main.tf"),
            text,
            &ParserOptions::default(),
        )
        .unwrap();
        FindIdentifiers { name }
            .visit(&Arc::new(tree), &mut ())
            .print_all()
    }

    #[test]
    fn ambiguous_names_go_to_one_parser() {
        let inputs = vec![
            Input::from_string("Dockerfile.tf", "a = 1\n"),
            Input::from_string("Dockerfile", "FROM a\n"),
            Input::from_string("main.tf", "b = 2\n"),
        ];
        let hcl = HclParser::default();
        let (claimed, rest) = split_inputs(&inputs, &hcl);
        let claimed: Vec<_> = claimed.iter().map(|input| input.path().to_path_buf()).collect();
        assert_eq!(claimed, vec![PathBuf::from("Dockerfile.tf"), PathBuf::from("main.tf")]);
        assert_eq!(rest.len(), 1);
        assert!(DockerParser::default().accept(rest[0].path()));
    }

    #[test]
    fn marks_matching_identifiers() {
        let printed = find_in_hcl("region = var.region\nzone = 1\n", "region");
        assert!(printed.starts_with("/*~~>*/region"));
        assert!(!printed.contains("/*~~>*/zone"));
    }

    #[test]
    fn marks_instructions_ignoring_case() {
        let tree: Document = lst_docker::parse_document(
            Path::new("Dockerfile"),
            "FROM a\nrun b\nCMD c\n",
            &ParserOptions::default(),
        )
        .unwrap();
        let printed = FindInstructions { keyword: "RUN" }
            .visit(&Arc::new(tree), &mut ())
            .print_all();
        assert_eq!(printed, "FROM a\n~~>run b\nCMD c\n");
    }
}
