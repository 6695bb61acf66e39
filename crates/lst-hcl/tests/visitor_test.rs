//! Rewriting HCL trees with visitors

use lst_core::{HasMarkers, MarkerPrinter, ParserOptions, SourceFile, Tree};
use lst_hcl::visitor::walk_identifier;
use lst_hcl::{
    BodyContent, ConfigFile, Expression, HclCursor, HclVisitor, Identifier, Literal,
    parse_config_file, print_config_file,
};
use std::path::Path;
use std::sync::Arc;

fn parse(text: &str) -> Arc<ConfigFile> {
    Arc::new(parse_config_file(Path::new("main.tf"), text, &ParserOptions::default()).unwrap())
}

/// Renames identifiers and counts how many it changed
struct Rename<'a> {
    from: &'a str,
    to: &'a str,
}

impl HclVisitor<usize> for Rename<'_> {
    fn visit_identifier(
        &mut self,
        identifier: &Arc<Identifier>,
        cursor: &HclCursor<'_>,
        renamed: &mut usize,
    ) -> Option<Arc<Identifier>> {
        let identifier = walk_identifier(self, identifier, cursor, renamed)?;
        if identifier.name() != self.from {
            return Some(identifier);
        }
        *renamed += 1;
        Some(Arc::new(identifier.with_name(self.to.to_string())))
    }
}

#[test]
fn test_rename_identifiers_everywhere() {
    let file = parse("a = 1\nx = a\ny = \"unchanged\"\n");
    let mut renamed = 0;
    let updated = Rename { from: "a", to: "b" }.visit(&file, &mut renamed);

    assert_eq!(renamed, 2);
    assert_eq!(updated.print_all(), "b = 1\nx = b\ny = \"unchanged\"\n");
    assert_eq!(updated.id(), file.id());

    let before: Vec<_> = file.attributes().collect();
    let after: Vec<_> = updated.attributes().collect();
    // rebuilt parents keep their identity
    assert_eq!(after[0].id(), before[0].id());
    assert_eq!(after[1].id(), before[1].id());
    assert!(Arc::ptr_eq(after[2], before[2]));

    let (Expression::Literal(old), Expression::Literal(new)) = (before[0].value(), after[0].value())
    else {
        panic!("expected literal values");
    };
    assert!(Arc::ptr_eq(old, new));
}

#[test]
fn test_visit_without_matches_returns_same_tree() {
    let file = parse("resource \"r\" \"n\" {\n  count = length(var.l)\n}\n");
    let mut renamed = 0;
    let updated = Rename { from: "zzz", to: "b" }.visit(&file, &mut renamed);
    assert_eq!(renamed, 0);
    assert!(Arc::ptr_eq(&file, &updated));
}

/// Deletes attributes with a given name and tuple elements equal to a literal
struct Delete<'a> {
    attribute: &'a str,
    literal: &'a str,
}

impl HclVisitor<()> for Delete<'_> {
    fn visit_body_content(
        &mut self,
        content: &BodyContent,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Option<BodyContent> {
        if let Some(attribute) = content.as_attribute()
            && attribute.simple_name() == Some(self.attribute)
        {
            return None;
        }
        lst_hcl::visitor::walk_body_content(self, content, cursor, p)
    }

    fn visit_literal(
        &mut self,
        literal: &Arc<Literal>,
        _cursor: &HclCursor<'_>,
        _p: &mut (),
    ) -> Option<Arc<Literal>> {
        if literal.value_source() == self.literal {
            return None;
        }
        Some(literal.clone())
    }
}

#[test]
fn test_delete_body_element() {
    let file = parse("a = 1\nb = 2\nc = 3\n");
    let updated = Delete {
        attribute: "b",
        literal: "",
    }
    .visit(&file, &mut ());
    assert_eq!(updated.print_all(), "a = 1\nc = 3\n");
}

#[test]
fn test_delete_tuple_elements_keeps_separators() {
    let middle = Delete {
        attribute: "",
        literal: "2",
    }
    .visit(&parse("x = [1, 2, 3]\n"), &mut ());
    assert_eq!(middle.print_all(), "x = [1, 3]\n");

    let first = Delete {
        attribute: "",
        literal: "1",
    }
    .visit(&parse("x = [1, 2, 3]\n"), &mut ());
    assert_eq!(first.print_all(), "x = [2, 3]\n");

    let last = Delete {
        attribute: "",
        literal: "3",
    }
    .visit(&parse("x = [1, 2, 3]\n"), &mut ());
    assert_eq!(last.print_all(), "x = [1, 2]\n");
}

#[test]
fn test_delete_last_element_of_multiline_tuple_keeps_closer_layout() {
    let delete_two = || Delete {
        attribute: "",
        literal: "2",
    };

    let trailing = delete_two().visit(&parse("x = [\n  1,\n  2,\n]\n"), &mut ());
    assert_eq!(trailing.print_all(), "x = [\n  1,\n]\n");

    let bare = delete_two().visit(&parse("x = [\n  1,\n  2\n]\n"), &mut ());
    assert_eq!(bare.print_all(), "x = [\n  1\n]\n");

    let middle = delete_two().visit(&parse("x = [\n  1,\n  2,\n  3,\n]\n"), &mut ());
    assert_eq!(middle.print_all(), "x = [\n  1,\n  3,\n]\n");
}

#[test]
fn test_delete_first_body_element_keeps_file_start() {
    let file = parse("# header\na = 1\nb = 2\n");
    let updated = Delete {
        attribute: "a",
        literal: "",
    }
    .visit(&file, &mut ());
    assert_eq!(updated.print_all(), "# header\nb = 2\n");
}

/// Marks every identifier with a given name as a search result
struct Find<'a>(&'a str);

impl HclVisitor<()> for Find<'_> {
    fn visit_identifier(
        &mut self,
        identifier: &Arc<Identifier>,
        _cursor: &HclCursor<'_>,
        _p: &mut (),
    ) -> Option<Arc<Identifier>> {
        if identifier.name() != self.0 {
            return Some(identifier.clone());
        }
        Some(identifier.with_markers(identifier.markers().search_result(None)))
    }
}

#[test]
fn test_search_results_print_decorated() {
    let file = parse("a = 1\nblock {\n  x = a + 1\n}\n");
    let found = Find("a").visit(&file, &mut ());

    insta::assert_snapshot!(print_config_file(&found, MarkerPrinter::Default), @r"
    /*~~>*/a = 1
    block {
      x = /*~~>*/a + 1
    }
    ");
    assert_eq!(found.print_sanitized(), file.print_all());
}
