//! Splicing templates into parsed files

use lst_core::{ErrorKind, FormatStyle, LstError, ParserOptions, SourceFile, Tree};
use lst_hcl::{
    ConfigFile, Coordinates, Hcl, HclCursor, HclElement, HclTemplate, TemplateError,
    parse_config_file,
};
use std::path::Path;
use std::sync::Arc;

fn parse(text: &str) -> Arc<ConfigFile> {
    Arc::new(parse_config_file(Path::new("main.tf"), text, &ParserOptions::default()).unwrap())
}

#[test]
fn test_insert_into_empty_block() {
    let file = parse("a {}\nb {\n  keep   =   1\n}\n");
    let a = file.blocks().next().unwrap().clone();
    let template = HclTemplate::builder("attr = #{}").build();

    let updated = template
        .apply_to_file(&file, a.coordinates().last(), &["1"])
        .unwrap();

    assert_eq!(
        updated.print_all(),
        "a {\n  attr = 1\n}\nb {\n  keep   =   1\n}\n"
    );
    let (old_b, new_b) = (&file.body()[1], &updated.body()[1]);
    assert!(Arc::ptr_eq(
        old_b.as_block().unwrap(),
        new_b.as_block().unwrap()
    ));
}

#[test]
fn test_append_follows_detected_indentation() {
    let file = parse("a {\n    x = 1\n}\n");
    let a = file.blocks().next().unwrap().clone();
    let updated = HclTemplate::builder("y = #{}")
        .build()
        .apply_to_file(&file, a.coordinates().last(), &["2"])
        .unwrap();
    assert_eq!(updated.print_all(), "a {\n    x = 1\n    y = 2\n}\n");
}

#[test]
fn test_explicit_style_wins() {
    let file = parse("a {}\n");
    let a = file.blocks().next().unwrap().clone();
    let style = FormatStyle {
        use_tabs: true,
        ..FormatStyle::default()
    };
    let updated = HclTemplate::builder("nested {\nx = 1\n}")
        .style(style)
        .build()
        .apply_to_file(&file, a.coordinates().last(), &[])
        .unwrap();
    assert_eq!(updated.print_all(), "a {\n\tnested {\n\t\tx = 1\n\t}\n}\n");
}

#[test]
fn test_apply_within_a_block_scope() {
    let file = parse("outer {\n  inner {}\n}\n");
    let outer = file.blocks().next().unwrap().clone();
    let inner = outer.body()[0].as_block().unwrap().clone();

    let root = HclCursor::root(HclElement::ConfigFile(&file));
    let scope = root.push(HclElement::Block(&outer));
    let updated = HclTemplate::builder("attr = 1")
        .build()
        .apply(&scope, inner.coordinates().last(), &[])
        .unwrap();

    let Hcl::Block(block) = &updated else {
        panic!("expected the scope block back");
    };
    assert_eq!(block.id(), outer.id());
    assert_eq!(updated.print(), "outer {\n  inner {\n    attr = 1\n  }\n}");
}

#[test]
fn test_append_to_file() {
    let file = parse("a = 1\n");
    let updated = HclTemplate::builder("b = [#{}, #{}]")
        .build()
        .apply_to_file(&file, file.coordinates().last(), &["1", "2"])
        .unwrap();
    assert_eq!(updated.print_all(), "a = 1\nb = [1, 2]\n");
}

#[test]
fn test_replace_block() {
    let file = parse("# keep me\nold {\n  x = 1\n}\nother {}\n");
    let old = file.blocks().next().unwrap().clone();
    let updated = HclTemplate::builder("new #{} {\nx = 2\n}")
        .build()
        .apply_to_file(&file, old.coordinates().replace(), &["\"label\""])
        .unwrap();
    assert_eq!(
        updated.print_all(),
        "# keep me\nnew \"label\" {\n  x = 2\n}\nother {}\n"
    );
}

#[test]
fn test_template_errors_convert_to_lst_errors() {
    let file = parse("a {}\n");
    let err = HclTemplate::builder("#{} = 1")
        .build()
        .apply_to_file(&file, file.coordinates().last(), &[])
        .unwrap_err();
    assert!(matches!(err, TemplateError::ParameterCount { .. }));

    let err = LstError::from(err);
    assert_eq!(err.kind(), ErrorKind::Template);
}
