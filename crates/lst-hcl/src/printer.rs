//! LST to HCL text
//!
//! [`HclPrinter`] is a visitor that writes every node into a
//! [`PrintOutputCapture`]: prefix first, then fixed syntax interleaved with
//! the recorded spaces. A freshly parsed tree prints back byte for byte.

use crate::tree::*;
use crate::visitor::{HclCursor, HclElement, HclVisitor};
use lst_core::{
    HasMarkers, MarkerPrinter, Markers, PrintOutputCapture, RightPadded, SourceFile, Space, TreeId,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const BOM: &str = "\u{feff}";

/// Visitor that renders HCL trees into a [`PrintOutputCapture`]
#[derive(Debug, Default, Clone, Copy)]
pub struct HclPrinter;

impl HclPrinter {
    /// Print any tree with the given marker rendering
    pub fn print(tree: &Hcl, marker_printer: MarkerPrinter) -> String {
        let mut out = PrintOutputCapture::new(marker_printer);
        let root = HclCursor::root(HclElement::Root);
        crate::visitor::visit_tree(&mut HclPrinter, tree, &root, &mut out);
        out.into_output()
    }

    fn config_file(&mut self, file: &ConfigFile, cursor: &HclCursor<'_>, p: &mut PrintOutputCapture) {
        if file.charset_bom {
            p.append(BOM);
        }
        before_syntax(&file.prefix, &file.markers, p);
        for content in &file.body {
            self.visit_body_content(content, cursor, p);
        }
        p.append_space(&file.eof);
    }

    /// Elements of a delimited list, their separators and the closer
    fn list(
        &mut self,
        elements: &[RightPadded<Expression>],
        separator: &str,
        closer: &str,
        cursor: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) {
        let last = elements.len().saturating_sub(1);
        for (i, element) in elements.iter().enumerate() {
            self.visit_expression(element.element(), cursor, p);
            p.append_space(element.after());
            if i < last {
                p.append(separator);
            } else if let Some(trailing) = element.markers().find_first::<TrailingComma>() {
                p.append(",");
                p.append_space(trailing.suffix());
            }
        }
        p.append(closer);
    }

    fn for_condition(
        &mut self,
        condition: &Option<lst_core::LeftPadded<Expression>>,
        cursor: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) {
        if let Some(condition) = condition {
            p.append_space(condition.before()).append("if");
            self.visit_expression(condition.element(), cursor, p);
        }
    }
}

fn before_syntax(prefix: &Space, markers: &Markers, p: &mut PrintOutputCapture) {
    p.append_space(prefix);
    if let Some(decoration) = p.marker_printer().before_syntax(markers) {
        p.append(&format!("/*{decoration}*/"));
    }
}

impl HclVisitor<PrintOutputCapture> for HclPrinter {
    fn visit_config_file(
        &mut self,
        file: &Arc<ConfigFile>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Arc<ConfigFile> {
        let cursor = parent.push(HclElement::ConfigFile(file));
        self.config_file(file, &cursor, p);
        file.clone()
    }

    fn visit_block(
        &mut self,
        block: &Arc<Block>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Block>> {
        let cursor = parent.push(HclElement::Block(block));
        before_syntax(&block.prefix, &block.markers, p);
        self.visit_identifier(&block.type_name, &cursor, p);
        for label in &block.labels {
            self.visit_expression(label, &cursor, p);
        }
        p.append_space(&block.open).append("{");
        for content in &block.body {
            self.visit_body_content(content, &cursor, p);
        }
        p.append_space(&block.end).append("}");
        Some(block.clone())
    }

    fn visit_attribute(
        &mut self,
        attribute: &Arc<Attribute>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Attribute>> {
        let cursor = parent.push(HclElement::Attribute(attribute));
        before_syntax(&attribute.prefix, &attribute.markers, p);
        self.visit_expression(&attribute.name, &cursor, p);
        p.append_space(attribute.type_.before())
            .append(attribute.type_.element().as_str());
        self.visit_expression(&attribute.value, &cursor, p);
        if let Some(comma) = &attribute.comma {
            p.append_space(comma).append(",");
        }
        Some(attribute.clone())
    }

    fn visit_attribute_access(
        &mut self,
        access: &Arc<AttributeAccess>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<AttributeAccess>> {
        let cursor = parent.push(HclElement::AttributeAccess(access));
        before_syntax(&access.prefix, &access.markers, p);
        self.visit_expression(&access.object, &cursor, p);
        p.append_space(access.name.before()).append(".");
        self.visit_identifier(access.name.element(), &cursor, p);
        Some(access.clone())
    }

    fn visit_binary(
        &mut self,
        binary: &Arc<Binary>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Binary>> {
        let cursor = parent.push(HclElement::Binary(binary));
        before_syntax(&binary.prefix, &binary.markers, p);
        self.visit_expression(&binary.left, &cursor, p);
        p.append_space(binary.operator.before())
            .append(binary.operator.element().as_str());
        self.visit_expression(&binary.right, &cursor, p);
        Some(binary.clone())
    }

    fn visit_conditional(
        &mut self,
        conditional: &Arc<Conditional>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Conditional>> {
        let cursor = parent.push(HclElement::Conditional(conditional));
        before_syntax(&conditional.prefix, &conditional.markers, p);
        self.visit_expression(&conditional.condition, &cursor, p);
        p.append_space(conditional.true_part.before()).append("?");
        self.visit_expression(conditional.true_part.element(), &cursor, p);
        p.append_space(conditional.false_part.before()).append(":");
        self.visit_expression(conditional.false_part.element(), &cursor, p);
        Some(conditional.clone())
    }

    fn visit_empty(
        &mut self,
        empty: &Arc<Empty>,
        _parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Empty>> {
        before_syntax(&empty.prefix, &empty.markers, p);
        Some(empty.clone())
    }

    fn visit_for_intro(
        &mut self,
        intro: &Arc<ForIntro>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<ForIntro>> {
        let cursor = parent.push(HclElement::ForIntro(intro));
        before_syntax(&intro.prefix, &intro.markers, p);
        p.append("for").append_space(intro.variables.before());
        let variables = intro.variables.padded_elements();
        let last = variables.len().saturating_sub(1);
        for (i, variable) in variables.iter().enumerate() {
            self.visit_identifier(variable.element(), &cursor, p);
            p.append_space(variable.after())
                .append(if i < last { "," } else { "in" });
        }
        self.visit_expression(&intro.input, &cursor, p);
        Some(intro.clone())
    }

    fn visit_for_object(
        &mut self,
        for_object: &Arc<ForObject>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<ForObject>> {
        let cursor = parent.push(HclElement::ForObject(for_object));
        before_syntax(&for_object.prefix, &for_object.markers, p);
        p.append("{");
        self.visit_for_intro(&for_object.intro, &cursor, p);
        p.append_space(for_object.update_name.before()).append(":");
        self.visit_expression(for_object.update_name.element(), &cursor, p);
        p.append_space(for_object.update_value.before()).append("=>");
        self.visit_expression(for_object.update_value.element(), &cursor, p);
        if let Some(ellipsis) = &for_object.ellipsis {
            p.append_space(ellipsis).append("...");
        }
        self.for_condition(&for_object.condition, &cursor, p);
        p.append_space(&for_object.end).append("}");
        Some(for_object.clone())
    }

    fn visit_for_tuple(
        &mut self,
        for_tuple: &Arc<ForTuple>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<ForTuple>> {
        let cursor = parent.push(HclElement::ForTuple(for_tuple));
        before_syntax(&for_tuple.prefix, &for_tuple.markers, p);
        p.append("[");
        self.visit_for_intro(&for_tuple.intro, &cursor, p);
        p.append_space(for_tuple.update.before()).append(":");
        self.visit_expression(for_tuple.update.element(), &cursor, p);
        self.for_condition(&for_tuple.condition, &cursor, p);
        p.append_space(&for_tuple.end).append("]");
        Some(for_tuple.clone())
    }

    fn visit_function_call(
        &mut self,
        call: &Arc<FunctionCall>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<FunctionCall>> {
        let cursor = parent.push(HclElement::FunctionCall(call));
        before_syntax(&call.prefix, &call.markers, p);
        self.visit_identifier(&call.name, &cursor, p);
        p.append_space(call.arguments.before()).append("(");
        self.list(call.arguments.padded_elements(), ",", ")", &cursor, p);
        Some(call.clone())
    }

    fn visit_heredoc_template(
        &mut self,
        heredoc: &Arc<HeredocTemplate>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<HeredocTemplate>> {
        let cursor = parent.push(HclElement::HeredocTemplate(heredoc));
        before_syntax(&heredoc.prefix, &heredoc.markers, p);
        p.append(heredoc.arrow.as_str())
            .append(&heredoc.delimiter.name);
        for part in &heredoc.expressions {
            self.visit_expression(part, &cursor, p);
        }
        p.append_space(&heredoc.end).append(&heredoc.delimiter.name);
        Some(heredoc.clone())
    }

    fn visit_identifier(
        &mut self,
        identifier: &Arc<Identifier>,
        _parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Identifier>> {
        before_syntax(&identifier.prefix, &identifier.markers, p);
        p.append(&identifier.name);
        Some(identifier.clone())
    }

    fn visit_index(
        &mut self,
        index: &Arc<Index>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Index>> {
        let cursor = parent.push(HclElement::Index(index));
        before_syntax(&index.prefix, &index.markers, p);
        self.visit_expression(&index.object, &cursor, p);
        p.append_space(&index.open).append("[");
        self.visit_expression(index.position.element(), &cursor, p);
        p.append_space(index.position.after()).append("]");
        Some(index.clone())
    }

    fn visit_literal(
        &mut self,
        literal: &Arc<Literal>,
        _parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Literal>> {
        before_syntax(&literal.prefix, &literal.markers, p);
        p.append(&literal.value_source);
        Some(literal.clone())
    }

    fn visit_object_value(
        &mut self,
        object: &Arc<ObjectValue>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<ObjectValue>> {
        let cursor = parent.push(HclElement::ObjectValue(object));
        before_syntax(&object.prefix, &object.markers, p);
        p.append("{").append_space(object.arguments.before());
        // element commas are printed by the attributes themselves
        self.list(object.arguments.padded_elements(), "", "}", &cursor, p);
        Some(object.clone())
    }

    fn visit_parentheses(
        &mut self,
        parentheses: &Arc<Parentheses>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Parentheses>> {
        let cursor = parent.push(HclElement::Parentheses(parentheses));
        before_syntax(&parentheses.prefix, &parentheses.markers, p);
        p.append("(");
        self.visit_expression(parentheses.expression.element(), &cursor, p);
        p.append_space(parentheses.expression.after()).append(")");
        Some(parentheses.clone())
    }

    fn visit_quoted_template(
        &mut self,
        template: &Arc<QuotedTemplate>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<QuotedTemplate>> {
        let cursor = parent.push(HclElement::QuotedTemplate(template));
        before_syntax(&template.prefix, &template.markers, p);
        p.append("\"");
        for part in &template.expressions {
            self.visit_expression(part, &cursor, p);
        }
        p.append("\"");
        Some(template.clone())
    }

    fn visit_splat(
        &mut self,
        splat: &Arc<Splat>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Splat>> {
        let cursor = parent.push(HclElement::Splat(splat));
        before_syntax(&splat.prefix, &splat.markers, p);
        self.visit_expression(&splat.object, &cursor, p);
        let operator = splat.operator.element();
        p.append_space(splat.operator.before());
        match operator.kind {
            SplatKind::Attribute => {
                p.append(".").append_space(&operator.star).append("*");
            }
            SplatKind::Full => {
                p.append("[")
                    .append_space(&operator.star)
                    .append("*")
                    .append_space(&operator.close)
                    .append("]");
            }
        }
        Some(splat.clone())
    }

    fn visit_template_interpolation(
        &mut self,
        interpolation: &Arc<TemplateInterpolation>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<TemplateInterpolation>> {
        let cursor = parent.push(HclElement::TemplateInterpolation(interpolation));
        before_syntax(&interpolation.prefix, &interpolation.markers, p);
        p.append("${");
        self.visit_expression(interpolation.expression.element(), &cursor, p);
        p.append_space(interpolation.expression.after()).append("}");
        Some(interpolation.clone())
    }

    fn visit_tuple(
        &mut self,
        tuple: &Arc<Tuple>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Tuple>> {
        let cursor = parent.push(HclElement::Tuple(tuple));
        before_syntax(&tuple.prefix, &tuple.markers, p);
        p.append("[").append_space(tuple.values.before());
        self.list(tuple.values.padded_elements(), ",", "]", &cursor, p);
        Some(tuple.clone())
    }

    fn visit_unary(
        &mut self,
        unary: &Arc<Unary>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<Unary>> {
        let cursor = parent.push(HclElement::Unary(unary));
        before_syntax(&unary.prefix, &unary.markers, p);
        p.append(unary.operator.as_str());
        self.visit_expression(&unary.expression, &cursor, p);
        Some(unary.clone())
    }

    fn visit_variable_expression(
        &mut self,
        variable: &Arc<VariableExpression>,
        parent: &HclCursor<'_>,
        p: &mut PrintOutputCapture,
    ) -> Option<Arc<VariableExpression>> {
        let cursor = parent.push(HclElement::VariableExpression(variable));
        before_syntax(&variable.prefix, &variable.markers, p);
        self.visit_identifier(&variable.name, &cursor, p);
        Some(variable.clone())
    }
}

impl SourceFile for ConfigFile {
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
        let root = HclCursor::root(HclElement::Root);
        HclPrinter.config_file(self, &root, &mut out);
        out.into_output()
    }
}

/// Print a whole file, rendering markers with `marker_printer`
pub fn print_config_file(file: &ConfigFile, marker_printer: MarkerPrinter) -> String {
    file.print_with(marker_printer)
}

impl Hcl {
    /// Source text of this tree, markers not rendered
    pub fn print(&self) -> String {
        HclPrinter::print(self, MarkerPrinter::Sanitized)
    }
}

impl Expression {
    /// Source text of this expression including its prefix
    pub fn print(&self) -> String {
        HclPrinter::print(&Hcl::Expression(self.clone()), MarkerPrinter::Sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_config_file;
    use lst_core::ParserOptions;

    fn round_trip(text: &str) {
        let file = parse_config_file(Path::new("t.tf"), text, &ParserOptions::default()).unwrap();
        assert_eq!(file.print_sanitized(), text);
    }

    #[test]
    fn prints_attributes_and_blocks() {
        round_trip("a = 1\n");
        round_trip("# header\nresource \"aws_instance\" \"web\" {\n  ami   = \"abc\" # pinned\n\n  count = 2\n}\n");
        round_trip("empty {}\nnested {\n  inner label {\n  }\n}");
    }

    #[test]
    fn prints_expressions() {
        round_trip("x = a ? b : -c\n");
        round_trip("x = (1 + 2) * 3 % 4 >= 5 && !d || e != null\n");
        round_trip("x = f( 1 , \"two\" ,[ 3 ] )\n");
        round_trip("x = var.list[*].id\ny = var.list.*.name\nz = m[ \"k\" ].v\n");
        round_trip("x = [ ]\ny = {}\nz = f()\n");
    }

    #[test]
    fn prints_collections() {
        round_trip("x = [\n  1,\n  2, # two\n]\n");
        round_trip("x = {\n  a = 1\n  \"b\" : 2,\n  c = [3]\n}\n");
        round_trip("x = { a = 1, b = 2 }\n");
    }

    #[test]
    fn prints_for_expressions() {
        round_trip("x = [ for i, v in var.l : v * 2 if i > 0 ]\n");
        round_trip("x = {for k, v in var.m : k => v... }\n");
    }

    #[test]
    fn prints_templates() {
        round_trip("x = \"hello ${ var.name }!\"\ny = \"$${literal}\"\n");
        round_trip("x = <<EOT\nline ${a}\n  two\nEOT\ny = <<-EOT\n    indented\n    EOT\n");
    }

    #[test]
    fn prints_bom() {
        round_trip("\u{feff}a = 1\n");
    }

    #[test]
    fn search_results_decorate_nodes() {
        let file = parse_config_file(Path::new("t.tf"), "a = 1\n", &ParserOptions::default())
            .unwrap();
        let attribute = file.attributes().next().unwrap();
        let marked = attribute.with_markers(attribute.markers().search_result(None));
        let file = file.with_body(vec![BodyContent::Attribute(marked)]);
        assert_eq!(file.print_all(), "/*~~>*/a = 1\n");
        assert_eq!(file.print_sanitized(), "a = 1\n");
    }

    #[test]
    fn expressions_print_alone() {
        let file = parse_config_file(Path::new("t.tf"), "a = f(x)\n", &ParserOptions::default())
            .unwrap();
        let value = file.attributes().next().unwrap().value().clone();
        assert_eq!(value.print(), " f(x)");
    }

    #[test]
    fn marked_expressions_keep_their_kind() {
        let file = parse_config_file(Path::new("t.tf"), "a = f(x)\n", &ParserOptions::default())
            .unwrap();
        let value = file.attributes().next().unwrap().value().clone();
        let marked = value.with_markers(value.markers().search_result(Some("call")));
        assert_eq!(marked.kind_name(), "FunctionCall");
        assert_eq!(
            HclPrinter::print(&Hcl::Expression(marked), MarkerPrinter::Default),
            " /*~~(call)~~>*/f(x)"
        );
        assert!(lst_core::Same::same(
            &value.with_markers(value.markers().clone()),
            &value
        ));
    }
}
