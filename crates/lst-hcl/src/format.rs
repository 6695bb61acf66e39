//! Auto-format for HCL subtrees
//!
//! Templates splice freshly parsed code into an existing file; [`AutoFormat`]
//! gives that code the indentation of where it lands. Only the visited
//! subtree is touched, and nodes that already conform come back as the same
//! `Arc`.

use crate::tree::*;
use crate::visitor::{
    HclCursor, HclElement, HclVisitor, visit_tree, walk_attribute, walk_block, walk_config_file,
};
use lst_core::{FormatStyle, LineEnding, Same, Space};
use std::sync::Arc;

/// Visitor normalizing body indentation, block closes and `=` spacing
#[derive(Debug, Clone)]
pub struct AutoFormat {
    style: FormatStyle,
    newline: &'static str,
    /// Nesting depth of the subtree root within its file
    base_depth: usize,
}

impl AutoFormat {
    pub fn new(style: FormatStyle) -> Self {
        Self {
            style,
            newline: style.newline(""),
            base_depth: 0,
        }
    }

    /// Resolve an `Auto` line ending against text of the target file
    pub fn with_line_endings_of(mut self, sample: &str) -> Self {
        self.newline = self.style.newline(sample);
        self
    }

    pub fn at_depth(mut self, depth: usize) -> Self {
        self.base_depth = depth;
        self
    }

    pub fn depth(&self) -> usize {
        self.base_depth
    }

    /// Format a subtree in isolation
    pub fn format(&mut self, tree: &Hcl) -> Hcl {
        let root = HclCursor::root(HclElement::Root);
        visit_tree(self, tree, &root, &mut ()).unwrap_or_else(|| tree.clone())
    }

    /// Format a body item about to be placed at the base depth
    ///
    /// The item's own prefix is moved to a fresh line as well.
    pub fn format_body_content(&mut self, content: &BodyContent) -> BodyContent {
        let root = HclCursor::root(HclElement::Root);
        let content = self
            .visit_body_content(content, &root, &mut ())
            .unwrap_or_else(|| content.clone());
        let prefix = self.line_start(content.prefix(), self.base_depth);
        if prefix == *content.prefix() {
            content
        } else {
            content.with_prefix(prefix)
        }
    }

    /// `space` ending in a newline and indentation for `depth`
    ///
    /// Blank lines already present are kept. A space whose newline sits
    /// before a trailing comment is left alone.
    pub(crate) fn line_start(&self, space: &Space, depth: usize) -> Space {
        let last = space.last_whitespace();
        if !last.contains('\n') && space.contains_newline() {
            return space.clone();
        }
        let lines = last.matches('\n').count().max(1);
        let whitespace = format!("{}{}", self.newline.repeat(lines), self.style.indent(depth));
        if last == whitespace {
            space.clone()
        } else {
            space.with_last_whitespace(whitespace)
        }
    }

    fn indent_body(&self, body: &[BodyContent], depth: usize, file_start: bool) -> Vec<BodyContent> {
        body.iter()
            .enumerate()
            .map(|(i, content)| {
                let prefix = content.prefix();
                if i == 0 && file_start && !prefix.contains_newline() {
                    return content.clone();
                }
                let normalized = self.line_start(prefix, depth);
                if normalized == *prefix {
                    content.clone()
                } else {
                    content.with_prefix(normalized)
                }
            })
            .collect()
    }
}

/// One space, unless `space` holds a comment or a line break
fn single_space(space: &Space) -> Space {
    if space.comments().is_empty() && !space.contains_newline() {
        Space::single_space()
    } else {
        space.clone()
    }
}

impl HclVisitor<()> for AutoFormat {
    fn visit_config_file(
        &mut self,
        file: &Arc<ConfigFile>,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Arc<ConfigFile> {
        let visited = walk_config_file(self, file, cursor, p);
        let body = self.indent_body(&visited.body, self.base_depth, true);
        if body.same(&visited.body) {
            return visited;
        }
        Arc::new(visited.with_body(body))
    }

    fn visit_block(
        &mut self,
        block: &Arc<Block>,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Option<Arc<Block>> {
        let depth = self.base_depth + cursor.count_enclosing::<&Arc<Block>>();
        let visited = walk_block(self, block, cursor, p)?;
        let body = self.indent_body(&visited.body, depth + 1, false);
        let end = if body.is_empty() && !visited.end.contains_newline() {
            visited.end.clone()
        } else {
            self.line_start(&visited.end, depth)
        };
        if body.same(&visited.body) && end == visited.end {
            return Some(visited);
        }
        Some(Arc::new(Block {
            body,
            end,
            ..(*visited).clone()
        }))
    }

    fn visit_attribute(
        &mut self,
        attribute: &Arc<Attribute>,
        cursor: &HclCursor<'_>,
        p: &mut (),
    ) -> Option<Arc<Attribute>> {
        let visited = walk_attribute(self, attribute, cursor, p)?;
        if visited.type_() != AttributeType::Assignment {
            return Some(visited);
        }
        let before = single_space(visited.type_.before());
        let value_prefix = single_space(visited.value.prefix());
        if before == *visited.type_.before() && value_prefix == *visited.value.prefix() {
            return Some(visited);
        }
        Some(Arc::new(Attribute {
            type_: visited.type_.clone().with_before(before),
            value: visited.value.with_prefix(value_prefix),
            ..(*visited).clone()
        }))
    }
}

/// Indentation and line endings used by an existing file
///
/// Falls back to the defaults of [`FormatStyle`] for anything the file does
/// not show.
pub fn detect_style(file: &ConfigFile) -> FormatStyle {
    let mut style = FormatStyle::default();

    let indents: Vec<&str> = file
        .blocks()
        .flat_map(|block| block.body.iter())
        .map(|content| content.prefix().indent())
        .filter(|indent| !indent.is_empty())
        .collect();
    if let Some(first) = indents.first() {
        if first.starts_with('\t') {
            style.use_tabs = true;
        } else if let Some(size) = indents
            .iter()
            .filter(|indent| indent.chars().all(|c| c == ' '))
            .map(|indent| indent.len())
            .min()
        {
            style.indent_size = size;
        }
    }

    let crlf = file
        .body
        .iter()
        .any(|content| content.prefix().whitespace().contains("\r\n"))
        || file.eof.whitespace().contains("\r\n");
    if crlf {
        style.line_ending = LineEnding::CrLf;
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_config_file;
    use lst_core::{ParserOptions, SourceFile};
    use std::path::Path;

    fn parse(text: &str) -> Arc<ConfigFile> {
        Arc::new(parse_config_file(Path::new("t.tf"), text, &ParserOptions::default()).unwrap())
    }

    fn format(text: &str) -> String {
        let mut formatter = AutoFormat::new(FormatStyle::default());
        formatter.visit(&parse(text), &mut ()).print_sanitized()
    }

    #[test]
    fn indents_nested_blocks() {
        assert_eq!(
            format("a {\nb = 1\n    c {\n}\n}\n"),
            "a {\n  b = 1\n  c {\n  }\n}\n"
        );
    }

    #[test]
    fn single_spaces_around_assignment() {
        assert_eq!(format("a {\nx=1\n}\n"), "a {\n  x = 1\n}\n");
    }

    #[test]
    fn keeps_blank_lines_and_comments() {
        let text = "a {\n  x = 1\n\n  # note\n  y = 2\n}\n";
        assert_eq!(format(text), text);
    }

    #[test]
    fn formatted_file_is_returned_as_is() {
        let file = parse("a {\n  x = 1\n}\n");
        let formatted = AutoFormat::new(FormatStyle::default()).visit(&file, &mut ());
        assert!(Arc::ptr_eq(&file, &formatted));
    }

    #[test]
    fn body_content_at_depth() {
        let file = parse("inner {\nx = 1\n}\n");
        let block = file.body()[0].clone();
        let formatted = AutoFormat::new(FormatStyle::default())
            .at_depth(1)
            .format_body_content(&block);
        let printed = Hcl::from(formatted).print();
        assert_eq!(printed, "\n  inner {\n    x = 1\n  }");
    }

    #[test]
    fn detects_indentation() {
        let style = detect_style(&parse("a {\n    b = 1\n    c {\n        d = 2\n    }\n}\n"));
        assert_eq!(style.indent_size, 4);
        assert!(!style.use_tabs);

        let style = detect_style(&parse("a {\n\tb = 1\n}\n"));
        assert!(style.use_tabs);

        let style = detect_style(&parse("a {\r\n  b = 1\r\n}\r\n"));
        assert_eq!(style.line_ending, LineEnding::CrLf);
    }
}
