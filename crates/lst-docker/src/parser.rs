//! Dockerfile parser
//!
//! The tokenizer finds each instruction's keyword and argument span; the
//! builder below walks those spans with a [`SourceCursor`], so every byte
//! between two significant pieces lands in a [`Space`] and the document
//! prints back unchanged.

use crate::lexer::{self, LogicalLine, Span};
use crate::tree::*;
use lst_core::{
    CommentSyntax, Container, LstError, Markers, ParserOptions, Result, RightPadded, SourceCursor,
    Space, TreeId,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const BOM: char = '\u{feff}';

/// Dockerfile implementation of [`lst_core::Parser`]
#[derive(Debug, Clone, Default)]
pub struct DockerParser {
    options: ParserOptions,
}

impl DockerParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl lst_core::Parser for DockerParser {
    type Source = Document;

    fn accept(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        name == "Dockerfile"
            || name == "Containerfile"
            || name.starts_with("Dockerfile.")
            || path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("dockerfile"))
    }

    fn source_path_from_source_text(&self, prefix: &Path, _text: &str) -> PathBuf {
        prefix.join("Dockerfile")
    }

    fn options(&self) -> ParserOptions {
        self.options
    }

    fn parse_text(&self, path: &Path, text: &str) -> Result<Document> {
        parse_document(path, text, &self.options)
    }
}

/// Parse a whole Dockerfile
pub fn parse_document(path: &Path, text: &str, options: &ParserOptions) -> Result<Document> {
    let bom_len = if text.starts_with(BOM) {
        BOM.len_utf8()
    } else {
        0
    };

    let lexed = lexer::lex(text, bom_len)
        .map_err(|err| LstError::syntax(path, err.offset, err.message))?;
    let syntax = lexed.syntax();

    let mut builder = DocumentBuilder {
        text,
        syntax,
        cursor: SourceCursor::new(path, text, syntax, options),
    };
    builder.cursor.take(bom_len);
    let instructions = lexed
        .lines
        .iter()
        .map(|line| builder.instruction(line))
        .collect::<Result<Vec<_>>>()?;
    let eof = builder.cursor.remaining_space();

    let markers = builder
        .cursor
        .take_warnings()
        .into_iter()
        .fold(Markers::empty(), |markers, warning| markers.add(warning));

    debug!(
        "Parsed {} with {} instructions",
        path.display(),
        instructions.len()
    );
    Ok(Document {
        id: TreeId::random(),
        prefix: Space::EMPTY,
        markers,
        source_path: path.to_path_buf(),
        charset_bom: bom_len > 0,
        escape: lexed.escape,
        instructions,
        eof,
    })
}

/// Offset of the `=` ending a key, unless a quote comes first
fn key_end(word: &str) -> Option<usize> {
    word.find(['=', '"', '\''])
        .filter(|&at| word[at..].starts_with('='))
}

struct DocumentBuilder<'s> {
    text: &'s str,
    syntax: CommentSyntax,
    cursor: SourceCursor<'s>,
}

impl<'s> DocumentBuilder<'s> {
    fn error(&self, offset: usize, message: impl Into<String>) -> LstError {
        LstError::syntax(self.cursor.path(), offset, message)
    }

    fn word(&self, span: &Span) -> &'s str {
        &self.text[span.clone()]
    }

    fn instruction(&mut self, line: &LogicalLine) -> Result<Instruction> {
        let prefix = self.cursor.space_to(line.keyword.start);
        let keyword = self.cursor.take_to(line.keyword.end).to_string();
        let words = lexer::words(self.text, line.arguments.clone(), &self.syntax);

        let kind = InstructionKind::of(&keyword);
        let instruction = if kind == InstructionKind::From {
            Instruction::From(Arc::new(self.from(prefix, keyword, &words, line)?))
        } else if let Some(command) = kind.command_kind() {
            Instruction::Command(Arc::new(
                self.command(command, prefix, keyword, &words, line)?,
            ))
        } else if let Some(key_values) = kind.key_value_kind() {
            Instruction::KeyValues(Arc::new(
                self.key_values(key_values, prefix, keyword, &words, line)?,
            ))
        } else {
            Instruction::Generic(Arc::new(self.generic(kind, prefix, keyword, &words, line)?))
        };
        Ok(instruction)
    }

    fn literal(&mut self, span: &Span) -> Arc<Literal> {
        let prefix = self.cursor.space_to(span.start);
        let text = self.cursor.take_to(span.end);
        Arc::new(Literal::new(prefix, text))
    }

    /// Leading `--flag` words and the words after them
    fn flags<'w>(&mut self, words: &'w [Span]) -> (Vec<Arc<Flag>>, &'w [Span]) {
        let text = self.text;
        let count = words
            .iter()
            .take_while(|word| text[(*word).clone()].starts_with("--"))
            .count();
        let flags = words[..count]
            .iter()
            .map(|word| Arc::new(self.flag(word)))
            .collect();
        (flags, &words[count..])
    }

    fn flag(&mut self, word: &Span) -> Flag {
        let prefix = self.cursor.space_to(word.start);
        self.cursor.take(2);
        let name_end = self
            .word(word)
            .find('=')
            .map(|eq| word.start + eq)
            .unwrap_or(word.end);
        let name = self.cursor.take_to(name_end).to_string();
        let value = (name_end < word.end).then(|| {
            self.cursor.take(1);
            Arc::new(Literal::new(Space::EMPTY, self.cursor.take_to(word.end)))
        });
        Flag {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            name,
            value,
        }
    }

    fn from(
        &mut self,
        prefix: Space,
        keyword: String,
        words: &[Span],
        line: &LogicalLine,
    ) -> Result<FromInstruction> {
        let (flags, rest) = self.flags(words);
        let Some((image, rest)) = rest.split_first() else {
            return Err(self.error(
                line.arguments.end,
                format!("{keyword} requires an image"),
            ));
        };
        let image = self.literal(image);

        let alias = match rest {
            [] => None,
            [as_keyword, name] if self.word(as_keyword).eq_ignore_ascii_case("as") => {
                let prefix = self.cursor.space_to(as_keyword.start);
                let keyword = self.cursor.take_to(as_keyword.end).to_string();
                let name = self.literal(name);
                Some(Arc::new(StageAlias {
                    id: TreeId::random(),
                    prefix,
                    markers: Markers::empty(),
                    keyword,
                    name,
                }))
            }
            [unexpected, ..] => {
                return Err(self.error(
                    unexpected.start,
                    format!("unexpected `{}` after the image", self.word(unexpected)),
                ));
            }
        };

        Ok(FromInstruction {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            keyword,
            flags,
            image,
            alias,
        })
    }

    fn command(
        &mut self,
        kind: CommandKind,
        prefix: Space,
        keyword: String,
        words: &[Span],
        line: &LogicalLine,
    ) -> Result<CommandInstruction> {
        let (flags, rest) = self.flags(words);
        let start = rest.first().map_or(line.arguments.end, |word| word.start);
        let form = match self.exec_form(start..line.arguments.end)? {
            Some(exec) => CommandForm::Exec(exec),
            None => {
                let prefix = self.cursor.space_to(start);
                let text = self.cursor.take_to(line.arguments.end);
                CommandForm::Shell(Arc::new(ShellForm::new(prefix, text)))
            }
        };
        Ok(CommandInstruction {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            kind,
            keyword,
            flags,
            form,
        })
    }

    fn exec_form(&mut self, span: Span) -> Result<Option<Arc<ExecForm>>> {
        let Some(spans) = lexer::exec_form(self.text, span, &self.syntax) else {
            return Ok(None);
        };

        let prefix = self.cursor.space_to(spans.open);
        self.cursor.take(1);
        let count = spans.elements.len();
        let mut arguments = Vec::with_capacity(count);
        for (i, element) in spans.elements.iter().enumerate() {
            let literal = self.literal(element);
            let delimiter = if i + 1 == count { "]" } else { "," };
            let after = self.cursor.source_before(delimiter)?;
            arguments.push(RightPadded::new(literal, after));
        }
        let close = if count == 0 {
            self.cursor.source_before("]")?
        } else {
            Space::EMPTY
        };

        Ok(Some(Arc::new(ExecForm {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            arguments: Container::new(Space::EMPTY, arguments),
            close,
        })))
    }

    fn key_values(
        &mut self,
        kind: KeyValueKind,
        prefix: Space,
        keyword: String,
        words: &[Span],
        line: &LogicalLine,
    ) -> Result<KeyValueInstruction> {
        let Some(first) = words.first() else {
            return Err(self.error(
                line.arguments.end,
                format!("{keyword} requires at least one argument"),
            ));
        };

        let legacy = kind != KeyValueKind::Arg && key_end(self.word(first)).is_none();
        let pairs = if legacy {
            vec![Arc::new(self.legacy_pair(words, line))]
        } else {
            words.iter().map(|word| Arc::new(self.pair(word))).collect()
        };

        Ok(KeyValueInstruction {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            kind,
            keyword,
            pairs,
        })
    }

    fn pair(&mut self, word: &Span) -> KeyValuePair {
        let prefix = self.cursor.space_to(word.start);
        let eq = key_end(self.word(word)).map(|at| word.start + at);
        let key = self.cursor.take_to(eq.unwrap_or(word.end)).to_string();
        let value = eq.map(|_| {
            self.cursor.take(1);
            Arc::new(Literal::new(Space::EMPTY, self.cursor.take_to(word.end)))
        });
        KeyValuePair {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            key,
            separator: Separator::Equals,
            value,
        }
    }

    /// `ENV key the rest of the line`
    fn legacy_pair(&mut self, words: &[Span], line: &LogicalLine) -> KeyValuePair {
        let prefix = self.cursor.space_to(words[0].start);
        let key = self.cursor.take_to(words[0].end).to_string();
        let (separator, value) = match words.get(1) {
            Some(value) => {
                let value = self.literal(&(value.start..line.arguments.end));
                (Separator::Whitespace, Some(value))
            }
            None => (Separator::Equals, None),
        };
        KeyValuePair {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            key,
            separator,
            value,
        }
    }

    fn generic(
        &mut self,
        kind: InstructionKind,
        prefix: Space,
        keyword: String,
        words: &[Span],
        line: &LogicalLine,
    ) -> Result<GenericInstruction> {
        let (flags, rest) = self.flags(words);
        let start = rest.first().map_or(line.arguments.end, |word| word.start);
        let arguments = match self.exec_form(start..line.arguments.end)? {
            Some(exec) => Arguments::Exec(exec),
            None => Arguments::Words(rest.iter().map(|word| self.literal(word)).collect()),
        };
        Ok(GenericInstruction {
            id: TreeId::random(),
            prefix,
            markers: Markers::empty(),
            kind,
            keyword,
            flags,
            arguments,
        })
    }
}
