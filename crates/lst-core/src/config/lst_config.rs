//! Configuration types for the LST tools

use crate::error::{LstError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct LstConfig {
    /// Parser behaviour
    pub parser: ParserOptions,

    /// Formatting applied to generated code
    pub format: FormatStyle,
}

/// Options shared by every language parser
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParserOptions {
    /// Re-print each fresh tree and flag it when it differs from the input
    pub require_print_equals_input: bool,

    /// Treat a missing fixed delimiter as a syntax error instead of a warning
    pub strict_delimiters: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            require_print_equals_input: true,
            strict_delimiters: false,
        }
    }
}

/// Line ending used for generated code
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Follow whatever the surrounding file uses
    #[default]
    Auto,
    Lf,
    #[serde(rename = "crlf")]
    CrLf,
}

/// Formatting for code produced by templates and auto-format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct FormatStyle {
    pub indent_size: usize,
    pub use_tabs: bool,
    pub line_ending: LineEnding,
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self {
            indent_size: 2,
            use_tabs: false,
            line_ending: LineEnding::Auto,
        }
    }
}

impl FormatStyle {
    /// Whitespace for one indentation level
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_size)
        }
    }

    /// Whitespace for `depth` indentation levels
    pub fn indent(&self, depth: usize) -> String {
        self.indent_unit().repeat(depth)
    }

    /// Newline sequence, resolving `Auto` against `sample` text
    pub fn newline(&self, sample: &str) -> &'static str {
        match self.line_ending {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Auto if sample.contains("\r\n") => "\r\n",
            LineEnding::Auto => "\n",
        }
    }
}

impl LstConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LstError::config(format!("Invalid TOML: {e}")))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| LstError::config(format!("Invalid YAML: {e}")))
    }

    /// Load configuration from a file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LstError::io(path, e))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }
}
