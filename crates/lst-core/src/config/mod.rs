//! Configuration system
//!
//! Configuration is read from TOML (`lst.toml`, `.lst.toml`) or YAML
//! (`lst.yaml`). When no explicit path is given, the loader searches from the
//! current directory up to the filesystem root, and falls back to defaults.
//!
//! ## Example Configuration
//!
//! ```toml
//! [parser]
//! require-print-equals-input = true
//! strict-delimiters = false
//!
//! [format]
//! indent-size = 2
//! use-tabs = false
//! line-ending = "auto"
//! ```

mod loader;
mod lst_config;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use lst_config::{FormatStyle, LineEnding, LstConfig, ParserOptions};
