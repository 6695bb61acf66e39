//! HCL Lossless Semantic Trees
//!
//! Parses `.hcl`, `.tf` and `.tfvars` files into immutable trees that print
//! back byte for byte, and provides the tools to change them:
//! - [`HclVisitor`] with `walk_*` defaults that share untouched subtrees
//! - [`HclPrinter`] for source text, optionally with search-result markers
//! - [`AutoFormat`] to indent code where it lands
//! - [`HclTemplate`] to splice parsed snippets at a coordinate

pub mod format;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod printer;
pub mod template;
pub mod tree;
pub mod visitor;

pub use format::{AutoFormat, detect_style};
pub use location::Location;
pub use parser::{HclParser, parse_config_file, parse_expression};
pub use printer::{HclPrinter, print_config_file};
pub use template::{
    Comparator, CoordinateBuilder, Coordinates, HclCoordinates, HclTemplate, HclTemplateBuilder,
    InsertMode, TemplateError,
};
pub use tree::*;
pub use visitor::{HclCursor, HclElement, HclVisitable, HclVisitor, visit_tree};
