//! Dockerfile Lossless Semantic Trees
//!
//! Parses Dockerfiles into immutable trees that print back byte for byte,
//! continuations, comments inside them and `# escape=` directives included.
//! Instructions worth editing get their own node kinds; [`DockerVisitor`]
//! rewrites them with structural sharing.

pub mod lexer;
pub mod location;
pub mod parser;
pub mod printer;
pub mod tree;
pub mod visitor;

pub use location::Location;
pub use parser::{DockerParser, parse_document};
pub use printer::{DockerPrinter, print_document};
pub use tree::*;
pub use visitor::{DockerCursor, DockerElement, DockerVisitor, visit_tree};
