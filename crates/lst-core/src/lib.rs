//! LST Core
//!
//! Language-independent machinery for Lossless Semantic Trees: immutable
//! syntax trees that keep every byte of whitespace and every comment, so a
//! parsed file prints back exactly and rewrites touch only what they change.
//!
//! Language crates build on these pieces:
//! - [`Space`] and [`Comment`] for formatting as data
//! - [`RightPadded`], [`LeftPadded`] and [`Container`] for positional space
//! - [`Markers`] for typed side-channel metadata
//! - [`Cursor`] for ancestor lookups during a visit
//! - [`Parser`], [`SourceCursor`] and [`ParseErrorTree`] for batch parsing
//! - [`PrintOutputCapture`] for printers

pub mod config;
pub mod cursor;
pub mod error;
pub mod markers;
pub mod padding;
pub mod parser;
pub mod print;
pub mod round_trip;
pub mod source;
pub mod space;
pub mod tree;

pub use config::{ConfigLoader, FormatStyle, LineEnding, LstConfig, ParserOptions};
pub use cursor::{Cursor, Projection};
pub use error::{ErrorKind, LstError, Result, ResultExt};
pub use markers::{Marker, Markers, ParseWarning, RoundTripMismatch, SearchResult};
pub use padding::{Container, LeftPadded, RightPadded};
pub use parser::{
    CollectingErrorSink, ErrorSink, ExecutionContext, Input, InputSource, LoggingErrorSink,
    ParsedInputs, Parser, ReportedError, SourceCursor,
};
pub use print::{MarkerPrinter, PrintOutputCapture};
pub use round_trip::RoundTripResult;
pub use source::{ParseErrorTree, Parsed, SourceFile};
pub use space::{Comment, CommentStyle, CommentSyntax, LineMarker, Space};
pub use tree::{HasMarkers, Same, Tree, TreeId};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    init_tracing_with("lst=info");
}

/// Initialize tracing with a fallback filter used when `RUST_LOG` is unset
pub fn init_tracing_with(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
