//! org2md-core: Core library for converting Org outline markup to Markdown
//!
//! This crate provides:
//! - The five line rewrite rules (headers, emphasis, links, code blocks, lists)
//! - The fixed-order pipeline applying every rule to every line
//! - Path resolution and file-level conversion for the CLI driver
//!
//! The converter is a single-pass text transducer, not a parser: each line is
//! rewritten in isolation from its neighbors, and markup it cannot match
//! passes through unchanged rather than raising an error.

pub mod convert;
pub mod error;
pub mod rules;

pub use convert::{
    ConvertOptions, DEFAULT_IMAGE_EXTENSIONS, convert_file, convert_str, resolve_source,
};
pub use error::{ConvertError, ConvertResult};
pub use rules::Stage;
