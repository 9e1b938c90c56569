//! Pipeline driver
//!
//! Applies the five rewrite stages to every line of a document in fixed
//! order and reassembles the result. The whole source is held in memory;
//! there is no streaming and no state crosses a line boundary.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};
use crate::rules::Stage;

/// File extensions rendered as image embeds by default.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "svg"];

/// Options for the conversion pipeline.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// File extensions (without the dot, matched case-insensitively) that
    /// turn a `[[file:...]]` attachment into an image embed.
    pub image_extensions: Vec<String>,
    /// Language tag used for `#+begin_src` lines that carry none.
    pub default_language: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            default_language: None,
        }
    }
}

impl ConvertOptions {
    /// Whether a file name's extension (text after the final dot) marks it
    /// as an image. Names without a dot never do.
    pub(crate) fn is_image(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, ext)) => self
                .image_extensions
                .iter()
                .any(|image_ext| image_ext.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Convert a whole Org document to Markdown.
///
/// Every line is rewritten independently by each stage in pipeline order.
/// Line terminators are stripped before the stages run and the output is
/// rejoined with `\n`, keeping a trailing newline only if the input had one.
pub fn convert_str(source: &str, options: &ConvertOptions) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let mut line = line.to_string();
        for stage in Stage::PIPELINE {
            line = stage.apply(&line, options);
        }
        out.push_str(&line);
        out.push('\n');
    }
    if !source.ends_with('\n') {
        out.pop();
    }
    out
}

/// Resolve a source path to an absolute location, requiring that it exists.
///
/// This runs before any read attempt so a missing file fails with
/// [`ConvertError::PathNotFound`] rather than a bare I/O error.
pub fn resolve_source(path: &Path) -> ConvertResult<PathBuf> {
    fs::canonicalize(path).map_err(|_| ConvertError::PathNotFound {
        path: path.to_path_buf(),
    })
}

/// Read and convert a source file, returning the Markdown text.
pub fn convert_file(source: &Path, options: &ConvertOptions) -> ConvertResult<String> {
    let source = resolve_source(source)?;
    let text = fs::read_to_string(&source)?;
    Ok(convert_str(&text, options))
}
