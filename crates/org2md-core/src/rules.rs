//! Line rewrite rules
//!
//! Each rule is a pure function from one line (without its terminator) to
//! its rewritten form. Rules are stateless and applied independently to
//! every line; the closed set is enumerated by [`Stage`] and dispatched in
//! fixed pipeline order. A line the rule cannot match passes through
//! unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::ConvertOptions;

/// A single rewrite stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Leading `*` header markers become `#` markers.
    Headers,
    /// Inline `*bold*`, `/italic/`, `~code~` and `=verbatim=` spans.
    Emphasis,
    /// `[[url][label]]` and `[[file:path]]` link forms.
    Links,
    /// `#+begin_src` / `#+end_src` directives become backtick fences.
    CodeBlocks,
    /// Reserved stage for bullet normalization; currently a no-op.
    Lists,
}

impl Stage {
    /// All stages in pipeline order.
    pub const PIPELINE: [Stage; 5] = [
        Stage::Headers,
        Stage::Emphasis,
        Stage::Links,
        Stage::CodeBlocks,
        Stage::Lists,
    ];

    /// Apply this stage to a single line.
    pub fn apply(self, line: &str, options: &ConvertOptions) -> String {
        match self {
            Stage::Headers => convert_headers(line),
            Stage::Emphasis => convert_emphasis(line),
            Stage::Links => convert_links(line, options),
            Stage::CodeBlocks => convert_code_blocks(line, options),
            Stage::Lists => convert_lists(line),
        }
    }
}

// ---------------------------------------------------------------------------
// Headers

/// One or more leading stars, whitespace, then content that does not start
/// with another star. Anything else that begins with `*` is left alone so
/// that bullet-like or malformed lines survive untouched.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\*+)(\s+)([^*].*)$").unwrap());

fn convert_headers(line: &str) -> String {
    if !line.starts_with('*') {
        return line.to_string();
    }
    match HEADER_RE.captures(line) {
        Some(caps) => format!("{}{}{}", "#".repeat(caps[1].len()), &caps[2], &caps[3]),
        None => line.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Emphasis

/// Emphasis families in fixed processing order: bold, italic, inline code,
/// verbatim. Each entry pairs the Org delimiter with its Markdown marker.
/// Overlapping candidates from different families are resolved by this
/// order, not by textual position.
const EMPHASIS_FAMILIES: [(char, &str); 4] = [('*', "**"), ('/', "_"), ('~', "`"), ('=', "`")];

static EMPHASIS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    EMPHASIS_FAMILIES
        .iter()
        .map(|(delimiter, _)| {
            let d = regex::escape(&delimiter.to_string());
            // The opening delimiter must sit at line start or after
            // whitespace, the closing one at line end or before whitespace.
            // Content is non-empty, free of the delimiter, shortest match.
            // The regex crate has no lookaround, so the boundary characters
            // are part of the match and rewrite_family resumes the scan on
            // the closing boundary.
            Regex::new(&format!(r"(?:^|\s){d}(?P<body>[^\s{d}][^{d}]*?){d}(?:\s|$)")).unwrap()
        })
        .collect()
});

fn convert_emphasis(line: &str) -> String {
    let mut line = line.to_string();
    for (re, (_, marker)) in EMPHASIS_PATTERNS.iter().zip(EMPHASIS_FAMILIES.iter()) {
        line = rewrite_family(&line, re, marker);
    }
    line
}

/// Rewrite every span of one emphasis family on the line.
///
/// The whitespace that closes one span may open the next (`*a* *b*`), so the
/// scan resumes at the closing boundary rather than past the whole match.
fn rewrite_family(line: &str, re: &Regex, marker: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pos = 0;
    while let Some(caps) = re.captures_at(line, pos) {
        let Some(body) = caps.name("body") else {
            break;
        };
        // Delimiters are single ASCII characters on both sides of the body.
        let open = body.start() - 1;
        let close = body.end();
        out.push_str(&line[pos..open]);
        out.push_str(marker);
        out.push_str(body.as_str());
        out.push_str(marker);
        pos = close + 1;
    }
    out.push_str(&line[pos..]);
    out
}

// ---------------------------------------------------------------------------
// Links

static EXTERNAL_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(https?://.+?)\]\[(.+?)\]\]").unwrap());

static FILE_LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[file:(.+?)\]\]").unwrap());

fn convert_links(line: &str, options: &ConvertOptions) -> String {
    // External links: [[https://host/page][Label]] -> [Label](https://host/page)
    let line = EXTERNAL_LINK_RE.replace_all(line, |caps: &regex::Captures| {
        format!("[{}]({})", caps[2].trim(), caps[1].trim())
    });

    // File attachments: image extensions embed, everything else links.
    FILE_LINK_RE
        .replace_all(&line, |caps: &regex::Captures| {
            let path = caps[1].trim();
            let name = path.rsplit('/').next().unwrap_or(path);
            if options.is_image(name) {
                format!("![{name}]({path})")
            } else {
                format!("[{name}]({path})")
            }
        })
        .into_owned()
}

// ---------------------------------------------------------------------------
// Code blocks

const FENCE: &str = "```";
const BLOCK_OPEN: &str = "#+begin_src";
const BLOCK_CLOSE: &str = "#+end_src";

fn convert_code_blocks(line: &str, options: &ConvertOptions) -> String {
    let line = match line.strip_prefix(BLOCK_OPEN) {
        Some(rest) => {
            let lang = rest.trim();
            if lang.is_empty() {
                match &options.default_language {
                    Some(lang) => format!("{FENCE}{lang}"),
                    None => FENCE.to_string(),
                }
            } else {
                format!("{FENCE}{lang}")
            }
        }
        None => line.to_string(),
    };
    // The close marker is replaced wherever it occurs, not only as a prefix.
    line.replace(BLOCK_CLOSE, FENCE)
}

// ---------------------------------------------------------------------------
// Lists

fn convert_lists(line: &str) -> String {
    // Reserved for bullet-indentation normalization. The stage stays in the
    // pipeline as a pass-through so its position is fixed for later use.
    line.to_string()
}
