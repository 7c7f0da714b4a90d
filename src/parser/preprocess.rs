//! Whole-text rewrites applied to the function catalog before block scanning.
//!
//! Each step takes the previous text and returns a new one; order matters.

use std::ops::Range;

/// A named rewrite over the whole document.
pub struct PreprocessStep {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Umbrella sections that wrap every function resource in `scfuncs.src`.
/// Removing them lifts the inner resources to the scanned level.
const UMBRELLA_MARKERS: &[&str] = &[
    "Resource RID_SC_FUNCTION_DESCRIPTIONS1\n{",
    "};\n\nResource RID_SC_FUNCTION_DESCRIPTIONS2\n{",
];

const U2S_GUARD: &str = "#if defined(U2S)\n#undef U2S\n#endif";

pub const CATALOG_STEPS: &[PreprocessStep] = &[
    PreprocessStep {
        name: "strip-block-comments",
        apply: strip_block_comments,
    },
    PreprocessStep {
        name: "remove-umbrella-markers",
        apply: remove_umbrella_markers,
    },
    PreprocessStep {
        name: "remove-u2s-guard",
        apply: remove_u2s_guard,
    },
    PreprocessStep {
        name: "drop-trailing-closer",
        apply: drop_trailing_closer,
    },
];

/// Run `steps` in order over `input`.
pub fn apply_steps(input: &str, steps: &[PreprocessStep]) -> String {
    steps.iter().fold(input.to_string(), |text, step| {
        let out = (step.apply)(&text);
        tracing::trace!(
            step = step.name,
            before = text.len(),
            after = out.len(),
            "preprocess"
        );
        out
    })
}

/// Byte ranges of `/* ... */` comments, delimiters included.
///
/// Comments do not nest: each ends at the first `*/` after its `/*`.
/// An unterminated `/*` ends the scan.
fn block_comments(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(start) = text[pos..].find("/*").map(|i| pos + i) {
        let Some(end) = text[start + 2..].find("*/").map(|i| start + 2 + i + 2) else {
            break;
        };
        spans.push(start..end);
        pos = end;
    }

    spans
}

/// The first block comment mentioning "License", collapsed to one line.
pub fn extract_license(text: &str) -> Option<String> {
    block_comments(text)
        .into_iter()
        .map(|span| &text[span])
        .find(|comment| comment.contains("License"))
        .map(collapse_license)
}

fn collapse_license(comment: &str) -> String {
    comment
        .trim()
        .trim_matches('/')
        .trim_matches('*')
        .replace("\n * ", "\n")
        .replace('\n', " ")
        .trim()
        .to_string()
}

pub fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for span in block_comments(text) {
        out.push_str(&text[pos..span.start]);
        pos = span.end;
    }
    out.push_str(&text[pos..]);
    out
}

pub fn remove_umbrella_markers(text: &str) -> String {
    UMBRELLA_MARKERS
        .iter()
        .fold(text.to_string(), |acc, marker| acc.replace(marker, ""))
}

pub fn remove_u2s_guard(text: &str) -> String {
    text.replace(U2S_GUARD, "")
}

/// Drop the column-0 closer left behind by the last umbrella section.
///
/// Indented closers belong to real resources and are kept.
pub fn drop_trailing_closer(text: &str) -> String {
    let trimmed = text.trim_end();
    let last_line = trimmed.rfind('\n').map_or(trimmed, |i| &trimmed[i + 1..]);
    if last_line == "};" {
        trimmed[..trimmed.len() - 2].trim_end().to_string()
    } else {
        trimmed.to_string()
    }
}
