//! Main-source isolation: everything outside function bodies.
//!
//! The result of isolation becomes the body of the generated main routine,
//! so the algorithm must degrade gracefully on malformed input rather than
//! fail: unbalanced delimiters and missing braces are treated as "the body
//! runs to end of input", and a source with no definitions at all is
//! returned verbatim.

use std::sync::OnceLock;

use regex::Regex;

use crate::language::GuestLanguage;

/// Marker token the upstream pass appends after each Python function
/// definition. Indentation-significant syntax cannot be delimited by brace
/// counting, so extraction relies on this explicit sentinel instead.
pub const PYTHON_FUNC_END: &str = "#fn_end";

/// Extract the concatenation of every source span not enclosed by a
/// function body.
pub fn isolate_main_source(language: GuestLanguage, source: &str) -> String {
    match language {
        GuestLanguage::Js => {
            isolate_brace_counted(source, language.function_keyword())
        }
        GuestLanguage::Python => strip_sentinel_functions(source),
    }
}

/// Brace-counting variant for `keyword name(...) { ... }` definitions.
///
/// For each keyword occurrence, the body is the span from the first `{`
/// after the keyword to the delimiter that returns nesting depth to zero.
/// The output is the text before the first keyword, the text between
/// consecutive bodies, and the text after the last body through end of
/// input.
fn isolate_brace_counted(source: &str, keyword: &str) -> String {
    let occurrences = keyword_offsets(source, keyword);

    // No definitions: the whole input is main source.
    if occurrences.is_empty() {
        return source.to_string();
    }

    let mut isolated = String::with_capacity(source.len());
    isolated.push_str(&source[..occurrences[0]]);

    for (i, &start) in occurrences.iter().enumerate() {
        let body_end = body_end_offset(source, start);
        let next_start = occurrences
            .get(i + 1)
            .copied()
            .unwrap_or(source.len());
        // A keyword occurrence inside the previous body produces an empty
        // between-segment rather than an invalid range.
        if body_end < next_start {
            isolated.push_str(&source[body_end..next_start]);
        }
    }

    isolated
}

/// Every byte offset at which `keyword` occurs, in order.
fn keyword_offsets(source: &str, keyword: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut from = 0;
    while let Some(rel) = source[from..].find(keyword) {
        offsets.push(from + rel);
        from += rel + 1;
    }
    offsets
}

/// Offset one past the delimiter closing the body that starts after
/// `keyword_start`. If no `{` follows, or the braces never rebalance, the
/// body is taken to run to end of input.
fn body_end_offset(source: &str, keyword_start: usize) -> usize {
    let bytes = source.as_bytes();

    let mut pos = keyword_start;
    while pos < bytes.len() && bytes[pos] != b'{' {
        pos += 1;
    }
    if pos == bytes.len() {
        return bytes.len();
    }

    let mut depth = 1usize;
    pos += 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return pos + 1;
                }
            }
            _ => {}
        }
        pos += 1;
    }
    bytes.len()
}

/// Sentinel variant for indentation-significant syntax: remove every span
/// from the definition keyword through the explicit end marker.
///
/// Known fragility: a string literal that happens to contain the marker
/// token truncates the removed span early and corrupts extraction. The
/// upstream pass owns marker placement; no stricter matching is attempted
/// here.
fn strip_sentinel_functions(source: &str) -> String {
    if source.contains("def ") && !source.contains(PYTHON_FUNC_END) {
        tracing::warn!(
            marker = PYTHON_FUNC_END,
            "definitions present but no end markers; treating whole source as main"
        );
    }
    static SENTINEL_RE: OnceLock<Regex> = OnceLock::new();
    let re = SENTINEL_RE.get_or_init(|| {
        let pattern = format!(r"(?s)def.*?{}", regex::escape(PYTHON_FUNC_END));
        Regex::new(&pattern).unwrap()
    });
    re.replace_all(source, "").into_owned()
}
