//! Per-language source minification.
//!
//! Generated program units embed guest source inside string literals of the
//! host language, so quotes must be escaped and line structure flattened
//! into something a single literal can carry.

use crate::language::GuestLanguage;

/// Minify source according to the guest language syntax.
pub fn minify(language: GuestLanguage, source: &str) -> String {
    match language {
        GuestLanguage::Js => minify_js(source),
        GuestLanguage::Python => minify_python(source),
    }
}

/// Escape quotes and drop line breaks. JS statements survive on one line.
fn minify_js(source: &str) -> String {
    source.replace('"', "\\\"").replace(['\n', '\r'], "")
}

/// Escape quotes, then encode line structure instead of dropping it:
/// newlines become literal `\n` and four-space indents literal `\t`, since
/// Python indentation is significant.
fn minify_python(source: &str) -> String {
    source
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace("    ", "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_strips_line_breaks() {
        let src = "let x = 1;\nlet y = \"two\";\r\n";
        assert_eq!(minify_js(src), "let x = 1;let y = \\\"two\\\";");
    }

    #[test]
    fn python_keeps_line_structure() {
        let src = "def f():\n    return \"x\"\n";
        assert_eq!(minify_python(src), "def f():\\n\\treturn \\\"x\\\"\\n");
    }

    #[test]
    fn dispatch_by_language() {
        assert_eq!(minify(GuestLanguage::Js, "a\nb"), "ab");
        assert_eq!(minify(GuestLanguage::Python, "a\nb"), "a\\nb");
    }
}
