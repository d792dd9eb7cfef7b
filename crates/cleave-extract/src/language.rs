//! Guest language tag.

use crate::error::{ExtractError, Result};

/// The guest language a program is written in.
///
/// Selects the body-isolation and minification strategy. A two-way tag:
/// brace-delimited syntax gets the counting extractor, indentation-
/// significant syntax gets the sentinel extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestLanguage {
    /// JavaScript: `function f(...) { ... }` definitions, brace-counted.
    Js,
    /// Python: `def f(...):` definitions, sentinel-delimited.
    Python,
}

impl GuestLanguage {
    /// Parse a guest language id as given on the command line.
    pub fn parse(id: &str) -> Result<Self> {
        match id.to_lowercase().as_str() {
            "js" | "javascript" => Ok(Self::Js),
            "python" | "py" => Ok(Self::Python),
            _ => Err(ExtractError::UnknownLanguage { id: id.to_string() }),
        }
    }

    /// The id string embedded in generated interpreter eval calls.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Python => "python",
        }
    }

    /// The keyword opening a function definition.
    pub fn function_keyword(&self) -> &'static str {
        match self {
            Self::Js => "function",
            Self::Python => "def",
        }
    }
}

impl std::fmt::Display for GuestLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
