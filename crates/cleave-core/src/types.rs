//! Guest value types crossing the partition boundary.
//!
//! Argument and return types are observed at runtime by the upstream
//! tracker, not declared, so every consumer has to tolerate values the
//! tracker could not recognize.

use serde::{Deserialize, Serialize};

/// A semantic guest type as it appears in generated signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GuestType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// No value. The default when a return type was never observed.
    Void,
    /// A type name the tracker reported but the boundary does not model.
    Other(String),
}

impl GuestType {
    /// Parse a type name. Unrecognized names are preserved as [`GuestType::Other`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bool" | "boolean" => Self::Bool,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "void" | "" => Self::Void,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    /// Canonical type name used in every generated signature.
    pub fn name(&self) -> &str {
        match self {
            Self::Bool => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
            Self::Other(name) => name,
        }
    }

    /// Whether this is the void type.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Accessor invoked on the interpreter's boxed result to recover a value
    /// of this type.
    ///
    /// Types outside the fixed accessor table (including [`GuestType::Other`])
    /// fall back to the long accessor, with a diagnostic.
    pub fn accessor(&self) -> &'static str {
        match self {
            Self::Bool => "asBoolean()",
            Self::Byte => "asByte()",
            Self::Short => "asShort()",
            Self::Float => "asFloat()",
            Self::Int => "asInt()",
            Self::Long => "asLong()",
            Self::Double => "asDouble()",
            other => {
                tracing::warn!(
                    guest_type = other.name(),
                    "no result accessor for type, falling back to asLong()"
                );
                "asLong()"
            }
        }
    }

    /// Infer the guest type of a runtime value observed at a call site.
    ///
    /// Unrecognized value shapes fall back to `double` with a diagnostic;
    /// inference never fails the generation pass.
    pub fn infer(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(_) => Self::Bool,
            serde_json::Value::Null => Self::Void,
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i32::try_from(i).is_ok() {
                        Self::Int
                    } else {
                        Self::Long
                    }
                } else {
                    Self::Double
                }
            }
            other => {
                tracing::warn!(value = %other, "unknown runtime value type, assuming double");
                Self::Double
            }
        }
    }

    /// Infer a return type from an observed result. Absent results are void.
    pub fn infer_return(value: Option<&serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => Self::Void,
            Some(v) => Self::infer(v),
        }
    }
}

impl Default for GuestType {
    fn default() -> Self {
        Self::Void
    }
}

impl From<String> for GuestType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<GuestType> for String {
    fn from(t: GuestType) -> Self {
        t.name().to_string()
    }
}

impl std::fmt::Display for GuestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
