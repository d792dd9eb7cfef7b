//! Classification manifest (`.toml`) parsing.
//!
//! The upstream taint tracker serializes its classification of a program as
//! a TOML manifest: program metadata plus one `[[functions]]` entry per seen
//! function, in observation order. Types may be given directly by name or as
//! observed sample values to run through inference.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::function::FunctionRecord;
use crate::registry::FunctionRegistry;
use crate::trust::TrustLabel;
use crate::types::GuestType;

/// A complete classification manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationManifest {
    /// Metadata about the classified program.
    pub program: ProgramSection,
    /// Seen functions, observation order.
    #[serde(default, rename = "functions")]
    pub functions: Vec<ManifestFunction>,
}

/// Metadata about the classified program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSection {
    /// Path to the program source file, relative to the manifest.
    pub source: String,
    /// Guest language id (e.g. "js", "python").
    pub language: String,
    /// Qualified name of the program's own entry symbol, if one was seen.
    #[serde(default)]
    pub main: Option<String>,
}

/// One classified function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFunction {
    /// Dotted qualified name (e.g. `app.js.encrypt`).
    pub name: String,
    /// Trust classification.
    pub label: TrustLabel,
    /// Positional argument type names.
    #[serde(default, alias = "arg-types")]
    pub arg_types: Option<Vec<GuestType>>,
    /// Sample argument values observed at a call, used when `arg_types` is
    /// absent.
    #[serde(default, alias = "observed-args")]
    pub observed_args: Option<Vec<serde_json::Value>>,
    /// Return type name. Defaults to void.
    #[serde(default, alias = "return-type")]
    pub return_type: Option<GuestType>,
    /// Sample return value, used when `return_type` is absent.
    #[serde(default, alias = "observed-return")]
    pub observed_return: Option<serde_json::Value>,
    /// Verbatim source snippet of the definition.
    #[serde(default)]
    pub source: String,
}

impl ManifestFunction {
    /// Resolve the positional argument types, inferring from observed
    /// sample values when no names were given.
    pub fn resolved_arg_types(&self) -> Vec<GuestType> {
        if let Some(types) = &self.arg_types {
            return types.clone();
        }
        match &self.observed_args {
            Some(values) => values.iter().map(GuestType::infer).collect(),
            None => Vec::new(),
        }
    }

    /// Resolve the return type, inferring from the observed sample value
    /// when no name was given.
    pub fn resolved_return_type(&self) -> GuestType {
        match &self.return_type {
            Some(ty) => ty.clone(),
            None => GuestType::infer_return(self.observed_return.as_ref()),
        }
    }
}

impl ClassificationManifest {
    /// Parse a manifest from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        let manifest: ClassificationManifest = toml::from_str(input)?;

        if manifest.program.source.is_empty() {
            return Err(CoreError::InvalidManifest {
                detail: "program.source is required".to_string(),
            });
        }
        if manifest.program.language.is_empty() {
            return Err(CoreError::InvalidManifest {
                detail: "program.language is required".to_string(),
            });
        }
        for func in &manifest.functions {
            if func.name.is_empty() {
                return Err(CoreError::InvalidManifest {
                    detail: "functions[].name is required".to_string(),
                });
            }
        }

        Ok(manifest)
    }

    /// Parse a manifest from a file path.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Materialize the four classification sequences as a registry.
    pub fn into_registry(&self) -> Result<FunctionRegistry> {
        let seen: Vec<FunctionRecord> = self
            .functions
            .iter()
            .map(|func| {
                let mut record = FunctionRecord::new(func.name.clone(), func.label)
                    .with_arg_types(func.resolved_arg_types())
                    .with_return_type(func.resolved_return_type())
                    .with_source(func.source.clone());
                if self.program.main.as_deref() == Some(func.name.as_str()) {
                    record = record.as_main_symbol();
                }
                record
            })
            .collect();
        FunctionRegistry::from_seen(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[program]
source = "app.js"
language = "js"
main = "app.js.main"

[[functions]]
name = "app.js.encrypt"
label = "trusted"
arg-types = ["int", "double"]
return-type = "int"
source = "function encrypt(param1,param2){return param1;}"

[[functions]]
name = "app.js.log_it"
label = "untrusted"
observed-args = [true, 2.5]

[[functions]]
name = "app.js.main"
label = "untrusted"
"#;

    #[test]
    fn parse_manifest() {
        let manifest = ClassificationManifest::parse(MANIFEST).unwrap();
        assert_eq!(manifest.program.language, "js");
        assert_eq!(manifest.functions.len(), 3);
        assert_eq!(manifest.functions[0].label, TrustLabel::Trusted);
    }

    #[test]
    fn resolves_declared_types() {
        let manifest = ClassificationManifest::parse(MANIFEST).unwrap();
        let encrypt = &manifest.functions[0];
        assert_eq!(
            encrypt.resolved_arg_types(),
            vec![GuestType::Int, GuestType::Double]
        );
        assert_eq!(encrypt.resolved_return_type(), GuestType::Int);
    }

    #[test]
    fn infers_types_from_observed_values() {
        let manifest = ClassificationManifest::parse(MANIFEST).unwrap();
        let log_it = &manifest.functions[1];
        assert_eq!(
            log_it.resolved_arg_types(),
            vec![GuestType::Bool, GuestType::Double]
        );
        // no observed return: defaults to void
        assert_eq!(log_it.resolved_return_type(), GuestType::Void);
    }

    #[test]
    fn registry_carries_main_symbol() {
        let manifest = ClassificationManifest::parse(MANIFEST).unwrap();
        let registry = manifest.into_registry().unwrap();
        assert_eq!(registry.seen().len(), 3);
        assert_eq!(
            registry.main_symbol().map(|f| f.qualified_name.as_str()),
            Some("app.js.main")
        );
    }

    #[test]
    fn missing_program_source_rejected() {
        let err = ClassificationManifest::parse(
            "[program]\nsource = \"\"\nlanguage = \"js\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidManifest { .. }));
    }
}
