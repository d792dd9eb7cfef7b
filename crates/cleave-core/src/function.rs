//! Classified function records.

use crate::trust::TrustLabel;
use crate::types::GuestType;

/// One guest function as observed by the upstream tracker.
///
/// Immutable once produced; every generator consumes it read-only. The
/// argument type order is positional and load-bearing: generated parameter
/// names `param1..paramN` bind to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    /// Dotted qualified name, unique across the program
    /// (e.g. `app.js.encrypt`).
    pub qualified_name: String,
    /// Trust classification.
    pub label: TrustLabel,
    /// Runtime argument types, in positional order.
    pub arg_types: Vec<GuestType>,
    /// Runtime return type. Void when no return was ever observed.
    pub return_type: GuestType,
    /// Verbatim source snippet of the definition.
    pub source_text: String,
    /// Whether this record is the program's own entry symbol.
    pub is_main_symbol: bool,
}

impl FunctionRecord {
    /// Create a record with no arguments, a void return, and no source.
    pub fn new(qualified_name: impl Into<String>, label: TrustLabel) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            label,
            arg_types: Vec::new(),
            return_type: GuestType::Void,
            source_text: String::new(),
            is_main_symbol: false,
        }
    }

    /// Set the positional argument types.
    pub fn with_arg_types(mut self, types: Vec<GuestType>) -> Self {
        self.arg_types = types;
        self
    }

    /// Set the return type.
    pub fn with_return_type(mut self, ty: GuestType) -> Self {
        self.return_type = ty;
        self
    }

    /// Set the verbatim definition snippet.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_text = source.into();
        self
    }

    /// Mark this record as the program's entry symbol.
    pub fn as_main_symbol(mut self) -> Self {
        self.is_main_symbol = true;
        self
    }

    /// Simple name: the substring after the last `.` of the qualified name.
    ///
    /// Every `file.ext.func` qualified name collapses to `func`; the
    /// registry rejects programs where two classified functions collapse to
    /// the same simple name.
    pub fn simple_name(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(idx) => &self.qualified_name[idx + 1..],
            None => &self.qualified_name,
        }
    }

    /// Number of positional arguments.
    pub fn arg_count(&self) -> usize {
        self.arg_types.len()
    }

    /// Positional parameter names `param1..paramN`.
    pub fn param_names(&self) -> Vec<String> {
        (1..=self.arg_types.len())
            .map(|i| format!("param{i}"))
            .collect()
    }

    /// Typed parameter list, e.g. `(int param1, double param2)`.
    ///
    /// When `entry_point` is set, the implicit execution-context handle is
    /// prepended as the first parameter.
    pub fn param_signature(&self, entry_point: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.arg_types.len() + 1);
        if entry_point {
            parts.push("IsolateThread thread".to_string());
        }
        for (i, ty) in self.arg_types.iter().enumerate() {
            parts.push(format!("{} param{}", ty.name(), i + 1));
        }
        format!("({})", parts.join(", "))
    }

    /// Plain call argument list, e.g. `(param1, param2)`.
    pub fn call_invocation(&self) -> String {
        format!("({})", self.param_names().join(", "))
    }

    /// Entry-point call argument list with the owning side's context handle
    /// first, e.g. `(global_enc_iso, param1, param2)`.
    pub fn entry_invocation(&self, isolate: &str) -> String {
        let mut parts = vec![isolate.to_string()];
        parts.extend(self.param_names());
        format!("({})", parts.join(", "))
    }

    /// Transition call argument list for the generated proxy body.
    ///
    /// An ecall carries the enclave id first; a non-void return adds a
    /// caller-allocated out-parameter, e.g. `(global_eid, &ret, param1)`.
    pub fn transition_invocation(&self, is_ecall: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.arg_types.len() + 2);
        if is_ecall {
            parts.push("global_eid".to_string());
        }
        if !self.return_type.is_void() {
            parts.push("&ret".to_string());
        }
        parts.extend(self.param_names());
        format!("({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FunctionRecord {
        FunctionRecord::new("app.js.encrypt", TrustLabel::Trusted)
            .with_arg_types(vec![GuestType::Int, GuestType::Double])
            .with_return_type(GuestType::Int)
    }

    #[test]
    fn simple_name_strips_qualification() {
        assert_eq!(record().simple_name(), "encrypt");
        let bare = FunctionRecord::new("encrypt", TrustLabel::Neutral);
        assert_eq!(bare.simple_name(), "encrypt");
    }

    #[test]
    fn param_signature_plain() {
        assert_eq!(record().param_signature(false), "(int param1, double param2)");
        let nullary = FunctionRecord::new("a.js.f", TrustLabel::Neutral);
        assert_eq!(nullary.param_signature(false), "()");
    }

    #[test]
    fn param_signature_entry_point() {
        assert_eq!(
            record().param_signature(true),
            "(IsolateThread thread, int param1, double param2)"
        );
        let nullary = FunctionRecord::new("a.js.f", TrustLabel::Neutral);
        assert_eq!(nullary.param_signature(true), "(IsolateThread thread)");
    }

    #[test]
    fn invocations() {
        let r = record();
        assert_eq!(r.call_invocation(), "(param1, param2)");
        assert_eq!(
            r.entry_invocation("global_enc_iso"),
            "(global_enc_iso, param1, param2)"
        );
    }

    #[test]
    fn transition_invocation_shapes() {
        let r = record();
        // ecall with a return value: enclave id, out-param, then args
        assert_eq!(
            r.transition_invocation(true),
            "(global_eid, &ret, param1, param2)"
        );
        // ocall with a return value: out-param first
        assert_eq!(r.transition_invocation(false), "(&ret, param1, param2)");

        let void_fn = FunctionRecord::new("a.js.g", TrustLabel::Untrusted)
            .with_arg_types(vec![GuestType::Int]);
        assert_eq!(void_fn.transition_invocation(false), "(param1)");
        assert_eq!(void_fn.transition_invocation(true), "(global_eid, param1)");
    }
}
