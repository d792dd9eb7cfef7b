//! Read-only registry over the tracker's classification outputs.

use std::collections::HashMap;

use crate::error::{CoreError, Result};
use crate::function::FunctionRecord;
use crate::trust::TrustLabel;

/// The four ordered classification sequences, materialized once per run.
///
/// `seen` is the superset of every function observed executing, in
/// observation order; that order fixes the positional parameter list used
/// when one function's generated wrapper exposes its siblings as callables,
/// so it is never re-sorted. The per-label sequences preserve the tracker's
/// original order as well.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    trusted: Vec<FunctionRecord>,
    untrusted: Vec<FunctionRecord>,
    neutral: Vec<FunctionRecord>,
    seen: Vec<FunctionRecord>,
}

impl FunctionRegistry {
    /// Build the registry from the tracker's four output sequences.
    ///
    /// Rejects simple-name collisions across the three labeled sequences and
    /// labeled functions that never appear in `seen`.
    pub fn from_parts(
        trusted: Vec<FunctionRecord>,
        untrusted: Vec<FunctionRecord>,
        neutral: Vec<FunctionRecord>,
        seen: Vec<FunctionRecord>,
    ) -> Result<Self> {
        let mut by_simple: HashMap<String, String> = HashMap::new();
        for record in trusted.iter().chain(&untrusted).chain(&neutral) {
            let simple = record.simple_name().to_string();
            if let Some(first) = by_simple.get(&simple) {
                return Err(CoreError::DuplicateSimpleName {
                    simple,
                    first: first.clone(),
                    second: record.qualified_name.clone(),
                });
            }
            by_simple.insert(simple, record.qualified_name.clone());

            if !seen.iter().any(|s| s.qualified_name == record.qualified_name) {
                return Err(CoreError::NotSeen {
                    name: record.qualified_name.clone(),
                });
            }
        }

        Ok(Self {
            trusted,
            untrusted,
            neutral,
            seen,
        })
    }

    /// Build the registry from the seen sequence alone, deriving the three
    /// labeled sequences from each record's label.
    pub fn from_seen(seen: Vec<FunctionRecord>) -> Result<Self> {
        let mut trusted = Vec::new();
        let mut untrusted = Vec::new();
        let mut neutral = Vec::new();
        for record in &seen {
            match record.label {
                TrustLabel::Trusted => trusted.push(record.clone()),
                TrustLabel::Untrusted => untrusted.push(record.clone()),
                TrustLabel::Neutral => neutral.push(record.clone()),
            }
        }
        Self::from_parts(trusted, untrusted, neutral, seen)
    }

    /// Functions classified trusted, tracker order.
    pub fn trusted(&self) -> &[FunctionRecord] {
        &self.trusted
    }

    /// Functions classified untrusted, tracker order.
    pub fn untrusted(&self) -> &[FunctionRecord] {
        &self.untrusted
    }

    /// Functions classified neutral, tracker order.
    pub fn neutral(&self) -> &[FunctionRecord] {
        &self.neutral
    }

    /// Every function observed executing, observation order.
    pub fn seen(&self) -> &[FunctionRecord] {
        &self.seen
    }

    /// The record flagged as the program's own entry symbol, if any.
    pub fn main_symbol(&self) -> Option<&FunctionRecord> {
        self.seen.iter().find(|f| f.is_main_symbol)
    }

    /// The sequence owned by one trust label.
    pub fn labeled(&self, label: TrustLabel) -> &[FunctionRecord] {
        match label {
            TrustLabel::Trusted => &self.trusted,
            TrustLabel::Untrusted => &self.untrusted,
            TrustLabel::Neutral => &self.neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GuestType;

    fn rec(name: &str, label: TrustLabel) -> FunctionRecord {
        FunctionRecord::new(name, label).with_arg_types(vec![GuestType::Int])
    }

    #[test]
    fn from_seen_partitions_by_label() {
        let registry = FunctionRegistry::from_seen(vec![
            rec("app.js.a", TrustLabel::Trusted),
            rec("app.js.b", TrustLabel::Untrusted),
            rec("app.js.c", TrustLabel::Neutral),
            rec("app.js.d", TrustLabel::Trusted),
        ])
        .unwrap();

        let names: Vec<&str> = registry.trusted().iter().map(|f| f.simple_name()).collect();
        assert_eq!(names, vec!["a", "d"]);
        assert_eq!(registry.untrusted().len(), 1);
        assert_eq!(registry.neutral().len(), 1);
        assert_eq!(registry.seen().len(), 4);
    }

    #[test]
    fn seen_order_is_preserved() {
        let registry = FunctionRegistry::from_seen(vec![
            rec("app.js.z", TrustLabel::Neutral),
            rec("app.js.a", TrustLabel::Neutral),
            rec("app.js.m", TrustLabel::Neutral),
        ])
        .unwrap();
        let names: Vec<&str> = registry.seen().iter().map(|f| f.simple_name()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn duplicate_simple_name_rejected() {
        let err = FunctionRegistry::from_seen(vec![
            rec("app.js.f", TrustLabel::Trusted),
            rec("lib.js.f", TrustLabel::Untrusted),
        ])
        .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateSimpleName { .. }));
    }

    #[test]
    fn labeled_function_must_be_seen() {
        let err = FunctionRegistry::from_parts(
            vec![rec("app.js.f", TrustLabel::Trusted)],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::NotSeen { .. }));
    }

    #[test]
    fn main_symbol_lookup() {
        let registry = FunctionRegistry::from_seen(vec![
            rec("app.js.f", TrustLabel::Neutral),
            FunctionRecord::new("app.js.main", TrustLabel::Untrusted).as_main_symbol(),
        ])
        .unwrap();
        assert_eq!(
            registry.main_symbol().map(|f| f.simple_name()),
            Some("main")
        );
    }
}
