//! Trust labels and the emission-side selector.

use serde::{Deserialize, Serialize};

/// Trust classification for a guest function.
///
/// Assigned by the upstream taint tracker; consumed read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLabel {
    /// Touches secret state; its body may only exist inside the enclave.
    Trusted,
    /// Never touches secret state; its body may only exist in the host.
    Untrusted,
    /// Safe on either side; materialized as a real body in both partitions.
    Neutral,
}

impl TrustLabel {
    /// Parse a trust label from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trusted" => Some(Self::Trusted),
            "untrusted" => Some(Self::Untrusted),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Whether a function with this label gets a real local body on `side`.
    pub fn is_local_on(&self, side: Side) -> bool {
        match self {
            Self::Neutral => true,
            Self::Trusted => side == Side::Trusted,
            Self::Untrusted => side == Side::Untrusted,
        }
    }
}

impl std::fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trusted => write!(f, "trusted"),
            Self::Untrusted => write!(f, "untrusted"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// The partition currently being emitted.
///
/// Threaded as an explicit parameter through every generator call; there is
/// no process-wide "current side" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The enclave image.
    Trusted,
    /// The host image. Owns the real program entry point.
    Untrusted,
}

impl Side {
    /// The opposite partition.
    pub fn other(&self) -> Side {
        match self {
            Self::Trusted => Self::Untrusted,
            Self::Untrusted => Self::Trusted,
        }
    }

    /// Class name of the generated program unit for this side.
    pub fn program_class(&self) -> &'static str {
        match self {
            Self::Trusted => "Trusted",
            Self::Untrusted => "Untrusted",
        }
    }

    /// Transition prefix for calls made *into* this side.
    ///
    /// Calling into the enclave is an ecall; calling out to the host is an
    /// ocall.
    pub fn transition_prefix(&self) -> &'static str {
        match self {
            Self::Trusted => "ecall_",
            Self::Untrusted => "ocall_",
        }
    }

    /// Name of the execution-context (isolate) handle owned by this side.
    ///
    /// These names are fixed by the enclave runtime module and must match it.
    pub fn isolate_handle(&self) -> &'static str {
        match self {
            Self::Trusted => "global_enc_iso",
            Self::Untrusted => "global_app_iso",
        }
    }

    /// Both sides, in the order artifacts are conventionally emitted.
    pub fn both() -> [Side; 2] {
        [Side::Trusted, Side::Untrusted]
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trusted => write!(f, "trusted"),
            Self::Untrusted => write!(f, "untrusted"),
        }
    }
}
