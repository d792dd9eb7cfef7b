//! Per-side partition plans.

use cleave_core::{FunctionRecord, FunctionRegistry, Side, TrustLabel};

/// The functions one side implements locally and the functions it must
/// reach through proxies.
///
/// Derived fresh from the registry for each generation run; never mutated
/// concurrently with emission.
#[derive(Debug)]
pub struct PartitionPlan<'a> {
    /// The side this plan was computed for.
    pub side: Side,
    /// Functions owned by this side's trust label, tracker order. These get
    /// entry points so the other side can call in.
    pub owned: Vec<&'a FunctionRecord>,
    /// Functions with a real local body here: owned plus all neutral.
    pub local: Vec<&'a FunctionRecord>,
    /// Functions owned by the other side, reachable only through proxies.
    pub remote: Vec<&'a FunctionRecord>,
}

impl<'a> PartitionPlan<'a> {
    /// Compute the plan for one side.
    pub fn for_side(registry: &'a FunctionRegistry, side: Side) -> Self {
        let own_label = match side {
            Side::Trusted => TrustLabel::Trusted,
            Side::Untrusted => TrustLabel::Untrusted,
        };
        let other_label = match side {
            Side::Trusted => TrustLabel::Untrusted,
            Side::Untrusted => TrustLabel::Trusted,
        };

        let owned: Vec<&FunctionRecord> = registry.labeled(own_label).iter().collect();
        let mut local = owned.clone();
        local.extend(registry.neutral().iter());
        let remote: Vec<&FunctionRecord> = registry.labeled(other_label).iter().collect();

        Self {
            side,
            owned,
            local,
            remote,
        }
    }

    /// Whether `record` has a real local body on this side.
    pub fn is_local(&self, record: &FunctionRecord) -> bool {
        record.label.is_local_on(self.side)
    }
}
