//! Constraint spaces and the two operations every space supports.
//!
//! A space describes a set of acceptable values for one resource dimension.
//! The same type is used on both sides of a match: as a *requirement* (what a
//! test case needs) and as a *capability* (what a platform can offer).
//!
//! - [`range`] - inclusive numeric interval, exact when `min == max`
//! - [`count`] - union of ranges for count-like dimensions
//! - [`set`] - allow-list or deny-list of tokens
//!
//! Composite descriptors ([`MachineSpec`](crate::machine::MachineSpec),
//! [`DiskSpec`](crate::machine::DiskSpec), [`NicSpec`](crate::machine::NicSpec))
//! implement [`Space`] as well and recurse field by field, so
//! [`check`](Space::check) and [`derive_minimum`](Space::derive_minimum) are
//! written once per kind and composed. The trait is sealed: the set of space
//! kinds is closed and every composite destructures its fields exhaustively,
//! so adding a dimension fails to compile until it is matched.

pub mod count;
pub mod range;
pub mod set;

pub use count::CountSpace;
pub use range::Range;
pub use set::DiscreteSet;

use crate::verdict::{Incompatible, VerdictTrail};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Range {}
    impl Sealed for super::CountSpace {}
    impl Sealed for super::DiscreteSet {}
    impl Sealed for crate::machine::MachineSpec {}
    impl Sealed for crate::machine::DiskSpec {}
    impl Sealed for crate::machine::NicSpec {}
}

/// A requirement/capability space.
///
/// `self` is always the requirement side and the argument the capability.
/// Both operations are pure: inputs are never mutated and derivation returns
/// a fresh value.
pub trait Space: sealed::Sealed + Sized {
    /// The widest declarable value: satisfies and admits everything.
    fn unbounded() -> Self;

    /// Whether one unit of `capability` satisfies this requirement.
    fn check(&self, capability: &Self) -> VerdictTrail;

    /// The smallest value satisfying both this requirement and `capability`.
    fn derive_minimum(&self, capability: &Self) -> Result<Self, Incompatible>;
}

/// Check an optional field.
///
/// An unset requirement never constrains. An unset capability offers the
/// widest declarable value.
pub fn check_field<S: Space>(requirement: Option<&S>, capability: Option<&S>) -> VerdictTrail {
    match (requirement, capability) {
        (None, _) => VerdictTrail::pass(),
        (Some(req), Some(cap)) => req.check(cap),
        (Some(req), None) => req.check(&S::unbounded()),
    }
}

/// Derive an optional field.
///
/// An unset requirement stays unset: the request leaves that dimension to the
/// platform's default.
pub fn derive_field<S: Space>(
    requirement: Option<&S>,
    capability: Option<&S>,
) -> Result<Option<S>, Incompatible> {
    match (requirement, capability) {
        (None, _) => Ok(None),
        (Some(req), Some(cap)) => req.derive_minimum(cap).map(Some),
        (Some(req), None) => req.derive_minimum(&S::unbounded()).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_requirement_always_passes() {
        let cap = Range::exact(2);
        assert!(check_field::<Range>(None, Some(&cap)).is_pass());
        assert!(check_field::<Range>(None, None).is_pass());
    }

    #[test]
    fn unset_requirement_derives_unset() {
        let cap = Range::exact(0);
        assert_eq!(derive_field::<Range>(None, Some(&cap)).unwrap(), None);
    }

    #[test]
    fn unset_capability_is_widest() {
        let req = Range::between(4, 8).unwrap();
        assert!(check_field(Some(&req), None).is_pass());
        assert_eq!(
            derive_field(Some(&req), None).unwrap(),
            Some(Range::exact(4))
        );
    }

    #[test]
    fn set_field_derivation_follows_requirement() {
        let req = DiscreteSet::allow(["sriov"]);
        let derived = derive_field(Some(&req), None).unwrap().unwrap();
        assert_eq!(derived, DiscreteSet::allow(["sriov"]));
    }
}
