//! Multi-machine environments.
//!
//! A [`FleetSpec`] is an ordered list of [`MachineSpec`] entries. Position
//! encodes role ("the first node is the controller"), so matching is
//! positional over the *expansion*: each entry repeated `repeat` times in
//! place.
//!
//! # Ordering policy
//!
//! The capability expansion is compared as given. It is never sorted or
//! permuted, so a capability whose leading entries do not fit fails even when
//! a later entry would. Capability providers order their entries best-fit
//! first. A permutation search is a separate algorithm and does not belong in
//! this check.

use tracing::debug;

use crate::machine::MachineSpec;
use crate::space::Space;
use crate::verdict::{Incompatible, VerdictTrail};

/// An ordered sequence of machine descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSpec {
    nodes: Vec<MachineSpec>,
}

impl FleetSpec {
    /// Build a fleet from entries in role order.
    pub fn new(nodes: Vec<MachineSpec>) -> Self {
        Self { nodes }
    }

    /// A fleet with one entry.
    pub fn single(node: MachineSpec) -> Self {
        Self { nodes: vec![node] }
    }

    /// Declared entries, before expansion.
    pub fn nodes(&self) -> &[MachineSpec] {
        &self.nodes
    }

    /// Total machines denoted: the length of the expansion.
    pub fn machine_count(&self) -> u64 {
        self.nodes
            .iter()
            .fold(0u64, |total, node| total.saturating_add(u64::from(node.repeat())))
    }

    /// Repeat each entry in place; every expanded entry stands for one machine.
    ///
    /// This materializes the whole expansion. Matching never calls it: a
    /// capability may advertise far more machines than fit in memory.
    pub fn expand(&self) -> Vec<MachineSpec> {
        self.positions().map(MachineSpec::unit).collect()
    }

    /// The expansion, borrowed lazily one position at a time.
    fn positions(&self) -> impl Iterator<Item = &MachineSpec> + '_ {
        self.nodes
            .iter()
            .flat_map(|node| std::iter::repeat_n(node, node.repeat() as usize))
    }

    /// Positional check of this requirement against a capability fleet.
    ///
    /// Fails outright when the capability denotes fewer machines. Capability
    /// positions past the requirement's length are surplus and never visited.
    pub fn check(&self, capability: &FleetSpec) -> VerdictTrail {
        let required = self.machine_count();
        let offered = capability.machine_count();

        if offered < required {
            debug!(required, offered, "fleet rejected on machine count");
            return VerdictTrail::fail(format!(
                "insufficient machine count: requires {}, capability offers {}",
                required, offered
            ));
        }

        let mut trail = VerdictTrail::pass();
        for (index, (req, cap)) in self.positions().zip(capability.positions()).enumerate() {
            let node = req.check(cap);
            if !node.is_pass() {
                debug!(index, reason = %node.summary(), "fleet position rejected");
            }
            trail.merge(format!("nodes[{}]", index), node);
        }
        trail
    }

    /// The smallest fleet satisfying both sides position by position.
    ///
    /// The result has exactly as many single-machine entries as the
    /// requirement's expansion; surplus capability entries are dropped.
    pub fn derive_minimum(&self, capability: &FleetSpec) -> Result<FleetSpec, Incompatible> {
        let trail = self.check(capability);
        if !trail.is_pass() {
            return Err(Incompatible::new(trail));
        }

        let nodes = self
            .positions()
            .zip(capability.positions())
            .map(|(req, cap)| req.derive_minimum(cap).map(MachineSpec::into_unit))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FleetSpec { nodes })
    }
}

impl From<MachineSpec> for FleetSpec {
    fn from(node: MachineSpec) -> Self {
        Self::single(node)
    }
}

impl FromIterator<MachineSpec> for FleetSpec {
    fn from_iter<I: IntoIterator<Item = MachineSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{CountSpace, Range};

    fn cores(min: u64, max: u64) -> MachineSpec {
        MachineSpec::new().with_core_count(Range::between(min, max).unwrap())
    }

    fn node(core: u64, gpu: u64) -> MachineSpec {
        MachineSpec::new()
            .with_core_count(CountSpace::exact(core))
            .with_gpu_count(CountSpace::exact(gpu))
    }

    #[test]
    fn expansion_repeats_in_place() {
        let fleet = FleetSpec::new(vec![
            MachineSpec::repeated(2).unwrap().with_core_count(CountSpace::exact(4)),
            node(8, 0),
        ]);
        let expanded = fleet.expand();

        assert_eq!(fleet.machine_count(), 3);
        assert_eq!(expanded.len(), 3);
        assert!(expanded.iter().all(|n| n.repeat() == 1));
        assert_eq!(expanded[0].core_count, Some(CountSpace::exact(4)));
        assert_eq!(expanded[1].core_count, Some(CountSpace::exact(4)));
        assert_eq!(expanded[2].core_count, Some(CountSpace::exact(8)));
    }

    #[test]
    fn insufficient_machine_count_fails_regardless_of_fields() {
        let req = FleetSpec::new(vec![MachineSpec::repeated(3).unwrap()]);
        let cap = FleetSpec::new(vec![MachineSpec::new(), MachineSpec::new()]);

        let trail = req.check(&cap);
        assert!(!trail.is_pass());
        assert_eq!(
            trail.reasons(),
            ["insufficient machine count: requires 3, capability offers 2".to_string()]
        );
        assert!(req.derive_minimum(&cap).is_err());
    }

    #[test]
    fn single_node_requirement_matches_first_position_only() {
        let req = FleetSpec::single(MachineSpec::new().with_core_count(CountSpace::exact(6)));
        let cap = FleetSpec::new(vec![node(6, 0), node(10, 0)]);

        assert!(req.check(&cap).is_pass());
        let derived = req.derive_minimum(&cap).unwrap();
        assert_eq!(
            derived,
            FleetSpec::single(MachineSpec::new().with_core_count(CountSpace::exact(6)))
        );
    }

    #[test]
    fn second_position_failure_is_named() {
        let req = FleetSpec::single(MachineSpec::repeated(2).unwrap().with_core_count(
            Range::between(4, 8).unwrap(),
        ));
        let cap = FleetSpec::new(vec![node(6, 0), node(10, 0)]);

        let trail = req.check(&cap);
        assert!(!trail.is_pass());
        assert!(trail.branch("nodes[0]").is_none());
        assert_eq!(
            trail.failures(),
            vec!["nodes[1].core_count: 10 not in [4, 8]".to_string()]
        );
    }

    #[test]
    fn order_is_load_bearing() {
        let req = FleetSpec::single(cores(4, 8));
        let c1 = FleetSpec::new(vec![node(6, 0), node(10, 0)]);
        let c2 = FleetSpec::new(vec![node(10, 0), node(6, 0)]);

        assert!(req.check(&c1).is_pass());
        assert!(!req.check(&c2).is_pass());
    }

    #[test]
    fn derivation_drops_surplus_and_flattens_repeats() {
        let req = FleetSpec::single(MachineSpec::repeated(2).unwrap().with_core_count(
            Range::between(4, 8).unwrap(),
        ));
        let cap = FleetSpec::new(vec![node(6, 0), node(6, 0), node(6, 0)]);

        let derived = req.derive_minimum(&cap).unwrap();
        assert_eq!(derived.nodes().len(), 2);
        assert_eq!(derived.machine_count(), 2);
        assert!(derived
            .nodes()
            .iter()
            .all(|n| n.core_count == Some(CountSpace::exact(6)) && n.gpu_count.is_none()));
    }

    #[test]
    fn empty_requirement_is_satisfied_by_anything() {
        let req = FleetSpec::default();
        assert!(req.check(&FleetSpec::default()).is_pass());
        assert_eq!(req.derive_minimum(&FleetSpec::single(node(2, 0))).unwrap(), req);
    }

    #[test]
    fn huge_capability_pool_is_never_expanded() {
        let pool = FleetSpec::single(
            MachineSpec::repeated(u32::MAX)
                .unwrap()
                .with_core_count(CountSpace::exact(4)),
        );
        let req = FleetSpec::single(MachineSpec::new().with_core_count(CountSpace::exact(4)));

        assert_eq!(pool.machine_count(), u64::from(u32::MAX));
        assert!(req.check(&pool).is_pass());
        let derived = req.derive_minimum(&pool).unwrap();
        assert_eq!(derived.nodes().len(), 1);
        assert_eq!(derived.nodes()[0].repeat(), 1);
    }

    #[test]
    fn machine_count_does_not_overflow() {
        let big = MachineSpec::repeated(u32::MAX).unwrap();
        let fleet = FleetSpec::new(vec![big.clone(), big]);
        assert_eq!(fleet.machine_count(), 2 * u64::from(u32::MAX));
    }
}
