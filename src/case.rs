//! Test case requirements and platform capabilities.
//!
//! A [`CaseSpec`] is the full unit matched between a test case and a
//! candidate environment: the machine fleet plus categorical constraints on
//! the platform family and operating-system family.

use tracing::{debug, trace};

use crate::fleet::FleetSpec;
use crate::space::{DiscreteSet, Space};
use crate::verdict::{Incompatible, VerdictTrail};

/// Branch names used in case-level verdict trails.
pub const ENVIRONMENT: &str = "environment";
pub const PLATFORM_TYPE: &str = "platform_type";
pub const OPERATING_SYSTEM: &str = "operating_system";

/// A fleet plus platform and OS constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseSpec {
    pub(crate) fleet: FleetSpec,
    pub(crate) platform_type: DiscreteSet,
    pub(crate) operating_system: DiscreteSet,
}

impl CaseSpec {
    /// A case on `fleet` with no platform or OS constraint.
    pub fn new(fleet: impl Into<FleetSpec>) -> Self {
        Self {
            fleet: fleet.into(),
            platform_type: DiscreteSet::any(),
            operating_system: DiscreteSet::any(),
        }
    }

    pub fn with_platform_type(self, set: DiscreteSet) -> Self {
        Self {
            platform_type: set,
            ..self
        }
    }

    pub fn with_operating_system(self, set: DiscreteSet) -> Self {
        Self {
            operating_system: set,
            ..self
        }
    }

    pub fn fleet(&self) -> &FleetSpec {
        &self.fleet
    }

    pub fn platform_type(&self) -> &DiscreteSet {
        &self.platform_type
    }

    pub fn operating_system(&self) -> &DiscreteSet {
        &self.operating_system
    }

    /// AND of the environment, platform and OS branches.
    ///
    /// Every branch is evaluated so the trail reports all mismatches at once.
    pub fn check(&self, capability: &CaseSpec) -> VerdictTrail {
        let trail = VerdictTrail::pass()
            .and(ENVIRONMENT, self.fleet.check(&capability.fleet))
            .and(PLATFORM_TYPE, self.platform_type.check(&capability.platform_type))
            .and(
                OPERATING_SYSTEM,
                self.operating_system.check(&capability.operating_system),
            );
        if trail.is_pass() {
            trace!("case requirement satisfied");
        } else {
            debug!(reason = %trail.summary(), "case requirement not satisfied");
        }
        trail
    }

    /// The minimal request satisfying both sides.
    ///
    /// All-or-nothing: any incompatible branch makes the whole derivation
    /// incompatible and no partial descriptor is returned.
    pub fn derive_minimum(&self, capability: &CaseSpec) -> Result<CaseSpec, Incompatible> {
        let trail = self.check(capability);
        if !trail.is_pass() {
            return Err(Incompatible::new(trail));
        }

        let derived = CaseSpec {
            fleet: self.fleet.derive_minimum(&capability.fleet)?,
            platform_type: self
                .platform_type
                .derive_minimum(&capability.platform_type)?,
            operating_system: self
                .operating_system
                .derive_minimum(&capability.operating_system)?,
        };
        debug!(
            machines = derived.fleet().machine_count(),
            "derived minimal case request"
        );
        Ok(derived)
    }
}
