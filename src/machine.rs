//! Machine descriptors.
//!
//! A [`MachineSpec`] bundles one space per resource dimension and stands for
//! `repeat` identical machines. The same type describes a requirement (what a
//! test case needs from each machine) and a capability (what a platform can
//! build). Unset dimensions never constrain a match.
//!
//! Matching a single pair only answers "does one unit of capability satisfy
//! one unit of requirement"; multiplicity is resolved by
//! [`FleetSpec`](crate::fleet::FleetSpec).

use crate::error::{EnvMatchError, Result};
use crate::space::{check_field, derive_field, CountSpace, DiscreteSet, Space};
use crate::verdict::{Incompatible, VerdictTrail};

/// Data disk requirements or capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskSpec {
    pub(crate) data_disk_count: Option<CountSpace>,
    pub(crate) data_disk_size_gb: Option<CountSpace>,
    pub(crate) disk_type: Option<DiscreteSet>,
}

impl DiskSpec {
    /// `disk_type` names disk kinds such as `standard_hdd`, `premium_ssd`.
    pub fn new(
        data_disk_count: Option<CountSpace>,
        data_disk_size_gb: Option<CountSpace>,
        disk_type: Option<DiscreteSet>,
    ) -> Self {
        Self {
            data_disk_count,
            data_disk_size_gb,
            disk_type,
        }
    }

    pub fn data_disk_count(&self) -> Option<&CountSpace> {
        self.data_disk_count.as_ref()
    }

    pub fn data_disk_size_gb(&self) -> Option<&CountSpace> {
        self.data_disk_size_gb.as_ref()
    }

    pub fn disk_type(&self) -> Option<&DiscreteSet> {
        self.disk_type.as_ref()
    }
}

impl Space for DiskSpec {
    fn unbounded() -> Self {
        Self::default()
    }

    fn check(&self, capability: &Self) -> VerdictTrail {
        let DiskSpec {
            data_disk_count,
            data_disk_size_gb,
            disk_type,
        } = self;
        VerdictTrail::pass()
            .and(
                "data_disk_count",
                check_field(data_disk_count.as_ref(), capability.data_disk_count.as_ref()),
            )
            .and(
                "data_disk_size_gb",
                check_field(
                    data_disk_size_gb.as_ref(),
                    capability.data_disk_size_gb.as_ref(),
                ),
            )
            .and(
                "disk_type",
                check_field(disk_type.as_ref(), capability.disk_type.as_ref()),
            )
    }

    fn derive_minimum(&self, capability: &Self) -> std::result::Result<Self, Incompatible> {
        let trail = self.check(capability);
        if !trail.is_pass() {
            return Err(Incompatible::new(trail));
        }
        Ok(DiskSpec {
            data_disk_count: derive_field(
                self.data_disk_count.as_ref(),
                capability.data_disk_count.as_ref(),
            )?,
            data_disk_size_gb: derive_field(
                self.data_disk_size_gb.as_ref(),
                capability.data_disk_size_gb.as_ref(),
            )?,
            disk_type: derive_field(self.disk_type.as_ref(), capability.disk_type.as_ref())?,
        })
    }
}

/// Network interface requirements or capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NicSpec {
    pub(crate) nic_count: Option<CountSpace>,
    pub(crate) data_path: Option<DiscreteSet>,
}

impl NicSpec {
    /// `data_path` names data paths such as `synthetic`, `sriov`.
    pub fn new(nic_count: Option<CountSpace>, data_path: Option<DiscreteSet>) -> Self {
        Self {
            nic_count,
            data_path,
        }
    }

    pub fn nic_count(&self) -> Option<&CountSpace> {
        self.nic_count.as_ref()
    }

    pub fn data_path(&self) -> Option<&DiscreteSet> {
        self.data_path.as_ref()
    }
}

impl Space for NicSpec {
    fn unbounded() -> Self {
        Self::default()
    }

    fn check(&self, capability: &Self) -> VerdictTrail {
        let NicSpec {
            nic_count,
            data_path,
        } = self;
        VerdictTrail::pass()
            .and(
                "nic_count",
                check_field(nic_count.as_ref(), capability.nic_count.as_ref()),
            )
            .and(
                "data_path",
                check_field(data_path.as_ref(), capability.data_path.as_ref()),
            )
    }

    fn derive_minimum(&self, capability: &Self) -> std::result::Result<Self, Incompatible> {
        let trail = self.check(capability);
        if !trail.is_pass() {
            return Err(Incompatible::new(trail));
        }
        Ok(NicSpec {
            nic_count: derive_field(self.nic_count.as_ref(), capability.nic_count.as_ref())?,
            data_path: derive_field(self.data_path.as_ref(), capability.data_path.as_ref())?,
        })
    }
}

/// One or more identical machines.
///
/// Descriptors are immutable once built; the `with_*` builders consume the
/// value and return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSpec {
    pub(crate) repeat: u32,
    pub(crate) core_count: Option<CountSpace>,
    pub(crate) memory_mb: Option<CountSpace>,
    pub(crate) gpu_count: Option<CountSpace>,
    pub(crate) disk: Option<DiskSpec>,
    pub(crate) nic: Option<NicSpec>,
}

impl Default for MachineSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineSpec {
    /// A single unconstrained machine.
    pub fn new() -> Self {
        Self {
            repeat: 1,
            core_count: None,
            memory_mb: None,
            gpu_count: None,
            disk: None,
            nic: None,
        }
    }

    /// `repeat` unconstrained machines.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepeat` when `repeat` is zero.
    pub fn repeated(repeat: u32) -> Result<Self> {
        if repeat == 0 {
            return Err(EnvMatchError::InvalidRepeat { repeat });
        }
        Ok(Self {
            repeat,
            ..Self::new()
        })
    }

    /// How many identical machines this entry stands for.
    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn core_count(&self) -> Option<&CountSpace> {
        self.core_count.as_ref()
    }

    pub fn memory_mb(&self) -> Option<&CountSpace> {
        self.memory_mb.as_ref()
    }

    pub fn gpu_count(&self) -> Option<&CountSpace> {
        self.gpu_count.as_ref()
    }

    pub fn disk(&self) -> Option<&DiskSpec> {
        self.disk.as_ref()
    }

    pub fn nic(&self) -> Option<&NicSpec> {
        self.nic.as_ref()
    }

    pub fn with_core_count(self, space: impl Into<CountSpace>) -> Self {
        Self {
            core_count: Some(space.into()),
            ..self
        }
    }

    pub fn with_memory_mb(self, space: impl Into<CountSpace>) -> Self {
        Self {
            memory_mb: Some(space.into()),
            ..self
        }
    }

    pub fn with_gpu_count(self, space: impl Into<CountSpace>) -> Self {
        Self {
            gpu_count: Some(space.into()),
            ..self
        }
    }

    pub fn with_disk(self, disk: DiskSpec) -> Self {
        Self {
            disk: Some(disk),
            ..self
        }
    }

    pub fn with_nic(self, nic: NicSpec) -> Self {
        Self {
            nic: Some(nic),
            ..self
        }
    }

    /// This descriptor as a single machine, keeping every dimension.
    pub(crate) fn unit(&self) -> Self {
        self.clone().into_unit()
    }

    pub(crate) fn into_unit(self) -> Self {
        Self { repeat: 1, ..self }
    }
}

impl Space for MachineSpec {
    fn unbounded() -> Self {
        Self::new()
    }

    /// Field-by-field AND. `repeat` is not compared; the fleet owns multiplicity.
    fn check(&self, capability: &Self) -> VerdictTrail {
        let MachineSpec {
            repeat: _,
            core_count,
            memory_mb,
            gpu_count,
            disk,
            nic,
        } = self;
        VerdictTrail::pass()
            .and(
                "core_count",
                check_field(core_count.as_ref(), capability.core_count.as_ref()),
            )
            .and(
                "memory_mb",
                check_field(memory_mb.as_ref(), capability.memory_mb.as_ref()),
            )
            .and(
                "gpu_count",
                check_field(gpu_count.as_ref(), capability.gpu_count.as_ref()),
            )
            .and("disk", check_field(disk.as_ref(), capability.disk.as_ref()))
            .and("nic", check_field(nic.as_ref(), capability.nic.as_ref()))
    }

    /// Per-field minimum; `repeat` is copied from the requirement.
    fn derive_minimum(&self, capability: &Self) -> std::result::Result<Self, Incompatible> {
        let trail = self.check(capability);
        if !trail.is_pass() {
            return Err(Incompatible::new(trail));
        }
        Ok(MachineSpec {
            repeat: self.repeat,
            core_count: derive_field(self.core_count.as_ref(), capability.core_count.as_ref())?,
            memory_mb: derive_field(self.memory_mb.as_ref(), capability.memory_mb.as_ref())?,
            gpu_count: derive_field(self.gpu_count.as_ref(), capability.gpu_count.as_ref())?,
            disk: derive_field(self.disk.as_ref(), capability.disk.as_ref())?,
            nic: derive_field(self.nic.as_ref(), capability.nic.as_ref())?,
        })
    }
}
