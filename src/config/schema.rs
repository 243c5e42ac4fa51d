//! Catalog schema definitions.
//!
//! These structs map one-to-one onto the YAML catalog format. They are plain
//! data: nothing here is checked beyond what serde enforces. Bounds, repeats
//! and set polarity are checked by [`validator`](super::validator) and the
//! typed engine values are built by [`catalog`](super::catalog).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogFile {
    /// Test case requirements, by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cases: BTreeMap<String, CaseConfig>,

    /// Platform capability snapshots, by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub platforms: BTreeMap<String, CaseConfig>,
}

/// A test case requirement or a platform capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CaseConfig {
    /// Free-form note shown by `check`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Machines in role order. Absent means one unconstrained machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<MachineConfig>>,

    /// Platform families (`azure`, `libvirt`, ...). Absent means any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_type: Option<SetConfig>,

    /// Operating system families. Absent means any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<SetConfig>,
}

/// One machine entry, possibly repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// How many identical machines this entry stands for.
    #[serde(default = "default_count", skip_serializing_if = "is_default_count")]
    pub count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_count: Option<CountConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<CountConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_count: Option<CountConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<NicConfig>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            core_count: None,
            memory_mb: None,
            gpu_count: None,
            disk: None,
            nic: None,
        }
    }
}

fn default_count() -> u32 {
    1
}

fn is_default_count(count: &u32) -> bool {
    *count == default_count()
}

/// Data disk dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct DiskConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_disk_count: Option<CountConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_disk_size_gb: Option<CountConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<SetConfig>,
}

/// Network interface dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct NicConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nic_count: Option<CountConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<SetConfig>,
}

/// A count dimension: an exact value, a range, or a union of ranges.
///
/// `Union` is tried before `Range` so that an empty list is a union rather
/// than a range with every bound defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CountConfig {
    /// `core_count: 4`
    Exact(u64),
    /// `core_count: [{min: 2, max: 4}, {min: 16}]`
    Union(Vec<RangeConfig>),
    /// `core_count: {min: 4, max: 8}`
    Range(RangeConfig),
}

/// An interval. An absent `min` means 0; an absent `max` means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,

    /// Whether `max` itself is admitted. Defaults to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_inclusive: Option<bool>,
}

/// A token set: exactly one of `allow` or `deny`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct SetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<Vec<String>>,
}

/// JSON Schema for the catalog format.
pub fn catalog_schema() -> schemars::Schema {
    schemars::schema_for!(CatalogFile)
}
