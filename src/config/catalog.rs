//! Conversion between catalog files and engine descriptors.
//!
//! [`Catalog::from_file`] builds typed [`CaseSpec`]s from a parsed
//! [`CatalogFile`]; the `From<&...>` impls go the other way so derived
//! requests can be printed in catalog syntax.

use std::collections::BTreeMap;

use crate::case::CaseSpec;
use crate::config::schema::{
    CaseConfig, CatalogFile, CountConfig, DiskConfig, MachineConfig, NicConfig, RangeConfig,
    SetConfig,
};
use crate::error::{EnvMatchError, Result};
use crate::fleet::FleetSpec;
use crate::machine::{DiskSpec, MachineSpec, NicSpec};
use crate::space::{CountSpace, DiscreteSet, Range};

/// Typed test cases and platform capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub cases: BTreeMap<String, CaseSpec>,
    pub platforms: BTreeMap<String, CaseSpec>,
}

impl Catalog {
    /// Build engine descriptors from a parsed file.
    ///
    /// Stops at the first invalid value; run
    /// [`validate_catalog`](super::validate_catalog) first to list them all.
    pub fn from_file(file: &CatalogFile) -> Result<Self> {
        let cases = file
            .cases
            .iter()
            .map(|(name, case)| Ok((name.clone(), case_spec(case)?)))
            .collect::<Result<_>>()?;
        let platforms = file
            .platforms
            .iter()
            .map(|(name, platform)| Ok((name.clone(), case_spec(platform)?)))
            .collect::<Result<_>>()?;
        Ok(Self { cases, platforms })
    }

    /// Look up a test case.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCase` if no case has that name.
    pub fn case(&self, name: &str) -> Result<&CaseSpec> {
        self.cases.get(name).ok_or_else(|| EnvMatchError::UnknownCase {
            name: name.to_string(),
        })
    }

    /// Look up a platform.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPlatform` if no platform has that name.
    pub fn platform(&self, name: &str) -> Result<&CaseSpec> {
        self.platforms
            .get(name)
            .ok_or_else(|| EnvMatchError::UnknownPlatform {
                name: name.to_string(),
            })
    }
}

pub(crate) fn case_spec(config: &CaseConfig) -> Result<CaseSpec> {
    let fleet = match &config.nodes {
        Some(nodes) => nodes
            .iter()
            .map(machine_spec)
            .collect::<Result<Vec<_>>>()
            .map(FleetSpec::new)?,
        None => FleetSpec::single(MachineSpec::new()),
    };
    Ok(CaseSpec::new(fleet)
        .with_platform_type(optional_set(config.platform_type.as_ref())?.unwrap_or_default())
        .with_operating_system(
            optional_set(config.operating_system.as_ref())?.unwrap_or_default(),
        ))
}

pub(crate) fn machine_spec(config: &MachineConfig) -> Result<MachineSpec> {
    let MachineConfig {
        count,
        core_count,
        memory_mb,
        gpu_count,
        disk,
        nic,
    } = config;

    Ok(MachineSpec {
        core_count: optional_count(core_count.as_ref())?,
        memory_mb: optional_count(memory_mb.as_ref())?,
        gpu_count: optional_count(gpu_count.as_ref())?,
        disk: disk.as_ref().map(disk_spec).transpose()?,
        nic: nic.as_ref().map(nic_spec).transpose()?,
        ..MachineSpec::repeated(*count)?
    })
}

fn disk_spec(config: &DiskConfig) -> Result<DiskSpec> {
    Ok(DiskSpec::new(
        optional_count(config.data_disk_count.as_ref())?,
        optional_count(config.data_disk_size_gb.as_ref())?,
        optional_set(config.disk_type.as_ref())?,
    ))
}

fn nic_spec(config: &NicConfig) -> Result<NicSpec> {
    Ok(NicSpec::new(
        optional_count(config.nic_count.as_ref())?,
        optional_set(config.data_path.as_ref())?,
    ))
}

fn optional_count(config: Option<&CountConfig>) -> Result<Option<CountSpace>> {
    config.map(count_space).transpose()
}

fn optional_set(config: Option<&SetConfig>) -> Result<Option<DiscreteSet>> {
    config.map(discrete_set).transpose()
}

pub(crate) fn count_space(config: &CountConfig) -> Result<CountSpace> {
    match config {
        CountConfig::Exact(value) => Ok(CountSpace::exact(*value)),
        CountConfig::Range(range) => range_value(range).map(CountSpace::from),
        CountConfig::Union(ranges) => {
            CountSpace::new(ranges.iter().map(range_value).collect::<Result<_>>()?)
        }
    }
}

pub(crate) fn range_value(config: &RangeConfig) -> Result<Range> {
    Range::new(config.min, config.max, config.max_inclusive.unwrap_or(true))
}

pub(crate) fn discrete_set(config: &SetConfig) -> Result<DiscreteSet> {
    match (&config.allow, &config.deny) {
        (Some(allow), None) => Ok(DiscreteSet::allow(allow.iter().cloned())),
        (None, Some(deny)) => Ok(DiscreteSet::deny(deny.iter().cloned())),
        (Some(_), Some(_)) => Err(EnvMatchError::InvalidSet {
            message: "set has both 'allow' and 'deny'".to_string(),
        }),
        (None, None) => Err(EnvMatchError::InvalidSet {
            message: "set needs either 'allow' or 'deny'".to_string(),
        }),
    }
}

impl From<&Range> for RangeConfig {
    fn from(range: &Range) -> Self {
        Self {
            min: (range.min() > 0).then_some(range.min()),
            max: range.max(),
            max_inclusive: (range.max().is_some() && !range.max_inclusive()).then_some(false),
        }
    }
}

impl From<&CountSpace> for CountConfig {
    fn from(space: &CountSpace) -> Self {
        if let Some(value) = space.as_exact() {
            return CountConfig::Exact(value);
        }
        match space.ranges() {
            [only] => CountConfig::Range(only.into()),
            ranges => CountConfig::Union(ranges.iter().map(RangeConfig::from).collect()),
        }
    }
}

impl From<&DiscreteSet> for SetConfig {
    fn from(set: &DiscreteSet) -> Self {
        let items: Vec<String> = set.items().iter().cloned().collect();
        if set.is_allow_list() {
            Self {
                allow: Some(items),
                deny: None,
            }
        } else {
            Self {
                allow: None,
                deny: Some(items),
            }
        }
    }
}

impl From<&MachineSpec> for MachineConfig {
    fn from(machine: &MachineSpec) -> Self {
        Self {
            count: machine.repeat(),
            core_count: machine.core_count().map(CountConfig::from),
            memory_mb: machine.memory_mb().map(CountConfig::from),
            gpu_count: machine.gpu_count().map(CountConfig::from),
            disk: machine.disk().map(|disk| DiskConfig {
                data_disk_count: disk.data_disk_count().map(CountConfig::from),
                data_disk_size_gb: disk.data_disk_size_gb().map(CountConfig::from),
                disk_type: disk.disk_type().map(SetConfig::from),
            }),
            nic: machine.nic().map(|nic| NicConfig {
                nic_count: nic.nic_count().map(CountConfig::from),
                data_path: nic.data_path().map(SetConfig::from),
            }),
        }
    }
}

/// Unconstrained sets are left out so the output reads like hand-written
/// catalog entries.
impl From<&CaseSpec> for CaseConfig {
    fn from(case: &CaseSpec) -> Self {
        let constrained = |set: &DiscreteSet| (*set != DiscreteSet::any()).then(|| SetConfig::from(set));
        Self {
            description: None,
            nodes: Some(case.fleet().nodes().iter().map(MachineConfig::from).collect()),
            platform_type: constrained(case.platform_type()),
            operating_system: constrained(case.operating_system()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> CatalogFile {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn builds_typed_catalog() {
        let file = parse(
            r#"
cases:
  smoke:
    nodes:
      - core_count: {min: 4, max: 8}
        count: 2
    operating_system: {allow: [linux]}
platforms:
  libvirt:
    nodes:
      - core_count: 6
        gpu_count: 0
"#,
        );
        let catalog = Catalog::from_file(&file).unwrap();

        let smoke = catalog.case("smoke").unwrap();
        assert_eq!(smoke.fleet().machine_count(), 2);
        assert_eq!(smoke.operating_system(), &DiscreteSet::allow(["linux"]));

        let libvirt = catalog.platform("libvirt").unwrap();
        assert_eq!(libvirt.platform_type(), &DiscreteSet::any());
        assert_eq!(
            libvirt.fleet().nodes()[0].gpu_count(),
            Some(&CountSpace::exact(0))
        );
    }

    #[test]
    fn missing_nodes_means_one_machine() {
        let catalog = Catalog::from_file(&parse("cases:\n  any: {}\n")).unwrap();
        assert_eq!(catalog.case("any").unwrap().fleet().machine_count(), 1);
    }

    #[test]
    fn unknown_names_are_errors() {
        let catalog = Catalog::default();
        assert!(matches!(
            catalog.case("nope"),
            Err(EnvMatchError::UnknownCase { .. })
        ));
        assert!(matches!(
            catalog.platform("nope"),
            Err(EnvMatchError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn invalid_values_fail_conversion() {
        let bad_range = parse("cases:\n  a:\n    nodes:\n      - core_count: {min: 8, max: 4}\n");
        assert!(matches!(
            Catalog::from_file(&bad_range),
            Err(EnvMatchError::InvalidRange { .. })
        ));

        let zero = parse("cases:\n  a:\n    nodes:\n      - count: 0\n");
        assert!(matches!(
            Catalog::from_file(&zero),
            Err(EnvMatchError::InvalidRepeat { repeat: 0 })
        ));

        let both = parse("cases:\n  a:\n    operating_system: {allow: [a], deny: [b]}\n");
        assert!(matches!(
            Catalog::from_file(&both),
            Err(EnvMatchError::InvalidSet { .. })
        ));
    }

    #[test]
    fn exclusive_max_is_kept() {
        let range = range_value(&RangeConfig {
            min: Some(2),
            max: Some(4),
            max_inclusive: Some(false),
        })
        .unwrap();
        assert!(!range.contains(4));
        assert_eq!(
            RangeConfig::from(&range),
            RangeConfig {
                min: Some(2),
                max: Some(4),
                max_inclusive: Some(false),
            }
        );
    }

    #[test]
    fn derived_case_prints_as_catalog_entry() {
        let case = CaseSpec::new(MachineSpec::new().with_core_count(CountSpace::exact(6)))
            .with_operating_system(DiscreteSet::allow(["linux"]));
        let yaml = serde_yaml::to_string(&CaseConfig::from(&case)).unwrap();
        assert!(yaml.contains("core_count: 6"));
        assert!(yaml.contains("- linux"));
        assert!(!yaml.contains("platform_type"));
        assert!(!yaml.contains("count: 1"));
    }
}
