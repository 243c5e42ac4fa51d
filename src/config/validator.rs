//! Catalog validation rules.
//!
//! Every value that the engine would reject at construction time is checked
//! here first, so a user sees all problems in one pass:
//! - Ranges must admit at least one value
//! - Machine entries must stand for at least one machine
//! - Count unions must list at least one range
//! - Sets must use exactly one of `allow` or `deny`

use crate::config::catalog::{discrete_set, range_value};
use crate::config::schema::{CaseConfig, CatalogFile, CountConfig, MachineConfig, SetConfig};
use crate::error::{EnvMatchError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Catalog entry, such as `cases.smoke` or `platforms.azure`
    pub entry: String,
}

/// Validate a catalog and return all errors.
pub fn validate_catalog(catalog: &CatalogFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, case) in &catalog.cases {
        validate_entry(&format!("cases.{}", name), case, &mut errors);
    }
    for (name, platform) in &catalog.platforms {
        validate_entry(&format!("platforms.{}", name), platform, &mut errors);
    }

    errors
}

fn validate_entry(entry: &str, config: &CaseConfig, errors: &mut Vec<ValidationError>) {
    let mut check = Checker { entry, errors };

    if let Some(nodes) = &config.nodes {
        for (index, node) in nodes.iter().enumerate() {
            check.machine(&format!("nodes[{}]", index), node);
        }
    }
    check.set("platform_type", config.platform_type.as_ref());
    check.set("operating_system", config.operating_system.as_ref());
}

struct Checker<'a> {
    entry: &'a str,
    errors: &'a mut Vec<ValidationError>,
}

impl Checker<'_> {
    fn push(&mut self, rule: &str, message: String) {
        self.errors.push(ValidationError {
            rule: rule.to_string(),
            message: format!("{}: {}", self.entry, message),
            entry: self.entry.to_string(),
        });
    }

    fn machine(&mut self, path: &str, node: &MachineConfig) {
        if node.count == 0 {
            self.push(
                "invalid-repeat",
                format!("{}.count must be at least 1", path),
            );
        }
        self.count(&format!("{}.core_count", path), node.core_count.as_ref());
        self.count(&format!("{}.memory_mb", path), node.memory_mb.as_ref());
        self.count(&format!("{}.gpu_count", path), node.gpu_count.as_ref());
        if let Some(disk) = &node.disk {
            self.count(
                &format!("{}.disk.data_disk_count", path),
                disk.data_disk_count.as_ref(),
            );
            self.count(
                &format!("{}.disk.data_disk_size_gb", path),
                disk.data_disk_size_gb.as_ref(),
            );
            self.set(&format!("{}.disk.disk_type", path), disk.disk_type.as_ref());
        }
        if let Some(nic) = &node.nic {
            self.count(&format!("{}.nic.nic_count", path), nic.nic_count.as_ref());
            self.set(&format!("{}.nic.data_path", path), nic.data_path.as_ref());
        }
    }

    fn count(&mut self, path: &str, count: Option<&CountConfig>) {
        let ranges = match count {
            None | Some(CountConfig::Exact(_)) => return,
            Some(CountConfig::Range(range)) => std::slice::from_ref(range),
            Some(CountConfig::Union(ranges)) => {
                if ranges.is_empty() {
                    self.push("empty-union", format!("{} lists no ranges", path));
                }
                ranges.as_slice()
            }
        };
        for range in ranges {
            if let Err(e) = range_value(range) {
                self.push("invalid-range", format!("{}: {}", path, e));
            }
        }
    }

    fn set(&mut self, path: &str, set: Option<&SetConfig>) {
        if let Some(Err(e)) = set.map(discrete_set) {
            self.push("invalid-set", format!("{}: {}", path, e));
        }
    }
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(catalog: &CatalogFile) -> Result<()> {
    let errors = validate_catalog(catalog);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(EnvMatchError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
