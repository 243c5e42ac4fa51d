//! Catalog loading, parsing, and validation.
//!
//! A catalog names the test cases (requirements) and platforms
//! (capabilities) of a project:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//! - Validation in [`validator`]
//! - Conversion to engine descriptors in [`catalog`]
//!
//! # Example
//!
//! ```
//! use envmatch::config::{load_merged_catalog, validate, Catalog};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".envmatch");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("catalog.yml"),
//!     "cases:\n  smoke:\n    nodes:\n      - core_count: {min: 2}\n",
//! )
//! .unwrap();
//!
//! let file = load_merged_catalog(temp.path()).unwrap();
//! validate(&file).unwrap();
//! let catalog = Catalog::from_file(&file).unwrap();
//! assert!(catalog.case("smoke").is_ok());
//! ```
//!
//! # Catalog File Locations
//!
//! Layers are merged in this order:
//! 1. Project catalog (`.envmatch/catalog.yml`)
//! 2. Local overlay (`.envmatch/catalog.local.yml`)

pub mod catalog;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use catalog::Catalog;

pub use schema::{
    catalog_schema, CaseConfig, CatalogFile, CountConfig, DiskConfig, MachineConfig, NicConfig,
    RangeConfig, SetConfig,
};

pub use loader::{
    find_project_root, load_catalog, load_catalog_file, load_catalog_value, load_merged_catalog,
    parse_catalog, CatalogPaths,
};

pub use merger::{deep_merge, merge_layers};

pub use validator::{validate, validate_catalog, ValidationError};

/// Load, validate, and convert a project's catalog in one step.
///
/// # Errors
///
/// Returns the loader's errors, or `ConfigValidationError` listing every
/// invalid value.
pub fn load_valid_catalog(
    project_root: &std::path::Path,
    override_path: Option<&std::path::Path>,
) -> crate::error::Result<Catalog> {
    let file = load_catalog(project_root, override_path)?;
    validate(&file)?;
    Catalog::from_file(&file)
}
