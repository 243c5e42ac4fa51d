//! Catalog discovery and loading.

use crate::config::merger::merge_layers;
use crate::config::schema::CatalogFile;
use crate::error::{EnvMatchError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory holding a project's catalog files.
pub const CATALOG_DIR: &str = ".envmatch";
/// Project catalog file name.
pub const CATALOG_FILE: &str = "catalog.yml";
/// Local overlay file name; usually not committed.
pub const LOCAL_CATALOG_FILE: &str = "catalog.local.yml";

/// Catalog files for a project, in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    /// Project catalog: .envmatch/catalog.yml
    pub project: Option<PathBuf>,

    /// Local overlay: .envmatch/catalog.local.yml
    pub local: Option<PathBuf>,
}

impl CatalogPaths {
    /// Discover catalog files under `project_root`.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CATALOG_DIR);
        Self {
            project: existing(dir.join(CATALOG_FILE)),
            local: existing(dir.join(LOCAL_CATALOG_FILE)),
        }
    }

    /// All existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Find the project root by walking up from `start`.
///
/// A directory containing `.envmatch/` wins; a `.git` directory is the
/// fallback marker.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CATALOG_DIR).is_dir() || dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvMatchError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvMatchError::Io(e)
        }
    })
}

/// Parse YAML content into a catalog file.
///
/// `source_path` is only used for error reporting.
pub fn parse_catalog(content: &str, source_path: &Path) -> Result<CatalogFile> {
    serde_yaml::from_str(content).map_err(|e| EnvMatchError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single catalog file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = read(path)?;
    parse_catalog(&content, path)
}

/// Load a catalog file as a raw YAML value, for merging.
pub fn load_catalog_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read(path)?;
    serde_yaml::from_str(&content).map_err(|e| EnvMatchError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project catalog with its local overlay merged on top.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the project catalog is missing.
/// Returns `ConfigParseError` if any layer is invalid.
pub fn load_merged_catalog(project_root: &Path) -> Result<CatalogFile> {
    let paths = CatalogPaths::discover(project_root);
    let project_path = project_root.join(CATALOG_DIR).join(CATALOG_FILE);

    if paths.project.is_none() {
        return Err(EnvMatchError::ConfigNotFound { path: project_path });
    }

    let layers = paths
        .all_existing()
        .into_iter()
        .map(|path| {
            debug!(path = %path.display(), "loading catalog layer");
            load_catalog_value(path)
        })
        .collect::<Result<Vec<_>>>()?;

    serde_yaml::from_value(merge_layers(&layers)).map_err(|e| EnvMatchError::ConfigParseError {
        path: project_path,
        message: format!("Failed to parse merged catalog: {}", e),
    })
}

/// Load a catalog, either a single explicit file or the merged project
/// layers.
pub fn load_catalog(project_root: &Path, override_path: Option<&Path>) -> Result<CatalogFile> {
    match override_path {
        Some(path) => {
            debug!(path = %path.display(), "loading catalog override");
            load_catalog_file(path)
        }
        None => load_merged_catalog(project_root),
    }
}
