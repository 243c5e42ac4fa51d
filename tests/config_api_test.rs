//! Integration tests for config module public API.

use envmatch::config::{
    deep_merge, load_merged_catalog, load_valid_catalog, parse_catalog, validate_catalog,
    CatalogFile, CountConfig,
};
use envmatch::{plan_first, EnvMatchError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_catalog(root: &Path, name: &str, content: &str) {
    let dir = root.join(".envmatch");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn public_api_is_accessible() {
    let catalog = CatalogFile::default();
    assert!(catalog.cases.is_empty());
    assert!(validate_catalog(&catalog).is_empty());
}

#[test]
fn full_catalog_workflow() {
    let temp = TempDir::new().unwrap();
    write_catalog(
        temp.path(),
        "catalog.yml",
        r#"
cases:
  storage:
    nodes:
      - disk:
          data_disk_count: {min: 2}
          data_disk_size_gb: {min: 100}
          disk_type: {allow: [ssd, nvme]}
platforms:
  fast:
    nodes:
      - disk:
          data_disk_count: 4
          data_disk_size_gb: {min: 50, max: 500}
          disk_type: {allow: [nvme]}
"#,
    );

    let catalog = load_valid_catalog(temp.path(), None).unwrap();
    let plan = plan_first(catalog.case("storage").unwrap(), &catalog.platforms).unwrap();
    assert_eq!(plan.platform, "fast");

    let disk = plan.request.fleet().nodes()[0].disk().unwrap();
    assert_eq!(disk.data_disk_count().and_then(|c| c.as_exact()), Some(4));
    assert_eq!(disk.data_disk_size_gb().and_then(|c| c.as_exact()), Some(100));
}

#[test]
fn catalog_merge_workflow() {
    let temp = TempDir::new().unwrap();
    write_catalog(
        temp.path(),
        "catalog.yml",
        "platforms:\n  lab:\n    description: shared lab\n    nodes:\n      - core_count: 4\n",
    );
    write_catalog(
        temp.path(),
        "catalog.local.yml",
        "platforms:\n  lab:\n    nodes:\n      - core_count: 16\n",
    );

    let catalog = load_merged_catalog(temp.path()).unwrap();
    let lab = &catalog.platforms["lab"];
    assert_eq!(lab.description.as_deref(), Some("shared lab"));
    let nodes = lab.nodes.as_ref().unwrap();
    assert_eq!(nodes[0].core_count, Some(CountConfig::Exact(16)));
}

#[test]
fn deep_merge_is_public() {
    let base: serde_yaml::Value = serde_yaml::from_str("a: {b: 1, c: 2}").unwrap();
    let overlay: serde_yaml::Value = serde_yaml::from_str("a: {c: 3}").unwrap();
    let merged = deep_merge(&base, &overlay);
    assert_eq!(merged["a"]["b"].as_u64(), Some(1));
    assert_eq!(merged["a"]["c"].as_u64(), Some(3));
}

#[test]
fn unknown_fields_are_parse_errors() {
    let err = parse_catalog("cases:\n  a:\n    cpus: 4\n", Path::new("catalog.yml")).unwrap_err();
    assert!(matches!(err, EnvMatchError::ConfigParseError { .. }));
}

#[test]
fn validation_errors_are_collected() {
    let temp = TempDir::new().unwrap();
    write_catalog(
        temp.path(),
        "catalog.yml",
        "cases:\n  a:\n    nodes:\n      - memory_mb: []\n        count: 0\n",
    );

    let err = load_valid_catalog(temp.path(), None).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("count must be at least 1"));
    assert!(message.contains("lists no ranges"));
}
