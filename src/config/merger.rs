//! Layering a local catalog overlay onto the project catalog.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively, so an overlay can tweak one field of
//!   one platform without restating the rest
//! - Sequences are replaced entirely: an overlay `nodes:` list is the new
//!   fleet, never spliced into the old one
//! - `null` in the overlay deletes the key from the base
//! - Scalars in the overlay replace the base

use serde_yaml::Value;

/// Deep merge `overlay` onto `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge catalog layers in order (later overrides earlier).
///
/// An empty file parses to `null`; such a layer contributes nothing.
pub fn merge_layers(layers: &[Value]) -> Value {
    layers
        .iter()
        .filter(|layer| !layer.is_null())
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_tweaks_one_field() {
        let base = yaml(
            r#"
platforms:
  azure:
    platform_type: {allow: [azure]}
    operating_system: {allow: [linux, windows]}
"#,
        );
        let overlay = yaml(
            r#"
platforms:
  azure:
    operating_system: {allow: [linux]}
"#,
        );

        let result = deep_merge(&base, &overlay);
        let azure = &result["platforms"]["azure"];

        assert_eq!(azure["platform_type"]["allow"][0], "azure");
        let os = azure["operating_system"]["allow"].as_sequence().unwrap();
        assert_eq!(os.len(), 1);
        assert_eq!(os[0], "linux");
    }

    #[test]
    fn node_lists_are_replaced_not_spliced() {
        let base = yaml(
            r#"
nodes:
  - core_count: 4
  - core_count: 8
"#,
        );
        let overlay = yaml(
            r#"
nodes:
  - core_count: 16
"#,
        );

        let result = deep_merge(&base, &overlay);
        let nodes = result["nodes"].as_sequence().unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["core_count"], 16);
    }

    #[test]
    fn null_removes_platform() {
        let base = yaml(
            r#"
platforms:
  libvirt: {}
  azure: {}
"#,
        );
        let overlay = yaml("platforms:\n  azure: null\n");

        let result = deep_merge(&base, &overlay);

        assert!(result["platforms"].get("azure").is_none());
        assert!(result["platforms"].get("libvirt").is_some());
    }

    #[test]
    fn scalar_overlay_replaces_mapping_base() {
        let base = yaml("gpu_count: {min: 1, max: 4}");
        let overlay = yaml("gpu_count: 2");

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["gpu_count"], 2);
    }

    #[test]
    fn layers_merge_in_order() {
        let layers = vec![yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")];

        let result = merge_layers(&layers);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }

    #[test]
    fn empty_layer_changes_nothing() {
        let layers = vec![yaml("cases:\n  smoke: {}\n"), yaml("")];
        let result = merge_layers(&layers);
        assert!(result["cases"].get("smoke").is_some());
    }

    #[test]
    fn no_layers_is_empty_mapping() {
        let result = merge_layers(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
