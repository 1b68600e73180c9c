//! Typed configuration and merged-document application.
//!
//! The merged JSON document is flat: run settings, case geometry, and
//! cluster offsets share one key space, and each key either lands on a
//! declared field or is reported. Unknown keys are dropped with a structured
//! warning (and a `tracing` diagnostic) — never an error, so an old config
//! keeps building against a newer generator.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use case_types::{CaseParams, Side};

use crate::cluster::ClusterKind;
use crate::types::ClusterError;

/// A configuration key that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub key: String,
    pub detail: String,
}

/// Run-level settings that are not geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Which hand to generate. The left side mirrors at export.
    pub side: Side,
    /// Which cluster variant to build.
    pub cluster: ClusterKind,
    /// Directory exported files are written into.
    pub output_dir: String,
    /// Stem of exported file names.
    pub base_name: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            side: Side::Right,
            cluster: ClusterKind::Orbit,
            output_dir: "things".to_string(),
            base_name: "case".to_string(),
        }
    }
}

const RUN_SETTING_KEYS: &[&str] = &["side", "cluster", "output_dir", "base_name"];

const CASE_PARAM_KEYS: &[&str] = &[
    "ncols",
    "nrows",
    "alpha",
    "beta",
    "centercol",
    "centerrow",
    "tenting_angle",
    "keyboard_z_offset",
    "keyswitch_width",
    "keyswitch_height",
    "mount_width",
    "mount_height",
    "plate_thickness",
    "web_thickness",
    "post_size",
    "post_adj",
    "extra_width",
    "extra_height",
    "cap_top_height",
    "column_offsets",
    "ball_diameter",
    "ball_wall_clearance",
    "thumb_offsets",
    "wall_x_offset",
    "wall_y_offset",
    "wall_z_offset",
    "wall_thickness",
    "screw_insert_radius",
    "screw_insert_height",
    "tessellation_tolerance",
];

const CLUSTER_CONFIG_KEYS: &[&str] = &[
    "translation_offset",
    "rotation_offset",
    "base_rotation",
    "key_diameter",
    "key_translation_offsets",
    "key_rotation_offsets",
    "post_offsets",
    "wall_offsets",
    "plate_rotations",
    "plate_gap",
    "screw_offset",
];

/// Per-cluster placement and connector offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Whole-cluster translation on top of the derived origin.
    pub translation_offset: [f64; 3],
    /// Whole-cluster rotation on top of the base rotation.
    pub rotation_offset: [f64; 3],
    /// Base orientation of the cluster before offsets.
    pub base_rotation: [f64; 3],
    /// Diameter of the circle the keys fan around.
    pub key_diameter: f64,
    /// Per-key translation tweaks, indexed by `ClusterKey::index`.
    pub key_translation_offsets: [[f64; 3]; 4],
    /// Per-key rotation tweaks.
    pub key_rotation_offsets: [[f64; 3]; 4],
    /// Support post offsets under the trackball mount.
    pub post_offsets: [[f64; 3]; 4],
    /// Per-key wall nudges.
    pub wall_offsets: [[f64; 3]; 4],
    /// Switch plate spin per key, about the plate normal.
    pub plate_rotations: [f64; 4],
    /// Lift closing the seam between plate-level and wall-level posts.
    pub plate_gap: f64,
    /// Screw boss position relative to the cluster origin.
    pub screw_offset: [f64; 3],
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            translation_offset: [0.0; 3],
            rotation_offset: [0.0; 3],
            base_rotation: [10.0, -15.0, 5.0],
            key_diameter: 70.0,
            key_translation_offsets: [[0.0; 3]; 4],
            key_rotation_offsets: [[0.0; 3]; 4],
            post_offsets: [[0.0; 3]; 4],
            wall_offsets: [[0.0; 3]; 4],
            plate_rotations: [0.0; 4],
            plate_gap: 0.0,
            screw_offset: [-55.0, -40.0, -16.0],
        }
    }
}

/// Everything a build run needs, resolved from one merged document.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub params: CaseParams,
    pub settings: RunSettings,
    pub cluster_config: ClusterConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Merge `overlay` onto `base`; overlay values win on key collision.
pub fn merge_documents(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Apply the keys of `doc` that are declared in `keys` onto `target`,
/// one at a time. Returns the consumed key set; keys whose value does not
/// deserialize into the field become warnings and leave the field unchanged.
fn apply_known<T>(
    target: &mut T,
    keys: &[&str],
    doc: &Map<String, Value>,
    warnings: &mut Vec<ConfigWarning>,
) -> Result<HashSet<String>, ClusterError>
where
    T: Serialize + DeserializeOwned,
{
    let mut consumed = HashSet::new();

    for (key, value) in doc {
        if !keys.contains(&key.as_str()) {
            continue;
        }
        consumed.insert(key.clone());

        let mut candidate = serde_json::to_value(&*target).map_err(|e| ClusterError::Config {
            reason: format!("failed to serialize current config: {}", e),
        })?;
        let Value::Object(map) = &mut candidate else {
            return Err(ClusterError::Config {
                reason: "configuration target is not a JSON object".to_string(),
            });
        };
        map.insert(key.clone(), value.clone());

        match serde_json::from_value::<T>(candidate) {
            Ok(updated) => *target = updated,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "config value rejected");
                warnings.push(ConfigWarning {
                    key: key.clone(),
                    detail: format!("value rejected: {}", e),
                });
            }
        }
    }

    Ok(consumed)
}

/// Resolve a merged document into typed configuration.
///
/// Every key must land on a declared field of the run settings, the case
/// parameters, or the cluster configuration; leftovers are returned as
/// warnings and dropped. Cluster defaults come from the variant the
/// document selects, then the document's own cluster keys override them.
pub fn resolve(doc: &Map<String, Value>) -> Result<ResolvedConfig, ClusterError> {
    let mut warnings = Vec::new();

    let mut settings = RunSettings::default();
    let consumed_settings = apply_known(&mut settings, RUN_SETTING_KEYS, doc, &mut warnings)?;

    let mut params = CaseParams::default();
    let consumed_params = apply_known(&mut params, CASE_PARAM_KEYS, doc, &mut warnings)?;

    let mut cluster_config = settings.cluster.default_config();
    let consumed_cluster =
        apply_known(&mut cluster_config, CLUSTER_CONFIG_KEYS, doc, &mut warnings)?;

    for key in doc.keys() {
        if consumed_settings.contains(key)
            || consumed_params.contains(key)
            || consumed_cluster.contains(key)
        {
            continue;
        }
        warn!(key = key.as_str(), "no declared field for config key");
        warnings.push(ConfigWarning {
            key: key.clone(),
            detail: "no declared field for this key".to_string(),
        });
    }

    Ok(ResolvedConfig {
        params,
        settings,
        cluster_config,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn overlay_wins_on_collision() {
        let base = doc(json!({"a": 1, "b": 2}));
        let overlay = doc(json!({"b": 3, "c": 4}));
        let merged = merge_documents(&base, &overlay);
        assert_eq!(Value::Object(merged), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn unknown_keys_warn_and_are_dropped() {
        let document = doc(json!({"ncols": 6, "no_such_knob": true}));
        let resolved = resolve(&document).unwrap();
        assert_eq!(resolved.params.ncols, 6);
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.warnings[0].key, "no_such_knob");
    }

    #[test]
    fn mistyped_value_warns_and_keeps_the_default() {
        let document = doc(json!({"key_diameter": "wide"}));
        let resolved = resolve(&document).unwrap();
        assert_eq!(
            resolved.cluster_config.key_diameter,
            ClusterConfig::default().key_diameter
        );
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.warnings[0].key, "key_diameter");
    }

    #[test]
    fn cluster_selection_changes_the_defaults() {
        let orbit = resolve(&doc(json!({"cluster": "orbit"}))).unwrap();
        let compact = resolve(&doc(json!({"cluster": "compact"}))).unwrap();
        assert_ne!(
            orbit.cluster_config.post_offsets,
            compact.cluster_config.post_offsets
        );
        assert!(orbit.warnings.is_empty());
        assert!(compact.warnings.is_empty());
    }

    #[test]
    fn document_overrides_variant_defaults() {
        let document = doc(json!({
            "cluster": "compact",
            "plate_gap": 2.5,
            "wall_offsets": [
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0]
            ],
        }));
        let resolved = resolve(&document).unwrap();
        assert_eq!(resolved.cluster_config.plate_gap, 2.5);
        assert_eq!(resolved.cluster_config.wall_offsets, [[0.0; 3]; 4]);
    }
}
