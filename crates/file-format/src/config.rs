//! Layered JSON configuration loading.
//!
//! A run is configured by one override document on top of a parent document.
//! Any key in the override whose string value starts with `file:` pulls in a
//! child document (resolved against the override's directory) whose keys are
//! merged into the parent first; the override's own keys are applied last
//! and always win. A missing child file is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::errors::LoadError;

/// Prefix marking a config value as a child-document reference.
const FILE_REF_PREFIX: &str = "file:";

fn read_object(path: &Path) -> Result<Map<String, Value>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| LoadError::ParseError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAnObject {
            path: path.display().to_string(),
        }),
    }
}

/// Load `parent`, merge every child referenced from `overrides`, then apply
/// the override document itself. Returns the merged document plus every
/// file that contributed to it.
pub fn load_layered(
    parent: &Path,
    overrides: &Path,
) -> Result<(Map<String, Value>, Vec<PathBuf>), LoadError> {
    let mut merged = read_object(parent)?;
    let mut sources = vec![parent.to_path_buf()];

    let override_doc = read_object(overrides)?;
    let child_dir = overrides.parent().unwrap_or(Path::new("."));

    for value in override_doc.values() {
        let Some(reference) = value.as_str().and_then(|s| s.strip_prefix(FILE_REF_PREFIX))
        else {
            continue;
        };
        let child_path = child_dir.join(reference);
        if !child_path.exists() {
            return Err(LoadError::MissingChild {
                path: child_path.display().to_string(),
            });
        }
        info!(path = %child_path.display(), "merging child config");
        for (key, child_value) in read_object(&child_path)? {
            merged.insert(key, child_value);
        }
        sources.push(child_path);
    }

    // The override's own keys win last.
    for (key, value) in override_doc {
        merged.insert(key, value);
    }
    sources.push(overrides.to_path_buf());

    Ok((merged, sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_json(dir: &Path, name: &str, value: Value) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{}", value).unwrap();
        path
    }

    #[test]
    fn override_keys_win_over_parent_and_children() {
        let dir = tempfile::tempdir().unwrap();
        let parent = write_json(dir.path(), "parent.json", json!({"a": 1, "b": 2}));
        write_json(dir.path(), "child.json", json!({"b": 30, "c": 40}));
        let overrides = write_json(
            dir.path(),
            "run.json",
            json!({"b": 3, "c": 4, "import": "file:child.json"}),
        );

        let (merged, sources) = load_layered(&parent, &overrides).unwrap();
        assert_eq!(merged["a"], json!(1));
        assert_eq!(merged["b"], json!(3), "override beats parent and child");
        assert_eq!(merged["c"], json!(4), "override beats child");
        assert_eq!(merged["import"], json!("file:child.json"));
        assert_eq!(sources.len(), 3);
    }

    #[test]
    fn child_values_beat_the_parent() {
        let dir = tempfile::tempdir().unwrap();
        let parent = write_json(dir.path(), "parent.json", json!({"a": 1, "b": 2}));
        write_json(dir.path(), "child.json", json!({"b": 3, "c": 4}));
        let overrides = write_json(
            dir.path(),
            "run.json",
            json!({"import": "file:child.json"}),
        );

        let (merged, _) = load_layered(&parent, &overrides).unwrap();
        assert_eq!(merged["a"], json!(1));
        assert_eq!(merged["b"], json!(3));
        assert_eq!(merged["c"], json!(4));
    }

    #[test]
    fn missing_child_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let parent = write_json(dir.path(), "parent.json", json!({}));
        let overrides = write_json(
            dir.path(),
            "run.json",
            json!({"import": "file:absent.json"}),
        );

        let err = load_layered(&parent, &overrides).unwrap_err();
        assert!(matches!(err, LoadError::MissingChild { .. }));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let parent = write_json(dir.path(), "parent.json", json!([1, 2, 3]));
        let overrides = write_json(dir.path(), "run.json", json!({}));

        let err = load_layered(&parent, &overrides).unwrap_err();
        assert!(matches!(err, LoadError::NotAnObject { .. }));
    }
}
