//! Persisted workspace document and legacy migration

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::model::{AppData, Course, CourseId, DATA_VERSION, LegacyCourse, now_millis};
use crate::store::CourseStore;

/// Data directory: .prereqtree/
pub const DATA_DIR: &str = ".prereqtree";

/// Versioned workspace document
pub const APP_DATA_FILE: &str = "workspaces.json";

/// Legacy flat course list (pre-workspace format)
pub const LEGACY_FILE: &str = "courses.json";

/// Get data directory path
pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

/// Get workspace document path
pub fn app_data_path(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join(APP_DATA_FILE)
}

/// Get legacy course list path
pub fn legacy_path(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join(LEGACY_FILE)
}

/// Ensure data directory exists
pub fn ensure_data_dir(root: &Path) -> std::io::Result<()> {
    let dir = data_dir(root);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Write the workspace document.
pub fn save_app_data(root: &Path, data: &AppData) -> anyhow::Result<()> {
    ensure_data_dir(root)?;
    let path = app_data_path(root);

    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(&path, json)?;

    tracing::debug!("workspace document saved: {}", path.display());
    Ok(())
}

/// Read the workspace document. `None` when the file is missing or is not a
/// version-2 document.
pub fn load_app_data(root: &Path) -> anyhow::Result<Option<AppData>> {
    let path = app_data_path(root);
    if !path.exists() {
        return Ok(None);
    }

    let json = std::fs::read_to_string(&path)?;
    let data: AppData = serde_json::from_str(&json)?;
    if data.version != DATA_VERSION {
        tracing::warn!(version = data.version, "unsupported document version");
        return Ok(None);
    }

    tracing::debug!("workspace document loaded from: {}", path.display());
    Ok(Some(data))
}

/// Read and normalize the legacy course list. Best effort: any read or parse
/// problem yields `None`.
pub fn load_legacy(root: &Path) -> Option<Vec<Course>> {
    let path = legacy_path(root);
    if !path.exists() {
        return None;
    }
    let json = std::fs::read_to_string(&path).ok()?;
    let legacy: Vec<LegacyCourse> = serde_json::from_str(&json).ok()?;
    Some(normalize_legacy(legacy))
}

/// Remove the legacy file once migrated.
pub fn clear_legacy(root: &Path) -> std::io::Result<()> {
    let path = legacy_path(root);
    if path.exists() {
        std::fs::remove_file(&path)?;
    }
    Ok(())
}

/// Load the document, falling back to a fresh default and applying the
/// one-shot legacy migration when the store is empty. Never fails: every
/// problem degrades to the default document.
pub fn load_or_migrate(root: &Path) -> AppData {
    let data = match load_app_data(root) {
        Ok(Some(data)) => data,
        Ok(None) => AppData::default_document(),
        Err(err) => {
            tracing::warn!("failed to load workspace document, starting fresh: {err:#}");
            AppData::default_document()
        }
    };

    let mut store = CourseStore::from_data(data);
    if let Some(legacy) = load_legacy(root) {
        if store.migrate_legacy(legacy) {
            if let Err(err) = clear_legacy(root) {
                tracing::warn!("failed to clear legacy course list: {err}");
            }
            tracing::debug!("legacy course list migrated");
        }
    }
    store.into_data()
}

/// Convert legacy records into the current course shape. Prerequisite
/// entries resolve as another record's ID first, then as a case-insensitive
/// name; unresolved entries and self references are dropped.
fn normalize_legacy(legacy: Vec<LegacyCourse>) -> Vec<Course> {
    let created_at = now_millis();

    // Assign IDs up front so name references can resolve to them.
    let assigned: Vec<(CourseId, LegacyCourse)> = legacy
        .into_iter()
        .map(|lc| {
            let id = if lc.id.is_empty() {
                CourseId::generate()
            } else {
                CourseId(lc.id.clone())
            };
            (id, lc)
        })
        .collect();

    let by_id: HashMap<&str, &CourseId> = assigned
        .iter()
        .map(|(id, _)| (id.0.as_str(), id))
        .collect();
    let by_name: HashMap<String, &CourseId> = assigned
        .iter()
        .map(|(id, lc)| (lc.course_name.to_lowercase(), id))
        .collect();

    assigned
        .iter()
        .map(|(id, lc)| Course {
            id: id.clone(),
            name: lc.course_name.clone(),
            prerequisites: lc
                .course_prerequisites
                .iter()
                .filter_map(|entry| {
                    by_id
                        .get(entry.as_str())
                        .or_else(|| by_name.get(&entry.to_lowercase()))
                        .filter(|resolved| **resolved != id)
                        .map(|resolved| (*resolved).clone())
                })
                .collect(),
            created_at,
        })
        .collect()
}
