//! Workspace import/export in the version-2 file format

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Course, CourseId, DATA_VERSION, Workspace, now_millis};

/// Shape of an exported workspace file.
#[derive(Debug, Serialize, Deserialize)]
struct ExportFile {
    version: u32,
    workspace: ExportWorkspace,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExportWorkspace {
    name: String,
    courses: Vec<ExportCourse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExportCourse {
    id: CourseId,
    name: String,
    #[serde(default)]
    prerequisites: Vec<CourseId>,
}

/// Why an import was rejected. Nothing is created or modified on failure;
/// the `Display` text is what the UI shows the user.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to parse JSON file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid file format, expected a version 2 workspace export")]
    InvalidFormat,
}

/// A parsed import, ready to hand to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedWorkspace {
    pub name: String,
    pub courses: Vec<Course>,
}

/// Serialize a workspace for download.
pub fn export_workspace(workspace: &Workspace) -> Result<String, ImportError> {
    let file = ExportFile {
        version: DATA_VERSION,
        workspace: ExportWorkspace {
            name: workspace.name.clone(),
            courses: workspace
                .courses
                .iter()
                .map(|c| ExportCourse {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    prerequisites: c.prerequisites.clone(),
                })
                .collect(),
        },
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse and validate an export file.
///
/// Prerequisite IDs that do not resolve within the imported course set are
/// dropped. Imported courses get fresh creation stamps; IDs are kept as-is
/// so edges survive the round trip.
pub fn import_workspace(json: &str) -> Result<ImportedWorkspace, ImportError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let version_ok = value.get("version").and_then(|v| v.as_u64()) == Some(DATA_VERSION as u64);
    let courses_ok = value
        .pointer("/workspace/courses")
        .map_or(false, |c| c.is_array());
    if !version_ok || !courses_ok {
        return Err(ImportError::InvalidFormat);
    }

    let file: ExportFile = serde_json::from_value(value).map_err(|_| ImportError::InvalidFormat)?;

    let ids: HashSet<CourseId> = file
        .workspace
        .courses
        .iter()
        .map(|c| c.id.clone())
        .collect();
    let created_at = now_millis();
    let courses = file
        .workspace
        .courses
        .into_iter()
        .map(|c| Course {
            id: c.id,
            name: c.name,
            prerequisites: c
                .prerequisites
                .into_iter()
                .filter(|p| ids.contains(p))
                .collect(),
            created_at,
        })
        .collect();

    Ok(ImportedWorkspace {
        name: file.workspace.name,
        courses,
    })
}
