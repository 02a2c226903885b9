//! Core data structures for the course graph

use serde::{Deserialize, Serialize};

/// Version tag of the persisted workspace document and of export files.
pub const DATA_VERSION: u32 = 2;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Unique, stable identifier for a course. Assigned at creation, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CourseId(pub String);

impl CourseId {
    pub fn generate() -> Self {
        CourseId(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WorkspaceId(pub String);

impl WorkspaceId {
    pub fn generate() -> Self {
        WorkspaceId(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A course and the prerequisites it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// IDs of other courses in the same workspace, insertion-ordered.
    /// Dangling references are tolerated by every reader.
    #[serde(default)]
    pub prerequisites: Vec<CourseId>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Course {
    /// Build a course with a fresh ID and creation stamp.
    pub fn new(name: impl Into<String>, prerequisites: Vec<CourseId>) -> Self {
        Course {
            id: CourseId::generate(),
            name: name.into(),
            prerequisites,
            created_at: now_millis(),
        }
    }
}

/// A named course set with bookkeeping stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_millis();
        Workspace {
            id: WorkspaceId::generate(),
            name: name.into(),
            courses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The persisted document: every workspace plus which one is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub version: u32,
    #[serde(rename = "activeWorkspaceId")]
    pub active_workspace_id: WorkspaceId,
    pub workspaces: Vec<Workspace>,
}

impl AppData {
    /// A fresh document: one empty "Default" workspace, active.
    pub fn default_document() -> Self {
        let workspace = Workspace::new("Default");
        AppData {
            version: DATA_VERSION,
            active_workspace_id: workspace.id.clone(),
            workspaces: vec![workspace],
        }
    }
}

/// Pre-workspace flat record. `course_prerequisites` entries may be course
/// IDs or free-text course names; migration resolves both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyCourse {
    #[serde(default)]
    pub id: String,
    pub course_name: String,
    #[serde(default)]
    pub course_prerequisites: Vec<String>,
}
