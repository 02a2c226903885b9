//! Course store: validated, atomic mutations over the active workspace

use crate::error::StoreError;
use crate::graph::creates_cycle;
use crate::layout::{LayoutResult, Theme, layout_graph};
use crate::level::{LevelMap, compute_levels, display_order};
use crate::model::{AppData, Course, CourseId, Workspace, WorkspaceId, now_millis};

/// Longest accepted course name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// A layout tagged with the store revision it was computed against.
///
/// A snapshot whose revision no longer matches the store is stale: the
/// consumer discards it and computes a fresh one. Last write wins, partial
/// layouts are never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub revision: u64,
    pub layout: LayoutResult,
}

/// Owns the workspace document and applies course mutations atomically:
/// every operation validates first and commits only on success.
#[derive(Debug, Clone)]
pub struct CourseStore {
    data: AppData,
    revision: u64,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::from_data(AppData::default_document())
    }

    /// Adopt a loaded document, repairing an empty workspace list or a
    /// dangling active-workspace reference.
    pub fn from_data(mut data: AppData) -> Self {
        if data.workspaces.is_empty() {
            data.workspaces.push(Workspace::new("Default"));
        }
        if !data
            .workspaces
            .iter()
            .any(|ws| ws.id == data.active_workspace_id)
        {
            data.active_workspace_id = data.workspaces[0].id.clone();
        }
        CourseStore { data, revision: 0 }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn into_data(self) -> AppData {
        self.data
    }

    /// Bumped on every successful mutation and workspace switch.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn active_workspace(&self) -> &Workspace {
        self.data
            .workspaces
            .iter()
            .find(|ws| ws.id == self.data.active_workspace_id)
            .unwrap_or(&self.data.workspaces[0])
    }

    /// Courses of the active workspace, in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.active_workspace().courses
    }

    /// Run a mutation against the active workspace, refreshing its
    /// `updated_at` stamp and the store revision.
    fn mutate_active<R>(&mut self, f: impl FnOnce(&mut Workspace) -> R) -> R {
        let active = self.data.active_workspace_id.clone();
        let pos = self
            .data
            .workspaces
            .iter()
            .position(|ws| ws.id == active)
            .unwrap_or(0);
        let ws = &mut self.data.workspaces[pos];
        let out = f(ws);
        ws.updated_at = now_millis();
        self.revision += 1;
        out
    }

    // ── Course operations ───────────────────────────────────

    /// Add a course to the active workspace. Validation failures leave the
    /// store untouched.
    pub fn add_course(
        &mut self,
        name: &str,
        prerequisites: Vec<CourseId>,
    ) -> Result<Course, StoreError> {
        let name = validate_name(self.courses(), name, None)?;
        let course = Course::new(name, prerequisites);
        tracing::debug!(course = %course.id, "add course");
        self.mutate_active(|ws| ws.courses.push(course.clone()));
        Ok(course)
    }

    /// Replace a course's name and prerequisite list in place. `id` and
    /// `created_at` never change. Rejected edits (duplicate name, cycle)
    /// leave every course byte-for-byte as it was.
    pub fn update_course(
        &mut self,
        id: &CourseId,
        name: &str,
        prerequisites: Vec<CourseId>,
    ) -> Result<Course, StoreError> {
        if !self.courses().iter().any(|c| &c.id == id) {
            return Err(StoreError::UnknownCourse(id.clone()));
        }
        let name = validate_name(self.courses(), name, Some(id))?;
        if creates_cycle(self.courses(), id, &prerequisites) {
            return Err(StoreError::CycleDetected);
        }

        let updated = self.mutate_active(|ws| {
            ws.courses.iter_mut().find(|c| &c.id == id).map(|course| {
                course.name = name;
                course.prerequisites = prerequisites;
                course.clone()
            })
        });
        updated.ok_or_else(|| StoreError::UnknownCourse(id.clone()))
    }

    /// Remove a course and strip its ID from every other course's
    /// prerequisites in the same step. Unknown IDs are a no-op.
    pub fn delete_course(&mut self, id: &CourseId) {
        if !self.courses().iter().any(|c| &c.id == id) {
            return;
        }
        tracing::debug!(course = %id, "delete course");
        self.mutate_active(|ws| {
            ws.courses.retain(|c| &c.id != id);
            for course in &mut ws.courses {
                course.prerequisites.retain(|p| p != id);
            }
        });
    }

    /// Empty the active workspace's course list.
    pub fn reset_courses(&mut self) {
        self.mutate_active(|ws| ws.courses.clear());
    }

    // ── Workspace operations ────────────────────────────────

    /// Create a workspace and make it active.
    pub fn create_workspace(&mut self, name: &str) -> WorkspaceId {
        let ws = Workspace::new(name);
        let id = ws.id.clone();
        self.data.workspaces.push(ws);
        self.data.active_workspace_id = id.clone();
        self.revision += 1;
        id
    }

    /// Rename a workspace. Unknown IDs are a no-op; names are not
    /// uniqueness-checked.
    pub fn rename_workspace(&mut self, id: &WorkspaceId, name: &str) {
        if let Some(ws) = self.data.workspaces.iter_mut().find(|ws| &ws.id == id) {
            ws.name = name.to_string();
            ws.updated_at = now_millis();
            self.revision += 1;
        }
    }

    /// Delete a workspace. Keeps at least one; deleting the active one
    /// activates the first remaining.
    pub fn delete_workspace(&mut self, id: &WorkspaceId) {
        if self.data.workspaces.len() <= 1 {
            return;
        }
        let before = self.data.workspaces.len();
        self.data.workspaces.retain(|ws| &ws.id != id);
        if self.data.workspaces.len() == before {
            return;
        }
        if &self.data.active_workspace_id == id {
            self.data.active_workspace_id = self.data.workspaces[0].id.clone();
        }
        self.revision += 1;
    }

    /// Switch the active workspace. Unknown IDs are a no-op.
    pub fn set_active_workspace(&mut self, id: &WorkspaceId) {
        if &self.data.active_workspace_id == id {
            return;
        }
        if self.data.workspaces.iter().any(|ws| &ws.id == id) {
            self.data.active_workspace_id = id.clone();
            self.revision += 1;
        }
    }

    /// Apply an imported course set: into a fresh named workspace which
    /// becomes active, or over the active workspace's courses.
    pub fn import_courses(&mut self, courses: Vec<Course>, workspace_name: Option<&str>) {
        tracing::debug!(count = courses.len(), "import courses");
        match workspace_name {
            Some(name) => {
                let mut ws = Workspace::new(name);
                ws.courses = courses;
                self.data.active_workspace_id = ws.id.clone();
                self.data.workspaces.push(ws);
                self.revision += 1;
            }
            None => self.mutate_active(|ws| ws.courses = courses),
        }
    }

    /// One-shot legacy import. Applies only when the store is fresh (a
    /// single workspace with no courses); returns whether it did, so the
    /// caller knows to clear the legacy data.
    pub fn migrate_legacy(&mut self, legacy: Vec<Course>) -> bool {
        if legacy.is_empty() {
            return false;
        }
        let fresh = self.data.workspaces.len() == 1 && self.data.workspaces[0].courses.is_empty();
        if !fresh {
            return false;
        }
        tracing::debug!(count = legacy.len(), "migrate legacy courses");
        self.mutate_active(|ws| {
            ws.name = "Default".to_string();
            ws.courses = legacy;
        });
        true
    }

    // ── Derived views ───────────────────────────────────────

    /// Level mapping for the active workspace's courses.
    pub fn levels(&self) -> LevelMap {
        compute_levels(self.courses())
    }

    /// Courses in list order: ascending level, prerequisites first.
    pub fn ordered_courses(&self) -> Vec<&Course> {
        let courses = self.courses();
        let levels = compute_levels(courses);
        display_order(courses, &levels)
    }

    /// Lay out the current course set, stamped with the current revision.
    /// Also serves as the manual "recompute layout" trigger: every call lays
    /// out fresh, discarding whatever positions a consumer was holding.
    pub fn compute_layout(&self, theme: Theme) -> LayoutSnapshot {
        LayoutSnapshot {
            revision: self.revision,
            layout: layout_graph(self.courses(), theme),
        }
    }

    /// Whether a snapshot still reflects the store.
    pub fn is_current(&self, snapshot: &LayoutSnapshot) -> bool {
        snapshot.revision == self.revision
    }
}

impl Default for CourseStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(
    courses: &[Course],
    name: &str,
    exclude: Option<&CourseId>,
) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(StoreError::NameTooLong);
    }
    let lower = trimmed.to_lowercase();
    if let Some(existing) = courses
        .iter()
        .find(|c| c.name.to_lowercase() == lower && exclude != Some(&c.id))
    {
        return Err(StoreError::DuplicateName(existing.name.clone()));
    }
    Ok(trimmed.to_string())
}
