//! Topological leveling: longest prerequisite chain per course

use std::collections::HashMap;

use crate::graph::PrereqGraph;
use crate::model::{Course, CourseId};

/// Level assignment for one course set.
///
/// `level(course) = 1 + max(level(prerequisite))` over valid prerequisites,
/// 0 with none, so a course's level is the length of its longest
/// prerequisite chain. Pure function of the course set: the same input
/// always yields the same mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelMap {
    levels: HashMap<CourseId, u32>,
    max_level: u32,
}

impl LevelMap {
    /// Level of a course; unknown IDs report 0.
    pub fn level(&self, id: &CourseId) -> u32 {
        self.levels.get(id).copied().unwrap_or(0)
    }

    /// Deepest level present (0 when there are no courses).
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CourseId, u32)> + '_ {
        self.levels.iter().map(|(id, &level)| (id, level))
    }
}

enum Visit {
    Visiting,
    Done(i64),
}

/// Assign every course its level. Total even on malformed input: a cycle in
/// stored data makes the in-flight course contribute −1 instead of recursing,
/// so the traversal always terminates and every course gets a level.
pub fn compute_levels(courses: &[Course]) -> LevelMap {
    let graph = PrereqGraph::build(courses);
    let mut state: HashMap<CourseId, Visit> = HashMap::with_capacity(courses.len());
    let mut levels = HashMap::with_capacity(courses.len());
    let mut max_level = 0;

    for course in courses {
        let level = dfs(&graph, &course.id, &mut state).max(0) as u32;
        max_level = max_level.max(level);
        levels.insert(course.id.clone(), level);
    }

    LevelMap { levels, max_level }
}

fn dfs(graph: &PrereqGraph, id: &CourseId, state: &mut HashMap<CourseId, Visit>) -> i64 {
    match state.get(id) {
        Some(Visit::Done(level)) => return *level,
        Some(Visit::Visiting) => return -1,
        None => {}
    }
    state.insert(id.clone(), Visit::Visiting);

    let mut best = -1;
    for prereq in graph.prerequisites_of(id) {
        best = best.max(dfs(graph, prereq, state));
    }

    let level = best + 1;
    state.insert(id.clone(), Visit::Done(level));
    level
}

/// Courses in list-display order: ascending level so prerequisites precede
/// dependents, ties broken by case-insensitive name.
pub fn display_order<'a>(courses: &'a [Course], levels: &LevelMap) -> Vec<&'a Course> {
    let mut ordered: Vec<&Course> = courses.iter().collect();
    ordered.sort_by(|a, b| {
        levels
            .level(&a.id)
            .cmp(&levels.level(&b.id))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    ordered
}
