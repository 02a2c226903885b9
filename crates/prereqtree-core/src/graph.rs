//! Derived prerequisite graph over petgraph::DiGraph

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::{Course, CourseId};

/// The prerequisite graph for one course set. Edges run prerequisite → dependent.
///
/// Rebuilt fresh from the course list whenever it changes. Dangling
/// prerequisite references are filtered out at build time.
pub struct PrereqGraph {
    inner: DiGraph<CourseId, ()>,
    index: HashMap<CourseId, NodeIndex>,
}

impl std::fmt::Debug for PrereqGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrereqGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl PrereqGraph {
    pub fn build(courses: &[Course]) -> Self {
        let mut inner = DiGraph::new();
        let mut index = HashMap::with_capacity(courses.len());

        for course in courses {
            let idx = inner.add_node(course.id.clone());
            index.insert(course.id.clone(), idx);
        }
        for course in courses {
            let target = index[&course.id];
            for prereq in &course.prerequisites {
                if let Some(&source) = index.get(prereq) {
                    inner.add_edge(source, target, ());
                }
            }
        }

        PrereqGraph { inner, index }
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.index.contains_key(id)
    }

    /// Total number of courses.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of valid prerequisite edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Valid prerequisites of a course (dangling references already gone).
    pub fn prerequisites_of(&self, id: &CourseId) -> Vec<&CourseId> {
        match self.index.get(id) {
            Some(&idx) => self
                .inner
                .neighbors_directed(idx, Direction::Incoming)
                .map(|n| &self.inner[n])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Courses that list `id` as a prerequisite.
    pub fn dependents_of(&self, id: &CourseId) -> Vec<&CourseId> {
        match self.index.get(id) {
            Some(&idx) => self
                .inner
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|n| &self.inner[n])
                .collect(),
            None => Vec::new(),
        }
    }

    /// All valid (prerequisite, dependent) pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&CourseId, &CourseId)> + '_ {
        self.inner.edge_indices().filter_map(move |e| {
            let (source, target) = self.inner.edge_endpoints(e)?;
            Some((&self.inner[source], &self.inner[target]))
        })
    }

    /// Whether any of `starts` reaches `goal` following prerequisite lists.
    /// One shared visited-set keeps the walk linear in edges even on
    /// diamond-shaped dependencies.
    fn any_reaches(&self, starts: impl IntoIterator<Item = NodeIndex>, goal: NodeIndex) -> bool {
        let mut visited = HashSet::new();
        let mut stack: Vec<NodeIndex> = starts.into_iter().collect();

        while let Some(idx) = stack.pop() {
            if idx == goal {
                return true;
            }
            if !visited.insert(idx) {
                continue;
            }
            stack.extend(self.inner.neighbors_directed(idx, Direction::Incoming));
        }
        false
    }
}

/// Would assigning `candidates` as the prerequisites of `course_id` close a
/// directed cycle?
///
/// Runs against the committed course set before any mutation; the caller
/// rejects the edit when this returns true, leaving the store untouched.
/// Unknown candidate IDs terminate their branch of the search.
pub fn creates_cycle(courses: &[Course], course_id: &CourseId, candidates: &[CourseId]) -> bool {
    if candidates.iter().any(|c| c == course_id) {
        return true;
    }

    let graph = PrereqGraph::build(courses);
    let Some(&goal) = graph.index.get(course_id) else {
        return false;
    };
    let starts: Vec<NodeIndex> = candidates
        .iter()
        .filter_map(|c| graph.index.get(c).copied())
        .collect();

    graph.any_reaches(starts, goal)
}
