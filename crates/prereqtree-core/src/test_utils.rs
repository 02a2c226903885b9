//! Shared fixtures for prereqtree-core tests

use crate::model::{Course, CourseId};

pub fn id(s: &str) -> CourseId {
    CourseId(s.to_string())
}

/// Course with a fixed ID and the given prerequisite IDs.
pub fn course(course_id: &str, name: &str, prereqs: &[&str]) -> Course {
    Course {
        id: id(course_id),
        name: name.to_string(),
        prerequisites: prereqs.iter().map(|p| id(p)).collect(),
        created_at: 0,
    }
}

/// The four-course chain from basic math up to differential equations:
/// algebra ← calc1 ← calc2, and diffeq requiring algebra and calc2.
pub fn diamond() -> Vec<Course> {
    vec![
        course("algebra", "Algebra", &[]),
        course("calc1", "Calculus I", &["algebra"]),
        course("calc2", "Calculus II", &["calc1"]),
        course("diffeq", "Diff Eq", &["algebra", "calc2"]),
    ]
}
