//! Validation taxonomy for store mutations

use crate::model::CourseId;
use thiserror::Error;

/// Why a course mutation was rejected.
///
/// Every variant is detected before anything is written; a failed operation
/// leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("course name is required")]
    EmptyName,

    #[error("course name must be 100 characters or fewer")]
    NameTooLong,

    /// Carries the stored name of the colliding course.
    #[error("a course named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("these prerequisites would create a cycle")]
    CycleDetected,

    #[error("no course with id {0}")]
    UnknownCourse(CourseId),
}
