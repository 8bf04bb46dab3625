//! Mentor repository port.
//!
//! Adapters (Postgres, SQLite) implement this trait.

use crate::domain::{Mentor, NewMentor};
use crate::error::RepoError;

/// Read side of the mentor directory, plus the insert used for seeding.
#[async_trait::async_trait]
pub trait MentorRepository: Send + Sync + 'static {
    /// Lists all mentors, oldest first.
    async fn list_mentors(&self) -> Result<Vec<Mentor>, RepoError>;

    /// Stores a new mentor.
    async fn insert_mentor(&self, mentor: NewMentor) -> Result<Mentor, RepoError>;

    /// Counts stored mentors.
    async fn count_mentors(&self) -> Result<i64, RepoError>;
}
