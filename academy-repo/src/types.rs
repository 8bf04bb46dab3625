//! Database row types, one per backend.

use sqlx::FromRow;

use academy_types::{Mentor, MentorId, RepoError};

#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};
#[cfg(feature = "postgres")]
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Mentor row as stored by SQLite (ids and timestamps are TEXT).
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteMentorRow {
    pub id: String,
    pub name: String,
    pub exam_rank: String,
    pub state: Option<String>,
    pub college: Option<String>,
    pub achievements: String,
    pub speciality: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Mentor row as stored by PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgMentorRow {
    pub id: Uuid,
    pub name: String,
    pub exam_rank: String,
    pub state: Option<String>,
    pub college: Option<String>,
    pub achievements: String,
    pub speciality: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Achievements are kept as a JSON array in a TEXT column.
pub fn encode_achievements(achievements: &[String]) -> Result<String, RepoError> {
    serde_json::to_string(achievements).map_err(|e| RepoError::Decode(e.to_string()))
}

pub fn decode_achievements(raw: &str) -> Result<Vec<String>, RepoError> {
    serde_json::from_str(raw).map_err(|e| RepoError::Decode(format!("achievements: {}", e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
impl SqliteMentorRow {
    /// Convert database row to domain Mentor.
    pub fn into_domain(self) -> Result<Mentor, RepoError> {
        let id: MentorId = self
            .id
            .parse()
            .map_err(|e: uuid::Error| RepoError::Decode(e.to_string()))?;
        let parse_ts = |s: &str| {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| RepoError::Decode(e.to_string()))
        };

        Ok(Mentor {
            id,
            name: self.name,
            rank: self.exam_rank,
            state: self.state,
            college: self.college,
            achievements: decode_achievements(&self.achievements)?,
            speciality: self.speciality,
            image_url: self.image_url,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

#[cfg(feature = "postgres")]
impl PgMentorRow {
    /// Convert database row to domain Mentor.
    pub fn into_domain(self) -> Result<Mentor, RepoError> {
        Ok(Mentor {
            id: MentorId::from_uuid(self.id),
            name: self.name,
            rank: self.exam_rank,
            state: self.state,
            college: self.college,
            achievements: decode_achievements(&self.achievements)?,
            speciality: self.speciality,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
