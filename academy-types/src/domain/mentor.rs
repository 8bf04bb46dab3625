//! Mentor profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Mentor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct MentorId(Uuid);

impl MentorId {
    /// Creates a new random MentorId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MentorId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for MentorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MentorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MentorId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A mentor shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: MentorId,
    #[schema(example = "Aarav Sharma")]
    pub name: String,
    /// Entrance exam rank, free text (e.g. "AIR 112")
    #[schema(example = "AIR 112")]
    pub rank: String,
    pub state: Option<String>,
    pub college: Option<String>,
    pub achievements: Vec<String>,
    pub speciality: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mentor data before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMentor {
    pub name: String,
    pub rank: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub speciality: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewMentor {
    /// Checks the required fields.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingMentorField("name"));
        }
        if self.rank.trim().is_empty() {
            return Err(DomainError::MissingMentorField("rank"));
        }
        Ok(())
    }

    /// Builds the stored mentor, stamping both timestamps with `now`.
    pub fn into_mentor(self, id: MentorId, now: DateTime<Utc>) -> Mentor {
        Mentor {
            id,
            name: self.name,
            rank: self.rank,
            state: self.state,
            college: self.college,
            achievements: self.achievements,
            speciality: self.speciality,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}
