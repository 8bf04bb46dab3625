//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use academy_types::{Mentor, MentorId, MentorRepository, NewMentor, RepoError};

use crate::types::{SqliteMentorRow, encode_achievements};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite mentor repository.
pub struct SqliteMentorRepo {
    pool: SqlitePool,
}

impl SqliteMentorRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to an in-memory database is a separate database,
        // so the pool must hold exactly one that never expires.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_mentors.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Fixed-width RFC 3339 so that TEXT ordering matches time ordering.
fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl MentorRepository for SqliteMentorRepo {
    async fn list_mentors(&self) -> Result<Vec<Mentor>, RepoError> {
        let rows: Vec<SqliteMentorRow> = sqlx::query_as(
            r#"SELECT id, name, exam_rank, state, college, achievements, speciality, image_url, created_at, updated_at
               FROM mentors ORDER BY created_at ASC, name ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteMentorRow::into_domain).collect()
    }

    async fn insert_mentor(&self, mentor: NewMentor) -> Result<Mentor, RepoError> {
        mentor.validate()?;

        let mentor = mentor.into_mentor(MentorId::new(), Utc::now());
        let achievements = encode_achievements(&mentor.achievements)?;

        sqlx::query(
            r#"INSERT INTO mentors (id, name, exam_rank, state, college, achievements, speciality, image_url, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(mentor.id.to_string())
        .bind(&mentor.name)
        .bind(&mentor.rank)
        .bind(&mentor.state)
        .bind(&mentor.college)
        .bind(&achievements)
        .bind(&mentor.speciality)
        .bind(&mentor.image_url)
        .bind(timestamp(&mentor.created_at))
        .bind(timestamp(&mentor.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(mentor)
    }

    async fn count_mentors(&self) -> Result<i64, RepoError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mentors")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(count)
    }
}
