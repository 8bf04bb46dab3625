//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use academy_types::{Mentor, MentorId, MentorRepository, NewMentor, RepoError};

use crate::types::{PgMentorRow, encode_achievements};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL mentor repository.
pub struct PostgresMentorRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_mentors_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresMentorRepo {
    /// Connects and runs migrations.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::info!("PostgreSQL migrations applied");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MentorRepository for PostgresMentorRepo {
    async fn list_mentors(&self) -> Result<Vec<Mentor>, RepoError> {
        let rows: Vec<PgMentorRow> = sqlx::query_as(
            r#"SELECT id, name, exam_rank, state, college, achievements, speciality, image_url, created_at, updated_at
               FROM mentors ORDER BY created_at ASC, name ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgMentorRow::into_domain).collect()
    }

    async fn insert_mentor(&self, mentor: NewMentor) -> Result<Mentor, RepoError> {
        mentor.validate()?;

        let mentor = mentor.into_mentor(MentorId::new(), Utc::now());
        let achievements = encode_achievements(&mentor.achievements)?;

        sqlx::query(
            r#"INSERT INTO mentors (id, name, exam_rank, state, college, achievements, speciality, image_url, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
        )
        .bind(mentor.id.into_uuid())
        .bind(&mentor.name)
        .bind(&mentor.rank)
        .bind(&mentor.state)
        .bind(&mentor.college)
        .bind(&achievements)
        .bind(&mentor.speciality)
        .bind(&mentor.image_url)
        .bind(mentor.created_at)
        .bind(mentor.updated_at)
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
