//! Startup seeding of the mentor directory.

use std::path::Path;

use academy_repo::seed_if_empty;
use academy_types::{MentorRepository, NewMentor};

/// Loads a JSON array of mentors from `path`.
pub async fn load_mentors(path: impl AsRef<Path>) -> anyhow::Result<Vec<NewMentor>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let mentors = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid mentor seed file {}: {}", path.display(), e))?;
    Ok(mentors)
}

/// Seeds the repository from `path` when it holds no mentors yet.
pub async fn seed_from_file<R: MentorRepository>(
    repo: &R,
    path: impl AsRef<Path>,
) -> anyhow::Result<usize> {
    let mentors = load_mentors(path).await?;
    Ok(seed_if_empty(repo, mentors).await?)
}
