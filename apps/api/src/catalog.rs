use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::Job;

/// Reads the static job list. A missing or malformed file is fatal: the
/// service has nothing to show without it.
pub async fn load_jobs(path: impl AsRef<Path>) -> Result<Vec<Job>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read job list at {}", path.display()))?;
    let jobs = parse_jobs(&raw)
        .with_context(|| format!("job list at {} is not valid JSON", path.display()))?;
    info!("Loaded {} job(s) from {}", jobs.len(), path.display());
    Ok(jobs)
}

/// Parses a JSON array of jobs. Duplicate ids are logged; the first wins on lookup.
pub fn parse_jobs(raw: &str) -> Result<Vec<Job>> {
    let jobs: Vec<Job> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    for job in &jobs {
        if !seen.insert(job.id.as_str()) {
            warn!("Duplicate job id '{}' in job list", job.id);
        }
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jobs_keeps_order() {
        let jobs = parse_jobs(r#"[{"id":"b","title":"B"},{"id":"a","title":"A"}]"#).unwrap();
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_jobs_rejects_non_array() {
        assert!(parse_jobs(r#"{"id":"a"}"#).is_err());
    }

    #[tokio::test]
    async fn test_load_jobs_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        std::fs::write(&path, r#"[{"id":"x","title":"Rust Dev","postedDaysAgo":2}]"#).unwrap();

        let jobs = load_jobs(&path).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].posted_days_ago, 2);
    }

    #[tokio::test]
    async fn test_load_jobs_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_jobs(dir.path().join("absent.json")).await.unwrap_err();
        assert!(err.to_string().contains("failed to read job list"));
    }

    #[tokio::test]
    async fn test_bundled_job_list_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/jobs.json");
        let jobs = load_jobs(path).await.unwrap();
        assert!(!jobs.is_empty());
        let unique: HashSet<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(unique.len(), jobs.len());
    }
}
