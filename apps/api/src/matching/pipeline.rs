//! Filter & sort pipeline — turns the static job list into the visible dashboard list.
//!
//! Steps run strictly in order: score, matches-only cut, keyword, exact-match
//! filters, stable sort. The input slice is never mutated.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use crate::matching::scoring::{eq_folded, MatchScorer};
use crate::models::{Job, Preferences};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A job annotated with its match score. The score is absent (not zero) when
/// no preferences are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: Job,
    #[serde(default)]
    pub match_score: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Latest,
    Oldest,
    Match,
    Salary,
}

impl SortKey {
    /// Unknown keys fall back to `Latest`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "oldest" => SortKey::Oldest,
            "match" => SortKey::Match,
            "salary" => SortKey::Salary,
            _ => SortKey::Latest,
        }
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortKey::parse(&raw))
    }
}

/// Transient dashboard filter state. Carried per request, never global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub keyword: String,
    pub location: String,
    pub mode: String,
    pub experience: String,
    pub source: String,
    pub sort: SortKey,
    pub matches_only: bool,
}

/// Distinct values offered by the dashboard's filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub modes: Vec<String>,
    pub experiences: Vec<String>,
    pub sources: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Produces the visible job list for the given preferences and filter state.
pub fn select_jobs(
    jobs: &[Job],
    preferences: Option<&Preferences>,
    filter: &FilterState,
    scorer: &dyn MatchScorer,
) -> Vec<ScoredJob> {
    // 1. Annotate
    let mut list: Vec<ScoredJob> = jobs
        .iter()
        .map(|job| ScoredJob {
            match_score: preferences.map(|p| scorer.score(job, p)),
            job: job.clone(),
        })
        .collect();

    // 2. Matches-only has no effect without preferences
    if filter.matches_only {
        if let Some(prefs) = preferences {
            let threshold = prefs.effective_min_match_score();
            list.retain(|s| s.match_score.unwrap_or(0) >= threshold);
        }
    }

    // 3. Keyword over title or company
    let keyword = filter.keyword.trim().to_lowercase();
    if !keyword.is_empty() {
        list.retain(|s| {
            s.job.title.to_lowercase().contains(&keyword)
                || s.job.company.to_lowercase().contains(&keyword)
        });
    }

    // 4. Exact-match dropdown filters
    retain_equal(&mut list, &filter.location, |j| &j.location);
    retain_equal(&mut list, &filter.mode, |j| &j.mode);
    retain_equal(&mut list, &filter.experience, |j| &j.experience);
    retain_equal(&mut list, &filter.source, |j| &j.source);

    // 5. Stable sort
    sort_jobs(&mut list, filter.sort);

    list
}

fn retain_equal(list: &mut Vec<ScoredJob>, wanted: &str, field: impl Fn(&Job) -> &String) {
    if wanted.trim().is_empty() {
        return;
    }
    list.retain(|s| eq_folded(field(&s.job), wanted));
}

/// Sorts in place. `sort_by` is stable, so ties keep their input order.
pub fn sort_jobs(list: &mut [ScoredJob], key: SortKey) {
    match key {
        SortKey::Latest => list.sort_by_key(|s| s.job.posted_days_ago),
        SortKey::Oldest => list.sort_by(|a, b| b.job.posted_days_ago.cmp(&a.job.posted_days_ago)),
        SortKey::Match => list.sort_by(by_score_desc),
        SortKey::Salary => list.sort_by(|a, b| b.job.salary_floor().cmp(&a.job.salary_floor())),
    }
}

pub(crate) fn by_score_desc(a: &ScoredJob, b: &ScoredJob) -> Ordering {
    b.match_score.unwrap_or(0).cmp(&a.match_score.unwrap_or(0))
}

/// Distinct (case-insensitive, first spelling wins), sorted dropdown values.
pub fn build_filter_options(jobs: &[Job]) -> FilterOptions {
    FilterOptions {
        locations: unique_sorted(jobs.iter().map(|j| j.location.as_str())),
        modes: unique_sorted(jobs.iter().map(|j| j.mode.as_str())),
        experiences: unique_sorted(jobs.iter().map(|j| j.experience.as_str())),
        sources: unique_sorted(jobs.iter().map(|j| j.source.as_str())),
    }
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<String> = values
        .filter(|v| !v.trim().is_empty())
        .filter(|v| seen.insert(v.to_lowercase()))
        .map(str::to_string)
        .collect();
    out.sort();
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
