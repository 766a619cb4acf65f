//! Match Scoring — pluggable, trait-based scorer that measures a job against user preferences.
//!
//! Default: `RuleBasedScorer` (additive point table, pure and deterministic).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`; the pipeline and digest only see the trait.

use crate::models::{Job, Preferences};

// ────────────────────────────────────────────────────────────────────────────
// Point table
// ────────────────────────────────────────────────────────────────────────────

pub const TITLE_KEYWORD_POINTS: u32 = 25;
pub const DESCRIPTION_KEYWORD_POINTS: u32 = 15;
pub const LOCATION_POINTS: u32 = 15;
pub const MODE_POINTS: u32 = 10;
pub const EXPERIENCE_POINTS: u32 = 10;
pub const SKILL_POINTS: u32 = 15;
pub const FRESHNESS_POINTS: u32 = 5;
pub const PREFERRED_SOURCE_POINTS: u32 = 5;

/// Postings at most this many days old earn `FRESHNESS_POINTS`.
pub const FRESH_DAYS: u32 = 2;
pub const PREFERRED_SOURCE: &str = "linkedin";
pub const MAX_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap scoring backends without
/// touching the pipeline, digest, or handlers.
///
/// Implementations must return a value in `0..=MAX_SCORE`.
pub trait MatchScorer: Send + Sync {
    fn score(&self, job: &Job, preferences: &Preferences) -> u32;

    /// Label surfaced to clients for transparency.
    fn backend(&self) -> &'static str;
}

/// Additive rule scorer. Each condition is evaluated independently:
///
/// | condition                                        | points |
/// |--------------------------------------------------|--------|
/// | a role keyword is a substring of the title       | 25     |
/// | a role keyword is a substring of the description | 15     |
/// | location is a preferred location                 | 15     |
/// | mode is a preferred mode                         | 10     |
/// | experience equals the preferred level            | 10     |
/// | a preferred skill equals a job skill             | 15     |
/// | posted at most 2 days ago                        | 5      |
/// | source is LinkedIn                               | 5      |
///
/// All comparisons are case-insensitive. The sum is capped at 100.
pub struct RuleBasedScorer;

impl MatchScorer for RuleBasedScorer {
    fn score(&self, job: &Job, preferences: &Preferences) -> u32 {
        compute_match_score(job, preferences)
    }

    fn backend(&self) -> &'static str {
        "rules"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring rule
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_match_score(job: &Job, preferences: &Preferences) -> u32 {
    let keywords = preferences.role_keyword_list();
    let title = job.title.to_lowercase();
    let description = job.description.to_lowercase();

    let mut score = 0;

    if keywords.iter().any(|kw| title.contains(kw.as_str())) {
        score += TITLE_KEYWORD_POINTS;
    }
    if keywords.iter().any(|kw| description.contains(kw.as_str())) {
        score += DESCRIPTION_KEYWORD_POINTS;
    }
    if any_eq_folded(&preferences.preferred_locations, &job.location) {
        score += LOCATION_POINTS;
    }
    if any_eq_folded(&preferences.preferred_mode, &job.mode) {
        score += MODE_POINTS;
    }
    if eq_folded(&job.experience, &preferences.experience_level) {
        score += EXPERIENCE_POINTS;
    }

    // Skills are structured tags: exact equality, unlike the substring keyword rule.
    let skills = preferences.skill_list();
    if job
        .skills
        .iter()
        .any(|s| skills.contains(&s.trim().to_lowercase()))
    {
        score += SKILL_POINTS;
    }

    if job.posted_days_ago <= FRESH_DAYS {
        score += FRESHNESS_POINTS;
    }
    if eq_folded(&job.source, PREFERRED_SOURCE) {
        score += PREFERRED_SOURCE_POINTS;
    }

    score.min(MAX_SCORE)
}

/// Trimmed, Unicode case-insensitive equality. Blank values never match.
pub(crate) fn eq_folded(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    !a.is_empty() && a.to_lowercase() == b.to_lowercase()
}

fn any_eq_folded(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|h| eq_folded(h, needle))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job() -> Job {
        Job {
            id: "job-1".to_string(),
            title: "Senior React Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            mode: "Remote".to_string(),
            experience: "senior".to_string(),
            salary_range: "20-30 LPA".to_string(),
            source: "LinkedIn".to_string(),
            posted_days_ago: 1,
            skills: vec!["React".to_string()],
            description: String::new(),
            apply_url: "https://jobs.example/1".to_string(),
        }
    }

    fn make_prefs() -> Preferences {
        Preferences {
            role_keywords: "react".to_string(),
            preferred_locations: vec!["Remote".to_string()],
            preferred_mode: vec!["Remote".to_string()],
            experience_level: "senior".to_string(),
            skills: "react".to_string(),
            min_match_score: Some(40),
        }
    }

    fn stale_unmatched_job() -> Job {
        Job {
            title: "Accountant".to_string(),
            location: "Pune".to_string(),
            mode: "Onsite".to_string(),
            experience: "entry".to_string(),
            source: "Naukri".to_string(),
            posted_days_ago: 10,
            skills: vec![],
            ..make_job()
        }
    }

    #[test]
    fn test_senior_react_profile_scores_85() {
        // Title +25, location +15, mode +10, experience +10, fresh +5, LinkedIn +5,
        // and the exact "react" skill tag adds +15.
        let score = compute_match_score(&make_job(), &make_prefs());
        assert_eq!(score, 85);
    }

    #[test]
    fn test_senior_react_profile_without_skill_tag_scores_70() {
        let job = Job {
            skills: vec![],
            ..make_job()
        };
        assert_eq!(compute_match_score(&job, &make_prefs()), 70);
    }

    #[test]
    fn test_description_keyword_adds_15() {
        let job = Job {
            title: "Engineer".to_string(),
            description: "Build UIs with React and TypeScript".to_string(),
            skills: vec![],
            ..make_job()
        };
        // description +15, location +15, mode +10, experience +10, fresh +5, LinkedIn +5
        assert_eq!(compute_match_score(&job, &make_prefs()), 60);
    }

    #[test]
    fn test_all_conditions_sum_to_max_score() {
        let job = Job {
            description: "React everywhere".to_string(),
            ..make_job()
        };
        // 25 + 15 + 15 + 10 + 10 + 15 + 5 + 5
        assert_eq!(compute_match_score(&job, &make_prefs()), 100);
    }

    #[test]
    fn test_nothing_matches_scores_zero() {
        assert_eq!(
            compute_match_score(&stale_unmatched_job(), &make_prefs()),
            0
        );
    }

    #[test]
    fn test_empty_preferences_only_score_job_intrinsics() {
        // Blank keywords and skills contribute nothing; freshness and source still count.
        assert_eq!(compute_match_score(&make_job(), &Preferences::default()), 10);
    }

    #[test]
    fn test_skill_match_is_exact_not_substring() {
        let prefs = Preferences {
            skills: "react".to_string(),
            ..Default::default()
        };
        let job = Job {
            skills: vec!["React Native".to_string()],
            ..stale_unmatched_job()
        };
        assert_eq!(compute_match_score(&job, &prefs), 0);

        let job = Job {
            skills: vec!["REACT".to_string()],
            ..stale_unmatched_job()
        };
        assert_eq!(compute_match_score(&job, &prefs), SKILL_POINTS);
    }

    #[test]
    fn test_keyword_match_is_substring() {
        let prefs = Preferences {
            role_keywords: "end".to_string(),
            ..Default::default()
        };
        let job = Job {
            title: "Backend Developer".to_string(),
            ..stale_unmatched_job()
        };
        assert_eq!(compute_match_score(&job, &prefs), TITLE_KEYWORD_POINTS);
    }

    #[test]
    fn test_freshness_boundary() {
        let prefs = Preferences::default();
        let job = Job {
            posted_days_ago: 2,
            ..stale_unmatched_job()
        };
        assert_eq!(compute_match_score(&job, &prefs), FRESHNESS_POINTS);
        let job = Job {
            posted_days_ago: 3,
            ..stale_unmatched_job()
        };
        assert_eq!(compute_match_score(&job, &prefs), 0);
    }

    #[test]
    fn test_score_is_monotonic_as_conditions_accumulate() {
        let prefs = make_prefs();
        let mut job = stale_unmatched_job();
        let mut last = compute_match_score(&job, &prefs);

        let steps: Vec<Box<dyn Fn(&mut Job)>> = vec![
            Box::new(|j| j.title = "React Dev".to_string()),
            Box::new(|j| j.description = "react".to_string()),
            Box::new(|j| j.location = "remote".to_string()),
            Box::new(|j| j.mode = "REMOTE".to_string()),
            Box::new(|j| j.experience = "Senior".to_string()),
            Box::new(|j| j.skills = vec!["react".to_string()]),
            Box::new(|j| j.posted_days_ago = 0),
            Box::new(|j| j.source = "linkedin".to_string()),
        ];
        for step in steps {
            step(&mut job);
            let next = compute_match_score(&job, &prefs);
            assert!(next >= last, "score dropped from {last} to {next}");
            assert!(next <= MAX_SCORE);
            last = next;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_non_ascii_values_fold_case_in_every_rule() {
        let job = Job {
            location: "MÜNCHEN".to_string(),
            experience: "ÉNTRY".to_string(),
            ..stale_unmatched_job()
        };
        let prefs = Preferences {
            preferred_locations: vec!["münchen".to_string()],
            ..Default::default()
        };
        assert_eq!(compute_match_score(&job, &prefs), LOCATION_POINTS);

        let prefs = Preferences {
            experience_level: "éntry".to_string(),
            ..Default::default()
        };
        assert_eq!(compute_match_score(&job, &prefs), EXPERIENCE_POINTS);
    }

    #[test]
    fn test_padded_values_match_in_every_rule() {
        let job = Job {
            location: " Remote".to_string(),
            mode: "Hybrid ".to_string(),
            experience: " senior".to_string(),
            source: " LinkedIn ".to_string(),
            ..stale_unmatched_job()
        };
        let prefs = Preferences {
            preferred_locations: vec!["Remote".to_string()],
            preferred_mode: vec![" hybrid".to_string()],
            experience_level: "senior ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            compute_match_score(&job, &prefs),
            LOCATION_POINTS + MODE_POINTS + EXPERIENCE_POINTS + PREFERRED_SOURCE_POINTS
        );
    }

    #[test]
    fn test_blank_fields_never_match() {
        let job = Job {
            location: "  ".to_string(),
            experience: String::new(),
            ..stale_unmatched_job()
        };
        let prefs = Preferences {
            preferred_locations: vec![" ".to_string()],
            experience_level: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(compute_match_score(&job, &prefs), 0);
    }

    #[test]
    fn test_rule_based_scorer_delegates() {
        let scorer = RuleBasedScorer;
        assert_eq!(
            scorer.score(&make_job(), &make_prefs()),
            compute_match_score(&make_job(), &make_prefs())
        );
        assert_eq!(scorer.backend(), "rules");
    }
}
