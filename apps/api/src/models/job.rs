use serde::{Deserialize, Serialize};

/// A single job posting from the static job list.
///
/// Jobs are supplied externally and never mutated. Missing text fields
/// deserialize as empty strings so a sparse record still flows through
/// scoring and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// remote | hybrid | onsite (free text, compared case-insensitively)
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub posted_days_ago: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub apply_url: String,
}

impl Job {
    /// Human-readable age of the posting.
    pub fn posted_label(&self) -> String {
        match self.posted_days_ago {
            0 => "Today".to_string(),
            1 => "1 day ago".to_string(),
            n => format!("{n} days ago"),
        }
    }

    /// First run of ASCII digits in the salary text, or 0 when there is none.
    /// "₹10–18 LPA" → 10, "Competitive" → 0.
    pub fn salary_floor(&self) -> u64 {
        self.salary_range
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .fold(0_u64, |acc, c| {
                acc.saturating_mul(10)
                    .saturating_add(u64::from(c as u8 - b'0'))
            })
    }
}
