use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Threshold used by "matches only" when the stored value is missing or unparseable.
pub const DEFAULT_MIN_MATCH_SCORE: u32 = 40;

/// User-entered matching criteria. At most one instance exists; a save
/// replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Comma-separated free text, matched by substring.
    #[serde(default)]
    pub role_keywords: String,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub preferred_mode: Vec<String>,
    #[serde(default)]
    pub experience_level: String,
    /// Comma-separated tags, matched by exact (case-insensitive) equality.
    #[serde(default)]
    pub skills: String,
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_match_score: Option<u32>,
}

impl Preferences {
    /// Lower-cased, trimmed, non-empty role keywords.
    pub fn role_keyword_list(&self) -> Vec<String> {
        split_csv(&self.role_keywords)
    }

    /// Lower-cased, trimmed, non-empty skills.
    pub fn skill_list(&self) -> Vec<String> {
        split_csv(&self.skills)
    }

    pub fn effective_min_match_score(&self) -> u32 {
        self.min_match_score
            .unwrap_or(DEFAULT_MIN_MATCH_SCORE)
            .min(100)
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accepts a number or a numeric string; anything else reads as unset.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_list_drops_blanks() {
        let prefs = Preferences {
            role_keywords: " React, ,Frontend ,".to_string(),
            ..Default::default()
        };
        assert_eq!(prefs.role_keyword_list(), vec!["react", "frontend"]);
    }

    #[test]
    fn test_blank_skills_yield_empty_list() {
        let prefs = Preferences {
            skills: "  ,  ".to_string(),
            ..Default::default()
        };
        assert!(prefs.skill_list().is_empty());
    }

    #[test]
    fn test_min_match_score_defaults_to_40() {
        assert_eq!(Preferences::default().effective_min_match_score(), 40);
    }

    #[test]
    fn test_min_match_score_accepts_numeric_string() {
        let prefs: Preferences = serde_json::from_str(r#"{"minMatchScore":"65"}"#).unwrap();
        assert_eq!(prefs.min_match_score, Some(65));
    }

    #[test]
    fn test_unparseable_min_match_score_reads_as_unset() {
        let prefs: Preferences = serde_json::from_str(r#"{"minMatchScore":"high"}"#).unwrap();
        assert_eq!(prefs.min_match_score, None);
        assert_eq!(prefs.effective_min_match_score(), 40);

        let prefs: Preferences = serde_json::from_str(r#"{"minMatchScore":-5}"#).unwrap();
        assert_eq!(prefs.min_match_score, None);
    }

    #[test]
    fn test_effective_score_is_capped_at_100() {
        let prefs = Preferences {
            min_match_score: Some(250),
            ..Default::default()
        };
        assert_eq!(prefs.effective_min_match_score(), 100);
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let prefs = Preferences {
            role_keywords: "rust".to_string(),
            preferred_locations: vec!["Remote".to_string()],
            preferred_mode: vec!["remote".to_string()],
            experience_level: "senior".to_string(),
            skills: "tokio".to_string(),
            min_match_score: Some(55),
        };
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["roleKeywords"], "rust");
        assert_eq!(value["preferredLocations"][0], "Remote");
        assert_eq!(value["minMatchScore"], 55);
        let back: Preferences = serde_json::from_value(value).unwrap();
        assert_eq!(back, prefs);
    }
}
