//! Configuration types and defaults

use koluvu_core::{InterviewMode, ResumeLimits, DEFAULT_ROOM_PATH};
use koluvu_media::VideoConstraints;
use serde::{Deserialize, Serialize};

/// Setup flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Route path of the interview room view
    pub room_path: String,
    /// Answer mode preselected when no preference is stored
    pub default_mode: InterviewMode,
    /// Limits applied to attached resumes
    pub resume_limits: ResumeLimits,
    /// Video parameters used for camera requests
    pub video: VideoConstraints,
    /// Companies offered by the autocomplete
    pub company_suggestions: Vec<String>,
    /// Roles offered by the role picker
    pub role_suggestions: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            room_path: DEFAULT_ROOM_PATH.to_string(),
            default_mode: InterviewMode::Voice,
            resume_limits: ResumeLimits::default(),
            video: VideoConstraints::default(),
            company_suggestions: vec![
                "Google".to_string(),
                "Amazon".to_string(),
                "Microsoft".to_string(),
                "Infosys".to_string(),
                "TCS".to_string(),
                "Wipro".to_string(),
            ],
            role_suggestions: vec![
                "Software Engineer".to_string(),
                "Data Analyst".to_string(),
                "Product Manager".to_string(),
                "DevOps Engineer".to_string(),
                "QA Engineer".to_string(),
            ],
        }
    }
}

impl SetupConfig {
    /// Companies matching a case-insensitive prefix; all of them for an
    /// empty prefix
    pub fn match_companies(&self, prefix: &str) -> Vec<&str> {
        Self::match_list(&self.company_suggestions, prefix)
    }

    /// Roles matching a case-insensitive prefix
    pub fn match_roles(&self, prefix: &str) -> Vec<&str> {
        Self::match_list(&self.role_suggestions, prefix)
    }

    fn match_list<'a>(list: &'a [String], prefix: &str) -> Vec<&'a str> {
        let prefix = prefix.trim().to_lowercase();
        list.iter()
            .filter(|entry| entry.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_prefix_match_is_case_insensitive() {
        let config = SetupConfig::default();
        assert_eq!(config.match_companies("goo"), vec!["Google"]);
        assert_eq!(config.match_companies("GOO"), vec!["Google"]);
        assert!(config.match_companies("zzz").is_empty());
    }

    #[test]
    fn test_empty_prefix_returns_all() {
        let config = SetupConfig::default();
        assert_eq!(
            config.match_companies("").len(),
            config.company_suggestions.len()
        );
    }
}
