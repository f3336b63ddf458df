use std::collections::HashSet;

use super::config::{AssessmentConfig, Tier};

/// Validate the questionnaire definition at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_assessment(config: &AssessmentConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.questions.is_empty() {
        errors.push("questions: at least one question is required".to_string());
    }

    let mut seen_ids = HashSet::new();
    for (i, question) in config.questions.iter().enumerate() {
        if !seen_ids.insert(question.id) {
            errors.push(format!("questions[{}].id: duplicate id {}", i, question.id));
        }
        if question.text.trim().is_empty() {
            errors.push(format!("questions[{}].text: must not be empty", i));
        }
        if question.recommendation.trim().is_empty() {
            errors.push(format!("questions[{}].recommendation: must not be empty", i));
        }
    }

    for tier in Tier::ALL {
        let threshold = config.tiers.get(tier);
        if threshold.min > threshold.max {
            errors.push(format!(
                "tiers.{}: min {} is greater than max {}",
                tier.key(),
                threshold.min,
                threshold.max
            ));
        }
        if threshold.label.trim().is_empty() {
            errors.push(format!("tiers.{}.label: must not be empty", tier.key()));
        }
    }

    // The three bands must partition 0..=100 with no gaps or overlaps
    let tiers = &config.tiers;
    if tiers.low.min != 0 {
        errors.push(format!("tiers.low.min: must be 0, got {}", tiers.low.min));
    }
    if tiers.high.max != 100 {
        errors.push(format!("tiers.high.max: must be 100, got {}", tiers.high.max));
    }
    if u16::from(tiers.low.max) + 1 != u16::from(tiers.medium.min) {
        errors.push(format!(
            "tiers.medium.min: must follow tiers.low.max ({}), got {}",
            tiers.low.max, tiers.medium.min
        ));
    }
    if u16::from(tiers.medium.max) + 1 != u16::from(tiers.high.min) {
        errors.push(format!(
            "tiers.high.min: must follow tiers.medium.max ({}), got {}",
            tiers.medium.max, tiers.high.min
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_assessment(&AssessmentConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_questions() {
        let mut config = AssessmentConfig::default();
        config.questions.clear();
        let errors = validate_assessment(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("questions:"));
    }

    #[test]
    fn test_duplicate_question_id() {
        let mut config = AssessmentConfig::default();
        config.questions[3].id = 1;
        let errors = validate_assessment(&config).unwrap_err();
        assert!(errors[0].contains("questions[3].id"));
    }

    #[test]
    fn test_blank_recommendation() {
        let mut config = AssessmentConfig::default();
        config.questions[0].recommendation = "  ".to_string();
        let errors = validate_assessment(&config).unwrap_err();
        assert!(errors[0].contains("questions[0].recommendation"));
    }

    #[test]
    fn test_gap_between_tiers() {
        let mut config = AssessmentConfig::default();
        config.tiers.medium.min = 75;
        let errors = validate_assessment(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("tiers.medium.min"));
    }

    #[test]
    fn test_overlapping_tiers() {
        let mut config = AssessmentConfig::default();
        config.tiers.high.min = 80;
        let errors = validate_assessment(&config).unwrap_err();
        assert!(errors[0].contains("tiers.high.min"));
    }

    #[test]
    fn test_range_must_span_zero_to_hundred() {
        let mut config = AssessmentConfig::default();
        config.tiers.low.min = 1;
        config.tiers.high.max = 99;
        let errors = validate_assessment(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("tiers.low.min")));
        assert!(errors.iter().any(|e| e.contains("tiers.high.max")));
    }

    #[test]
    fn test_inverted_band() {
        let mut config = AssessmentConfig::default();
        config.tiers.medium.min = 90;
        config.tiers.medium.max = 80;
        let errors = validate_assessment(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("min 90 is greater than max 80")));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AssessmentConfig::default();
        config.questions[0].text = String::new(); // Error 1
        config.tiers.low.label = String::new(); // Error 2
        config.tiers.low.min = 5; // Error 3
        let errors = validate_assessment(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
