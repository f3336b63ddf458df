use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::respondent::FieldError;
use crate::scoring::{AssessmentConfig, TestResult, Tier};

/// Shown when every answer is above the recommendation threshold
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "¡Excelente! No necesitas recomendaciones específicas.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Render a 0-100 score as a fixed-width bar of filled and empty blocks
pub fn format_score_bar(score: u8, width: usize) -> String {
    let ratio = f64::from(score.min(100)) / 100.0;
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn colored_tier(label: &str, tier: Tier) -> String {
    match tier {
        Tier::Low => label.red().bold().to_string(),
        Tier::Medium => label.yellow().bold().to_string(),
        Tier::High => label.green().bold().to_string(),
    }
}

/// Format a scoring result as a human-readable block
///
/// ```text
/// Puntaje total: 86%  █████████░
/// Nivel: Madurez avanzada
/// <interpretation>
///
/// Recomendaciones:
///  1. ...
/// ```
pub fn format_result(result: &TestResult, use_colors: bool) -> String {
    let bar = format_score_bar(result.total_score, 20);
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!(
            "{} {}%  {}",
            "Puntaje total:".bold(),
            result.total_score,
            bar
        ));
        lines.push(format!(
            "{} {}",
            "Nivel:".bold(),
            colored_tier(&result.tier_label, result.tier)
        ));
        lines.push(result.interpretation.dimmed().to_string());
    } else {
        lines.push(format!("Puntaje total: {}%  {}", result.total_score, bar));
        lines.push(format!("Nivel: {}", result.tier_label));
        lines.push(result.interpretation.clone());
    }

    lines.push(String::new());
    if use_colors {
        lines.push("Recomendaciones:".bold().to_string());
    } else {
        lines.push("Recomendaciones:".to_string());
    }

    if result.has_recommendations() {
        for (idx, rec) in result.recommendations.iter().enumerate() {
            let index = format!("{:>2}.", idx + 1);
            if use_colors {
                lines.push(format!("{} {}", index.dimmed(), rec));
            } else {
                lines.push(format!("{} {}", index, rec));
            }
        }
    } else if use_colors {
        lines.push(NO_RECOMMENDATIONS_MESSAGE.green().to_string());
    } else {
        lines.push(NO_RECOMMENDATIONS_MESSAGE.to_string());
    }

    lines.join("\n")
}

/// Format the result as tab-separated values for scripting
/// Columns: score, tier key, tier label, recommendation count (no headers, no colors)
pub fn format_tsv(result: &TestResult) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        result.total_score,
        result.tier.key(),
        result.tier_label,
        result.recommendations.len()
    )
}

/// Format the result as pretty JSON
pub fn format_json(result: &TestResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// List the questionnaire, one numbered question per line
pub fn format_question_list(config: &AssessmentConfig, use_colors: bool) -> String {
    config
        .questions
        .iter()
        .map(|q| {
            let index = format!("{:>2}.", q.id);
            if use_colors {
                format!("{} {}", index.dimmed(), q.text)
            } else {
                format!("{} {}", index, q.text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format respondent validation errors, one per line
pub fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::respondent::RespondentField;
    use crate::scoring::score;

    fn result_for(answers: &[u8]) -> TestResult {
        score(answers, &AssessmentConfig::default()).unwrap()
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(format_score_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(format_score_bar(100, 10), "██████████");
        assert_eq!(format_score_bar(86, 10), "█████████░");
        assert_eq!(format_score_bar(50, 4), "██░░");
    }

    #[test]
    fn test_format_result_with_recommendations() {
        let mut answers = [9u8; 10];
        answers[4] = 5;
        let result = result_for(&answers);
        let text = format_result(&result, false);

        assert!(text.starts_with("Puntaje total: 86%  "));
        assert!(text.contains("Nivel: Madurez avanzada"));
        assert!(text.contains("Recomendaciones:\n 1. "));
        assert!(text.contains(&result.recommendations[0]));
        assert!(!text.contains(NO_RECOMMENDATIONS_MESSAGE));
    }

    #[test]
    fn test_format_result_without_recommendations() {
        let result = result_for(&[10; 10]);
        let text = format_result(&result, false);
        assert!(text.ends_with(&format!("Recomendaciones:\n{}", NO_RECOMMENDATIONS_MESSAGE)));
    }

    #[test]
    fn test_format_result_index_alignment() {
        let result = result_for(&[1; 10]);
        let text = format_result(&result, false);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.iter().any(|l| l.starts_with(" 1. ")));
        assert!(lines.iter().any(|l| l.starts_with("10. ")));
    }

    #[test]
    fn test_format_tsv() {
        let result = result_for(&[8; 10]);
        assert_eq!(format_tsv(&result), "80\tmedium\tMejora táctica\t0");
    }

    #[test]
    fn test_format_json() {
        let result = result_for(&[10; 10]);
        let json = format_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_score"], 100);
        assert_eq!(value["tier"], "high");
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_format_question_list() {
        let text = format_question_list(&AssessmentConfig::default(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with(" 1. ¿Qué tan preparada"));
        assert!(lines[9].starts_with("10. "));
    }

    #[test]
    fn test_format_field_errors() {
        let errors = vec![
            FieldError { field: RespondentField::Name, message: "El nombre es obligatorio" },
            FieldError { field: RespondentField::Email, message: "Ingrese un correo electrónico válido" },
        ];
        assert_eq!(
            format_field_errors(&errors),
            "  - Nombre completo: El nombre es obligatorio\n  - Correo electrónico: Ingrese un correo electrónico válido"
        );
    }
}
