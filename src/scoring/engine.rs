use serde::Serialize;
use thiserror::Error;

use super::config::{AssessmentConfig, Tier};

/// Lowest accepted answer value.
pub const MIN_ANSWER: u8 = 1;
/// Highest accepted answer value.
pub const MAX_ANSWER: u8 = 10;
/// Answers at or below this value surface the question's recommendation.
pub const RECOMMENDATION_THRESHOLD: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("invalid input: expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },

    #[error("invalid input: answer to question {question} is {value}, must be between 1 and 10")]
    AnswerOutOfRange { question: usize, value: i64 },

    #[error("no tier covers score {0}; check the tier thresholds")]
    UncoveredScore(u8),
}

impl ScoringError {
    /// True for errors caused by the answers rather than the configuration.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ScoringError::AnswerCount { .. } | ScoringError::AnswerOutOfRange { .. }
        )
    }
}

/// Outcome of one completed questionnaire.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestResult {
    /// Percentage of the maximum attainable sum, 0..=100
    pub total_score: u8,
    pub question_scores: Vec<u8>,
    /// Recommendation texts in question order
    pub recommendations: Vec<String>,
    pub tier: Tier,
    pub tier_label: String,
    pub interpretation: String,
}

impl TestResult {
    /// False means "no further action": every answer was above the threshold.
    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

/// Score a full answer set against the questionnaire.
///
/// `answers[i]` scores `config.questions[i]`. The answer count must match the
/// question count and every answer must lie in `MIN_ANSWER..=MAX_ANSWER`;
/// anything else is rejected without producing a partial result.
pub fn score(answers: &[u8], config: &AssessmentConfig) -> Result<TestResult, ScoringError> {
    let expected = config.question_count();
    if answers.len() != expected || expected == 0 {
        return Err(ScoringError::AnswerCount {
            expected,
            actual: answers.len(),
        });
    }

    if let Some((idx, &value)) = answers
        .iter()
        .enumerate()
        .find(|(_, &value)| !(MIN_ANSWER..=MAX_ANSWER).contains(&value))
    {
        return Err(ScoringError::AnswerOutOfRange {
            question: idx + 1,
            value: i64::from(value),
        });
    }

    let total_score = percentage(answers);

    let (tier, threshold) = config
        .tiers
        .classify(total_score)
        .ok_or(ScoringError::UncoveredScore(total_score))?;

    // A total at or below the threshold flags every question. With a 0-100
    // total this only happens when all answers are already flagged.
    let flag_all = total_score <= RECOMMENDATION_THRESHOLD;
    let recommendations = config
        .questions
        .iter()
        .zip(answers)
        .filter(|(_, &answer)| flag_all || answer <= RECOMMENDATION_THRESHOLD)
        .map(|(question, _)| question.recommendation.clone())
        .collect();

    Ok(TestResult {
        total_score,
        question_scores: answers.to_vec(),
        recommendations,
        tier,
        tier_label: threshold.label.clone(),
        interpretation: threshold.interpretation.clone(),
    })
}

/// Narrow raw answers (e.g. from the command line) to answer values.
///
/// Anything outside `MIN_ANSWER..=MAX_ANSWER` is reported as
/// `AnswerOutOfRange`, however far out of range it is.
pub fn parse_answers(raw: &[i64]) -> Result<Vec<u8>, ScoringError> {
    raw.iter()
        .enumerate()
        .map(|(idx, &value)| {
            u8::try_from(value)
                .ok()
                .filter(|v| (MIN_ANSWER..=MAX_ANSWER).contains(v))
                .ok_or(ScoringError::AnswerOutOfRange {
                    question: idx + 1,
                    value,
                })
        })
        .collect()
}

/// `round(100 * sum / (n * MAX_ANSWER))`, ties away from zero.
///
/// Integer form of the rounding: floor((200 * sum + max) / (2 * max)).
fn percentage(answers: &[u8]) -> u8 {
    let sum: u32 = answers.iter().map(|&a| u32::from(a)).sum();
    let max = answers.len() as u32 * u32::from(MAX_ANSWER);
    ((200 * sum + max) / (2 * max)) as u8
}
