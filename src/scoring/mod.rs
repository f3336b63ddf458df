pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{
    parse_answers, score, ScoringError, TestResult, MAX_ANSWER, MIN_ANSWER, RECOMMENDATION_THRESHOLD,
};
pub use validation::validate_assessment;
