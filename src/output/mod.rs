pub mod formatter;

pub use formatter::{
    format_field_errors, format_json, format_question_list, format_result, format_score_bar,
    format_tsv, should_use_colors, NO_RECOMMENDATIONS_MESSAGE,
};
