//! Forwards a completed assessment to the external form backend.
//!
//! Delivery is best-effort: one POST, no retry. The form backend does not
//! report anything useful back, so "sent" means the request went out without a
//! transport error.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::{FieldIds, SubmissionConfig};
use crate::respondent::RespondentInfo;
use crate::scoring::TestResult;

/// Sent in place of the recommendation list when nothing was flagged.
pub const NO_RECOMMENDATIONS_FIELD: &str = "No se generaron recomendaciones específicas";

/// Build the form body as (field id, value) pairs.
///
/// The phone field is omitted when the respondent gave none.
pub fn build_form_fields(
    ids: &FieldIds,
    respondent: &RespondentInfo,
    result: &TestResult,
    completed_at: DateTime<Utc>,
) -> Vec<(String, String)> {
    let mut fields = vec![
        (ids.name.clone(), respondent.name.clone()),
        (ids.company.clone(), respondent.company.clone()),
        (ids.role.clone(), respondent.role.clone()),
        (ids.country.clone(), respondent.country.clone()),
        (ids.email.clone(), respondent.email.clone()),
    ];

    if let Some(ref phone) = respondent.phone {
        fields.push((ids.phone.clone(), phone.clone()));
    }

    let recommendations = if result.has_recommendations() {
        result.recommendations.join("\n\n")
    } else {
        NO_RECOMMENDATIONS_FIELD.to_string()
    };

    fields.push((ids.total_score.clone(), result.total_score.to_string()));
    fields.push((ids.tier.clone(), result.tier_label.clone()));
    fields.push((ids.recommendations.clone(), recommendations));
    fields.push((
        ids.completed_at.clone(),
        completed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    ));

    fields
}

/// POST the report once. Returns true when the request was sent.
///
/// Failures are logged and swallowed; the caller keeps showing the result.
pub async fn submit_report(
    client: &reqwest::Client,
    submission: &SubmissionConfig,
    respondent: &RespondentInfo,
    result: &TestResult,
    completed_at: DateTime<Utc>,
) -> bool {
    let fields = build_form_fields(&submission.fields, respondent, result, completed_at);
    tracing::info!(
        "Submitting report ({} fields) to {}",
        fields.len(),
        submission.url
    );

    match client.post(&submission.url).form(&fields).send().await {
        Ok(response) => {
            tracing::debug!("Form backend answered {}", response.status());
            true
        }
        Err(e) => {
            tracing::warn!("Failed to submit report: {}", e);
            false
        }
    }
}

/// HTTP client used for submission.
pub fn create_client() -> reqwest::Result<reqwest::Client> {
    // rustls 0.23+ needs a process-wide provider; Err means one is already set
    let _ = rustls::crypto::ring::default_provider().install_default();

    reqwest::Client::builder()
        .user_agent(concat!("vuca-diag/", env!("CARGO_PKG_VERSION")))
        .build()
}
