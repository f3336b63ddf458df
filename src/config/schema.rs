use serde::{Deserialize, Serialize};

/// Enrollment form for the training programs, linked from the results screen.
pub const DEFAULT_TRAINING_PROGRAMS_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLScacDKewj6V2BtCZP6uDkI7-xiMUyJlkR4jZW5Lwi6Ett_1uA/viewform";

/// User settings loaded from `~/.config/vuca-diag/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// submission:
///   url: "https://docs.google.com/forms/d/e/FORM_ID/formResponse"
///   fields:
///     name: "entry.1000001"
///     company: "entry.1000002"
///     role: "entry.1000003"
///     country: "entry.1000004"
///     email: "entry.1000005"
///     phone: "entry.1000006"
///     total_score: "entry.1000007"
///     tier: "entry.1000008"
///     recommendations: "entry.1000009"
///     completed_at: "entry.1000010"
/// contact:
///   website: "https://example.com"
///   email: "contacto@example.com"
/// theme: auto
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Form endpoint receiving the report. `None` disables submission.
    #[serde(default)]
    pub submission: Option<SubmissionConfig>,

    #[serde(default)]
    pub contact: ContactInfo,

    #[serde(default)]
    pub theme: ThemeChoice,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubmissionConfig {
    /// Form response URL, e.g. a Google Forms `formResponse` endpoint
    pub url: String,

    pub fields: FieldIds,
}

/// Opaque per-field identifiers expected by the form backend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FieldIds {
    pub name: String,
    pub company: String,
    pub role: String,
    pub country: String,
    pub email: String,
    pub phone: String,
    pub total_score: String,
    pub tier: String,
    pub recommendations: String,
    pub completed_at: String,
}

impl FieldIds {
    /// (key, id) pairs, used for validation messages and the init wizard.
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("name", self.name.as_str()),
            ("company", self.company.as_str()),
            ("role", self.role.as_str()),
            ("country", self.country.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("total_score", self.total_score.as_str()),
            ("tier", self.tier.as_str()),
            ("recommendations", self.recommendations.as_str()),
            ("completed_at", self.completed_at.as_str()),
        ]
    }
}

/// Contact metadata printed at the end of the report.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContactInfo {
    #[serde(default)]
    pub website: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub whatsapp: Option<String>,

    #[serde(default = "default_training_programs_url")]
    pub training_programs_url: String,
}

fn default_training_programs_url() -> String {
    DEFAULT_TRAINING_PROGRAMS_URL.to_string()
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            website: String::new(),
            email: String::new(),
            whatsapp: None,
            training_programs_url: default_training_programs_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Auto,
    Dark,
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_parse() {
        let settings: Settings = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.submission.is_none());
        assert_eq!(settings.contact.training_programs_url, DEFAULT_TRAINING_PROGRAMS_URL);
        assert_eq!(settings.theme, ThemeChoice::Auto);
    }

    #[test]
    fn test_full_settings_parse() {
        let yaml = r#"
submission:
  url: "https://docs.google.com/forms/d/e/abc/formResponse"
  fields:
    name: "entry.1"
    company: "entry.2"
    role: "entry.3"
    country: "entry.4"
    email: "entry.5"
    phone: "entry.6"
    total_score: "entry.7"
    tier: "entry.8"
    recommendations: "entry.9"
    completed_at: "entry.10"
contact:
  website: "https://example.com"
  email: "hola@example.com"
  whatsapp: "+51 999 000 111"
theme: light
"#;
        let settings: Settings = serde_saphyr::from_str(yaml).unwrap();
        let submission = settings.submission.unwrap();
        assert_eq!(submission.fields.completed_at, "entry.10");
        assert_eq!(settings.contact.website, "https://example.com");
        assert_eq!(settings.contact.whatsapp.as_deref(), Some("+51 999 000 111"));
        assert_eq!(settings.contact.training_programs_url, DEFAULT_TRAINING_PROGRAMS_URL);
        assert_eq!(settings.theme, ThemeChoice::Light);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Settings, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_field_id_rejected() {
        let yaml = r#"
submission:
  url: "https://example.com/form"
  fields:
    name: "entry.1"
"#;
        let result: Result<Settings, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_serde_roundtrip() {
        let settings = Settings {
            submission: None,
            contact: ContactInfo {
                website: "https://example.com".to_string(),
                ..ContactInfo::default()
            },
            theme: ThemeChoice::Dark,
        };
        let yaml = serde_saphyr::to_string(&settings).unwrap();
        let parsed: Settings = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(settings, parsed);
    }
}
