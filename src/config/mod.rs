pub mod init;
mod schema;

pub use schema::{
    ContactInfo, FieldIds, Settings, SubmissionConfig, ThemeChoice, DEFAULT_TRAINING_PROGRAMS_URL,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/vuca-diag/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("vuca-diag"))
}

/// Get the default config file path (~/.config/vuca-diag/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load settings from a YAML file
///
/// An explicit `path` must exist. When `path` is None the default location is
/// used, and a missing file there yields `Settings::default()` (submission
/// disabled).
pub fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!("No config at {}, using defaults", config_path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let settings: Settings = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    tracing::info!("Loaded settings from {}", config_path.display());
    Ok(settings)
}

/// Validate settings at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref submission) = settings.submission {
        if let Err(e) = validate_http_url(&submission.url) {
            errors.push(format!("submission.url: invalid '{}' - {}", submission.url, e));
        }
        for (key, id) in submission.fields.entries() {
            if id.trim().is_empty() {
                errors.push(format!("submission.fields.{}: must not be empty", key));
            }
        }
    }

    if let Err(e) = validate_http_url(&settings.contact.training_programs_url) {
        errors.push(format!(
            "contact.training_programs_url: invalid '{}' - {}",
            settings.contact.training_programs_url, e
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Accept only absolute http(s) URLs.
pub fn validate_http_url(raw: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn field_ids() -> FieldIds {
        FieldIds {
            name: "entry.1".to_string(),
            company: "entry.2".to_string(),
            role: "entry.3".to_string(),
            country: "entry.4".to_string(),
            email: "entry.5".to_string(),
            phone: "entry.6".to_string(),
            total_score: "entry.7".to_string(),
            tier: "entry.8".to_string(),
            recommendations: "entry.9".to_string(),
            completed_at: "entry.10".to_string(),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_valid_submission() {
        let settings = Settings {
            submission: Some(SubmissionConfig {
                url: "https://docs.google.com/forms/d/e/abc/formResponse".to_string(),
                fields: field_ids(),
            }),
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut fields = field_ids();
        fields.tier = " ".to_string();
        fields.phone = String::new();
        let settings = Settings {
            submission: Some(SubmissionConfig {
                url: "ftp://example.com/form".to_string(),
                fields,
            }),
            contact: ContactInfo {
                training_programs_url: "not a url".to_string(),
                ..ContactInfo::default()
            },
            ..Settings::default()
        };
        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].starts_with("submission.url"));
        assert!(errors[0].contains("unsupported scheme 'ftp'"));
        assert!(errors.iter().any(|e| e == "submission.fields.tier: must not be empty"));
        assert!(errors.iter().any(|e| e == "submission.fields.phone: must not be empty"));
        assert!(errors[3].starts_with("contact.training_programs_url"));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = env::temp_dir().join("vuca_diag_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_settings(Some(path)).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let path = env::temp_dir().join("vuca_diag_test_config.yaml");
        fs::write(&path, "theme: dark\ncontact:\n  website: \"https://example.com\"\n").unwrap();

        let settings = load_settings(Some(path.clone())).unwrap();
        assert_eq!(settings.theme, ThemeChoice::Dark);
        assert_eq!(settings.contact.website, "https://example.com");
        assert!(settings.submission.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_is_error() {
        let path = env::temp_dir().join("vuca_diag_test_bad_config.yaml");
        fs::write(&path, "theme: [not, a, theme]\n").unwrap();
        let err = load_settings(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        let _ = fs::remove_file(&path);
    }
}
