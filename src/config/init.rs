use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{
    get_config_path, validate_http_url, ContactInfo, FieldIds, Settings, SubmissionConfig,
    ThemeChoice, DEFAULT_TRAINING_PROGRAMS_URL,
};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes" || input == "s" || input == "si" || input == "sí")
    }
}

/// Prompt until the answer is a valid http(s) URL.
fn prompt_url(message: &str, default: Option<&str>) -> Result<String> {
    loop {
        let input = match default {
            Some(d) => prompt_with_default(message, d)?,
            None => prompt(&format!("{}: ", message))?,
        };
        match validate_http_url(&input) {
            Ok(()) => return Ok(input),
            Err(e) => println!("  Invalid URL: {}. Try again.", e),
        }
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

fn prompt_field_ids() -> Result<FieldIds> {
    let ask = |key: &str| -> Result<String> {
        loop {
            let id = prompt(&format!("  Field id for '{}' (e.g. entry.123456789): ", key))?;
            if !id.is_empty() {
                return Ok(id);
            }
            println!("  Field id is required.");
        }
    };

    Ok(FieldIds {
        name: ask("name")?,
        company: ask("company")?,
        role: ask("role")?,
        country: ask("country")?,
        email: ask("email")?,
        phone: ask("phone")?,
        total_score: ask("total_score")?,
        tier: ask("tier")?,
        recommendations: ask("recommendations")?,
        completed_at: ask("completed_at")?,
    })
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("VUCA Diag Configuration Wizard");
    println!("==============================");
    println!();

    // 1. Submission endpoint
    typewriter("Completed assessments can be forwarded to a form backend (e.g. Google Forms).");
    typewriter("Each answer field of the form has an opaque id, usually 'entry.NNNNNNNNN'.");
    let submission = if prompt_yes_no("Configure report submission?", false)? {
        let url = prompt_url("Form response URL", None)?;
        println!();
        let fields = prompt_field_ids()?;
        Some(SubmissionConfig { url, fields })
    } else {
        None
    };

    // 2. Contact metadata
    println!();
    typewriter("The emailed report ends with your organization's contact details.");
    let website = prompt("Website (optional): ")?;
    let email = prompt("Contact email (optional): ")?;
    let whatsapp = prompt("Contact WhatsApp (optional): ")?;
    let training_programs_url =
        prompt_url("Training programs URL", Some(DEFAULT_TRAINING_PROGRAMS_URL))?;

    // 3. Theme
    println!();
    let theme = loop {
        let input = prompt_with_default("Theme (auto/dark/light)", "auto")?;
        match input.to_lowercase().as_str() {
            "auto" => break ThemeChoice::Auto,
            "dark" => break ThemeChoice::Dark,
            "light" => break ThemeChoice::Light,
            _ => println!("  Invalid: choose auto, dark or light. Try again."),
        }
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let settings = Settings {
        submission,
        contact: ContactInfo {
            website,
            email,
            whatsapp: Some(whatsapp).filter(|w| !w.is_empty()),
            training_programs_url,
        },
        theme,
    };

    write_settings(&config_path, &settings)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `vuca-diag` to start the assessment.");

    Ok(())
}

/// Serialize settings to YAML and write them atomically.
pub fn write_settings(path: &std::path::Path, settings: &Settings) -> Result<()> {
    let yaml = serde_saphyr::to_string(settings)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_settings;
    use std::env;

    #[test]
    fn test_write_settings_then_load() {
        let path = env::temp_dir()
            .join("vuca_diag_test_init")
            .join("config.yaml");
        let _ = std::fs::remove_file(&path);

        let settings = Settings {
            submission: None,
            contact: ContactInfo {
                website: "https://example.com".to_string(),
                email: "hola@example.com".to_string(),
                whatsapp: None,
                training_programs_url: DEFAULT_TRAINING_PROGRAMS_URL.to_string(),
            },
            theme: ThemeChoice::Light,
        };

        write_settings(&path, &settings).unwrap();
        let loaded = load_settings(Some(path.clone())).unwrap();
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_file(&path);
    }
}
