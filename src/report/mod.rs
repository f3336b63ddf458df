//! Plain-text report suitable for an email body.

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ContactInfo;
use crate::respondent::RespondentInfo;
use crate::scoring::TestResult;

/// Sent in place of the recommendation list when nothing was flagged.
pub const NO_RECOMMENDATIONS_REPORT: &str = "No se generaron recomendaciones específicas. Tu cadena de suministro muestra un buen nivel de adaptabilidad.";

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Long Spanish date with 24h time, e.g. "16 de octubre de 2026, 14:05".
pub fn format_date_es(at: NaiveDateTime) -> String {
    format!(
        "{} de {} de {}, {:02}:{:02}",
        at.day(),
        MONTHS_ES[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}

/// Render the full report.
///
/// Optional lines (respondent and contact WhatsApp) leave an empty line
/// behind when absent so the section layout stays fixed.
pub fn generate_report_text(
    respondent: &RespondentInfo,
    result: &TestResult,
    contact: &ContactInfo,
    completed_at: NaiveDateTime,
) -> String {
    let recommendations = if result.has_recommendations() {
        result
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| format!("{}. {}", i + 1, rec))
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        NO_RECOMMENDATIONS_REPORT.to_string()
    };

    let respondent_phone = respondent
        .phone
        .as_deref()
        .map(|p| format!("- WhatsApp: {}", p))
        .unwrap_or_default();
    let contact_phone = contact
        .whatsapp
        .as_deref()
        .map(|p| format!("- WhatsApp: {}", p))
        .unwrap_or_default();

    let text = format!(
        "REPORTE DE AUTO-DIAGNÓSTICO VUCA - CADENA DE SUMINISTRO

Datos del participante:
- Nombre: {name}
- Empresa: {company}
- Cargo: {role}
- País: {country}
- Correo: {email}
{respondent_phone}

RESULTADOS:
- Puntaje Total: {score}%
- Nivel: {tier}
- Interpretación: {interpretation}

RECOMENDACIONES:
{recommendations}

DATOS DE CONTACTO K2:
- Sitio web: {website}
- Correo: {contact_email}
{contact_phone}
- Programas de formación: {training}

Fecha de completado: {date}",
        name = respondent.name,
        company = respondent.company,
        role = respondent.role,
        country = respondent.country,
        email = respondent.email,
        respondent_phone = respondent_phone,
        score = result.total_score,
        tier = result.tier_label,
        interpretation = result.interpretation,
        recommendations = recommendations,
        website = contact.website,
        contact_email = contact.email,
        contact_phone = contact_phone,
        training = contact.training_programs_url,
        date = format_date_es(completed_at),
    );

    text.trim().to_string()
}

/// Get the directory saved reports go to (~/.config/vuca-diag/reports/)
pub fn get_reports_dir() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("reports"))
}

/// File name for a report completed at `at`, e.g. "reporte-20261016-140512.txt".
pub fn report_file_name(at: NaiveDateTime) -> String {
    format!("reporte-{}.txt", at.format("%Y%m%d-%H%M%S"))
}

/// Write a report atomically, creating the parent directory if needed.
pub fn save_report(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(text.as_bytes())
        .context("Failed to write report")?;
    file.write_all(b"\n").context("Failed to write report")?;
    file.commit().context("Failed to save report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score, AssessmentConfig};
    use chrono::NaiveDate;
    use std::env;

    fn respondent(phone: Option<&str>) -> RespondentInfo {
        RespondentInfo {
            name: "Ana Torres".to_string(),
            company: "Logística Andina".to_string(),
            role: "Gerente".to_string(),
            country: "Perú".to_string(),
            email: "ana@andina.pe".to_string(),
            phone: phone.map(str::to_string),
        }
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            website: "https://example.com".to_string(),
            email: "hola@example.com".to_string(),
            whatsapp: None,
            training_programs_url: "https://example.com/programas".to_string(),
        }
    }

    fn completed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_format_date_es() {
        assert_eq!(format_date_es(completed_at()), "16 de octubre de 2026, 14:05");
        let jan = NaiveDate::from_ymd_opt(2025, 1, 3)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap();
        assert_eq!(format_date_es(jan), "3 de enero de 2025, 09:07");
    }

    #[test]
    fn test_report_with_recommendations() {
        let config = AssessmentConfig::default();
        let mut answers = [9u8; 10];
        answers[1] = 3;
        answers[6] = 7;
        let result = score(&answers, &config).unwrap();

        let text = generate_report_text(&respondent(Some("+51 999")), &result, &contact(), completed_at());

        assert!(text.starts_with("REPORTE DE AUTO-DIAGNÓSTICO VUCA - CADENA DE SUMINISTRO\n\nDatos del participante:\n- Nombre: Ana Torres\n"));
        assert!(text.contains("- Correo: ana@andina.pe\n- WhatsApp: +51 999\n\nRESULTADOS:\n"));
        assert!(text.contains("- Puntaje Total: 82%\n- Nivel: Mejora táctica\n"));
        let expected_recs = format!(
            "RECOMENDACIONES:\n1. {}\n\n2. {}\n\nDATOS DE CONTACTO K2:",
            config.questions[1].recommendation, config.questions[6].recommendation
        );
        assert!(text.contains(&expected_recs));
        assert!(text.ends_with("- Programas de formación: https://example.com/programas\n\nFecha de completado: 16 de octubre de 2026, 14:05"));
    }

    #[test]
    fn test_report_without_recommendations_or_phones() {
        let result = score(&[10; 10], &AssessmentConfig::default()).unwrap();
        let text = generate_report_text(&respondent(None), &result, &contact(), completed_at());

        // Missing phone keeps its (empty) line
        assert!(text.contains("- Correo: ana@andina.pe\n\n\nRESULTADOS:"));
        assert!(text.contains(&format!("RECOMENDACIONES:\n{}\n", NO_RECOMMENDATIONS_REPORT)));
        assert!(text.contains("- Correo: hola@example.com\n\n- Programas de formación:"));
        assert!(text.contains("- Puntaje Total: 100%\n- Nivel: Madurez avanzada"));
    }

    #[test]
    fn test_report_includes_contact_whatsapp() {
        let result = score(&[5; 10], &AssessmentConfig::default()).unwrap();
        let mut contact = contact();
        contact.whatsapp = Some("+51 1 234 5678".to_string());
        let text = generate_report_text(&respondent(None), &result, &contact, completed_at());
        assert!(text.contains("- Correo: hola@example.com\n- WhatsApp: +51 1 234 5678\n- Programas"));
    }

    #[test]
    fn test_report_file_name() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(14, 5, 12)
            .unwrap();
        assert_eq!(report_file_name(at), "reporte-20261016-140512.txt");
    }

    #[test]
    fn test_save_report() {
        let path = env::temp_dir()
            .join("vuca_diag_test_reports")
            .join("reporte.txt");
        let _ = std::fs::remove_file(&path);

        save_report(&path, "REPORTE").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "REPORTE\n");

        let _ = std::fs::remove_file(&path);
    }
}
