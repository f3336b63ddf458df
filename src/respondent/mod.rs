//! Respondent contact details collected before the questionnaire.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("valid phone regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentInfo {
    pub name: String,
    pub company: String,
    pub role: String,
    pub country: String,
    pub email: String,
    /// WhatsApp number, optional
    pub phone: Option<String>,
}

impl RespondentInfo {
    /// Trim every field and drop a blank phone.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            role: self.role.trim().to_string(),
            country: self.country.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }

    pub fn get(&self, field: RespondentField) -> &str {
        match field {
            RespondentField::Name => &self.name,
            RespondentField::Company => &self.company,
            RespondentField::Role => &self.role,
            RespondentField::Country => &self.country,
            RespondentField::Email => &self.email,
            RespondentField::Phone => self.phone.as_deref().unwrap_or(""),
        }
    }
}

/// Form fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespondentField {
    Name,
    Company,
    Role,
    Country,
    Email,
    Phone,
}

impl RespondentField {
    pub const ALL: [RespondentField; 6] = [
        RespondentField::Name,
        RespondentField::Company,
        RespondentField::Role,
        RespondentField::Country,
        RespondentField::Email,
        RespondentField::Phone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RespondentField::Name => "Nombre completo",
            RespondentField::Company => "Empresa",
            RespondentField::Role => "Cargo",
            RespondentField::Country => "País",
            RespondentField::Email => "Correo electrónico",
            RespondentField::Phone => "WhatsApp (opcional)",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, RespondentField::Phone)
    }
}

/// A user-correctable problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: RespondentField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

impl std::error::Error for FieldError {}

/// Check required fields, email shape and the optional phone.
/// Returns one error per failing field, in form order.
pub fn validate_respondent(info: &RespondentInfo) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let mut require = |field: RespondentField, value: &str, message: &'static str| {
        if value.trim().is_empty() {
            errors.push(FieldError { field, message });
            false
        } else {
            true
        }
    };

    require(RespondentField::Name, &info.name, "El nombre es obligatorio");
    require(RespondentField::Company, &info.company, "La empresa es obligatoria");
    require(RespondentField::Role, &info.role, "El cargo es obligatorio");
    require(RespondentField::Country, &info.country, "El país es obligatorio");
    let has_email = require(
        RespondentField::Email,
        &info.email,
        "El correo electrónico es obligatorio",
    );

    if has_email && !EMAIL_RE.is_match(&info.email) {
        errors.push(FieldError {
            field: RespondentField::Email,
            message: "Ingrese un correo electrónico válido",
        });
    }

    if let Some(phone) = info.phone.as_deref().filter(|p| !p.is_empty()) {
        if !PHONE_RE.is_match(phone) {
            errors.push(FieldError {
                field: RespondentField::Phone,
                message: "Ingrese un número de WhatsApp válido",
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
