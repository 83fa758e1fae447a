//! One row of the membership spreadsheet export.
//!
//! Headers are matched after trimming, so the trailing space some exports
//! leave on the favourite-hero column does not matter.

use serde::Deserialize;

pub const EMAIL_COLUMN: &str = "Email Address";
pub const NATIONAL_ID_COLUMN: &str = "N° de DNI";
pub const FIRST_NAMES_COLUMN: &str = "Nombres completos";
pub const LAST_NAMES_COLUMN: &str = "Apellidos completos";

/// Columns whose absence makes the whole file unusable
pub const REQUIRED_COLUMNS: [&str; 4] = [
    EMAIL_COLUMN,
    NATIONAL_ID_COLUMN,
    FIRST_NAMES_COLUMN,
    LAST_NAMES_COLUMN,
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CsvRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<String>,
    #[serde(rename = "Apellidos completos")]
    pub last_names: Option<String>,
    #[serde(rename = "Nombres completos")]
    pub first_names: Option<String>,
    #[serde(rename = "Género")]
    pub gender: Option<String>,
    #[serde(rename = "Edad")]
    pub age: Option<String>,
    #[serde(rename = "N° de DNI")]
    pub national_id: Option<String>,
    #[serde(rename = "Fecha de nacimiento")]
    pub birth_date: Option<String>,
    #[serde(rename = "Estado")]
    pub status: Option<String>,
    #[serde(rename = "Alias (nombre con el que se te conoce normalmente)")]
    pub alias: Option<String>,
    #[serde(rename = "Tiene polo")]
    pub has_uniform: Option<String>,
    #[serde(rename = "Talla de polo (se considera talla completa)")]
    pub shirt_size: Option<String>,
    #[serde(rename = "Email Address")]
    pub email: Option<String>,
    #[serde(rename = "N° de celular (Si no tiene indicar alguno de referencia)")]
    pub phone: Option<String>,
    #[serde(rename = "Fecha de inscripción (tome como referencia el primer día de ensayo)")]
    pub enrollment_date: Option<String>,
    #[serde(rename = "Residencia actual (lugar en el que vive actualmente)")]
    pub current_residence: Option<String>,
    #[serde(rename = "Talla de pantalón")]
    pub pants_size: Option<String>,
    #[serde(rename = "Talla de zapato")]
    pub shoe_size: Option<String>,
    #[serde(rename = "Talla (en metros, por ejemplo: 1.67)")]
    pub height_meters: Option<String>,
    #[serde(rename = "Peso (en kg, por ejemplo: 58)")]
    pub weight_kg: Option<String>,
    #[serde(rename = "Seguro de Salud")]
    pub health_insurance: Option<String>,
    #[serde(rename = "Tipo de sangre")]
    pub blood_type: Option<String>,
    #[serde(rename = "Elementos a los que es alérgico (alimentos, medicamentos, etc.)")]
    pub allergies: Option<String>,
    #[serde(
        rename = "Discapacidad, molestia física, transtorno psicológico diagnosticado (discapacidad visual, problemas de columna, transtorno de ansiedad, etc.)"
    )]
    pub disability_or_disorder: Option<String>,
    #[serde(rename = "Nombres y apellidos completos de apoderado (a)")]
    pub guardian_name: Option<String>,
    #[serde(rename = "Número de celular de apoderado (a)")]
    pub guardian_phone: Option<String>,
    #[serde(rename = "Correo electrónico del apoderado (a)")]
    pub guardian_email: Option<String>,
    #[serde(rename = "Nombre adicional de adulto encargado en caso no esté el apoderado")]
    pub secondary_contact_name: Option<String>,
    #[serde(rename = "Número de celular adicional")]
    pub secondary_contact_phone: Option<String>,
    #[serde(
        rename = "Qué quiere ser después de terminar el colegio (médico, arquitecto, ganadero, electricista, policía, presidente, etc.)"
    )]
    pub professional_goal: Option<String>,
    #[serde(rename = "Superhéroe o superheroína favorito(a)")]
    pub favorite_hero: Option<String>,
}

/// The four cells every imported row must carry, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredFields {
    pub email: String,
    pub national_id: String,
    pub first_names: String,
    pub last_names: String,
}

fn cell(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CsvRow {
    /// `None` when a mandatory cell is blank or the email is implausibly short.
    pub fn required_fields(&self, min_email_length: usize) -> Option<RequiredFields> {
        let email = cell(&self.email)?;
        if email.chars().count() < min_email_length {
            return None;
        }

        Some(RequiredFields {
            email: email.to_string(),
            national_id: cell(&self.national_id)?.to_string(),
            first_names: cell(&self.first_names)?.to_string(),
            last_names: cell(&self.last_names)?.to_string(),
        })
    }

    /// Raw email for error reports
    pub fn email_or_placeholder(&self) -> String {
        cell(&self.email).unwrap_or("N/A").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str) -> CsvRow {
        CsvRow {
            email: Some(email.into()),
            national_id: Some("70123456".into()),
            first_names: Some("Ana".into()),
            last_names: Some("Quispe".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields_present() {
        let fields = row(" ana@gmail.com ").required_fields(5).unwrap();
        assert_eq!(fields.email, "ana@gmail.com");
        assert_eq!(fields.national_id, "70123456");
    }

    #[test]
    fn test_short_or_missing_email_is_skipped() {
        assert!(row("a@b").required_fields(5).is_none());
        assert!(row("   ").required_fields(5).is_none());

        let mut missing_name = row("ana@gmail.com");
        missing_name.first_names = None;
        assert!(missing_name.required_fields(5).is_none());
    }

    #[test]
    fn test_email_placeholder() {
        assert_eq!(CsvRow::default().email_or_placeholder(), "N/A");
    }
}
