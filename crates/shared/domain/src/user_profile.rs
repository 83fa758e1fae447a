//! Extended member profile: demographics, sizes and health information.
//!
//! Every field is optional. Populated fields are checked on creation and on
//! every update; unset fields are never validated.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::constants::{
    MAX_AGE, MAX_HEIGHT_METERS, MAX_WEIGHT_KG, PROFILE_ALIAS_MAX_LENGTH,
    PROFILE_HEALTH_INSURANCE_MAX_LENGTH, PROFILE_SIZE_MAX_LENGTH, PROFILE_TEXT_MAX_LENGTH,
    VALID_BLOOD_TYPES, VALID_GENDERS, VALID_STATUSES,
};
use crate::error::{DomainError, DomainResult, EntityKind};

/// Profile field values, used both as factory input and as validated state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfileData {
    pub registration_date: Option<NaiveDate>,
    pub last_names: Option<String>,
    pub first_names: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub alias: Option<String>,
    pub has_uniform: Option<bool>,
    pub shirt_size: Option<String>,
    pub pants_size: Option<String>,
    pub shoe_size: Option<String>,
    pub height_meters: Option<f64>,
    pub weight_kg: Option<f64>,
    pub health_insurance: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub disability_or_disorder: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub current_residence: Option<String>,
    pub professional_goal: Option<String>,
    pub favorite_hero: Option<String>,
}

impl UserProfileData {
    /// Values from `changes` win; unset ones fall back to `self`.
    fn merged_with(&self, changes: UserProfileData) -> UserProfileData {
        let current = self.clone();
        UserProfileData {
            registration_date: changes.registration_date.or(current.registration_date),
            last_names: changes.last_names.or(current.last_names),
            first_names: changes.first_names.or(current.first_names),
            gender: changes.gender.or(current.gender),
            age: changes.age.or(current.age),
            birth_date: changes.birth_date.or(current.birth_date),
            status: changes.status.or(current.status),
            alias: changes.alias.or(current.alias),
            has_uniform: changes.has_uniform.or(current.has_uniform),
            shirt_size: changes.shirt_size.or(current.shirt_size),
            pants_size: changes.pants_size.or(current.pants_size),
            shoe_size: changes.shoe_size.or(current.shoe_size),
            height_meters: changes.height_meters.or(current.height_meters),
            weight_kg: changes.weight_kg.or(current.weight_kg),
            health_insurance: changes.health_insurance.or(current.health_insurance),
            blood_type: changes.blood_type.or(current.blood_type),
            allergies: changes.allergies.or(current.allergies),
            disability_or_disorder: changes
                .disability_or_disorder
                .or(current.disability_or_disorder),
            enrollment_date: changes.enrollment_date.or(current.enrollment_date),
            current_residence: changes.current_residence.or(current.current_residence),
            professional_goal: changes.professional_goal.or(current.professional_goal),
            favorite_hero: changes.favorite_hero.or(current.favorite_hero),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfileRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: UserProfileData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    id: Uuid,
    user_id: Uuid,
    data: UserProfileData,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn make(user_id: Uuid, data: UserProfileData) -> DomainResult<Self> {
        if user_id.is_nil() {
            return Err(bad_field("userUuid", "UUID de usuario es requerido"));
        }
        let data = validate(data)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::now_v7(),
            user_id,
            data,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(record: UserProfileRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            data: record.data,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Merge the changes over the current values and revalidate everything.
    pub fn update(&mut self, changes: UserProfileData) -> DomainResult<()> {
        let data = validate(self.data.merged_with(changes))?;
        self.data = data;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn data(&self) -> &UserProfileData {
        &self.data
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn to_primitives(&self) -> UserProfileRecord {
        UserProfileRecord {
            id: self.id,
            user_id: self.user_id,
            data: self.data.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn validate(data: UserProfileData) -> DomainResult<UserProfileData> {
    let gender = upper(data.gender);
    if let Some(gender) = &gender {
        one_of("gender", gender, VALID_GENDERS, "Género debe ser M o F")?;
    }

    if let Some(age) = data.age {
        if !(0..=MAX_AGE).contains(&age) {
            return Err(bad_field(
                "age",
                format!("Edad debe estar entre 0 y {}", MAX_AGE),
            ));
        }
    }

    let status = upper(data.status);
    if let Some(status) = &status {
        one_of(
            "status",
            status,
            VALID_STATUSES,
            "Estado debe ser A (Activo) o I (Inactivo)",
        )?;
    }

    if let Some(height) = data.height_meters {
        if !(0.0..=MAX_HEIGHT_METERS).contains(&height) {
            return Err(bad_field(
                "heightMeters",
                format!("Altura debe estar entre 0 y {} metros", MAX_HEIGHT_METERS),
            ));
        }
    }

    if let Some(weight) = data.weight_kg {
        if !(0.0..=MAX_WEIGHT_KG).contains(&weight) {
            return Err(bad_field(
                "weightKg",
                format!("Peso debe estar entre 0 y {} kg", MAX_WEIGHT_KG),
            ));
        }
    }

    let blood_type = upper(data.blood_type);
    if let Some(blood_type) = &blood_type {
        one_of(
            "bloodType",
            blood_type,
            VALID_BLOOD_TYPES,
            format!("Tipo de sangre debe ser uno de: {}", VALID_BLOOD_TYPES.join(", ")),
        )?;
    }

    Ok(UserProfileData {
        registration_date: data.registration_date,
        last_names: bounded("lastNames", "Apellidos", data.last_names, PROFILE_TEXT_MAX_LENGTH)?,
        first_names: bounded("firstNames", "Nombres", data.first_names, PROFILE_TEXT_MAX_LENGTH)?,
        gender,
        age: data.age,
        birth_date: data.birth_date,
        status,
        alias: bounded("alias", "Alias", data.alias, PROFILE_ALIAS_MAX_LENGTH)?,
        has_uniform: data.has_uniform,
        shirt_size: bounded("shirtSize", "Talla de polo", data.shirt_size, PROFILE_SIZE_MAX_LENGTH)?,
        pants_size: bounded("pantsSize", "Talla de pantalón", data.pants_size, PROFILE_SIZE_MAX_LENGTH)?,
        shoe_size: bounded("shoeSize", "Talla de zapato", data.shoe_size, PROFILE_SIZE_MAX_LENGTH)?,
        height_meters: data.height_meters,
        weight_kg: data.weight_kg,
        health_insurance: bounded(
            "healthInsurance",
            "Seguro de salud",
            data.health_insurance,
            PROFILE_HEALTH_INSURANCE_MAX_LENGTH,
        )?,
        blood_type,
        allergies: trimmed(data.allergies),
        disability_or_disorder: trimmed(data.disability_or_disorder),
        enrollment_date: data.enrollment_date,
        current_residence: bounded(
            "currentResidence",
            "Residencia actual",
            data.current_residence,
            PROFILE_TEXT_MAX_LENGTH,
        )?,
        professional_goal: bounded(
            "professionalGoal",
            "Meta profesional",
            data.professional_goal,
            PROFILE_TEXT_MAX_LENGTH,
        )?,
        favorite_hero: bounded(
            "favoriteHero",
            "Superhéroe favorito",
            data.favorite_hero,
            PROFILE_TEXT_MAX_LENGTH,
        )?,
    })
}

fn bad_field(field: &'static str, reason: impl Into<String>) -> DomainError {
    DomainError::bad_field(EntityKind::UserProfile, field, reason)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn upper(value: Option<String>) -> Option<String> {
    trimmed(value).map(|v| v.to_uppercase())
}

fn bounded(
    field: &'static str,
    label: &str,
    value: Option<String>,
    max: usize,
) -> DomainResult<Option<String>> {
    let value = trimmed(value);
    if let Some(v) = &value {
        if v.chars().count() > max {
            return Err(bad_field(
                field,
                format!("{} no puede exceder {} caracteres", label, max),
            ));
        }
    }
    Ok(value)
}

fn one_of(
    field: &'static str,
    value: &str,
    allowed: &[&str],
    reason: impl Into<String>,
) -> DomainResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(bad_field(field, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserProfileData {
        UserProfileData {
            first_names: Some(" Ana Lucía ".into()),
            last_names: Some("Torres".into()),
            gender: Some("f".into()),
            age: Some(15),
            status: Some("a".into()),
            blood_type: Some("o+".into()),
            height_meters: Some(1.58),
            weight_kg: Some(50.5),
            shirt_size: Some("M".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_make_normalizes_enums_and_trims() {
        let profile = UserProfile::make(Uuid::now_v7(), sample()).unwrap();
        let data = profile.data();

        assert_eq!(data.first_names.as_deref(), Some("Ana Lucía"));
        assert_eq!(data.gender.as_deref(), Some("F"));
        assert_eq!(data.status.as_deref(), Some("A"));
        assert_eq!(data.blood_type.as_deref(), Some("O+"));
    }

    #[test]
    fn test_unset_fields_are_not_validated() {
        let profile = UserProfile::make(Uuid::now_v7(), UserProfileData::default()).unwrap();
        assert_eq!(profile.data(), &UserProfileData::default());
    }

    #[test]
    fn test_range_checks() {
        let cases = [
            (UserProfileData { age: Some(151), ..Default::default() }, "age"),
            (UserProfileData { age: Some(-1), ..Default::default() }, "age"),
            (UserProfileData { height_meters: Some(3.01), ..Default::default() }, "heightMeters"),
            (UserProfileData { weight_kg: Some(500.5), ..Default::default() }, "weightKg"),
            (UserProfileData { gender: Some("X".into()), ..Default::default() }, "gender"),
            (UserProfileData { status: Some("Z".into()), ..Default::default() }, "status"),
            (UserProfileData { blood_type: Some("C+".into()), ..Default::default() }, "bloodType"),
            (UserProfileData { shoe_size: Some("123456".into()), ..Default::default() }, "shoeSize"),
            (UserProfileData { alias: Some("a".repeat(81)), ..Default::default() }, "alias"),
        ];

        for (data, field) in cases {
            let err = UserProfile::make(Uuid::now_v7(), data).unwrap_err();
            assert_eq!(err.field_reason().map(|(f, _)| f), Some(field));
        }
    }

    #[test]
    fn test_boundaries_are_accepted() {
        let data = UserProfileData {
            age: Some(150),
            height_meters: Some(3.0),
            weight_kg: Some(0.0),
            ..Default::default()
        };
        assert!(UserProfile::make(Uuid::now_v7(), data).is_ok());
    }

    #[test]
    fn test_gender_message() {
        let err = UserProfile::make(
            Uuid::now_v7(),
            UserProfileData {
                gender: Some("X".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Campo de perfil inválido: gender. Género debe ser M o F"
        );
    }

    #[test]
    fn test_update_merges_and_preserves_identity() {
        let mut profile = UserProfile::make(Uuid::now_v7(), sample()).unwrap();
        let id = profile.id();
        let created_at = profile.created_at();

        profile
            .update(UserProfileData {
                age: Some(16),
                alias: Some("Luchi".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(profile.id(), id);
        assert_eq!(profile.created_at(), created_at);
        assert_eq!(profile.data().age, Some(16));
        assert_eq!(profile.data().alias.as_deref(), Some("Luchi"));
        assert_eq!(profile.data().gender.as_deref(), Some("F"));
    }

    #[test]
    fn test_invalid_update_is_not_applied() {
        let mut profile = UserProfile::make(Uuid::now_v7(), sample()).unwrap();

        let result = profile.update(UserProfileData {
            age: Some(200),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(profile.data().age, Some(15));
    }
}
