//! User domain entity and related types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::NATIONAL_ID_MAX_LENGTH;
use crate::email::Email;
use crate::error::{DomainError, DomainResult, EntityKind};
use crate::password::Password;
use crate::user_name::UserName;
use crate::user_profile::UserProfile;

/// Input for [`User::create`]. `password` is plain text.
#[derive(Debug, Clone, Default)]
pub struct UserData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub national_id: Option<String>,
    pub is_google_account: bool,
}

/// Persisted shape of a user. `password_hash` is always a hash.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub slug: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub national_id: Option<String>,
    pub is_active: bool,
    pub is_google_account: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    name: UserName,
    slug: String,
    email: Email,
    password: Password,
    national_id: Option<String>,
    is_active: bool,
    is_google_account: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Validate all fields and hash the password.
    pub fn create(data: UserData) -> DomainResult<Self> {
        let name = UserName::create(&data.first_name, &data.last_name)?;
        let email = Email::create(&data.email)?;
        let password = Password::create(&data.password)?.hash()?;
        let national_id = validate_national_id(data.national_id.as_deref())?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::now_v7(),
            slug: name.slug(),
            name,
            email,
            password,
            national_id,
            is_active: true,
            is_google_account: data.is_google_account,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: UserName::from_trusted(record.first_name, record.last_name),
            slug: record.slug,
            email: Email::from_trusted(record.email),
            password: Password::from_hash(record.password_hash),
            national_id: record.national_id,
            is_active: record.is_active,
            is_google_account: record.is_google_account,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Replace the name and refresh the slug derived from it.
    pub fn update_name(&mut self, first_name: &str, last_name: &str) -> DomainResult<()> {
        let name = UserName::create(first_name, last_name)?;
        self.slug = name.slug();
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn update_email(&mut self, email: &str) -> DomainResult<()> {
        self.email = Email::create(email)?;
        self.touch();
        Ok(())
    }

    pub fn update_password(&mut self, plain_text: &str) -> DomainResult<()> {
        self.password = Password::create(plain_text)?.hash()?;
        self.touch();
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    /// Check a plain text candidate against the stored hash.
    pub fn validate_password(&self, plain_text: &str) -> DomainResult<bool> {
        self.password.compare(plain_text)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        self.name.first_name()
    }

    pub fn last_name(&self) -> &str {
        self.name.last_name()
    }

    pub fn full_name(&self) -> String {
        self.name.full_name()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn national_id(&self) -> Option<&str> {
        self.national_id.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_google_account(&self) -> bool {
        self.is_google_account
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn to_primitives(&self) -> UserRecord {
        UserRecord {
            id: self.id,
            slug: self.slug.clone(),
            first_name: self.name.first_name().to_string(),
            last_name: self.name.last_name().to_string(),
            email: self.email.as_str().to_string(),
            password_hash: self.password.as_str().to_string(),
            national_id: self.national_id.clone(),
            is_active: self.is_active,
            is_google_account: self.is_google_account,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_national_id(national_id: Option<&str>) -> DomainResult<Option<String>> {
    let Some(national_id) = national_id.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if national_id.chars().count() > NATIONAL_ID_MAX_LENGTH {
        return Err(DomainError::bad_field(
            EntityKind::User,
            "dni",
            format!("DNI no puede exceder {} caracteres", NATIONAL_ID_MAX_LENGTH),
        ));
    }
    Ok(Some(national_id.to_string()))
}

/// A user together with their optional extended profile.
#[derive(Debug, Clone)]
pub struct UserWithProfile {
    pub user: User,
    pub profile: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> UserData {
        UserData {
            first_name: " Ana ".into(),
            last_name: "Torres Quispe".into(),
            email: " Ana.Torres@Example.com ".into(),
            password: "123456".into(),
            national_id: Some(" 70123456 ".into()),
            is_google_account: false,
        }
    }

    #[test]
    fn test_create_normalizes_fields() {
        let user = User::create(data()).unwrap();

        assert_eq!(user.email(), "ana.torres@example.com");
        assert_eq!(user.first_name(), "Ana");
        assert_eq!(user.slug(), "ana-torres-quispe");
        assert_eq!(user.national_id(), Some("70123456"));
        assert!(user.is_active());
        assert!(user.validate_password("123456").unwrap());
        assert_ne!(user.to_primitives().password_hash, "123456");
    }

    #[test]
    fn test_create_rejects_short_password() {
        let err = User::create(UserData {
            password: "12345".into(),
            ..data()
        })
        .unwrap_err();
        assert_eq!(err.field_reason().map(|(f, _)| f), Some("password"));
    }

    #[test]
    fn test_create_rejects_long_national_id() {
        let err = User::create(UserData {
            national_id: Some("1".repeat(21)),
            ..data()
        })
        .unwrap_err();
        assert_eq!(err.field_reason().map(|(f, _)| f), Some("dni"));
    }

    #[test]
    fn test_update_name_refreshes_slug_and_keeps_identity() {
        let mut user = User::create(data()).unwrap();
        let id = user.id();
        let created_at = user.created_at();

        user.update_name("Luis Alberto", "Ramos").unwrap();

        assert_eq!(user.slug(), "luis-alberto-ramos");
        assert_eq!(user.id(), id);
        assert_eq!(user.created_at(), created_at);
        assert!(user.updated_at() >= created_at);
    }

    #[test]
    fn test_failed_update_leaves_user_unchanged() {
        let mut user = User::create(data()).unwrap();

        assert!(user.update_email("no-es-un-email").is_err());
        assert!(user.update_name("", "Ramos").is_err());

        assert_eq!(user.email(), "ana.torres@example.com");
        assert_eq!(user.slug(), "ana-torres-quispe");
    }

    #[test]
    fn test_update_password_rehashes() {
        let mut user = User::create(data()).unwrap();
        user.update_password("nueva-clave").unwrap();

        assert!(user.validate_password("nueva-clave").unwrap());
        assert!(!user.validate_password("123456").unwrap());
    }

    #[test]
    fn test_reconstruct_round_trips_record() {
        let user = User::create(data()).unwrap();
        let record = user.to_primitives();
        let restored = User::reconstruct(record.clone());

        assert_eq!(restored.to_primitives(), record);
        assert!(restored.validate_password("123456").unwrap());
    }
}
