//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Role with full access, created by the seed
pub const ROLE_SUPERADMIN: &str = "superadmin";

/// Administrator role with limited access
pub const ROLE_ADMIN: &str = "admin";

/// Default role assigned to members
pub const ROLE_USER: &str = "user";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_SUPERADMIN, ROLE_ADMIN, ROLE_USER];

/// Maximum role description length
pub const ROLE_DESCRIPTION_MAX_LENGTH: usize = 255;

// =============================================================================
// Users
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum national ID (DNI) length
pub const NATIONAL_ID_MAX_LENGTH: usize = 20;

// =============================================================================
// Guardians
// =============================================================================

pub const GUARDIAN_FULL_NAME_MAX_LENGTH: usize = 120;
pub const GUARDIAN_PHONE_MAX_LENGTH: usize = 50;
pub const GUARDIAN_EMAIL_MAX_LENGTH: usize = 120;
pub const GUARDIAN_CONTACT_TYPE_MAX_LENGTH: usize = 50;

/// Contact type tag for the main guardian
pub const CONTACT_TYPE_PRIMARY: &str = "primary";

/// Contact type tag for the additional adult in charge
pub const CONTACT_TYPE_SECONDARY: &str = "secondary";

// =============================================================================
// Profiles
// =============================================================================

/// Names, residence, professional goal and favourite hero
pub const PROFILE_TEXT_MAX_LENGTH: usize = 120;
pub const PROFILE_ALIAS_MAX_LENGTH: usize = 80;
pub const PROFILE_SIZE_MAX_LENGTH: usize = 5;
pub const PROFILE_HEALTH_INSURANCE_MAX_LENGTH: usize = 50;

pub const MAX_AGE: i32 = 150;
pub const MAX_HEIGHT_METERS: f64 = 3.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;

pub const VALID_GENDERS: &[&str] = &["M", "F"];

/// A = activo, I = inactivo
pub const VALID_STATUSES: &[&str] = &["A", "I"];

pub const VALID_BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
