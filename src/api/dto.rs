//! Response bodies shared by the handlers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::services::UserSummary;
use domain::{Guardian, Role, RoleName, User, UserProfile, UserWithProfile};

/// Public view of an account
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub uuid: Uuid,
    #[schema(example = "ana-quispe")]
    pub slug: String,
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Quispe")]
    pub last_name: String,
    #[schema(example = "ana.quispe@gmail.com")]
    pub email: String,
    #[schema(example = "70123456")]
    pub dni: Option<String>,
    pub is_active: bool,
    pub is_google_account: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.id(),
            slug: user.slug().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            dni: user.national_id().map(str::to_string),
            is_active: user.is_active(),
            is_google_account: user.is_google_account(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Extended member profile
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub registration_date: Option<NaiveDate>,
    pub last_names: Option<String>,
    pub first_names: Option<String>,
    #[schema(example = "F")]
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    #[schema(example = "A")]
    pub status: Option<String>,
    pub alias: Option<String>,
    pub has_uniform: Option<bool>,
    pub shirt_size: Option<String>,
    pub pants_size: Option<String>,
    pub shoe_size: Option<String>,
    pub height_meters: Option<f64>,
    pub weight_kg: Option<f64>,
    pub health_insurance: Option<String>,
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub disability_or_disorder: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub current_residence: Option<String>,
    pub professional_goal: Option<String>,
    pub favorite_hero: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        let data = profile.data().clone();
        Self {
            uuid: profile.id(),
            user_uuid: profile.user_id(),
            registration_date: data.registration_date,
            last_names: data.last_names,
            first_names: data.first_names,
            gender: data.gender,
            age: data.age,
            birth_date: data.birth_date,
            status: data.status,
            alias: data.alias,
            has_uniform: data.has_uniform,
            shirt_size: data.shirt_size,
            pants_size: data.pants_size,
            shoe_size: data.shoe_size,
            height_meters: data.height_meters,
            weight_kg: data.weight_kg,
            health_insurance: data.health_insurance,
            blood_type: data.blood_type,
            allergies: data.allergies,
            disability_or_disorder: data.disability_or_disorder,
            enrollment_date: data.enrollment_date,
            current_residence: data.current_residence,
            professional_goal: data.professional_goal,
            favorite_hero: data.favorite_hero,
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        }
    }
}

/// Account together with its profile, if one was filled in
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: Option<ProfileResponse>,
}

impl From<UserWithProfile> for UserDetailResponse {
    fn from(value: UserWithProfile) -> Self {
        Self {
            user: UserResponse::from(&value.user),
            profile: value.profile.as_ref().map(ProfileResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuardianResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    #[schema(example = "Rosa Huamán")]
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[schema(example = "primary")]
    pub contact_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Guardian> for GuardianResponse {
    fn from(guardian: &Guardian) -> Self {
        Self {
            uuid: guardian.id(),
            user_uuid: guardian.user_id(),
            full_name: guardian.full_name().to_string(),
            phone: guardian.phone().map(str::to_string),
            email: guardian.email().map(str::to_string),
            contact_type: guardian.contact_type().map(str::to_string),
            created_at: guardian.created_at(),
            updated_at: guardian.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub uuid: Uuid,
    pub name: RoleName,
    pub description: Option<String>,
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            uuid: role.id(),
            name: role.name(),
            description: role.description().map(str::to_string),
        }
    }
}

pub fn roles_response(roles: &[Role]) -> Vec<RoleResponse> {
    roles.iter().map(RoleResponse::from).collect()
}

/// Who the bearer token belongs to
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserSummary,
    pub roles: Vec<RoleName>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{UserData, UserProfileData};

    fn user() -> User {
        User::create(UserData {
            first_name: "Ana".into(),
            last_name: "Quispe".into(),
            email: "ana.quispe@gmail.com".into(),
            password: "secreto123".into(),
            national_id: Some("70123456".into()),
            is_google_account: false,
        })
        .unwrap()
    }

    #[test]
    fn test_user_response_is_camel_case_without_hash() {
        let json = serde_json::to_value(UserResponse::from(user())).unwrap();

        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["dni"], "70123456");
        assert_eq!(json["isActive"], true);
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_detail_flattens_user_fields() {
        let user = user();
        let profile = UserProfile::make(
            user.id(),
            UserProfileData {
                alias: Some("Anita".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let json = serde_json::to_value(UserDetailResponse::from(UserWithProfile {
            user,
            profile: Some(profile),
        }))
        .unwrap();

        assert_eq!(json["email"], "ana.quispe@gmail.com");
        assert_eq!(json["profile"]["alias"], "Anita");
    }
}
