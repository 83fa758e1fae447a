//! User handlers: the caller's own account and admin member management.

use axum::{
    extract::{Extension, Path, State},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{
    roles_response, ProfileResponse, RoleResponse, UserDetailResponse, UserResponse,
};
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{NewUser, UserChanges};
use crate::types::{ApiResponse, Created, NoContent, Paginated, UserListQuery};
use domain::{RoleName, UserProfileData};

/// Admin-created account
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    #[schema(example = "Luis")]
    pub first_name: String,
    #[validate(length(min = 1, message = "El apellido es requerido"))]
    #[schema(example = "Mamani")]
    pub last_name: String,
    #[validate(email(message = "El formato del email no es válido"))]
    #[schema(example = "luis.mamani@gmail.com")]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(length(max = 20, message = "El DNI no puede exceder 20 caracteres"))]
    #[schema(example = "71234567")]
    pub dni: Option<String>,
}

/// Partial account update; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "El nombre no puede estar vacío"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "El apellido no puede estar vacío"))]
    pub last_name: Option<String>,
    #[validate(email(message = "El formato del email no es válido"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

/// Profile fields; the entity checks ranges and enumerations
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
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
}

impl From<UpdateProfileRequest> for UserProfileData {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            registration_date: req.registration_date,
            last_names: req.last_names,
            first_names: req.first_names,
            gender: req.gender,
            age: req.age,
            birth_date: req.birth_date,
            status: req.status,
            alias: req.alias,
            has_uniform: req.has_uniform,
            shirt_size: req.shirt_size,
            pants_size: req.pants_size,
            shoe_size: req.shoe_size,
            height_meters: req.height_meters,
            weight_kg: req.weight_kg,
            health_insurance: req.health_insurance,
            blood_type: req.blood_type,
            allergies: req.allergies,
            disability_or_disorder: req.disability_or_disorder,
            enrollment_date: req.enrollment_date,
            current_residence: req.current_residence,
            professional_goal: req.professional_goal,
            favorite_hero: req.favorite_hero,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRoleRequest {
    #[validate(length(min = 1, message = "El rol es requerido"))]
    #[schema(example = "admin")]
    pub role: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(get_current_user).put(update_current_profile))
        .route(
            "/:uuid",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/:uuid/roles", get(list_user_roles).post(assign_role))
}

/// Own account with profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserDetailResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserDetailResponse>> {
    let user = state
        .user_service
        .get_user_with_profile(current_user.id)
        .await?;
    Ok(ApiResponse::new(user.into()))
}

/// Create or merge-update the own profile
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_current_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let profile = state
        .user_service
        .update_profile(current_user.id, payload.into())
        .await?;
    Ok(ApiResponse::new(ProfileResponse::from(&profile)))
}

/// Paginated member listing (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of members", body = Vec<UserDetailResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<UserListQuery>,
) -> AppResult<ApiResponse<Vec<UserDetailResponse>>> {
    require_admin(&current_user)?;
    let page = state.user_service.list_users(query).await?;

    Ok(ApiResponse::from(Paginated {
        data: page.data.into_iter().map(UserDetailResponse::from).collect(),
        meta: page.meta,
    }))
}

/// Create an account (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    require_admin(&current_user)?;
    let user = state
        .user_service
        .create_user(NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
            national_id: payload.dni,
        })
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Member with profile (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users/{uuid}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("uuid" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Member", body = UserDetailResponse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> AppResult<ApiResponse<UserDetailResponse>> {
    require_admin(&current_user)?;
    let user = state.user_service.get_user_with_profile(uuid).await?;
    Ok(ApiResponse::new(user.into()))
}

/// Patch a member account (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/users/{uuid}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("uuid" = Uuid, Path, description = "User UUID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    require_admin(&current_user)?;
    let user = state
        .user_service
        .update_user(
            uuid,
            UserChanges {
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                password: payload.password,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(ApiResponse::new(UserResponse::from(user)))
}

/// Delete a member account (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{uuid}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("uuid" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.user_service.delete_user(uuid).await?;
    Ok(NoContent)
}

/// Roles held by a member (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users/{uuid}/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("uuid" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Assigned roles", body = Vec<RoleResponse>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_user_roles(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> AppResult<ApiResponse<Vec<RoleResponse>>> {
    require_admin(&current_user)?;
    let roles = state.role_service.roles_for_user(uuid).await?;
    Ok(ApiResponse::new(roles_response(&roles)))
}

/// Give a member a role unless they already hold it (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/users/{uuid}/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("uuid" = Uuid, Path, description = "User UUID")),
    request_body = AssignRoleRequest,
    responses(
        (status = 200, description = "Roles after the assignment", body = Vec<RoleResponse>),
        (status = 400, description = "Unknown role name"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User or role not found")
    )
)]
pub async fn assign_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AssignRoleRequest>,
) -> AppResult<ApiResponse<Vec<RoleResponse>>> {
    require_admin(&current_user)?;
    let role = RoleName::parse(&payload.role)?;
    let roles = state.role_service.assign_role(uuid, role).await?;
    Ok(ApiResponse::new(roles_response(&roles)))
}
