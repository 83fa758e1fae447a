//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::dto::{
    GuardianResponse, ProfileResponse, RoleResponse, SessionResponse, UserDetailResponse,
    UserResponse,
};
use crate::api::handlers::{
    auth_handler, guardian_handler, health_handler, role_handler, user_handler,
};
use crate::services::{LoginResponse, UserSummary};
use crate::types::{PaginationMeta, SortOrder, UserSortField};
use domain::RoleName;

/// OpenAPI documentation for the membership registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Membership Registry API",
        version = "0.1.0",
        description = "Members, guardians, profiles and roles of a youth organization"
    ),
    servers(
        (url = "http://localhost:3006", description = "Local development server")
    ),
    paths(
        health_handler::health_check,
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::profile,
        // Own account
        user_handler::get_current_user,
        user_handler::update_current_profile,
        guardian_handler::list_guardians,
        guardian_handler::add_guardian,
        guardian_handler::update_guardian,
        guardian_handler::delete_guardian,
        // Administration
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::list_user_roles,
        user_handler::assign_role,
        role_handler::list_roles,
    ),
    components(
        schemas(
            RoleName,
            UserResponse,
            UserDetailResponse,
            ProfileResponse,
            GuardianResponse,
            RoleResponse,
            SessionResponse,
            UserSummary,
            LoginResponse,
            PaginationMeta,
            SortOrder,
            UserSortField,
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
            health_handler::ServiceHealth,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::UpdateProfileRequest,
            user_handler::AssignRoleRequest,
            guardian_handler::CreateGuardianRequest,
            guardian_handler::UpdateGuardianRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login and session"),
        (name = "Users", description = "Member accounts and profiles"),
        (name = "Guardians", description = "Emergency contacts of the logged-in member"),
        (name = "Roles", description = "Role catalogue and assignments")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
