//! Role catalogue.

use axum::{
    extract::{Extension, State},
    routing::get,
    Router,
};

use crate::api::dto::{roles_response, RoleResponse};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::ApiResponse;

pub fn role_routes() -> Router<AppState> {
    Router::new().route("/", get(list_roles))
}

/// Every role (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All roles", body = Vec<RoleResponse>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_roles(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RoleResponse>>> {
    require_admin(&current_user)?;
    let roles = state.role_service.list_roles().await?;
    Ok(ApiResponse::new(roles_response(&roles)))
}
