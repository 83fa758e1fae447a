//! Guardian handlers - The caller's emergency contacts.

use axum::{
    extract::{Extension, Path, State},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::GuardianResponse;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent};
use domain::{GuardianChanges, GuardianData};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuardianRequest {
    #[validate(length(min = 1, message = "El nombre del apoderado es requerido"))]
    #[schema(example = "Rosa Huamán")]
    pub full_name: String,
    #[schema(example = "987654321")]
    pub phone: Option<String>,
    #[schema(example = "rosa.huaman@gmail.com")]
    pub email: Option<String>,
    #[schema(example = "primary")]
    pub contact_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuardianRequest {
    #[validate(length(min = 1, message = "El nombre del apoderado no puede estar vacío"))]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_type: Option<String>,
}

/// Mounted under `/users/me/guardians`
pub fn guardian_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_guardians).post(add_guardian))
        .route("/:uuid", put(update_guardian).delete(delete_guardian))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me/guardians",
    tag = "Guardians",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own guardians", body = Vec<GuardianResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_guardians(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<GuardianResponse>>> {
    let guardians = state
        .guardian_service
        .list_guardians(current_user.id)
        .await?;
    Ok(ApiResponse::new(
        guardians.iter().map(GuardianResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/me/guardians",
    tag = "Guardians",
    security(("bearer_auth" = [])),
    request_body = CreateGuardianRequest,
    responses(
        (status = 201, description = "Guardian added", body = GuardianResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn add_guardian(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateGuardianRequest>,
) -> AppResult<Created<GuardianResponse>> {
    let guardian = state
        .guardian_service
        .add_guardian(GuardianData {
            user_id: current_user.id,
            full_name: payload.full_name,
            phone: payload.phone,
            email: payload.email,
            contact_type: payload.contact_type,
        })
        .await?;
    Ok(Created(GuardianResponse::from(&guardian)))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me/guardians/{uuid}",
    tag = "Guardians",
    security(("bearer_auth" = [])),
    params(("uuid" = Uuid, Path, description = "Guardian UUID")),
    request_body = UpdateGuardianRequest,
    responses(
        (status = 200, description = "Guardian updated", body = GuardianResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Guardian not found")
    )
)]
pub async fn update_guardian(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateGuardianRequest>,
) -> AppResult<ApiResponse<GuardianResponse>> {
    let guardian = state
        .guardian_service
        .update_guardian(
            current_user.id,
            uuid,
            GuardianChanges {
                full_name: payload.full_name,
                phone: payload.phone,
                email: payload.email,
                contact_type: payload.contact_type,
            },
        )
        .await?;
    Ok(ApiResponse::new(GuardianResponse::from(&guardian)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/me/guardians/{uuid}",
    tag = "Guardians",
    security(("bearer_auth" = [])),
    params(("uuid" = Uuid, Path, description = "Guardian UUID")),
    responses(
        (status = 204, description = "Guardian removed"),
        (status = 404, description = "Guardian not found")
    )
)]
pub async fn delete_guardian(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .guardian_service
        .delete_guardian(current_user.id, uuid)
        .await?;
    Ok(NoContent)
}
