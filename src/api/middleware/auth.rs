//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;
use domain::RoleName;

/// Authenticated user loaded for the current request
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<RoleName>,
}

impl CurrentUser {
    /// Admins and superadmins may manage other members.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r.is_admin() || r.is_superadmin())
    }
}

/// JWT authentication middleware.
///
/// Validates the bearer token, then loads the user and their role names and
/// injects a [`CurrentUser`] into the request extensions. A token for a user
/// that no longer exists is rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let user = match state.user_service.get_user(claims.sub).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };
    let roles = state.role_service.role_names_for_user(user.id()).await?;

    request.extensions_mut().insert(CurrentUser {
        id: user.id(),
        email: user.email().to_string(),
        roles,
    });

    Ok(next.run(request).await)
}

/// Require admin or superadmin, returns Forbidden otherwise.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(roles: Vec<RoleName>) -> CurrentUser {
        CurrentUser {
            id: Uuid::now_v7(),
            email: "ana@gmail.com".into(),
            roles,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user_with(vec![RoleName::Admin])).is_ok());
        assert!(require_admin(&user_with(vec![RoleName::Superadmin])).is_ok());
        assert!(matches!(
            require_admin(&user_with(vec![RoleName::User])),
            Err(AppError::Forbidden)
        ));
        assert!(require_admin(&user_with(vec![])).is_err());
    }
}
