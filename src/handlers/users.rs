use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{token_from_headers, AuthContext};
use crate::entities::user;
use crate::errors::ServiceError;
use crate::services::users::{LoginRequest, NewUser, UpdateUser};
use crate::{ApiResponse, AppState};

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: user::Model,
    pub token: String,
}

/// Registration is open only to super admins, or to anyone when no account
/// exists yet. The caller's token, if any, is read here rather than by the
/// auth layer so the bootstrap request can get through.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<NewUser>,
) -> Result<impl IntoResponse, ServiceError> {
    let actor = token_from_headers(&headers)
        .and_then(|token| state.services.auth.verify_token(&token).ok());
    let created = state.services.users.create_user(actor.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// The token is returned in the body and also set as a session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let (found, token) = state.services.users.login(request).await?;
    let cookie = state.services.auth.session_cookie(&token);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(LoginResponse { user: found, token })),
    ))
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = state.services.auth.clear_session_cookie();
    (
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success("Logged out")),
    )
}

pub async fn list(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<impl IntoResponse, ServiceError> {
    require_super_admin(&context)?;
    let found = state.services.users.list_users().await?;
    Ok(Json(ApiResponse::success(found)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUser>,
) -> Result<impl IntoResponse, ServiceError> {
    if !context.is_super_admin() && context.user_id != id {
        return Err(ServiceError::Forbidden(
            "You can only edit your own account".to_string(),
        ));
    }
    if !context.is_super_admin() && input.role.is_some() {
        return Err(ServiceError::Forbidden(
            "Only a super admin can change roles".to_string(),
        ));
    }
    let updated = state.services.users.update_user(id, input).await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    require_super_admin(&context)?;
    state.services.users.delete_user(id).await?;
    let remaining = state.services.users.list_users().await?;
    Ok(Json(ApiResponse::success(remaining)))
}

fn require_super_admin(context: &AuthContext) -> Result<(), ServiceError> {
    if context.is_super_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "Super admin access required".to_string(),
        ))
    }
}
