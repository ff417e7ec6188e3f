use axum::{
    extract::State, http::StatusCode, response::IntoResponse, Extension, Json,
};

use crate::auth::AuthContext;
use crate::errors::ServiceError;
use crate::services::showrooms::NewShowroom;
use crate::{ApiResponse, AppState};

pub async fn create(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(input): Json<NewShowroom>,
) -> Result<impl IntoResponse, ServiceError> {
    if !context.is_super_admin() {
        return Err(ServiceError::Forbidden(
            "Only a super admin can create showrooms".to_string(),
        ));
    }
    let created = state.services.showrooms.create_showroom(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.showrooms.list_showrooms().await?;
    Ok(Json(ApiResponse::success(found)))
}
