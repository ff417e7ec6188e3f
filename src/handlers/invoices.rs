use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::errors::ServiceError;
use crate::services::invoices::SaleRequest;
use crate::{ApiResponse, AppState};

/// Scoped accounts sell out of their own showroom; unrestricted accounts
/// fall back to head office.
pub async fn create_sale(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<SaleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .invoices
        .create_sale(request, context.showroom_code.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.invoices.list_invoices().await?;
    Ok(Json(ApiResponse::success(found)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.invoices.get_invoice(id).await?;
    Ok(Json(ApiResponse::success(found)))
}
