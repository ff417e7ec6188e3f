use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::AuthContext;
use crate::errors::ServiceError;
use crate::services::returns::{ReturnOutcome, ReturnRequest};
use crate::{ApiResponse, AppState};

/// An exchange answers with the return record; a refund answers with the
/// negative invoice it issued.
pub async fn create(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<ReturnRequest>,
) -> Result<Response, ServiceError> {
    let outcome = state
        .services
        .returns
        .create_return(request, context.showroom_code.as_deref())
        .await?;
    Ok(match outcome {
        ReturnOutcome::Exchanged(record) => {
            (StatusCode::CREATED, Json(ApiResponse::success(record))).into_response()
        }
        ReturnOutcome::Refunded { refund_invoice, .. } => {
            (StatusCode::OK, Json(ApiResponse::success(refund_invoice))).into_response()
        }
    })
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.returns.list_returns().await?;
    Ok(Json(ApiResponse::success(found)))
}

#[derive(Deserialize)]
pub struct ReportQuery {
    pub showroom_code: Option<String>,
}

/// The account's showroom scope wins over the query parameter.
pub async fn report(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let scope = context
        .showroom_code
        .as_deref()
        .or(query.showroom_code.as_deref());
    let rows = state.services.returns.report(scope).await?;
    Ok(Json(ApiResponse::success(rows)))
}
