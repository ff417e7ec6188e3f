use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthContext;

use crate::errors::ServiceError;
use crate::services::products::{
    NewProductGroup, NewProductLine, NewTaglessProduct, ProductPriceUpdate, TransferRequest,
    UpdateProduct,
};
use crate::{ApiResponse, AppState};

#[derive(Serialize)]
pub struct ImportSummary {
    pub imported: u64,
}

pub async fn create_group(
    State(state): State<AppState>,
    Json(input): Json<NewProductGroup>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.products.create_group(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn list_groups(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.products.list_groups().await?;
    Ok(Json(ApiResponse::success(found)))
}

pub async fn import_groups(
    State(state): State<AppState>,
    Json(rows): Json<Vec<NewProductGroup>>,
) -> Result<impl IntoResponse, ServiceError> {
    let imported = state.services.products.import_groups(rows).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ImportSummary { imported })),
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Json(lines): Json<Vec<NewProductLine>>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.products.create_products(lines).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn create_tagless(
    State(state): State<AppState>,
    Json(input): Json<NewTaglessProduct>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.products.create_tagless(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn import(
    State(state): State<AppState>,
    Json(rows): Json<Vec<NewProductLine>>,
) -> Result<impl IntoResponse, ServiceError> {
    let imported = state.services.products.import_products(rows).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ImportSummary { imported })),
    ))
}

pub async fn bulk_update(
    State(state): State<AppState>,
    Json(updates): Json<Vec<ProductPriceUpdate>>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.products.bulk_update(updates).await?;
    Ok(Json(ApiResponse::success(ImportSummary { imported: updated })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProduct>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.products.update_product(id, input).await?;
    Ok(Json(ApiResponse::success(updated)))
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: u64,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let page = state
        .services
        .products
        .list_products(context.showroom_code.as_deref(), query.page)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

#[derive(Deserialize)]
pub struct ByShowroomQuery {
    pub showroom_code: String,
}

pub async fn list_by_showroom(
    State(state): State<AppState>,
    Query(query): Query<ByShowroomQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let found = state
        .services
        .products
        .list_unsold_by_showroom_code(&query.showroom_code)
        .await?;
    Ok(Json(ApiResponse::success(found)))
}

pub async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = state.services.products.transfer_products(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

pub async fn list_transfers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.products.list_transfers().await?;
    Ok(Json(ApiResponse::success(found)))
}
