use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{invoice, showroom};
use crate::errors::ServiceError;
use crate::services::pad_sequence;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewShowroom {
    #[validate(length(min = 1, message = "Showroom code cannot be empty"))]
    pub showroom_code: String,
    #[validate(length(min = 1, message = "Showroom name cannot be empty"))]
    pub showroom_name: String,
    #[validate(length(min = 1, message = "Showroom address cannot be empty"))]
    pub showroom_address: String,
    pub showroom_mobile: Option<String>,
}

#[derive(Clone)]
pub struct ShowroomService {
    db: Arc<DatabaseConnection>,
}

impl ShowroomService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_showroom(
        &self,
        input: NewShowroom,
    ) -> Result<showroom::Model, ServiceError> {
        input.validate()?;

        let existing = showroom::Entity::find()
            .filter(showroom::Column::ShowroomCode.eq(input.showroom_code.as_str()))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Showroom code {} already exists",
                input.showroom_code
            )));
        }

        let model = showroom::ActiveModel {
            id: Set(Uuid::new_v4()),
            showroom_code: Set(input.showroom_code),
            showroom_name: Set(input.showroom_name),
            showroom_address: Set(input.showroom_address),
            showroom_mobile: Set(input.showroom_mobile),
            ..Default::default()
        };
        Ok(model.insert(self.db.as_ref()).await?)
    }

    pub async fn list_showrooms(&self) -> Result<Vec<showroom::Model>, ServiceError> {
        Ok(showroom::Entity::find()
            .order_by_asc(showroom::Column::ShowroomCode)
            .all(self.db.as_ref())
            .await?)
    }
}

/// Resolves the showroom a scoped request operates on. Unrestricted callers
/// fall back to head office.
pub async fn resolve_for_scope<C>(
    conn: &C,
    scope: Option<&str>,
) -> Result<showroom::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let code = scope.unwrap_or(showroom::HEAD_OFFICE_CODE);
    showroom::Entity::find()
        .filter(showroom::Column::ShowroomCode.eq(code))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Showroom {} not found", code)))
}

pub async fn find_by_name<C>(
    conn: &C,
    showroom_name: &str,
) -> Result<showroom::Model, ServiceError>
where
    C: ConnectionTrait,
{
    showroom::Entity::find()
        .filter(showroom::Column::ShowroomName.eq(showroom_name))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Showroom {} not found", showroom_name)))
}

/// Next invoice code for a showroom: the showroom code followed by the
/// zero padded per showroom sequence number. Derived from the highest code
/// already issued, not the row count, so purged hold invoices never free a
/// slot for reuse.
pub async fn next_invoice_code<C>(
    conn: &C,
    target: &showroom::Model,
) -> Result<String, ServiceError>
where
    C: ConnectionTrait,
{
    let last = invoice::Entity::find()
        .filter(invoice::Column::ShowroomId.eq(target.id))
        .order_by_desc(invoice::Column::ShowroomInvoiceCode)
        .one(conn)
        .await?;
    let next = match last {
        Some(issued) => issued
            .showroom_invoice_code
            .strip_prefix(target.showroom_code.as_str())
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(|sequence| sequence + 1)
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Invoice code {} does not match showroom {}",
                    issued.showroom_invoice_code, target.showroom_code
                ))
            })?,
        None => 1,
    };
    Ok(format!("{}{}", target.showroom_code, pad_sequence(next, 8)))
}
