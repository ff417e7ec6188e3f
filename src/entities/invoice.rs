use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A financial transaction record, append-only. Return invoices carry negated
/// amounts. `showroom_invoice_code` is sequential per showroom:
/// showroom code + zero-padded(existing invoice count + 1).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub showroom_invoice_code: String,

    /// Signed; negative for returns.
    pub invoice_amount: Decimal,
    pub net_amount: Decimal,
    pub cash: Decimal,
    pub bkash: Decimal,
    pub cbl: Decimal,

    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,

    pub showroom_id: Uuid,
    pub showroom_name: String,
    pub showroom_address: Option<String>,
    pub showroom_mobile: Option<String>,

    pub quantity: i32,
    pub return_quantity: Option<i32>,
    /// Set when this invoice reverses a return.
    pub return_id: Option<Uuid>,

    /// Held (parked) invoices are purged by the background task once expired.
    pub is_hold: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::showroom::Entity",
        from = "Column::ShowroomId",
        to = "super::showroom::Column::Id"
    )]
    Showroom,
    #[sea_orm(
        belongs_to = "super::return_product::Entity",
        from = "Column::ReturnId",
        to = "super::return_product::Column::Id"
    )]
    Return,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::showroom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Showroom.def()
    }
}

impl Related<super::return_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Return.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if insert {
            if let sea_orm::ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(Utc::now());
            }
        }
        Ok(active_model)
    }
}
