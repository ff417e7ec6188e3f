use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A return transaction, append-only. `amount` equals the sum of
/// `sell_price_after_discount` over the returned product set (linked via
/// `return_product_items`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "return_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Check percentage recorded by the person taking the return.
    pub check_percent: String,
    pub exchange: ExchangeKind,

    pub amount: Decimal,
    pub cash: Decimal,
    pub bkash: Decimal,
    pub cbl: Decimal,

    pub customer_phone: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Closed variant for the exchange decision; the original compared string
/// literals ("Exchanging"/"Not Exchanging").
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ExchangeKind {
    #[sea_orm(string_value = "Exchanging")]
    Exchanging,
    #[sea_orm(string_value = "NotExchanging")]
    NotExchanging,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::return_product_item::Entity")]
    Items,
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
}

impl Related<super::return_product_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
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
