use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One physical inventory unit. Products are never deleted; sale and return
/// flows flip `selling_status`/`return_status` instead.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Zero-padded (10) item code, unique across the business.
    #[sea_orm(unique)]
    pub item_code: String,

    /// Code of the product group this item belongs to.
    pub product_code: Option<String>,

    /// Product group name as entered.
    pub product_group: String,

    /// Showroom holding the item. Transfers reassign this.
    pub showroom_name: String,

    pub supplier_name: Option<String>,
    pub lot_number: Option<String>,
    pub size: Option<String>,

    pub unit_cost: Decimal,
    pub sell_price: Decimal,
    /// Defaults to `sell_price`; discounted sales lower it. Return amounts sum
    /// over this field.
    pub sell_price_after_discount: Decimal,

    /// sell_price - unit_cost, persisted at write time (2dp).
    pub gross_profit: Decimal,
    /// gross_profit / sell_price * 100, persisted at write time (2dp).
    pub gross_margin: Decimal,

    pub selling_status: SellingStatus,
    pub return_status: bool,
    /// Entered without a physical barcode/tag; item code is synthetic.
    pub tagless: bool,

    pub invoice_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub challan_number: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_total_price: Option<Decimal>,
    pub total_item: Option<i32>,
    pub transportation_cost: Option<Decimal>,
    pub purchase_name: Option<String>,

    /// Employee credited with the sale, if sold.
    pub employee_id: Option<Uuid>,
    /// Sales invoice the item was sold under, if sold.
    pub invoice_id: Option<Uuid>,
    /// Purchase batch the item was received under.
    pub purchase_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SellingStatus {
    #[sea_orm(string_value = "Unsold")]
    Unsold,
    #[sea_orm(string_value = "Sold")]
    Sold,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id"
    )]
    Invoice,
    #[sea_orm(
        belongs_to = "super::purchase::Entity",
        from = "Column::PurchaseId",
        to = "super::purchase::Column::Id"
    )]
    Purchase,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
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
            active_model.created_at = Set(Utc::now());
        }
        active_model.updated_at = Set(Some(Utc::now()));
        Ok(active_model)
    }
}
