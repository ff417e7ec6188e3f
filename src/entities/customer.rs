use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A buyer, identified by phone number. Purchased and returned product sets
/// live in `customer_product_link`; a product is in exactly one of the two
/// sets per customer at a time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub customer_name: String,
    #[sea_orm(unique)]
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,

    pub credit: Decimal,
    pub paid: Decimal,

    pub showroom_id: Option<Uuid>,
    pub crm: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::showroom::Entity",
        from = "Column::ShowroomId",
        to = "super::showroom::Column::Id"
    )]
    Showroom,
    #[sea_orm(has_many = "super::customer_product_link::Entity")]
    ProductLinks,
}

impl Related<super::showroom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Showroom.def()
    }
}

impl Related<super::customer_product_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductLinks.def()
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
