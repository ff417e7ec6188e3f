use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Join table linking purchases to the showroom that received the stock.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "showroom_purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub showroom_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub purchase_id: Uuid,
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
        belongs_to = "super::purchase::Entity",
        from = "Column::PurchaseId",
        to = "super::purchase::Column::Id"
    )]
    Purchase,
}

impl ActiveModelBehavior for ActiveModel {}
