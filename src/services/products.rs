use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::product::SellingStatus;
use crate::entities::{
    product, product_group, purchase, showroom_purchase, transfer_product, transfer_product_item,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::{pad_sequence, showrooms};

/// Item codes are globally sequential, zero padded to this width.
const ITEM_CODE_WIDTH: usize = 10;
const PRODUCT_PAGE_SIZE: u64 = 100;
/// Tagless and invoice sequences are per showroom, padded to this width.
const SHOWROOM_SEQUENCE_WIDTH: usize = 8;

/// Derived margin figures for a product, rounded to two decimal places at
/// write time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub gross_profit: Decimal,
    pub gross_margin: Decimal,
}

/// `gross_profit = sell_price - unit_cost`, `gross_margin` as a percentage of
/// the sell price. A zero sell price yields a zero margin rather than a
/// division error.
pub fn derive_pricing(unit_cost: Decimal, sell_price: Decimal) -> Pricing {
    let gross_profit = (sell_price - unit_cost).round_dp(2);
    let gross_margin = if sell_price.is_zero() {
        Decimal::ZERO
    } else {
        ((sell_price - unit_cost) / sell_price * Decimal::from(100)).round_dp(2)
    };
    Pricing {
        gross_profit,
        gross_margin,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProductGroup {
    #[validate(length(min = 1, message = "Product code cannot be empty"))]
    pub product_code: String,
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub product_name: String,
    #[validate(length(min = 1, message = "Product category cannot be empty"))]
    pub product_category: String,
}

/// One purchase line. `quantity` pieces are stamped out as individual
/// products sharing the line's attributes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProductLine {
    /// Numeric base code for this line's units. Omitted lines continue the
    /// running sequence.
    pub item_code: Option<String>,
    #[validate(length(min = 1, message = "Product group cannot be empty"))]
    pub product_group: String,
    #[validate(length(min = 1, message = "Showroom name cannot be empty"))]
    pub showroom_name: String,
    pub supplier_name: Option<String>,
    pub lot_number: Option<String>,
    pub size: Option<String>,
    pub unit_cost: Decimal,
    pub sell_price: Decimal,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    pub invoice_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub challan_number: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_total_price: Option<Decimal>,
    pub total_item: Option<i32>,
    pub transportation_cost: Option<Decimal>,
    pub purchase_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTaglessProduct {
    #[validate(length(min = 1, message = "Product group cannot be empty"))]
    pub product_group: String,
    #[validate(length(min = 1, message = "Showroom name cannot be empty"))]
    pub showroom_name: String,
    pub sell_price: Decimal,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductPriceUpdate {
    #[validate(length(min = 1, message = "Item code cannot be empty"))]
    pub item_code: String,
    pub unit_cost: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub sell_price_after_discount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    pub product_group: Option<String>,
    pub supplier_name: Option<String>,
    pub lot_number: Option<String>,
    pub size: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub sell_price_after_discount: Option<Decimal>,
}

/// One page of the product listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub product: Vec<product::Model>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransferRequest {
    #[validate(length(min = 1, message = "No item codes supplied"))]
    pub item_codes: Vec<String>,
    #[validate(length(min = 1, message = "Source location cannot be empty"))]
    pub prev_location: String,
    #[validate(length(min = 1, message = "Destination location cannot be empty"))]
    pub current_location: String,
}

#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn create_group(
        &self,
        input: NewProductGroup,
    ) -> Result<product_group::Model, ServiceError> {
        input.validate()?;

        let existing = product_group::Entity::find()
            .filter(product_group::Column::ProductName.eq(input.product_name.as_str()))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Product group {} already exists",
                input.product_name
            )));
        }

        let model = product_group::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_code: Set(input.product_code),
            product_name: Set(input.product_name),
            product_category: Set(input.product_category),
            ..Default::default()
        };
        let created = model.insert(self.db.as_ref()).await?;
        self.event_sender
            .send_best_effort(Event::ProductGroupCreated(created.id))
            .await;
        Ok(created)
    }

    pub async fn list_groups(&self) -> Result<Vec<product_group::Model>, ServiceError> {
        Ok(product_group::Entity::find()
            .order_by_asc(product_group::Column::ProductName)
            .all(self.db.as_ref())
            .await?)
    }

    /// Imports product groups, all rows or none.
    #[instrument(skip(self, rows))]
    pub async fn import_groups(&self, rows: Vec<NewProductGroup>) -> Result<u64, ServiceError> {
        if rows.is_empty() {
            return Err(ServiceError::ValidationError(
                "No rows to import".to_string(),
            ));
        }
        for (index, row) in rows.iter().enumerate() {
            row.validate().map_err(|e| {
                ServiceError::ValidationError(format!("Row {}: {}", index + 1, e))
            })?;
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();
        let models = rows.into_iter().map(|row| product_group::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_code: Set(row.product_code),
            product_name: Set(row.product_name),
            product_category: Set(row.product_category),
            created_at: Set(now),
            updated_at: Set(Some(now)),
        });
        let count = models.len() as u64;
        product_group::Entity::insert_many(models).exec(&txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_best_effort(Event::ProductsImported { count })
            .await;
        Ok(count)
    }

    /// Creates products from purchase lines. Each line yields `quantity`
    /// individual products with consecutive item codes, plus one purchase
    /// record covering the whole call, in a single transaction.
    #[instrument(skip(self, lines))]
    pub async fn create_products(
        &self,
        lines: Vec<NewProductLine>,
    ) -> Result<Vec<product::Model>, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "No product lines supplied".to_string(),
            ));
        }
        for (index, line) in lines.iter().enumerate() {
            line.validate().map_err(|e| {
                ServiceError::ValidationError(format!("Line {}: {}", index + 1, e))
            })?;
        }

        let txn = self.db.begin().await?;

        let mut sequence = product::Entity::find().count(&txn).await?;
        let now = Utc::now();
        let purchase_id = Uuid::new_v4();
        let mut created = Vec::new();
        let mut total_units: i32 = 0;
        let mut purchase_amount = Decimal::ZERO;

        for line in &lines {
            let group = find_group(&txn, &line.product_group).await?;
            let pricing = derive_pricing(line.unit_cost, line.sell_price);

            if let Some(base) = &line.item_code {
                let base: u64 = base.parse().map_err(|_| {
                    ServiceError::ValidationError(format!("Item code {} is not numeric", base))
                })?;
                sequence = base.saturating_sub(1);
            }
            for _ in 0..line.quantity {
                sequence += 1;
                created.push(product::Model {
                    id: Uuid::new_v4(),
                    item_code: pad_sequence(sequence, ITEM_CODE_WIDTH),
                    product_code: Some(group.product_code.clone()),
                    product_group: group.product_name.clone(),
                    showroom_name: line.showroom_name.clone(),
                    supplier_name: line.supplier_name.clone(),
                    lot_number: line.lot_number.clone(),
                    size: line.size.clone(),
                    unit_cost: line.unit_cost.round_dp(2),
                    sell_price: line.sell_price.round_dp(2),
                    sell_price_after_discount: line.sell_price.round_dp(2),
                    gross_profit: pricing.gross_profit,
                    gross_margin: pricing.gross_margin,
                    selling_status: SellingStatus::Unsold,
                    return_status: false,
                    tagless: false,
                    invoice_date: line.invoice_date,
                    delivery_date: line.delivery_date,
                    challan_number: line.challan_number.clone(),
                    invoice_number: line.invoice_number.clone(),
                    invoice_total_price: line.invoice_total_price,
                    total_item: line.total_item,
                    transportation_cost: line.transportation_cost,
                    purchase_name: line.purchase_name.clone(),
                    employee_id: None,
                    invoice_id: None,
                    purchase_id: Some(purchase_id),
                    created_at: now,
                    updated_at: Some(now),
                });
            }
            total_units += line.quantity as i32;
            purchase_amount += line.unit_cost * Decimal::from(line.quantity);
        }

        let taken = product::Entity::find()
            .filter(product::Column::ItemCode.is_in(created.iter().map(|p| p.item_code.clone())))
            .one(&txn)
            .await?;
        if let Some(taken) = taken {
            return Err(ServiceError::ValidationError(format!(
                "Item code {} already exists",
                taken.item_code
            )));
        }

        product::Entity::insert_many(
            created
                .iter()
                .cloned()
                .map(|model| model.into_active_model().reset_all())
                .collect::<Vec<_>>(),
        )
        .exec(&txn)
        .await?;

        let first = &lines[0];
        purchase::ActiveModel {
            id: Set(purchase_id),
            invoice_no: Set(first
                .invoice_number
                .clone()
                .unwrap_or_else(|| purchase_id.to_string())),
            supplier_name: Set(first
                .supplier_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string())),
            purchase_amount: Set(purchase_amount.round_dp(2)),
            quantity: Set(total_units),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let target = showrooms::find_by_name(&txn, &first.showroom_name).await?;
        showroom_purchase::ActiveModel {
            showroom_id: Set(target.id),
            purchase_id: Set(purchase_id),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(purchase_id = %purchase_id, units = total_units, "created product batch");
        self.event_sender
            .send_best_effort(Event::ProductBatchCreated {
                purchase_id,
                quantity: total_units as u32,
            })
            .await;
        Ok(created)
    }

    /// Creates a tagless product. Its code is the showroom code followed by
    /// the per showroom tagless sequence number.
    #[instrument(skip(self))]
    pub async fn create_tagless(
        &self,
        input: NewTaglessProduct,
    ) -> Result<product::Model, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let group = find_group(&txn, &input.product_group).await?;
        let target = showrooms::find_by_name(&txn, &input.showroom_name).await?;
        let issued = product::Entity::find()
            .filter(product::Column::Tagless.eq(true))
            .filter(product::Column::ShowroomName.eq(input.showroom_name.as_str()))
            .count(&txn)
            .await?;

        // Tagless items carry no purchase cost of their own.
        let pricing = derive_pricing(input.sell_price, input.sell_price);
        let model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_code: Set(format!(
                "{}{}",
                target.showroom_code,
                pad_sequence(issued + 1, SHOWROOM_SEQUENCE_WIDTH)
            )),
            product_code: Set(Some(group.product_code.clone())),
            product_group: Set(group.product_name.clone()),
            showroom_name: Set(input.showroom_name),
            size: Set(input.size),
            unit_cost: Set(input.sell_price.round_dp(2)),
            sell_price: Set(input.sell_price.round_dp(2)),
            sell_price_after_discount: Set(input.sell_price.round_dp(2)),
            gross_profit: Set(pricing.gross_profit),
            gross_margin: Set(pricing.gross_margin),
            selling_status: Set(SellingStatus::Unsold),
            return_status: Set(false),
            tagless: Set(true),
            ..Default::default()
        };
        let created = model.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Imports fully specified products, all rows or none. Rows are validated
    /// up front so a bad row in the middle leaves nothing behind.
    #[instrument(skip(self, rows))]
    pub async fn import_products(&self, rows: Vec<NewProductLine>) -> Result<u64, ServiceError> {
        if rows.is_empty() {
            return Err(ServiceError::ValidationError(
                "No rows to import".to_string(),
            ));
        }
        for (index, row) in rows.iter().enumerate() {
            row.validate().map_err(|e| {
                ServiceError::ValidationError(format!("Row {}: {}", index + 1, e))
            })?;
        }

        let created = self.create_products(rows).await?;
        let count = created.len() as u64;
        self.event_sender
            .send_best_effort(Event::ProductsImported { count })
            .await;
        Ok(count)
    }

    /// Re-prices products by item code inside one transaction. A missing
    /// code aborts the whole update.
    #[instrument(skip(self, updates))]
    pub async fn bulk_update(
        &self,
        updates: Vec<ProductPriceUpdate>,
    ) -> Result<u64, ServiceError> {
        if updates.is_empty() {
            return Err(ServiceError::ValidationError(
                "No updates supplied".to_string(),
            ));
        }
        for update in &updates {
            update.validate()?;
        }

        let txn = self.db.begin().await?;
        let count = updates.len() as u64;
        for update in updates {
            let existing = product::Entity::find()
                .filter(product::Column::ItemCode.eq(update.item_code.as_str()))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", update.item_code))
                })?;

            let unit_cost = update.unit_cost.unwrap_or(existing.unit_cost);
            let sell_price = update.sell_price.unwrap_or(existing.sell_price);
            let discounted = update
                .sell_price_after_discount
                .unwrap_or(existing.sell_price_after_discount);
            let pricing = derive_pricing(unit_cost, sell_price);

            let mut active: product::ActiveModel = existing.into();
            active.unit_cost = Set(unit_cost.round_dp(2));
            active.sell_price = Set(sell_price.round_dp(2));
            active.sell_price_after_discount = Set(discounted.round_dp(2));
            active.gross_profit = Set(pricing.gross_profit);
            active.gross_margin = Set(pricing.gross_margin);
            active.update(&txn).await?;
        }
        txn.commit().await?;

        self.event_sender
            .send_best_effort(Event::ProductsBulkUpdated { count })
            .await;
        Ok(count)
    }

    /// Edits one product. Sold products are frozen; returns and re-sales go
    /// through their own flows.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> Result<product::Model, ServiceError> {
        let existing = product::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;
        if existing.selling_status == SellingStatus::Sold {
            return Err(ServiceError::Conflict(
                "Sold products cannot be edited".to_string(),
            ));
        }

        let unit_cost = input.unit_cost.unwrap_or(existing.unit_cost);
        let sell_price = input.sell_price.unwrap_or(existing.sell_price);
        let discounted = input
            .sell_price_after_discount
            .unwrap_or(existing.sell_price_after_discount);
        let pricing = derive_pricing(unit_cost, sell_price);

        let mut active: product::ActiveModel = existing.into();
        if let Some(group_name) = input.product_group {
            let group = find_group(self.db.as_ref(), &group_name).await?;
            active.product_group = Set(group.product_name);
            active.product_code = Set(Some(group.product_code));
        }
        if input.supplier_name.is_some() {
            active.supplier_name = Set(input.supplier_name);
        }
        if input.lot_number.is_some() {
            active.lot_number = Set(input.lot_number);
        }
        if input.size.is_some() {
            active.size = Set(input.size);
        }
        active.unit_cost = Set(unit_cost.round_dp(2));
        active.sell_price = Set(sell_price.round_dp(2));
        active.sell_price_after_discount = Set(discounted.round_dp(2));
        active.gross_profit = Set(pricing.gross_profit);
        active.gross_margin = Set(pricing.gross_margin);
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Lists products ordered by item code, optionally restricted to the
    /// caller's showroom, one page at a time.
    pub async fn list_products(
        &self,
        showroom_scope: Option<&str>,
        page: u64,
    ) -> Result<ProductPage, ServiceError> {
        let mut query = product::Entity::find();
        if let Some(code) = showroom_scope {
            let target = showrooms::resolve_for_scope(self.db.as_ref(), Some(code)).await?;
            query = query.filter(product::Column::ShowroomName.eq(target.showroom_name));
        }
        let paginator = query
            .order_by_asc(product::Column::ItemCode)
            .paginate(self.db.as_ref(), PRODUCT_PAGE_SIZE);
        let total_pages = paginator.num_pages().await?;
        let product = paginator.fetch_page(page).await?;
        Ok(ProductPage {
            product,
            has_more: page + 1 < total_pages,
        })
    }

    pub async fn list_by_showroom(
        &self,
        showroom_name: &str,
    ) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::Entity::find()
            .filter(product::Column::ShowroomName.eq(showroom_name))
            .order_by_asc(product::Column::ItemCode)
            .all(self.db.as_ref())
            .await?)
    }

    /// Unsold stock of the showroom carrying `showroom_code`.
    pub async fn list_unsold_by_showroom_code(
        &self,
        showroom_code: &str,
    ) -> Result<Vec<product::Model>, ServiceError> {
        let target =
            showrooms::resolve_for_scope(self.db.as_ref(), Some(showroom_code)).await?;
        Ok(product::Entity::find()
            .filter(product::Column::ShowroomName.eq(target.showroom_name))
            .filter(product::Column::SellingStatus.eq(SellingStatus::Unsold))
            .order_by_asc(product::Column::ItemCode)
            .all(self.db.as_ref())
            .await?)
    }

    /// Moves unsold products between showrooms and records the transfer. The
    /// whole set moves or none of it does.
    #[instrument(skip(self, request))]
    pub async fn transfer_products(
        &self,
        request: TransferRequest,
    ) -> Result<transfer_product::Model, ServiceError> {
        request.validate()?;

        let txn = self.db.begin().await?;

        let mut moved_ids = Vec::with_capacity(request.item_codes.len());
        for item_code in &request.item_codes {
            let found = product::Entity::find()
                .filter(product::Column::ItemCode.eq(item_code.as_str()))
                .filter(product::Column::ShowroomName.eq(request.prev_location.as_str()))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "Product {} not found in {}",
                        item_code, request.prev_location
                    ))
                })?;
            if found.selling_status == SellingStatus::Sold {
                return Err(ServiceError::Conflict(format!(
                    "Product {} is already sold",
                    item_code
                )));
            }

            let id = found.id;
            let mut active: product::ActiveModel = found.into();
            active.showroom_name = Set(request.current_location.clone());
            active.update(&txn).await?;
            moved_ids.push(id);
        }

        let transfer = transfer_product::ActiveModel {
            id: Set(Uuid::new_v4()),
            prev_location: Set(request.prev_location),
            current_location: Set(request.current_location),
            product_count: Set(moved_ids.len() as i32),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        transfer_product_item::Entity::insert_many(moved_ids.iter().map(|product_id| {
            transfer_product_item::ActiveModel {
                transfer_id: Set(transfer.id),
                product_id: Set(*product_id),
            }
        }))
        .exec(&txn)
        .await?;

        txn.commit().await?;

        self.event_sender
            .send_best_effort(Event::ProductsTransferred {
                transfer_id: transfer.id,
                count: moved_ids.len() as u32,
            })
            .await;
        Ok(transfer)
    }

    pub async fn list_transfers(&self) -> Result<Vec<transfer_product::Model>, ServiceError> {
        Ok(transfer_product::Entity::find()
            .order_by_desc(transfer_product::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }
}

async fn find_group<C>(conn: &C, name: &str) -> Result<product_group::Model, ServiceError>
where
    C: ConnectionTrait,
{
    product_group::Entity::find()
        .filter(product_group::Column::ProductName.eq(name))
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::ValidationError(format!("Unknown product group {}", name)))
}
