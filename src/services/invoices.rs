use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::customer_product_link::LinkKind;
use crate::entities::payment::PaymentMethod;
use crate::entities::product::SellingStatus;
use crate::entities::{customer, customer_product_link, employee, invoice, payment, product};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::showrooms;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaleRequest {
    #[validate(length(min = 1, message = "No item codes supplied"))]
    pub item_codes: Vec<String>,
    /// Per item discounted prices, aligned with `item_codes`. Omitted items
    /// keep their current discounted price.
    pub discounted_prices: Option<Vec<Decimal>>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub cash: Decimal,
    #[serde(default)]
    pub bkash: Decimal,
    #[serde(default)]
    pub cbl: Decimal,
    /// Hold invoices park a cart without selling anything. They expire and
    /// are purged by the background task.
    #[serde(default)]
    pub is_hold: bool,
}

#[derive(Clone)]
pub struct InvoiceService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl InvoiceService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Completes a sale in one transaction: marks the products sold, writes
    /// the invoice under the next per showroom code, records the payment,
    /// links the customer and credits the selling employee.
    #[instrument(skip(self, request), fields(items = request.item_codes.len()))]
    pub async fn create_sale(
        &self,
        request: SaleRequest,
        showroom_scope: Option<&str>,
    ) -> Result<invoice::Model, ServiceError> {
        request.validate()?;
        if let Some(prices) = &request.discounted_prices {
            if prices.len() != request.item_codes.len() {
                return Err(ServiceError::ValidationError(
                    "Discounted prices must match item codes".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await?;

        let target = showrooms::resolve_for_scope(&txn, showroom_scope).await?;
        let code = showrooms::next_invoice_code(&txn, &target).await?;
        let invoice_id = Uuid::new_v4();

        let mut invoice_amount = Decimal::ZERO;
        let mut net_amount = Decimal::ZERO;
        let mut sold_ids = Vec::with_capacity(request.item_codes.len());

        for (index, item_code) in request.item_codes.iter().enumerate() {
            let found = product::Entity::find()
                .filter(product::Column::ItemCode.eq(item_code.as_str()))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", item_code))
                })?;
            if found.selling_status == SellingStatus::Sold {
                return Err(ServiceError::Conflict(format!(
                    "Product {} is already sold",
                    item_code
                )));
            }

            let discounted = request
                .discounted_prices
                .as_ref()
                .map(|prices| prices[index].round_dp(2))
                .unwrap_or(found.sell_price_after_discount);

            invoice_amount += found.sell_price;
            net_amount += discounted;
            sold_ids.push(found.id);

            if !request.is_hold {
                let mut active: product::ActiveModel = found.into();
                active.selling_status = Set(SellingStatus::Sold);
                active.sell_price_after_discount = Set(discounted);
                active.invoice_id = Set(Some(invoice_id));
                active.employee_id = Set(request.employee_id);
                active.update(&txn).await?;
            }
        }
        let invoice_amount = invoice_amount.round_dp(2);
        let net_amount = net_amount.round_dp(2);
        let paid = (request.cash + request.bkash + request.cbl).round_dp(2);

        let created = invoice::ActiveModel {
            id: Set(invoice_id),
            showroom_invoice_code: Set(code),
            invoice_amount: Set(invoice_amount),
            net_amount: Set(net_amount),
            cash: Set(request.cash),
            bkash: Set(request.bkash),
            cbl: Set(request.cbl),
            customer_name: Set(request.customer_name.clone()),
            customer_mobile: Set(request.customer_phone.clone()),
            showroom_id: Set(target.id),
            showroom_name: Set(target.showroom_name.clone()),
            showroom_address: Set(Some(target.showroom_address.clone())),
            showroom_mobile: Set(target.showroom_mobile.clone()),
            quantity: Set(sold_ids.len() as i32),
            is_hold: Set(request.is_hold),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !request.is_hold {
            payment::ActiveModel {
                id: Set(Uuid::new_v4()),
                amount: Set(paid),
                payment_method: Set(payment_method_for(
                    request.cash,
                    request.bkash,
                    request.cbl,
                )),
                invoice_id: Set(Some(invoice_id)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            if let Some(phone) = &request.customer_phone {
                let buyer =
                    find_or_create_customer(&txn, phone, request.customer_name.as_deref(), &target)
                        .await?;
                customer_product_link::Entity::insert_many(sold_ids.iter().map(|product_id| {
                    customer_product_link::ActiveModel {
                        customer_id: Set(buyer.id),
                        product_id: Set(*product_id),
                        kind: Set(LinkKind::Purchased),
                    }
                }))
                .exec(&txn)
                .await?;

                let outstanding = (net_amount - paid).max(Decimal::ZERO);
                let mut active: customer::ActiveModel = buyer.clone().into();
                active.paid = Set((buyer.paid + paid).round_dp(2));
                active.credit = Set((buyer.credit + outstanding).round_dp(2));
                active.update(&txn).await?;
            }

            if let Some(employee_id) = request.employee_id {
                let seller = employee::Entity::find_by_id(employee_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Employee {} not found", employee_id))
                    })?;
                let count = seller.sale_count + sold_ids.len() as i32;
                let total = (seller.sale_amount + net_amount).round_dp(2);
                let mut active: employee::ActiveModel = seller.into();
                active.sale_count = Set(count);
                active.sale_amount = Set(total);
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;

        info!(invoice_id = %created.id, code = %created.showroom_invoice_code, "completed sale");
        if !created.is_hold {
            self.event_sender
                .send_best_effort(Event::SaleCompleted {
                    invoice_id: created.id,
                })
                .await;
        }
        Ok(created)
    }

    pub async fn list_invoices(&self) -> Result<Vec<invoice::Model>, ServiceError> {
        Ok(invoice::Entity::find()
            .order_by_desc(invoice::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    pub async fn get_invoice(&self, id: Uuid) -> Result<invoice::Model, ServiceError> {
        invoice::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {} not found", id)))
    }

    /// Deletes hold invoices older than the TTL. Run periodically by the
    /// background task.
    #[instrument(skip(self))]
    pub async fn purge_expired_hold_invoices(&self, ttl_hours: i64) -> Result<u64, ServiceError> {
        let cutoff = Utc::now() - Duration::hours(ttl_hours);
        let result = invoice::Entity::delete_many()
            .filter(invoice::Column::IsHold.eq(true))
            .filter(invoice::Column::CreatedAt.lt(cutoff))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected > 0 {
            info!(count = result.rows_affected, "purged expired hold invoices");
            self.event_sender
                .send_best_effort(Event::HoldInvoicesPurged {
                    count: result.rows_affected,
                })
                .await;
        }
        Ok(result.rows_affected)
    }
}

fn payment_method_for(cash: Decimal, bkash: Decimal, cbl: Decimal) -> PaymentMethod {
    let used = [
        (cash, PaymentMethod::Cash),
        (bkash, PaymentMethod::Bkash),
        (cbl, PaymentMethod::Cbl),
    ];
    let mut methods = used.iter().filter(|(amount, _)| !amount.is_zero());
    match (methods.next(), methods.next()) {
        (Some((_, method)), None) => *method,
        _ => PaymentMethod::Multiple,
    }
}

async fn find_or_create_customer<C>(
    conn: &C,
    phone: &str,
    name: Option<&str>,
    target: &crate::entities::showroom::Model,
) -> Result<customer::Model, ServiceError>
where
    C: sea_orm::ConnectionTrait,
{
    let existing = customer::Entity::find()
        .filter(customer::Column::CustomerPhone.eq(phone))
        .one(conn)
        .await?;
    if let Some(existing) = existing {
        return Ok(existing);
    }

    Ok(customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_name: Set(name.unwrap_or("Walk-in Customer").to_string()),
        customer_phone: Set(phone.to_string()),
        credit: Set(Decimal::ZERO),
        paid: Set(Decimal::ZERO),
        showroom_id: Set(Some(target.id)),
        ..Default::default()
    }
    .insert(conn)
    .await?)
}
