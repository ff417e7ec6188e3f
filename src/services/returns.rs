use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::customer_product_link::LinkKind;
use crate::entities::payment::PaymentMethod;
use crate::entities::product::SellingStatus;
use crate::entities::return_product::ExchangeKind;
use crate::entities::{
    customer, customer_product_link, employee, invoice, payment, product, return_product,
    return_product_item,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::showrooms;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReturnRequest {
    #[validate(length(min = 1, message = "No item codes supplied"))]
    pub item_codes: Vec<String>,
    pub exchange: ExchangeKind,
    #[validate(length(min = 1, message = "Check percent is required"))]
    pub check_percent: String,
    #[serde(default)]
    pub cash: Decimal,
    #[serde(default)]
    pub bkash: Decimal,
    #[serde(default)]
    pub cbl: Decimal,
    pub customer_phone: Option<String>,
}

/// Result of a processed return. An exchange only records the return; a
/// refund additionally issues a negative invoice.
#[derive(Debug, Clone)]
pub enum ReturnOutcome {
    Exchanged(return_product::Model),
    Refunded {
        record: return_product::Model,
        refund_invoice: invoice::Model,
    },
}

impl ReturnOutcome {
    pub fn record(&self) -> &return_product::Model {
        match self {
            Self::Exchanged(record) => record,
            Self::Refunded { record, .. } => record,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnedProductBrief {
    pub item_code: String,
    pub product_name: String,
}

/// One row of the returns report, keyed by refund invoice.
#[derive(Debug, Clone, Serialize)]
pub struct ReturnReportRow {
    /// Weekday name, e.g. `Monday`.
    pub day: String,
    /// `DD-MM-YYYY`.
    pub date: String,
    pub invoice_no: String,
    pub check_percent: String,
    pub amount: Decimal,
    pub tag_price: Vec<Decimal>,
    pub final_price: Vec<Decimal>,
    pub seller: Vec<String>,
    pub products: Vec<ReturnedProductBrief>,
}

#[derive(Clone)]
pub struct ReturnService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl ReturnService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Processes a return in a single transaction.
    ///
    /// Every returned product flips back to unsold with its return flag set,
    /// the customer's purchased links move to returned, and the selling
    /// employee's ledger moves the sale from the sale side to the return
    /// side. The refund amount is the sum of the discounted sell prices.
    /// When the customer is not exchanging, a negative invoice and a negative
    /// payment record the money leaving.
    #[instrument(skip(self, request), fields(items = request.item_codes.len()))]
    pub async fn create_return(
        &self,
        request: ReturnRequest,
        showroom_scope: Option<&str>,
    ) -> Result<ReturnOutcome, ServiceError> {
        request.validate()?;
        if request.exchange == ExchangeKind::NotExchanging {
            if request.customer_phone.is_none() {
                return Err(ServiceError::ValidationError(
                    "A customer phone is required when not exchanging".to_string(),
                ));
            }
            if (request.cash + request.bkash + request.cbl).is_zero() {
                return Err(ServiceError::ValidationError(
                    "A refund payment amount is required when not exchanging".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await?;

        if let Some(phone) = &request.customer_phone {
            let known = customer::Entity::find()
                .filter(customer::Column::CustomerPhone.eq(phone.as_str()))
                .one(&txn)
                .await?;
            if known.is_none() && request.exchange == ExchangeKind::NotExchanging {
                return Err(ServiceError::NotFound(format!(
                    "Customer {} not found",
                    phone
                )));
            }
        }

        let mut amount = Decimal::ZERO;
        let mut returned_ids = Vec::with_capacity(request.item_codes.len());
        let mut employee_debits: Vec<(Uuid, Decimal)> = Vec::new();

        for item_code in &request.item_codes {
            let found = product::Entity::find()
                .filter(product::Column::ItemCode.eq(item_code.as_str()))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", item_code))
                })?;
            if found.selling_status != SellingStatus::Sold {
                return Err(ServiceError::Conflict(format!(
                    "Product {} is not sold",
                    item_code
                )));
            }

            amount += found.sell_price_after_discount;
            returned_ids.push(found.id);
            if let Some(employee_id) = found.employee_id {
                employee_debits.push((employee_id, found.sell_price_after_discount));
            }

            let mut active: product::ActiveModel = found.into();
            active.selling_status = Set(SellingStatus::Unsold);
            active.return_status = Set(true);
            active.update(&txn).await?;
        }
        let amount = amount.round_dp(2);

        if let Some(phone) = &request.customer_phone {
            let buyer = customer::Entity::find()
                .filter(customer::Column::CustomerPhone.eq(phone.as_str()))
                .one(&txn)
                .await?;
            if let Some(buyer) = buyer {
                customer_product_link::Entity::update_many()
                    .col_expr(
                        customer_product_link::Column::Kind,
                        sea_orm::sea_query::Expr::value(LinkKind::Returned),
                    )
                    .filter(customer_product_link::Column::CustomerId.eq(buyer.id))
                    .filter(customer_product_link::Column::ProductId.is_in(returned_ids.clone()))
                    .filter(customer_product_link::Column::Kind.eq(LinkKind::Purchased))
                    .exec(&txn)
                    .await?;
            }
        }

        for (employee_id, price) in employee_debits {
            if let Some(seller) = employee::Entity::find_by_id(employee_id).one(&txn).await? {
                let sale_count = seller.sale_count - 1;
                let sale_amount = (seller.sale_amount - price).round_dp(2);
                let return_count = seller.return_sale_count + 1;
                let return_amount = (seller.return_sale_amount + price).round_dp(2);
                let mut active: employee::ActiveModel = seller.into();
                active.sale_count = Set(sale_count);
                active.sale_amount = Set(sale_amount);
                active.return_sale_count = Set(return_count);
                active.return_sale_amount = Set(return_amount);
                active.update(&txn).await?;
            }
        }

        let record = return_product::ActiveModel {
            id: Set(Uuid::new_v4()),
            check_percent: Set(request.check_percent),
            exchange: Set(request.exchange),
            amount: Set(amount),
            cash: Set(request.cash),
            bkash: Set(request.bkash),
            cbl: Set(request.cbl),
            customer_phone: Set(request.customer_phone),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        return_product_item::Entity::insert_many(returned_ids.iter().map(|product_id| {
            return_product_item::ActiveModel {
                return_id: Set(record.id),
                product_id: Set(*product_id),
            }
        }))
        .exec(&txn)
        .await?;

        let outcome = if record.exchange == ExchangeKind::NotExchanging {
            let target = showrooms::resolve_for_scope(&txn, showroom_scope).await?;
            let code = showrooms::next_invoice_code(&txn, &target).await?;

            let refund_invoice = invoice::ActiveModel {
                id: Set(Uuid::new_v4()),
                showroom_invoice_code: Set(code),
                invoice_amount: Set(-amount),
                net_amount: Set(-amount),
                cash: Set(-record.cash),
                bkash: Set(-record.bkash),
                cbl: Set(-record.cbl),
                customer_mobile: Set(record.customer_phone.clone()),
                showroom_id: Set(target.id),
                showroom_name: Set(target.showroom_name.clone()),
                showroom_address: Set(Some(target.showroom_address.clone())),
                showroom_mobile: Set(target.showroom_mobile.clone()),
                quantity: Set(0),
                return_quantity: Set(Some(returned_ids.len() as i32)),
                return_id: Set(Some(record.id)),
                is_hold: Set(false),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            payment::ActiveModel {
                id: Set(Uuid::new_v4()),
                amount: Set(-amount),
                payment_method: Set(PaymentMethod::Returned),
                invoice_id: Set(Some(refund_invoice.id)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            ReturnOutcome::Refunded {
                record,
                refund_invoice,
            }
        } else {
            ReturnOutcome::Exchanged(record)
        };

        txn.commit().await?;

        let record = outcome.record();
        info!(return_id = %record.id, %amount, "processed return");
        self.event_sender
            .send_best_effort(Event::ReturnProcessed {
                return_id: record.id,
                exchanged: record.exchange == ExchangeKind::Exchanging,
            })
            .await;
        Ok(outcome)
    }

    pub async fn list_returns(&self) -> Result<Vec<return_product::Model>, ServiceError> {
        Ok(return_product::Entity::find()
            .order_by_desc(return_product::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Returns report for one showroom, built from its refund invoices,
    /// newest first.
    pub async fn report(
        &self,
        showroom_scope: Option<&str>,
    ) -> Result<Vec<ReturnReportRow>, ServiceError> {
        let db = self.db.as_ref();
        let target = showrooms::resolve_for_scope(db, showroom_scope).await?;

        let refund_invoices = invoice::Entity::find()
            .filter(invoice::Column::ShowroomId.eq(target.id))
            .filter(invoice::Column::ReturnId.is_not_null())
            .order_by_desc(invoice::Column::CreatedAt)
            .all(db)
            .await?;

        let mut rows = Vec::with_capacity(refund_invoices.len());
        for refund in refund_invoices {
            let Some(return_id) = refund.return_id else {
                continue;
            };
            let record = return_product::Entity::find_by_id(return_id)
                .one(db)
                .await?
                .ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "Return {} referenced by invoice {} is missing",
                        return_id, refund.id
                    ))
                })?;
            rows.push(build_report_row(db, &refund, &record).await?);
        }
        Ok(rows)
    }
}

async fn build_report_row<C>(
    conn: &C,
    refund: &invoice::Model,
    record: &return_product::Model,
) -> Result<ReturnReportRow, ServiceError>
where
    C: ConnectionTrait,
{
    let items = return_product_item::Entity::find()
        .filter(return_product_item::Column::ReturnId.eq(record.id))
        .all(conn)
        .await?;

    let mut tag_price = Vec::with_capacity(items.len());
    let mut final_price = Vec::with_capacity(items.len());
    let mut seller = Vec::new();
    let mut products = Vec::with_capacity(items.len());
    for item in items {
        let Some(returned) = product::Entity::find_by_id(item.product_id).one(conn).await? else {
            continue;
        };
        tag_price.push(returned.sell_price);
        final_price.push(returned.sell_price_after_discount);
        products.push(ReturnedProductBrief {
            item_code: returned.item_code,
            product_name: returned.product_group,
        });
        if let Some(employee_id) = returned.employee_id {
            if let Some(sold_by) = employee::Entity::find_by_id(employee_id).one(conn).await? {
                seller.push(sold_by.employee_name);
            }
        }
    }

    Ok(ReturnReportRow {
        day: record.created_at.format("%A").to_string(),
        date: record.created_at.format("%d-%m-%Y").to_string(),
        invoice_no: refund.showroom_invoice_code.clone(),
        check_percent: record.check_percent.clone(),
        amount: record.amount,
        tag_price,
        final_price,
        seller,
        products,
    })
}
