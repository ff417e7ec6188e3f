mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use retail_pos_api::entities::customer_product_link::LinkKind;
use retail_pos_api::entities::payment::PaymentMethod;
use retail_pos_api::entities::product::SellingStatus;
use retail_pos_api::entities::return_product::ExchangeKind;
use retail_pos_api::entities::{
    customer, customer_product_link, employee, invoice, payment, product,
};
use retail_pos_api::errors::ServiceError;
use retail_pos_api::services::invoices::SaleRequest;
use retail_pos_api::services::products::UpdateProduct;
use retail_pos_api::services::returns::{ReturnOutcome, ReturnRequest};

use common::{product_line, seed_employee, seed_group, seed_head_office, spawn_app};

fn sale_of(item_codes: &[&str]) -> SaleRequest {
    SaleRequest {
        item_codes: item_codes.iter().map(|c| c.to_string()).collect(),
        discounted_prices: None,
        customer_name: Some("Rahim Uddin".to_string()),
        customer_phone: Some("01711111111".to_string()),
        employee_id: None,
        cash: dec!(300),
        bkash: dec!(0),
        cbl: dec!(0),
        is_hold: false,
    }
}

async fn seed_stock(app: &common::TestApp, quantity: u32) {
    seed_head_office(app).await;
    seed_group(app, "Denim Jacket").await;
    app.state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", quantity)])
        .await
        .expect("seed stock");
}

#[tokio::test]
async fn sale_marks_products_sold_under_a_sequential_code() {
    let app = spawn_app().await;
    seed_stock(&app, 3).await;

    let first = app
        .state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001", "0000000002"]), None)
        .await
        .expect("first sale");
    assert_eq!(first.showroom_invoice_code, "HO00000001");
    assert_eq!(first.quantity, 2);
    assert_eq!(first.invoice_amount, dec!(300.00));
    assert_eq!(first.net_amount, dec!(300.00));

    let second = app
        .state
        .services
        .invoices
        .create_sale(sale_of(&["0000000003"]), None)
        .await
        .expect("second sale");
    assert_eq!(second.showroom_invoice_code, "HO00000002");

    let sold = product::Entity::find()
        .filter(product::Column::SellingStatus.eq(SellingStatus::Sold))
        .count(app.state.db.as_ref())
        .await
        .expect("count sold");
    assert_eq!(sold, 3);
}

#[tokio::test]
async fn selling_an_already_sold_item_rolls_back() {
    let app = spawn_app().await;
    seed_stock(&app, 2).await;
    app.state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001"]), None)
        .await
        .expect("first sale");

    let result = app
        .state
        .services
        .invoices
        .create_sale(sale_of(&["0000000002", "0000000001"]), None)
        .await;
    assert_matches!(result, Err(ServiceError::Conflict(_)));

    let unsold = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000002"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(unsold.selling_status, SellingStatus::Unsold);

    let invoices = invoice::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .expect("count invoices");
    assert_eq!(invoices, 1);
}

#[tokio::test]
async fn sold_products_cannot_be_edited() {
    let app = spawn_app().await;
    seed_stock(&app, 1).await;
    app.state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001"]), None)
        .await
        .expect("sale");

    let sold = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000001"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    let result = app
        .state
        .services
        .products
        .update_product(
            sold.id,
            UpdateProduct {
                product_group: None,
                supplier_name: None,
                lot_number: None,
                size: None,
                unit_cost: None,
                sell_price: Some(dec!(1)),
                sell_price_after_discount: None,
            },
        )
        .await;
    assert_matches!(result, Err(ServiceError::Conflict(_)));
}

#[tokio::test]
async fn sale_links_customer_and_credits_employee() {
    let app = spawn_app().await;
    seed_stock(&app, 2).await;
    let seller = seed_employee(&app, "Karim").await;

    let mut request = sale_of(&["0000000001", "0000000002"]);
    request.employee_id = Some(seller.id);
    request.cash = dec!(300);
    app.state
        .services
        .invoices
        .create_sale(request, None)
        .await
        .expect("sale");

    let buyer = customer::Entity::find()
        .filter(customer::Column::CustomerPhone.eq("01711111111"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("customer created");
    assert_eq!(buyer.paid, dec!(300.00));

    let purchased = customer_product_link::Entity::find()
        .filter(customer_product_link::Column::CustomerId.eq(buyer.id))
        .filter(customer_product_link::Column::Kind.eq(LinkKind::Purchased))
        .count(app.state.db.as_ref())
        .await
        .expect("count links");
    assert_eq!(purchased, 2);

    let seller = employee::Entity::find_by_id(seller.id)
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("employee exists");
    assert_eq!(seller.sale_count, 2);
    assert_eq!(seller.sale_amount, dec!(300.00));
}

#[tokio::test]
async fn payment_method_reflects_the_tender_mix() {
    let app = spawn_app().await;
    seed_stock(&app, 2).await;

    let mut split = sale_of(&["0000000001"]);
    split.cash = dec!(100);
    split.bkash = dec!(50);
    let created = app
        .state
        .services
        .invoices
        .create_sale(split, None)
        .await
        .expect("sale");

    let recorded = payment::Entity::find()
        .filter(payment::Column::InvoiceId.eq(created.id))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("payment recorded");
    assert_eq!(recorded.payment_method, PaymentMethod::Multiple);
    assert_eq!(recorded.amount, dec!(150.00));
}

#[tokio::test]
async fn exchanging_return_flips_state_without_refund_invoice() {
    let app = spawn_app().await;
    seed_stock(&app, 2).await;
    let seller = seed_employee(&app, "Karim").await;
    let mut request = sale_of(&["0000000001", "0000000002"]);
    request.employee_id = Some(seller.id);
    app.state
        .services
        .invoices
        .create_sale(request, None)
        .await
        .expect("sale");

    let outcome = app
        .state
        .services
        .returns
        .create_return(
            ReturnRequest {
                item_codes: vec!["0000000001".to_string()],
                exchange: ExchangeKind::Exchanging,
                check_percent: "100%".to_string(),
                cash: dec!(0),
                bkash: dec!(0),
                cbl: dec!(0),
                customer_phone: Some("01711111111".to_string()),
            },
            None,
        )
        .await
        .expect("return");
    assert_matches!(outcome, ReturnOutcome::Exchanged(_));
    assert_eq!(outcome.record().amount, dec!(150.00));

    let returned = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000001"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(returned.selling_status, SellingStatus::Unsold);
    assert!(returned.return_status);

    // Only the sale invoice exists; exchanging returns issue no refund.
    let invoices = invoice::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .expect("count invoices");
    assert_eq!(invoices, 1);

    // The sale moved from the sale side of the ledger to the return side.
    let seller = employee::Entity::find_by_id(seller.id)
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("employee exists");
    assert_eq!(seller.sale_count, 1);
    assert_eq!(seller.sale_amount, dec!(150.00));
    assert_eq!(seller.return_sale_count, 1);
    assert_eq!(seller.return_sale_amount, dec!(150.00));
}

#[tokio::test]
async fn non_exchanging_return_writes_negative_invoice_and_payment() {
    let app = spawn_app().await;
    seed_stock(&app, 1).await;
    app.state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001"]), None)
        .await
        .expect("sale");

    let outcome = app
        .state
        .services
        .returns
        .create_return(
            ReturnRequest {
                item_codes: vec!["0000000001".to_string()],
                exchange: ExchangeKind::NotExchanging,
                check_percent: "100%".to_string(),
                cash: dec!(150),
                bkash: dec!(0),
                cbl: dec!(0),
                customer_phone: Some("01711111111".to_string()),
            },
            None,
        )
        .await
        .expect("return");
    let ReturnOutcome::Refunded {
        record,
        refund_invoice,
    } = outcome
    else {
        panic!("expected a refund outcome");
    };
    assert_eq!(refund_invoice.return_id, Some(record.id));
    assert_eq!(refund_invoice.invoice_amount, dec!(-150.00));
    assert_eq!(refund_invoice.net_amount, dec!(-150.00));
    assert_eq!(refund_invoice.cash, dec!(-150));
    assert_eq!(refund_invoice.return_quantity, Some(1));
    // The refund invoice consumes the next sequence slot after the sale.
    assert_eq!(refund_invoice.showroom_invoice_code, "HO00000002");

    let refund_payment = payment::Entity::find()
        .filter(payment::Column::InvoiceId.eq(refund_invoice.id))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("refund payment exists");
    assert_eq!(refund_payment.amount, dec!(-150.00));
    assert_eq!(refund_payment.payment_method, PaymentMethod::Returned);
}

#[tokio::test]
async fn return_moves_customer_links_to_returned() {
    let app = spawn_app().await;
    seed_stock(&app, 2).await;
    app.state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001", "0000000002"]), None)
        .await
        .expect("sale");

    app.state
        .services
        .returns
        .create_return(
            ReturnRequest {
                item_codes: vec!["0000000001".to_string()],
                exchange: ExchangeKind::Exchanging,
                check_percent: "100%".to_string(),
                cash: dec!(0),
                bkash: dec!(0),
                cbl: dec!(0),
                customer_phone: Some("01711111111".to_string()),
            },
            None,
        )
        .await
        .expect("return");

    let buyer = customer::Entity::find()
        .filter(customer::Column::CustomerPhone.eq("01711111111"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("customer exists");
    let returned = customer_product_link::Entity::find()
        .filter(customer_product_link::Column::CustomerId.eq(buyer.id))
        .filter(customer_product_link::Column::Kind.eq(LinkKind::Returned))
        .count(app.state.db.as_ref())
        .await
        .expect("count returned links");
    assert_eq!(returned, 1);
    let purchased = customer_product_link::Entity::find()
        .filter(customer_product_link::Column::CustomerId.eq(buyer.id))
        .filter(customer_product_link::Column::Kind.eq(LinkKind::Purchased))
        .count(app.state.db.as_ref())
        .await
        .expect("count purchased links");
    assert_eq!(purchased, 1);
}

#[tokio::test]
async fn returning_an_unsold_item_is_rejected_atomically() {
    let app = spawn_app().await;
    seed_stock(&app, 2).await;
    app.state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001"]), None)
        .await
        .expect("sale");

    let result = app
        .state
        .services
        .returns
        .create_return(
            ReturnRequest {
                item_codes: vec!["0000000001".to_string(), "0000000002".to_string()],
                exchange: ExchangeKind::Exchanging,
                check_percent: "100%".to_string(),
                cash: dec!(0),
                bkash: dec!(0),
                cbl: dec!(0),
                customer_phone: None,
            },
            None,
        )
        .await;
    assert_matches!(result, Err(ServiceError::Conflict(_)));

    // The sold item is untouched because the transaction rolled back.
    let sold = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000001"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(sold.selling_status, SellingStatus::Sold);
    assert!(!sold.return_status);
}

#[tokio::test]
async fn return_report_formats_display_dates() {
    let app = spawn_app().await;
    seed_stock(&app, 1).await;
    app.state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001"]), None)
        .await
        .expect("sale");
    app.state
        .services
        .returns
        .create_return(
            ReturnRequest {
                item_codes: vec!["0000000001".to_string()],
                exchange: ExchangeKind::NotExchanging,
                check_percent: "50%".to_string(),
                cash: dec!(150),
                bkash: dec!(0),
                cbl: dec!(0),
                customer_phone: Some("01711111111".to_string()),
            },
            None,
        )
        .await
        .expect("return");

    let rows = app
        .state
        .services
        .returns
        .report(None)
        .await
        .expect("report");
    assert_eq!(rows.len(), 1);
    let today = Utc::now();
    assert_eq!(rows[0].date, today.format("%d-%m-%Y").to_string());
    assert_eq!(rows[0].day, today.format("%A").to_string());
    assert_eq!(rows[0].check_percent, "50%");
    assert_eq!(rows[0].amount, dec!(150.00));
    assert_eq!(rows[0].products.len(), 1);
    assert_eq!(rows[0].products[0].item_code, "0000000001");
    assert_eq!(rows[0].tag_price, vec![dec!(150.00)]);
    assert_eq!(rows[0].final_price, vec![dec!(150.00)]);
    // The refund invoice consumed the slot after the sale invoice.
    assert_eq!(rows[0].invoice_no, "HO00000002");
}

#[tokio::test]
async fn hold_invoices_sell_nothing_and_expire() {
    let app = spawn_app().await;
    seed_stock(&app, 1).await;

    let mut request = sale_of(&["0000000001"]);
    request.is_hold = true;
    let held = app
        .state
        .services
        .invoices
        .create_sale(request, None)
        .await
        .expect("hold invoice");
    assert!(held.is_hold);

    let unsold = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000001"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(unsold.selling_status, SellingStatus::Unsold);

    // Fresh hold invoices survive a purge.
    let purged = app
        .state
        .services
        .invoices
        .purge_expired_hold_invoices(72)
        .await
        .expect("purge");
    assert_eq!(purged, 0);

    // Backdate an expired hold invoice and purge again.
    let target = common::seed_head_office_invoice(&app, Utc::now() - Duration::hours(100)).await;
    let purged = app
        .state
        .services
        .invoices
        .purge_expired_hold_invoices(72)
        .await
        .expect("purge expired");
    assert_eq!(purged, 1);
    let gone = invoice::Entity::find_by_id(target)
        .one(app.state.db.as_ref())
        .await
        .expect("query");
    assert!(gone.is_none());
}

#[tokio::test]
async fn invoice_codes_do_not_repeat_after_hold_purge() {
    let app = spawn_app().await;
    seed_stock(&app, 3).await;

    let first = app
        .state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001"]), None)
        .await
        .expect("first sale");
    assert_eq!(first.showroom_invoice_code, "HO00000001");

    // An expired hold invoice takes the second slot, then gets purged.
    common::seed_head_office_invoice(&app, Utc::now() - Duration::hours(100)).await;

    let second = app
        .state
        .services
        .invoices
        .create_sale(sale_of(&["0000000002"]), None)
        .await
        .expect("second sale");
    assert_eq!(second.showroom_invoice_code, "HO00000003");

    let purged = app
        .state
        .services
        .invoices
        .purge_expired_hold_invoices(72)
        .await
        .expect("purge");
    assert_eq!(purged, 1);

    // The purged slot stays retired; the sequence keeps counting up.
    let third = app
        .state
        .services
        .invoices
        .create_sale(sale_of(&["0000000003"]), None)
        .await
        .expect("third sale");
    assert_eq!(third.showroom_invoice_code, "HO00000004");

    let mut codes: Vec<String> = invoice::Entity::find()
        .all(app.state.db.as_ref())
        .await
        .expect("query invoices")
        .into_iter()
        .map(|row| row.showroom_invoice_code)
        .collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 3);
}

#[tokio::test]
async fn discounted_prices_lower_the_net_amount() {
    let app = spawn_app().await;
    seed_stock(&app, 1).await;

    let mut request = sale_of(&["0000000001"]);
    request.discounted_prices = Some(vec![dec!(130)]);
    request.cash = dec!(130);
    let created = app
        .state
        .services
        .invoices
        .create_sale(request, None)
        .await
        .expect("sale");
    assert_eq!(created.invoice_amount, dec!(150.00));
    assert_eq!(created.net_amount, dec!(130.00));

    let sold = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000001"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(sold.sell_price_after_discount, dec!(130.00));
}

#[tokio::test]
async fn missing_head_office_fails_the_sale() {
    let app = spawn_app().await;

    let result = app
        .state
        .services
        .invoices
        .create_sale(sale_of(&["0000000001"]), None)
        .await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}
