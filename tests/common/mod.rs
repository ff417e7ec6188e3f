use std::sync::Arc;

use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Database, Set};
use tempfile::TempDir;
use uuid::Uuid;

use retail_pos_api::config::AppConfig;
use retail_pos_api::entities::{employee, invoice, showroom};
use sea_orm::EntityTrait;
use retail_pos_api::events::{channel, process_events};
use retail_pos_api::migrator::Migrator;
use retail_pos_api::services::products::{NewProductGroup, NewProductLine};
use retail_pos_api::services::showrooms::NewShowroom;
use retail_pos_api::AppState;
use sea_orm_migration::MigratorTrait;

/// A fully migrated application over a throwaway SQLite database. The
/// directory guard must stay alive for the duration of the test.
pub struct TestApp {
    pub state: AppState,
    _dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!(
        "sqlite://{}/test.db?mode=rwc",
        dir.path().to_str().expect("utf-8 temp path")
    );

    let db = Database::connect(&url).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    let (event_sender, event_receiver) = channel(64);
    tokio::spawn(process_events(event_receiver));

    let config = AppConfig::new(url, "test-secret".to_string(), 0, "test".to_string());
    let state = AppState::new(Arc::new(db), config, event_sender);
    TestApp { state, _dir: dir }
}

pub async fn seed_head_office(app: &TestApp) -> showroom::Model {
    app.state
        .services
        .showrooms
        .create_showroom(NewShowroom {
            showroom_code: "HO".to_string(),
            showroom_name: "Head Office".to_string(),
            showroom_address: "1 Main Road".to_string(),
            showroom_mobile: None,
        })
        .await
        .expect("seed head office")
}

pub async fn seed_showroom(app: &TestApp, code: &str, name: &str) -> showroom::Model {
    app.state
        .services
        .showrooms
        .create_showroom(NewShowroom {
            showroom_code: code.to_string(),
            showroom_name: name.to_string(),
            showroom_address: "2 Outlet Road".to_string(),
            showroom_mobile: None,
        })
        .await
        .expect("seed showroom")
}

pub async fn seed_group(app: &TestApp, name: &str) -> retail_pos_api::entities::product_group::Model {
    app.state
        .services
        .products
        .create_group(NewProductGroup {
            product_code: "PG01".to_string(),
            product_name: name.to_string(),
            product_category: "Apparel".to_string(),
        })
        .await
        .expect("seed product group")
}

pub async fn seed_employee(app: &TestApp, name: &str) -> employee::Model {
    employee::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_name: Set(name.to_string()),
        sale_count: Set(0),
        sale_amount: Set(dec!(0)),
        return_sale_count: Set(0),
        return_sale_amount: Set(dec!(0)),
        ..Default::default()
    }
    .insert(app.state.db.as_ref())
    .await
    .expect("seed employee")
}

/// Inserts a hold invoice with an explicit creation time, for purge tests.
pub async fn seed_head_office_invoice(
    app: &TestApp,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Uuid {
    let head_office = showroom::Entity::find()
        .one(app.state.db.as_ref())
        .await
        .expect("query showrooms")
        .expect("head office seeded");
    let code = retail_pos_api::services::showrooms::next_invoice_code(
        app.state.db.as_ref(),
        &head_office,
    )
    .await
    .expect("next invoice code");
    let id = Uuid::new_v4();
    invoice::ActiveModel {
        id: Set(id),
        showroom_invoice_code: Set(code),
        invoice_amount: Set(dec!(0)),
        net_amount: Set(dec!(0)),
        cash: Set(dec!(0)),
        bkash: Set(dec!(0)),
        cbl: Set(dec!(0)),
        showroom_id: Set(head_office.id),
        showroom_name: Set(head_office.showroom_name),
        quantity: Set(0),
        is_hold: Set(true),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(app.state.db.as_ref())
    .await
    .expect("seed hold invoice");
    id
}

pub fn product_line(group: &str, showroom_name: &str, quantity: u32) -> NewProductLine {
    NewProductLine {
        item_code: None,
        product_group: group.to_string(),
        showroom_name: showroom_name.to_string(),
        supplier_name: Some("Acme Textiles".to_string()),
        lot_number: Some("LOT-7".to_string()),
        size: Some("L".to_string()),
        unit_cost: dec!(100),
        sell_price: dec!(150),
        quantity,
        invoice_date: None,
        delivery_date: None,
        challan_number: None,
        invoice_number: Some("INV-100".to_string()),
        invoice_total_price: None,
        total_item: None,
        transportation_cost: None,
        purchase_name: None,
    }
}
