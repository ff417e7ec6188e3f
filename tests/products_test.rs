mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use retail_pos_api::entities::product::SellingStatus;
use retail_pos_api::entities::{product, purchase, transfer_product_item};
use retail_pos_api::errors::ServiceError;
use retail_pos_api::services::products::{
    NewProductGroup, NewTaglessProduct, ProductPriceUpdate, TransferRequest, UpdateProduct,
};

use common::{product_line, seed_group, seed_head_office, seed_showroom, spawn_app};

#[tokio::test]
async fn batch_creation_yields_sequential_codes_and_one_purchase() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;

    let created = app
        .state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 3)])
        .await
        .expect("create batch");

    let codes: Vec<_> = created.iter().map(|p| p.item_code.as_str()).collect();
    assert_eq!(codes, vec!["0000000001", "0000000002", "0000000003"]);

    let purchases = purchase::Entity::find()
        .all(app.state.db.as_ref())
        .await
        .expect("load purchases");
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].quantity, 3);
    assert_eq!(purchases[0].purchase_amount, dec!(300.00));

    // A second batch continues the global sequence.
    let next = app
        .state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 1)])
        .await
        .expect("create second batch");
    assert_eq!(next[0].item_code, "0000000004");
}

#[tokio::test]
async fn explicit_base_code_starts_the_sequence() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;

    let mut line = product_line("Denim Jacket", "Head Office", 3);
    line.item_code = Some("0000000100".to_string());
    let created = app
        .state
        .services
        .products
        .create_products(vec![line])
        .await
        .expect("create batch");

    let codes: Vec<_> = created.iter().map(|p| p.item_code.as_str()).collect();
    assert_eq!(codes, vec!["0000000100", "0000000101", "0000000102"]);
}

#[tokio::test]
async fn non_numeric_base_code_is_rejected() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;

    let mut line = product_line("Denim Jacket", "Head Office", 1);
    line.item_code = Some("ABC123".to_string());
    let result = app.state.services.products.create_products(vec![line]).await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn reusing_an_existing_base_code_is_rejected() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;
    app.state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 3)])
        .await
        .expect("create batch");

    // The base overlaps code 0000000002 from the first batch.
    let mut line = product_line("Denim Jacket", "Head Office", 1);
    line.item_code = Some("0000000002".to_string());
    let result = app.state.services.products.create_products(vec![line]).await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));

    let count = product::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .expect("count products");
    assert_eq!(count, 3);
}

#[tokio::test]
async fn unknown_showroom_aborts_the_batch() {
    let app = spawn_app().await;
    seed_group(&app, "Denim Jacket").await;

    let result = app
        .state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "No Such Showroom", 2)])
        .await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));

    let products = product::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .expect("count products");
    assert_eq!(products, 0);
    let purchases = purchase::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .expect("count purchases");
    assert_eq!(purchases, 0);
}

#[tokio::test]
async fn margin_figures_are_persisted_rounded() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;

    let created = app
        .state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 1)])
        .await
        .expect("create batch");

    assert_eq!(created[0].gross_profit, dec!(50.00));
    assert_eq!(created[0].gross_margin, dec!(33.33));
    assert_eq!(created[0].sell_price_after_discount, dec!(150.00));
    assert_eq!(created[0].selling_status, SellingStatus::Unsold);
    assert!(!created[0].return_status);
}

#[tokio::test]
async fn unknown_group_aborts_the_whole_batch() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;

    let result = app
        .state
        .services
        .products
        .create_products(vec![
            product_line("Denim Jacket", "Head Office", 2),
            product_line("No Such Group", "Head Office", 1),
        ])
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));

    let count = product::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .expect("count products");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn import_is_all_or_nothing() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;

    let mut bad = product_line("Denim Jacket", "Head Office", 1);
    bad.quantity = 0;
    let result = app
        .state
        .services
        .products
        .import_products(vec![product_line("Denim Jacket", "Head Office", 2), bad])
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));

    let count = product::Entity::find()
        .count(app.state.db.as_ref())
        .await
        .expect("count products");
    assert_eq!(count, 0);

    let imported = app
        .state
        .services
        .products
        .import_products(vec![product_line("Denim Jacket", "Head Office", 2)])
        .await
        .expect("import valid rows");
    assert_eq!(imported, 2);
}

#[tokio::test]
async fn group_import_rejects_invalid_rows_up_front() {
    let app = spawn_app().await;

    let rows = vec![
        NewProductGroup {
            product_code: "PG01".to_string(),
            product_name: "Denim Jacket".to_string(),
            product_category: "Apparel".to_string(),
        },
        NewProductGroup {
            product_code: "PG02".to_string(),
            product_name: String::new(),
            product_category: "Apparel".to_string(),
        },
    ];
    let result = app.state.services.products.import_groups(rows).await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));

    let groups = app
        .state
        .services
        .products
        .list_groups()
        .await
        .expect("list groups");
    assert!(groups.is_empty());
}

#[tokio::test]
async fn tagless_code_uses_showroom_prefix() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    let outlet = seed_showroom(&app, "GB", "Gulshan Branch").await;
    seed_group(&app, "Denim Jacket").await;

    let first = app
        .state
        .services
        .products
        .create_tagless(NewTaglessProduct {
            product_group: "Denim Jacket".to_string(),
            showroom_name: outlet.showroom_name.clone(),
            sell_price: dec!(120),
            size: None,
        })
        .await
        .expect("create tagless");
    assert_eq!(first.item_code, "GB00000001");
    assert!(first.tagless);

    let second = app
        .state
        .services
        .products
        .create_tagless(NewTaglessProduct {
            product_group: "Denim Jacket".to_string(),
            showroom_name: outlet.showroom_name,
            sell_price: dec!(90),
            size: None,
        })
        .await
        .expect("create second tagless");
    assert_eq!(second.item_code, "GB00000002");
}

#[tokio::test]
async fn bulk_update_reprices_and_rederives_margins() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;
    app.state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 2)])
        .await
        .expect("create batch");

    let updated = app
        .state
        .services
        .products
        .bulk_update(vec![ProductPriceUpdate {
            item_code: "0000000001".to_string(),
            unit_cost: None,
            sell_price: Some(dec!(200)),
            sell_price_after_discount: Some(dec!(180)),
        }])
        .await
        .expect("bulk update");
    assert_eq!(updated, 1);

    let reloaded = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000001"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(reloaded.sell_price, dec!(200.00));
    assert_eq!(reloaded.sell_price_after_discount, dec!(180.00));
    assert_eq!(reloaded.gross_profit, dec!(100.00));
    assert_eq!(reloaded.gross_margin, dec!(50.00));
}

#[tokio::test]
async fn bulk_update_with_missing_code_changes_nothing() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;
    app.state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 1)])
        .await
        .expect("create batch");

    let result = app
        .state
        .services
        .products
        .bulk_update(vec![
            ProductPriceUpdate {
                item_code: "0000000001".to_string(),
                unit_cost: None,
                sell_price: Some(dec!(999)),
                sell_price_after_discount: None,
            },
            ProductPriceUpdate {
                item_code: "9999999999".to_string(),
                unit_cost: None,
                sell_price: Some(dec!(1)),
                sell_price_after_discount: None,
            },
        ])
        .await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));

    let reloaded = product::Entity::find()
        .filter(product::Column::ItemCode.eq("0000000001"))
        .one(app.state.db.as_ref())
        .await
        .expect("query")
        .expect("product exists");
    assert_eq!(reloaded.sell_price, dec!(150.00));
}

#[tokio::test]
async fn transfer_moves_products_and_records_audit() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_showroom(&app, "GB", "Gulshan Branch").await;
    seed_group(&app, "Denim Jacket").await;
    app.state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 2)])
        .await
        .expect("create batch");

    let record = app
        .state
        .services
        .products
        .transfer_products(TransferRequest {
            item_codes: vec!["0000000001".to_string(), "0000000002".to_string()],
            prev_location: "Head Office".to_string(),
            current_location: "Gulshan Branch".to_string(),
        })
        .await
        .expect("transfer");
    assert_eq!(record.product_count, 2);
    assert_eq!(record.prev_location, "Head Office");
    assert_eq!(record.current_location, "Gulshan Branch");

    let moved = app
        .state
        .services
        .products
        .list_by_showroom("Gulshan Branch")
        .await
        .expect("list destination");
    assert_eq!(moved.len(), 2);

    let items = transfer_product_item::Entity::find()
        .filter(transfer_product_item::Column::TransferId.eq(record.id))
        .count(app.state.db.as_ref())
        .await
        .expect("count items");
    assert_eq!(items, 2);
}

#[tokio::test]
async fn transfer_with_unknown_code_moves_nothing() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_showroom(&app, "GB", "Gulshan Branch").await;
    seed_group(&app, "Denim Jacket").await;
    app.state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 1)])
        .await
        .expect("create batch");

    let result = app
        .state
        .services
        .products
        .transfer_products(TransferRequest {
            item_codes: vec!["0000000001".to_string(), "9999999999".to_string()],
            prev_location: "Head Office".to_string(),
            current_location: "Gulshan Branch".to_string(),
        })
        .await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));

    let still_home = app
        .state
        .services
        .products
        .list_by_showroom("Head Office")
        .await
        .expect("list source");
    assert_eq!(still_home.len(), 1);
}

#[tokio::test]
async fn duplicate_group_name_is_rejected() {
    let app = spawn_app().await;
    seed_group(&app, "Denim Jacket").await;

    let result = app
        .state
        .services
        .products
        .create_group(NewProductGroup {
            product_code: "PG09".to_string(),
            product_name: "Denim Jacket".to_string(),
            product_category: "Apparel".to_string(),
        })
        .await;
    assert_matches!(result, Err(ServiceError::Conflict(_)));
}

#[tokio::test]
async fn editing_keeps_margins_consistent() {
    let app = spawn_app().await;
    seed_head_office(&app).await;
    seed_group(&app, "Denim Jacket").await;
    let created = app
        .state
        .services
        .products
        .create_products(vec![product_line("Denim Jacket", "Head Office", 1)])
        .await
        .expect("create batch");

    let updated = app
        .state
        .services
        .products
        .update_product(
            created[0].id,
            UpdateProduct {
                product_group: None,
                supplier_name: None,
                lot_number: None,
                size: Some("XL".to_string()),
                unit_cost: Some(dec!(120)),
                sell_price: None,
                sell_price_after_discount: None,
            },
        )
        .await
        .expect("update product");
    assert_eq!(updated.size.as_deref(), Some("XL"));
    assert_eq!(updated.gross_profit, dec!(30.00));
    assert_eq!(updated.gross_margin, dec!(20.00));
}
