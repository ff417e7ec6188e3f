//! HTTP handlers. Thin wrappers that deserialize, call a service and wrap
//! the result in the response envelope.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::auth_middleware;
use crate::AppState;

pub mod invoices;
pub mod products;
pub mod returns;
pub mod showrooms;
pub mod users;

/// All v1 routes. Everything except login and registration requires a
/// valid token.
pub fn api_v1_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/users/login", post(users::login))
        .route("/users/register", post(users::register));

    let protected = Router::new()
        .route("/users", get(users::list))
        .route("/users/logout", post(users::logout))
        .route("/users/:id", put(users::update))
        .route("/users/:id", delete(users::remove))
        .route("/showrooms", post(showrooms::create).get(showrooms::list))
        .route(
            "/product-groups",
            post(products::create_group).get(products::list_groups),
        )
        .route("/product-groups/import", post(products::import_groups))
        .route("/products", post(products::create).get(products::list))
        .route("/products/tagless", post(products::create_tagless))
        .route("/products/import", post(products::import))
        .route("/products/bulk", put(products::bulk_update))
        .route("/products/transfer", post(products::transfer))
        .route("/products/transfers", get(products::list_transfers))
        .route("/products/by-showroom", get(products::list_by_showroom))
        .route("/products/:id", put(products::update))
        .route("/invoices", post(invoices::create_sale).get(invoices::list))
        .route("/invoices/:id", get(invoices::get))
        .route("/returns", post(returns::create).get(returns::list))
        .route("/returns/report", get(returns::report))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
