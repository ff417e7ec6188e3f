use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::events::EventSender;

pub mod invoices;
pub mod products;
pub mod returns;
pub mod showrooms;
pub mod users;

pub use invoices::InvoiceService;
pub use products::ProductService;
pub use returns::ReturnService;
pub use showrooms::ShowroomService;
pub use users::UserService;

/// All service instances, shared by handlers through `AppState`.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub showrooms: ShowroomService,
    pub products: ProductService,
    pub invoices: InvoiceService,
    pub returns: ReturnService,
    pub users: UserService,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, config: &AppConfig, event_sender: EventSender) -> Self {
        let auth = AuthService::new(&config.jwt_secret, config.jwt_expiration);
        let showrooms = ShowroomService::new(db.clone());
        let products = ProductService::new(db.clone(), event_sender.clone());
        let invoices = InvoiceService::new(db.clone(), event_sender.clone());
        let returns = ReturnService::new(db.clone(), event_sender.clone());
        let users = UserService::new(db, auth.clone(), event_sender);
        Self {
            auth,
            showrooms,
            products,
            invoices,
            returns,
            users,
        }
    }
}

/// Zero pads a sequence number, e.g. `pad_sequence(42, 10)` is `"0000000042"`.
pub(crate) fn pad_sequence(value: u64, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}
