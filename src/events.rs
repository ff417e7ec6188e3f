use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Events emitted by the domain services. Delivery is best-effort; business
/// transactions never fail because an event could not be sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ProductGroupCreated(Uuid),
    ProductBatchCreated {
        purchase_id: Uuid,
        quantity: u32,
    },
    ProductsImported {
        count: u64,
    },
    ProductsBulkUpdated {
        count: u64,
    },
    ProductsTransferred {
        transfer_id: Uuid,
        count: u32,
    },
    SaleCompleted {
        invoice_id: Uuid,
    },
    ReturnProcessed {
        return_id: Uuid,
        exchanged: bool,
    },
    HoldInvoicesPurged {
        count: u64,
    },
    UserCreated(Uuid),
    UserLoggedIn(Uuid),
    UserDeleted(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Fire-and-forget variant used inside request handling paths.
    pub async fn send_best_effort(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            tracing::warn!("event dropped: {}", e);
        }
    }
}

/// Consumes events and logs them. A deployment could fan these out to SMS
/// or barcode-printer integrations.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(?event, "domain event");
    }
}

/// Convenience constructor used by main and tests.
pub fn channel(buffer: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(buffer);
    (EventSender::new(tx), rx)
}
