#![allow(dead_code)]

use seat_checkout::AppState;
use seat_checkout::config::Config;
use seat_checkout::domain::error::StoreError;
use seat_checkout::domain::gateway::{
    CreatedTransaction, FetchedTransaction, NewTransaction, PaymentGateway,
};
use seat_checkout::domain::id::MerchantRef;
use seat_checkout::domain::money::Amount;
use seat_checkout::domain::order::{NewOrderParams, Order, OrderStatus};
use seat_checkout::infra::memory::OrderStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::{future::Future, pin::Pin};

/// Shared private key for signing test callbacks — must match what
/// `test_config` puts into `TRIPAY_PRIVATE_KEY`.
pub const PRIVATE_KEY: &str = "test-private-key";

pub fn test_config() -> Config {
    let vars: HashMap<String, String> = [
        ("APP_ENV", "testing"),
        ("SECRET_KEY", "test-secret"),
        ("DATABASE_URL", "postgres://unused"),
        ("TRIPAY_API_KEY", "test-api-key"),
        ("TRIPAY_MERCHANT_CODE", "T0001"),
        ("TRIPAY_PRIVATE_KEY", PRIVATE_KEY),
        ("TRIPAY_CALLBACK_URL", "http://localhost:3000/callback/tripay"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    Config::from_map(&vars).expect("test config must assemble")
}

/// Gateway double: every create succeeds with a deterministic reference and
/// checkout URL, no network involved. `fetch_transaction` answers with
/// whatever status the test configured.
pub struct MockGateway {
    counter: AtomicU64,
    fetch_status: OrderStatus,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::reporting(OrderStatus::Pending)
    }

    /// A gateway whose provider-side view reports `status` for every
    /// transaction.
    pub fn reporting(status: OrderStatus) -> Self {
        Self {
            counter: AtomicU64::new(0),
            fetch_status: status,
        }
    }
}

impl PaymentGateway for MockGateway {
    fn create_transaction(
        &self,
        req: &NewTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedTransaction, StoreError>> + Send + '_>> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let merchant_ref = req.merchant_ref.clone();
        Box::pin(async move {
            Ok(CreatedTransaction {
                reference: format!("T0001{n:06}"),
                checkout_url: format!("https://tripay.co.id/checkout/T0001{n:06}"),
                qr_url: Some(format!("https://tripay.co.id/qr/{merchant_ref}")),
            })
        })
    }

    fn fetch_transaction(
        &self,
        reference: &str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedTransaction, StoreError>> + Send + '_>> {
        let reference = reference.to_string();
        let status = self.fetch_status;
        Box::pin(async move {
            Ok(FetchedTransaction {
                reference,
                status,
                amount: Amount::from_idr(25_000),
            })
        })
    }
}

pub fn test_state() -> AppState {
    test_state_with(Arc::new(MockGateway::new()))
}

pub fn test_state_with(gateway: Arc<dyn PaymentGateway>) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        store: OrderStore::new(),
        gateway,
    }
}

/// Seed a pending order directly, bypassing the HTTP layer.
pub async fn seed_order(store: &OrderStore, merchant_ref: &str, amount: i64) -> Order {
    seed_order_at(store, merchant_ref, amount, chrono::Utc::now()).await
}

pub async fn seed_order_at(
    store: &OrderStore,
    merchant_ref: &str,
    amount: i64,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Order {
    let order = Order::new(NewOrderParams {
        merchant_ref: MerchantRef::new(merchant_ref).unwrap(),
        package_id: "chatgpt_plus_1_month".into(),
        customer_email: "buyer@example.com".into(),
        customer_name: "Buyer".into(),
        phone_number: None,
        amount: Amount::new(amount).unwrap(),
        gateway_reference: format!("T-{merchant_ref}"),
        checkout_url: format!("https://tripay.co.id/checkout/{merchant_ref}"),
        qr_url: None,
        created_at,
    });
    store.insert(order.clone()).await.unwrap();
    order
}

pub fn callback_body(merchant_ref: &str, status: &str, amount: i64) -> String {
    serde_json::json!({
        "reference": format!("T-{merchant_ref}"),
        "merchant_ref": merchant_ref,
        "status": status,
        "total_amount": amount,
    })
    .to_string()
}

/// Signed POST to the callback route.
pub fn callback_request(
    path: &str,
    body: &str,
    sig: &str,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .header("X-Callback-Event", "payment_status")
        .header("X-Callback-Signature", sig)
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
