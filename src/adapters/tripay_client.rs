use {
    crate::{
        config::Config,
        domain::{
            error::StoreError,
            gateway::{CreatedTransaction, FetchedTransaction, NewTransaction, PaymentGateway},
            money::Amount,
            order::OrderStatus,
        },
        signature,
    },
    serde::Deserialize,
    std::{future::Future, pin::Pin},
};

/// Tripay REST client. One instance per process, shared through `AppState`.
pub struct TripayClient {
    http: reqwest::Client,
    api_key: String,
    merchant_code: String,
    private_key: String,
    base_url: String,
    callback_url: String,
    return_url: String,
    expiry_secs: i64,
}

impl TripayClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(config.http_timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_key: config.tripay.api_key.clone(),
            merchant_code: config.tripay.merchant_code.clone(),
            private_key: config.tripay.private_key.clone(),
            base_url: config.tripay.base_url.trim_end_matches('/').to_string(),
            callback_url: config.tripay.callback_url.clone(),
            return_url: config.frontend_url.clone(),
            expiry_secs: config.order_expiry_hours as i64 * 3600,
        }
    }

    async fn create_inner(&self, req: &NewTransaction) -> Result<CreatedTransaction, StoreError> {
        let signature = signature::sign_transaction(
            &self.private_key,
            &self.merchant_code,
            req.merchant_ref.as_str(),
            req.amount.value(),
        );
        let expired_time = chrono::Utc::now().timestamp() + self.expiry_secs;

        let body = serde_json::json!({
            "method": req.payment_method,
            "merchant_ref": req.merchant_ref.as_str(),
            "amount": req.amount.value(),
            "customer_name": req.customer_name,
            "customer_email": req.customer_email,
            "order_items": [{
                "name": req.item_name,
                "price": req.amount.value(),
                "quantity": 1,
            }],
            "callback_url": self.callback_url,
            "return_url": self.return_url,
            "expired_time": expired_time,
            "signature": signature,
        });

        let response = self
            .http
            .post(format!("{}/transaction/create", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Gateway(format!("transaction/create request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Gateway(format!(
                "transaction/create returned {status}: {text}"
            )));
        }

        let envelope: Envelope<CreateData> = response
            .json()
            .await
            .map_err(|e| StoreError::Gateway(format!("transaction/create decode: {e}")))?;
        let data = envelope.into_data("transaction/create")?;

        Ok(CreatedTransaction {
            reference: data.reference,
            checkout_url: data.checkout_url,
            qr_url: data.qr_url,
        })
    }

    async fn fetch_inner(&self, reference: &str) -> Result<FetchedTransaction, StoreError> {
        let response = self
            .http
            .get(format!("{}/transaction/detail", self.base_url))
            .query(&[("reference", reference)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Gateway(format!("transaction/detail request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Gateway(format!(
                "transaction/detail returned {status}: {text}"
            )));
        }

        let envelope: Envelope<DetailData> = response
            .json()
            .await
            .map_err(|e| StoreError::Gateway(format!("transaction/detail decode: {e}")))?;
        let data = envelope.into_data("transaction/detail")?;

        Ok(FetchedTransaction {
            reference: data.reference,
            status: OrderStatus::from_wire(&data.status)?,
            amount: Amount::new(data.amount)?,
        })
    }
}

impl PaymentGateway for TripayClient {
    fn create_transaction(
        &self,
        req: &NewTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedTransaction, StoreError>> + Send + '_>> {
        let req = req.clone();
        Box::pin(async move { self.create_inner(&req).await })
    }

    fn fetch_transaction(
        &self,
        reference: &str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedTransaction, StoreError>> + Send + '_>> {
        let reference = reference.to_string();
        Box::pin(async move { self.fetch_inner(&reference).await })
    }
}

/// Every Tripay response wraps its payload in `{success, message, data}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self, endpoint: &str) -> Result<T, StoreError> {
        if !self.success {
            return Err(StoreError::Gateway(format!(
                "{endpoint} rejected: {}",
                self.message.unwrap_or_else(|| "no message".into())
            )));
        }
        self.data
            .ok_or_else(|| StoreError::Gateway(format!("{endpoint} returned no data")))
    }
}

#[derive(Debug, Deserialize)]
struct CreateData {
    reference: String,
    checkout_url: String,
    qr_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    reference: String,
    status: String,
    amount: i64,
}
