use {
    super::error::StoreError,
    super::id::MerchantRef,
    super::money::Amount,
    super::order::OrderStatus,
    std::{future::Future, pin::Pin},
};

/// What we send the provider when opening a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub merchant_ref: MerchantRef,
    pub amount: Amount,
    pub customer_name: String,
    pub customer_email: String,
    pub payment_method: String,
    pub item_name: String,
}

/// What the provider hands back for a freshly created transaction.
#[derive(Debug, Clone)]
pub struct CreatedTransaction {
    pub reference: String,
    pub checkout_url: String,
    pub qr_url: Option<String>,
}

/// Current provider-side view of a transaction.
#[derive(Debug, Clone)]
pub struct FetchedTransaction {
    pub reference: String,
    pub status: OrderStatus,
    pub amount: Amount,
}

pub trait PaymentGateway: Send + Sync {
    fn create_transaction(
        &self,
        req: &NewTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedTransaction, StoreError>> + Send + '_>>;

    fn fetch_transaction(
        &self,
        reference: &str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedTransaction, StoreError>> + Send + '_>>;
}
