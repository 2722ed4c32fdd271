use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("callback signature: {0}")]
    Signature(String),

    #[error("payment gateway: {0}")]
    Gateway(String),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("order not found: {0}")]
    OrderNotFound(String),
}
