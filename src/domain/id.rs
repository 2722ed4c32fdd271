use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;

/// Merchant-side order reference (`ORD-xxxx…`). This is the key the payment
/// provider echoes back in callbacks, so it must never be empty or
/// unprefixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantRef(String);

impl MerchantRef {
    pub fn new(id: impl Into<String>) -> Result<Self, StoreError> {
        let id = id.into();
        if !id.starts_with("ORD-") || id.len() <= 4 {
            return Err(StoreError::Validation(format!(
                "MerchantRef must start with ORD-, got: {id}"
            )));
        }
        Ok(Self(id))
    }

    /// Mint a fresh reference. v7 uuids keep refs roughly time-ordered,
    /// which makes provider dashboards and logs easier to scan.
    pub fn generate() -> Self {
        Self(format!("ORD-{}", Uuid::now_v7().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
