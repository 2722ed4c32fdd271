use {
    crate::domain::{
        error::StoreError,
        order::{Order, OrderStatus},
    },
    chrono::{DateTime, Utc},
    std::{collections::HashMap, sync::Arc},
    tokio::sync::RwLock,
    uuid::Uuid,
};

/// In-process order store. Durable persistence is out of scope for this
/// service; what matters here is that the write lock serializes concurrent
/// callback deliveries for the same merchant ref, so the status state
/// machine always sees a consistent current value.
#[derive(Clone, Default)]
pub struct OrderStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    by_ref: HashMap<String, Order>,
    id_index: HashMap<Uuid, String>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let merchant_ref = order.merchant_ref().as_str().to_string();
        if inner.by_ref.contains_key(&merchant_ref) {
            return Err(StoreError::Validation(format!(
                "duplicate merchant_ref: {merchant_ref}"
            )));
        }
        inner.id_index.insert(order.id(), merchant_ref.clone());
        inner.by_ref.insert(merchant_ref, order);
        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Option<Order> {
        let inner = self.inner.read().await;
        let merchant_ref = inner.id_index.get(&id)?;
        inner.by_ref.get(merchant_ref).cloned()
    }

    pub async fn get_by_ref(&self, merchant_ref: &str) -> Option<Order> {
        self.inner.read().await.by_ref.get(merchant_ref).cloned()
    }

    /// Read-modify-write under the write lock. The closure sees the live
    /// order; whatever it returns comes back to the caller atomically.
    pub async fn update<F, T>(&self, merchant_ref: &str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Order) -> T,
    {
        let mut inner = self.inner.write().await;
        match inner.by_ref.get_mut(merchant_ref) {
            Some(order) => Ok(f(order)),
            None => Err(StoreError::OrderNotFound(merchant_ref.to_string())),
        }
    }

    /// Merchant refs of pending orders created before `cutoff`.
    pub async fn pending_created_before(&self, cutoff: DateTime<Utc>) -> Vec<String> {
        self.inner
            .read()
            .await
            .by_ref
            .values()
            .filter(|o| o.status() == OrderStatus::Pending && o.created_at() < cutoff)
            .map(|o| o.merchant_ref().as_str().to_string())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_ref.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
