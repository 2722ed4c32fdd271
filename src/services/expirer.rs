use {
    crate::domain::error::StoreError,
    crate::domain::order::{OrderStatus, ProcessResult},
    crate::infra::memory::OrderStore,
    crate::services::order_pipeline,
    chrono::{Duration, Utc},
    tokio::sync::watch,
};

/// Periodically move pending orders past their payment window to Expired.
/// The provider expires its side too; this keeps our view from trusting a
/// checkout URL that no longer works.
pub async fn run_expirer(store: OrderStore, max_age: Duration, mut shutdown: watch::Receiver<bool>) {
    tracing::info!("order expirer started");

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("order expirer shutting down");
                return;
            }
            _ = tokio::time::sleep(std::time::Duration::from_secs(60)) => {}
        }

        match expire_once(&store, max_age).await {
            Ok(0) => {}
            Ok(n) => tracing::info!(count = n, "expired stale orders"),
            Err(e) => tracing::error!(error = %e, "expirer error"),
        }
    }
}

/// One sweep. Expiry goes through the same transition table as callbacks,
/// so an order that got paid between the scan and the apply stays paid.
pub async fn expire_once(store: &OrderStore, max_age: Duration) -> Result<usize, StoreError> {
    let cutoff = Utc::now() - max_age;
    let refs = store.pending_created_before(cutoff).await;

    let mut expired = 0;
    for merchant_ref in refs {
        match order_pipeline::apply_status(store, &merchant_ref, OrderStatus::Expired, "expirer")
            .await
        {
            Ok(ProcessResult::Updated(_)) => expired += 1,
            Ok(_) => {}
            Err(StoreError::OrderNotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(expired)
}
