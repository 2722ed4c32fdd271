use {
    crate::config::Config,
    crate::domain::error::StoreError,
    crate::domain::gateway::{NewTransaction, PaymentGateway},
    crate::domain::id::MerchantRef,
    crate::domain::order::{CallbackAction, NewOrderParams, Order, OrderStatus, ProcessResult},
    crate::infra::memory::OrderStore,
    chrono::Utc,
    uuid::Uuid,
};

pub struct CreateOrderInput {
    pub package_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub phone_number: Option<String>,
    pub payment_method: Option<String>,
}

/// Open a transaction with the provider and record the pending order.
///
/// The price comes from the catalog, never from the client. A gateway
/// failure surfaces to the caller before anything is stored — there is no
/// half-created order to clean up.
pub async fn create_order(
    store: &OrderStore,
    gateway: &dyn PaymentGateway,
    config: &Config,
    input: CreateOrderInput,
) -> Result<Order, StoreError> {
    let package = config
        .package(&input.package_id)
        .ok_or_else(|| StoreError::Validation(format!("unknown package_id: {}", input.package_id)))?;

    let email = input.customer_email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(StoreError::Validation(
            "customer_email is not a valid email address".into(),
        ));
    }

    let merchant_ref = MerchantRef::generate();
    let request = NewTransaction {
        merchant_ref: merchant_ref.clone(),
        amount: package.price,
        customer_name: input.customer_name.trim().to_string(),
        customer_email: email.to_string(),
        payment_method: input
            .payment_method
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "QRIS".to_string()),
        item_name: package.name.to_string(),
    };

    let created = gateway.create_transaction(&request).await?;

    let order = Order::new(NewOrderParams {
        merchant_ref,
        package_id: package.id.to_string(),
        customer_email: request.customer_email,
        customer_name: request.customer_name,
        phone_number: input.phone_number,
        amount: package.price,
        gateway_reference: created.reference,
        checkout_url: created.checkout_url,
        qr_url: created.qr_url,
        created_at: Utc::now(),
    });

    store.insert(order.clone()).await?;
    tracing::info!(
        order_id = %order.id(),
        merchant_ref = %order.merchant_ref(),
        package = %order.package_id(),
        "order created"
    );
    Ok(order)
}

/// Apply one incoming status to the order behind `merchant_ref`.
///
/// Runs entirely under the store's write lock, so concurrent deliveries of
/// the same notification serialize: one advances, the rest observe the new
/// status and come back `Stale`. Replays are no-ops.
pub async fn apply_status(
    store: &OrderStore,
    merchant_ref: &str,
    incoming: OrderStatus,
    actor: &str,
) -> Result<ProcessResult, StoreError> {
    let actor = actor.to_string();
    store
        .update(merchant_ref, move |order| {
            let id = order.id();
            match order.decide(incoming) {
                CallbackAction::SameStatus => ProcessResult::Stale(id),
                CallbackAction::Advance { old_status } => {
                    order.apply(incoming, Utc::now());
                    tracing::info!(
                        order_id = %id,
                        from = %old_status,
                        to = %incoming,
                        actor = %actor,
                        "order status advanced"
                    );
                    ProcessResult::Updated(id)
                }
                CallbackAction::Anomaly { current } => {
                    tracing::warn!(
                        order_id = %id,
                        from = %current,
                        to = %incoming,
                        actor = %actor,
                        "invalid status transition, logged as anomaly"
                    );
                    ProcessResult::Anomaly(id)
                }
            }
        })
        .await
}

/// Status read with a provider fallback. Callback delivery is
/// at-least-once, not guaranteed — a pending order may simply have missed
/// its notification, so ask the provider for its current view and fold any
/// advance through the same state machine as a callback would take.
pub async fn order_status(
    store: &OrderStore,
    gateway: &dyn PaymentGateway,
    order_id: Uuid,
) -> Result<Order, StoreError> {
    let order = store
        .get_by_id(order_id)
        .await
        .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;

    if order.status() != OrderStatus::Pending {
        return Ok(order);
    }

    match gateway.fetch_transaction(order.gateway_reference()).await {
        Ok(fetched) if fetched.status != OrderStatus::Pending => {
            let merchant_ref = order.merchant_ref().as_str().to_string();
            apply_status(store, &merchant_ref, fetched.status, "reconcile:tripay").await?;
            store
                .get_by_ref(&merchant_ref)
                .await
                .ok_or(StoreError::OrderNotFound(merchant_ref))
        }
        Ok(_) => Ok(order),
        Err(e) => {
            // Provider unreachable: serve the last state we hold.
            tracing::warn!(order_id = %order_id, error = %e, "status reconcile failed, serving stored state");
            Ok(order)
        }
    }
}

/// Authenticated callback apply: checks the notified amount against the
/// stored order before the status is allowed anywhere near the machine.
pub async fn apply_callback(
    store: &OrderStore,
    merchant_ref: &str,
    incoming: OrderStatus,
    total_amount: i64,
) -> Result<ProcessResult, StoreError> {
    let order = store
        .get_by_ref(merchant_ref)
        .await
        .ok_or_else(|| StoreError::OrderNotFound(merchant_ref.to_string()))?;

    if order.amount().value() != total_amount {
        return Err(StoreError::Validation(format!(
            "amount mismatch for {merchant_ref}: expected {}, callback says {total_amount}",
            order.amount()
        )));
    }

    apply_status(store, merchant_ref, incoming, "webhook:tripay").await
}
