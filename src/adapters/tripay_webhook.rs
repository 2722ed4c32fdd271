use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            error::StoreError,
            order::{OrderStatus, ProcessResult},
        },
        services::order_pipeline,
        signature,
    },
    axum::{Json, body::Bytes, extract::State, http::HeaderMap},
    serde::Deserialize,
};

pub const SIGNATURE_HEADER: &str = "X-Callback-Signature";
pub const EVENT_HEADER: &str = "X-Callback-Event";

/// The fields we act on. Tripay sends more (fees, payment method, paid_at);
/// everything load-bearing is here and nothing is trusted before the
/// signature gate.
#[derive(Debug, Deserialize)]
pub struct CallbackPayload {
    pub reference: String,
    pub merchant_ref: String,
    pub status: String,
    pub total_amount: i64,
}

#[tracing::instrument(
    name = "callback",
    skip_all,
    fields(merchant_ref = tracing::field::Empty, status = tracing::field::Empty)
)]
pub async fn tripay_callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Authentication first: no header, no parsing.
    let sig = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| StoreError::Signature("missing X-Callback-Signature header".into()))?;

    if !signature::verify_callback(&state.config.tripay.private_key, &body, sig) {
        return Err(StoreError::Signature("signature mismatch".into()).into());
    }

    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if event != "payment_status" {
        return Err(StoreError::Validation(format!(
            "unsupported callback event: {event}"
        ))
        .into());
    }

    let payload: CallbackPayload = serde_json::from_slice(&body)
        .map_err(|e| StoreError::Validation(format!("malformed callback payload: {e}")))?;

    // Add callback context to the span so all subsequent logs are correlated.
    tracing::Span::current()
        .record(
            "merchant_ref",
            tracing::field::display(&payload.merchant_ref),
        )
        .record("status", tracing::field::display(&payload.status));

    let incoming = OrderStatus::from_wire(&payload.status)?;

    match order_pipeline::apply_callback(
        &state.store,
        &payload.merchant_ref,
        incoming,
        payload.total_amount,
    )
    .await?
    {
        ProcessResult::Updated(id) => {
            tracing::info!(order_id = %id, reference = %payload.reference, "order status updated");
            Ok(Json(serde_json::json!({"success": true, "status": "updated"})))
        }
        ProcessResult::Stale(id) => {
            tracing::info!(order_id = %id, "duplicate notification, no change");
            Ok(Json(serde_json::json!({"success": true, "status": "stale"})))
        }
        ProcessResult::Anomaly(id) => {
            tracing::warn!(order_id = %id, "anomalous transition, not applied");
            Ok(Json(serde_json::json!({"success": true, "status": "anomaly"})))
        }
    }
}
