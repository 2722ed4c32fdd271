use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::order::OrderStatus,
        services::order_pipeline::{self, CreateOrderInput},
    },
    axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    },
    serde::Deserialize,
    uuid::Uuid,
};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub package_id: String,
    pub customer_email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

pub async fn create_order_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let order = order_pipeline::create_order(
        &state.store,
        state.gateway.as_ref(),
        &state.config,
        CreateOrderInput {
            package_id: req.package_id,
            customer_email: req.customer_email,
            customer_name: req.full_name.unwrap_or_default(),
            phone_number: req.phone_number,
            payment_method: req.payment_method,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "order_id": order.id(),
            "merchant_ref": order.merchant_ref().as_str(),
            "reference": order.gateway_reference(),
            "checkout_url": order.checkout_url(),
            "qr_url": order.qr_url(),
            "amount": order.amount(),
            "status": order.status(),
        })),
    ))
}

pub async fn order_status_handler(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let order =
        order_pipeline::order_status(&state.store, state.gateway.as_ref(), order_id).await?;

    Ok(Json(serde_json::json!({
        "order_id": order.id(),
        "payment_status": order.status(),
        "message": status_message(order.status()),
    })))
}

pub async fn list_packages_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "packages": state.config.packages }))
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

fn status_message(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Waiting for payment",
        OrderStatus::Paid => "Payment received",
        OrderStatus::Expired => "Payment window expired",
        OrderStatus::Failed => "Payment failed",
        OrderStatus::Refunded => "Payment refunded",
    }
}
