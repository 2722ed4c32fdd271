pub mod api_errors;
pub mod orders_api;
pub mod tripay_client;
pub mod tripay_webhook;
