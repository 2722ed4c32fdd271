use {
    seat_checkout::{
        AppState, adapters::tripay_client::TripayClient, config::Config,
        infra::memory::OrderStore, services::expirer,
    },
    std::sync::Arc,
    tokio::{signal, sync::watch},
    tracing_subscriber::EnvFilter,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let store = OrderStore::new();
    let gateway = Arc::new(TripayClient::new(&config));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(expirer::run_expirer(
        store.clone(),
        chrono::Duration::hours(config.order_expiry_hours as i64),
        shutdown_rx,
    ));

    let state = AppState {
        config: config.clone(),
        store,
        gateway,
    };
    let app = seat_checkout::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listen address");
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    let _ = shutdown_tx.send(true);
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
