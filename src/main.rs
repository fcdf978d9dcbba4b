use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vendra::{api::routes::create_router, db::UserStore, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendra=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing signing secret aborts here, before the listener exists.
    let config = Arc::new(Config::from_env()?);

    let store = match &config.database.path {
        Some(path) => UserStore::new_local(path).await?,
        None => {
            tracing::warn!("DATABASE_PATH not set, using in-memory store");
            UserStore::new_memory().await?
        }
    };

    let state = AppState::build(config.clone(), Arc::new(store))?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "vendra server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
