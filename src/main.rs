mod config;
mod db;
mod error;
mod forms;
mod models;
mod notify;
mod routes;
mod store;
// Front-end form state model; not referenced by the server binary itself.
#[allow(dead_code)]
mod wizard;

use crate::{
    config::Config,
    models::AppState,
    notify::{email::EmailNotifier, whatsapp::WhatsAppNotifier},
};

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use axum::http::header;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;
    let pool = db::connect_pg(&cfg.database_url).await?;

    // Clients are built once here and passed in via state, so tests can
    // exercise the pipeline with substitutes.
    let http = reqwest::Client::new();
    let state = AppState {
        db: pool,
        email: EmailNotifier::new(http.clone(), cfg.resend_api_key.clone()),
        whatsapp: WhatsAppNotifier::new(
            http,
            cfg.green_api_id_instance.clone(),
            cfg.green_api_token.clone(),
            cfg.admin_whatsapp_number.clone(),
        ),
    };

    // Allow the statically hosted site to call the API from the browser.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
