use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sea_orm::{ConnectOptions, Database};
use tracing::info;

use campus_auth_types::token::TokenService;
use campus_catalog::config::CatalogConfig;
use campus_catalog::infra::solr::SolrIndex;
use campus_catalog::router::{RouteOptions, build_router};
use campus_catalog::state::AppState;
use campus_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = CatalogConfig::from_env();

    let mut db_options = ConnectOptions::new(config.database_url.clone());
    db_options
        .max_connections(config.db_max_connections)
        .connect_timeout(config.store_timeout)
        .acquire_timeout(config.store_timeout)
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);
    let db = Database::connect(db_options)
        .await
        .expect("failed to connect to database");

    let index = SolrIndex::new(config.solr_url.clone(), config.index_timeout)
        .expect("failed to build search index client");

    let state = AppState {
        db,
        index,
        tokens: TokenService::new(&config.jwt_secret),
        token_ttl: config.token_ttl,
        cookie_secure: config.cookie_secure,
        store_timeout: config.store_timeout,
        admin_emails: Arc::from(config.admin_emails.clone()),
    };

    if config.reindex_on_start {
        let reindex_state = state.clone();
        tokio::spawn(async move {
            let catalog = reindex_state.catalog();
            if let Err(e) = reindex_state.index_sync().reindex_all(&catalog).await {
                let error = anyhow::Error::new(e);
                tracing::warn!(error = %format!("{error:#}"), "startup reindex failed");
            }
        });
    }

    let options = RouteOptions {
        open_course_writes: config.open_course_writes,
        cors_allow_origin: config.cors_allow_origin.as_deref().map(|origin| {
            HeaderValue::from_str(origin).expect("invalid CORS_ALLOW_ORIGIN")
        }),
    };

    let router = build_router(state, options);
    let http_addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("catalog service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
