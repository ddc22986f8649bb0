//! HTTP server facade for biblio: router assembly, error mapping, serving.

use anyhow::Context;
use axum::{routing::get, Router};

use biblio_kernel::settings::Settings;
use biblio_kernel::ModuleRegistry;

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Serve the registry's module routes until shutdown.
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let app = build_router(registry, settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind to address")?;

    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main router with every module mounted under `/api/{name}`.
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut builder = RouterBuilder::new()
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .route("/healthz", get(health_check));

    for module in registry.modules() {
        tracing::info!(module = module.name(), "mounting module routes");
        builder = builder.mount_module(module.name(), module.routes());
    }

    builder.build()
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install shutdown signal handler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthz_responds_ok() {
        let registry = ModuleRegistry::new();
        let settings = Settings::default();
        let router = build_router(&registry, &settings);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
