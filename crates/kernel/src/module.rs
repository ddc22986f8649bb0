use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during startup.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Lifecycle trait implemented by every domain module.
#[async_trait]
pub trait Module: Send + Sync {
    /// Unique name for this module.
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context.
    /// Called during application startup, before routes are mounted.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes.
    /// Routes will be mounted under `/api/{module_name}`.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Start background work for this module, once routes are mounted.
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources during shutdown.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
