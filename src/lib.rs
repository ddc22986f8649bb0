//! biblio application library: domain modules and server bootstrap.

pub mod modules;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use biblio_kernel::{InitCtx, ModuleRegistry, Settings};
use biblio_store::{MemoryStore, RecordStore};

/// Build the module registry over a fresh store and serve HTTP until
/// shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &store, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await.context("module init failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module start failed")?;

    biblio_http::start_server(&registry, &settings).await?;

    registry.stop_all().await.context("module stop failed")
}
