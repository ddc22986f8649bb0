use anyhow::Context;
use biblio_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load biblio settings")?;
    biblio_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        borrow_limit = settings.lending.borrow_limit,
        "biblio bootstrap starting"
    );

    biblio_app::run(settings).await
}
