use anyhow::Context;
use clap::{Parser, Subcommand};

use biblio_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "biblio", about = "Library lending tracker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Load configuration and print the effective values
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("failed to load biblio settings")?;

    match cli.command {
        Command::Serve => {
            biblio_telemetry::init(&settings.telemetry)?;

            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start tokio runtime")?
                .block_on(biblio_app::run(settings))
        }
        Command::CheckConfig => {
            println!("environment: {:?}", settings.environment);
            println!(
                "server: {}:{} (request timeout {} ms)",
                settings.server.host, settings.server.port, settings.server.request_timeout_ms
            );
            println!("borrow limit: {}", settings.lending.borrow_limit);
            println!("log format: {:?}", settings.telemetry.log_format);
            Ok(())
        }
    }
}
