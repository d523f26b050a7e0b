//! Country shortlist - terminal composition root.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countrylist_app::config::{load_dotenv, AppConfig};
use countrylist_app::infrastructure::platform::create_platform;
use countrylist_app::runner::{self, RunnerDeps};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Logs go to stderr so they do not interleave with the REPL on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "countrylist_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Countrylist");

    let config = AppConfig::from_env()?;
    let desktop = create_platform(&config)?;

    let result = runner::run(RunnerDeps {
        platform: desktop.platform,
        settings: config.selection_settings(),
    })
    .await;

    if let Some(monitor) = desktop.monitor {
        monitor.abort();
    }

    result?;
    tracing::info!("Countrylist stopped");
    Ok(())
}
