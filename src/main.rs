use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use theater_booking::{config::Config, AppState};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    // Логи в stderr: stdout занят меню
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting theater booking console");

    let mut app = AppState::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run_console(stdin.lock(), stdout.lock())
        .context("Console I/O failed")?;

    info!("Console closed");
    Ok(())
}
