use std::env;

use tracing_subscriber::EnvFilter;
use user_events::storage::config::{Config, LoggingConfig};

mod cli;
use cli::{parse_cli_args, run, USAGE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let invocation = match parse_cli_args(env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let mut config = Config::load_or_create()?;
    if let Some(base_url) = invocation.base_url {
        config.api.base_url = base_url;
    }

    setup_logging(&config.logging);

    if let Err(e) = run(invocation.command, &config).await {
        tracing::error!("Command failed: {}", e);
        return Err(e);
    }

    Ok(())
}

fn setup_logging(logging: &LoggingConfig) {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "user-events.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("user-events started");
}
