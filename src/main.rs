use migration::{Migrator, MigratorTrait};
use reviewer_service::{config::Config, State, StateTrait};
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_line_number(true).with_filter(env_filter))
        .init();

    reviewer_service::panic::set_hook();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("fatal error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let state = State::new(&config.database).await?;

    if config.database.run_migrations {
        info!("applying migrations");
        Migrator::up(state.db(), None).await?;
    }

    let listener = TcpListener::bind(config.router.addr()).await?;

    reviewer_service::run(listener, state, config.router.shutdown_timeout).await
}
