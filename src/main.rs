use gym_house::adapters::postgres;
use gym_house::config::AppConfig;
use gym_house::startup::{self, StartupError};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;
    startup::init_tracing(&config.server);

    let pool = config.database.connect().await?;
    if config.database.run_migrations {
        postgres::migrate(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let state = startup::state_for_pool(pool, &config.auth);
    startup::prepare_store(&state, &config).await?;

    let addr = config.server.socket_addr()?;
    let app = startup::build_app(state, &config.server);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Gym House listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;
    Ok(())
}
