use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vigil_adapters::{
    Argon2CredentialHasher, PostgresAccountStore, RedisRevokedSessionStore, SessionConfig,
    SessionManager, Settings,
};
use vigil_axum::RevalidationPolicy;
use vigil_service::{VigilService, configure_postgresql, configure_redis};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let settings = Settings::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(&settings.postgres.url).await?;

    // Setup Redis connection
    let redis_conn = configure_redis(&settings.redis.host_name)?;

    // Create stores
    let accounts = PostgresAccountStore::new(pg_pool);
    let revocations = RedisRevokedSessionStore::new(
        redis_conn,
        settings.session.absolute_cap_seconds as u64,
    );

    let sessions = SessionManager::new(revocations, SessionConfig::from(&settings.session));
    let policy = RevalidationPolicy::new(
        settings.guard.exempt_path_prefixes.clone(),
        settings.guard.login_path.clone(),
    );

    let service = VigilService::new(
        accounts,
        Argon2CredentialHasher,
        sessions,
        policy,
        settings.application.assets_dir.clone(),
    );

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    tracing::info!("Starting vigil account service...");

    service.run_standalone(listener).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
