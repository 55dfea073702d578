use std::sync::Arc;

use color_eyre::eyre::Result;
use redis::{Client, Connection};
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::RwLock;

/// Connect a pool to PostgreSQL and bring the schema up to date.
pub async fn configure_postgresql(database_url: &Secret<String>) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub fn get_redis_client(redis_host_name: &str) -> redis::RedisResult<Client> {
    Client::open(format!("redis://{redis_host_name}/"))
}

/// Open a Redis connection wrapped for shared async use.
pub fn configure_redis(redis_host_name: &str) -> Result<Arc<RwLock<Connection>>> {
    let conn = get_redis_client(redis_host_name)?.get_connection()?;
    Ok(Arc::new(RwLock::new(conn)))
}
