//! MySQL-backed user store.
//!
//! One table, `users`, keyed by username. `lastTweetId` holds the id of the
//! last post actually delivered for that account; an empty string means the
//! row was bootstrapped and nothing has been announced yet.

use async_trait::async_trait;
use herald_core::{config::DatabaseConfig, error::HeraldError, traits::UserStore};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use tracing::info;

/// Persistent user store backed by MySQL.
///
/// Connections are pooled; every query checks one out and returns it on every
/// exit path, so cycles never leak handles.
#[derive(Clone)]
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    /// Connect a pool and apply the schema.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, HeraldError> {
        let opts = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| HeraldError::Store(format!("failed to connect to mysql: {e}")))?;

        sqlx::raw_sql(include_str!("../migrations/001_init.sql"))
            .execute(&pool)
            .await
            .map_err(|e| HeraldError::Store(format!("failed to apply schema: {e}")))?;

        info!(
            "User store ready at {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self { pool })
    }

    /// Connectivity check for the status command.
    pub async fn ping(&self) -> Result<(), HeraldError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| HeraldError::Store(format!("ping failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn ensure_tracked(&self, username: &str) -> Result<(), HeraldError> {
        sqlx::query("INSERT IGNORE INTO users (username, lastTweetId) VALUES (?, '')")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| HeraldError::Store(format!("failed to track '{username}': {e}")))?;
        Ok(())
    }

    async fn last_post_id(&self, username: &str) -> Result<Option<String>, HeraldError> {
        sqlx::query_scalar::<_, String>("SELECT lastTweetId FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| HeraldError::Store(format!("failed to read '{username}': {e}")))
    }

    async fn set_last_post_id(&self, username: &str, post_id: &str) -> Result<(), HeraldError> {
        sqlx::query(
            "INSERT INTO users (username, lastTweetId) VALUES (?, ?)
             ON DUPLICATE KEY UPDATE lastTweetId = VALUES(lastTweetId)",
        )
        .bind(username)
        .bind(post_id)
        .execute(&self.pool)
        .await
        .map_err(|e| HeraldError::Store(format!("failed to update '{username}': {e}")))?;
        Ok(())
    }
}
