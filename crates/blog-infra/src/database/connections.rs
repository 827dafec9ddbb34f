#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Database connection holder.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&config).await?;
/// let store = PostgresPostStore::new(db.main.clone());
/// ```
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    /// Connection pool for the posts collection.
    pub main: DbConn,
}

#[cfg(not(feature = "postgres"))]
pub struct DatabaseConnections;

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self { main })
    }

    /// Round trip to the database, used by the health check.
    pub async fn ping(&self) -> bool {
        match self.main.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        }
    }
}

#[cfg(not(feature = "postgres"))]
impl DatabaseConnections {
    pub async fn ping(&self) -> bool {
        false
    }
}
