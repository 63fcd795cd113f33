use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

use crate::password;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./warbler.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL (`DATABASE_URL`)
    pub database_url: String,

    /// bcrypt cost factor used when hashing new passwords (`BCRYPT_COST`)
    pub hash_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("BCRYPT_COST").ok(),
        )
    }

    fn from_vars(database_url: Option<String>, hash_cost: Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let hash_cost = match hash_cost {
            Some(raw) => parse_hash_cost(&raw)?,
            None => defaults.hash_cost,
        };

        Ok(Self {
            database_url: database_url.unwrap_or(defaults.database_url),
            hash_cost,
        })
    }
}

fn parse_hash_cost(raw: &str) -> anyhow::Result<u32> {
    let cost: u32 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("BCRYPT_COST is not a number: {e}"))?;

    password::check_cost(cost).map_err(|e| anyhow::anyhow!("Invalid BCRYPT_COST: {e}"))?;

    Ok(cost)
}

/// Connect to the configured database and bring its schema up to date.
pub async fn connect(config: &Config) -> anyhow::Result<DatabaseConnection> {
    log::info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    log::info!("Running database migrations...");
    migration::Migrator::up(&db, None).await?;
    log::info!("Database migrations completed");

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.hash_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(
            Some("postgres://localhost/warbler-test".to_string()),
            Some(" 4 ".to_string()),
        )
        .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/warbler-test");
        assert_eq!(config.hash_cost, 4);
    }

    #[test]
    fn test_invalid_hash_cost() {
        assert!(Config::from_vars(None, Some("fast".to_string())).is_err());
        assert!(Config::from_vars(None, Some("2".to_string())).is_err());
        let err = Config::from_vars(None, Some("40".to_string())).unwrap_err();
        assert!(err.to_string().contains("between 4 and 31"));
    }

    #[tokio::test]
    async fn test_connect_runs_migrations() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            hash_cost: password::MIN_COST,
        };

        let db = connect(&config).await.unwrap();
        let users = entity::User::find().all(&db).await.unwrap();
        assert!(users.is_empty());
    }
}
