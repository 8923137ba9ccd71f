//! Connection bootstrap for Postgres and the in-memory SQLite profile.

use std::str::FromStr;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

const PG_POOL_MAX: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool for `profile`. Does not run migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;

    match profile {
        // One connection only: every pooled connection would get its own private database.
        DbProfile::InMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .foreign_keys(true);

            let pool = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite pool: {e}")))?;

            info!(engine = "sqlite", path = %url, "pool=create");
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }

        DbProfile::Prod | DbProfile::Test => {
            let pool = PgPoolOptions::new()
                .max_connections(PG_POOL_MAX)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .idle_timeout(Duration::from_secs(30))
                .connect(&url)
                .await
                .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))?;

            info!(engine = "postgres", profile = ?profile, max = PG_POOL_MAX, "pool=create");
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
        }
    }
}

/// Connect and bring the schema up to date.
///
/// Postgres migrations run over a short-lived `DbOwner::Owner` connection and the
/// returned pool uses the `DbOwner::App` credentials. The in-memory database only
/// exists inside its single pooled connection, so it migrates in place.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    match profile {
        DbProfile::InMemory => {
            let conn = connect_db(profile, DbOwner::App).await?;
            run_migrations(&conn).await?;
            Ok(conn)
        }
        DbProfile::Prod | DbProfile::Test => {
            let owner = connect_db(profile, DbOwner::Owner).await?;
            run_migrations(&owner).await?;
            owner
                .close()
                .await
                .map_err(|e| AppError::config(format!("failed to close owner pool: {e}")))?;

            connect_db(profile, DbOwner::App).await
        }
    }
}

async fn run_migrations(conn: &DatabaseConnection) -> Result<(), AppError> {
    migrate(conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))
}
