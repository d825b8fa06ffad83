#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig, DATABASE_URL};

// Whether migrations ran; decided once per test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config(max_connections: u32) -> DatabaseConfig {
    DatabaseConfig {
        url: DATABASE_URL.clone(),
        max_connections,
        min_connections: 1,
        connect_timeout_secs: 5,
        acquire_timeout_secs: 10,
        ..Default::default()
    }
}

/// A migrated connection, or `None` when the database tests should be skipped.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    // Run migrations exactly once, with a throwaway connection
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let db = match connect_with_config(&test_config(2)).await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    return false;
                }
            };
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {}", e);
                    false
                }
            }
        })
        .await;
    if !migrated {
        return None;
    }

    // Return a fresh connection for the current test's runtime
    connect_with_config(&test_config(10)).await.ok()
}
