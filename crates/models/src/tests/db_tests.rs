use crate::db::{connect_with_config, DatabaseConfig};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use super::setup_test_db;

#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let value: i32 = row.try_get("", "test")?;
    assert_eq!(value, 1);
    Ok(())
}

#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    if setup_test_db().await.is_none() {
        return Ok(());
    }

    let config = DatabaseConfig {
        url: crate::db::DATABASE_URL.clone(),
        max_connections: 3,
        min_connections: 1,
        connect_timeout_secs: 10,
        acquire_timeout_secs: 10,
        ..Default::default()
    };
    let db = connect_with_config(&config).await?;
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT current_database()".to_string());
    assert!(db.query_one(stmt).await?.is_some());
    Ok(())
}
