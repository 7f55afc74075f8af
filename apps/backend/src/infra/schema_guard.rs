use sea_orm::DatabaseConnection;

/// Schema guard - warns at startup when the database has no applied
/// migrations. The server still starts; every query will fail until the
/// migration CLI has been run.
pub async fn ensure_schema_ready(db: &DatabaseConnection) {
    let applied = migration::count_applied_migrations(db).await.unwrap_or(0);

    if applied == 0 {
        tracing::warn!(
            "Database schema not ready - no migrations found. Run: cargo run -p migration-cli -- up"
        );
    }
}
