use sea_orm::DatabaseConnection;

/// Application state containing shared resources.
///
/// Owned by the process entry point and injected into handlers via
/// `web::Data<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    /// Create a new AppState with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The shared database connection pool
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
