//! Application state shared across Axum route handlers.
//!
//! Wraps the SeaORM connection pool. Cloned freely; `DatabaseConnection` is
//! itself a cheap handle.

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Borrow the connection; the usual form inside handlers.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Owned copy of the connection for spawned tasks.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
