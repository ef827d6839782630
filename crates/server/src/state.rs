use db::DbService;
use services::services::importer::ImporterService;
use sqlx::SqlitePool;

/// Shared application state handed to every route.
#[derive(Clone)]
pub struct AppState {
    db: DbService,
    importer: ImporterService,
}

impl AppState {
    pub fn new(db: DbService, importer: ImporterService) -> Self {
        Self { db, importer }
    }

    pub fn db(&self) -> &DbService {
        &self.db
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn importer(&self) -> &ImporterService {
        &self.importer
    }
}
