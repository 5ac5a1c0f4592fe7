//! Temporary SQLite databases with the schema migrated in.

#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_salon::db::{DbPool, establish_connection_pool};
use pushkind_salon::repository::DieselRepository;
use tempfile::TempDir;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database file living in its own temporary directory, removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url).expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}
