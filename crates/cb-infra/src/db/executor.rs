use anyhow::Context;
use diesel::SqliteConnection;

use crate::db::pool::DbPool;

/// Seam between repositories and the connection pool, so repository code
/// stays testable against any connection source.
pub trait DbExecutor: Send + Sync {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T>;
}

/// Checks a pooled SQLite connection out for the duration of one closure.
///
/// `DbPool` is already an `Arc` around its inner state, so clones of the
/// executor share the same pool.
#[derive(Clone)]
pub struct DieselSqliteExecutor {
    pool: DbPool,
}

impl DieselSqliteExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DbExecutor for DieselSqliteExecutor {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut conn = self
            .pool
            .get()
            .context("checking a connection out of the pool")?;
        f(&mut conn)
    }
}
