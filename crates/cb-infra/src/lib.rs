//! # cb-infra
//!
//! Infrastructure implementations of the ChurchBoard ports: the
//! SQLite-backed board store and the system clock.

pub mod clock;
pub mod db;

pub use clock::SystemClock;
pub use db::{init_db_pool, DbPool, DieselBoardStore, DieselSqliteExecutor};
