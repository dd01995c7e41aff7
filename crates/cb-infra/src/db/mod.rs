pub mod board_store;
pub mod executor;
pub mod models;
pub mod pool;
pub mod schema;

pub use board_store::DieselBoardStore;
pub use executor::{DbExecutor, DieselSqliteExecutor};
pub use pool::{init_db_pool, DbPool};
