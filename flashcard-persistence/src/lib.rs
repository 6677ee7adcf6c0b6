pub mod connection;
pub mod entities;
pub mod repositories;
pub mod store;

pub use store::SqliteStore;
