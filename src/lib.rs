pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::Store;
