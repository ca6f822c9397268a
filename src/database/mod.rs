pub mod manager;
pub mod models;
pub mod schema;

pub use manager::{Database, DatabaseError};
