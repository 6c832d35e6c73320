//! Database initialization and schema

mod init;

pub use init::{init_database, init_schema};
