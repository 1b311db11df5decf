/*!
 * Database module for the penal-code section store.
 *
 * This module provides SQLite-based storage for the category records the
 * pipeline resolves matched labels against. The store is reference data:
 * written by the `import` command, read-only while serving.
 */

// Allow dead code - database types are for library consumers
#![allow(dead_code)]

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::CategoryRecord;
pub use repository::CategoryRepository;
