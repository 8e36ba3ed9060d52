//! SQLite database module for the sales map engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
