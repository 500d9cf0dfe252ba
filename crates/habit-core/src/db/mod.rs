//! Database layer for the habit API

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{HabitRepository, LibSqlHabitRepository};
