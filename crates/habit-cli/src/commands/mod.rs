pub mod add;
pub mod categories;
pub mod common;
pub mod config;
pub mod delete;
pub mod list;
pub mod score;
pub mod status;
pub mod sync;
pub mod toggle;
