//! habit-core - Core library for habit-score
//!
//! This crate contains the habit model, draft validation, the local snapshot
//! store, the remote gateway client and the synchronization controller used by
//! the CLI, plus the libSQL persistence layer used by the API.

pub mod db;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;
pub mod snapshot;
pub mod sync;
pub mod util;
pub mod views;

pub use error::{Error, Result};
pub use models::{Habit, HabitDraft, HabitId, ValidDraft, ValidationError};
pub use sync::{SyncController, SyncMode};
