//! Data models for habit-score

mod draft;
mod habit;

pub use draft::{DraftField, HabitDraft, ValidDraft, ValidationError};
pub use habit::{default_habits, Habit, HabitId};
