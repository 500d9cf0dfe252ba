//! Services shared by the API handlers.

mod habits;

pub use habits::HabitService;
