use habit_core::gateway::{HabitGateway, HttpHabitGateway};
use habit_core::snapshot::{FileSnapshotBackend, SnapshotBackend, SnapshotStore};
use habit_core::util::format_points;
use habit_core::views::{HabitSummary, ScoreTone};
use habit_core::{Habit, HabitId, SyncController};
use serde::Serialize;

use crate::config::Settings;
use crate::error::CliError;

pub type CliController = SyncController<HttpHabitGateway, FileSnapshotBackend>;

const SHORT_ID_LEN: usize = 13;

#[derive(Debug, Serialize)]
pub struct HabitListItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub points: f64,
    pub done_today: bool,
    /// Not yet acknowledged by the server
    pub local_only: bool,
}

pub fn habit_to_list_item(habit: &Habit) -> HabitListItem {
    HabitListItem {
        id: habit.id.to_string(),
        name: habit.name.clone(),
        category: habit.category.clone(),
        points: habit.points,
        done_today: habit.is_done_today,
        local_only: habit.id.is_local(),
    }
}

pub fn build_controller(settings: &Settings) -> Result<CliController, CliError> {
    let gateway = HttpHabitGateway::new(settings.api_base_url.clone())
        .map_err(|error| CliError::Config(error.to_string()))?;
    let snapshot = SnapshotStore::new(FileSnapshotBackend::new(settings.snapshot_path.clone()));
    Ok(SyncController::new(gateway, snapshot))
}

/// Build the controller and run the initial load, reporting any warning.
pub async fn open_session(settings: &Settings) -> Result<CliController, CliError> {
    let mut controller = build_controller(settings)?;
    controller.initial_load().await;
    report_last_error(&controller);
    Ok(controller)
}

pub fn report_last_error<G: HabitGateway, B: SnapshotBackend>(
    controller: &SyncController<G, B>,
) {
    if let Some(message) = controller.last_error() {
        eprintln!("warning: {message}");
    }
}

pub fn normalize_habit_identifier(id: &str) -> Result<String, CliError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::EmptyHabitId);
    }
    Ok(id.to_string())
}

/// Resolve a full id or a unique id prefix against the loaded habits.
pub fn resolve_habit_id(habits: &[Habit], query: &str) -> Result<HabitId, CliError> {
    let query = normalize_habit_identifier(query)?;

    if let Some(habit) = habits.iter().find(|habit| habit.id.to_string() == query) {
        return Ok(habit.id.clone());
    }

    let matching = habits
        .iter()
        .filter(|habit| habit.id.to_string().starts_with(&query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::HabitNotFound(query)),
        [habit] => Ok(habit.id.clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|habit| habit.id.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousHabitId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn short_id(id: &HabitId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

pub fn format_habit_lines(habits: &[&Habit]) -> Vec<String> {
    habits
        .iter()
        .map(|habit| {
            let mark = if habit.is_done_today { "x" } else { " " };
            format!(
                "[{mark}] {:<width$}  {}  ({}, {})",
                short_id(&habit.id),
                habit.name,
                habit.category,
                format_points(habit.points),
                width = SHORT_ID_LEN,
            )
        })
        .collect()
}

pub fn format_summary_line(summary: &HabitSummary) -> String {
    format!("Showing {} of {} habits", summary.visible, summary.total)
}

pub fn format_score_line(score: f64) -> String {
    format!(
        "Daily score: {} ({})",
        format_points(score),
        ScoreTone::of(score).label()
    )
}
