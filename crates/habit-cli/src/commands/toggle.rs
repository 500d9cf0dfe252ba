use crate::commands::common::{open_session, report_last_error, resolve_habit_id};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_toggle(id: &str, settings: &Settings) -> Result<(), CliError> {
    let mut controller = open_session(settings).await?;
    let habit_id = resolve_habit_id(controller.habits(), id)?;

    controller.toggle(&habit_id).await?;
    report_last_error(&controller);

    let state = match controller.find(&habit_id) {
        Some(habit) if habit.is_done_today => "done",
        _ => "not done",
    };
    println!("{habit_id} {state}");
    Ok(())
}
