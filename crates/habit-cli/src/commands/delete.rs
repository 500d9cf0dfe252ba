use crate::commands::common::{open_session, report_last_error, resolve_habit_id};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_delete(id: &str, settings: &Settings) -> Result<(), CliError> {
    let mut controller = open_session(settings).await?;
    let habit_id = resolve_habit_id(controller.habits(), id)?;

    controller.delete(&habit_id).await?;
    report_last_error(&controller);

    println!("{habit_id}");
    Ok(())
}
