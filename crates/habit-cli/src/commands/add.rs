use habit_core::HabitDraft;

use crate::commands::common::{open_session, report_last_error};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_add(
    name_parts: &[String],
    category: &str,
    points: &str,
    settings: &Settings,
) -> Result<(), CliError> {
    let draft = HabitDraft::new(name_parts.join(" "), category, points.trim());
    // Reject bad input before touching the network.
    draft.validate().map_err(habit_core::Error::from)?;

    let mut controller = open_session(settings).await?;
    let id = controller.create(&draft).await?;
    report_last_error(&controller);

    println!("{id}");
    Ok(())
}
