use habit_core::views::CategoryFilter;

use crate::commands::common::{
    format_habit_lines, format_score_line, format_summary_line, habit_to_list_item, open_session,
    HabitListItem,
};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_list(
    category: Option<&str>,
    as_json: bool,
    settings: &Settings,
) -> Result<(), CliError> {
    let mut controller = open_session(settings).await?;
    if let Some(category) = category {
        controller.select_category(category.parse::<CategoryFilter>().unwrap_or_default());
    }

    let visible = controller.visible_habits();

    if as_json {
        let json_items = visible
            .iter()
            .map(|habit| habit_to_list_item(habit))
            .collect::<Vec<HabitListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No habits.");
    }
    for line in format_habit_lines(&visible) {
        println!("{line}");
    }
    println!();
    println!("{}", format_summary_line(&controller.summary()));
    println!("{}", format_score_line(controller.daily_score()));
    Ok(())
}
