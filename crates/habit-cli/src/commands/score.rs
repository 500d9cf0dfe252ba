use crate::commands::common::{format_score_line, open_session};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_score(settings: &Settings) -> Result<(), CliError> {
    let controller = open_session(settings).await?;
    println!("{}", format_score_line(controller.daily_score()));
    Ok(())
}
