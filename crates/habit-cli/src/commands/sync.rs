use crate::commands::common::{open_session, report_last_error};
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_sync(settings: &Settings) -> Result<(), CliError> {
    let mut controller = open_session(settings).await?;
    controller.resync().await;
    report_last_error(&controller);

    println!(
        "Sync finished: {} ({} habits)",
        controller.mode(),
        controller.habits().len()
    );
    Ok(())
}
