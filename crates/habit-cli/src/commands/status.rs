use crate::commands::common::build_controller;
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_status(settings: &Settings) -> Result<(), CliError> {
    let mut controller = build_controller(settings)?;

    let health = match controller.gateway().health().await {
        Ok(health) => health.status,
        Err(error) => format!("unreachable ({error})"),
    };
    controller.initial_load().await;

    println!("API:        {}", controller.gateway().base_url());
    println!("Health:     {health}");
    println!("Mode:       {}", controller.mode());
    println!("Habits:     {}", controller.habits().len());
    println!(
        "Last error: {}",
        controller.last_error().unwrap_or("none")
    );
    println!("Snapshot:   {}", settings.snapshot_path.display());
    Ok(())
}
