use crate::commands::common::open_session;
use crate::config::Settings;
use crate::error::CliError;

pub async fn run_categories(settings: &Settings) -> Result<(), CliError> {
    let controller = open_session(settings).await?;
    let categories = controller.categories();

    if categories.is_empty() {
        println!("No categories.");
    }
    for category in categories {
        println!("{category}");
    }
    Ok(())
}
