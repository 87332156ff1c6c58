use crate::config::Config;
use crate::error::Result;
use crate::sheets::{SheetsClient, clear_google_tokens};
use tracing::info;

pub async fn execute(reset: bool) -> Result<()> {
    let config = Config::load()?;

    if reset {
        clear_google_tokens(&config.google)?;
    }

    let _client = SheetsClient::new(&config.google, &config.sheet).await?;

    info!("Google authentication verified");

    Ok(())
}
