use crate::config::Config;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::sheets::SheetsClient;
use crate::slack::SlackClient;

pub async fn execute() -> Result<()> {
    let config = Config::load()?;
    let sheets_client = SheetsClient::new(&config.google, &config.sheet).await?;
    let slack_client = SlackClient::new(&config.slack)?;

    let pipeline = Pipeline::new(&config, sheets_client, slack_client);
    pipeline.run().await?;

    Ok(())
}
