use crate::config::Config;
use crate::error::Result;
use crate::report::{MessageStyle, build_message};
use crate::sheets::{RangeSelector, SheetSource};
use crate::slack::{MessageHandle, MessageSink};
use tracing::{info, instrument};

pub struct Pipeline<S, M> {
    selector: RangeSelector,
    channel: String,
    style: MessageStyle,
    sheets: S,
    slack: M,
}

impl<S, M> Pipeline<S, M>
where
    S: SheetSource + Sync,
    M: MessageSink + Sync,
{
    pub fn new(config: &Config, sheets: S, slack: M) -> Self {
        Self {
            selector: config.sheet.selector(),
            channel: config.slack.channel.clone(),
            style: config.message.style,
            sheets,
            slack,
        }
    }

    /// Read the sheet, format it, and post the result. Returns None when the
    /// sheet held no values; nothing is posted in that case.
    #[instrument(name = "Run", skip_all)]
    pub async fn run(&self) -> Result<Option<MessageHandle>> {
        let grid = self.sheets.read(&self.selector).await?;

        if grid.is_empty() {
            info!("No data found");
            return Ok(None);
        }

        let text = build_message(&grid, self.style);
        let handle = self.slack.post_message(&self.channel, &text).await?;

        info!(channel = %handle.channel, ts = %handle.ts, "Message posted");

        Ok(Some(handle))
    }
}
