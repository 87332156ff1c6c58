use super::{MessageHandle, MessageSink};
use crate::config::SlackConfig;
use crate::error::{AppError, Result};
use crate::slack::types::{PostMessageRequest, PostMessageResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::env;
use tracing::instrument;

const SLACK_API_BASE_URL: &str = "https://slack.com/api";

pub struct SlackClient {
    client: Client,
    token_env: String,
}

impl SlackClient {
    /// Create a new SlackClient. The bot token is read from the configured
    /// environment variable at post time, not here.
    pub fn new(config: &SlackConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            token_env: config.token_env.clone(),
        })
    }
}

#[async_trait]
impl MessageSink for SlackClient {
    #[instrument(name = "Posting message to Slack", skip_all)]
    async fn post_message(&self, channel: &str, text: &str) -> Result<MessageHandle> {
        let token = env::var(&self.token_env).map_err(|_| {
            AppError::Config(format!(
                "{} environment variable is not set",
                self.token_env
            ))
        })?;

        let url = format!("{}/chat.postMessage", SLACK_API_BASE_URL);
        let request = PostMessageRequest { channel, text };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        parse_post_response(status, &body)
    }
}

/// Map a chat.postMessage response to a handle or an error. Slack reports
/// API-level failures with a 200 status and ok=false in the body.
fn parse_post_response(status: StatusCode, body: &str) -> Result<MessageHandle> {
    if !status.is_success() {
        return Err(AppError::Slack(format!(
            "Failed to post message: {} - {}",
            status, body
        )));
    }

    let response: PostMessageResponse = serde_json::from_str(body)?;

    if !response.ok {
        return Err(AppError::Slack(format!(
            "Failed to post message: {}",
            response.error.unwrap_or_else(|| "unknown error".to_string())
        )));
    }

    let channel = response
        .channel
        .ok_or_else(|| AppError::Slack("Response has no channel".to_string()))?;
    let ts = response
        .ts
        .ok_or_else(|| AppError::Slack("Response has no message timestamp".to_string()))?;

    Ok(MessageHandle { channel, ts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_response() {
        let body =
            r#"{"ok":true,"channel":"C0123456","ts":"1503435956.000247","message":{"text":"hi"}}"#;
        let handle = parse_post_response(StatusCode::OK, body).unwrap();
        assert_eq!(handle.channel, "C0123456");
        assert_eq!(handle.ts, "1503435956.000247");
    }

    #[test]
    fn test_parse_api_rejection() {
        let body = r#"{"ok":false,"error":"invalid_auth"}"#;
        let err = parse_post_response(StatusCode::OK, body).unwrap_err();
        assert!(err.to_string().contains("invalid_auth"));
    }

    #[test]
    fn test_parse_http_failure() {
        let err = parse_post_response(StatusCode::TOO_MANY_REQUESTS, "rate limited").unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_parse_ok_without_timestamp() {
        let body = r#"{"ok":true,"channel":"C0123456"}"#;
        assert!(parse_post_response(StatusCode::OK, body).is_err());
    }
}
