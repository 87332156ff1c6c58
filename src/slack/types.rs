use serde::{Deserialize, Serialize};

// https://docs.slack.dev/reference/methods/chat.postmessage
#[derive(Debug, Serialize)]
pub(super) struct PostMessageRequest<'a> {
    pub(super) channel: &'a str,
    pub(super) text: &'a str,
}

// Slack replies 200 with ok=false for API-level failures; the error field
// carries the reason
#[derive(Debug, Deserialize)]
pub(super) struct PostMessageResponse {
    pub(super) ok: bool,
    pub(super) channel: Option<String>,
    pub(super) ts: Option<String>,
    pub(super) error: Option<String>,
}
