//! Outbound webhook notifications

use serde_json::json;

use crate::config::NotificationsConfig;

/// Posts alert messages to a chat-bot webhook. Best-effort: failures are
/// logged and never propagated to the caller.
#[derive(Clone)]
pub struct NotifyService {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl NotifyService {
    pub fn new(config: NotificationsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.webhook_url,
        }
    }

    /// Send a plain text alert; no-op when no webhook is configured
    pub async fn send(&self, text: &str) {
        let Some(ref url) = self.webhook_url else {
            tracing::debug!("webhook not configured, skipping notification");
            return;
        };

        let body = json!({ "text": text });
        match self.client.post(url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("webhook notification delivered");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "webhook rejected notification");
            }
            Err(e) => {
                tracing::warn!("webhook notification failed: {}", e);
            }
        }
    }
}
