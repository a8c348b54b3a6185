use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::Notifier;
use crate::config::SlackWebhookConfig;
use crate::error::Error;
use crate::usecase::message::{Attachment, Payload};

/// Wire format of an incoming-webhook message.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "blank")]
    channel: &'a str,
    #[serde(skip_serializing_if = "blank")]
    username: &'a str,
    #[serde(skip_serializing_if = "blank")]
    icon_emoji: &'a str,
    link_names: bool,
    mrkdwn: bool,
    #[serde(skip_serializing_if = "no_attachments")]
    attachments: &'a [Attachment],
}

fn blank(s: &&str) -> bool {
    s.is_empty()
}

fn no_attachments(a: &&[Attachment]) -> bool {
    a.is_empty()
}

pub struct SlackWebhook {
    client: reqwest::Client,
    config: SlackWebhookConfig,
    dry_run: bool,
}

impl SlackWebhook {
    pub fn new(config: SlackWebhookConfig, timeout: Duration, dry_run: bool) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("prnotify/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            config,
            dry_run,
        })
    }

    fn envelope<'a>(&'a self, text: &'a str, attachments: &'a [Attachment]) -> Envelope<'a> {
        Envelope {
            text,
            channel: &self.config.channel,
            username: &self.config.username,
            icon_emoji: &self.config.icon_emoji,
            link_names: true,
            mrkdwn: true,
            attachments,
        }
    }

    async fn send(&self, envelope: &Envelope<'_>) -> Result<(), Error> {
        if self.dry_run {
            let rendered = serde_json::to_string_pretty(envelope)
                .unwrap_or_else(|e| format!("<unrenderable payload: {e}>"));
            println!("{rendered}");
            info!("dry run: message not sent");
            return Ok(());
        }

        let resp = self
            .client
            .post(&self.config.webhook_url)
            .json(envelope)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::WebhookStatus {
                status: status.as_u16(),
                body,
            });
        }
        info!(channel = %self.config.channel, "message sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn post_text(&self, text: &str) -> Result<(), Error> {
        self.send(&self.envelope(text, &[])).await
    }

    async fn post_payload(&self, payload: &Payload) -> Result<(), Error> {
        self.send(&self.envelope(&payload.text, &payload.attachments))
            .await
    }
}
