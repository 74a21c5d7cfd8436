//! Chat notification transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::alert::DispatchError;
use crate::config::{NotifierConfig, ParseMode};

/// Delivers a rendered message to humans.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), DispatchError>;

    /// Formatting the transport expects messages to be escaped for.
    fn parse_mode(&self) -> ParseMode {
        ParseMode::Plain
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
}

/// Telegram bot API notifier.
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
    parse_mode: ParseMode,
}

impl TelegramNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                config.bot_token
            ),
            chat_id: config.chat_id.clone(),
            parse_mode: config.parse_mode,
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), DispatchError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text: message,
            parse_mode: self.parse_mode.as_api_str(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| DispatchError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }
        Ok(())
    }

    fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The endpoint embeds the bot token.
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .field("parse_mode", &self.parse_mode)
            .finish()
    }
}
