//! Outbound SMS delivery.
//!
//! Delivery is fire-and-forget from the engine's perspective: the channel
//! adapter logs failures and never feeds them back into the state machine.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::config::GatewayConfig;
use crate::error::ChannelError;

/// Sends a text message to a phone number.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, phone: &str, text: &str) -> Result<(), ChannelError>;
}

/// Africa's Talking messaging API client.
pub struct AfricasTalkingGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl AfricasTalkingGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn messaging_url(&self) -> String {
        format!("{}/version1/messaging", self.config.base_url)
    }
}

#[async_trait]
impl SmsGateway for AfricasTalkingGateway {
    async fn send(&self, phone: &str, text: &str) -> Result<(), ChannelError> {
        let mut form = vec![
            ("username", self.config.username.clone()),
            ("to", phone.to_string()),
            ("message", text.to_string()),
        ];
        if let Some(ref sender_id) = self.config.sender_id {
            form.push(("from", sender_id.clone()));
        }

        let response = self
            .client
            .post(self.messaging_url())
            .header("apiKey", self.config.api_key.expose_secret())
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "sms".into(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::GatewayRejected {
                phone: phone.to_string(),
                reason: format!("{status}: {body}"),
            });
        }

        tracing::debug!(phone = %phone, chars = text.len(), "Outbound SMS accepted");
        Ok(())
    }
}
