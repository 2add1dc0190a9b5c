//! HTTP SMS gateway client.
//!
//! Talks to an Africa's Talking compatible bulk messaging API:
//! `POST {base_url}/version1/messaging` with form-encoded credentials and a
//! comma-separated recipient list, answering JSON with a per-recipient
//! delivery status.

use std::time::Duration;

use domain::services::sms::{
    RecipientReport, SmsDeliveryReport, SmsGateway, SmsGatewayError,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SmsConfig;

/// SMS gateway backed by the provider's HTTP API.
pub struct HttpSmsGateway {
    client: reqwest::Client,
    base_url: String,
    username: String,
    api_key: String,
    sender_id: String,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(rename = "SMSMessageData")]
    sms_message_data: ProviderMessageData,
}

#[derive(Debug, Deserialize)]
struct ProviderMessageData {
    #[serde(rename = "Recipients", default)]
    recipients: Vec<ProviderRecipient>,
}

#[derive(Debug, Deserialize)]
struct ProviderRecipient {
    #[serde(rename = "number")]
    number: String,
    #[serde(rename = "status")]
    status: String,
}

impl HttpSmsGateway {
    pub fn new(config: &SmsConfig) -> Result<Self, SmsGatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SmsGatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            api_key: config.api_key.clone(),
            sender_id: config.sender_id.clone(),
        })
    }
}

#[async_trait::async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send(
        &self,
        message: &str,
        recipients: &[String],
    ) -> Result<SmsDeliveryReport, SmsGatewayError> {
        let url = format!("{}/version1/messaging", self.base_url);
        let to = recipients.join(",");

        let mut form = vec![
            ("username", self.username.as_str()),
            ("to", to.as_str()),
            ("message", message),
        ];
        if !self.sender_id.is_empty() {
            form.push(("from", self.sender_id.as_str()));
        }

        debug!(recipients = recipients.len(), "Sending SMS via provider API");

        let response = self
            .client
            .post(&url)
            .header("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| SmsGatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "SMS provider rejected the request");
            return Err(SmsGatewayError::Provider(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: ProviderResponse = response
            .json()
            .await
            .map_err(|e| SmsGatewayError::Provider(format!("Unparseable response: {}", e)))?;

        Ok(SmsDeliveryReport {
            recipients: parsed
                .sms_message_data
                .recipients
                .into_iter()
                .map(|r| RecipientReport {
                    address: r.number,
                    status: r.status,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_response_parses() {
        let json = r#"{
            "SMSMessageData": {
                "Message": "Sent to 1/1",
                "Recipients": [
                    {"number": "+256771234567", "status": "Success", "cost": "UGX 35"}
                ]
            }
        }"#;
        let parsed: ProviderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sms_message_data.recipients.len(), 1);
        assert_eq!(parsed.sms_message_data.recipients[0].status, "Success");
    }

    #[test]
    fn test_provider_response_without_recipients() {
        let json = r#"{"SMSMessageData": {"Message": "InvalidSenderId"}}"#;
        let parsed: ProviderResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.sms_message_data.recipients.is_empty());
    }
}
