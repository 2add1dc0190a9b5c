//! Outbound SMS gateway abstraction.
//!
//! The gateway is a constructor-injected capability: the dispatcher and the
//! match lifecycle engine receive an `Arc<dyn SmsGateway>` explicitly, there
//! is no process-wide client.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Per-recipient delivery status reported by the gateway.
///
/// Providers report a free-form status string; anything other than
/// `"Success"` counts as a failed delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecipientReport {
    pub address: String,
    pub status: String,
}

impl RecipientReport {
    pub fn is_success(&self) -> bool {
        self.status == "Success"
    }
}

/// Gateway response for one send call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SmsDeliveryReport {
    pub recipients: Vec<RecipientReport>,
}

impl SmsDeliveryReport {
    /// Whether the first recipient was accepted. The dispatcher only sends
    /// to one recipient per call and only inspects the first status.
    pub fn first_delivered(&self) -> bool {
        self.recipients.first().map(RecipientReport::is_success).unwrap_or(false)
    }
}

/// Errors from the gateway call itself (network, auth, provider outage),
/// as opposed to a logical "Failed" delivery status.
#[derive(Debug, thiserror::Error)]
pub enum SmsGatewayError {
    #[error("SMS transport error: {0}")]
    Transport(String),

    #[error("SMS provider rejected the request: {0}")]
    Provider(String),
}

/// Capability for sending a text message to one or more recipients.
#[async_trait::async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(
        &self,
        message: &str,
        recipients: &[String],
    ) -> Result<SmsDeliveryReport, SmsGatewayError>;
}

/// A message captured by [`MockSmsGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub message: String,
    pub recipients: Vec<String>,
}

/// Mock SMS gateway for development and testing.
///
/// Records every send and can simulate delivery failures or transport
/// errors.
#[derive(Debug, Default)]
pub struct MockSmsGateway {
    /// Report every recipient as rejected instead of "Success".
    pub simulate_failure: bool,
    /// Fail the gateway call itself with a transport error.
    pub simulate_transport_error: bool,
    sent: Mutex<Vec<SentSms>>,
}

impl MockSmsGateway {
    /// A gateway that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose deliveries are all rejected.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// A gateway whose calls error out entirely.
    pub fn erroring() -> Self {
        Self {
            simulate_transport_error: true,
            ..Self::default()
        }
    }

    /// Messages captured so far.
    pub fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().expect("mock sms lock poisoned").clone()
    }
}

#[async_trait::async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send(
        &self,
        message: &str,
        recipients: &[String],
    ) -> Result<SmsDeliveryReport, SmsGatewayError> {
        if self.simulate_transport_error {
            tracing::warn!(recipients = recipients.len(), "Mock SMS gateway simulating transport error");
            return Err(SmsGatewayError::Transport("Simulated transport error".to_string()));
        }

        self.sent.lock().expect("mock sms lock poisoned").push(SentSms {
            message: message.to_string(),
            recipients: recipients.to_vec(),
        });

        let status = if self.simulate_failure { "InvalidPhoneNumber" } else { "Success" };

        tracing::info!(
            recipients = recipients.len(),
            status = status,
            "Mock SMS gateway: would send message"
        );

        Ok(SmsDeliveryReport {
            recipients: recipients
                .iter()
                .map(|address| RecipientReport {
                    address: address.clone(),
                    status: status.to_string(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_success() {
        let gateway = MockSmsGateway::new();
        let report = gateway
            .send("hello", &["+256771234567".to_string()])
            .await
            .unwrap();
        assert!(report.first_delivered());
        assert_eq!(gateway.sent().len(), 1);
        assert_eq!(gateway.sent()[0].message, "hello");
    }

    #[tokio::test]
    async fn test_mock_gateway_failure() {
        let gateway = MockSmsGateway::failing();
        let report = gateway
            .send("hello", &["+256771234567".to_string()])
            .await
            .unwrap();
        assert!(!report.first_delivered());
        // Attempt is still recorded.
        assert_eq!(gateway.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_gateway_transport_error() {
        let gateway = MockSmsGateway::erroring();
        let err = gateway
            .send("hello", &["+256771234567".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, SmsGatewayError::Transport(_)));
        assert!(gateway.sent().is_empty());
    }

    #[test]
    fn test_report_empty_recipients_not_delivered() {
        let report = SmsDeliveryReport { recipients: vec![] };
        assert!(!report.first_delivered());
    }

    #[test]
    fn test_report_inspects_first_recipient_only() {
        let report = SmsDeliveryReport {
            recipients: vec![
                RecipientReport {
                    address: "+256771234567".to_string(),
                    status: "Success".to_string(),
                },
                RecipientReport {
                    address: "+256771234568".to_string(),
                    status: "Failed".to_string(),
                },
            ],
        };
        assert!(report.first_delivered());
    }
}
