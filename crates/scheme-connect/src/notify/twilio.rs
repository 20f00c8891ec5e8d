use async_trait::async_trait;
use tracing::{error, info};

use super::{mask_phone, scheme_sms_text, DeliveryReceipt, DeliveryStatus, SchemeNotifier};
use crate::catalog::SchemeRecord;

const TWILIO_API_URL: &str = "https://api.twilio.com/2010-04-01";
const DELIVERY_FAILED_MESSAGE: &str = "Failed to send SMS. Please try again later.";

/// Notifier backed by the Twilio Messages API. Recipients are Indian
/// mobile numbers, so the country prefix is applied here.
pub struct TwilioNotifier {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioNotifier {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("reqwest client builds"),
            account_sid,
            auth_token,
            from_number,
        }
    }
}

#[async_trait]
impl SchemeNotifier for TwilioNotifier {
    async fn send_scheme_details(&self, phone: &str, scheme: &SchemeRecord) -> DeliveryReceipt {
        let to = format!("+91{phone}");
        let body = scheme_sms_text(scheme);
        let url = format!("{TWILIO_API_URL}/Accounts/{}/Messages.json", self.account_sid);

        let result = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to.as_str()),
                ("From", self.from_number.as_str()),
                ("Body", body.as_str()),
            ])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(phone = %mask_phone(&to), "SMS sent");
                DeliveryReceipt {
                    status: DeliveryStatus::Sent,
                    message: "SMS sent successfully".to_string(),
                }
            }
            Ok(response) => {
                // Provider detail stays in the logs; the caller only learns
                // that delivery failed.
                error!(status = %response.status(), "Twilio rejected SMS");
                DeliveryReceipt {
                    status: DeliveryStatus::Failed,
                    message: DELIVERY_FAILED_MESSAGE.to_string(),
                }
            }
            Err(err) => {
                error!(error = %err, "failed to reach Twilio");
                DeliveryReceipt {
                    status: DeliveryStatus::Failed,
                    message: DELIVERY_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}
