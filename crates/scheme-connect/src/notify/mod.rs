//! Outbound SMS delivery of scheme details.
//!
//! Same capability split as reply generation: a Twilio-backed notifier
//! when credentials are configured, a mock notifier otherwise. Provider
//! failures never escape as errors; they come back as `failed` receipts
//! so the request path stays total.

mod twilio;

pub use twilio::TwilioNotifier;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::catalog::SchemeRecord;
use crate::config::TwilioConfig;

const SMS_BENEFITS_CHARS: usize = 150;
const SMS_DOCUMENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
        }
    }
}

/// Outcome handed back to the caller; never an error.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReceipt {
    pub status: DeliveryStatus,
    pub message: String,
}

#[async_trait]
pub trait SchemeNotifier: Send + Sync {
    async fn send_scheme_details(&self, phone: &str, scheme: &SchemeRecord) -> DeliveryReceipt;

    /// Whether a real SMS provider backs this notifier.
    fn is_available(&self) -> bool;
}

/// Picks the notifier variant from configuration presence.
pub fn notifier_from_config(config: &TwilioConfig) -> Arc<dyn SchemeNotifier> {
    match config.credentials() {
        Some((account_sid, auth_token, from_number)) => {
            info!("SMS delivery backed by Twilio");
            Arc::new(TwilioNotifier::new(account_sid, auth_token, from_number))
        }
        None => {
            info!("SMS delivery using mock receipts (Twilio not configured)");
            Arc::new(MockNotifier)
        }
    }
}

/// Development notifier: logs the dispatch and reports success.
pub struct MockNotifier;

#[async_trait]
impl SchemeNotifier for MockNotifier {
    async fn send_scheme_details(&self, phone: &str, scheme: &SchemeRecord) -> DeliveryReceipt {
        let text = scheme_sms_text(scheme);
        let preview: String = text.chars().take(50).collect();
        info!(phone = %mask_phone(phone), %preview, "mock SMS dispatch");

        DeliveryReceipt {
            status: DeliveryStatus::Sent,
            message: "SMS sent successfully (mock mode)".to_string(),
        }
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// SMS body for one scheme: name, clipped benefits, link, and the first
/// few required documents.
pub fn scheme_sms_text(scheme: &SchemeRecord) -> String {
    let benefits: String = scheme.benefits.chars().take(SMS_BENEFITS_CHARS).collect();

    let mut message = format!(
        "SchemeConnect\n\n{}\n\nBenefits: {}...\n\nApply: {}\n\nDocuments needed:\n",
        scheme.name, benefits, scheme.apply_link
    );
    for document in scheme.documents.iter().take(SMS_DOCUMENT_LIMIT) {
        message.push_str(&format!("- {document}\n"));
    }
    if scheme.documents.len() > SMS_DOCUMENT_LIMIT {
        message.push_str(&format!(
            "+ {} more\n",
            scheme.documents.len() - SMS_DOCUMENT_LIMIT
        ));
    }

    message
}

/// Keeps only the trailing four digits visible in logs.
pub(crate) fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let visible = chars.len().min(4);
    let masked = "*".repeat(chars.len() - visible);
    let tail: String = chars[chars.len() - visible..].iter().collect();
    format!("{masked}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_scheme;

    #[test]
    fn sms_text_lists_three_documents_and_a_remainder() {
        let scheme = find_scheme("scheme_1").expect("scheme present");
        let text = scheme_sms_text(scheme);

        assert!(text.starts_with("SchemeConnect\n\n"));
        assert!(text.contains("National Scholarship for Higher Education"));
        assert!(text.contains("Apply: https://scholarships.gov.in"));
        assert!(text.contains("- Aadhaar Card\n"));
        assert!(text.contains("- Previous Year Marksheet\n"));
        assert!(!text.contains("- Bank Passbook"));
        assert!(text.contains("+ 2 more\n"));
    }

    #[test]
    fn four_document_schemes_report_one_more() {
        let scheme = find_scheme("scheme_4").expect("scheme present");
        let text = scheme_sms_text(scheme);
        assert!(text.contains("+ 1 more\n"));
    }

    #[test]
    fn benefits_are_clipped_to_sms_length() {
        let scheme = find_scheme("scheme_1").expect("scheme present");
        let text = scheme_sms_text(scheme);
        let benefits_line = text
            .lines()
            .find(|line| line.starts_with("Benefits: "))
            .expect("benefits line present");
        assert!(benefits_line.chars().count() <= "Benefits: ".len() + SMS_BENEFITS_CHARS + 3);
        assert!(benefits_line.ends_with("..."));
    }

    #[test]
    fn phone_masking_keeps_only_the_last_four_digits() {
        assert_eq!(mask_phone("+919876543210"), "*********3210");
        assert_eq!(mask_phone("981"), "981");
    }

    #[tokio::test]
    async fn mock_notifier_reports_mock_success() {
        let scheme = find_scheme("scheme_1").expect("scheme present");
        let receipt = MockNotifier.send_scheme_details("9876543210", scheme).await;
        assert_eq!(receipt.status, DeliveryStatus::Sent);
        assert!(receipt.message.contains("mock mode"));
    }
}
