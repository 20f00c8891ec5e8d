use async_trait::async_trait;

use super::{ReplyError, ReplyGenerator};
use crate::chat::ChatTurn;
use crate::eligibility::{EligibilityProfile, SchemeMatch};

/// Deterministic reply keyed purely on the number of eligible schemes.
pub fn template_reply(eligible: &[SchemeMatch]) -> String {
    match eligible {
        [] => "Based on your profile, I couldn't find any schemes you're currently eligible \
               for. However, eligibility criteria can change, so I recommend checking back \
               periodically or exploring options to meet the requirements for specific schemes."
            .to_string(),
        [only] => format!(
            "Great news! You're eligible for **{}**. This scheme offers: {}",
            only.scheme.name, only.scheme.benefits
        ),
        few if few.len() <= 3 => {
            let names = few
                .iter()
                .map(|m| format!("**{}**", m.scheme.name))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Excellent! You're eligible for {} schemes: {}. Each scheme has unique \
                 benefits tailored to your needs. Check out the details below!",
                few.len(),
                names
            )
        }
        many => format!(
            "Wonderful! You're eligible for **{} government schemes**! This gives you \
             multiple options to choose from based on your specific educational goals. \
             Review the schemes below to see which ones align best with your needs.",
            many.len()
        ),
    }
}

/// Fallback generator used when no language model is configured.
pub struct TemplateReplyGenerator;

#[async_trait]
impl ReplyGenerator for TemplateReplyGenerator {
    async fn generate(
        &self,
        _user_message: &str,
        eligible: &[SchemeMatch],
        _profile: &EligibilityProfile,
        _history: &[ChatTurn],
    ) -> Result<String, ReplyError> {
        Ok(template_reply(eligible))
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::template_reply;
    use crate::catalog::all_schemes;
    use crate::eligibility::SchemeMatch;

    fn matches(count: usize) -> Vec<SchemeMatch> {
        all_schemes()
            .iter()
            .take(count)
            .map(|scheme| SchemeMatch {
                scheme: scheme.clone(),
                eligibility_reason: "qualifies".to_string(),
            })
            .collect()
    }

    #[test]
    fn zero_matches_explains_the_empty_result() {
        let reply = template_reply(&matches(0));
        assert!(reply.contains("couldn't find any schemes"));
    }

    #[test]
    fn single_match_names_the_scheme_and_benefits() {
        let reply = template_reply(&matches(1));
        assert!(reply.contains("**National Scholarship for Higher Education**"));
        assert!(reply.contains("book allowance"));
    }

    #[test]
    fn small_match_sets_list_every_name() {
        let reply = template_reply(&matches(3));
        assert!(reply.contains("eligible for 3 schemes"));
        assert!(reply.contains("**PM YASASVI Scholarship**"));
    }

    #[test]
    fn large_match_sets_only_report_the_count() {
        let reply = template_reply(&matches(5));
        assert!(reply.contains("**5 government schemes**"));
        assert!(!reply.contains("PM YASASVI"));
    }
}
