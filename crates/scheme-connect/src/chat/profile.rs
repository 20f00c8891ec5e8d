use serde::{Deserialize, Serialize};

use crate::eligibility::EligibilityProfile;

/// Prompts asked while the profile is incomplete, in collection order.
pub mod prompts {
    pub const AGE: &str = "To help you find the right schemes, I need a few details. \
                           Let's start with your age. How old are you?";
    pub const INCOME: &str = "Great! Now, what is your family's annual income in rupees?";
    pub const STATE: &str = "Thank you! Which state are you from? \
                             (e.g., Maharashtra, Karnataka, Tamil Nadu, etc.)";
    pub const CATEGORY: &str =
        "Almost done! What is your category? (General, SC, ST, OBC, EWS, or Minority)";
}

/// Partially-collected applicant profile.
///
/// Fields arrive either as explicit request values (which always overwrite)
/// or from free-text extraction (which only fills gaps).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: Option<u32>,
    pub income: Option<u64>,
    pub state: Option<String>,
    pub category: Option<String>,
}

/// Either the complete profile or the prompt for the next missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStatus {
    Complete(EligibilityProfile),
    Missing(&'static str),
}

impl UserProfile {
    /// Overwrites fields the caller supplied explicitly; absent fields keep
    /// whatever the session already collected.
    pub fn merge_overrides(&mut self, overrides: &UserProfile) {
        if let Some(age) = overrides.age {
            self.age = Some(age);
        }
        if let Some(income) = overrides.income {
            self.income = Some(income);
        }
        if let Some(state) = &overrides.state {
            self.state = Some(state.clone());
        }
        if let Some(category) = &overrides.category {
            self.category = Some(category.clone());
        }
    }

    /// Fields are prompted for in the fixed order age, income, state, category.
    pub fn status(&self) -> ProfileStatus {
        let Some(age) = self.age else {
            return ProfileStatus::Missing(prompts::AGE);
        };
        let Some(income) = self.income else {
            return ProfileStatus::Missing(prompts::INCOME);
        };
        let Some(state) = self.state.clone() else {
            return ProfileStatus::Missing(prompts::STATE);
        };
        let Some(category) = self.category.clone() else {
            return ProfileStatus::Missing(prompts::CATEGORY);
        };

        ProfileStatus::Complete(EligibilityProfile {
            age,
            income,
            state,
            category,
        })
    }
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a session's append-only conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}
