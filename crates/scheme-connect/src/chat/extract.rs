//! Heuristic extraction of profile fields from free-text chat turns.
//!
//! Exactly one field is attempted per call, the first unset one in
//! collection order, so a message can never skip ahead of the prompt
//! sequence. Extraction never fails; unrecognized input leaves the field
//! unset for this turn.

use std::sync::OnceLock;

use regex::Regex;

use super::profile::UserProfile;

/// Canonical state and union-territory names, matched case-insensitively
/// in this order. The canonical casing is what gets stored.
const INDIAN_STATES: [&str; 31] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
];

const CATEGORIES: [&str; 6] = ["General", "SC", "ST", "OBC", "EWS", "Minority"];

fn age_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})\b").expect("valid age pattern"))
}

fn amount_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:,\d+)*(?:\.\d+)?)").expect("valid amount pattern"))
}

/// Fills at most the first unset field of `profile` from `message`.
pub fn extract_profile(message: &str, profile: &mut UserProfile) {
    let lowered = message.trim().to_lowercase();

    if profile.age.is_none() {
        if let Some(caps) = age_token().captures(message) {
            if let Ok(age) = caps[1].parse::<u32>() {
                if (1..=120).contains(&age) {
                    profile.age = Some(age);
                }
            }
        }
    } else if profile.income.is_none() {
        if let Some(caps) = amount_token().captures(&lowered) {
            if let Ok(amount) = caps[1].replace(',', "").parse::<f64>() {
                // Unit suffixes are detected anywhere in the message, not
                // just next to the number; "family" therefore trips the
                // lakh branch via its letter "l".
                let scaled = if lowered.contains("lakh") || lowered.contains('l') {
                    amount * 100_000.0
                } else if lowered.contains('k') || lowered.contains("thousand") {
                    amount * 1_000.0
                } else {
                    amount
                };
                profile.income = Some(scaled as u64);
            }
        }
    } else if profile.state.is_none() {
        for state in INDIAN_STATES {
            if lowered.contains(&state.to_lowercase()) {
                profile.state = Some(state.to_string());
                break;
            }
        }
    } else if profile.category.is_none() {
        for category in CATEGORIES {
            if lowered.contains(&category.to_lowercase()) {
                profile.category = Some(category.to_string());
                break;
            }
        }
    }
}
