//! Deterministic eligibility evaluation against the scheme catalog.

use serde::{Deserialize, Serialize};

use crate::catalog::{all_schemes, SchemeRecord, ALL};

/// Fully-populated applicant profile used for eligibility decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityProfile {
    pub age: u32,
    pub income: u64,
    pub state: String,
    pub category: String,
}

/// Result of checking one profile against one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Eligible { reason: String },
    Ineligible { reason: String },
}

/// A catalog record paired with the reason the profile qualifies for it.
///
/// The catalog entry itself is never touched; matches are fresh copies so
/// the `eligibilityReason` field only ever exists on the response view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeMatch {
    #[serde(flatten)]
    pub scheme: SchemeRecord,
    #[serde(rename = "eligibilityReason")]
    pub eligibility_reason: String,
}

/// Checks the criteria in fixed order (age, income, category, state) and
/// short-circuits on the first failure so the surfaced reason is always
/// the earliest blocking criterion.
pub fn evaluate(profile: &EligibilityProfile, scheme: &SchemeRecord) -> Verdict {
    let mut reasons = Vec::new();

    if profile.age < scheme.age_min || profile.age > scheme.age_max {
        return Verdict::Ineligible {
            reason: format!(
                "Age must be between {}-{}",
                scheme.age_min, scheme.age_max
            ),
        };
    }
    reasons.push(format!(
        "Age {} is within {}-{} range",
        profile.age, scheme.age_min, scheme.age_max
    ));

    if profile.income > scheme.income_max {
        return Verdict::Ineligible {
            reason: format!(
                "Income must be below ₹{}",
                group_thousands(scheme.income_max)
            ),
        };
    }
    reasons.push(format!(
        "Income ₹{} is below limit",
        group_thousands(profile.income)
    ));

    if scheme.category != ALL && scheme.category != profile.category {
        return Verdict::Ineligible {
            reason: format!("This scheme is for {} category only", scheme.category),
        };
    }
    if scheme.category != ALL {
        reasons.push(format!("{} category matches", profile.category));
    }

    if scheme.state != ALL && scheme.state != profile.state {
        return Verdict::Ineligible {
            reason: format!("This scheme is only for {}", scheme.state),
        };
    }
    if scheme.state != ALL {
        reasons.push(format!("{} state matches", profile.state));
    }

    Verdict::Eligible {
        reason: reasons.join(" • "),
    }
}

/// All schemes the profile qualifies for, in catalog order.
pub fn eligible_schemes(profile: &EligibilityProfile) -> Vec<SchemeMatch> {
    all_schemes()
        .iter()
        .filter_map(|scheme| match evaluate(profile, scheme) {
            Verdict::Eligible { reason } => Some(SchemeMatch {
                scheme: scheme.clone(),
                eligibility_reason: reason,
            }),
            Verdict::Ineligible { .. } => None,
        })
        .collect()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_scheme;

    fn profile(age: u32, income: u64, state: &str, category: &str) -> EligibilityProfile {
        EligibilityProfile {
            age,
            income,
            state: state.to_string(),
            category: category.to_string(),
        }
    }

    fn national_scheme() -> &'static SchemeRecord {
        find_scheme("scheme_1").expect("national scheme present")
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let scheme = national_scheme();
        for age in [scheme.age_min, scheme.age_max] {
            let verdict = evaluate(&profile(age, 100_000, "Kerala", "General"), scheme);
            assert!(matches!(verdict, Verdict::Eligible { .. }), "age {age}");
        }

        let verdict = evaluate(
            &profile(scheme.age_max + 1, 100_000, "Kerala", "General"),
            scheme,
        );
        assert_eq!(
            verdict,
            Verdict::Ineligible {
                reason: "Age must be between 17-25".to_string()
            }
        );
    }

    #[test]
    fn income_ceiling_is_inclusive() {
        let scheme = national_scheme();
        let at_limit = evaluate(
            &profile(20, scheme.income_max, "Kerala", "General"),
            scheme,
        );
        assert!(matches!(at_limit, Verdict::Eligible { .. }));

        let over_limit = evaluate(
            &profile(20, scheme.income_max + 1, "Kerala", "General"),
            scheme,
        );
        assert_eq!(
            over_limit,
            Verdict::Ineligible {
                reason: "Income must be below ₹250,000".to_string()
            }
        );
    }

    #[test]
    fn age_rejection_wins_when_several_criteria_fail() {
        let scheme = national_scheme();
        let verdict = evaluate(&profile(40, 9_000_000, "Kerala", "General"), scheme);
        assert_eq!(
            verdict,
            Verdict::Ineligible {
                reason: "Age must be between 17-25".to_string()
            }
        );
    }

    #[test]
    fn restricted_dimensions_add_clauses_and_all_stays_silent() {
        let restricted = find_scheme("scheme_8").expect("UP minority scheme");
        let verdict = evaluate(
            &profile(20, 150_000, "Uttar Pradesh", "Minority"),
            restricted,
        );
        match verdict {
            Verdict::Eligible { reason } => {
                assert_eq!(
                    reason,
                    "Age 20 is within 14-30 range • Income ₹150,000 is below limit • \
                     Minority category matches • Uttar Pradesh state matches"
                );
            }
            other => panic!("expected eligible, got {other:?}"),
        }

        let open = national_scheme();
        match evaluate(&profile(20, 150_000, "Kerala", "General"), open) {
            Verdict::Eligible { reason } => {
                assert!(!reason.contains("category matches"));
                assert!(!reason.contains("state matches"));
            }
            other => panic!("expected eligible, got {other:?}"),
        }
    }

    #[test]
    fn category_restriction_blocks_other_categories() {
        let obc_scheme = find_scheme("scheme_2").expect("OBC scheme");
        let verdict = evaluate(&profile(20, 100_000, "Kerala", "General"), obc_scheme);
        assert_eq!(
            verdict,
            Verdict::Ineligible {
                reason: "This scheme is for OBC category only".to_string()
            }
        );
    }

    #[test]
    fn state_restriction_blocks_other_states() {
        let maharashtra = find_scheme("scheme_4").expect("Maharashtra scheme");
        let verdict = evaluate(&profile(20, 100_000, "Kerala", "General"), maharashtra);
        assert_eq!(
            verdict,
            Verdict::Ineligible {
                reason: "This scheme is only for Maharashtra".to_string()
            }
        );
    }

    #[test]
    fn evaluate_is_deterministic() {
        let scheme = national_scheme();
        let subject = profile(20, 200_000, "Maharashtra", "General");
        assert_eq!(evaluate(&subject, scheme), evaluate(&subject, scheme));
    }

    #[test]
    fn matches_preserve_catalog_order_with_reasons() {
        let matches = eligible_schemes(&profile(20, 200_000, "Maharashtra", "General"));
        let ids: Vec<&str> = matches.iter().map(|m| m.scheme.id).collect();
        assert_eq!(ids, ["scheme_1", "scheme_4", "scheme_6", "scheme_7"]);
        assert!(matches.iter().all(|m| !m.eligibility_reason.is_empty()));
    }

    #[test]
    fn grouping_matches_report_formatting() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(250_000), "250,000");
        assert_eq!(group_thousands(1_250_000), "1,250,000");
    }
}
