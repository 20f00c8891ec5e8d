use clap::Args;
use std::sync::Arc;
use uuid::Uuid;

use scheme_connect::chat::{ChatService, SessionStore, UserProfile};
use scheme_connect::config::SessionConfig;
use scheme_connect::eligibility::{eligible_schemes, EligibilityProfile};
use scheme_connect::error::AppError;
use scheme_connect::notify::{MockNotifier, SchemeNotifier};
use scheme_connect::reply::TemplateReplyGenerator;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: u32,
    /// Annual family income in rupees
    #[arg(long)]
    pub(crate) income: u64,
    /// Home state (e.g. Maharashtra)
    #[arg(long)]
    pub(crate) state: String,
    /// Reservation category (General, SC, ST, OBC, EWS, or Minority)
    #[arg(long)]
    pub(crate) category: String,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Age the scripted applicant reports
    #[arg(long, default_value_t = 20)]
    pub(crate) age: u32,
    /// Annual income the scripted applicant reports
    #[arg(long, default_value_t = 200_000)]
    pub(crate) income: u64,
    /// State the scripted applicant reports
    #[arg(long, default_value = "Maharashtra")]
    pub(crate) state: String,
    /// Category the scripted applicant reports
    #[arg(long, default_value = "General")]
    pub(crate) category: String,
    /// Skip the SMS dispatch portion of the demo
    #[arg(long)]
    pub(crate) skip_sms: bool,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        age,
        income,
        state,
        category,
    } = args;

    if !(1..=120).contains(&age) {
        println!("Profile rejected: age must be between 1 and 120");
        return Ok(());
    }

    let profile = EligibilityProfile {
        age,
        income,
        state,
        category,
    };
    let matches = eligible_schemes(&profile);

    println!(
        "Eligibility check for age {}, income ₹{}, {}, {}",
        profile.age, profile.income, profile.state, profile.category
    );
    if matches.is_empty() {
        println!("No schemes matched this profile.");
        return Ok(());
    }

    println!("{} scheme(s) matched:", matches.len());
    for m in &matches {
        println!("\n- {} ({})", m.scheme.name, m.scheme.id);
        println!("  Why: {}", m.eligibility_reason);
        println!("  Apply: {}", m.scheme.apply_link);
        println!("  Documents: {}", m.scheme.documents.join(", "));
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        age,
        income,
        state,
        category,
        skip_sms,
    } = args;

    let session_config = SessionConfig { timeout_minutes: 30 };
    let store = SessionStore::new(session_config.timeout());
    let service = ChatService::new(store, Arc::new(TemplateReplyGenerator));
    let session_id = Uuid::new_v4().to_string();

    println!("Chat walkthrough (session {session_id})");

    let turns = [
        "Hello, I need help finding scholarships".to_string(),
        format!("I am {age}"),
        income.to_string(),
        state.clone(),
        category.clone(),
    ];

    let mut final_schemes = Vec::new();
    for message in &turns {
        println!("\nuser: {message}");
        let outcome = match service
            .handle_turn(&session_id, &UserProfile::default(), message)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("Turn rejected: {err}");
                return Ok(());
            }
        };
        println!("assistant: {}", outcome.reply);

        if outcome.next_question.is_none() {
            final_schemes = outcome.schemes;
            break;
        }
    }

    if final_schemes.is_empty() {
        println!("\nNo schemes matched the scripted profile.");
        return Ok(());
    }

    println!("\nMatched schemes:");
    for m in &final_schemes {
        println!("- {} | {}", m.scheme.name, m.eligibility_reason);
    }

    if skip_sms {
        return Ok(());
    }

    let first = &final_schemes[0].scheme;
    println!("\nDispatching scheme details over SMS (mock transport)");
    let receipt = MockNotifier.send_scheme_details("9876543210", first).await;
    println!("- {} -> {} [{}]", first.id, receipt.message, receipt.status.label());

    Ok(())
}
