use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ReplyError, ReplyGenerator};
use crate::chat::{ChatTurn, Role};
use crate::eligibility::{EligibilityProfile, SchemeMatch};

const GENERATE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEMPERATURE: f32 = 0.3;
const MAX_OUTPUT_TOKENS: u32 = 500;
/// Prior turns forwarded as conversation context.
const HISTORY_CONTEXT_TURNS: usize = 5;
/// Schemes described in the system prompt, to keep it concise.
const PROMPT_SCHEME_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Reply generator backed by the Google Generative Language API.
///
/// A single attempt per turn: any failure is reported as a typed error and
/// the caller substitutes the template reply, so no retry logic lives here.
pub struct GeminiReplyGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiReplyGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("reqwest client builds"),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ReplyGenerator for GeminiReplyGenerator {
    async fn generate(
        &self,
        user_message: &str,
        eligible: &[SchemeMatch],
        _profile: &EligibilityProfile,
        history: &[ChatTurn],
    ) -> Result<String, ReplyError> {
        let mut contents: Vec<Content> = Vec::new();
        let context_start = history.len().saturating_sub(HISTORY_CONTEXT_TURNS);
        for turn in &history[context_start..] {
            contents.push(Content {
                role: Some(match turn.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                }),
                parts: vec![Part {
                    text: turn.content.clone(),
                }],
            });
        }
        contents.push(Content {
            role: Some("user"),
            parts: vec![Part {
                text: user_message.to_string(),
            }],
        });

        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: build_system_prompt(eligible),
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!("{GENERATE_URL}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ReplyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse = response.json().await?;
        debug!(candidates = payload.candidates.len(), "gemini reply received");

        payload
            .candidates
            .first()
            .and_then(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .find_map(|part| part.text.clone())
            })
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ReplyError::EmptyContent)
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn build_system_prompt(eligible: &[SchemeMatch]) -> String {
    let scheme_info = eligible
        .iter()
        .take(PROMPT_SCHEME_LIMIT)
        .map(|m| format!("Scheme: {}\nBenefits: {}", m.scheme.name, m.scheme.benefits))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are SchemeConnect, a helpful assistant for Indian government scholarship schemes.\n\
         \n\
         Your role:\n\
         - Help users understand which schemes they're eligible for\n\
         - Explain scheme benefits clearly and concisely\n\
         - Guide users through the application process\n\
         - Be encouraging and supportive\n\
         \n\
         Important guidelines:\n\
         - ONLY discuss the schemes provided below - do not make up or hallucinate schemes\n\
         - Keep responses conversational and friendly\n\
         - Use simple language suitable for students\n\
         - Be concise (2-3 sentences maximum)\n\
         \n\
         Eligible schemes for this user:\n\
         {scheme_info}\n\
         \n\
         Current context: The user is eligible for {count} scheme(s).\n",
        scheme_info = scheme_info,
        count = eligible.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::all_schemes;

    #[test]
    fn system_prompt_describes_at_most_five_schemes() {
        let matches: Vec<SchemeMatch> = all_schemes()
            .iter()
            .map(|scheme| SchemeMatch {
                scheme: scheme.clone(),
                eligibility_reason: "qualifies".to_string(),
            })
            .collect();

        let prompt = build_system_prompt(&matches);
        assert_eq!(prompt.matches("Scheme: ").count(), 5);
        assert!(prompt.contains("eligible for 10 scheme(s)"));
    }

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: "system".to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let json = serde_json::to_value(&request).expect("serializes");
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(
            json.pointer("/generationConfig/maxOutputTokens"),
            Some(&serde_json::json!(500))
        );
        assert!(json.pointer("/systemInstruction/role").is_none());
    }
}
