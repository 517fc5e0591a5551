//! OpenAI chat-completions oracle
//!
//! Sends the shortlist and preference analysis as a single prompt and expects a
//! JSON object naming one meal back in the first choice's message content.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::{MealOracle, OracleError, OracleRequest, OracleSelection};
use crate::config::OracleConfig;

const SYSTEM_PROMPT: &str = "You are a meal recommendation assistant that picks the single meal a user \
will enjoy most from a pre-scored shortlist. Respond only with valid JSON.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiOracle {
    http_client: HttpClient,
    config: OracleConfig,
}

impl OpenAiOracle {
    pub fn new(config: OracleConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            config,
        }
    }

    /// Renders the user prompt for one request
    fn build_prompt(request: &OracleRequest) -> String {
        format!(
            r#"Based on preference analysis, these are the best meal matches for this user.

USER PROFILE & BUDGET:
- Budget: ${budget}
- {analysis}

{context}
SELECTION GUIDELINES:
1. Meals are pre-scored from the user's history, ingredients, cuisines and dietary patterns
2. A higher compatibility score means a better fit for this user
3. Balance demonstrated preferences with the chance to delight the user
4. Choose exactly one meal from this list: {allowed}

RESPONSE FORMAT (valid JSON only):
{{
    "name": "Exact name from the list above",
    "recommendation_reason": "Short explanation of why this meal suits the user"
}}"#,
            budget = request.budget,
            analysis = request.preference_analysis,
            context = request.meals_context,
            allowed = request.shortlist.join(", "),
        )
    }

    /// Extracts the selection from a chat-completions response body
    fn parse_selection(response: ChatResponse) -> Result<OracleSelection, OracleError> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OracleError::Malformed("response has no message content".to_string()))?;

        serde_json::from_str::<OracleSelection>(content.trim()).map_err(|e| {
            tracing::debug!(raw = %content, "Unparseable oracle content");
            OracleError::Malformed(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl MealOracle for OpenAiOracle {
    async fn select_meal(&self, request: &OracleRequest) -> Result<OracleSelection, OracleError> {
        let prompt = Self::build_prompt(request);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/chat/completions", self.config.api_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                provider = self.name(),
                "Oracle request failed"
            );
            return Err(OracleError::Unavailable(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Malformed(e.to_string()))?;
        let selection = Self::parse_selection(chat)?;

        tracing::info!(
            meal = %selection.name,
            has_reason = selection.recommendation_reason.is_some(),
            provider = self.name(),
            "Oracle selection received"
        );

        Ok(selection)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn create_test_oracle(api_url: String) -> OpenAiOracle {
        OpenAiOracle::new(OracleConfig {
            api_key: "test_key".to_string(),
            api_url,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 600,
            temperature: 0.3,
            timeout: Duration::from_secs(5),
        })
    }

    fn test_request() -> OracleRequest {
        OracleRequest {
            budget: 15.0,
            preference_analysis: "New user with no previous likes".to_string(),
            meals_context: "TOP RECOMMENDED MEALS based on user's preference analysis:\n".to_string(),
            shortlist: vec!["Tacos".to_string(), "Sushi Roll".to_string()],
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    #[tokio::test]
    async fn test_select_meal_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .body_contains("Tacos, Sushi Roll");
                then.status(200).json_body(completion(
                    r#"{"id": 3, "name": "Tacos", "price": 8, "recommendation_reason": "Popular pick"}"#,
                ));
            })
            .await;

        let oracle = create_test_oracle(server.base_url());
        let selection = oracle.select_meal(&test_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(selection.name, "Tacos");
        assert_eq!(selection.recommendation_reason.as_deref(), Some("Popular pick"));
    }

    #[tokio::test]
    async fn test_select_meal_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(500).body("upstream exploded");
            })
            .await;

        let oracle = create_test_oracle(server.base_url());
        let result = oracle.select_meal(&test_request()).await;

        assert!(matches!(result, Err(OracleError::Unavailable(msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_select_meal_non_json_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200)
                    .json_body(completion("I think you would love the Tacos!"));
            })
            .await;

        let oracle = create_test_oracle(server.base_url());
        let result = oracle.select_meal(&test_request()).await;

        assert!(matches!(result, Err(OracleError::Malformed(_))));
    }

    #[test]
    fn test_parse_selection_missing_name() {
        let response: ChatResponse =
            serde_json::from_value(completion(r#"{"recommendation_reason": "Trust me"}"#)).unwrap();
        let result = OpenAiOracle::parse_selection(response);
        assert!(matches!(result, Err(OracleError::Malformed(_))));
    }

    #[test]
    fn test_parse_selection_without_choices() {
        let response: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        let result = OpenAiOracle::parse_selection(response);
        assert!(matches!(result, Err(OracleError::Malformed(_))));
    }

    #[test]
    fn test_prompt_lists_allowed_names() {
        let prompt = OpenAiOracle::build_prompt(&test_request());
        assert!(prompt.contains("- Budget: $15"));
        assert!(prompt.contains("- New user with no previous likes"));
        assert!(prompt.contains("Choose exactly one meal from this list: Tacos, Sushi Roll"));
    }
}
