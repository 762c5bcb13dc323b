/// OpenAI API client implementing the classification oracle
use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Method;
use serde_json::json;
use timeweave_core::matching::ports::{ClassificationOracle, RawAssignment};
use timeweave_domain::{Result, TimeweaveError};
use tracing::{debug, info, warn};

use crate::http::HttpClient;

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, JsonSchema, OracleResponse,
    ResponseFormat,
};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 4_096;
const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Tracker ids are 24-char lowercase hex; the model occasionally wraps them
/// in extra prose.
static HEX_ID: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"[a-f0-9]{24}").unwrap()
});

/// OpenAI API client for classifying work items against the catalog.
pub struct OpenAiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Use a custom model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a custom API URL (for testing).
    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Build the classification prompt.
    ///
    /// The keyword-routing guidance lives here as instructions to the model;
    /// the matcher stays correct even when the model ignores every line of
    /// it, because catalog validation happens downstream.
    fn build_prompt(&self, catalog_listing: &str, item_listing: &str) -> String {
        format!(
            "You map work items (calendar events and tracked issues) to time-tracking tasks.\n\
             \n\
             Available tasks:\n{catalog_listing}\n\
             \n\
             Work items (one per line, 'id: description'):\n{item_listing}\n\
             \n\
             For every work item select the most appropriate project and task.\n\
             \n\
             Guidelines:\n\
             1. Read the description in context, figure out what the work is about, then pick the matching task.\n\
             2. \"Standup\", \"Sync\", \"Discussion\", \"Call\", \"Retro\", \"Retrospective\", \"Refinement\", \"Sprint\" usually map to a task named \"Meetings\".\n\
             3. \"Update\", \"Upgrade\", \"Deploy\" usually map to a task named \"Deployments\".\n\
             4. \"Research\", \"Analyse\", \"Investigate\" usually map to a task named \"Research\".\n\
             5. Ticket or issue references (e.g. \"#123\") usually map to \"Consultancy\" or \"Support\" tasks.\n\
             6. Otherwise, calendar events lean towards \"Meetings\" and issues lean towards \"Backlog\".\n\
             \n\
             Return one assignment per work item id. \"projectId\" and \"taskId\" MUST be ids from the \
             list above, never names. If no task fits well, return null for both."
        )
    }

    async fn call_api(&self, prompt: String) -> Result<HashMap<String, RawAssignment>> {
        let request_payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are an assistant that maps work items to time-tracking tasks and outputs JSON.".to_string(),
                },
                ChatMessage { role: "user".to_string(), content: prompt },
            ],
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: Some(JsonSchema {
                    name: "work_item_assignments".to_string(),
                    schema: json!({
                        "type": "object",
                        "properties": {
                            "assignments": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "id": { "type": "string" },
                                        "reasoning": { "type": ["string", "null"] },
                                        "projectId": { "type": ["string", "null"] },
                                        "taskId": { "type": ["string", "null"] }
                                    },
                                    "required": ["id", "reasoning", "projectId", "taskId"],
                                    "additionalProperties": false
                                }
                            }
                        },
                        "required": ["assignments"],
                        "additionalProperties": false
                    }),
                    strict: Some(true),
                }),
            },
        };

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_payload);

        let response = self.http_client.send(request_builder).await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received OpenAI API response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => TimeweaveError::Auth(format!("invalid API key ({status})")),
                _ => TimeweaveError::Classification(format!("API error ({status}): {message}")),
            });
        }

        let chat_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            TimeweaveError::Classification(format!("failed to parse response: {e}"))
        })?;

        let choice = chat_response.choices.first().ok_or_else(|| {
            TimeweaveError::Classification("response contained no choices".to_string())
        })?;
        let content = &choice.message.content;
        let oracle_response: OracleResponse = serde_json::from_str(content).map_err(|e| {
            TimeweaveError::Classification(format!(
                "failed to parse assignments: {e}. Content: {content}"
            ))
        })?;

        Ok(oracle_response
            .assignments
            .into_iter()
            .map(|assignment| {
                (
                    assignment.id,
                    RawAssignment {
                        reasoning: assignment.reasoning,
                        project_id: assignment.project_id.map(normalize_id),
                        task_id: assignment.task_id.map(normalize_id),
                    },
                )
            })
            .collect())
    }
}

/// Extract a bare tracker id when the model wrapped it in extra text.
fn normalize_id(value: String) -> String {
    if value.len() > 24 {
        if let Some(found) = HEX_ID.find(&value) {
            warn!(returned = %value, extracted = found.as_str(), "extracted id from oversized value");
            return found.as_str().to_string();
        }
    }
    value
}

#[async_trait]
impl ClassificationOracle for OpenAiClient {
    async fn classify(
        &self,
        catalog_listing: &str,
        item_listing: &str,
    ) -> Result<HashMap<String, RawAssignment>> {
        info!(model = %self.model, "classifying work items with OpenAI");

        let prompt = self.build_prompt(catalog_listing, item_listing);
        let assignments = self.call_api(prompt).await?;

        info!(count = assignments.len(), "OpenAI classification complete");
        Ok(assignments)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(api_url: String) -> OpenAiClient {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("http client");

        OpenAiClient::new("test-api-key".to_string(), http_client).with_api_url(api_url)
    }

    #[tokio::test]
    async fn classifies_items_successfully() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": r#"{
                            "assignments": [{
                                "id": "i1",
                                "reasoning": "standup is a meeting",
                                "projectId": "P1",
                                "taskId": "T1"
                            }]
                        }"#
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(format!("{}/v1/chat/completions", mock_server.uri()));
        let assignments =
            client.classify("Project: DevOps (ID: P1) | Task: Meetings (ID: T1)", "i1: Daily Standup")
                .await
                .expect("should classify");

        assert_eq!(assignments.len(), 1);
        let assignment = &assignments["i1"];
        assert_eq!(assignment.project_id.as_deref(), Some("P1"));
        assert_eq!(assignment.task_id.as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn extracts_ids_from_oversized_values() {
        let mock_server = MockServer::start().await;
        let id = "65f1a2b3c4d5e6f7a8b9c0d1";

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": format!(r#"{{
                            "assignments": [{{
                                "id": "i1",
                                "reasoning": null,
                                "projectId": "the project id is {id}",
                                "taskId": null
                            }}]
                        }}"#)
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(format!("{}/v1/chat/completions", mock_server.uri()));
        let assignments = client.classify("catalog", "i1: Standup").await.expect("should classify");

        assert_eq!(assignments["i1"].project_id.as_deref(), Some(id));
    }

    #[tokio::test]
    async fn auth_failure_maps_to_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let client = test_client(format!("{}/v1/chat/completions", mock_server.uri()));
        let result = client.classify("catalog", "i1: Standup").await;

        assert!(matches!(result, Err(TimeweaveError::Auth(_))));
    }

    #[tokio::test]
    async fn malformed_content_maps_to_classification_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "content": "not valid json"
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(format!("{}/v1/chat/completions", mock_server.uri()));
        let result = client.classify("catalog", "i1: Standup").await;

        assert!(matches!(result, Err(TimeweaveError::Classification(_))));
    }

    #[tokio::test]
    async fn rate_limit_maps_to_classification_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&mock_server)
            .await;

        let client = test_client(format!("{}/v1/chat/completions", mock_server.uri()));
        let result = client.classify("catalog", "i1: Standup").await;

        assert!(matches!(result, Err(TimeweaveError::Classification(_))));
    }

    #[test]
    fn normalize_id_leaves_plain_ids_alone() {
        assert_eq!(normalize_id("P1".to_string()), "P1");
        assert_eq!(
            normalize_id("65f1a2b3c4d5e6f7a8b9c0d1".to_string()),
            "65f1a2b3c4d5e6f7a8b9c0d1"
        );
    }
}
