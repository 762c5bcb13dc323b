/// OpenAI API types for work-item classification
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One assignment in the model's structured response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OracleAssignment {
    /// Work-item identifier (matches the input item id)
    pub id: String,
    /// Free-text justification, diagnostic only
    #[serde(default)]
    pub reasoning: Option<String>,
    /// Claimed project id; validated downstream against the catalog
    #[serde(rename = "projectId", default)]
    pub project_id: Option<String>,
    /// Claimed task id; validated downstream against the catalog
    #[serde(rename = "taskId", default)]
    pub task_id: Option<String>,
}

/// The JSON document the model is asked to produce.
#[derive(Debug, Deserialize)]
pub(crate) struct OracleResponse {
    pub assignments: Vec<OracleAssignment>,
}

/// Internal types for the OpenAI Chat Completions API
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchema>,
}

/// JSON schema wrapper used by OpenAI when `response_format = "json_schema"`.
#[derive(Debug, Serialize)]
pub(crate) struct JsonSchema {
    pub name: String,
    pub schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Response from the OpenAI Chat Completions API
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_assignment_with_nulls() {
        let json = r#"{
            "id": "i1",
            "reasoning": "nothing fits",
            "projectId": null,
            "taskId": null
        }"#;

        let assignment: OracleAssignment = serde_json::from_str(json).expect("should deserialize");

        assert_eq!(assignment.id, "i1");
        assert_eq!(assignment.project_id, None);
        assert_eq!(assignment.task_id, None);
    }

    #[test]
    fn deserializes_full_response() {
        let json = r#"{
            "assignments": [
                {
                    "id": "i1",
                    "reasoning": "meeting language",
                    "projectId": "P1",
                    "taskId": "T1"
                }
            ]
        }"#;

        let response: OracleResponse = serde_json::from_str(json).expect("should deserialize");

        assert_eq!(response.assignments.len(), 1);
        assert_eq!(response.assignments[0].task_id.as_deref(), Some("T1"));
    }

    #[test]
    fn missing_optional_fields_default_to_none() {
        let json = r#"{ "id": "i2" }"#;

        let assignment: OracleAssignment = serde_json::from_str(json).expect("should deserialize");

        assert_eq!(assignment.reasoning, None);
        assert_eq!(assignment.project_id, None);
    }
}
