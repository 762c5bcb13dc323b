/// Wire types for the issue tracker's GraphQL API
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct GraphqlRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<SearchData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    pub search: SearchResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    #[serde(default)]
    pub nodes: Vec<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueNode {
    pub number: u64,
    pub title: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "projectItems", default)]
    pub project_items: Option<ProjectItems>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectItems {
    #[serde(default)]
    pub nodes: Vec<ProjectItemNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectItemNode {
    pub project: ProjectTitle,
    /// `fieldValueByName(name: "Status")`; null when the board has no status
    /// column or the item is unstatused.
    #[serde(rename = "status", default)]
    pub status: Option<FieldValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectTitle {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldValue {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_issue_with_memberships() {
        let json = r#"{
            "number": 123,
            "title": "Fix login flow",
            "updatedAt": "2024-01-01T12:00:00Z",
            "projectItems": {
                "nodes": [
                    {
                        "project": { "title": "DevOps" },
                        "status": { "name": "In Progress" }
                    }
                ]
            }
        }"#;

        let issue: IssueNode = serde_json::from_str(json).expect("should deserialize");

        assert_eq!(issue.number, 123);
        let items = issue.project_items.expect("items");
        assert_eq!(items.nodes[0].project.title, "DevOps");
        assert_eq!(items.nodes[0].status.as_ref().unwrap().name.as_deref(), Some("In Progress"));
    }

    #[test]
    fn tolerates_missing_status_and_items() {
        let json = r#"{ "number": 7, "title": "Orphan issue" }"#;

        let issue: IssueNode = serde_json::from_str(json).expect("should deserialize");

        assert!(issue.project_items.is_none());
        assert!(issue.updated_at.is_none());
    }
}
