/// Issue tracker GraphQL client implementing the issue source
use async_trait::async_trait;
use reqwest::Method;
use timeweave_core::sync::ports::IssueSource;
use timeweave_domain::{IssueRecord, ProjectMembership, Result, TimeweaveError};
use tracing::debug;

use crate::http::HttpClient;

use super::types::{GraphqlRequest, GraphqlResponse, IssueNode};

/// Issues per query; assigned open issues rarely exceed this.
const SEARCH_PAGE_SIZE: u32 = 100;

/// Client for the issue tracker's GraphQL endpoint.
pub struct IssueTrackerClient {
    http_client: HttpClient,
    base_url: String,
    token: String,
}

impl IssueTrackerClient {
    pub fn new(
        http_client: HttpClient,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self { http_client, base_url: base_url.into(), token: token.into() }
    }

    fn build_query(&self) -> String {
        format!(
            r#"query {{
  search(query: "is:issue assignee:@me", type: ISSUE, first: {SEARCH_PAGE_SIZE}) {{
    nodes {{
      ... on Issue {{
        number
        title
        updatedAt
        projectItems(first: 10) {{
          nodes {{
            project {{ title }}
            status: fieldValueByName(name: "Status") {{
              ... on ProjectV2ItemFieldSingleSelectValue {{ name }}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#
        )
    }
}

fn to_record(node: IssueNode) -> IssueRecord {
    let memberships = node
        .project_items
        .map(|items| {
            items
                .nodes
                .into_iter()
                .map(|item| ProjectMembership {
                    project_name: item.project.title,
                    status: item.status.and_then(|v| v.name).unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    IssueRecord {
        number: node.number,
        title: node.title,
        updated_at: node.updated_at,
        memberships,
    }
}

#[async_trait]
impl IssueSource for IssueTrackerClient {
    async fn list_assigned_issues(&self) -> Result<Vec<IssueRecord>> {
        let url = format!("{}/graphql", self.base_url);
        let request = self
            .http_client
            .request(Method::POST, &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&GraphqlRequest { query: self.build_query() });

        let response = self.http_client.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => TimeweaveError::Auth(format!("issue tracker auth failed ({status})")),
                _ => TimeweaveError::Network(format!("issue tracker error ({status}): {body}")),
            });
        }

        let parsed: GraphqlResponse = response.json().await.map_err(|e| {
            TimeweaveError::InvalidInput(format!("failed to parse issue response: {e}"))
        })?;

        if let Some(error) = parsed.errors.first() {
            return Err(TimeweaveError::Network(format!(
                "issue tracker query failed: {}",
                error.message
            )));
        }

        let nodes = parsed.data.map(|d| d.search.nodes).unwrap_or_default();
        debug!(count = nodes.len(), "fetched assigned issues");
        Ok(nodes.into_iter().map(to_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn lists_assigned_issues_with_memberships() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("Authorization", "Bearer gh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "search": {
                        "nodes": [
                            {
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
                            },
                            {
                                "number": 7,
                                "title": "Orphan issue",
                                "updatedAt": null,
                                "projectItems": { "nodes": [] }
                            }
                        ]
                    }
                }
            })))
            .mount(&server)
            .await;

        let client =
            IssueTrackerClient::new(HttpClient::new().expect("http client"), server.uri(), "gh-token");
        let issues = client.list_assigned_issues().await.expect("issues");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].number, 123);
        assert_eq!(issues[0].memberships[0].project_name, "DevOps");
        assert_eq!(issues[0].memberships[0].status, "In Progress");
        assert!(issues[1].memberships.is_empty());
    }

    #[tokio::test]
    async fn graphql_errors_surface_as_network_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": null,
                "errors": [{ "message": "rate limited" }]
            })))
            .mount(&server)
            .await;

        let client =
            IssueTrackerClient::new(HttpClient::new().expect("http client"), server.uri(), "t");
        let result = client.list_assigned_issues().await;

        match result {
            Err(TimeweaveError::Network(msg)) => assert!(msg.contains("rate limited")),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bad_token_maps_to_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;

        let client =
            IssueTrackerClient::new(HttpClient::new().expect("http client"), server.uri(), "t");
        let result = client.list_assigned_issues().await;

        assert!(matches!(result, Err(TimeweaveError::Auth(_))));
    }
}
