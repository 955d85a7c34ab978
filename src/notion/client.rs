//! Notion REST API client.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info};

use crate::outbound::{RemoteError, send_expecting};
use crate::types::{IssueRef, RecordRef};

use super::page::create_page_request;

/// API version pinned on every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Notion answers page creation with 200, not 201.
const PAGE_CREATED: StatusCode = StatusCode::OK;

/// A client bound to one Notion database.
pub struct NotionClient {
    http: reqwest::Client,
    api_base_url: String,
    token: SecretString,
    database_id: String,
}

/// One property of the database schema, as reported by `inspect_database`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DatabaseResponse {
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

impl NotionClient {
    pub fn new(
        http: reqwest::Client,
        api_base_url: impl Into<String>,
        token: SecretString,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            token,
            database_id: database_id.into(),
        }
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Creates a ticket page for the issue and returns a reference to it.
    pub async fn create_record(&self, issue: &IssueRef) -> Result<RecordRef, RemoteError> {
        const OPERATION: &str = "create Notion page";

        info!(
            issue = %issue.number,
            repo = %issue.repo_full_name,
            "Creating Notion ticket"
        );

        let request = self
            .http
            .post(format!("{}/v1/pages", self.api_base_url))
            .bearer_auth(self.token.expose_secret())
            .header("Notion-Version", NOTION_VERSION)
            .json(&create_page_request(&self.database_id, issue));

        let response = send_expecting(request, PAGE_CREATED, OPERATION).await?;
        let page: CreatedPage = response
            .json()
            .await
            .map_err(|e| RemoteError::transport(OPERATION, e))?;
        let id = page
            .id
            .ok_or_else(|| RemoteError::decode(OPERATION, "response has no page id"))?;

        let record = RecordRef::new(id);
        info!(
            page_id = %record.id(),
            url = %record.canonical_url(),
            "Created Notion ticket"
        );
        Ok(record)
    }

    /// Lists the database's properties and their types.
    ///
    /// Debugging aid for checking that the database matches the expected schema.
    /// Ticket creation does not depend on it.
    pub async fn inspect_database(&self) -> Result<Vec<PropertySchema>, RemoteError> {
        const OPERATION: &str = "inspect Notion database";

        let request = self
            .http
            .get(format!(
                "{}/v1/databases/{}",
                self.api_base_url, self.database_id
            ))
            .bearer_auth(self.token.expose_secret())
            .header("Notion-Version", NOTION_VERSION);

        let response = send_expecting(request, StatusCode::OK, OPERATION).await?;
        let database: DatabaseResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::transport(OPERATION, e))?;

        let properties: Vec<PropertySchema> = database
            .properties
            .into_iter()
            .map(|(name, prop)| PropertySchema {
                name,
                kind: prop
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
            })
            .collect();

        for property in &properties {
            debug!(property = %property.name, kind = %property.kind, "Notion database property");
        }

        Ok(properties)
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("api_base_url", &self.api_base_url)
            .field("database_id", &self.database_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueNumber;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client(server: &MockServer) -> NotionClient {
        NotionClient::new(
            reqwest::Client::new(),
            server.uri(),
            SecretString::from("secret_notion"),
            "db-123",
        )
    }

    fn issue() -> IssueRef {
        IssueRef {
            number: IssueNumber(42),
            title: "Test Issue".to_string(),
            body: "This is a test issue description".to_string(),
            url: "https://github.com/user/repo/issues/42".to_string(),
            repo_full_name: "user/repo".to_string(),
        }
    }

    #[tokio::test]
    async fn debug_shows_database_but_not_token() {
        let server = MockServer::start().await;
        let client = client(&server);

        assert_eq!(client.database_id(), "db-123");
        let debug = format!("{client:?}");
        assert!(debug.contains("db-123"));
        assert!(!debug.contains("secret_notion"));
    }

    #[tokio::test]
    async fn create_record_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .and(header("authorization", "Bearer secret_notion"))
            .and(header("notion-version", "2022-06-28"))
            .and(body_partial_json(json!({
                "parent": { "database_id": "db-123" },
                "properties": {
                    "Task name": { "title": [ { "text": { "content": "[#42] Test Issue" } } ] },
                    "Status": { "status": { "name": "Icebox" } }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "test-page-id-123456789",
                "url": "https://www.notion.so/Test-Page-test-page-id-123456789"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = client(&server).create_record(&issue()).await.unwrap();

        assert_eq!(record.id().as_str(), "test-page-id-123456789");
        assert_eq!(record.canonical_url(), "https://notion.so/testpageid123456789");
    }

    #[tokio::test]
    async fn create_record_sends_issue_url_and_repo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "p-1" })))
            .mount(&server)
            .await;

        client(&server).create_record(&issue()).await.unwrap();

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(body.contains("https://github.com/user/repo/issues/42"));
        assert!(body.contains("user/repo"));
    }

    #[tokio::test]
    async fn create_record_rejects_201() {
        // Notion signals success with 200; anything else is treated as failure.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "p-1" })))
            .mount(&server)
            .await;

        let err = client(&server).create_record(&issue()).await.unwrap_err();
        assert_eq!(err.status_code, Some(201));
    }

    #[tokio::test]
    async fn create_record_failure_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Bad request"))
            .mount(&server)
            .await;

        let err = client(&server).create_record(&issue()).await.unwrap_err();

        assert_eq!(err.status_code, Some(400));
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("Bad request"));
    }

    #[tokio::test]
    async fn create_record_without_id_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "page" })))
            .mount(&server)
            .await;

        let err = client(&server).create_record(&issue()).await.unwrap_err();
        assert!(err.to_string().contains("no page id"));
    }

    #[tokio::test]
    async fn inspect_database_lists_properties() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/databases/db-123"))
            .and(header("notion-version", "2022-06-28"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "database",
                "properties": {
                    "Task name": { "id": "title", "type": "title" },
                    "Status": { "id": "a1", "type": "status" }
                }
            })))
            .mount(&server)
            .await;

        let mut properties = client(&server).inspect_database().await.unwrap();
        properties.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            properties,
            vec![
                PropertySchema {
                    name: "Status".to_string(),
                    kind: "status".to_string()
                },
                PropertySchema {
                    name: "Task name".to_string(),
                    kind: "title".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn inspect_database_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/databases/db-123"))
            .respond_with(ResponseTemplate::new(404).set_body_string("object_not_found"))
            .mount(&server)
            .await;

        let err = client(&server).inspect_database().await.unwrap_err();
        assert_eq!(err.status_code, Some(404));
    }
}
