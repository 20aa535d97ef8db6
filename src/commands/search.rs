//! Search Commands

use taskflow_client::endpoints;
use taskflow_client::models::{SearchResults, User};
use taskflow_client::{ApiClient, ApiError};

/// Shorter queries resolve to nothing without a request
pub const MIN_QUERY_LEN: usize = 2;

pub async fn global_search(client: &ApiClient, query: &str) -> Result<SearchResults, ApiError> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(SearchResults::default());
    }
    client.get(&endpoints::search(query)).await
}

/// Candidates for task assignees or new project members
pub async fn search_assignees(client: &ApiClient, query: &str) -> Result<Vec<User>, ApiError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    client.get(&endpoints::search_assignees(query.trim())).await
}

/// Candidates restricted to a project's members
pub async fn search_project_assignees(client: &ApiClient, project_id: &str, query: &str) -> Result<Vec<User>, ApiError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    client
        .get(&endpoints::search_project_assignees(project_id, query.trim()))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskflow_client::testing::{authed_client, MockTransport};

    #[tokio::test]
    async fn test_short_query_sends_nothing() {
        let transport = MockTransport::new();
        let client = authed_client(&transport, "t");
        let results = global_search(&client, " a ").await.unwrap();
        assert!(results.is_empty());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_global_search_encodes_query() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"projects": [], "tasks": []}));
        let client = authed_client(&transport, "t");
        global_search(&client, "q&a plan").await.unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "http://test.local/api/search/?q=q%26a%20plan"
        );
    }

    #[tokio::test]
    async fn test_assignee_search_scopes() {
        let transport = MockTransport::new();
        transport.respond(200, json!([]));
        transport.respond(200, json!([]));
        let client = authed_client(&transport, "t");

        assert!(search_assignees(&client, "  ").await.unwrap().is_empty());
        search_assignees(&client, "ada").await.unwrap();
        search_project_assignees(&client, "p1", "bob").await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].url, "http://test.local/api/search-assignees/?user=ada");
        assert_eq!(sent[1].url, "http://test.local/api/projects/p1/search-assignees/?member=bob");
    }
}
