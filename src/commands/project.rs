//! Project Commands

use serde_json::Value;
use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::models::{NewMember, Project, ProjectInput, ProjectRole, RolePatch};
use taskflow_client::{ApiClient, ApiError};

pub async fn create_project(client: &ApiClient, input: &ProjectInput) -> Result<Project, ApiError> {
    client.post(endpoints::PROJECTS, input).await
}

pub async fn update_project(client: &ApiClient, id: Uuid, input: &ProjectInput) -> Result<Project, ApiError> {
    client.patch(&endpoints::project(id), input).await
}

pub async fn delete_project(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::project(id)).await
}

/// Members are posted as a batch
pub async fn add_members(client: &ApiClient, project_id: Uuid, members: &[NewMember]) -> Result<Value, ApiError> {
    client.post(&endpoints::project_members(project_id), members).await
}

pub async fn change_member_role(
    client: &ApiClient,
    project_id: Uuid,
    member_id: Uuid,
    role: ProjectRole,
) -> Result<Value, ApiError> {
    client
        .patch(&endpoints::project_member(project_id, member_id), &RolePatch { role })
        .await
}

pub async fn remove_member(client: &ApiClient, project_id: Uuid, member_id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::project_member(project_id, member_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskflow_client::testing::{authed_client, MockTransport};
    use taskflow_client::{Method, RequestBody};

    #[tokio::test]
    async fn test_add_members_posts_array() {
        let transport = MockTransport::new();
        transport.respond(201, json!([]));
        let client = authed_client(&transport, "t");
        let project_id = Uuid::from_u128(5);
        let members = [
            NewMember { member_id: Uuid::from_u128(1), role: ProjectRole::Member },
            NewMember { member_id: Uuid::from_u128(2), role: ProjectRole::Admin },
        ];

        add_members(&client, project_id, &members).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, format!("http://test.local/api/projects/{}/members/", project_id));
        assert_eq!(
            sent.body,
            Some(RequestBody::Json(json!([
                {"member_id": Uuid::from_u128(1), "role": ProjectRole::Member},
                {"member_id": Uuid::from_u128(2), "role": ProjectRole::Admin},
            ])))
        );
    }

    #[tokio::test]
    async fn test_member_role_and_removal() {
        let transport = MockTransport::new();
        transport.respond(200, json!({}));
        let client = authed_client(&transport, "t");
        let project_id = Uuid::from_u128(5);
        let member_id = Uuid::from_u128(9);

        change_member_role(&client, project_id, member_id, ProjectRole::Admin).await.unwrap();
        remove_member(&client, project_id, member_id).await.unwrap();

        let sent = transport.requests();
        let member_url = format!("http://test.local/api/projects/{}/members/{}/", project_id, member_id);
        assert_eq!(sent[0].method, Method::Patch);
        assert_eq!(sent[0].url, member_url);
        assert_eq!(sent[0].body, Some(RequestBody::Json(json!({"role": ProjectRole::Admin}))));
        assert_eq!(sent[1].method, Method::Delete);
        assert_eq!(sent[1].url, member_url);
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces_status() {
        let transport = MockTransport::new();
        transport.respond(403, json!({"detail": "Only admins can delete projects."}));
        let client = authed_client(&transport, "t");

        let err = delete_project(&client, Uuid::from_u128(5)).await.unwrap_err();
        assert_eq!(err.status, Some(403));
    }
}
