//! User Commands

use taskflow_client::endpoints;
use taskflow_client::models::{ProfilePatch, User};
use taskflow_client::transport::FilePart;
use taskflow_client::{ApiClient, ApiError, StoredUser};

/// Save name, username and optionally a new avatar, then refresh the cached user
pub async fn update_profile(
    client: &ApiClient,
    patch: ProfilePatch,
    avatar: Option<FilePart>,
) -> Result<StoredUser, ApiError> {
    let user: User = client.patch_form(endpoints::ME, patch.into_form(avatar)).await?;
    let stored = StoredUser::from(&user);
    if let Err(e) = client.session().store_user(&stored) {
        log::warn!("[USER] could not cache profile: {}", e);
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskflow_client::testing::{authed_client, MockTransport};
    use taskflow_client::{Method, MultipartForm, RequestBody};

    fn patch(first: &str, last: &str, username: &str) -> ProfilePatch {
        ProfilePatch {
            first_name: first.into(),
            last_name: last.into(),
            username: username.into(),
        }
    }

    fn sent_form(transport: &MockTransport) -> MultipartForm {
        match &transport.requests()[0].body {
            Some(RequestBody::Multipart(form)) => form.clone(),
            other => panic!("expected a multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_profile_refreshes_cached_user() {
        let transport = MockTransport::new();
        transport.respond(
            200,
            json!({
                "id": "0b6f5a2e-7f5e-4c59-8a43-2d7c0f0e9b11",
                "email": "ada@example.com",
                "username": "countess",
                "first_name": "Augusta",
                "last_name": "King",
            }),
        );
        let client = authed_client(&transport, "t");

        let stored = update_profile(&client, patch(" Augusta ", "King", "countess"), None)
            .await
            .unwrap();
        assert_eq!(stored.name, "Augusta King");

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "http://test.local/user/me/");
        let form = sent_form(&transport);
        assert_eq!(form.field("first_name"), Some("Augusta"));
        assert_eq!(form.field("username"), Some("countess"));
        assert!(form.file.is_none());
        assert_eq!(client.session().cached_user(), Some(stored));
    }

    #[tokio::test]
    async fn test_update_profile_sends_avatar() {
        let transport = MockTransport::new();
        transport.respond(
            200,
            json!({
                "id": "0b6f5a2e-7f5e-4c59-8a43-2d7c0f0e9b11",
                "email": "ada@example.com",
                "avatar": "http://test.local/media/avatars/me.png",
            }),
        );
        let client = authed_client(&transport, "t");
        let avatar = FilePart {
            file_name: "me.png".into(),
            content_type: "image/png".into(),
            bytes: vec![137, 80, 78, 71],
        };

        let stored = update_profile(&client, patch("Ada", "Lovelace", "ada"), Some(avatar))
            .await
            .unwrap();
        assert_eq!(stored.avatar.as_deref(), Some("http://test.local/media/avatars/me.png"));

        let form = sent_form(&transport);
        assert_eq!(form.file_field, "avatar");
        assert_eq!(form.file.map(|f| f.file_name), Some("me.png".to_string()));
    }

    #[tokio::test]
    async fn test_update_profile_failure_keeps_cache() {
        let transport = MockTransport::new();
        transport.respond(400, json!({"username": ["A user with that username already exists."]}));
        let client = authed_client(&transport, "t");
        let before = client.session().cached_user();

        let err = update_profile(&client, patch("Ada", "L", "taken"), None).await.unwrap_err();
        assert_eq!(err.status, Some(400));
        assert_eq!(client.session().cached_user(), before);
    }
}
