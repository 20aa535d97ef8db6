//! Note Commands

use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::models::{Note, NoteInput, NotePatch};
use taskflow_client::{ApiClient, ApiError};

/// Title and content are trimmed before sending
pub async fn create_note(client: &ApiClient, title: &str, content: &str) -> Result<Note, ApiError> {
    let input = NoteInput {
        title: title.trim().to_string(),
        content: content.trim().to_string(),
    };
    client.post(endpoints::NOTES, &input).await
}

pub async fn update_note(client: &ApiClient, id: Uuid, patch: &NotePatch) -> Result<Note, ApiError> {
    client.patch(&endpoints::note(id), patch).await
}

pub async fn toggle_pin(client: &ApiClient, note: &Note) -> Result<Note, ApiError> {
    let patch = NotePatch {
        is_pinned: Some(!note.is_pinned),
        ..Default::default()
    };
    update_note(client, note.id, &patch).await
}

pub async fn delete_note(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::note(id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskflow_client::testing::{authed_client, MockTransport};
    use taskflow_client::{Method, RequestBody};

    #[tokio::test]
    async fn test_create_note_trims() {
        let transport = MockTransport::new();
        transport.respond(201, json!({"id": Uuid::from_u128(1), "title": "Groceries"}));
        let client = authed_client(&transport, "t");

        let note = create_note(&client, "  Groceries ", "\n milk \n").await.unwrap();
        assert_eq!(note.title, "Groceries");

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "http://test.local/api/notes/");
        assert_eq!(
            sent.body,
            Some(RequestBody::Json(json!({"title": "Groceries", "content": "milk"})))
        );
    }

    #[tokio::test]
    async fn test_toggle_pin_sends_only_the_flag() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"id": Uuid::from_u128(3), "title": "a", "is_pinned": true}));
        let client = authed_client(&transport, "t");
        let note: Note = serde_json::from_value(json!({"id": Uuid::from_u128(3), "title": "a"})).unwrap();

        let updated = toggle_pin(&client, &note).await.unwrap();
        assert!(updated.is_pinned);

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, format!("http://test.local/api/notes/{}/", Uuid::from_u128(3)));
        assert_eq!(sent.body, Some(RequestBody::Json(json!({"is_pinned": true}))));
    }
}
