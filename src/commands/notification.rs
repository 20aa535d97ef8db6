//! Notification Commands

use futures::future::join_all;
use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::models::Notification;
use taskflow_client::{ApiClient, ApiError, Method};

pub async fn mark_read(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.touch(&endpoints::notification_read(id), Method::Patch).await
}

/// One PATCH per unread item, issued concurrently. Returns the failures.
pub async fn mark_all_read(client: &ApiClient, items: &[Notification]) -> Vec<ApiError> {
    let pending = items
        .iter()
        .filter(|n| !n.is_read)
        .map(|n| mark_read(client, n.id));
    join_all(pending)
        .await
        .into_iter()
        .filter_map(Result::err)
        .collect()
}

pub async fn delete_notification(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::notification_delete(id)).await
}
