//! Task Commands
//!
//! Tasks, subtasks, assignees and the important-task stars.

use serde_json::Value;
use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::models::{
    AssigneeIds, MarkImportant, NewSubtask, NewTask, Subtask, SubtaskPatch, Task,
    TaskPatch,
};
use taskflow_client::{ApiClient, ApiError, Method};

// ========================
// Task CRUD Commands
// ========================

/// Blank subtasks are dropped before submission
pub async fn create_task(client: &ApiClient, task: NewTask) -> Result<Task, ApiError> {
    client.post(endpoints::TASKS, &task.without_blank_subtasks()).await
}

pub async fn update_task(client: &ApiClient, id: Uuid, patch: &TaskPatch) -> Result<Task, ApiError> {
    client.patch(&endpoints::task(id), patch).await
}

pub async fn delete_task(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::task(id)).await
}

/// Assignee removes themselves
pub async fn leave_task(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.touch(&endpoints::leave_task(id), Method::Post).await
}

// ========================
// Subtask Commands
// ========================

pub async fn add_subtask(client: &ApiClient, task_id: Uuid, subtask: &NewSubtask) -> Result<Subtask, ApiError> {
    client.post(&endpoints::subtasks(task_id), subtask).await
}

pub async fn update_subtask(
    client: &ApiClient,
    task_id: Uuid,
    subtask_id: Uuid,
    patch: &SubtaskPatch,
) -> Result<Value, ApiError> {
    client.patch(&endpoints::subtask(task_id, subtask_id), patch).await
}

pub async fn toggle_subtask(client: &ApiClient, task_id: Uuid, subtask: &Subtask) -> Result<Value, ApiError> {
    let patch = SubtaskPatch {
        is_completed: Some(!subtask.is_completed),
        ..Default::default()
    };
    update_subtask(client, task_id, subtask.id, &patch).await
}

pub async fn delete_subtask(client: &ApiClient, task_id: Uuid, subtask_id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::subtask(task_id, subtask_id)).await
}

// ========================
// Assignee Commands
// ========================

pub async fn add_assignees(client: &ApiClient, task_id: Uuid, ids: Vec<Uuid>) -> Result<Value, ApiError> {
    client
        .patch(&endpoints::task_assignees(task_id), &AssigneeIds { assignee_ids: ids })
        .await
}

pub async fn remove_assignee(client: &ApiClient, task_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::task_assignee(task_id, user_id)).await
}

// ========================
// Important Tasks
// ========================

pub async fn mark_important(client: &ApiClient, task_id: Uuid) -> Result<Value, ApiError> {
    client
        .post(endpoints::IMPORTANT_TASKS, &MarkImportant { task_id })
        .await
}

pub async fn unmark_important(client: &ApiClient, mark_id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::important_task(mark_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskflow_client::models::{TaskPriority, TaskStatus};
    use taskflow_client::testing::{authed_client, MockTransport};
    use taskflow_client::RequestBody;

    const TASK_ID: &str = "6c1d3c1e-9a4f-4d43-9d2e-1f1c1b7a0a01";

    fn sent_json(transport: &MockTransport, index: usize) -> Value {
        match &transport.requests()[index].body {
            Some(RequestBody::Json(value)) => value.clone(),
            other => panic!("expected a JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_task_drops_blank_subtasks() {
        let transport = MockTransport::new();
        transport.respond(201, json!({"id": TASK_ID, "title": "Ship it"}));
        let client = authed_client(&transport, "t");

        let new_task = NewTask {
            title: "Ship it".into(),
            description: String::new(),
            due_date: None,
            due_time: None,
            priority: TaskPriority::High,
            status: TaskStatus::ToDo,
            project_id: None,
            assignees_ids: vec![],
            subtasks_data: vec![
                NewSubtask { text: "write".into(), assignee_id: None },
                NewSubtask { text: "   ".into(), assignee_id: None },
            ],
        };
        let created = create_task(&client, new_task).await.unwrap();
        assert_eq!(created.title, "Ship it");

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "http://test.local/api/tasks/");
        assert_eq!(sent.method, Method::Post);
        let body = sent_json(&transport, 0);
        assert_eq!(body["subtasks_data"].as_array().map(|a| a.len()), Some(1));
        assert_eq!(body["subtasks_data"][0]["text"], "write");
    }

    #[tokio::test]
    async fn test_toggle_subtask_flips_completion() {
        let transport = MockTransport::new();
        transport.respond(200, json!({}));
        let client = authed_client(&transport, "t");
        let task_id = Uuid::parse_str(TASK_ID).unwrap();
        let subtask = Subtask {
            id: Uuid::nil(),
            text: "write".into(),
            is_completed: true,
            assignee: None,
        };

        toggle_subtask(&client, task_id, &subtask).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(
            sent.url,
            format!("http://test.local/api/tasks/{}/subtasks/{}/", TASK_ID, Uuid::nil())
        );
        assert_eq!(sent_json(&transport, 0), json!({"is_completed": false}));
    }

    #[tokio::test]
    async fn test_leave_and_assignee_paths() {
        let transport = MockTransport::new();
        transport.respond(200, json!({}));
        let client = authed_client(&transport, "t");
        let task_id = Uuid::parse_str(TASK_ID).unwrap();
        let user_id = Uuid::nil();

        leave_task(&client, task_id).await.unwrap();
        add_assignees(&client, task_id, vec![user_id]).await.unwrap();
        remove_assignee(&client, task_id, user_id).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, format!("http://test.local/api/tasks/{}/leave/", TASK_ID));
        assert_eq!(sent[1].method, Method::Patch);
        assert_eq!(sent_json(&transport, 1), json!({"assignee_ids": [user_id]}));
        assert_eq!(sent[2].method, Method::Delete);
        assert_eq!(
            sent[2].url,
            format!("http://test.local/api/tasks/{}/assignees/{}/", TASK_ID, user_id)
        );
    }

    #[tokio::test]
    async fn test_important_marks() {
        let transport = MockTransport::new();
        transport.respond(201, json!({}));
        let client = authed_client(&transport, "t");
        let task_id = Uuid::parse_str(TASK_ID).unwrap();

        mark_important(&client, task_id).await.unwrap();
        unmark_important(&client, Uuid::nil()).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://test.local/api/important-tasks/");
        assert_eq!(sent_json(&transport, 0), json!({"task_id": task_id}));
        assert_eq!(sent[1].method, Method::Delete);
        assert_eq!(
            sent[1].url,
            format!("http://test.local/api/important-tasks/{}/", Uuid::nil())
        );
    }
}
