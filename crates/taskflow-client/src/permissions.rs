//! Permission rules evaluated against the cached user

use uuid::Uuid;

use crate::models::{Project, ProjectMember, ProjectRole, Task};

/// What the viewer may do on a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskPermissions {
    pub is_creator: bool,
    pub is_assignee: bool,
}

impl TaskPermissions {
    pub fn for_task(task: &Task, viewer: Option<Uuid>) -> Self {
        let Some(viewer) = viewer else {
            return Self::default();
        };
        Self {
            is_creator: task.creator.as_ref().is_some_and(|c| c.id == viewer),
            is_assignee: task.assignees.iter().any(|a| a.id == viewer),
        }
    }

    /// Edit fields, delete, manage assignees
    pub fn can_edit(&self) -> bool {
        self.is_creator
    }

    pub fn can_leave(&self) -> bool {
        self.is_assignee
    }

    pub fn can_toggle_subtasks(&self) -> bool {
        self.is_creator || self.is_assignee
    }
}

fn creator_id(project: &Project) -> Option<Uuid> {
    project.creator.as_ref().map(|c| c.id)
}

pub fn is_project_creator(project: &Project, viewer: Option<Uuid>) -> bool {
    viewer.is_some() && creator_id(project) == viewer
}

pub fn is_project_admin(project: &Project, viewer: Option<Uuid>) -> bool {
    viewer
        .and_then(|id| project.member(id))
        .is_some_and(|m| m.role == ProjectRole::Admin)
}

/// Creator and admins manage the project; only the creator deletes it
pub fn can_manage_project(project: &Project, viewer: Option<Uuid>) -> bool {
    is_project_creator(project, viewer) || is_project_admin(project, viewer)
}

/// Role dropdown rule: never the creator's row; admins only touch non-admins
pub fn can_change_role(project: &Project, member: &ProjectMember, viewer: Option<Uuid>) -> bool {
    if creator_id(project) == Some(member.user.id) {
        return false;
    }
    is_project_creator(project, viewer)
        || (is_project_admin(project, viewer) && member.role != ProjectRole::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CREATOR: &str = "00000000-0000-4000-8000-000000000001";
    const ADMIN: &str = "00000000-0000-4000-8000-000000000002";
    const MEMBER: &str = "00000000-0000-4000-8000-000000000003";
    const OTHER_ADMIN: &str = "00000000-0000-4000-8000-000000000004";

    fn id(s: &str) -> Option<Uuid> {
        Some(Uuid::parse_str(s).unwrap())
    }

    fn user(id: &str) -> serde_json::Value {
        json!({"id": id, "email": format!("{}@example.com", &id[34..])})
    }

    fn project() -> Project {
        serde_json::from_value(json!({
            "id": "10000000-0000-4000-8000-000000000000",
            "name": "Launch",
            "creator": user(CREATOR),
            "members": [
                {"id": "20000000-0000-4000-8000-000000000001", "user": user(CREATOR), "role": "Admin"},
                {"id": "20000000-0000-4000-8000-000000000002", "user": user(ADMIN), "role": "Admin"},
                {"id": "20000000-0000-4000-8000-000000000003", "user": user(MEMBER), "role": "Member"},
                {"id": "20000000-0000-4000-8000-000000000004", "user": user(OTHER_ADMIN), "role": "Admin"},
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_creator_changes_anyone_but_self() {
        let p = project();
        let viewer = id(CREATOR);
        assert!(!can_change_role(&p, &p.members[0], viewer));
        assert!(can_change_role(&p, &p.members[1], viewer));
        assert!(can_change_role(&p, &p.members[2], viewer));
    }

    #[test]
    fn test_admin_changes_members_only() {
        let p = project();
        let viewer = id(ADMIN);
        assert!(!can_change_role(&p, &p.members[0], viewer));
        assert!(can_change_role(&p, &p.members[2], viewer));
        assert!(!can_change_role(&p, &p.members[3], viewer));
    }

    #[test]
    fn test_member_changes_nothing() {
        let p = project();
        assert!(p.members.iter().all(|m| !can_change_role(&p, m, id(MEMBER))));
        assert!(p.members.iter().all(|m| !can_change_role(&p, m, None)));
        assert!(!can_manage_project(&p, id(MEMBER)));
        assert!(can_manage_project(&p, id(ADMIN)));
    }

    #[test]
    fn test_task_permissions() {
        let task: Task = serde_json::from_value(json!({
            "id": "30000000-0000-4000-8000-000000000000",
            "title": "Ship",
            "creator": user(CREATOR),
            "assignees": [user(MEMBER)],
        }))
        .unwrap();

        let creator = TaskPermissions::for_task(&task, id(CREATOR));
        assert!(creator.can_edit());
        assert!(!creator.can_leave());

        let assignee = TaskPermissions::for_task(&task, id(MEMBER));
        assert!(!assignee.can_edit());
        assert!(assignee.can_leave());
        assert!(assignee.can_toggle_subtasks());

        let stranger = TaskPermissions::for_task(&task, id(ADMIN));
        assert_eq!(stranger, TaskPermissions::default());
        assert_eq!(TaskPermissions::for_task(&task, None), TaskPermissions::default());
    }
}
