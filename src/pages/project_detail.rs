//! Project Detail Page
//!
//! Project header, its tasks, member roster with role management, and
//! project files.

use leptos::prelude::*;
use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::format::format_date;
use taskflow_client::models::{NewMember, Project, ProjectInput, ProjectRole, Task, User};
use taskflow_client::permissions::{can_change_role, can_manage_project, is_project_creator};
use taskflow_client::RequestSpec;

use crate::commands::asset::AssetOwner;
use crate::commands::project as commands;
use crate::components::{
    AssetSection, Avatar, DeleteConfirmButton, ErrorBanner, LoadingScreen, TaskCard, UserPicker,
};
use crate::context::{use_app_context, use_user};
use crate::hooks::{spawn_mutation, use_api, UseApi};
use crate::pages::projects::ProjectForm;
use crate::router::{use_router, Route};
use crate::store::use_app_store;

#[component]
pub fn ProjectDetailPage(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let user = use_user();
    let router = use_router();
    let path = endpoints::project(&id);
    let project = use_api::<Project, _>(move || RequestSpec::get(path.clone()));
    let (editing, set_editing) = signal(false);

    let can_manage = Signal::derive(move || {
        let viewer = user.user_id();
        project.state.with(|s| s.value.as_ref().is_some_and(|p| can_manage_project(p, viewer)))
    });
    let is_creator = Signal::derive(move || {
        let viewer = user.user_id();
        project.state.with(|s| s.value.as_ref().is_some_and(|p| is_project_creator(p, viewer)))
    });

    let on_delete = move |_: ()| {
        let Some(p) = project.data() else { return };
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Project deleted"),
            "Failed to delete project",
            async move { commands::delete_project(&client, p.id).await },
            move |_| router.replace(Route::Projects),
        );
    };

    view! {
        <div class="page project-detail">
            <button class="btn-link back-link" on:click=move |_| router.navigate(Route::Projects)>"← Back to projects"</button>
            {move || {
                if project.data().is_some() {
                    return ().into_any();
                }
                if let Some(err) = project.error() {
                    return view! { <ErrorBanner message=err.message /> }.into_any();
                }
                view! { <LoadingScreen message="Loading project..." /> }.into_any()
            }}
            {move || project.data().map(|p| {
                let created = p.created_at.map(|at| format!("Created {}", format_date(at.date_naive()))).unwrap_or_default();
                view! {
                    <header class="page-header">
                        <div>
                            <h1>{p.name.clone()}</h1>
                            <p class="muted">{created}</p>
                        </div>
                        <div class="header-actions">
                            <Show when=move || can_manage.get()>
                                <button class="btn-secondary" on:click=move |_| set_editing.set(true)>"Edit"</button>
                            </Show>
                            <Show when=move || is_creator.get()>
                                <DeleteConfirmButton button_class="btn-danger" label="Delete" on_confirm=on_delete />
                            </Show>
                        </div>
                    </header>
                    {p.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! { <p class="project-description">{d}</p> })}
                }
            })}
            <Show when=move || project.state.with(|s| s.value.is_some())>
                {move || {
                    let project_id = project.state.with_untracked(|s| s.value.as_ref().map(|p| p.id));
                    project_id.map(|project_id| view! {
                        <div class="detail-grid">
                            <div class="detail-main">
                                <ProjectTasks project_id=project_id />
                                <AssetSection owner=AssetOwner::Project(project_id) editable=can_manage />
                            </div>
                            <aside class="detail-side">
                                <MemberList project=project project_id=project_id can_manage=can_manage />
                            </aside>
                        </div>
                    })
                }}
            </Show>
            <Show when=move || editing.get()>
                {move || project.data().map(|p| {
                    let initial = ProjectInput {
                        name: p.name.clone(),
                        description: p.description.clone().unwrap_or_default(),
                    };
                    view! {
                    <ProjectForm
                        title="Edit project"
                        initial=initial
                        project_id=p.id
                        on_close=move |_: ()| set_editing.set(false)
                        on_saved=move |_: Project| {
                            set_editing.set(false);
                            project.refetch();
                        }
                    />
                    }
                })}
            </Show>
        </div>
    }
}

#[component]
fn ProjectTasks(project_id: Uuid) -> impl IntoView {
    let tasks = use_api::<Vec<Task>, _>(move || RequestSpec::get(endpoints::project_tasks(project_id)));

    view! {
        <section class="project-tasks">
            <h3>"Tasks"</h3>
            {move || {
                if tasks.loading() && tasks.data().is_none() {
                    return view! { <LoadingScreen message="Loading tasks..." /> }.into_any();
                }
                if let Some(err) = tasks.error() {
                    return view! { <ErrorBanner message=err.message /> }.into_any();
                }
                let items = tasks.data().unwrap_or_default();
                if items.is_empty() {
                    return view! { <p class="empty-state">"No Tasks Yet"</p> }.into_any();
                }
                view! {
                    <div class="task-grid">
                        {items.into_iter().map(|task| view! { <TaskCard task=task /> }).collect_view()}
                    </div>
                }.into_any()
            }}
        </section>
    }
}

#[component]
fn MemberList(project: UseApi<Project>, project_id: Uuid, can_manage: Signal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let user = use_user();
    let (new_role, set_new_role) = signal(ProjectRole::Member);

    let member_user_ids = Signal::derive(move || {
        project
            .data()
            .map(|p| p.members.iter().map(|m| m.user.id).collect::<Vec<_>>())
            .unwrap_or_default()
    });

    let add = move |picked: User| {
        let members = [NewMember {
            member_id: picked.id,
            role: new_role.get_untracked(),
        }];
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Member added"),
            "Failed to add member",
            async move { commands::add_members(&client, project_id, &members).await },
            move |_| project.refetch(),
        );
    };

    let change_role = move |member_id: Uuid, role: ProjectRole| {
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Member role updated successfully"),
            "Failed to update member role",
            async move { commands::change_member_role(&client, project_id, member_id, role).await },
            move |_| project.refetch(),
        );
    };

    let remove = move |member_id: Uuid| {
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Member removed from project"),
            "Failed to remove member",
            async move { commands::remove_member(&client, project_id, member_id).await },
            move |_| project.refetch(),
        );
    };

    view! {
        <section class="member-section">
            <h3>"Project Members"</h3>
            <ul class="member-list">
                {move || {
                    let Some(p) = project.data() else {
                        return ().into_any();
                    };
                    let viewer = user.user_id();
                    let creator_id = p.creator.as_ref().map(|c| c.id);
                    let manage = can_manage.get();
                    p.members.iter().map(|member| {
                        let member_id = member.id;
                        let is_creator_row = creator_id == Some(member.user.id);
                        let editable_role = can_change_role(&p, member, viewer);
                        let role = member.role;
                        let role_view = if editable_role {
                            view! {
                                <select
                                    prop:value=role.label()
                                    on:change=move |ev| {
                                        if let Some(next) = ProjectRole::from_label(&event_target_value(&ev)) {
                                            if next != role {
                                                change_role(member_id, next);
                                            }
                                        }
                                    }
                                >
                                    {ProjectRole::ALL.iter().map(|r| view! { <option value=r.label()>{r.label()}</option> }).collect_view()}
                                </select>
                            }.into_any()
                        } else {
                            view! { <span class=role.badge_class()>{role.label()}</span> }.into_any()
                        };
                        view! {
                            <li class="member-row">
                                <Avatar name=member.user.name() url=member.user.avatar.clone() />
                                <div class="member-info">
                                    <span>
                                        {member.user.name()}
                                        {is_creator_row.then(|| view! { <span class="creator-mark" title="Project Creator">"★"</span> })}
                                    </span>
                                    <span class="muted">{member.user.email.clone()}</span>
                                </div>
                                {role_view}
                                {(manage && editable_role).then(|| view! {
                                    <DeleteConfirmButton button_class="icon-btn" prompt="Remove?" on_confirm=move |_: ()| remove(member_id) />
                                })}
                            </li>
                        }
                    }).collect_view().into_any()
                }}
            </ul>
            <Show when=move || can_manage.get()>
                <div class="add-member">
                    <select
                        prop:value=move || new_role.get().label()
                        on:change=move |ev| {
                            if let Some(role) = ProjectRole::from_label(&event_target_value(&ev)) {
                                set_new_role.set(role);
                            }
                        }
                    >
                        {ProjectRole::ALL.iter().map(|r| view! { <option value=r.label()>{r.label()}</option> }).collect_view()}
                    </select>
                    <UserPicker exclude=member_user_ids placeholder="Add member..." on_select=add />
                </div>
            </Show>
        </section>
    }
}
