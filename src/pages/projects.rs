//! Projects Page

use leptos::prelude::*;

use taskflow_client::endpoints;
use taskflow_client::models::{Project, ProjectInput};

use crate::commands::project as commands;
use crate::components::{ErrorBanner, LoadingScreen, Modal};
use crate::context::use_app_context;
use crate::hooks::{spawn_mutation, use_get};
use crate::router::{use_router, Route};
use crate::store::use_app_store;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let router = use_router();
    let projects = use_get::<Vec<Project>>(endpoints::PROJECTS);
    let (creating, set_creating) = signal(false);

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Projects"</h1>
                <button class="btn-primary" on:click=move |_| set_creating.set(true)>"New Project"</button>
            </header>
            {move || {
                if projects.loading() && projects.data().is_none() {
                    return view! { <LoadingScreen message="Loading projects..." /> }.into_any();
                }
                if let Some(err) = projects.error() {
                    return view! { <ErrorBanner message=err.message /> }.into_any();
                }
                let items = projects.data().unwrap_or_default();
                if items.is_empty() {
                    return view! { <p class="empty-state">"No projects yet"</p> }.into_any();
                }
                view! {
                    <div class="project-grid">
                        {items.into_iter().map(|p| {
                            let id = p.id.to_string();
                            let description = p.description.clone().unwrap_or_default();
                            let owner = p.creator.as_ref().map(|c| c.name()).unwrap_or_default();
                            view! {
                                <div class="project-card" on:click=move |_| router.navigate(Route::ProjectDetail(id.clone()))>
                                    <h3>{p.name}</h3>
                                    <p class="muted">{description}</p>
                                    <div class="project-card-footer">
                                        <span>{format!("{} members", p.members.len())}</span>
                                        <span class="muted">{owner}</span>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
            <Show when=move || creating.get()>
                <ProjectForm
                    title="New project"
                    initial=ProjectInput::default()
                    on_close=move |_: ()| set_creating.set(false)
                    on_saved=move |created: Project| {
                        set_creating.set(false);
                        router.navigate(Route::ProjectDetail(created.id.to_string()));
                    }
                />
            </Show>
        </div>
    }
}

/// Create / edit modal. With `project_id` set the project is updated.
#[component]
pub fn ProjectForm(
    #[prop(into)] title: String,
    initial: ProjectInput,
    #[prop(optional)] project_id: Option<uuid::Uuid>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<Project>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let name = RwSignal::new(initial.name);
    let description = RwSignal::new(initial.description);
    let (error, set_error) = signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = ProjectInput {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
        };
        if input.name.is_empty() {
            set_error.set(Some("Project name is required".to_string()));
            return;
        }
        let client = ctx.client();
        let (success, failure) = match project_id {
            Some(_) => ("Project updated", "Failed to update project"),
            None => ("Project created", "Failed to create project"),
        };
        spawn_mutation(
            store,
            Some(success),
            failure,
            async move {
                match project_id {
                    Some(id) => commands::update_project(&client, id, &input).await,
                    None => commands::create_project(&client, &input).await,
                }
            },
            move |saved| on_saved.run(saved),
        );
    };

    view! {
        <Modal title=title on_close=on_close>
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            <form on:submit=on_submit>
                <label>
                    "Name"
                    <input type="text" prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Description"
                    <textarea
                        rows="3"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="form-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn-primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
