//! Notes Page
//!
//! Searchable notes, pinned ones first.

use leptos::prelude::*;

use taskflow_client::endpoints;
use taskflow_client::filters::group_notes;
use taskflow_client::format::format_date;
use taskflow_client::models::{Note, NotePatch};
use taskflow_client::validation::validate_note;

use crate::commands::note as commands;
use crate::components::{DeleteConfirmButton, ErrorBanner, LoadingScreen, Modal};
use crate::context::use_app_context;
use crate::hooks::{spawn_mutation, use_get, UseApi};
use crate::store::use_app_store;

/// Which note the editor modal is open for
#[derive(Debug, Clone, PartialEq)]
enum Editor {
    Closed,
    New,
    Edit(Note),
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let notes = use_get::<Vec<Note>>(endpoints::NOTES);
    let (search, set_search) = signal(String::new());
    let editor = RwSignal::new(Editor::Closed);

    let body = move || {
        if notes.loading() && notes.data().is_none() {
            return view! { <LoadingScreen message="Loading notes..." /> }.into_any();
        }
        if let Some(err) = notes.error() {
            return view! { <ErrorBanner message=err.message /> }.into_any();
        }
        let all = notes.data().unwrap_or_default();
        let query = search.get();
        let groups = group_notes(&all, &query);
        if groups.is_empty() {
            let text = if query.trim().is_empty() { "No notes yet" } else { "No notes match your search" };
            return view! { <p class="empty-state">{text}</p> }.into_any();
        }
        let pinned = groups.pinned.into_iter().cloned().collect::<Vec<_>>();
        let others = groups.others.into_iter().cloned().collect::<Vec<_>>();
        let has_pinned = !pinned.is_empty();
        view! {
            {has_pinned.then(|| view! {
                <h2 class="section-title">"Pinned"</h2>
                <div class="note-grid">
                    {pinned.into_iter().map(|note| view! { <NoteCard note=note notes=notes editor=editor /> }).collect_view()}
                </div>
            })}
            {(has_pinned && !others.is_empty()).then(|| view! { <h2 class="section-title">"Others"</h2> })}
            <div class="note-grid">
                {others.into_iter().map(|note| view! { <NoteCard note=note notes=notes editor=editor /> }).collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="page">
            <header class="page-header">
                <h1>"Notes"</h1>
                <input
                    type="search"
                    placeholder="Search notes..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button class="btn-primary" on:click=move |_| editor.set(Editor::New)>"New Note"</button>
            </header>
            {body}
            {move || match editor.get() {
                Editor::Closed => ().into_any(),
                Editor::New => view! { <NoteEditor note=None notes=notes editor=editor /> }.into_any(),
                Editor::Edit(note) => view! { <NoteEditor note=Some(note) notes=notes editor=editor /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn NoteCard(note: Note, notes: UseApi<Vec<Note>>, editor: RwSignal<Editor>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = note.id;
    let pinned = note.is_pinned;
    let updated = note
        .updated_at
        .or(note.created_at)
        .map(|at| format_date(at.date_naive()))
        .unwrap_or_default();

    let toggle_pin = {
        let note = note.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let client = ctx.client();
            let note = note.clone();
            spawn_mutation(
                store,
                None,
                "Failed to update note",
                async move { commands::toggle_pin(&client, &note).await },
                move |_| notes.refetch(),
            );
        }
    };

    let on_delete = move |_: ()| {
        let client = ctx.client();
        spawn_mutation(
            store,
            Some("Note deleted"),
            "Failed to delete note",
            async move { commands::delete_note(&client, id).await },
            move |_| notes.refetch(),
        );
    };

    let open = note.clone();
    view! {
        <div class="note-card" on:click=move |_| editor.set(Editor::Edit(open.clone()))>
            <div class="note-card-header">
                <h3>{note.title.clone()}</h3>
                <button
                    class={if pinned { "icon-btn pin active" } else { "icon-btn pin" }}
                    title={if pinned { "Unpin" } else { "Pin" }}
                    on:click=toggle_pin
                >
                    "📌"
                </button>
            </div>
            <p class="note-content">{note.content.clone()}</p>
            <div class="note-card-footer">
                <span class="muted">{updated}</span>
                <DeleteConfirmButton button_class="icon-btn" on_confirm=on_delete />
            </div>
        </div>
    }
}

#[component]
fn NoteEditor(note: Option<Note>, notes: UseApi<Vec<Note>>, editor: RwSignal<Editor>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let existing = note.as_ref().map(|n| n.id);
    let title = RwSignal::new(note.as_ref().map(|n| n.title.clone()).unwrap_or_default());
    let content = RwSignal::new(note.map(|n| n.content).unwrap_or_default());
    let (error, set_error) = signal(None::<String>);
    let close = move |_: ()| editor.set(Editor::Closed);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (t, c) = (title.get_untracked(), content.get_untracked());
        if let Err(e) = validate_note(&t, &c) {
            set_error.set(Some(e.to_string()));
            return;
        }
        let client = ctx.client();
        let after = move |_: Note| {
            editor.set(Editor::Closed);
            notes.refetch();
        };
        match existing {
            Some(id) => {
                let patch = NotePatch {
                    title: Some(t.trim().to_string()),
                    content: Some(c.trim().to_string()),
                    ..Default::default()
                };
                spawn_mutation(
                    store,
                    Some("Note updated"),
                    "Failed to update note",
                    async move { commands::update_note(&client, id, &patch).await },
                    after,
                );
            }
            None => spawn_mutation(
                store,
                Some("Note created"),
                "Failed to create note",
                async move { commands::create_note(&client, &t, &c).await },
                after,
            ),
        }
    };

    let heading = if existing.is_some() { "Edit note" } else { "New note" };

    view! {
        <Modal title=heading on_close=close>
            {move || error.get().map(|message| view! { <ErrorBanner message=message /> })}
            <form on:submit=on_submit>
                <label>
                    "Title"
                    <input type="text" prop:value=move || title.get() on:input=move |ev| title.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Content"
                    <textarea
                        rows="8"
                        prop:value=move || content.get()
                        on:input=move |ev| content.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="form-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| close(())>"Cancel"</button>
                    <button type="submit" class="btn-primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
