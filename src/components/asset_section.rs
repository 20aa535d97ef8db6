//! Asset Section Component
//!
//! File list of a task or project with upload and delete.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

use taskflow_client::format::format_date;
use taskflow_client::models::Asset;
use taskflow_client::transport::FilePart;
use taskflow_client::validation::validate_upload;
use taskflow_client::RequestSpec;

use crate::commands::asset::{self, AssetOwner};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::hooks::use_api;
use crate::store::{toast_error, toast_success, use_app_store};

/// Read a picked file into memory for the multipart body
pub async fn read_file(file: web_sys::File) -> Result<FilePart, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(FilePart {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[component]
pub fn AssetSection(
    owner: AssetOwner,
    #[prop(into, default = Signal::from(true))] editable: Signal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let assets = use_api::<Vec<Asset>, _>(move || RequestSpec::get(owner.list_path()));
    let file_input = NodeRef::<html::Input>::new();
    let (uploading, set_uploading) = signal(false);
    let (upload_error, set_upload_error) = signal(None::<String>);

    let on_upload = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let picked = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let file = match validate_upload(picked.as_ref()) {
            Ok(file) => file.clone(),
            Err(e) => {
                set_upload_error.set(Some(e.to_string()));
                return;
            }
        };
        set_upload_error.set(None);
        set_uploading.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = match read_file(file).await {
                Ok(part) => asset::upload_asset(&client, owner, part)
                    .await
                    .map_err(|e| e.message),
                Err(e) => Err(e),
            };
            match result {
                Ok(_) => {
                    toast_success(&store, "File uploaded");
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    assets.refetch();
                }
                Err(message) => {
                    log::error!("[ASSET] upload failed: {}", message);
                    toast_error(&store, format!("Upload failed: {}", message));
                }
            }
            set_uploading.set(false);
        });
    };

    let on_delete = move |item: Asset| {
        let client = ctx.client();
        spawn_local(async move {
            match asset::delete_asset(&client, item.id).await {
                Ok(()) => {
                    toast_success(&store, "File deleted");
                    assets.refetch();
                }
                Err(e) => toast_error(&store, format!("Failed to delete file: {}", e)),
            }
        });
    };

    view! {
        <section class="asset-section">
            <h3>"Files"</h3>
            <Show when=move || editable.get()>
                <form class="asset-upload" on:submit=on_upload>
                    <input type="file" node_ref=file_input />
                    <button type="submit" class="btn-primary" disabled=move || uploading.get()>
                        {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                    </button>
                </form>
                {move || upload_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            </Show>
            {move || {
                if assets.loading() && assets.data().is_none() {
                    return view! { <p class="muted">"Loading files..."</p> }.into_any();
                }
                if let Some(err) = assets.error() {
                    return view! { <p class="field-error">{err.message}</p> }.into_any();
                }
                let items = assets.data().unwrap_or_default();
                if items.is_empty() {
                    return view! { <p class="muted">"No files yet"</p> }.into_any();
                }
                view! {
                    <ul class="asset-list">
                        {items.into_iter().map(|item| {
                            let name = item.file_name().to_string();
                            let url = item.file.clone();
                            let meta = item
                                .uploaded_at
                                .map(|at| format_date(at.date_naive()))
                                .unwrap_or_default();
                            let target = item.clone();
                            view! {
                                <li class="asset-item">
                                    <a href=url target="_blank" rel="noopener">{name}</a>
                                    <span class="muted">{meta}</span>
                                    <Show when=move || editable.get()>
                                        <DeleteConfirmButton
                                            button_class="icon-btn"
                                            on_confirm={
                                                let target = target.clone();
                                                move |_: ()| on_delete(target.clone())
                                            }
                                        />
                                    </Show>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any()
            }}
        </section>
    }
}
