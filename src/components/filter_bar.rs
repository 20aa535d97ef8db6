//! Task Filter Bar Component
//!
//! Tabs, priority/status selects, due toggles and ordering for the task list.
//! Every change writes the shared `TaskFilter` signal, which the list hook tracks.

use leptos::prelude::*;

use taskflow_client::filters::{SortOrder, TaskFilter, TaskTab};
use taskflow_client::models::{TaskPriority, TaskStatus};

#[component]
pub fn FilterBar(filter: RwSignal<TaskFilter>) -> impl IntoView {
    let tabs = TaskTab::ALL
        .iter()
        .copied()
        .map(|tab| {
            view! {
                <button
                    class=move || if filter.with(|f| f.tab == tab) { "tab active" } else { "tab" }
                    on:click=move |_| filter.update(|f| f.tab = tab)
                >
                    {tab.label()}
                </button>
            }
        })
        .collect_view();

    let on_priority = move |ev| {
        let value = event_target_value(&ev);
        filter.update(|f| f.priority = TaskPriority::from_label(&value));
    };
    let on_status = move |ev| {
        let value = event_target_value(&ev);
        filter.update(|f| f.status = TaskStatus::from_label(&value));
    };
    let on_sort = move |ev| {
        let value = event_target_value(&ev);
        filter.update(|f| f.sort = SortOrder::from_label(&value));
    };

    view! {
        <div class="filter-bar">
            <div class="tab-bar">{tabs}</div>
            <div class="filter-controls">
                <select
                    prop:value=move || filter.with(|f| f.priority.map(|p| p.label()).unwrap_or_default())
                    on:change=on_priority
                >
                    <option value="">"All priorities"</option>
                    {TaskPriority::ALL.iter().map(|p| view! { <option value=p.label()>{p.label()}</option> }).collect_view()}
                </select>
                <select
                    prop:value=move || filter.with(|f| f.status.map(|s| s.label()).unwrap_or_default())
                    on:change=on_status
                >
                    <option value="">"All statuses"</option>
                    {TaskStatus::ALL.iter().map(|s| view! { <option value=s.label()>{s.label()}</option> }).collect_view()}
                </select>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || filter.with(|f| f.due_today)
                        on:change=move |ev| filter.update(|f| f.due_today = event_target_checked(&ev))
                    />
                    "Due today"
                </label>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || filter.with(|f| f.overdue)
                        on:change=move |ev| filter.update(|f| f.overdue = event_target_checked(&ev))
                    />
                    "Overdue"
                </label>
                <select prop:value=move || filter.with(|f| f.sort.label()) on:change=on_sort>
                    {SortOrder::ALL.iter().map(|s| view! { <option value=s.label()>{s.label()}</option> }).collect_view()}
                </select>
                <Show when=move || filter.with(|f| f.active_count() > 0)>
                    <button class="btn-link" on:click=move |_| filter.update(|f| f.reset())>
                        {move || format!("Clear filters ({})", filter.with(|f| f.active_count()))}
                    </button>
                </Show>
            </div>
        </div>
    }
}
