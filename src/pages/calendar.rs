//! Calendar Page
//!
//! Month grid of the user's tasks by due date; clicking a day lists its tasks.

use chrono::{Datelike, Local, NaiveDate};
use leptos::prelude::*;

use taskflow_client::calendar::{
    month_grid, month_label, month_start, next_month, previous_month, same_month, tasks_by_date,
    WEEKDAYS,
};
use taskflow_client::endpoints;
use taskflow_client::format::format_date;
use taskflow_client::models::Task;

use crate::components::{ErrorBanner, Modal, TaskCard};
use crate::hooks::use_get;
use crate::router::{use_router, Route};

/// Titles shown in a day cell before "+N more"
const CELL_PREVIEW: usize = 3;

#[component]
pub fn CalendarPage() -> impl IntoView {
    let router = use_router();
    let tasks = use_get::<Vec<Task>>(endpoints::USER_TASKS);
    let today = Local::now().date_naive();
    let (month, set_month) = signal(month_start(today));
    let (selected_day, set_selected_day) = signal(None::<NaiveDate>);

    let grid = move || {
        let shown = month.get();
        let all = tasks.data().unwrap_or_default();
        let buckets = tasks_by_date(&all);
        month_grid(shown)
            .into_iter()
            .map(|day| {
                let day_tasks: Vec<Task> = buckets
                    .get(&day)
                    .map(|list| list.iter().map(|t| (*t).clone()).collect())
                    .unwrap_or_default();
                let mut class = String::from("calendar-cell");
                if !same_month(day, shown) {
                    class.push_str(" other-month");
                }
                if day == today {
                    class.push_str(" today");
                }
                let extra = day_tasks.len().saturating_sub(CELL_PREVIEW);
                view! {
                    <div class=class on:click=move |_| set_selected_day.set(Some(day))>
                        <span class="calendar-day-number">{day.day()}</span>
                        {day_tasks.into_iter().take(CELL_PREVIEW).map(|t| {
                            let id = t.id.to_string();
                            view! {
                                <button
                                    class={format!("calendar-task {}", t.priority.dot_class())}
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        router.navigate(Route::TaskDetail(id.clone()));
                                    }
                                >
                                    {t.title}
                                </button>
                            }
                        }).collect_view()}
                        {(extra > 0).then(|| view! { <span class="muted">{format!("+{} more", extra)}</span> })}
                    </div>
                }
            })
            .collect_view()
    };

    let day_modal = move || {
        selected_day.get().map(|day| {
            let all = tasks.data().unwrap_or_default();
            let day_tasks: Vec<Task> = all.into_iter().filter(|t| t.due_date == Some(day)).collect();
            let empty = day_tasks.is_empty();
            view! {
                <Modal title=format_date(day) on_close=move |_: ()| set_selected_day.set(None)>
                    {empty.then(|| view! { <p class="muted">"No tasks due this day"</p> })}
                    <div class="task-list">
                        {day_tasks.into_iter().map(|task| view! { <TaskCard task=task /> }).collect_view()}
                    </div>
                </Modal>
            }
        })
    };

    view! {
        <div class="page calendar">
            <header class="page-header">
                <h1>{move || month_label(month.get())}</h1>
                <div class="calendar-nav">
                    <button class="btn-secondary" on:click=move |_| set_month.update(|m| *m = previous_month(*m))>"‹"</button>
                    <button class="btn-secondary" on:click=move |_| set_month.set(month_start(today))>"Today"</button>
                    <button class="btn-secondary" on:click=move |_| set_month.update(|m| *m = next_month(*m))>"›"</button>
                </div>
            </header>
            {move || tasks.error().map(|err| view! { <ErrorBanner message=err.message /> })}
            <div class="calendar-grid">
                {WEEKDAYS.iter().map(|d| view! { <div class="calendar-weekday">{*d}</div> }).collect_view()}
                {grid}
            </div>
            {day_modal}
        </div>
    }
}
