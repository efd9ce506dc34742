//! Task Page Component
//!
//! The To Do and Completed pages: heading, count, optional create form and
//! the filtered table.

use leptos::prelude::*;

use crate::components::{TaskForm, TaskTable};
use crate::context::use_app_context;
use crate::format::count_label;
use crate::models::TaskFilter;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskPage(filter: TaskFilter) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let count = Memo::new(move |_| store.tasks().with(|tasks| tasks.iter().filter(|t| filter.matches(t)).count()));

    let (heading, subtitle, noun) = match filter {
        TaskFilter::Completed => ("Completed Tasks", "Celebrate your achievements", "completed task"),
        _ => ("Your Tasks", "Everything still on your plate", "active task"),
    };

    view! {
        <section class="task-page">
            <div class="page-header">
                <div>
                    <h1>{heading}</h1>
                    <p class="subtitle">{subtitle}</p>
                </div>
                <div class="page-count">
                    {move || count_label(count.get(), noun)}
                    <button class="icon-btn" title="Reload tasks" on:click=move |_| ctx.reload()>"↻"</button>
                </div>
            </div>

            {(filter == TaskFilter::Active).then(|| view! { <TaskForm /> })}

            <Show
                when=move || !store.tasks_loading().get()
                fallback=|| view! {
                    <div class="loading-state">
                        <div class="spinner"></div>
                        <p>"Loading tasks..."</p>
                    </div>
                }
            >
                <TaskTable filter=filter />
            </Show>
        </section>
    }
}
