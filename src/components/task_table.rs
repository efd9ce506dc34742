//! Task Table Component
//!
//! Sortable table of the tasks matching one filter.

use leptos::prelude::*;

use boltflow_core::{filter_tasks, sort_tasks, SortDirection};

use crate::components::TaskRow;
use crate::models::{SortField, TaskFilter};
use crate::store::{use_app_store, AppStateStoreFields};

/// Column header that toggles the shared sort
#[component]
fn SortHeader(field: SortField) -> impl IntoView {
    let store = use_app_store();

    let marker = move || {
        let sort = store.sort().get();
        match (sort.field == field, sort.direction) {
            (true, SortDirection::Asc) => "▲",
            (true, SortDirection::Desc) => "▼",
            (false, _) => "↕",
        }
    };
    let class = move || {
        if store.sort().get().field == field {
            "sort-header active"
        } else {
            "sort-header"
        }
    };

    view! {
        <th>
            <button class=class on:click=move |_| store.sort().update(|s| *s = s.toggle(field))>
                <span>{field.label()}</span>
                <span class="sort-marker">{marker}</span>
            </button>
        </th>
    }
}

#[component]
pub fn TaskTable(filter: TaskFilter) -> impl IntoView {
    let store = use_app_store();

    let rows = Memo::new(move |_| {
        let visible = store.tasks().with(|tasks| filter_tasks(tasks, filter));
        sort_tasks(&visible, store.sort().get())
    });

    view! {
        <Show
            when=move || !rows.with(Vec::is_empty)
            fallback=move || view! {
                <div class="empty-state">
                    {match filter {
                        TaskFilter::Completed => view! {
                            <h3>"No completed tasks yet"</h3>
                            <p>"Complete some tasks to see them here!"</p>
                        }.into_any(),
                        _ => view! {
                            <h3>"No tasks yet"</h3>
                            <p>"Create your first task to get started!"</p>
                        }.into_any(),
                    }}
                </div>
            }
        >
            <div class="task-table-wrap">
                <table class="task-table">
                    <thead>
                        <tr>
                            <th class="check-col"></th>
                            {SortField::ALL.iter().map(|&field| view! { <SortHeader field=field /> }).collect_view()}
                            <th class="actions-col">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|task| (task.id.clone(), task.updated_at)
                            children=move |task| view! { <TaskRow task=task /> }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
