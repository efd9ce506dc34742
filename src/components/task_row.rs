//! Task Row Component
//!
//! One task in the table: completion checkbox, status select, inline edit
//! and delete.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::toast::{toast_error, toast_success};
use crate::components::{DeleteConfirmButton, PrioritySelector};
use crate::context::use_app_context;
use crate::format::{format_date, priority_class, priority_icon, status_class, status_icon};
use crate::models::{Status, Task, TaskPatch};
use crate::store::{store_remove_task, store_update_task, use_app_store};

/// Status the row's controls should show once a change settles
fn settled_status(previous: Status, outcome: &Result<Task, String>) -> Status {
    match outcome {
        Ok(task) => task.status,
        Err(_) => previous,
    }
}

#[component]
pub fn TaskRow(task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let id = task.id.clone();
    let completed = task.is_completed();
    let status = task.status;
    let priority = task.priority;

    let (editing, set_editing) = signal(false);
    let (busy, set_busy) = signal(false);
    let (edit_title, set_edit_title) = signal(task.title.clone());
    let (edit_description, set_edit_description) = signal(task.description.clone().unwrap_or_default());
    let (edit_priority, set_edit_priority) = signal(task.priority);

    let original = StoredValue::new(task.clone());
    let checkbox_ref = NodeRef::<html::Input>::new();
    let select_ref = NodeRef::<html::Select>::new();

    // The browser flips a control before the backend answers; put it back
    // to whatever the server confirmed
    let sync_controls = move |shown: Status| {
        if let Some(checkbox) = checkbox_ref.get_untracked() {
            checkbox.set_checked(shown == Status::Completed);
        }
        if let Some(select) = select_ref.get_untracked() {
            select.set_value(shown.as_str());
        }
    };

    let start_edit = move |_| {
        original.with_value(|t| {
            set_edit_title.set(t.title.clone());
            set_edit_description.set(t.description.clone().unwrap_or_default());
            set_edit_priority.set(t.priority);
        });
        set_editing.set(true);
    };

    let id_save = id.clone();
    let save_edit = move |_| {
        let id = id_save.clone();
        let patch = original.with_value(|t| {
            let mut patch = TaskPatch::default();
            if edit_title.get() != t.title {
                patch = patch.title(edit_title.get());
            }
            let description = Some(edit_description.get()).filter(|d| !d.trim().is_empty());
            if description != t.description {
                patch = patch.description(description);
            }
            if edit_priority.get() != t.priority {
                patch = patch.priority(edit_priority.get());
            }
            patch
        });
        if patch.is_empty() {
            set_editing.set(false);
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match commands::update_task(ctx, id, patch).await {
                Ok(updated) => {
                    store_update_task(&store, updated);
                    toast_success(store, "Task updated successfully");
                    set_editing.set(false);
                }
                Err(e) => toast_error(store, e),
            }
            set_busy.set(false);
        });
    };

    let id_toggle = id.clone();
    let toggle = move |_| {
        let id = id_toggle.clone();
        set_busy.set(true);
        spawn_local(async move {
            let outcome = commands::toggle_task(ctx, id).await;
            sync_controls(settled_status(status, &outcome));
            match outcome {
                Ok(updated) => store_update_task(&store, updated),
                Err(e) => toast_error(store, e),
            }
            set_busy.set(false);
        });
    };

    let id_status = id.clone();
    let change_status = move |ev: web_sys::Event| {
        let Ok(next) = event_target_value(&ev).parse::<Status>() else { return };
        if next == status {
            return;
        }
        let id = id_status.clone();
        set_busy.set(true);
        spawn_local(async move {
            let outcome = commands::set_task_status(ctx, id, next).await;
            sync_controls(settled_status(status, &outcome));
            match outcome {
                Ok(updated) => store_update_task(&store, updated),
                Err(e) => toast_error(store, e),
            }
            set_busy.set(false);
        });
    };

    let id_delete = id.clone();
    let delete = Callback::new(move |_: ()| {
        let id = id_delete.clone();
        set_busy.set(true);
        spawn_local(async move {
            match commands::delete_task(ctx, id.clone()).await {
                Ok(()) => {
                    store_remove_task(&store, &id);
                    toast_success(store, "Task deleted successfully");
                }
                Err(e) => {
                    toast_error(store, e);
                    set_busy.set(false);
                }
            }
        });
    });

    let title = task.title.clone();
    let description = task.description.clone();
    let created = format_date(&task.created_at);

    view! {
        <tr class=move || if completed { "task-row completed" } else { "task-row" }>
            <td class="check-col">
                <input
                    type="checkbox"
                    node_ref=checkbox_ref
                    prop:checked=completed
                    disabled=move || busy.get()
                    on:change=toggle
                />
            </td>

            <Show
                when=move || editing.get()
                fallback=move || {
                    let description = description.clone();
                    view! {
                        <td class="task-cell">
                            <h3 class="task-title">{title.clone()}</h3>
                            {description.map(|d| view! { <p class="task-description">{d}</p> })}
                        </td>
                    }
                }
            >
                <td class="task-cell editing">
                    <input
                        type="text"
                        class="task-title-input"
                        prop:value=move || edit_title.get()
                        on:input=move |ev| set_edit_title.set(event_target_value(&ev))
                    />
                    <textarea
                        class="task-description-input"
                        rows="2"
                        placeholder="Task description (optional)"
                        prop:value=move || edit_description.get()
                        on:input=move |ev| set_edit_description.set(event_target_value(&ev))
                    ></textarea>
                    <PrioritySelector current=edit_priority on_change=move |p| set_edit_priority.set(p) />
                </td>
            </Show>

            <td>
                <span class=priority_class(priority)>
                    {priority_icon(priority)} " " {priority.as_str()}
                </span>
            </td>
            <td>
                <select
                    node_ref=select_ref
                    class=status_class(status)
                    disabled=move || busy.get()
                    on:change=change_status
                >
                    {Status::ALL.iter().map(|&option| view! {
                        <option value=option.as_str() selected={option == status}>
                            {status_icon(option)} " " {option.label()}
                        </option>
                    }).collect_view()}
                </select>
            </td>
            <td class="date-cell">{created}</td>
            <td class="actions-col">
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <button class="icon-btn" title="Edit task" disabled=move || busy.get() on:click=start_edit>
                            "✎"
                        </button>
                        <DeleteConfirmButton
                            button_class="icon-btn danger"
                            on_confirm=delete
                            disabled=Signal::derive(move || busy.get())
                        />
                    }
                >
                    <button class="primary-btn small" disabled=move || busy.get() on:click=save_edit.clone()>
                        "Save"
                    </button>
                    <button class="secondary-btn small" on:click=move |_| set_editing.set(false)>
                        "Cancel"
                    </button>
                </Show>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boltflow_core::IdentityId;
    use chrono::Utc;

    use crate::models::{Priority, TaskId};

    fn task(status: Status) -> Task {
        Task {
            id: TaskId("t1".into()),
            title: "Write report".into(),
            description: None,
            priority: Priority::Medium,
            status,
            user_id: IdentityId("u1".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_failed_change_restores_previous_status() {
        let outcome: Result<Task, String> = Err("Failed to update task".into());
        assert_eq!(settled_status(Status::ToDo, &outcome), Status::ToDo);
    }

    #[test]
    fn test_confirmed_change_shows_server_status() {
        let outcome = Ok(task(Status::Completed));
        assert_eq!(settled_status(Status::ToDo, &outcome), Status::Completed);
    }
}
