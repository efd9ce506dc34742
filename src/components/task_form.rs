//! Task Form Component
//!
//! Collapsible form for creating tasks with a priority selector.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::toast::{toast_error, toast_success};
use crate::components::PrioritySelector;
use crate::context::use_app_context;
use crate::models::{NewTask, Priority};
use crate::store::{store_add_task, use_app_store};

#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (open, set_open) = signal(false);
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (priority, set_priority) = signal(Priority::default());
    let (saving, set_saving) = signal(false);

    let close = move || {
        set_title.set(String::new());
        set_description.set(String::new());
        set_priority.set(Priority::default());
        set_open.set(false);
    };

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get().trim().is_empty() || saving.get() {
            return;
        }
        let new_task = NewTask::new(title.get())
            .with_description(description.get())
            .with_priority(priority.get());

        set_saving.set(true);
        spawn_local(async move {
            match commands::create_task(ctx, new_task).await {
                Ok(task) => {
                    store_add_task(&store, task);
                    toast_success(store, "Task created successfully");
                    close();
                }
                Err(e) => toast_error(store, e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Show
            when=move || open.get()
            fallback=move || view! {
                <button class="add-task-btn" on:click=move |_| set_open.set(true)>
                    "+ Add New Task"
                </button>
            }
        >
            <form class="task-form" on:submit=create_task>
                <div class="task-form-header">
                    <h3>"Create New Task"</h3>
                    <button type="button" class="close-btn" on:click=move |_| close()>"×"</button>
                </div>

                <input
                    type="text"
                    class="task-title-input"
                    placeholder="Task title"
                    required
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <textarea
                    class="task-description-input"
                    placeholder="Task description (optional)"
                    rows="2"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>

                <label class="field-label">"Priority"</label>
                <PrioritySelector current=priority on_change=move |p| set_priority.set(p) />

                <div class="form-actions">
                    <button
                        type="submit"
                        class="primary-btn"
                        disabled=move || saving.get() || title.get().trim().is_empty()
                    >
                        {move || if saving.get() { "Creating..." } else { "Create Task" }}
                    </button>
                    <button type="button" class="secondary-btn" on:click=move |_| close()>"Cancel"</button>
                </div>
            </form>
        </Show>
    }
}
