//! Priority Selector Component
//!
//! Button group for picking a task priority.

use leptos::prelude::*;

use crate::format::priority_icon;
use crate::models::Priority;

#[component]
pub fn PrioritySelector(
    current: ReadSignal<Priority>,
    on_change: impl Fn(Priority) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="priority-selector">
            {Priority::ALL.iter().map(|&priority| {
                let is_selected = move || current.get() == priority;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "priority-btn active" } else { "priority-btn" }
                        on:click=move |_| on_change(priority)
                    >
                        {priority_icon(priority)} " " {priority.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
