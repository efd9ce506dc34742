//! UI Components
//!
//! Reusable Leptos components.

mod database_setup;
mod delete_confirm_button;
mod layout;
mod login_form;
mod priority_selector;
mod profile_form;
mod task_form;
mod task_page;
mod task_row;
mod task_table;
pub mod toast;

pub use database_setup::{DatabaseSetup, LoadingScreen};
pub use delete_confirm_button::DeleteConfirmButton;
pub use layout::Layout;
pub use login_form::LoginForm;
pub use priority_selector::PrioritySelector;
pub use profile_form::ProfileForm;
pub use task_form::TaskForm;
pub use task_page::TaskPage;
pub use task_row::TaskRow;
pub use task_table::TaskTable;
pub use toast::ToastHost;
