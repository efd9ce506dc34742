#![allow(warnings)]
//! BoltFlow Frontend Entry Point

mod models;
mod commands;
mod context;
mod store;
mod components;
mod app;
mod browser_storage;
mod format;
mod logging;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
