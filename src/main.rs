#![allow(warnings)]
//! Leptodo Frontend Entry Point

mod action;
mod app;
mod components;
mod context;
mod models;
mod reducer;
mod selectors;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
