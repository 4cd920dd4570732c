#![allow(warnings)]
//! Notes Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod format;
mod forms;
mod hooks;
mod models;
mod pages;
mod queries;
mod session;
mod store;
mod toast;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    wasm_logger::init(wasm_logger::Config::new(level));
    mount_to_body(App);
}
