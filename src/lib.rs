/// Auto Purge Cookies - browser extension that clears cookies on window close
/// Built with Rust + WASM + Yew

mod background;
mod config;
mod cookie;
mod domain;
mod editor;
mod error;
mod host;
mod settings;
mod whitelist;
pub mod ui;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::background::Background;
use crate::config::StorageLayout;
use crate::host::browser::{self, BrowserCookies, BrowserStorage};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the matcher for JavaScript access
#[wasm_bindgen]
pub fn is_domain_whitelisted(domain: &str, entries: Vec<String>) -> bool {
    whitelist::is_whitelisted(domain, &entries)
}

// Wire the purge handler into the background page
#[wasm_bindgen]
pub fn start_background() {
    let layout = StorageLayout::for_target(browser::detect_host());
    log::info!("Starting background with {:?}", layout);

    let background = Rc::new(Background::new(
        BrowserStorage::new(layout.area),
        BrowserCookies,
        layout,
    ));

    // Listeners go in first so no event is missed while the whitelist loads
    {
        let background = Rc::clone(&background);
        browser::on_storage_changed(move |changes, area| {
            background.handle_storage_change(changes, area);
        });
    }

    {
        let background = Rc::clone(&background);
        browser::on_window_removed(move || {
            let background = Rc::clone(&background);
            spawn_local(async move {
                if let Err(e) = background.handle_window_removed().await {
                    log::error!("Purge aborted: {}", e);
                }
            });
        });
    }

    spawn_local(async move {
        if let Err(e) = background.load_whitelist().await {
            log::error!("Failed to load whitelist: {}", e);
        }
    });
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
