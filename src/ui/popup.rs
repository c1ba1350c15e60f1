/// Popup UI: auto-purge toggle and whitelist editor

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use crate::config::StorageLayout;
use crate::editor::{EditorSnapshot, WhitelistEditor};
use crate::error::EditorError;
use crate::host::browser::{active_tab_url, detect_host, BrowserStorage};
use crate::ui::components::{InputHint, PurgeToggle, WhitelistRow};

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Idle,
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let layout = use_state(|| StorageLayout::for_target(detect_host()));
    let state = use_state(|| PopupState::Loading);
    let snapshot = use_state(EditorSnapshot::default);
    let domain_input = use_state(String::new);
    let input_error = use_state(|| None::<String>);

    // Load stored state and suggest the active tab's domain on mount
    {
        let layout = (*layout).clone();
        let state = state.clone();
        let snapshot = snapshot.clone();
        let domain_input = domain_input.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                reload(&layout, &snapshot, &state).await;

                if let Some(url) = active_tab_url().await {
                    let store = BrowserStorage::new(layout.area);
                    let editor = WhitelistEditor::new(&store, &layout);
                    match editor.suggestion(&url).await {
                        Ok(Some(domain)) => domain_input.set(domain),
                        Ok(None) => {}
                        Err(e) => log::warn!("No suggestion: {}", e),
                    }
                }
            });
            || ()
        });
    }

    // Toggle auto-purge handler
    let on_toggle = {
        let layout = (*layout).clone();
        let state = state.clone();
        let snapshot = snapshot.clone();
        let input_error = input_error.clone();

        Callback::from(move |_: MouseEvent| {
            let layout = layout.clone();
            let state = state.clone();
            let snapshot = snapshot.clone();
            input_error.set(None);

            spawn_local(async move {
                let store = BrowserStorage::new(layout.area);
                if let Err(e) = WhitelistEditor::new(&store, &layout).toggle().await {
                    log::error!("Toggle failed: {}", e);
                    state.set(PopupState::Error(format!("Failed to save: {}", e)));
                    return;
                }
                reload(&layout, &snapshot, &state).await;
            });
        })
    };

    // Add domain(s) handler
    let on_add = {
        let layout = (*layout).clone();
        let state = state.clone();
        let snapshot = snapshot.clone();
        let domain_input = domain_input.clone();
        let input_error = input_error.clone();

        Callback::from(move |_: ()| {
            if !snapshot.enabled {
                return;
            }

            let layout = layout.clone();
            let state = state.clone();
            let snapshot = snapshot.clone();
            let domain_input = domain_input.clone();
            let input_error = input_error.clone();
            let input = (*domain_input).clone();

            spawn_local(async move {
                let store = BrowserStorage::new(layout.area);
                match WhitelistEditor::new(&store, &layout).add(&input).await {
                    Ok(added) => {
                        if !added.is_empty() {
                            domain_input.set(String::new());
                        }
                        reload(&layout, &snapshot, &state).await;
                    }
                    Err(EditorError::Storage(e)) => {
                        log::error!("Add failed: {}", e);
                        state.set(PopupState::Error(format!("Failed to save: {}", e)));
                    }
                    Err(rejected) => input_error.set(Some(rejected.to_string())),
                }
            });
        })
    };

    // Remove domain handler
    let on_remove = {
        let layout = (*layout).clone();
        let state = state.clone();
        let snapshot = snapshot.clone();

        Callback::from(move |domain: String| {
            if !snapshot.enabled {
                return;
            }

            let layout = layout.clone();
            let state = state.clone();
            let snapshot = snapshot.clone();

            spawn_local(async move {
                let store = BrowserStorage::new(layout.area);
                if let Err(e) = WhitelistEditor::new(&store, &layout).remove(&domain).await {
                    log::error!("Remove failed: {}", e);
                    state.set(PopupState::Error(format!("Failed to save: {}", e)));
                    return;
                }
                reload(&layout, &snapshot, &state).await;
            });
        })
    };

    let on_input = {
        let domain_input = domain_input.clone();
        let input_error = input_error.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                domain_input.set(input.value());
            }
            input_error.set(None);
        })
    };

    let on_keypress = {
        let on_add = on_add.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_add.emit(());
            }
        })
    };

    let on_add_click = {
        let on_add = on_add.clone();
        Callback::from(move |_: MouseEvent| on_add.emit(()))
    };

    let is_busy = matches!(*state, PopupState::Loading);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Auto Purge Cookies"}</h1>

            <PurgeToggle enabled={snapshot.enabled} ontoggle={on_toggle} disabled={is_busy} />

            // Status display
            {match &*state {
                PopupState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                PopupState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                PopupState::Idle => html! {}
            }}

            if snapshot.whitelist_visible() {
                <div id="whitelist-container" class="flex-column-gap">
                    <div class="domain-input-row">
                        <input
                            id="domain"
                            class="pf-v5-c-form-control"
                            type="text"
                            placeholder="example.com, other.org"
                            value={(*domain_input).clone()}
                            oninput={on_input}
                            onkeypress={on_keypress}
                        />
                        <Button onclick={on_add_click} disabled={is_busy} variant={ButtonVariant::Primary}>
                            {"Add"}
                        </Button>
                    </div>

                    if let Some(message) = (*input_error).clone() {
                        <InputHint {message} />
                    }

                    if !snapshot.whitelist.is_empty() {
                        <ul id="whitelist" class="whitelist">
                            {for snapshot.whitelist.iter().map(|domain| html! {
                                <WhitelistRow key={domain.clone()} domain={domain.clone()} onremove={on_remove.clone()} />
                            })}
                        </ul>
                    }
                </div>
            }

            <p class="footer-popup">
                {"Auto Purge Cookies v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

/// Re-read toggle and whitelist from storage; the view never shows unsaved state
async fn reload(
    layout: &StorageLayout,
    snapshot: &UseStateHandle<EditorSnapshot>,
    state: &UseStateHandle<PopupState>,
) {
    let store = BrowserStorage::new(layout.area);
    match WhitelistEditor::new(&store, layout).snapshot().await {
        Ok(loaded) => {
            snapshot.set(loaded);
            state.set(PopupState::Idle);
        }
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            state.set(PopupState::Error(format!("Failed to load: {}", e)));
        }
    }
}
