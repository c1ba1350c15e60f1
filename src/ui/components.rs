/// Reusable UI components

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PurgeToggleProps {
    pub enabled: bool,
    pub ontoggle: Callback<MouseEvent>,
    #[prop_or(false)]
    pub disabled: bool,
}

/// Checkbox switch for auto-purge; the label names the action it performs
#[function_component(PurgeToggle)]
pub fn purge_toggle(props: &PurgeToggleProps) -> Html {
    let label = if props.enabled { "Disable" } else { "Enable" };

    html! {
        <label class="pf-v5-c-switch" for="status-toggle">
            <input
                id="status-toggle"
                class="pf-v5-c-switch__input"
                type="checkbox"
                checked={props.enabled}
                disabled={props.disabled}
                onclick={props.ontoggle.clone()}
            />
            <span class="pf-v5-c-switch__toggle"></span>
            <span class="pf-v5-c-switch__label">{label}</span>
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct WhitelistRowProps {
    pub domain: String,
    pub onremove: Callback<String>,
}

#[function_component(WhitelistRow)]
pub fn whitelist_row(props: &WhitelistRowProps) -> Html {
    let onclick = {
        let domain = props.domain.clone();
        let onremove = props.onremove.clone();
        Callback::from(move |_: MouseEvent| onremove.emit(domain.clone()))
    };

    html! {
        <li class="whitelist-row">
            <span class="whitelist-domain">{&props.domain}</span>
            <span class="whitelist-domain-delete-icon remove-domain" title="Remove" {onclick}>
                {"✕"}
            </span>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct InputHintProps {
    pub message: String,
}

/// Inline validation message under the domain input
#[function_component(InputHint)]
pub fn input_hint(props: &InputHintProps) -> Html {
    html! {
        <span id="domain-input-error" class="pf-v5-c-helper-text__item pf-m-error">
            {&props.message}
        </span>
    }
}
