use crate::config::AppConfig;
use crate::session::SessionManager;
use crate::state::{ClientState, View};
use crate::storage::platform_store;
use crate::theme::APP_CSS;
use crate::views::shared::Api;
use crate::views::{ChatView, FlagDialog, LoginView};
use dioxus::prelude::*;

fn boot_state() -> ClientState {
    let config = AppConfig::global();
    let session = SessionManager::new(platform_store(), config.storage_key.clone());
    let mut state = ClientState::new(session);
    state.boot();
    state
}

#[component]
pub fn App() -> Element {
    let api = use_context_provider(|| Api::from_config(AppConfig::global()));
    let state = use_signal(boot_state);
    let backend_online = use_signal(|| Option::<bool>::None);

    use_health_check(api, state, backend_online);

    let view = state.read().view();
    let health_label = match backend_online() {
        Some(true) => "API online",
        Some(false) => "API unreachable",
        None => "",
    };

    rsx! {
        style { dangerous_inner_html: "{APP_CSS}" }
        ViewPanel {
            active: view == View::Login,
            children: rsx!( LoginView { state } ),
        }
        ViewPanel {
            active: view == View::Chat,
            children: rsx!( ChatView { state, health_label: health_label.to_string() } ),
        }
        FlagDialog { state }
    }
}

/// Call `/health` once at startup and record whether the API answered.
fn use_health_check(api: Api, state: Signal<ClientState>, backend_online: Signal<Option<bool>>) {
    use_hook(move || {
        let mut control = backend_online;
        let token = state.peek().health_token();
        spawn(async move {
            match api.0.health(token.as_deref()).await {
                Ok(health) => {
                    tracing::info!("API {}: {}", health.status, health.message);
                    control.set(Some(true));
                }
                Err(err) => {
                    tracing::warn!("API health check failed: {}", err);
                    control.set(Some(false));
                }
            }
        });
    });
}

#[component]
fn ViewPanel(active: bool, children: Element) -> Element {
    rsx! {
        div {
            class: if active { "card" } else { "card hidden" },
            aria_hidden: (!active).to_string(),
            {children}
        }
    }
}
