use crate::state::{ClientState, View};
use crate::views::shared::{Api, StatusText, sleep};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;
use std::time::Duration;

const FOCUS_DELAY: Duration = Duration::from_millis(100);

fn submit_login(mut state: Signal<ClientState>, api: Api) {
    let Some(credentials) = state.with_mut(|s| s.begin_login()) else {
        return;
    };
    spawn(async move {
        let result = api.0.login(&credentials).await;
        state.with_mut(|s| s.finish_login(result));
    });
}

#[component]
pub fn LoginView(state: Signal<ClientState>) -> Element {
    let mut state = state;
    let api = use_context::<Api>();
    let mut username_field = use_signal(|| Option::<Rc<MountedData>>::None);
    let focus_request = use_memo(move || state.read().login.focus_request);

    use_effect(move || {
        let _ = focus_request();
        spawn(async move {
            sleep(FOCUS_DELAY).await;
            if state.peek().view() != View::Login {
                return;
            }
            let field = username_field.peek().clone();
            if let Some(field) = field {
                let _ = field.set_focus(true).await;
            }
        });
    });

    let (username, password, status, pending) = state.with(|s| {
        (
            s.login.username.clone(),
            s.login.password.clone(),
            s.login.status.clone(),
            s.login.pending,
        )
    });

    let on_click = {
        let api = api.clone();
        move |_| submit_login(state, api.clone())
    };
    let on_username_key = {
        let api = api.clone();
        move |ev: KeyboardEvent| {
            if ev.key() == Key::Enter {
                ev.prevent_default();
                submit_login(state, api.clone());
            }
        }
    };
    let on_password_key = move |ev: KeyboardEvent| {
        if ev.key() == Key::Enter {
            ev.prevent_default();
            submit_login(state, api.clone());
        }
    };

    rsx! {
        h2 { "Sign in" }
        div { class: "field",
            label { r#for: "username", "Username" }
            input {
                id: "username", r#type: "text", autocomplete: "username",
                value: "{username}",
                oninput: move |ev| state.with_mut(|s| s.login.username = ev.value()),
                onkeydown: on_username_key,
                onmounted: move |ev| username_field.set(Some(ev.data())),
            }
        }
        div { class: "field",
            label { r#for: "password", "Password" }
            input {
                id: "password", r#type: "password", autocomplete: "current-password",
                value: "{password}",
                oninput: move |ev| state.with_mut(|s| s.login.password = ev.value()),
                onkeydown: on_password_key,
            }
        }
        button {
            class: "btn btn-primary", r#type: "button",
            disabled: pending,
            onclick: on_click,
            "Login"
        }
        StatusText { status }
    }
}
