use crate::state::ClientState;
use crate::types::Category;
use crate::views::shared::{Api, format_message_timestamp};
use dioxus::events::Key;
use dioxus::prelude::*;

const SCROLL_TO_BOTTOM: &str =
    "const list = document.getElementById('messages'); if (list) { list.scrollTop = list.scrollHeight; }";

fn send_prompt(mut state: Signal<ClientState>, api: Api) {
    let Some(pending) = state.with_mut(|s| s.begin_send()) else {
        return;
    };
    spawn(async move {
        let result = api.0.chat(pending.token.as_deref(), &pending.request).await;
        state.with_mut(|s| s.finish_send(result));
    });
}

#[component]
pub fn ChatView(state: Signal<ClientState>, health_label: String) -> Element {
    let mut state = state;
    let api = use_context::<Api>();
    let message_count = use_memo(move || state.read().chat.transcript.len());

    use_effect(move || {
        if message_count() > 0 {
            let _ = document::eval(SCROLL_TO_BOTTOM);
        }
    });

    let snapshot = state.read();
    let role_label = snapshot.role_label().to_string();
    let flag_visible = snapshot.flag_visible();
    let options = snapshot.selector.options();
    let selected = snapshot.selector.selected();
    let messages = snapshot.chat.transcript.clone();
    let prompt = snapshot.chat.prompt.clone();
    let sending = snapshot.chat.sending;
    let show_context = snapshot.chat.show_context();
    let context_visible = snapshot.chat.context_visible();
    let context = snapshot.chat.context().to_vec();
    drop(snapshot);

    let on_send_click = {
        let api = api.clone();
        move |_| send_prompt(state, api.clone())
    };
    let on_prompt_key = move |ev: KeyboardEvent| {
        if ev.key() == Key::Enter {
            ev.prevent_default();
            send_prompt(state, api.clone());
        }
    };

    rsx! {
        div { class: "hstack",
            h2 { "Chat" }
            span { class: "role-label", "{role_label}" }
            div { class: "spacer" }
            span { class: "health", "{health_label}" }
            button {
                class: if flag_visible { "btn" } else { "btn hidden" },
                r#type: "button",
                onclick: move |_| state.with_mut(|s| s.open_flag_dialog()),
                "Flag document"
            }
            button {
                class: "btn", r#type: "button",
                onclick: move |_| state.with_mut(|s| s.logout()),
                "Logout"
            }
        }

        div { class: "field",
            label { r#for: "category", "Category" }
            select {
                id: "category",
                value: "{selected}",
                onchange: move |ev| {
                    if let Some(category) = Category::from_label(&ev.value()) {
                        state.with_mut(|s| s.selector.select(category));
                    }
                },
                for (category, enabled) in options {
                    option {
                        value: "{category}",
                        disabled: !enabled,
                        selected: category == selected,
                        "{category}"
                    }
                }
            }
        }

        div { id: "messages", class: "messages",
            for msg in messages.iter() {
                div { class: format_args!("msg {}", msg.role.as_str()),
                    if let Some(ts) = format_message_timestamp(msg.created_at) {
                        span { class: "message-timestamp", "{ts}" }
                    }
                    b { "{msg.role.as_str()}" }
                    ": {msg.content}"
                }
            }
        }

        div { class: "hstack",
            input {
                class: "spacer", r#type: "text", placeholder: "Ask a question…",
                value: "{prompt}",
                oninput: move |ev| state.with_mut(|s| s.chat.prompt = ev.value()),
                onkeydown: on_prompt_key,
            }
            button {
                class: "btn btn-primary", r#type: "button",
                disabled: sending,
                onclick: on_send_click,
                "Send"
            }
        }

        label { class: "hstack",
            input {
                r#type: "checkbox",
                checked: show_context,
                onchange: move |_| state.with_mut(|s| s.chat.set_show_context(!show_context)),
            }
            "Show retrieved context"
        }

        div { class: if context_visible { "ctx-box" } else { "ctx-box hidden" },
            for line in context.iter() {
                div {
                    code { "{line.source}" }
                    ": {line.excerpt}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Role;

    #[test]
    fn role_classes_match_stylesheet() {
        for role in [Role::User, Role::Assistant] {
            assert!(crate::theme::APP_CSS.contains(&format!(".msg.{}", role.as_str())));
        }
    }
}
