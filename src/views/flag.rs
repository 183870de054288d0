use crate::state::{AUTO_CLOSE_DELAY, ClientState};
use crate::types::SelectedFile;
use crate::views::shared::{Api, StatusText, display_file_name, sleep};
use dioxus::prelude::*;

fn submit_upload(mut state: Signal<ClientState>, api: Api) {
    let Some(pending) = state.with_mut(|s| s.begin_upload()) else {
        return;
    };
    spawn(async move {
        let result = api
            .0
            .flag_document(pending.token.as_deref(), &pending.upload)
            .await;
        let close = state.with_mut(|s| s.finish_upload(pending.generation, result));
        if let Some(generation) = close {
            sleep(AUTO_CLOSE_DELAY).await;
            state.with_mut(|s| s.auto_close_upload(generation));
        }
    });
}

fn pick_file(mut state: Signal<ClientState>, event: FormEvent) {
    let Some(engine) = event.files() else {
        return;
    };
    spawn(async move {
        let picked = match engine.files().into_iter().next() {
            Some(path) => engine.read_file(&path).await.map(|bytes| SelectedFile {
                name: display_file_name(&path),
                bytes,
            }),
            None => None,
        };
        state.with_mut(|s| s.upload.draft.file = picked);
    });
}

#[component]
pub fn FlagDialog(state: Signal<ClientState>) -> Element {
    let mut state = state;
    let api = use_context::<Api>();

    let (open, can_submit, draft, status) = state.with(|s| {
        (
            s.upload.is_open(),
            s.upload.can_submit(),
            s.upload.draft.clone(),
            s.upload.status.clone(),
        )
    });
    if !open {
        return rsx! {};
    }

    let file_label = draft
        .file
        .as_ref()
        .map(|file| format!("{} ({} bytes)", file.name, file.bytes.len()))
        .unwrap_or_default();

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog", aria_modal: "true",
                h3 { "Flag document" }
                div { class: "field",
                    label { "Title" }
                    input {
                        r#type: "text", value: "{draft.title}",
                        oninput: move |ev| state.with_mut(|s| s.upload.draft.title = ev.value()),
                    }
                }
                div { class: "field",
                    label { "Description" }
                    textarea {
                        rows: "3", value: "{draft.description}",
                        oninput: move |ev| state.with_mut(|s| s.upload.draft.description = ev.value()),
                    }
                }
                div { class: "field",
                    label { "Folder" }
                    input {
                        r#type: "text", placeholder: "public / internal / private",
                        value: "{draft.folder}",
                        oninput: move |ev| state.with_mut(|s| s.upload.draft.folder = ev.value()),
                    }
                }
                div { class: "field",
                    label { "File" }
                    input {
                        r#type: "file",
                        onchange: move |ev| pick_file(state, ev),
                    }
                    if !file_label.is_empty() {
                        span { class: "role-label", "{file_label}" }
                    }
                }
                StatusText { status }
                div { class: "hstack",
                    div { class: "spacer" }
                    button {
                        class: "btn", r#type: "button",
                        onclick: move |_| state.with_mut(|s| s.cancel_flag_dialog()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary", r#type: "button",
                        disabled: !can_submit,
                        onclick: move |_| submit_upload(state, api.clone()),
                        "Submit"
                    }
                }
            }
        }
    }
}
