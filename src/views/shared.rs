use crate::api::{Backend, HttpBackend};
use crate::config::AppConfig;
use crate::state::StatusLine;
use dioxus::prelude::*;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

/// Backend handle shared through context.
#[derive(Clone)]
pub struct Api(pub Rc<dyn Backend>);

impl Api {
    pub fn from_config(config: &AppConfig) -> Self {
        Self(Rc::new(HttpBackend::from_config(config)))
    }
}

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Local wall-clock time; stays in UTC when the local offset is unknown.
pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

/// Desktop file pickers hand back full paths; the server only wants the name.
pub fn display_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

#[component]
pub fn StatusText(status: StatusLine) -> Element {
    rsx! {
        div { class: "status", style: "{status.tone.style()}", "{status.text}" }
    }
}
