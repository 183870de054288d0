/// Color of an inline status message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Error,
    Success,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Neutral => "inherit",
            Tone::Error => "crimson",
            Tone::Success => "green",
        }
    }

    pub fn style(self) -> String {
        format!("color: {};", self.color())
    }
}

pub const APP_CSS: &str = r#"
:root {
    --color-bg-primary: #f6f7f9;
    --color-bg-card: #ffffff;
    --color-text-primary: #111111;
    --color-text-muted: #5f6368;
    --color-border: #d6d9de;
    --color-accent: #1f6feb;
    --color-chat-user-bg: #e8f0fe;
    --color-chat-assistant-bg: #f1f3f4;
    --color-timestamp: #80868b;
}
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
.hidden { display: none !important; }
.card { max-width: 760px; margin: 2rem auto; padding: 1.5rem; background: var(--color-bg-card); border: 1px solid var(--color-border); border-radius: 8px; }
.card h2 { margin-top: 0; }
.field { display: flex; flex-direction: column; gap: 0.25rem; margin-bottom: 0.75rem; }
.field input, .field textarea, .field select { padding: 0.5rem; border: 1px solid var(--color-border); border-radius: 4px; font: inherit; }
.hstack { display: flex; gap: 0.5rem; align-items: center; }
.spacer { flex: 1; }
.btn { padding: 0.5rem 1rem; border: 1px solid var(--color-border); border-radius: 4px; background: transparent; cursor: pointer; font: inherit; }
.btn-primary { background: var(--color-accent); border-color: var(--color-accent); color: #ffffff; }
.btn:disabled { opacity: 0.5; cursor: default; }
.status { min-height: 1.25rem; margin: 0.5rem 0; }
.role-label { color: var(--color-text-muted); }
.health { font-size: 0.8rem; color: var(--color-text-muted); }
.messages { height: 360px; overflow-y: auto; border: 1px solid var(--color-border); border-radius: 4px; padding: 0.5rem; margin: 0.75rem 0; }
.msg { padding: 0.4rem 0.6rem; margin-bottom: 0.4rem; border-radius: 4px; white-space: pre-wrap; }
.msg.user { background: var(--color-chat-user-bg); }
.msg.assistant { background: var(--color-chat-assistant-bg); }
.message-timestamp { float: right; font-size: 0.75rem; color: var(--color-timestamp); }
.ctx-box { border-top: 1px dashed var(--color-border); margin-top: 0.75rem; padding-top: 0.5rem; font-size: 0.9rem; }
.ctx-box code { background: var(--color-chat-assistant-bg); padding: 0 0.25rem; }
.dialog-backdrop { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); display: flex; align-items: center; justify-content: center; }
.dialog { width: min(480px, 92vw); background: var(--color-bg-card); border-radius: 8px; padding: 1.25rem; }
"#;
