use rbac_chat::config::AppConfig;

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

#[cfg(target_arch = "wasm32")]
fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    dioxus::logger::init(config.log_level)
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

fn main() {
    let config = AppConfig::global();
    if let Err(err) = init_logging(config) {
        eprintln!("{err}");
    }
    tracing::info!("using API at {}", config.api_base);
    dioxus::launch(rbac_chat::ui::App);
}
