use dioxus::logger::tracing::Level;
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
use dioxus::prelude::*;

use ui::core::platform::Platform;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod hosted;

fn log_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Browser build: mount widgets into the host page.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
fn main() {
    // Fails only if a logger is already installed.
    let _ = dioxus::logger::init(log_level());
    tracing::debug!(platform = Platform::current().label(), "mounting into host page");

    match hosted::mount_page() {
        Ok(summary) => tracing::info!(
            panels = summary.panels,
            feedback = summary.feedback,
            likers = summary.likers,
            "pagewidgets mounted"
        ),
        Err(err) => tracing::error!("pagewidgets initialization aborted: {err}"),
    }
}

/// Any other build renders the showcase page through the regular launcher.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
fn main() {
    let _ = dioxus::logger::init(log_level());
    tracing::info!(platform = Platform::current().label(), "starting pagewidgets showcase");
    dioxus::launch(App);
}

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
#[component]
fn App() -> Element {
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        div {
            key: "{lang_code()}",
            ui::views::Showcase {}
        }
    }
}
