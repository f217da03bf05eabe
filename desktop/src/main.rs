#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use std::path::PathBuf;

use dioxus::logger::tracing::Level;
#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::core::platform::Platform;
use ui::views::Showcase;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Shared theme (ui/assets/theme/main.css), embedded so packaged builds need no asset folder.

#[cfg(feature = "desktop")]
fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // Fails only if a logger is already installed.
    let _ = dioxus::logger::init(level);
    tracing::info!(platform = Platform::current().label(), "starting pagewidgets showcase");

    let resource_dir = resolve_resource_dir();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("pagewidgets – v{}", env!("CARGO_PKG_VERSION"))),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Global language signal; the locale switcher writes it and the keyed
    // wrapper below remounts the page so every label is looked up again.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Showcase {}
        }
    }
}

#[cfg(feature = "desktop")]
fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../ui/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}
