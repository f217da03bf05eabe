use dioxus::prelude::*;

use crate::components::LocaleSwitcher;
use crate::t;
use crate::widgets::{CollapsePanel, FeedbackWidget, LikerWidget};

const MAIN_CSS: Asset = asset!("/assets/theme/main.css");

/// One of each widget on a single page.
#[component]
pub fn Showcase() -> Element {
    crate::i18n::init();

    // Subscribe to the shell's language signal (if any) so labels refresh.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "display:none", "{lang_marker}" }
        main { class: "page page-showcase",
            header { class: "page-showcase__header",
                h1 { {t!("showcase-title")} }
                LocaleSwitcher {}
            }
            p { {t!("showcase-intro")} }

            CollapsePanel { title: t!("showcase-panel-title"),
                p { {t!("showcase-panel-body")} }
            }
            CollapsePanel { title: t!("showcase-panel-open-title"), default_open: true,
                p { {t!("showcase-panel-open-body")} }
            }

            div { class: "page-showcase__row",
                LikerWidget {}
                FeedbackWidget {}
            }
        }
    }
}
