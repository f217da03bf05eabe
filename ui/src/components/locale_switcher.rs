use dioxus::prelude::*;

use crate::i18n;
use crate::t;

/// Language picker. Writes the selected tag to the `Signal<String>` context
/// when the platform shell provides one, so keyed subtrees re-render.
#[component]
pub fn LocaleSwitcher() -> Element {
    i18n::init();

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();

    if langs().len() < 2 {
        return rsx! {};
    }

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!("language switch to {val} failed: {err}"),
        }
    };

    rsx! {
        div { class: "locale-switcher",
            label { class: "visually-hidden", r#for: "locale-select",
                {t!("showcase-language-label")}
            }
            select {
                id: "locale-select",
                value: "{current_lang()}",
                oninput: on_change,
                for code in langs() {
                    option { key: "{code}", value: "{code}", "{code}" }
                }
            }
        }
    }
}
