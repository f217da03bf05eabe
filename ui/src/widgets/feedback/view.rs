use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::timing::{self, FEEDBACK_STAGGER_MS, FEEDBACK_TRANSITION_MS};
use crate::markup::{self, ElementSpec};
use crate::t;
use crate::widgets::measure_height;

use super::engine::{FeedbackEngine, FeedbackSubmission};

const FEEDBACK_CSS: Asset = asset!("/assets/styling/feedback.css");
const FEEDBACK_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/feedback.css"
));

/// Toggle button that slides out a name/email/message form.
#[component]
pub fn FeedbackWidget() -> Element {
    crate::i18n::init();

    let mut engine = use_signal(FeedbackEngine::default);
    let mut inner = use_signal(|| Option::<Rc<MountedData>>::None);
    let fields_html = use_hook(|| match markup::render_all(&field_specs()) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!("feedback fields failed to render: {err}");
            String::new()
        }
    });

    let mut close = move || {
        if let Some(generation) = engine.with_mut(|eng| eng.close()) {
            run_close(generation, engine);
        }
    };

    let state = engine();
    let form_style = state.form_style();
    let form_hidden = state.form_hidden();
    let expanded = state.is_open();
    let revision = state.form_revision();

    rsx! {
        document::Link { rel: "stylesheet", href: FEEDBACK_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{FEEDBACK_CSS_INLINE}" }
        }

        div { class: "feedback",
            button {
                r#type: "button",
                class: state.button_class(),
                hidden: state.button_hidden(),
                aria_expanded: "{expanded}",
                onclick: move |_| {
                    if let Some(generation) = engine.with_mut(|eng| eng.open()) {
                        tracing::debug!(generation, "feedback form opening");
                        run_open(generation, engine, inner);
                    }
                },
                {t!("feedback-toggle")}
            }

            form {
                class: state.form_class(),
                style: "{form_style}",
                aria_hidden: "{form_hidden}",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let values = evt.values();
                    let field = |name: &str| {
                        values
                            .get(name)
                            .map(|value| value.as_value())
                            .unwrap_or_default()
                    };
                    let submission = FeedbackSubmission::new(
                        &field("name"),
                        &field("email"),
                        &field("message"),
                    );
                    if let Some(generation) = engine.with_mut(|eng| eng.submit()) {
                        match submission.to_json() {
                            Ok(json) => tracing::info!(submission = %json, "feedback submitted"),
                            Err(err) => tracing::warn!("feedback submission not serializable: {err}"),
                        }
                        run_close(generation, engine);
                    }
                },

                div {
                    class: "feedback__form-inner",
                    onmounted: move |evt| inner.set(Some(evt.data())),

                    // Keyed so a reset remounts empty fields.
                    for rev in std::iter::once(revision) {
                        div {
                            key: "{rev}",
                            class: "feedback__fields",
                            dangerous_inner_html: "{fields_html}",
                        }
                    }

                    div { class: "feedback__actions",
                        button { r#type: "submit", class: "button button--primary",
                            {t!("feedback-submit")}
                        }
                        button {
                            r#type: "button",
                            class: "button button--ghost feedback__close",
                            onclick: move |_| close(),
                            {t!("feedback-close")}
                        }
                    }
                }
            }

            if state.shows_confirmation() {
                p { class: "feedback__confirmation", role: "status",
                    {t!("feedback-confirmation")}
                }
            }
        }
    }
}

fn field_specs() -> Vec<ElementSpec> {
    vec![
        input_field("name", "text", t!("feedback-name"), "name"),
        input_field("email", "email", t!("feedback-email"), "email"),
        ElementSpec::new("label")
            .class("feedback__field")
            .child(ElementSpec::new("span").class("feedback__label").text(t!("feedback-message")))
            .child(
                ElementSpec::new("textarea")
                    .class("feedback__input")
                    .attr("name", "message")
                    .attr("rows", "4")
                    .attr("required", ""),
            ),
    ]
}

fn input_field(name: &str, kind: &str, label: String, autocomplete: &str) -> ElementSpec {
    ElementSpec::new("label")
        .class("feedback__field")
        .child(ElementSpec::new("span").class("feedback__label").text(label))
        .child(
            ElementSpec::new("input")
                .class("feedback__input")
                .attr("name", name)
                .attr("type", kind)
                .attr("autocomplete", autocomplete)
                .attr("required", ""),
        )
}

fn run_open(
    generation: u64,
    mut engine: Signal<FeedbackEngine>,
    inner: Signal<Option<Rc<MountedData>>>,
) {
    spawn(async move {
        timing::sleep_ms(FEEDBACK_TRANSITION_MS).await;
        if !engine.with_mut(|eng| eng.reveal_form(generation)) {
            return;
        }
        timing::next_frame().await;
        let height = measure_height(inner()).await;
        engine.with_mut(|eng| eng.grow_form(generation, height));
    });
}

fn run_close(generation: u64, mut engine: Signal<FeedbackEngine>) {
    spawn(async move {
        timing::sleep_ms(FEEDBACK_STAGGER_MS).await;
        if !engine.with_mut(|eng| eng.restore_button(generation)) {
            return;
        }
        timing::sleep_ms(FEEDBACK_TRANSITION_MS - FEEDBACK_STAGGER_MS).await;
        engine.with_mut(|eng| eng.finish_close(generation));
    });
}
