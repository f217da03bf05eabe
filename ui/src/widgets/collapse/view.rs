use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::timing::{self, COLLAPSE_TRANSITION_MS};
use crate::widgets::{is_activation_key, measure_height};

use super::engine::{PanelEngine, PanelPhase, PanelStep};

const COLLAPSE_PANEL_CSS: Asset = asset!("/assets/styling/collapse_panel.css");
const COLLAPSE_PANEL_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/collapse_panel.css"
));

/// Header button plus a content region whose height animates between zero
/// and the natural height of `children`.
///
/// `title` is rendered live. A change of `default_open` after mount moves the
/// panel to the new state as if it had been toggled.
#[component]
pub fn CollapsePanel(
    #[props(into, default)] title: String,
    #[props(default)] default_open: bool,
    children: Element,
) -> Element {
    let mut engine = use_signal(|| PanelEngine::new(default_open));
    let mut content = use_signal(|| Option::<Rc<MountedData>>::None);
    let content_id = use_hook(|| format!("collapse-panel-{}", uuid::Uuid::new_v4().simple()));

    use_effect(use_reactive!(|default_open| {
        if let Some(step) = engine.with_mut(|eng| eng.set_open(default_open)) {
            tracing::debug!(default_open, "collapse panel default-open changed");
            run_transition(step, engine, content);
        }
    }));

    let mut toggle = move || {
        let step = engine.with_mut(|eng| eng.toggle());
        tracing::debug!(
            generation = step.generation,
            opening = step.opening,
            "collapse panel toggled"
        );
        run_transition(step, engine, content);
    };

    let state = engine();
    let modifier = match state.phase() {
        PanelPhase::Expanded | PanelPhase::Expanding => "collapse-panel--open",
        PanelPhase::Collapsed | PanelPhase::Collapsing => "collapse-panel--closed",
    };
    let expanded = state.aria_expanded();
    let hidden = state.aria_hidden();
    let style = state.content_style();

    rsx! {
        document::Link { rel: "stylesheet", href: COLLAPSE_PANEL_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{COLLAPSE_PANEL_CSS_INLINE}" }
        }

        section { class: "collapse-panel {modifier}",
            div {
                class: "collapse-panel__header",
                role: "button",
                tabindex: 0,
                aria_expanded: "{expanded}",
                aria_controls: "{content_id}",
                onclick: move |_| toggle(),
                onkeydown: move |evt| {
                    if is_activation_key(&evt.key().to_string()) {
                        evt.prevent_default();
                        toggle();
                    }
                },
                span { class: "collapse-panel__title", "{title}" }
                span { class: "collapse-panel__indicator", aria_hidden: "true" }
            }

            div {
                id: "{content_id}",
                class: "collapse-panel__content",
                role: "region",
                aria_hidden: "{hidden}",
                style: "{style}",
                ontransitionend: move |evt| {
                    let property = evt.property_name();
                    if engine.with_mut(|eng| eng.transition_end(&property)) {
                        tracing::debug!(
                            generation = engine.peek().generation(),
                            "collapse panel settled on transitionend"
                        );
                    }
                },
                div {
                    class: "collapse-panel__body",
                    onmounted: move |evt| content.set(Some(evt.data())),
                    // Transitions inside the body (nested panels, page
                    // styles) must not reach the container handler.
                    ontransitionend: move |evt| evt.stop_propagation(),
                    {children}
                }
            }
        }
    }
}

/// Drive one toggle to completion. The container is already at its start
/// height when this is called; `transitionend` may settle it earlier than
/// the timer does.
///
/// Closing pins the measured height and waits for it to be painted before
/// writing `0px`; otherwise the browser sees `auto` then `0px` and snaps.
fn run_transition(
    step: PanelStep,
    mut engine: Signal<PanelEngine>,
    content: Signal<Option<Rc<MountedData>>>,
) {
    spawn(async move {
        if step.opening {
            timing::next_frame().await;
            let height = measure_height(content()).await;
            engine.with_mut(|eng| eng.apply_measured(step.generation, height));
        } else {
            let height = measure_height(content()).await;
            engine.with_mut(|eng| eng.apply_measured(step.generation, height));
            timing::after_paint().await;
            engine.with_mut(|eng| eng.collapse_to_zero(step.generation));
        }

        timing::sleep_ms(COLLAPSE_TRANSITION_MS).await;
        engine.with_mut(|eng| eng.settle(step.generation));
    });
}
