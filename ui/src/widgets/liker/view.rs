use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::timing::{self, HEART_ANIMATION_MS, HEART_REMOVAL_GRACE_MS};
use crate::t;
use crate::widgets::measure_bounds;

use super::engine::{marker_origin, LikerEngine};

const LIKER_CSS: Asset = asset!("/assets/styling/liker.css");
const LIKER_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/liker.css"
));

/// Like button. Every click floats a heart up from the button's top edge;
/// the heart removes itself when its animation ends.
#[component]
pub fn LikerWidget(#[props(into, default)] label: String) -> Element {
    crate::i18n::init();

    let mut engine = use_signal(LikerEngine::default);
    let mut anchor_node = use_signal(|| Option::<Rc<MountedData>>::None);
    let mut target_node = use_signal(|| Option::<Rc<MountedData>>::None);

    let label = if label.trim().is_empty() {
        t!("liker-button")
    } else {
        label
    };
    let hearts: Vec<(u64, String)> = engine
        .read()
        .hearts()
        .iter()
        .map(|heart| (heart.id, heart.style()))
        .collect();

    rsx! {
        document::Link { rel: "stylesheet", href: LIKER_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{LIKER_CSS_INLINE}" }
        }

        div {
            class: "liker",
            onmounted: move |evt| anchor_node.set(Some(evt.data())),

            button {
                r#type: "button",
                class: "liker__button",
                onmounted: move |evt| target_node.set(Some(evt.data())),
                onclick: move |_| spawn_heart(engine, anchor_node, target_node),
                span { class: "liker__icon", aria_hidden: "true", "♥" }
                span { class: "liker__label", "{label}" }
            }

            for (id, style) in hearts {
                span {
                    key: "{id}",
                    class: "liker__heart",
                    aria_hidden: "true",
                    style: "{style}",
                    onanimationend: move |_| {
                        engine.with_mut(|eng| eng.finish(id));
                    },
                    "♥"
                }
            }
        }
    }
}

/// Float one heart from the top of `target`. The fallback timer removes it
/// if `animationend` never arrives.
fn spawn_heart(
    mut engine: Signal<LikerEngine>,
    anchor_node: Signal<Option<Rc<MountedData>>>,
    target_node: Signal<Option<Rc<MountedData>>>,
) {
    spawn(async move {
        let target = measure_bounds(target_node()).await;
        let anchor = measure_bounds(anchor_node()).await;
        let origin = marker_origin(target, anchor);
        let id = engine.with_mut(|eng| eng.spawn(origin, &mut rand::thread_rng()));
        tracing::debug!(id, x = origin.x, y = origin.y, "heart spawned");

        timing::sleep_ms(HEART_ANIMATION_MS + HEART_REMOVAL_GRACE_MS).await;
        if engine.with_mut(|eng| eng.finish(id)) {
            tracing::debug!(id, "heart removed without animationend");
        }
    });
}
