//! The three widgets. Each keeps a pure `engine` next to its Dioxus `view`.

use std::rc::Rc;

use dioxus::prelude::MountedData;

pub mod collapse;
pub mod feedback;
pub mod liker;

pub use collapse::CollapsePanel;
pub use feedback::FeedbackWidget;
pub use liker::LikerWidget;

use liker::Bounds;

/// Keys that activate a `role="button"` element.
pub fn is_activation_key(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "enter" | " " | "space" | "spacebar"
    )
}

/// Rendered height of a mounted node; 0 when unmounted or unmeasurable.
pub(crate) async fn measure_height(node: Option<Rc<MountedData>>) -> f64 {
    measure_bounds(node).await.height
}

pub(crate) async fn measure_bounds(node: Option<Rc<MountedData>>) -> Bounds {
    let Some(node) = node else {
        return Bounds::default();
    };
    match node.get_client_rect().await {
        Ok(rect) => Bounds {
            left: rect.origin.x,
            top: rect.origin.y,
            width: rect.size.width,
            height: rect.size.height,
        },
        Err(err) => {
            tracing::debug!("element measurement failed: {err:?}");
            Bounds::default()
        }
    }
}
