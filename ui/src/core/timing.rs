//! Transition timing shared by the widgets and their stylesheets.
//!
//! Every duration here has a twin in `assets/styling/*.css`; the desktop
//! stylesheet lint keeps the two in step.

/// Height transition of a collapse panel content region.
pub const COLLAPSE_TRANSITION_MS: u64 = 300;

/// Cross-fade between the feedback toggle button and its form.
pub const FEEDBACK_TRANSITION_MS: u64 = 100;

/// Delay before the feedback toggle reappears while the form collapses.
pub const FEEDBACK_STAGGER_MS: u64 = 10;

/// Duration of one heart trajectory animation.
pub const HEART_ANIMATION_MS: u64 = 500;

/// Extra wait before a heart is removed when `animationend` never arrives.
pub const HEART_REMOVAL_GRACE_MS: u64 = 100;

/// Nominal frame length used where no animation frame callback exists.
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: u64 = 16;

/// Suspend the current task for `ms` milliseconds.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    let ms = ms.min(u32::MAX as u64) as u32;
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Resolve after the next animation frame, so style writes made before the
/// await have been laid out and a following write starts a CSS transition.
#[cfg(target_arch = "wasm32")]
pub async fn next_frame() {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if window.request_animation_frame(&resolve).is_err() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn next_frame() {
    sleep_ms(FRAME_MS).await;
}

/// Resolve after the current styles have been painted: one frame for the
/// pending writes to land, a second one so the next write starts from them.
pub async fn after_paint() {
    next_frame().await;
    next_frame().await;
}

/// Render a duration the way the stylesheets spell it (`300ms`).
pub fn css_duration(ms: u64) -> String {
    format!("{ms}ms")
}
