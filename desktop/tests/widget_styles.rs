#![cfg(test)]
/*!
Widget stylesheet lint.

The widgets drive transitions from Rust (inline heights, modifier classes,
keyframe names) and wait on timers of the same length. The durations and
names here must stay in step with `ui::core::timing` and the widget
engines; a renamed class or a retimed transition would otherwise fail
silently at runtime.
*/

use ui::core::timing::{
    css_duration, COLLAPSE_TRANSITION_MS, FEEDBACK_TRANSITION_MS, HEART_ANIMATION_MS,
};
use ui::widgets::liker::Trajectory;

const COLLAPSE_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/collapse_panel.css"
));
const FEEDBACK_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/feedback.css"
));
const LIKER_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/liker.css"
));

fn assert_contains_all(sheet_name: &str, sheet: &str, tokens: &[&str]) {
    let missing: Vec<_> = tokens.iter().filter(|t| !sheet.contains(**t)).collect();
    assert!(
        missing.is_empty(),
        "{sheet_name} is missing {} selector(s)/token(s): {missing:?}",
        missing.len()
    );
}

#[test]
fn collapse_panel_selectors_and_timing() {
    assert_contains_all(
        "collapse_panel.css",
        COLLAPSE_CSS,
        &[
            ".collapse-panel {",
            ".collapse-panel__header",
            ".collapse-panel__indicator",
            ".collapse-panel--open",
            ".collapse-panel__content",
            ".collapse-panel__body",
        ],
    );
    let transition = format!("height {}", css_duration(COLLAPSE_TRANSITION_MS));
    assert!(
        COLLAPSE_CSS.contains(&transition),
        "collapse_panel.css should transition `{transition}`"
    );
}

#[test]
fn feedback_selectors_and_timing() {
    assert_contains_all(
        "feedback.css",
        FEEDBACK_CSS,
        &[
            ".feedback__toggle {",
            ".feedback__toggle--hiding",
            ".feedback__toggle--showing",
            ".feedback__form {",
            ".feedback__form--open",
            ".feedback__form-inner",
            ".feedback__field",
            ".feedback__confirmation",
        ],
    );
    let duration = css_duration(FEEDBACK_TRANSITION_MS);
    assert!(
        FEEDBACK_CSS.contains(&format!("height {duration}"))
            && FEEDBACK_CSS.contains(&format!("opacity {duration}")),
        "feedback.css transitions should run for {duration}"
    );
}

#[test]
fn liker_defines_every_trajectory() {
    assert_contains_all(
        "liker.css",
        LIKER_CSS,
        &[".liker {", "position: relative", ".liker__button", ".liker__heart"],
    );
    for trajectory in Trajectory::ALL {
        let rule = format!("@keyframes {} {{", trajectory.keyframes());
        assert!(LIKER_CSS.contains(&rule), "liker.css lacks `{rule}`");
    }
    let duration = format!("animation-duration: {};", css_duration(HEART_ANIMATION_MS));
    let heart_rule = rule_body(LIKER_CSS, ".liker__heart {");
    assert!(
        heart_rule.contains(&duration),
        "`.liker__heart` should declare `{duration}`, found: {heart_rule}"
    );
}

#[test]
fn transition_timing_is_declared_in_rules_not_comments() {
    let collapse = format!("height {}", css_duration(COLLAPSE_TRANSITION_MS));
    assert!(rule_body(COLLAPSE_CSS, ".collapse-panel__content {").contains(&collapse));

    let feedback = format!("height {}", css_duration(FEEDBACK_TRANSITION_MS));
    assert!(rule_body(FEEDBACK_CSS, ".feedback__form {").contains(&feedback));
}

/// Declarations of the first rule opening with `selector`.
fn rule_body<'a>(sheet: &'a str, selector: &str) -> &'a str {
    let start = sheet
        .find(selector)
        .unwrap_or_else(|| panic!("no `{selector}` rule"))
        + selector.len();
    let len = sheet[start..]
        .find('}')
        .unwrap_or_else(|| panic!("unterminated `{selector}` rule"));
    &sheet[start..start + len]
}
