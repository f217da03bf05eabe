//! Mounting widgets into an existing page.
//!
//! A host page marks where widgets go with plain HTML (`<collapse-panel>`
//! elements, a feedback container, liker slots). The platform shell
//! implements [`MountHost`] over its document and asks this module to
//! resolve selectors and read declarative attributes. A selector that
//! matches nothing is a construction error.
//!
//! Collapse panels are a custom element: the shell registers the tag and
//! mounts a root per connected element, tracked in [`MountedRoots`] until
//! the element leaves the document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Tag name the collapse panel is registered under.
pub const COLLAPSE_PANEL_TAG: &str = "collapse-panel";

/// Id of the optional `<script type="application/json">` config block.
pub const CONFIG_ELEMENT_ID: &str = "pagewidgets-config";

/// Attributes observed on a hosted collapse panel.
pub const PANEL_OBSERVED_ATTRIBUTES: &[&str] = &["title", "default-open"];

/// Where each widget mounts. Absent fields take the defaults; an explicit
/// `null` skips that widget. `panel_selector` is the custom element tag the
/// collapse panel is defined under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    pub panel_selector: Option<String>,
    pub feedback_selector: Option<String>,
    pub liker_selector: Option<String>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            panel_selector: Some(COLLAPSE_PANEL_TAG.to_string()),
            feedback_selector: Some("#feedback-widget".to_string()),
            liker_selector: Some("[data-liker]".to_string()),
        }
    }
}

impl MountConfig {
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}

/// Document access needed to mount widgets.
pub trait MountHost {
    type Node;

    /// Every node matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, WidgetError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
}

/// The first node matching `selector`.
pub fn resolve_one<H: MountHost>(host: &H, selector: &str) -> Result<H::Node, WidgetError> {
    host.query_all(selector)?
        .into_iter()
        .next()
        .ok_or_else(|| WidgetError::mount_not_found(selector))
}

/// All nodes matching `selector`; at least one is required.
pub fn resolve_all<H: MountHost>(host: &H, selector: &str) -> Result<Vec<H::Node>, WidgetError> {
    let nodes = host.query_all(selector)?;
    if nodes.is_empty() {
        return Err(WidgetError::mount_not_found(selector));
    }
    tracing::debug!(selector, count = nodes.len(), "resolved mount points");
    Ok(nodes)
}

/// Declarative configuration of a collapse panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelAttributes {
    pub title: String,
    pub default_open: bool,
}

impl PanelAttributes {
    pub fn from_raw(title: Option<&str>, default_open: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or_default().to_string(),
            default_open: parse_default_open(default_open),
        }
    }
}

pub fn panel_attributes<H: MountHost>(host: &H, node: &H::Node) -> PanelAttributes {
    let title = host.attribute(node, "title");
    let default_open = host.attribute(node, "default-open");
    PanelAttributes::from_raw(title.as_deref(), default_open.as_deref())
}

/// Check a custom element tag the way `customElements.define` does: lowercase
/// ASCII, starting with a letter, containing a hyphen.
pub fn validate_custom_element_name(tag: &str) -> Result<(), WidgetError> {
    let starts_with_letter = tag.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let allowed = tag
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'));
    if starts_with_letter && allowed && tag.contains('-') {
        Ok(())
    } else {
        Err(WidgetError::InvalidTag {
            tag: tag.to_string(),
        })
    }
}

/// A root mounted into a connected element, with the markup it replaced so
/// the element can be handed back unchanged when it disconnects.
#[derive(Debug)]
pub struct MountedRoot<H> {
    pub handle: H,
    pub original_html: String,
}

/// Roots of currently connected custom elements, keyed by element id.
#[derive(Debug)]
pub struct MountedRoots<H> {
    roots: HashMap<String, MountedRoot<H>>,
}

impl<H> Default for MountedRoots<H> {
    fn default() -> Self {
        Self {
            roots: HashMap::new(),
        }
    }
}

impl<H> MountedRoots<H> {
    pub fn is_mounted(&self, key: &str) -> bool {
        self.roots.contains_key(key)
    }

    /// Record a new root. Returns `false` and keeps the existing root when
    /// `key` is already mounted.
    pub fn connect(&mut self, key: &str, root: MountedRoot<H>) -> bool {
        if self.is_mounted(key) {
            return false;
        }
        self.roots.insert(key.to_string(), root);
        true
    }

    /// Forget the root of a disconnected element and hand it back for
    /// teardown.
    pub fn disconnect(&mut self, key: &str) -> Option<MountedRoot<H>> {
        self.roots.remove(key)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// `default-open` is a boolean attribute that also accepts `"true"`/`"false"`.
/// Anything unrecognised counts as closed.
pub fn parse_default_open(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        Some("") => true,
        Some(value) => value.eq_ignore_ascii_case("true"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeNode {
        id: usize,
        attrs: HashMap<&'static str, &'static str>,
    }

    #[derive(Default)]
    struct FakeDocument {
        matches: HashMap<&'static str, Vec<FakeNode>>,
    }

    impl FakeDocument {
        fn with(mut self, selector: &'static str, nodes: Vec<FakeNode>) -> Self {
            self.matches.insert(selector, nodes);
            self
        }
    }

    impl MountHost for FakeDocument {
        type Node = FakeNode;

        fn query_all(&self, selector: &str) -> Result<Vec<FakeNode>, WidgetError> {
            if selector.contains("!!") {
                return Err(WidgetError::Dom(format!("bad selector {selector}")));
            }
            Ok(self.matches.get(selector).cloned().unwrap_or_default())
        }

        fn attribute(&self, node: &FakeNode, name: &str) -> Option<String> {
            node.attrs.get(name).map(|v| v.to_string())
        }
    }

    fn node(id: usize, attrs: &[(&'static str, &'static str)]) -> FakeNode {
        FakeNode {
            id,
            attrs: attrs.iter().copied().collect(),
        }
    }

    #[test]
    fn missing_selector_is_a_construction_error_for_every_widget() {
        let doc = FakeDocument::default();
        let config = MountConfig::default();

        let panels = resolve_all(&doc, config.panel_selector.as_deref().unwrap()).unwrap_err();
        assert!(matches!(panels, WidgetError::MountNotFound { selector } if selector == "collapse-panel"));

        let feedback = resolve_one(&doc, "#feedback-widget").unwrap_err();
        assert!(matches!(feedback, WidgetError::MountNotFound { .. }));

        let liker = resolve_all(&doc, config.liker_selector.as_deref().unwrap()).unwrap_err();
        assert!(matches!(liker, WidgetError::MountNotFound { .. }));
    }

    #[test]
    fn resolve_one_takes_the_first_match() {
        let doc = FakeDocument::default().with("#feedback-widget", vec![node(3, &[]), node(4, &[])]);
        assert_eq!(resolve_one(&doc, "#feedback-widget").unwrap().id, 3);
    }

    #[test]
    fn resolve_all_keeps_document_order() {
        let doc = FakeDocument::default().with(".liker", vec![node(1, &[]), node(2, &[])]);
        let ids: Vec<_> = resolve_all(&doc, ".liker").unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn host_errors_propagate() {
        let doc = FakeDocument::default();
        assert!(matches!(resolve_one(&doc, "!!"), Err(WidgetError::Dom(_))));
    }

    #[test]
    fn default_open_parsing() {
        assert!(parse_default_open(Some("true")));
        assert!(parse_default_open(Some(" TRUE ")));
        assert!(parse_default_open(Some("")));
        assert!(!parse_default_open(Some("false")));
        assert!(!parse_default_open(Some("yes please")));
        assert!(!parse_default_open(None));
    }

    #[test]
    fn panel_attributes_default_to_closed_and_untitled() {
        let doc = FakeDocument::default();
        let bare = node(0, &[]);
        assert_eq!(panel_attributes(&doc, &bare), PanelAttributes::default());

        let open = node(1, &[("title", "Shipping"), ("default-open", "true")]);
        assert_eq!(
            panel_attributes(&doc, &open),
            PanelAttributes {
                title: "Shipping".into(),
                default_open: true,
            }
        );
    }

    #[test]
    fn custom_element_names_follow_the_registry_rules() {
        assert!(validate_custom_element_name(COLLAPSE_PANEL_TAG).is_ok());
        assert!(validate_custom_element_name("faq-item2").is_ok());
        for bad in ["", "panel", "Collapse-Panel", "2-panel", "-panel", "collapse panel"] {
            assert!(
                matches!(validate_custom_element_name(bad), Err(WidgetError::InvalidTag { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn elements_mount_once_and_release_on_disconnect() {
        let mut roots = MountedRoots::default();
        let root = |handle: u32, html: &str| MountedRoot {
            handle,
            original_html: html.to_string(),
        };

        assert!(roots.connect("panel-a", root(1, "<p>A</p>")));
        assert!(!roots.connect("panel-a", root(2, "rendered")));
        assert!(roots.connect("panel-b", root(3, "<p>B</p>")));
        assert_eq!(roots.len(), 2);

        let released = roots.disconnect("panel-a").unwrap();
        assert_eq!(released.handle, 1);
        assert_eq!(released.original_html, "<p>A</p>");
        assert!(roots.disconnect("panel-a").is_none());

        // Re-inserting a moved element mounts it afresh.
        assert!(roots.connect("panel-a", root(4, "<p>A</p>")));
        assert!(roots.is_mounted("panel-a"));
        roots.disconnect("panel-a");
        roots.disconnect("panel-b");
        assert!(roots.is_empty());
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config = MountConfig::from_json(r#"{ "liker_selector": ".heart-slot" }"#).unwrap();
        assert_eq!(config.panel_selector.as_deref(), Some(COLLAPSE_PANEL_TAG));
        assert_eq!(config.feedback_selector.as_deref(), Some("#feedback-widget"));
        assert_eq!(config.liker_selector.as_deref(), Some(".heart-slot"));

        let disabled = MountConfig::from_json(r#"{ "feedback_selector": null }"#).unwrap();
        assert_eq!(disabled.feedback_selector, None);

        assert_eq!(MountConfig::from_json("  ").unwrap(), MountConfig::default());
        assert!(MountConfig::from_json("{ nope").is_err());
    }
}
