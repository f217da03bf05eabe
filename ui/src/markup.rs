//! Declarative element trees.
//!
//! An [`ElementSpec`] describes a node (tag, classes, attributes, children,
//! text or raw HTML) and renders recursively to escaped HTML. Widgets use it
//! for markup that is data rather than behaviour, e.g. the feedback form
//! fields; the same shape deserializes from JSON:
//!
//! ```json
//! { "tag": "label", "classes": ["feedback__field"],
//!   "children": [{ "tag": "input", "attrs": { "name": "email", "type": "email" } }] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Elements that never take a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
    /// Text content, escaped on render. Rendered before children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Trusted HTML, inserted verbatim. Rendered before children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag.to_ascii_lowercase().as_str())
    }

    /// Render this node and its subtree.
    pub fn render_html(&self) -> Result<String, WidgetError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), WidgetError> {
        if !valid_name(&self.tag) {
            return Err(WidgetError::InvalidTag {
                tag: self.tag.clone(),
            });
        }

        out.push('<');
        out.push_str(&self.tag);

        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&self.classes.join(" ")));
            out.push('"');
        }

        for (name, value) in &self.attrs {
            // Illegal attribute names are dropped rather than failing the tree.
            if !valid_name(name) || name == "class" {
                continue;
            }
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if self.is_void() {
            return Ok(());
        }

        if let Some(html) = &self.html {
            out.push_str(html);
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out)?;
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        Ok(())
    }
}

/// Render a list of sibling nodes.
pub fn render_all(nodes: &[ElementSpec]) -> Result<String, WidgetError> {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out)?;
    }
    Ok(out)
}

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_tree() {
        let spec = ElementSpec::new("label")
            .class("feedback__field")
            .child(ElementSpec::new("span").text("Email"))
            .child(
                ElementSpec::new("input")
                    .attr("name", "email")
                    .attr("type", "email"),
            );

        assert_eq!(
            spec.render_html().unwrap(),
            "<label class=\"feedback__field\"><span>Email</span>\
             <input name=\"email\" type=\"email\"></label>"
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let spec = ElementSpec::new("p")
            .attr("title", "say \"hi\"")
            .text("<b>&</b>");
        assert_eq!(
            spec.render_html().unwrap(),
            "<p title=\"say &quot;hi&quot;\">&lt;b&gt;&amp;&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn raw_html_is_trusted() {
        let spec = ElementSpec::new("div").html("<em>ok</em>");
        assert_eq!(spec.render_html().unwrap(), "<div><em>ok</em></div>");
    }

    #[test]
    fn invalid_tag_fails_anywhere_in_tree() {
        let spec = ElementSpec::new("div").child(ElementSpec::new("bad tag"));
        let err = spec.render_html().unwrap_err();
        assert!(matches!(err, WidgetError::InvalidTag { tag } if tag == "bad tag"));

        assert!(ElementSpec::new("").render_html().is_err());
    }

    #[test]
    fn illegal_attribute_names_are_dropped() {
        let spec = ElementSpec::new("div")
            .attr("onclick=\"x\"", "1")
            .attr("data-id", "7");
        assert_eq!(spec.render_html().unwrap(), "<div data-id=\"7\"></div>");
    }

    #[test]
    fn deserializes_from_json_config() {
        let spec: ElementSpec = serde_json::from_str(
            r#"{ "tag": "textarea", "classes": ["feedback__input"], "attrs": { "name": "message", "rows": "4" } }"#,
        )
        .unwrap();
        assert_eq!(spec.tag, "textarea");
        assert_eq!(spec.attrs.get("rows").map(String::as_str), Some("4"));
        assert_eq!(
            spec.render_html().unwrap(),
            "<textarea class=\"feedback__input\" name=\"message\" rows=\"4\"></textarea>"
        );
    }

    #[test]
    fn siblings_render_in_order() {
        let html = render_all(&[ElementSpec::new("br"), ElementSpec::new("hr")]).unwrap();
        assert_eq!(html, "<br><hr>");
    }
}
