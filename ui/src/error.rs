//! Errors raised while constructing widgets.
//!
//! Once a widget is mounted nothing it does can fail; every variant here is
//! a construction-time problem and aborts initialization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("no element matches mount selector `{selector}`")]
    MountNotFound { selector: String },

    #[error("element matched by `{selector}` is not a {expected}")]
    UnexpectedNodeType {
        selector: String,
        expected: &'static str,
    },

    #[error("invalid element tag `{tag}`")]
    InvalidTag { tag: String },

    #[error("invalid mount configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("dom call failed: {0}")]
    Dom(String),
}

impl WidgetError {
    pub fn mount_not_found(selector: impl Into<String>) -> Self {
        Self::MountNotFound {
            selector: selector.into(),
        }
    }
}
