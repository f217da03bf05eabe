//! Shared UI crate for pagewidgets: the widgets, their state engines and the
//! helpers the platform shells use to mount them.

pub mod core;
pub mod error;
pub mod i18n;
pub mod markup;
pub mod mount;
pub mod views;
pub mod widgets;

pub mod components {
    // Language picker used by the showcase (components/locale_switcher.rs)
    pub mod locale_switcher;
    pub use locale_switcher::LocaleSwitcher;
}

pub use error::WidgetError;
pub use widgets::{CollapsePanel, FeedbackWidget, LikerWidget};
