pub mod engine;
pub use engine::{Height, PanelEngine, PanelPhase, PanelStep};

mod view;
pub use view::{CollapsePanel, CollapsePanelProps};
