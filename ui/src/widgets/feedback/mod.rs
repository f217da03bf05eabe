pub mod engine;
pub use engine::{FeedbackEngine, FeedbackPhase, FeedbackSubmission};

mod view;
pub use view::FeedbackWidget;
