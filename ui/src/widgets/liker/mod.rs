pub mod engine;
pub use engine::{marker_origin, Bounds, Heart, LikerEngine, Point, Trajectory};

mod view;
pub use view::{LikerWidget, LikerWidgetProps};
