pub mod defaults;
pub mod error;
pub mod geom;
pub mod id;
pub mod model;
pub mod stage;

pub use error::SceneError;
pub use id::ElementId;
pub use model::*;
pub use stage::{STAGE_HEIGHT, Stage};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Size};
