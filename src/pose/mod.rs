pub mod landmark;
pub mod projector;

pub use landmark::{face, Landmark, LandmarkFrame, LandmarkGroup, PoseLandmark};
pub use projector::{project, Point2D, Projector, DEFAULT_VISIBILITY_THRESHOLD};
