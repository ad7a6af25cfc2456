pub mod angle;
pub mod classify;
pub mod config;
pub mod error;
pub mod joint;
pub mod pose;
pub mod report;
pub mod tracker;

pub use angle::{AngleCalculator, AngleSample, ArcAnnotation, Measurement};
pub use classify::{classify, PerformanceBand};
pub use error::{CatalogError, ReportError};
pub use joint::{CalcKind, Direction, JointDefinition, JointRegistry, Thresholds};
pub use pose::{Landmark, LandmarkFrame, LandmarkGroup, Point2D};
pub use tracker::{RangeTracker, Session, SessionStats};
