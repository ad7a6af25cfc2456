pub mod annotation;
pub mod calculator;
pub mod formulas;

pub use annotation::{arc_for, format_reading, whole_degrees, ArcAnnotation};
pub use calculator::{AngleCalculator, AngleSample, Measurement};
pub use formulas::{
    flexion_angle, neck_pitch_angle, tilt_angle, vertex_angle, yaw_from_nose, DEFAULT_MAX_YAW_DEG,
};
