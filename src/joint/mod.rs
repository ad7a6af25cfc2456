pub mod definition;
pub mod registry;

pub use definition::{CalcKind, Direction, Formula, JointDefinition, JointSpec, RangeLabels, Thresholds};
pub use registry::{builtin_specs, JointRegistry};
