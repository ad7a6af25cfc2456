pub mod range;
pub mod session;

pub use range::{RangeTracker, SessionStats};
pub use session::Session;
