//! Signal detection and alert rendering.

pub mod alert;
pub mod detector;

pub use alert::*;
pub use detector::*;
