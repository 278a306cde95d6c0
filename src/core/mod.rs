//! Execution loop: one cycle per poll interval until stopped.

pub mod cycle;
pub mod scanner;

pub use cycle::*;
pub use scanner::*;
