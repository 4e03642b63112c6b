//! Utility helpers including math extensions, formatting, and random sampling.

pub mod math;
pub mod random;

pub use math::*;
pub use random::*;
