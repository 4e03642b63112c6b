//! Core types describing scene components and shared data.

pub mod behaviour;
pub mod types;

pub use behaviour::Behaviour;
pub use types::{Color, Image, LayerMask, Transform};
