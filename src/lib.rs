//! Scene Kit – gameplay convenience utilities for Rust.
//!
//! This crate bundles the small helpers a game project reaches for
//! constantly: a minimal scene graph with liveness-checked handles, a
//! per-type singleton registry for scene-resident behaviours,
//! camera-relative input mapping, jump physics, and random sampling
//! without replacement.

pub mod config;
pub mod core;
pub mod scene;
pub mod utils;

pub use glam::{Quat, Vec2, Vec3};

pub use core::{
    behaviour::Behaviour,
    types::{Color, Image, LayerMask, Transform},
};
pub use scene::{
    graph::{Node, NodeId, SceneGraph},
    registry::{AwakeOutcome, SingletonRegistry},
    world::{PlayState, SceneWorld},
};
pub use utils::{
    math::{camera_relative_input, format_fixed, format_fixed_default, jump_force, Vec3Ext},
    random::{for_each_indexed, grab, grab_live, random_element, random_index, SampleError},
};

/// Result alias for fallible sampling operations.
pub type SampleResult<T> = std::result::Result<T, SampleError>;
