//! Scene substrate: liveness-checked node storage, hierarchy traversal,
//! and the per-type singleton registry.

pub mod graph;
pub mod registry;
pub mod world;

pub use graph::{Node, NodeId, SceneGraph};
pub use registry::{AwakeOutcome, SingletonRegistry};
pub use world::{PlayState, SceneWorld};
