use std::any::{type_name, TypeId};
use std::collections::HashMap;

use log::warn;

use super::graph::{NodeId, SceneGraph};
use crate::core::behaviour::Behaviour;

/// Result of the activation hook for a would-be singleton instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwakeOutcome {
    /// The instance is now the registered one for its type.
    Registered,
    /// Another instance already holds the registration; the new one
    /// must destroy itself.
    Rejected,
}

/// Per-type lookup table for scene-resident singleton behaviours.
///
/// The registry owns nothing and creates nothing: it stores bare
/// [`NodeId`] handles and discovers pre-placed instances on demand.
/// Registration is first-wins, the destroy hook clears a registration
/// with its owner, and once the quit notification arrives every lookup
/// reports absent for the rest of the process.
#[derive(Default)]
pub struct SingletonRegistry {
    entries: HashMap<TypeId, NodeId>,
    quitting: bool,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Currently registered handle for `B`, if any, without searching
    /// the scene.
    pub fn registered<B: Behaviour>(&self) -> Option<NodeId> {
        self.entries.get(&TypeId::of::<B>()).copied()
    }

    /// Looks up the instance of `B`, discovering one in the scene on a
    /// cache miss. Returns `None` (with a warning) when no instance
    /// exists or the process is shutting down. Never spawns anything.
    pub fn instance<B: Behaviour>(&mut self, graph: &SceneGraph) -> Option<NodeId> {
        if self.quitting {
            warn!(
                "singleton {} requested during shutdown, reporting absent",
                type_name::<B>()
            );
            return None;
        }

        let key = TypeId::of::<B>();
        if let Some(&id) = self.entries.get(&key) {
            // Cached handle is returned as-is, without re-validation.
            return Some(id);
        }

        match graph.find_first_behaviour::<B>() {
            Some(id) => {
                self.entries.insert(key, id);
                Some(id)
            }
            None => {
                warn!("no instance of {} found in the scene", type_name::<B>());
                None
            }
        }
    }

    /// Activation hook. The first registered instance of a type wins;
    /// a later instance is rejected and expected to destroy itself,
    /// leaving the incumbent untouched.
    pub fn on_awake(&mut self, type_id: TypeId, id: NodeId) -> AwakeOutcome {
        match self.entries.get(&type_id) {
            Some(&existing) if existing != id => AwakeOutcome::Rejected,
            _ => {
                self.entries.insert(type_id, id);
                AwakeOutcome::Registered
            }
        }
    }

    /// Destruction hook. Clears the registration only when the
    /// destroyed instance is the registered one.
    pub fn on_destroy(&mut self, type_id: TypeId, id: NodeId) {
        if self.entries.get(&type_id) == Some(&id) {
            self.entries.remove(&type_id);
        }
    }

    /// Quit hook. There is no transition back to a running state.
    pub fn on_quit(&mut self) {
        self.quitting = true;
    }
}
