use std::any::TypeId;

use log::warn;

use super::graph::{Node, NodeId, SceneGraph};
use super::registry::{AwakeOutcome, SingletonRegistry};
use crate::core::behaviour::Behaviour;

/// Whether the simulation is still advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Running,
    Stopped,
}

/// Owns the scene graph and the singleton registry and routes the
/// lifecycle hooks between them.
///
/// All mutation happens from the host's single logic thread; the world
/// never blocks or spawns work of its own.
#[derive(Default)]
pub struct SceneWorld {
    pub graph: SceneGraph,
    pub singletons: SingletonRegistry,
    play_state: PlayState,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Spawns a behaviour-carrying node and runs the activation hook.
    ///
    /// If another instance of the same behaviour type is already
    /// registered the new node destroys itself and `None` comes back;
    /// the registered instance is left untouched.
    pub fn spawn_singleton(&mut self, node: Node) -> Option<NodeId> {
        let type_id = match node.behaviour.as_ref() {
            Some(behaviour) => behaviour.as_any().type_id(),
            None => {
                warn!("spawn_singleton called with a behaviour-less node, ignoring");
                return None;
            }
        };

        let id = self.graph.spawn(node);
        match self.singletons.on_awake(type_id, id) {
            AwakeOutcome::Registered => Some(id),
            AwakeOutcome::Rejected => {
                self.graph.despawn(id);
                None
            }
        }
    }

    /// Despawns a subtree, firing the destroy hook for every removed
    /// node that carried a behaviour.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let mut doomed = vec![id];
        doomed.extend(self.graph.descendants(id));

        let hooks: Vec<(TypeId, NodeId)> = doomed
            .iter()
            .filter_map(|&node_id| {
                let node = self.graph.get(node_id)?;
                let behaviour = node.behaviour.as_ref()?;
                Some((behaviour.as_any().type_id(), node_id))
            })
            .collect();

        let removed = self.graph.despawn(id);
        for (type_id, node_id) in hooks {
            self.singletons.on_destroy(type_id, node_id);
        }
        removed
    }

    /// Registered (or scene-discovered) singleton instance of `B`.
    pub fn singleton<B: Behaviour>(&mut self) -> Option<NodeId> {
        self.singletons.instance::<B>(&self.graph)
    }

    /// Stops the game. The registry is notified first so singleton
    /// lookups report absent during teardown. Debug builds halt the
    /// simulation the way an editor leaves play mode; release builds
    /// terminate the process.
    pub fn quit(&mut self) {
        self.singletons.on_quit();
        self.quit_impl();
    }

    #[cfg(debug_assertions)]
    fn quit_impl(&mut self) {
        self.play_state = PlayState::Stopped;
    }

    #[cfg(not(debug_assertions))]
    fn quit_impl(&mut self) {
        std::process::exit(0);
    }
}
