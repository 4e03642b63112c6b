use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::behaviour::Behaviour;
use crate::core::types::{Image, Transform};

/// Generation-tracked handle to a scene node.
///
/// A `NodeId` never dangles: once its node is despawned the stored
/// generation stops matching and every lookup reports the node as
/// absent. Holding a stale handle is therefore distinct from holding
/// no handle at all, and all helpers treat the two the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Handle that never resolves to a node.
    pub const NONE: NodeId = NodeId {
        index: usize::MAX,
        generation: 0,
    };

    fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_none(&self) -> bool {
        self.index == usize::MAX
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}

/// A single scene node: a named, layered object that may carry a UI
/// image and at most one behaviour.
pub struct Node {
    pub name: String,
    pub layer: u32,
    pub active: bool,
    pub transform: Transform,
    pub image: Option<Image>,
    pub behaviour: Option<Box<dyn Behaviour>>,
    parent: NodeId,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layer: 0,
            active: true,
            transform: Transform::default(),
            image: None,
            behaviour: None,
            parent: NodeId::NONE,
            children: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_behaviour<B: Behaviour>(mut self, behaviour: B) -> Self {
        self.behaviour = Some(Box::new(behaviour));
        self
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True if the node carries a behaviour of concrete type `B`.
    pub fn has_behaviour<B: Behaviour>(&self) -> bool {
        self.behaviour
            .as_ref()
            .map_or(false, |b| b.as_any().is::<B>())
    }

    pub fn behaviour_ref<B: Behaviour>(&self) -> Option<&B> {
        self.behaviour.as_ref()?.as_any().downcast_ref()
    }

    pub fn behaviour_mut<B: Behaviour>(&mut self) -> Option<&mut B> {
        self.behaviour.as_mut()?.as_any_mut().downcast_mut()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("layer", &self.layer)
            .field("active", &self.active)
            .field("children", &self.children.len())
            .finish()
    }
}

/// Hierarchical node storage with generation-tracked handles.
///
/// The graph owns every node; everything else in the crate refers to
/// nodes through [`NodeId`] handles and the liveness-checked accessors
/// here.
#[derive(Default)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node at the scene root.
    pub fn spawn(&mut self, node: Node) -> NodeId {
        self.insert(node)
    }

    /// Inserts a node under `parent`. Nothing is inserted when the
    /// parent handle is stale.
    pub fn spawn_child(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        if !self.is_live(parent) {
            return None;
        }

        let id = self.insert(node);
        if let Some(child) = self.get_mut(id) {
            child.parent = parent;
        }
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(id);
        }
        Some(id)
    }

    /// Removes a node and its whole subtree, returning the root node.
    /// Every handle into the removed subtree goes stale.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        if !self.is_live(id) {
            return None;
        }

        let parent = self.get(id)?.parent;
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.retain(|&child| child != id);
        }

        for descendant in self.descendants(id) {
            self.remove_slot(descendant);
        }
        self.remove_slot(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !self.is_live(id) {
            return None;
        }
        self.nodes.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.is_live(id) {
            return None;
        }
        self.nodes.get_mut(id.index())?.as_mut()
    }

    /// Whether `id` still refers to a node in the scene.
    pub fn is_live(&self, id: NodeId) -> bool {
        let Some(&generation) = self.generations.get(id.index()) else {
            return false;
        };
        generation == id.generation() && self.nodes[id.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handles of every live node, in insertion-slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|_| NodeId::new(index, self.generations[index]))
        })
    }

    /// Every node strictly below `root`, including inactive ones, each
    /// exactly once. Traversal is depth-first; callers must not rely on
    /// the order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.get(root) else {
            return out;
        };

        let mut pending: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(id) = pending.pop() {
            let node = match self.get(id) {
                Some(node) => node,
                None => continue,
            };
            out.push(id);
            pending.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// First live node (insertion-slot order) carrying a behaviour of
    /// concrete type `B`.
    pub fn find_first_behaviour<B: Behaviour>(&self) -> Option<NodeId> {
        self.ids()
            .find(|&id| self.get(id).map_or(false, |node| node.has_behaviour::<B>()))
    }

    /// Sets `layer` on `root` and every descendant, inactive nodes
    /// included. A stale root is a no-op.
    pub fn set_layer_recursive(&mut self, root: NodeId, layer: u32) {
        if !self.is_live(root) {
            return;
        }

        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.get_mut(id) {
                node.layer = layer;
                pending.extend(node.children.iter().copied());
            }
        }
    }

    /// Replaces only the alpha channel of the node's image color, RGB
    /// untouched. A stale handle or a node without an image is a no-op.
    pub fn set_image_alpha(&mut self, id: NodeId, alpha: f32) {
        if let Some(node) = self.get_mut(id) {
            if let Some(image) = node.image.as_mut() {
                image.color = image.color.with_alpha(alpha);
            }
        }
    }

    /// Runs `action` against the node only if the handle is live, then
    /// hands the handle back for chaining.
    pub fn with_live(&mut self, id: NodeId, action: impl FnOnce(&mut Node)) -> NodeId {
        if let Some(node) = self.get_mut(id) {
            action(node);
        }
        id
    }

    /// Maps the node through `f` if the handle is live, otherwise
    /// returns the type's zero value.
    pub fn map_live<R: Default>(&self, id: NodeId, f: impl FnOnce(&Node) -> R) -> R {
        match self.get(id) {
            Some(node) => f(node),
            None => R::default(),
        }
    }

    fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free_list.pop() {
            let generation = self.generations[index];
            self.nodes[index] = Some(node);
            return NodeId::new(index, generation);
        }

        let index = self.nodes.len();
        self.nodes.push(Some(node));
        self.generations.push(0);
        NodeId::new(index, 0)
    }

    fn remove_slot(&mut self, id: NodeId) -> Option<Node> {
        if !self.is_live(id) {
            return None;
        }

        let node = self.nodes.get_mut(id.index())?.take()?;
        self.generations[id.index()] = self.generations[id.index()].wrapping_add(1);
        self.free_list.push(id.index());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Color;

    fn tree(graph: &mut SceneGraph) -> (NodeId, NodeId, NodeId, NodeId) {
        let root = graph.spawn(Node::new("root"));
        let arm = graph.spawn_child(root, Node::new("arm")).unwrap();
        let hand = graph.spawn_child(arm, Node::new("hand")).unwrap();
        let hidden = graph
            .spawn_child(root, Node::new("hidden").with_active(false))
            .unwrap();
        (root, arm, hand, hidden)
    }

    #[test]
    fn stale_handles_fail_the_liveness_check() {
        let mut graph = SceneGraph::new();
        let id = graph.spawn(Node::new("ghost"));

        assert!(graph.is_live(id));
        graph.despawn(id);
        assert!(!graph.is_live(id));
        assert!(graph.get(id).is_none());
    }

    #[test]
    fn slot_reuse_does_not_resurrect_old_handles() {
        let mut graph = SceneGraph::new();
        let old = graph.spawn(Node::new("first"));
        graph.despawn(old);

        let new = graph.spawn(Node::new("second"));
        assert_eq!(new.index(), old.index());
        assert!(!graph.is_live(old));
        assert!(graph.is_live(new));
    }

    #[test]
    fn despawn_takes_the_whole_subtree() {
        let mut graph = SceneGraph::new();
        let (root, arm, hand, hidden) = tree(&mut graph);

        graph.despawn(arm);

        assert!(graph.is_live(root));
        assert!(!graph.is_live(arm));
        assert!(!graph.is_live(hand));
        assert!(graph.is_live(hidden));
        assert_eq!(graph.get(root).unwrap().children(), &[hidden]);
    }

    #[test]
    fn descendants_visit_every_node_exactly_once() {
        let mut graph = SceneGraph::new();
        let (root, arm, hand, hidden) = tree(&mut graph);

        let mut visited = graph.descendants(root);
        visited.sort();
        let mut expected = vec![arm, hand, hidden];
        expected.sort();
        assert_eq!(visited, expected);
    }

    #[test]
    fn layer_propagates_to_inactive_descendants() {
        let mut graph = SceneGraph::new();
        let (root, arm, hand, hidden) = tree(&mut graph);

        graph.set_layer_recursive(root, 7);

        for id in [root, arm, hand, hidden] {
            assert_eq!(graph.get(id).unwrap().layer, 7);
        }
    }

    #[test]
    fn image_alpha_mutation_preserves_rgb() {
        let mut graph = SceneGraph::new();
        let tint = Color::rgba(0.9, 0.5, 0.1, 1.0);
        let id = graph.spawn(Node::new("icon").with_image(Image::new(tint)));

        graph.set_image_alpha(id, 0.3);

        let color = graph.get(id).unwrap().image.unwrap().color;
        assert_eq!(color, tint.with_alpha(0.3));
    }

    #[test]
    fn image_alpha_on_absent_target_is_a_no_op() {
        let mut graph = SceneGraph::new();
        let bare = graph.spawn(Node::new("no image"));
        let dead = graph.spawn(Node::new("gone").with_image(Image::default()));
        graph.despawn(dead);

        graph.set_image_alpha(bare, 0.5);
        graph.set_image_alpha(dead, 0.5);

        assert!(graph.get(bare).unwrap().image.is_none());
        assert!(graph.get(dead).is_none());
    }

    #[test]
    fn with_live_chains_and_skips_stale_handles() {
        let mut graph = SceneGraph::new();
        let id = graph.spawn(Node::new("chained"));

        let chained = graph.with_live(id, |node| node.layer = 4);
        assert_eq!(chained, id);
        assert_eq!(graph.get(id).unwrap().layer, 4);

        graph.despawn(id);
        graph.with_live(id, |node| node.layer = 9);
        assert!(graph.get(id).is_none());
    }

    #[test]
    fn map_live_falls_back_to_the_zero_value() {
        let mut graph = SceneGraph::new();
        let id = graph.spawn(Node::new("probe").with_layer(5));

        assert_eq!(graph.map_live(id, |node| node.layer), 5);
        graph.despawn(id);
        assert_eq!(graph.map_live(id, |node| node.layer), 0);
    }

    #[test]
    fn spawning_under_a_stale_parent_is_rejected() {
        let mut graph = SceneGraph::new();
        let parent = graph.spawn(Node::new("parent"));
        graph.despawn(parent);

        assert!(graph.spawn_child(parent, Node::new("orphan")).is_none());
        assert!(graph.is_empty());
    }
}
