use std::any::Any;

/// A scene-resident behaviour attached to a node.
///
/// Behaviours are plain structs owned by their node; the trait only
/// exists so the scene graph and the singleton registry can resolve
/// nodes by concrete behaviour type at runtime.
pub trait Behaviour: Any {
    /// Downcast helper.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast helper.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
