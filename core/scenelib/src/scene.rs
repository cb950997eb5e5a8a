use std::collections::HashMap;
use std::fmt;

use cartesia_math::{Mat4, Vector};

use crate::error::SceneError;
use crate::node::{Cartesia, RenderContext};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct SceneEntry {
    node: Box<dyn Cartesia>,
    // Non-owning back-reference; the tree edge is owned by the parent's
    // child list.
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
}

/// The scene graph: a forest of [Cartesia] nodes.
///
/// Each node has at most one parent and the graph never contains cycles, so
/// the chain from any node up to its root is always well defined.
pub struct Scene {
    entries: HashMap<NodeHandle, SceneEntry>,
    next_handle: u64,
}

impl Scene {
    pub fn new() -> Self {
        Scene { entries: HashMap::new(), next_handle: 1 }
    }

    /// Adds a standalone node with no parent.
    pub fn add<T: Cartesia + 'static>(&mut self, node: T) -> NodeHandle {
        self.add_boxed(Box::new(node))
    }

    pub fn add_boxed(&mut self, node: Box<dyn Cartesia>) -> NodeHandle {
        let handle = NodeHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(handle, SceneEntry { node, parent: None, children: Vec::new() });
        return handle;
    }

    /// Adds [node] directly under [parent].
    pub fn add_under<T: Cartesia + 'static>(&mut self, parent: NodeHandle, node: T) -> Result<NodeHandle, SceneError> {
        self.entry(parent)?;
        let handle = self.add(node);
        self.add_child(parent, handle)?;
        return Ok(handle);
    }

    /// Makes [child] the last child of [parent].
    ///
    /// A child that already has a parent is detached from it first, so a node
    /// is never listed under two parents. Attaching a node under itself or one
    /// of its descendants fails with [SceneError::WouldCreateCycle].
    pub fn add_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), SceneError> {
        self.entry(parent)?;
        let previous_parent = self.entry(child)?.parent;

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(SceneError::WouldCreateCycle { parent, child });
            }
            ancestor = self.entry(current)?.parent;
        }

        if let Some(previous) = previous_parent {
            if previous == parent {
                return Ok(());
            }
            log::debug!("detaching {} from {} before attaching to {}", child, previous, parent);
            self.entry_mut(previous)?.children.retain(|&c| c != child);
        }

        self.entry_mut(parent)?.children.push(child);
        self.entry_mut(child)?.parent = Some(parent);
        return Ok(());
    }

    /// Same as [Self::add_child] with the arguments swapped.
    pub fn set_parent(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<(), SceneError> {
        self.add_child(parent, child)
    }

    pub fn parent(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, SceneError> {
        Ok(self.entry(handle)?.parent)
    }

    pub fn children(&self, handle: NodeHandle) -> Result<&[NodeHandle], SceneError> {
        Ok(&self.entry(handle)?.children)
    }

    /// All nodes without a parent, in creation order.
    pub fn roots(&self) -> Vec<NodeHandle> {
        let mut roots: Vec<NodeHandle> = self.entries.iter()
            .filter(|(_, entry)| entry.parent.is_none())
            .map(|(&handle, _)| handle)
            .collect();
        roots.sort();
        return roots;
    }

    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Downcasts the node behind [handle] to a concrete type.
    pub fn node<T: 'static>(&self, handle: NodeHandle) -> Option<&T> {
        self.entries.get(&handle).and_then(|entry| entry.node.as_any().downcast_ref::<T>())
    }

    pub fn node_mut<T: 'static>(&mut self, handle: NodeHandle) -> Option<&mut T> {
        self.entries.get_mut(&handle).and_then(|entry| entry.node.as_any_mut().downcast_mut::<T>())
    }

    pub fn local_transform(&self, handle: NodeHandle) -> Result<Mat4, SceneError> {
        self.entry(handle)?.node.local_transform()
    }

    /// The node's world transform.
    ///
    /// With [parent_transform] (the top-down path used while drawing) the
    /// result is `parent_transform · local`. Without it the parent chain is
    /// walked up to the root, composing local transforms on the way; a root
    /// returns its local transform unchanged.
    pub fn absolute_transform(&self, handle: NodeHandle, parent_transform: Option<&Mat4>) -> Result<Mat4, SceneError> {
        let local = self.local_transform(handle)?;
        if let Some(parent_transform) = parent_transform {
            return Ok(parent_transform.append(&local));
        }

        let mut transform = local;
        let mut ancestor = self.entry(handle)?.parent;
        while let Some(current) = ancestor {
            transform = self.local_transform(current)?.append(&transform);
            ancestor = self.entry(current)?.parent;
        }
        return Ok(transform);
    }

    /// Translation part of the node's world transform.
    pub fn absolute_position(&self, handle: NodeHandle) -> Result<Vector, SceneError> {
        Ok(self.absolute_transform(handle, None)?.translation())
    }

    /// Draws the subtree rooted at [handle]. Every node hands its payload to
    /// [context] with its resolved world transform, then its children are
    /// drawn with that transform as their parent transform.
    ///
    /// Transforms are recomputed on every call; nothing is cached between
    /// traversals.
    #[profiling::function]
    pub fn draw(&self, handle: NodeHandle, context: &mut dyn RenderContext, parent_transform: Option<&Mat4>) -> Result<(), SceneError> {
        let transform = self.absolute_transform(handle, parent_transform)?;
        let entry = self.entry(handle)?;
        entry.node.draw(context, &transform);
        for &child in &entry.children {
            self.draw(child, context, Some(&transform))?;
        }
        return Ok(());
    }

    fn entry(&self, handle: NodeHandle) -> Result<&SceneEntry, SceneError> {
        self.entries.get(&handle).ok_or(SceneError::UnknownNode(handle))
    }

    fn entry_mut(&mut self, handle: NodeHandle) -> Result<&mut SceneEntry, SceneError> {
        self.entries.get_mut(&handle).ok_or(SceneError::UnknownNode(handle))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use cartesia_math::{vec3, vec4, Real};

    use super::*;
    use crate::custom::CustomCartesia;
    use crate::mesh::TriangleMesh;
    use crate::node::BareCartesia;
    use crate::payload::{Light, LightCartesia, MeshCartesia};
    use crate::shapes::cube;
    use crate::simple::SimpleCartesia;

    const EPSILON: Real = 1e-9;

    #[derive(Default)]
    struct RecordingContext {
        meshes: Vec<(Option<String>, Mat4)>,
        lights: Vec<(Light, Mat4)>,
    }

    impl RenderContext for RecordingContext {
        fn submit_mesh(&mut self, mesh: &Rc<TriangleMesh>, transform: &Mat4) {
            self.meshes.push((mesh.key().map(str::to_string), transform.clone()));
        }

        fn submit_light(&mut self, light: &Light, transform: &Mat4) {
            self.lights.push((light.clone(), transform.clone()));
        }
    }

    fn placed(x: Real, y: Real, z: Real) -> SimpleCartesia {
        SimpleCartesia::at([x, y, z]).unwrap()
    }

    fn chain(scene: &mut Scene) -> (NodeHandle, NodeHandle, NodeHandle) {
        let root = scene.add(placed(1.0, 0.0, 0.0));
        let a = scene.add_under(root, placed(0.0, 1.0, 0.0)).unwrap();
        let b = scene.add_under(a, placed(0.0, 0.0, 1.0)).unwrap();
        (root, a, b)
    }

    #[test]
    fn root_absolute_transform_is_local_transform() {
        let mut scene = Scene::new();
        let mut node = placed(3.0, 2.0, 1.0);
        node.set_pitch(20.0);
        let root = scene.add(node);
        assert_eq!(scene.absolute_transform(root, None).unwrap(), scene.local_transform(root).unwrap());
    }

    #[test]
    fn three_level_chain_composes_translations() {
        let mut scene = Scene::new();
        let (_, _, b) = chain(&mut scene);
        let origin = scene.absolute_transform(b, None).unwrap()
            .transform_vector(&vec4(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert!(origin.approx_eq(&vec4(1.0, 1.0, 1.0, 1.0), EPSILON));
        assert!(scene.absolute_position(b).unwrap().approx_eq(&vec3(1.0, 1.0, 1.0), EPSILON));
    }

    #[test]
    fn explicit_parent_transform_skips_ancestors() {
        let mut scene = Scene::new();
        let (_, _, b) = chain(&mut scene);
        let parent = Mat4::identity().translate([10.0, 0.0, 0.0]).unwrap();
        let position = scene.absolute_transform(b, Some(&parent)).unwrap().translation();
        assert!(position.approx_eq(&vec3(10.0, 0.0, 1.0), EPSILON));
    }

    #[test]
    fn parent_rotation_carries_children() {
        let mut scene = Scene::new();
        let mut planet = SimpleCartesia::new();
        planet.set_yaw(90.0);
        let planet = scene.add(planet);
        let moon = scene.add_under(planet, placed(2.0, 0.0, 0.0)).unwrap();
        let position = scene.absolute_position(moon).unwrap();
        assert!(position.approx_eq(&vec3(0.0, 0.0, -2.0), EPSILON), "{:?}", position);
    }

    #[test]
    fn bare_node_fails_fast() {
        let mut scene = Scene::new();
        let bare = scene.add(BareCartesia);
        let child = scene.add_under(bare, SimpleCartesia::new()).unwrap();
        assert_eq!(scene.local_transform(bare), Err(SceneError::AbstractMethodCalled));
        assert_eq!(scene.absolute_transform(child, None), Err(SceneError::AbstractMethodCalled));
        let mut context = RecordingContext::default();
        assert_eq!(scene.draw(bare, &mut context, None), Err(SceneError::AbstractMethodCalled));
    }

    #[test]
    fn add_child_sets_back_reference() {
        let mut scene = Scene::new();
        let parent = scene.add(SimpleCartesia::new());
        let child = scene.add(SimpleCartesia::new());
        scene.add_child(parent, child).unwrap();
        assert_eq!(scene.parent(child).unwrap(), Some(parent));
        assert_eq!(scene.children(parent).unwrap(), &[child]);
        assert_eq!(scene.roots(), vec![parent]);
    }

    #[test]
    fn reattaching_moves_the_node() {
        let mut scene = Scene::new();
        let first = scene.add(placed(1.0, 0.0, 0.0));
        let second = scene.add(placed(0.0, 5.0, 0.0));
        let child = scene.add_under(first, SimpleCartesia::new()).unwrap();

        scene.set_parent(child, second).unwrap();

        assert!(scene.children(first).unwrap().is_empty());
        assert_eq!(scene.children(second).unwrap(), &[child]);
        assert!(scene.absolute_position(child).unwrap().approx_eq(&vec3(0.0, 5.0, 0.0), EPSILON));

        // attaching twice to the same parent keeps a single edge
        scene.add_child(second, child).unwrap();
        assert_eq!(scene.children(second).unwrap(), &[child]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut scene = Scene::new();
        let (root, a, b) = chain(&mut scene);
        assert_eq!(scene.add_child(b, root), Err(SceneError::WouldCreateCycle { parent: b, child: root }));
        assert_eq!(scene.add_child(a, a), Err(SceneError::WouldCreateCycle { parent: a, child: a }));
        assert_eq!(scene.parent(root).unwrap(), None);
    }

    #[test]
    fn unknown_handles_are_reported() {
        let mut scene = Scene::new();
        let node = scene.add(SimpleCartesia::new());
        let missing = NodeHandle(999);
        assert_eq!(scene.add_child(node, missing), Err(SceneError::UnknownNode(missing)));
        assert_eq!(scene.absolute_transform(missing, None), Err(SceneError::UnknownNode(missing)));
        assert!(scene.node::<SimpleCartesia>(missing).is_none());
    }

    #[test]
    fn draw_pushes_resolved_transforms_to_payload() {
        let mut scene = Scene::new();
        let root = scene.add(CustomCartesia::new(Mat4::identity().translate([0.0, 0.0, -5.0]).unwrap()));
        let mesh = Rc::new(cube(vec4(1.0, 0.0, 0.0, 1.0)).unwrap());
        let cube_node = scene.add_under(root, MeshCartesia::with_placement(mesh, placed(1.0, 0.0, 0.0))).unwrap();
        let mut light = LightCartesia::new(Light::default());
        light.placement_mut().set_position([0.0, 2.0, 0.0]).unwrap();
        scene.add_under(cube_node, light).unwrap();

        let mut context = RecordingContext::default();
        scene.draw(root, &mut context, Some(&Mat4::identity())).unwrap();

        assert_eq!(context.meshes.len(), 1);
        assert_eq!(context.meshes[0].0.as_deref(), Some("cube"));
        assert!(context.meshes[0].1.translation().approx_eq(&vec3(1.0, 0.0, -5.0), EPSILON));
        assert_eq!(context.lights.len(), 1);
        assert!(context.lights[0].1.translation().approx_eq(&vec3(1.0, 2.0, -5.0), EPSILON));
    }

    #[test]
    fn draw_matches_bottom_up_resolution() {
        let mut scene = Scene::new();
        let mesh = Rc::new(cube(vec4(1.0, 1.0, 1.0, 1.0)).unwrap());
        let mut spinning = placed(0.0, 3.0, 0.0);
        spinning.set_roll(30.0);
        let root = scene.add(spinning);
        let leaf = scene.add_under(root, MeshCartesia::with_placement(mesh, placed(1.0, 1.0, 0.0))).unwrap();

        let mut context = RecordingContext::default();
        scene.draw(root, &mut context, None).unwrap();
        let bottom_up = scene.absolute_transform(leaf, None).unwrap();
        assert!(context.meshes[0].1.approx_eq(&bottom_up, EPSILON));
    }

    #[test]
    fn typed_access_downcasts() {
        let mut scene = Scene::new();
        let node = scene.add(SimpleCartesia::new());
        scene.node_mut::<SimpleCartesia>(node).unwrap().move_yaw(15.0);
        assert_eq!(scene.node::<SimpleCartesia>(node).unwrap().yaw(), 15.0);
        assert!(scene.node::<CustomCartesia>(node).is_none());
    }
}
