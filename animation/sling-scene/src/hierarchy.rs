//! Index-addressed transform hierarchy
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. Each node
//! owns a local [`Transform`] relative to its parent and an ordered child list.
//! Nodes can only be attached under an existing node, so the tree stays
//! acyclic. World matrices are never cached: every query walks the parent
//! chain so moving an ancestor is always picked up.

use glam::{Mat4, Vec3};
use sling_math::Transform;

use crate::error::{Result, SceneError};

/// Index of a node in a [`Hierarchy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node with its local transform and payload
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub local: Transform,
    pub data: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<T> Node<T> {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local matrix `T * R * S`
    pub fn local_matrix(&self) -> Mat4 {
        self.local.to_matrix()
    }
}

/// Arena of transform nodes
#[derive(Debug, Clone)]
pub struct Hierarchy<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for Hierarchy<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> Hierarchy<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node without a parent
    pub fn add_root(&mut self, local: Transform, data: T) -> NodeId {
        self.push(None, local, data)
    }

    /// Add a node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, local: Transform, data: T) -> Result<NodeId> {
        self.node(parent)?;
        let id = self.push(Some(parent), local, data);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn push(&mut self, parent: Option<NodeId>, local: Transform, data: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            local,
            data,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0)
    }

    /// Node by id, or [`SceneError::UnknownNode`]
    pub fn node(&self, id: NodeId) -> Result<&Node<T>> {
        self.get(id).ok_or(SceneError::UnknownNode(id.0))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<T>> {
        self.get_mut(id).ok_or(SceneError::UnknownNode(id.0))
    }

    /// Nodes without a parent, in insertion order
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| NodeId(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Ids from the root down to `id`, inclusive
    pub fn path_to(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut path = vec![id];
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent)?.parent;
        }
        path.reverse();
        Ok(path)
    }

    /// Parent world matrix composed with the local matrix, root first
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4> {
        self.path_to(id)?
            .into_iter()
            .try_fold(Mat4::IDENTITY, |world, step| {
                Ok(world * self.node(step)?.local_matrix())
            })
    }

    /// Sum of local positions along the parent chain
    ///
    /// Ignores rotation and scale, which is what the tower ground test uses.
    pub fn world_position(&self, id: NodeId) -> Result<Vec3> {
        let mut position = Vec3::ZERO;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            position += node.local.position;
            current = node.parent;
        }
        Ok(position)
    }

    /// Ids of `id` and all of its descendants in pre-order
    pub fn subtree(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.node(id)?;
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        Ok(order)
    }

    /// Depth-first pre-order walk from every root
    ///
    /// The accumulated matrix is pushed on entry to a node and popped when its
    /// subtree is done, so siblings only ever see their parent's matrix.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(NodeId, &Node<T>, Mat4),
    {
        for root in self.roots() {
            let mut stack = vec![(root, Mat4::IDENTITY)];
            while let Some((id, parent_world)) = stack.pop() {
                let node = &self.nodes[id.0];
                let world = parent_world * node.local_matrix();
                visit(id, node, world);
                for &child in node.children.iter().rev() {
                    stack.push((child, world));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f32 = 1e-5;

    fn chain(length: usize) -> (Hierarchy<usize>, Vec<NodeId>) {
        let mut hierarchy = Hierarchy::new();
        let mut ids = vec![hierarchy.add_root(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)), 0)];
        for i in 1..length {
            let parent = ids[i - 1];
            let id = hierarchy
                .add_child(parent, Transform::from_position(Vec3::new(0.0, 1.0, 0.0)), i)
                .unwrap();
            ids.push(id);
        }
        (hierarchy, ids)
    }

    #[test]
    fn test_root_world_is_local() {
        let (hierarchy, ids) = chain(1);
        assert_eq!(
            hierarchy.world_matrix(ids[0]).unwrap(),
            Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_child_composes_parent() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_root(
            Transform::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 90.0), Vec3::ONE),
            (),
        );
        let child = hierarchy
            .add_child(root, Transform::from_position(Vec3::new(1.0, 0.0, 0.0)), ())
            .unwrap();

        // Rotating the parent 90 degrees about Z turns +X into +Y
        let origin = hierarchy.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), EPS));
    }

    #[test]
    fn test_world_matrix_tracks_moved_ancestor() {
        let (mut hierarchy, ids) = chain(3);
        let before = hierarchy.world_matrix(ids[2]).unwrap();
        hierarchy.node_mut(ids[0]).unwrap().local.translate(Vec3::new(0.0, 0.0, 5.0));
        let after = hierarchy.world_matrix(ids[2]).unwrap();

        assert!(
            (after.w_axis.truncate() - before.w_axis.truncate())
                .abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS)
        );
    }

    #[test]
    fn test_world_position_sums_chain() {
        let (hierarchy, ids) = chain(4);
        assert_eq!(
            hierarchy.world_position(ids[3]).unwrap(),
            Vec3::new(1.0, 3.0, 0.0)
        );
    }

    #[test]
    fn test_unknown_node() {
        let (mut hierarchy, _) = chain(2);
        let missing = NodeId(9);
        assert!(matches!(
            hierarchy.add_child(missing, Transform::IDENTITY, 7),
            Err(SceneError::UnknownNode(9))
        ));
        assert!(hierarchy.world_matrix(missing).is_err());
    }

    #[test]
    fn test_traverse_preorder_and_sibling_isolation() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_root(Transform::IDENTITY, "root");
        let left = hierarchy
            .add_child(root, Transform::from_position(Vec3::X), "left")
            .unwrap();
        hierarchy
            .add_child(left, Transform::from_position(Vec3::X), "left.child")
            .unwrap();
        hierarchy
            .add_child(root, Transform::from_position(Vec3::Y), "right")
            .unwrap();

        let mut visited = Vec::new();
        hierarchy.traverse(|_, node, world| {
            visited.push((node.data, world.w_axis.truncate()));
        });

        let names: Vec<&str> = visited.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["root", "left", "left.child", "right"]);
        // "right" must not inherit the translation of "left"
        assert!(visited[3].1.abs_diff_eq(Vec3::Y, EPS));
        assert!(visited[2].1.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn test_subtree_and_path() {
        let (hierarchy, ids) = chain(4);
        assert_eq!(hierarchy.subtree(ids[1]).unwrap(), ids[1..].to_vec());
        assert_eq!(hierarchy.path_to(ids[2]).unwrap(), ids[..3].to_vec());
    }
}
