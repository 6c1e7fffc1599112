use std::fmt;

use thiserror::Error;

use super::item::SceneItem;

/// Handle to a node in a [`SceneGraph`].
///
/// Ids carry a generation, so an id kept after its node was removed never
/// resolves to a node created later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// An id that never resolves to a node.
    #[cfg(test)]
    pub(crate) fn dangling() -> Self {
        NodeId {
            index: u32::MAX,
            generation: u32::MAX,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("node {0} does not exist")]
    StaleNode(NodeId),
    #[error("cannot attach {child} under {parent}: {child} is an ancestor of {parent}")]
    CycleDetected { parent: NodeId, child: NodeId },
    #[error("node {0} cannot be its own parent")]
    SelfParent(NodeId),
}

/// A node: name, visibility, tree links and the item it carries.
pub struct SceneNode {
    name: String,
    visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    in_view: bool,
    item: Box<dyn SceneItem>,
}

impl SceneNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion (= traversal) order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node is attached, directly or through ancestors, to a view.
    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    pub fn item(&self) -> &dyn SceneItem {
        self.item.as_ref()
    }

    pub fn item_mut(&mut self) -> &mut dyn SceneItem {
        self.item.as_mut()
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("visible", &self.visible)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("in_view", &self.in_view)
            .finish_non_exhaustive()
    }
}

struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// Arena holding every node. Parents own their children through the
/// `children` lists; parent links are plain ids.
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a detached, visible node.
    pub fn insert(&mut self, name: impl Into<String>, item: Box<dyn SceneItem>) -> NodeId {
        let node = SceneNode {
            name: name.into(),
            visible: true,
            parent: None,
            children: Vec::new(),
            in_view: false,
            item,
        };
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn checked(&self, id: NodeId) -> Result<&SceneNode, SceneError> {
        self.node(id).ok_or(SceneError::StaleNode(id))
    }

    /// The node's item downcast to its concrete type.
    pub fn item<T: SceneItem>(&self, id: NodeId) -> Option<&T> {
        self.node(id)?.item.as_any().downcast_ref::<T>()
    }

    pub fn item_mut<T: SceneItem>(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id)?.item.as_any_mut().downcast_mut::<T>()
    }

    /// True if `ancestor` is `id` or lies on the path from `id` to its root.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.node(c).and_then(|n| n.parent);
        }
        false
    }

    /// Appends `child` under `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::SelfParent(parent));
        }
        let parent_in_view = self.checked(parent)?.in_view;
        self.checked(child)?;
        if self.is_ancestor(child, parent) {
            return Err(SceneError::CycleDetected { parent, child });
        }

        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        self.set_in_view(child, parent_in_view);
        log::debug!("attached node {child} under {parent}");
        Ok(())
    }

    /// Detaches `child` if it is a child of `parent`. Returns whether it was.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        self.checked(parent)?;
        if self.checked(child)?.parent != Some(parent) {
            return Ok(false);
        }
        self.detach(child);
        self.set_in_view(child, false);
        log::debug!("detached node {child} from {parent}");
        Ok(true)
    }

    /// Unlinks a node from its parent. Leaves the `in_view` flags alone.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
    }

    /// Sets the attached-to-view flag on a whole subtree.
    pub(crate) fn set_in_view(&mut self, root: NodeId, in_view: bool) {
        for id in self.collect_preorder(root) {
            if let Some(node) = self.node_mut(id) {
                node.in_view = in_view;
            }
        }
    }

    /// Destroys a node and its whole subtree. Returns the destroyed ids,
    /// children before parents.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        self.checked(id)?;
        self.detach(id);
        let mut removed = Vec::new();
        self.traverse_reverse(id, |nid, _| removed.push(nid));
        for nid in &removed {
            let slot = &mut self.slots[nid.index as usize];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(nid.index);
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Shows or hides a node and, explicitly, every descendant.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.checked(id)?;
        for nid in self.collect_preorder(id) {
            if let Some(node) = self.node_mut(nid) {
                node.visible = visible;
            }
        }
        Ok(())
    }

    /// Depth-first walk, parent before children, children in insertion order.
    pub fn traverse<F>(&self, root: NodeId, mut visit: F)
    where
        F: FnMut(NodeId, &SceneNode),
    {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            visit(id, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Depth-first walk, children (in insertion order) before their parent.
    pub fn traverse_reverse<F>(&self, root: NodeId, mut visit: F)
    where
        F: FnMut(NodeId, &SceneNode),
    {
        // (node, children already pushed)
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if expanded {
                visit(id, node);
            } else {
                stack.push((id, true));
                stack.extend(node.children.iter().rev().map(|c| (*c, false)));
            }
        }
    }

    /// Ids of a subtree in pre-order.
    pub fn collect_preorder(&self, root: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.traverse(root, |id, _| ids.push(id));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::item::Group;

    fn graph_with(names: &[&str]) -> (SceneGraph, Vec<NodeId>) {
        let mut graph = SceneGraph::new();
        let ids = names
            .iter()
            .map(|n| graph.insert(*n, Box::new(Group)))
            .collect();
        (graph, ids)
    }

    fn names(graph: &SceneGraph, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| graph.node(*id).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_traversal_orders() {
        let (mut g, ids) = graph_with(&["root", "a", "b", "a1", "a2"]);
        let [root, a, b, a1, a2] = [ids[0], ids[1], ids[2], ids[3], ids[4]];
        g.add_child(root, a).unwrap();
        g.add_child(root, b).unwrap();
        g.add_child(a, a1).unwrap();
        g.add_child(a, a2).unwrap();

        let pre = g.collect_preorder(root);
        assert_eq!(names(&g, &pre), ["root", "a", "a1", "a2", "b"]);

        let mut post = Vec::new();
        g.traverse_reverse(root, |id, _| post.push(id));
        assert_eq!(names(&g, &post), ["a1", "a2", "a", "b", "root"]);
    }

    #[test]
    fn test_reparenting_detaches_first() {
        let (mut g, ids) = graph_with(&["p1", "p2", "c"]);
        g.add_child(ids[0], ids[2]).unwrap();
        g.add_child(ids[1], ids[2]).unwrap();
        assert!(g.node(ids[0]).unwrap().children().is_empty());
        assert_eq!(g.node(ids[1]).unwrap().children(), &[ids[2]]);
        assert_eq!(g.node(ids[2]).unwrap().parent(), Some(ids[1]));
    }

    #[test]
    fn test_cycles_and_self_parent_rejected() {
        let (mut g, ids) = graph_with(&["a", "b", "c"]);
        g.add_child(ids[0], ids[1]).unwrap();
        g.add_child(ids[1], ids[2]).unwrap();
        assert_eq!(
            g.add_child(ids[2], ids[0]),
            Err(SceneError::CycleDetected {
                parent: ids[2],
                child: ids[0]
            })
        );
        assert_eq!(g.add_child(ids[1], ids[1]), Err(SceneError::SelfParent(ids[1])));
    }

    #[test]
    fn test_set_visible_is_recursive() {
        let (mut g, ids) = graph_with(&["a", "b", "c"]);
        g.add_child(ids[0], ids[1]).unwrap();
        g.add_child(ids[1], ids[2]).unwrap();
        g.set_visible(ids[0], false).unwrap();
        assert!(ids.iter().all(|id| !g.node(*id).unwrap().is_visible()));
        g.set_visible(ids[1], true).unwrap();
        assert!(!g.node(ids[0]).unwrap().is_visible());
        assert!(g.node(ids[2]).unwrap().is_visible());
    }

    #[test]
    fn test_remove_invalidates_subtree_ids() {
        let (mut g, ids) = graph_with(&["a", "b", "c"]);
        g.add_child(ids[0], ids[1]).unwrap();
        g.add_child(ids[1], ids[2]).unwrap();
        let removed = g.remove(ids[1]).unwrap();
        assert_eq!(removed, vec![ids[2], ids[1]]);
        assert_eq!(g.len(), 1);
        assert!(g.node(ids[0]).unwrap().children().is_empty());

        // slot reuse does not revive the old id
        let fresh = g.insert("fresh", Box::new(Group));
        assert!(!g.contains(ids[1]) && !g.contains(ids[2]));
        assert!(g.contains(fresh));
        assert_ne!(fresh, ids[1]);
        assert_ne!(fresh, ids[2]);
        assert_eq!(g.remove(ids[1]), Err(SceneError::StaleNode(ids[1])));
    }

    #[test]
    fn test_in_view_propagates_on_attach() {
        let (mut g, ids) = graph_with(&["root", "a", "b"]);
        g.set_in_view(ids[0], true);
        g.add_child(ids[1], ids[2]).unwrap();
        g.add_child(ids[0], ids[1]).unwrap();
        assert!(g.node(ids[2]).unwrap().is_in_view());
        assert!(g.remove_child(ids[0], ids[1]).unwrap());
        assert!(!g.node(ids[1]).unwrap().is_in_view());
        assert!(!g.node(ids[2]).unwrap().is_in_view());
        assert!(!g.remove_child(ids[0], ids[1]).unwrap());
    }
}
