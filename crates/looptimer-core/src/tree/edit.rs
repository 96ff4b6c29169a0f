//! Structural edits on a workout tree.
//!
//! Every edit reads the given tree and, when it applies, returns a new tree
//! snapshot. The input is never touched, so earlier snapshots stay valid.
//! `None` means the edit did not apply and the caller keeps its tree.

use serde::{Deserialize, Serialize};

use super::node::{EventType, LoopNode, Node, NodeKind, NodeMut, ROOT_ID};

/// Partial update for a node. Fields that do not exist on the target's kind
/// are ignored; id and kind can never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
}

impl NodePatch {
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.duration.is_none()
            && self.event_type.is_none()
            && self.iterations.is_none()
    }
}

/// Append a default node of `kind` to the end of `parent_id`'s children.
///
/// [`ROOT_ID`] always means the root. Returns the new tree and the new
/// node's id.
pub fn add_node(root: &LoopNode, parent_id: &str, kind: NodeKind) -> Option<(LoopNode, String)> {
    let mut next = root.clone();
    let parent = if parent_id == ROOT_ID {
        &mut next
    } else {
        match next.find_mut(parent_id)? {
            NodeMut::Loop(l) => l,
            NodeMut::Atomic(_) => return None,
        }
    };
    let node = Node::with_defaults(kind);
    let id = node.id().to_string();
    parent.children.push(node);
    Some((next, id))
}

/// Shallow-merge `patch` into the node with `id`.
pub fn update_node(root: &LoopNode, id: &str, patch: &NodePatch) -> Option<LoopNode> {
    let mut next = root.clone();
    match next.find_mut(id)? {
        NodeMut::Atomic(t) => {
            if let Some(label) = &patch.label {
                t.label = label.clone();
            }
            if let Some(duration) = patch.duration {
                t.duration = duration;
            }
            if let Some(event_type) = patch.event_type {
                t.event_type = event_type;
            }
        }
        NodeMut::Loop(l) => {
            if let Some(iterations) = patch.iterations {
                l.iterations = iterations;
            }
        }
    }
    Some(next)
}

/// Remove `id` and its whole subtree. The root cannot be deleted.
pub fn delete_node(root: &LoopNode, id: &str) -> Option<LoopNode> {
    if root.id == id {
        return None;
    }
    let mut next = root.clone();
    let parent = next.find_parent_mut(id)?;
    parent.children.retain(|c| c.id() != id);
    Some(next)
}

/// Move `active_id` to the position of `over_id`, shifting the siblings in
/// between. Both nodes must share a parent; moves across loops are ignored.
pub fn move_node(root: &LoopNode, active_id: &str, over_id: &str) -> Option<LoopNode> {
    if active_id == over_id {
        return None;
    }
    let active_parent = root.find_parent(active_id)?;
    let over_parent = root.find_parent(over_id)?;
    if active_parent.id != over_parent.id {
        return None;
    }

    let mut next = root.clone();
    let parent = next.find_parent_mut(active_id)?;
    let from = parent.children.iter().position(|c| c.id() == active_id)?;
    let to = parent.children.iter().position(|c| c.id() == over_id)?;
    let item = parent.children.remove(from);
    parent.children.insert(to, item);
    Some(next)
}
