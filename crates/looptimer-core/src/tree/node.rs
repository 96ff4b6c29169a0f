//! Workout tree node types and id-based lookup.
//!
//! A workout is a rooted, ordered tree: atomic intervals are leaves and loop
//! groups own their children exclusively. Nodes are addressed only by id;
//! parents are found by searching, never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parent id that always resolves to the root of the tree being edited.
pub const ROOT_ID: &str = "root";

/// Default length of a freshly added interval, in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Default repeat count of a freshly added loop.
pub const DEFAULT_LOOP_ITERATIONS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Work,
    Rest,
}

/// Leaf interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerNode {
    pub id: String,
    #[serde(default)]
    pub event_type: EventType,
    /// Duration in seconds. Zero is accepted but plays as an instant event.
    pub duration: u64,
    pub label: String,
}

/// Repeatable group of child nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopNode {
    pub id: String,
    /// Zero means the whole subtree contributes nothing.
    pub iterations: u32,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Atomic(TimerNode),
    Loop(LoopNode),
}

/// Which kind of node an editor asks to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Atomic,
    Loop,
}

/// Borrowed view of a node found by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Atomic(&'a TimerNode),
    Loop(&'a LoopNode),
}

/// Mutable view of a node found by id.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Atomic(&'a mut TimerNode),
    Loop(&'a mut LoopNode),
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

impl TimerNode {
    pub fn new(
        id: impl Into<String>,
        event_type: EventType,
        duration: u64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            event_type,
            duration,
            label: label.into(),
        }
    }
}

impl LoopNode {
    pub fn new(id: impl Into<String>, iterations: u32, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            iterations,
            children,
        }
    }

    /// Depth-first pre-order search for `id`, including this node.
    pub fn find(&self, id: &str) -> Option<NodeRef<'_>> {
        if self.id == id {
            return Some(NodeRef::Loop(self));
        }
        for child in &self.children {
            match child {
                Node::Atomic(t) if t.id == id => return Some(NodeRef::Atomic(t)),
                Node::Loop(l) => {
                    if let Some(found) = l.find(id) {
                        return Some(found);
                    }
                }
                Node::Atomic(_) => {}
            }
        }
        None
    }

    pub fn find_mut(&mut self, id: &str) -> Option<NodeMut<'_>> {
        if self.id == id {
            return Some(NodeMut::Loop(self));
        }
        for child in self.children.iter_mut() {
            match child {
                Node::Atomic(t) if t.id == id => return Some(NodeMut::Atomic(t)),
                Node::Loop(l) => {
                    if let Some(found) = l.find_mut(id) {
                        return Some(found);
                    }
                }
                Node::Atomic(_) => {}
            }
        }
        None
    }

    /// The loop whose immediate children include `id`. The root itself has
    /// no parent.
    pub fn find_parent(&self, id: &str) -> Option<&LoopNode> {
        if self.children.iter().any(|c| c.id() == id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| match c {
            Node::Loop(l) => l.find_parent(id),
            Node::Atomic(_) => None,
        })
    }

    pub fn find_parent_mut(&mut self, id: &str) -> Option<&mut LoopNode> {
        if self.children.iter().any(|c| c.id() == id) {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Node::Loop(l) = child {
                if let Some(parent) = l.find_parent_mut(id) {
                    return Some(parent);
                }
            }
        }
        None
    }

    /// Every id in the subtree, pre-order.
    pub fn collect_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.id.as_str()];
        for child in &self.children {
            match child {
                Node::Atomic(t) => ids.push(t.id.as_str()),
                Node::Loop(l) => ids.extend(l.collect_ids()),
            }
        }
        ids
    }

    pub fn has_unique_ids(&self) -> bool {
        let ids = self.collect_ids();
        let unique: std::collections::HashSet<&str> = ids.iter().copied().collect();
        unique.len() == ids.len()
    }

    /// Ids of the immediate children, in order.
    pub fn child_ids(&self) -> Vec<&str> {
        self.children.iter().map(Node::id).collect()
    }
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Atomic(t) => &t.id,
            Node::Loop(l) => &l.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Atomic(_) => NodeKind::Atomic,
            Node::Loop(_) => NodeKind::Loop,
        }
    }

    /// A new node with a fresh id and editor defaults.
    pub fn with_defaults(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Atomic => Node::Atomic(TimerNode::new(
                fresh_id(),
                EventType::Work,
                DEFAULT_INTERVAL_SECS,
                "New Interval",
            )),
            NodeKind::Loop => Node::Loop(LoopNode::new(
                fresh_id(),
                DEFAULT_LOOP_ITERATIONS,
                Vec::new(),
            )),
        }
    }

    pub fn atomic(
        id: impl Into<String>,
        event_type: EventType,
        duration: u64,
        label: impl Into<String>,
    ) -> Self {
        Node::Atomic(TimerNode::new(id, event_type, duration, label))
    }

    pub fn group(id: impl Into<String>, iterations: u32, children: Vec<Node>) -> Self {
        Node::Loop(LoopNode::new(id, iterations, children))
    }
}

impl NodeRef<'_> {
    pub fn id(&self) -> &str {
        match self {
            NodeRef::Atomic(t) => &t.id,
            NodeRef::Loop(l) => &l.id,
        }
    }

    pub fn to_owned_node(&self) -> Node {
        match self {
            NodeRef::Atomic(t) => Node::Atomic((*t).clone()),
            NodeRef::Loop(l) => Node::Loop((*l).clone()),
        }
    }
}

/// Generate a fresh node id.
pub(crate) fn new_node_id() -> String {
    fresh_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LoopNode {
        LoopNode::new(
            "root",
            1,
            vec![
                Node::atomic("a", EventType::Work, 5, "A"),
                Node::group(
                    "l1",
                    2,
                    vec![
                        Node::atomic("b", EventType::Rest, 5, "B"),
                        Node::group("l2", 1, vec![Node::atomic("c", EventType::Work, 5, "C")]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn find_locates_nested_nodes() {
        let root = sample();
        assert!(matches!(root.find("root"), Some(NodeRef::Loop(_))));
        assert!(matches!(root.find("c"), Some(NodeRef::Atomic(t)) if t.label == "C"));
        assert!(matches!(root.find("l2"), Some(NodeRef::Loop(l)) if l.children.len() == 1));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn find_parent_returns_immediate_loop() {
        let root = sample();
        assert_eq!(root.find_parent("a").map(|p| p.id.as_str()), Some("root"));
        assert_eq!(root.find_parent("c").map(|p| p.id.as_str()), Some("l2"));
        assert!(root.find_parent("root").is_none());
        assert!(root.find_parent("missing").is_none());
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut root = sample();
        if let Some(NodeMut::Atomic(t)) = root.find_mut("b") {
            t.label = "Renamed".into();
        }
        assert!(matches!(root.find("b"), Some(NodeRef::Atomic(t)) if t.label == "Renamed"));
    }

    #[test]
    fn collect_ids_is_preorder() {
        let root = sample();
        assert_eq!(root.collect_ids(), vec!["root", "a", "l1", "b", "l2", "c"]);
        assert!(root.has_unique_ids());
    }

    #[test]
    fn duplicate_ids_are_detected() {
        let root = LoopNode::new(
            "root",
            1,
            vec![
                Node::atomic("x", EventType::Work, 5, "X"),
                Node::atomic("x", EventType::Work, 5, "X again"),
            ],
        );
        assert!(!root.has_unique_ids());
    }

    #[test]
    fn nodes_serialize_with_type_tag() {
        let node = Node::atomic("a", EventType::Rest, 10, "Breathe");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "atomic");
        assert_eq!(json["eventType"], "rest");

        let loop_json = serde_json::to_value(Node::group("l", 3, vec![])).unwrap();
        assert_eq!(loop_json["type"], "loop");
        assert_eq!(loop_json["iterations"], 3);
    }

    #[test]
    fn missing_event_type_defaults_to_work() {
        let node: Node =
            serde_json::from_str(r#"{"type":"atomic","id":"a","duration":20,"label":"Work"}"#)
                .unwrap();
        assert!(matches!(node, Node::Atomic(t) if t.event_type == EventType::Work));
    }

    #[test]
    fn defaults_for_new_nodes() {
        match Node::with_defaults(NodeKind::Atomic) {
            Node::Atomic(t) => {
                assert_eq!(t.duration, DEFAULT_INTERVAL_SECS);
                assert_eq!(t.event_type, EventType::Work);
            }
            Node::Loop(_) => panic!("expected atomic"),
        }
        match Node::with_defaults(NodeKind::Loop) {
            Node::Loop(l) => {
                assert_eq!(l.iterations, DEFAULT_LOOP_ITERATIONS);
                assert!(l.children.is_empty());
            }
            Node::Atomic(_) => panic!("expected loop"),
        }
    }
}
