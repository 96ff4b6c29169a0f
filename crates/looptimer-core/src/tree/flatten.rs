//! Expansion of a workout tree into the flat playback queue.

use serde::{Deserialize, Serialize};

use super::node::{EventType, LoopNode, Node, TimerNode};

/// One entry of the playback queue. Derived from the tree, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableEvent {
    /// Seconds.
    pub duration: u64,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: EventType,
}

impl From<&TimerNode> for PlayableEvent {
    fn from(node: &TimerNode) -> Self {
        Self {
            duration: node.duration,
            label: node.label.clone(),
            kind: node.event_type,
        }
    }
}

/// Flatten any node. Pure and total: the same tree always yields the same
/// queue.
pub fn flatten(node: &Node) -> Vec<PlayableEvent> {
    match node {
        Node::Atomic(t) => vec![PlayableEvent::from(t)],
        Node::Loop(l) => flatten_loop(l),
    }
}

/// Flatten a loop: children in order form one body, repeated `iterations`
/// times back to back.
pub fn flatten_loop(node: &LoopNode) -> Vec<PlayableEvent> {
    if node.iterations == 0 {
        return Vec::new();
    }
    let body: Vec<PlayableEvent> = node.children.iter().flat_map(flatten).collect();
    let mut out = Vec::with_capacity(body.len() * node.iterations as usize);
    for _ in 0..node.iterations {
        out.extend(body.iter().cloned());
    }
    out
}

/// Plain integer sum of event durations.
pub fn total_duration(queue: &[PlayableEvent]) -> u64 {
    queue.iter().map(|e| e.duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn atomic(id: &str, duration: u64, label: &str) -> Node {
        Node::atomic(id, EventType::Work, duration, label)
    }

    #[test]
    fn nested_loops_multiply() {
        let tree = Node::group(
            "outer",
            2,
            vec![
                atomic("a", 5, "Five"),
                Node::group("inner", 3, vec![atomic("b", 10, "Ten")]),
            ],
        );
        let durations: Vec<u64> = flatten(&tree).iter().map(|e| e.duration).collect();
        assert_eq!(durations, vec![5, 10, 10, 10, 5, 10, 10, 10]);
    }

    #[test]
    fn order_is_preserved() {
        let tree = Node::group(
            "l",
            1,
            vec![
                atomic("1", 5, "First"),
                atomic("2", 5, "Second"),
                atomic("3", 5, "Third"),
            ],
        );
        let labels: Vec<String> = flatten(&tree).into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn zero_iterations_is_empty() {
        let tree = Node::group("l", 0, vec![atomic("a", 5, "A")]);
        assert!(flatten(&tree).is_empty());
    }

    #[test]
    fn empty_loop_is_empty() {
        let tree = LoopNode::new("root", 4, vec![]);
        assert!(flatten_loop(&tree).is_empty());
    }

    #[test]
    fn atomic_passes_through() {
        let events = flatten(&atomic("s", 10, "Single"));
        assert_eq!(
            events,
            vec![PlayableEvent {
                duration: 10,
                label: "Single".into(),
                kind: EventType::Work,
            }]
        );
    }

    #[test]
    fn rest_type_is_carried_over() {
        let events = flatten(&Node::atomic("r", EventType::Rest, 15, "Breathe"));
        assert_eq!(events[0].kind, EventType::Rest);
    }

    #[test]
    fn total_duration_sums_queue() {
        let tree = Node::group("l", 3, vec![atomic("a", 20, "W"), atomic("b", 10, "R")]);
        assert_eq!(total_duration(&flatten(&tree)), 90);
        assert_eq!(total_duration(&[]), 0);
    }

    #[test]
    fn event_serializes_kind_as_type() {
        let json = serde_json::to_value(flatten(&atomic("a", 3, "Go"))).unwrap();
        assert_eq!(json[0]["type"], "work");
        assert_eq!(json[0]["duration"], 3);
    }

    fn arb_tree() -> impl Strategy<Value = Node> {
        let leaf = (0u64..120, "[a-z]{1,6}")
            .prop_map(|(d, label)| Node::atomic("leaf", EventType::Work, d, label));
        leaf.prop_recursive(4, 32, 4, |inner| {
            (0u32..4, prop::collection::vec(inner, 0..4))
                .prop_map(|(n, children)| Node::group("loop", n, children))
        })
    }

    proptest! {
        #[test]
        fn flatten_is_deterministic(tree in arb_tree()) {
            prop_assert_eq!(flatten(&tree), flatten(&tree));
        }

        #[test]
        fn loop_length_is_iterations_times_body(
            iterations in 0u32..6,
            children in prop::collection::vec(arb_tree(), 0..4),
        ) {
            let body: usize = children.iter().map(|c| flatten(c).len()).sum();
            let tree = Node::group("l", iterations, children);
            prop_assert_eq!(flatten(&tree).len(), body * iterations as usize);
        }
    }
}
