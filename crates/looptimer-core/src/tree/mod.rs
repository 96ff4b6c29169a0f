mod edit;
mod flatten;
mod node;

pub use edit::{add_node, delete_node, move_node, update_node, NodePatch};
pub use flatten::{flatten, flatten_loop, total_duration, PlayableEvent};
pub use node::{
    EventType, LoopNode, Node, NodeKind, NodeMut, NodeRef, TimerNode, DEFAULT_INTERVAL_SECS,
    DEFAULT_LOOP_ITERATIONS, ROOT_ID,
};
pub(crate) use node::new_node_id;
