use serde::Serialize;

use crate::core::Position;

/// Node identifier as carried in the wire `id`/`output` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

/// What a chain node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChainLink {
    Basic,
    Setting { position: Position, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainNode {
    pub id: NodeId,
    pub next: Option<NodeId>,
    pub link: ChainLink,
}

impl ChainNode {
    /// Wire `output` value; `0` marks the end of the execution graph.
    #[must_use]
    pub fn output(&self) -> u32 {
        self.next.map_or(0, NodeId::value)
    }
}

/// Execution order consumed by the backend: basic record, long chain, short chain.
///
/// Pointer rules:
/// - the basic record always points to `1`
/// - every long node points to `id + 1`, so the last one points one past the
///   long chain even when no short chain follows
/// - short nodes point to `id + 1`, the last one is terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleChain {
    nodes: Vec<ChainNode>,
}

impl RuleChain {
    #[must_use]
    pub fn build(long_len: usize, short_len: usize) -> Self {
        let mut nodes = Vec::with_capacity(1 + long_len + short_len);
        nodes.push(ChainNode {
            id: NodeId::ROOT,
            next: Some(NodeId(1)),
            link: ChainLink::Basic,
        });

        let mut id: u32 = 1;
        for index in 0..long_len {
            nodes.push(ChainNode {
                id: NodeId(id),
                next: Some(NodeId(id + 1)),
                link: ChainLink::Setting {
                    position: Position::Long,
                    index,
                },
            });
            id += 1;
        }

        for index in 0..short_len {
            let is_last = index + 1 == short_len;
            nodes.push(ChainNode {
                id: NodeId(id),
                next: (!is_last).then_some(NodeId(id + 1)),
                link: ChainLink::Setting {
                    position: Position::Short,
                    index,
                },
            });
            id += 1;
        }

        Self { nodes }
    }

    #[must_use]
    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids equal their position, so lookup is direct indexing.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&ChainNode> {
        usize::try_from(id.value())
            .ok()
            .and_then(|index| self.nodes.get(index))
    }

    /// Follows `next` pointers from the root until a terminal or dangling pointer.
    pub fn walk(&self) -> impl Iterator<Item = &ChainNode> {
        let mut cursor = self.node(NodeId::ROOT);
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = current.next.and_then(|next| self.node(next));
            Some(current)
        })
        .take(self.nodes.len())
    }
}
