//! The flat node arena consumed by the relationship planner.
//!
//! Artifacts are lowered into [`LayoutNode`] entries held in a `Vec`, with
//! relationships rewritten as arena indices. Edges whose target is not in
//! the current set are dropped here, so the planner never sees a dangling
//! reference. The arena is rebuilt on every pass and never mutated after
//! construction.

use indexmap::IndexMap;

use atelier_core::{
    artifact::{ArtifactKind, ArtifactSet},
    identifier::ArtifactId,
};

/// One artifact lowered for relationship layout.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    id: ArtifactId,
    kind: ArtifactKind,
    next: Vec<usize>,
    children: Vec<usize>,
}

impl LayoutNode {
    /// The artifact identity.
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// The artifact kind.
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Arena indices of declared `next` targets present in the set.
    pub fn next(&self) -> &[usize] {
        &self.next
    }

    /// Arena indices of declared children present in the set.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// The first `next` target, which alone drives chain placement.
    pub fn first_next(&self) -> Option<usize> {
        self.next.first().copied()
    }
}

/// Flat arena of layout nodes in set order.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<LayoutNode>,
    index: IndexMap<ArtifactId, usize>,
}

impl NodeArena {
    /// Lowers an artifact set into an arena, dropping dangling references.
    pub fn from_set(set: &ArtifactSet) -> Self {
        let index: IndexMap<ArtifactId, usize> = set
            .iter()
            .enumerate()
            .map(|(idx, artifact)| (artifact.id(), idx))
            .collect();

        let resolve = |targets: &[ArtifactId]| -> Vec<usize> {
            targets
                .iter()
                .filter_map(|id| index.get(id).copied())
                .collect()
        };

        let nodes = set
            .iter()
            .map(|artifact| LayoutNode {
                id: artifact.id(),
                kind: artifact.kind(),
                next: resolve(artifact.relationships().next()),
                children: resolve(artifact.relationships().children()),
            })
            .collect();

        Self { nodes, index }
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds; indices only ever come from this
    /// arena.
    pub fn get(&self, idx: usize) -> &LayoutNode {
        &self.nodes[idx]
    }

    /// Iterates nodes in set order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter()
    }

    /// Looks up the arena index of an identity.
    pub fn index_of(&self, id: ArtifactId) -> Option<usize> {
        self.index.get(&id).copied()
    }
}
