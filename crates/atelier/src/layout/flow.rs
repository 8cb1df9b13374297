//! Relationship-graph layout planner.
//!
//! Builds a directed graph from `next` links, partitions it into chains and
//! isolated nodes, and places chains on horizontal rows with children
//! stacked beneath their parents. An identity is fully placed at most once;
//! every later occurrence becomes a [`Teleport`] marker, which keeps the
//! traversal cycle-safe.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use petgraph::{Direction, graph::DiGraph};

use atelier_core::{
    geometry::{Point, Rect, Size},
    identifier::ArtifactId,
};

use crate::layout::{Teleport, node::NodeArena};

/// Isolated artifacts pack into this many columns below the chain rows.
const ISOLATED_COLUMNS: usize = 10;

/// The output of the flow planner.
#[derive(Debug, Default)]
pub struct FlowLayout {
    positions: IndexMap<ArtifactId, Point>,
    teleports: Vec<Teleport>,
}

impl FlowLayout {
    /// Computed position per identity, in placement order.
    pub fn positions(&self) -> &IndexMap<ArtifactId, Point> {
        &self.positions
    }

    /// Teleport markers for duplicate occurrences.
    pub fn teleports(&self) -> &[Teleport] {
        &self.teleports
    }

    /// Consumes the layout into its parts.
    pub fn into_parts(self) -> (IndexMap<ArtifactId, Point>, Vec<Teleport>) {
        (self.positions, self.teleports)
    }
}

/// Plans relationship layout over a node arena.
pub struct FlowPlanner<'a> {
    arena: &'a NodeArena,
    sizes: &'a IndexMap<ArtifactId, Size>,
    horizontal_gap: f32,
    vertical_gap: f32,
}

impl<'a> FlowPlanner<'a> {
    pub fn new(
        arena: &'a NodeArena,
        sizes: &'a IndexMap<ArtifactId, Size>,
        horizontal_gap: f32,
        vertical_gap: f32,
    ) -> Self {
        Self {
            arena,
            sizes,
            horizontal_gap,
            vertical_gap,
        }
    }

    /// Computes positions and teleports for the whole arena.
    ///
    /// Deterministic for a given arena order. Terminates on any input,
    /// including cyclic `next` and `children` graphs.
    pub fn layout(&self) -> FlowLayout {
        let chains = self.chains();
        let (multi, isolated): (Vec<_>, Vec<_>) =
            chains.into_iter().partition(|chain| chain.len() > 1);

        debug!(
            chains = multi.len(),
            isolated = isolated.len();
            "Placing relationship layout"
        );

        let mut positions = IndexMap::new();
        let mut teleports = Vec::new();

        // Each multi-item chain occupies its own horizontal row.
        let mut y = 0.0f32;
        for chain in &multi {
            let mut x = 0.0f32;
            let mut row_height = 0.0f32;
            for &idx in chain {
                let node = self.arena.get(idx);
                let size = self.size_of(node.id());
                if positions.contains_key(&node.id()) {
                    teleports.push(Teleport::new(
                        Rect::new(Point::new(x, y), size),
                        node.id(),
                    ));
                } else {
                    positions.insert(node.id(), Point::new(x, y));
                }
                row_height = row_height.max(size.height());
                x += size.width() + self.horizontal_gap;
            }
            y += row_height + self.vertical_gap;
        }

        // Stack children beneath every fully placed chain node. Children
        // placed here recurse in turn; duplicates become teleports and are
        // not recursed into.
        let chain_placed: Vec<ArtifactId> = positions.keys().copied().collect();
        for id in chain_placed {
            if let Some(idx) = self.arena.index_of(id) {
                self.place_children(idx, &mut positions, &mut teleports);
            }
        }

        // Isolated artifacts pack into a fixed-width grid below everything
        // placed so far. Identities already placed as someone's child are
        // skipped: no link demands a marker in the grid.
        let base_y = lowest_edge(&positions, self.sizes, &teleports)
            .map(|bottom| bottom + self.vertical_gap)
            .unwrap_or(0.0);
        let mut packed = 0usize;
        for chain in &isolated {
            let node = self.arena.get(chain[0]);
            if positions.contains_key(&node.id()) {
                continue;
            }
            let size = self.size_of(node.id());
            let col = (packed % ISOLATED_COLUMNS) as f32;
            let row = (packed / ISOLATED_COLUMNS) as f32;
            positions.insert(
                node.id(),
                Point::new(
                    col * (size.width() + self.horizontal_gap),
                    base_y + row * (size.height() + self.vertical_gap),
                ),
            );
            packed += 1;
        }

        FlowLayout {
            positions,
            teleports,
        }
    }

    /// Builds one chain per start node by following first `next` targets.
    ///
    /// Roots (nodes that no `next` link targets) start chains in arena
    /// order. Nodes left unclaimed afterwards are members of root-less
    /// cycles and start chains in arena order as well.
    fn chains(&self) -> Vec<Vec<usize>> {
        let mut graph = DiGraph::<usize, ()>::new();
        let indices: Vec<_> = (0..self.arena.len()).map(|idx| graph.add_node(idx)).collect();
        for (idx, node) in self.arena.iter().enumerate() {
            for &target in node.next() {
                graph.add_edge(indices[idx], indices[target], ());
            }
        }

        let roots: Vec<usize> = graph
            .node_indices()
            .filter(|&node| {
                graph
                    .neighbors_directed(node, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|node| graph[node])
            .collect();

        let mut claimed = vec![false; self.arena.len()];
        let mut chains = Vec::new();
        for &root in &roots {
            chains.push(self.follow_chain(root, &mut claimed));
        }
        for idx in 0..self.arena.len() {
            if !claimed[idx] {
                chains.push(self.follow_chain(idx, &mut claimed));
            }
        }
        chains
    }

    /// Follows first `next` targets from `start` until the chain ends or
    /// revisits one of its own members.
    fn follow_chain(&self, start: usize, claimed: &mut [bool]) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(idx) = current {
            if !seen.insert(idx) {
                break;
            }
            chain.push(idx);
            claimed[idx] = true;
            current = self.arena.get(idx).first_next();
        }
        chain
    }

    /// Stacks the children of a placed node beneath it, recursing into each
    /// newly placed child. Returns the bottom edge of the subtree.
    fn place_children(
        &self,
        parent_idx: usize,
        positions: &mut IndexMap<ArtifactId, Point>,
        teleports: &mut Vec<Teleport>,
    ) -> f32 {
        let parent = self.arena.get(parent_idx);
        let parent_position = positions[&parent.id()];
        let parent_size = self.size_of(parent.id());

        let mut bottom = parent_position.y() + parent_size.height();
        let mut cursor = bottom + self.vertical_gap;
        for &child_idx in parent.children() {
            let child = self.arena.get(child_idx);
            let size = self.size_of(child.id());
            if positions.contains_key(&child.id()) {
                teleports.push(Teleport::new(
                    Rect::new(Point::new(parent_position.x(), cursor), size),
                    child.id(),
                ));
                bottom = cursor + size.height();
            } else {
                positions.insert(child.id(), Point::new(parent_position.x(), cursor));
                bottom = self.place_children(child_idx, positions, teleports);
            }
            cursor = bottom + self.vertical_gap;
        }
        bottom
    }

    fn size_of(&self, id: ArtifactId) -> Size {
        self.sizes.get(&id).copied().unwrap_or_default()
    }
}

/// The lowest bottom edge over all placed rects and teleports.
fn lowest_edge(
    positions: &IndexMap<ArtifactId, Point>,
    sizes: &IndexMap<ArtifactId, Size>,
    teleports: &[Teleport],
) -> Option<f32> {
    let placed = positions.iter().map(|(id, position)| {
        position.y() + sizes.get(id).map(|s| s.height()).unwrap_or_default()
    });
    let markers = teleports.iter().map(|teleport| teleport.rect().max_y());
    placed.chain(markers).reduce(f32::max)
}
