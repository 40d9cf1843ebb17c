use std::cmp::Ordering;
use std::collections::HashMap;

use crate::grid::Grid;
use crate::tree::{CandidateTree, INFEASIBLE, NodeId};
use crate::types::{Cell, Rect};

/// One distinct rectangle out of a candidate tree.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub node: NodeId,
    pub end: Cell,
    pub weight: f64,
}

impl Candidate {
    pub fn is_feasible(&self) -> bool {
        self.weight != INFEASIBLE
    }
}

/// Picks one slice per call, starting from the first uncut cell.
pub struct Slicer<'a> {
    grid: &'a mut Grid,
}

impl<'a> Slicer<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        Self { grid }
    }

    /// Cuts the best rectangle anchored at the first uncut cell and returns
    /// it. If no rectangle from that anchor is feasible the anchor cell is
    /// wasted and `None` is returned. Does nothing on an empty grid.
    pub fn select_slice(&mut self) -> Option<Rect> {
        let Some(anchor) = self.grid.first_uncut() else {
            tracing::debug!("grid is empty, nothing to slice");
            return None;
        };

        let tree = CandidateTree::build(self.grid, anchor);
        let candidates = collect_candidates(&tree);

        match best_candidate(&candidates) {
            Some(best) if best.node != CandidateTree::ROOT => {
                let rect = self.grid.cut(tree.rect(best.node));
                tracing::debug!(
                    %anchor,
                    slice = %rect,
                    weight = best.weight,
                    nodes = tree.node_count(),
                    candidates = candidates.len(),
                    "cut slice"
                );
                Some(rect)
            }
            _ => {
                self.grid.waste(anchor);
                tracing::debug!(%anchor, nodes = tree.node_count(), "no feasible slice, wasting anchor");
                None
            }
        }
    }
}

pub fn compare_weights(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Walks the tree in pre-order and keeps one entry per rectangle, in
/// first-seen order. When two paths reach the same rectangle with
/// different weights, the lower weight wins.
pub fn collect_candidates(tree: &CandidateTree) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut seen: HashMap<Cell, usize> = HashMap::new();

    for id in tree.preorder() {
        let node = tree.node(id);
        let candidate = Candidate {
            node: id,
            end: node.end,
            weight: node.weight,
        };
        match seen.get(&node.end) {
            Some(&slot) => {
                if compare_weights(candidate.weight, candidates[slot].weight) == Ordering::Less {
                    candidates[slot] = candidate;
                }
            }
            None => {
                seen.insert(node.end, candidates.len());
                candidates.push(candidate);
            }
        }
    }

    candidates
}

/// Highest weighted feasible candidate. Ties go to the earliest one.
pub fn best_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for c in candidates.iter().filter(|c| c.is_feasible()) {
        if best.is_none_or(|b| compare_weights(c.weight, b.weight) == Ordering::Greater) {
            best = Some(c);
        }
    }
    best
}
