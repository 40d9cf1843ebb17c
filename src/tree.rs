//! Candidate rectangles grown from a single anchor cell.
//!
//! Every node is a rectangle from the anchor to its `end` cell. Children
//! extend `end` one cell to the right or one cell down, so each path from the
//! root is one way of growing the slice. The same rectangle is usually
//! reachable along several paths; deduplication happens in the slicer.

use crate::grid::Grid;
use crate::types::{Cell, Rect, Topping};

pub type NodeId = usize;

/// Weight of a rectangle that can't be cut.
pub const INFEASIBLE: f64 = f64::NEG_INFINITY;

#[derive(Debug, Clone)]
pub struct Node {
    pub end: Cell,
    pub weight: f64,
    /// Uncut cells per topping inside the rectangle, indexed by `Topping::index`.
    pub counts: [usize; 2],
    pub previous: Option<NodeId>,
    pub right: Option<NodeId>,
    pub bottom: Option<NodeId>,
}

impl Node {
    pub fn is_feasible(&self) -> bool {
        self.weight != INFEASIBLE
    }
}

#[derive(Debug, Clone)]
pub struct CandidateTree {
    anchor: Cell,
    nodes: Vec<Node>,
}

impl CandidateTree {
    pub const ROOT: NodeId = 0;

    /// Grows every rectangle reachable from `anchor` that is made of uncut
    /// cells only and fits the grid's max slice size.
    pub fn build(grid: &Grid, anchor: Cell) -> Self {
        let root = Node {
            end: anchor,
            weight: INFEASIBLE,
            counts: counts(grid, Rect::single(anchor)),
            previous: None,
            right: None,
            bottom: None,
        };
        let mut tree = Self {
            anchor,
            nodes: vec![root],
        };

        let mut pending = vec![Self::ROOT];
        while let Some(id) = pending.pop() {
            let end = tree.nodes[id].end;

            if let Some(cell) = grid.right_of(end)
                && can_grow(grid, anchor, cell)
            {
                let child = tree.grow(grid, id, cell);
                tree.nodes[id].right = Some(child);
                pending.push(child);
            }

            if let Some(cell) = grid.below_of(end)
                && can_grow(grid, anchor, cell)
            {
                let child = tree.grow(grid, id, cell);
                tree.nodes[id].bottom = Some(child);
                pending.push(child);
            }
        }

        tree
    }

    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes, root included, so never zero.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn rect(&self, id: NodeId) -> Rect {
        Rect::new(self.anchor, self.nodes[id].end)
    }

    /// Node ids in pre-order: node, then its right subtree, then its bottom subtree.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = &self.nodes[id];
            if let Some(bottom) = node.bottom {
                stack.push(bottom);
            }
            if let Some(right) = node.right {
                stack.push(right);
            }
        }
        order
    }

    fn grow(&mut self, grid: &Grid, previous: NodeId, end: Cell) -> NodeId {
        let rect = Rect::new(self.anchor, end);
        let counts = counts(grid, rect);
        let weight = weigh(grid, &self.nodes[previous], rect, counts);
        self.nodes.push(Node {
            end,
            weight,
            counts,
            previous: Some(previous),
            right: None,
            bottom: None,
        });
        self.nodes.len() - 1
    }
}

/// Feasible rectangles accumulate the weight of the path that led to them,
/// so bigger slices score higher than the slices they grew from.
fn weigh(grid: &Grid, previous: &Node, rect: Rect, counts: [usize; 2]) -> f64 {
    let min = grid.min_ingredient();
    if rect.area() > grid.max_size() || counts.iter().any(|&n| n < min) {
        return INFEASIBLE;
    }
    let base = if previous.is_feasible() {
        previous.weight
    } else {
        0.0
    };
    base + reward(grid, previous, rect.end, counts)
}

/// A child must stay within the size cap and must not swallow a cell that
/// is already cut or wasted, even one off the growth path.
fn can_grow(grid: &Grid, anchor: Cell, end: Cell) -> bool {
    let rect = Rect::new(anchor, end);
    rect.area() <= grid.max_size() && grid.is_clear(rect)
}

fn counts(grid: &Grid, rect: Rect) -> [usize; 2] {
    Topping::ALL.map(|t| grid.topping_count(t, rect))
}

/// Score gained by growing from `previous` to a rectangle that already
/// holds enough of both toppings.
fn reward(grid: &Grid, previous: &Node, end: Cell, counts: [usize; 2]) -> f64 {
    let min = grid.min_ingredient();
    let mut reward = 0.0;

    // Progress towards a minimum that wasn't met yet.
    for t in Topping::ALL {
        let i = t.index();
        if previous.counts[i] < min && counts[i] > previous.counts[i] {
            reward += 1.0;
        }
    }

    // Toppings left on the grid if the previous / current rectangle were cut.
    let before = Topping::ALL.map(|t| grid.remaining(t) - previous.counts[t.index()]);
    let after = Topping::ALL.map(|t| grid.remaining(t) - counts[t.index()]);
    let ratio = |t: Topping| {
        let i = t.index();
        if before[i] == 0 {
            0.0
        } else {
            (after[i] as f64 - before[i] as f64) / before[i] as f64
        }
    };

    // Ratios are <= 0. Eating into the abundant topping pays, eating into the
    // scarce one costs.
    let abundant = match before[0].cmp(&before[1]) {
        std::cmp::Ordering::Greater => Some(Topping::ALL[0]),
        std::cmp::Ordering::Less => Some(Topping::ALL[1]),
        std::cmp::Ordering::Equal => None,
    };
    if let Some(abundant) = abundant {
        reward -= ratio(abundant);
        reward += ratio(abundant.other());
    }

    // Against an edge or a consumed cell the slice has fewer ways to grow.
    if grid.right_of(end).is_none() || grid.below_of(end).is_none() {
        reward += 1.0;
    }

    reward
}
