// SPDX-License-Identifier: MIT OR Apache-2.0

//! Incremental win detection.
//!
//! A disjoint-set forest over every occupied cell plus four virtual anchors,
//! one per board edge. A color has won when its two edge anchors share a root.
//!
//! While at least one checkpoint is open, every write to the forest (parent
//! pointers, ranks, cell presence) is appended to a log. Rolling back replays
//! the log in reverse down to the latest checkpoint, which undoes the unions of
//! one move exactly, path compression included.

use crate::{board::Board, Color, Coord, Move};

/// Anchor for x = 0 (Black)
const WEST: usize = 0;
/// Anchor for x = size - 1 (Black)
const EAST: usize = 1;
/// Anchor for y = 0 (White)
const NORTH: usize = 2;
/// Anchor for y = size - 1 (White)
const SOUTH: usize = 3;
const ANCHORS: usize = 4;

/// A single logged write
#[derive(Debug, Clone, Copy)]
enum Change {
    Parent { node: usize, old: usize },
    Rank { node: usize, old: u8 },
    Added { node: usize },
}

/// Union-find with checkpoint/rollback
#[derive(Debug, Clone)]
pub struct Connectivity {
    size: u8,
    parent: Vec<usize>,
    rank: Vec<u8>,
    present: Vec<bool>,
    log: Vec<Change>,
    /// Log lengths at each open checkpoint, innermost last
    checkpoints: Vec<usize>,
}

impl Connectivity {
    /// Create an empty forest for a board of the given size
    pub fn new(size: u8) -> Self {
        let nodes = ANCHORS + usize::from(size) * usize::from(size);
        let mut present = vec![false; nodes];
        present[..ANCHORS].fill(true);
        Self {
            size,
            parent: (0..nodes).collect(),
            rank: vec![0; nodes],
            present,
            log: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Rebuild from scratch out of the current board contents.
    ///
    /// Costs O(cells) and carries no checkpoints; used after wholesale board
    /// changes and as the reference answer in tests.
    pub fn init_from_board(board: &Board) -> Self {
        let mut forest = Self::new(board.size());
        for (coord, color) in board.stones() {
            forest.on_place(board, Move::new(coord, color));
        }
        forest
    }

    /// Rebuild by replaying moves in order, opening a checkpoint before each
    /// so that every one of them can later be rolled back individually.
    pub fn replay(size: u8, moves: &[Move]) -> Self {
        let mut board = Board::new(size);
        let mut forest = Self::new(size);
        for mv in moves {
            if board.place_stone(mv.coord, mv.color).is_err() {
                tracing::warn!(coord = %mv.coord, "Skipping off-board move during replay");
                continue;
            }
            forest.checkpoint();
            forest.on_place(&board, *mv);
        }
        forest
    }

    /// Board size this forest was built for
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Register a stone that is already on `board` and join it with its
    /// same-colored neighbors and the edges it touches
    pub fn on_place(&mut self, board: &Board, mv: Move) {
        let Some(node) = self.index(mv.coord) else {
            tracing::warn!(coord = %mv.coord, "Ignoring off-board placement");
            return;
        };

        if !self.present[node] {
            self.present[node] = true;
            self.record(Change::Added { node });
        }

        for neighbor in mv.coord.neighbors() {
            if board.stone_at(neighbor) != Some(mv.color) {
                continue;
            }
            if let Some(other) = self.index(neighbor) {
                if self.present[other] {
                    self.union(node, other);
                }
            }
        }

        let last = i32::from(self.size) - 1;
        match mv.color {
            Color::Black => {
                if mv.coord.x == 0 {
                    self.union(node, WEST);
                }
                if mv.coord.x == last {
                    self.union(node, EAST);
                }
            }
            Color::White => {
                if mv.coord.y == 0 {
                    self.union(node, NORTH);
                }
                if mv.coord.y == last {
                    self.union(node, SOUTH);
                }
            }
        }
    }

    /// Whether `color` has joined its two edges
    pub fn has_won(&self, color: Color) -> bool {
        let (low, high) = match color {
            Color::Black => (WEST, EAST),
            Color::White => (NORTH, SOUTH),
        };
        self.root(low) == self.root(high)
    }

    /// Whether two occupied cells are in the same group
    pub fn connected(&self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(a), Some(b)) if self.present[a] && self.present[b] => {
                self.root(a) == self.root(b)
            }
            _ => false,
        }
    }

    /// Mark a point that [`rollback`](Self::rollback) will return to
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.log.len());
    }

    /// Revert every change since the latest checkpoint and close it.
    ///
    /// Returns `false` when no checkpoint is open.
    pub fn rollback(&mut self) -> bool {
        let Some(mark) = self.checkpoints.pop() else {
            return false;
        };
        while self.log.len() > mark {
            let Some(change) = self.log.pop() else { break };
            match change {
                Change::Parent { node, old } => self.parent[node] = old,
                Change::Rank { node, old } => self.rank[node] = old,
                Change::Added { node } => self.present[node] = false,
            }
        }
        if self.checkpoints.is_empty() {
            self.log.clear();
        }
        true
    }

    /// Number of open checkpoints
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        coord.is_valid(self.size).then(|| {
            let (x, y) = (coord.x as usize, coord.y as usize);
            ANCHORS + x * usize::from(self.size) + y
        })
    }

    fn record(&mut self, change: Change) {
        if !self.checkpoints.is_empty() {
            self.log.push(change);
        }
    }

    fn set_parent(&mut self, node: usize, parent: usize) {
        let old = self.parent[node];
        if old != parent {
            self.parent[node] = parent;
            self.record(Change::Parent { node, old });
        }
    }

    /// Root lookup without compression, for queries
    fn root(&self, mut node: usize) -> usize {
        while self.parent[node] != node {
            node = self.parent[node];
        }
        node
    }

    /// Root lookup with logged path compression
    fn find(&mut self, node: usize) -> usize {
        let root = self.root(node);
        let mut current = node;
        while self.parent[current] != root && current != root {
            let next = self.parent[current];
            self.set_parent(current, root);
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        tracing::trace!(a, b, "union");
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.set_parent(ra, rb),
            std::cmp::Ordering::Greater => self.set_parent(rb, ra),
            std::cmp::Ordering::Equal => {
                self.set_parent(rb, ra);
                let old = self.rank[ra];
                self.rank[ra] = old + 1;
                self.record(Change::Rank { node: ra, old });
            }
        }
    }
}

impl PartialEq for Connectivity {
    /// Two forests are equal when they describe the same partition of the
    /// same occupied cells, regardless of tree shape.
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size || self.present != other.present {
            return false;
        }
        let nodes = self.parent.len();
        (0..nodes).filter(|&n| self.present[n]).all(|a| {
            (a + 1..nodes)
                .filter(|&b| self.present[b])
                .all(|b| (self.root(a) == self.root(b)) == (other.root(a) == other.root(b)))
        })
    }
}
