//! Persistent game tree shared by the minimax and alpha-beta agents.
//!
//! A tree lives for one move computation. Each iterative-deepening pass walks
//! the same tree one ply deeper; nodes expanded by an earlier pass keep their
//! children, so a pass only builds the new frontier.

use crate::arena::Arbiter;
use crate::error::{BoardError, SearchError};
use crate::game::{Board, Player};

pub struct SearchNode {
    pub(super) board: Board,
    pub(super) column: Option<usize>,
    pub(super) value: i32,
    pub(super) children: Vec<SearchNode>,
    pub(super) chosen_move: Option<usize>,
}

impl SearchNode {
    pub fn root(board: Board) -> Self {
        SearchNode {
            board,
            column: None,
            value: 0,
            children: Vec::new(),
            chosen_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Column that led to this node; `None` for the root
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn chosen_move(&self) -> Option<usize> {
        self.chosen_move
    }

    pub fn children(&self) -> &[SearchNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_full()
    }

    /// Total number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(SearchNode::size).sum::<usize>()
    }

    /// Add one child per legal column with `mover`'s piece dropped in it.
    /// Does nothing if the node already has children.
    pub fn expand(&mut self, mover: Player) -> Result<(), BoardError> {
        if !self.is_leaf() {
            return Ok(());
        }
        for col in 0..self.board.num_cols() {
            if self.board.is_column_full(col) {
                continue;
            }
            self.board.drop_piece(col, mover)?;
            let snapshot = self.board.clone();
            self.board.lift_piece(col, mover)?;
            self.children.push(SearchNode {
                column: Some(col),
                ..SearchNode::root(snapshot)
            });
        }
        Ok(())
    }
}

/// True if `candidate` sits strictly closer to the centre column than
/// `current`. Used to break exact ties between equally valued moves.
pub(super) fn closer_to_center(cols: usize, current: Option<usize>, candidate: usize) -> bool {
    let center = (cols / 2) as isize;
    match current {
        None => true,
        Some(current) => {
            (center - candidate as isize).abs() < (center - current as isize).abs()
        }
    }
}

/// Outcome of an iterative-deepening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Deepest fully completed pass; 0 if none finished
    pub depth: usize,
    pub best_move: Option<usize>,
    pub value: i32,
}

/// Run `pass` at depth 1, 2, ... over the same tree until the arbiter is
/// cancelled or the search reaches the end of the game. The root's chosen
/// move is proposed after every completed pass, so an interrupted pass
/// leaves the previous answer in place.
pub(super) fn deepen<F>(
    root: &mut SearchNode,
    player: Player,
    arbiter: &Arbiter,
    mut pass: F,
) -> Result<SearchReport, SearchError>
where
    F: FnMut(&mut SearchNode, usize) -> Result<i32, SearchError>,
{
    if root.is_terminal() {
        return Err(SearchError::BoardFull);
    }
    root.expand(player)?;

    let max_depth = root.board.num_empty_cells();
    let mut report = SearchReport {
        depth: 0,
        best_move: None,
        value: 0,
    };

    let mut depth = 1;
    while !arbiter.is_cancelled() && depth <= max_depth {
        let value = pass(root, depth)?;
        if let Some(col) = root.chosen_move {
            arbiter.propose(col)?;
        }
        report = SearchReport {
            depth,
            best_move: root.chosen_move,
            value,
        };
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "depth {} done: column {:?} value {} ({} nodes)",
                depth,
                root.chosen_move,
                value,
                root.size()
            );
        }
        depth += 1;
    }

    Ok(report)
}
