use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Which opened cells earn a point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealScoring {
    /// Every safe cell opened, cascaded ones included.
    #[default]
    EveryOpenedCell,
    /// Only the clicked cell, when it is safe.
    RootOnly,
}

/// Cells opened by a single reveal, in opening order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub opened: Vec<Coord2>,
    pub score_delta: i32,
    pub mine_hit: Option<Coord2>,
    pub discovered: Vec<(Coord2, SpecialKind)>,
}

impl Reveal {
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty()
    }

    fn extend(&mut self, other: Reveal) {
        self.opened.extend(other.opened);
        self.score_delta += other.score_delta;
        self.mine_hit = self.mine_hit.or(other.mine_hit);
        self.discovered.extend(other.discovered);
    }
}

/// Opens a cell, cascading through zero and special cells.
///
/// Open and flagged targets are left alone and yield an empty result. Opening a mine only reports it, lives are
/// handled by the caller.
pub fn reveal(board: &mut Board, coords: Coord2, scoring: RevealScoring) -> Reveal {
    let mut result = Reveal::default();
    let mut to_visit = VecDeque::from([coords]);
    let mut root = true;

    while let Some(visit_coords) = to_visit.pop_front() {
        if !board.open_cell(visit_coords) {
            if !root {
                log::trace!("Skipping cell at {:?}", visit_coords);
            }
            root = false;
            continue;
        }

        let cell = board[visit_coords];
        result.opened.push(visit_coords);

        if cell.is_mine() {
            log::debug!("Mine opened at {:?}", visit_coords);
            result.mine_hit = Some(visit_coords);
        } else if root || scoring == RevealScoring::EveryOpenedCell {
            result.score_delta += 1;
        }
        root = false;

        if let Some(kind) = cell.kind().special_kind() {
            log::debug!("Discovered {:?} cell at {:?}", kind, visit_coords);
            result.discovered.push((visit_coords, kind));
        }

        if cell.cascades() {
            to_visit.extend(
                board
                    .iter_neighbors(visit_coords)
                    .filter(|&pos| board[pos].can_open() && !board[pos].is_mine()),
            );
        }
    }

    if result.opened.len() > 1 {
        log::trace!(
            "Flood fill from {:?} opened {} cells",
            coords,
            result.opened.len()
        );
    }
    result
}

/// Opens every closed cell of the board, flagged ones included. No scoring, no cascades, and nothing counts as
/// revealed by play.
pub fn reveal_all_force(board: &mut Board) -> Vec<Coord2> {
    let mut opened = Vec::new();
    for coords in board.iter_coords() {
        if board.force_open_cell(coords) {
            opened.push(coords);
        }
    }
    opened
}

/// Reveals every closed, unflagged safe cell of the 3×3 area around `center`. Mines in the area stay closed.
pub fn reveal_area(board: &mut Board, center: Coord2, scoring: RevealScoring) -> Reveal {
    let mut result = Reveal::default();
    for pos in iter_area(center, board.size()) {
        let cell = board[pos];
        if cell.can_open() && !cell.is_mine() {
            result.extend(reveal(board, pos, scoring));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_layout(size, mines, &[], &[]).unwrap()
    }

    #[test]
    fn flood_fill_opens_zero_region() {
        let mut board = layout((3, 3), &[(2, 2)]);

        let result = reveal(&mut board, (0, 0), RevealScoring::EveryOpenedCell);

        assert_eq!(result.opened.len(), 8);
        assert_eq!(result.score_delta, 8);
        assert_eq!(result.mine_hit, None);
        assert!(board[(1, 1)].is_open());
        assert!(!board[(2, 2)].is_open());
    }

    #[test]
    fn root_only_scoring_counts_one_cell() {
        let mut board = layout((3, 3), &[(2, 2)]);

        let result = reveal(&mut board, (0, 0), RevealScoring::RootOnly);

        assert_eq!(result.opened.len(), 8);
        assert_eq!(result.score_delta, 1);
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut board = layout((3, 3), &[(2, 2)]);

        let result = reveal(&mut board, (1, 1), RevealScoring::EveryOpenedCell);

        assert_eq!(result.opened, vec![(1, 1)]);
        assert_eq!(result.score_delta, 1);
    }

    #[test]
    fn second_reveal_is_a_no_op() {
        let mut board = layout((3, 3), &[(2, 2)]);
        reveal(&mut board, (0, 0), RevealScoring::EveryOpenedCell);

        let again = reveal(&mut board, (0, 0), RevealScoring::EveryOpenedCell);

        assert!(again.is_empty());
        assert_eq!(again.score_delta, 0);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = layout((1, 5), &[(0, 4)]);
        board.toggle_flag((0, 1));

        let result = reveal(&mut board, (0, 0), RevealScoring::EveryOpenedCell);

        assert_eq!(result.opened, vec![(0, 0)]);
        assert!(board[(0, 1)].is_flagged());
        assert!(!board[(0, 2)].is_open());
    }

    #[test]
    fn flagged_target_is_left_alone() {
        let mut board = layout((2, 2), &[(0, 0)]);
        board.toggle_flag((1, 1));

        assert!(reveal(&mut board, (1, 1), RevealScoring::EveryOpenedCell).is_empty());
    }

    #[test]
    fn mine_is_opened_and_reported() {
        let mut board = layout((2, 2), &[(0, 0)]);

        let result = reveal(&mut board, (0, 0), RevealScoring::EveryOpenedCell);

        assert_eq!(result.opened, vec![(0, 0)]);
        assert_eq!(result.mine_hit, Some((0, 0)));
        assert_eq!(result.score_delta, 0);
        assert_eq!(board.opened_mine_count(), 1);
    }

    #[test]
    fn special_cells_are_discovered_and_cascade() {
        // specials spread like zero cells
        let mut board = Board::from_layout((3, 4), &[(2, 3)], &[(0, 0)], &[(0, 1)]).unwrap();

        let result = reveal(&mut board, (0, 0), RevealScoring::EveryOpenedCell);

        assert_eq!(
            result.discovered,
            vec![((0, 0), SpecialKind::Surprise), ((0, 1), SpecialKind::Question)]
        );
        assert!(board[(0, 0)].is_discovered());
        assert!(!board[(0, 0)].is_activated());
        assert_eq!(result.opened.len(), 11);
    }

    #[test]
    fn force_reveal_opens_everything_without_scoring() {
        let mut board = Board::from_layout((2, 2), &[(0, 0)], &[(1, 1)], &[]).unwrap();
        board.toggle_flag((0, 0));

        let opened = reveal_all_force(&mut board);

        assert_eq!(opened.len(), 4);
        assert!(board.iter_coords().all(|pos| board[pos].is_open()));
        assert!(board[(0, 0)].is_flagged());
        assert!(board[(1, 1)].is_discovered());
        assert_eq!(board.opened_safe_count(), 0);
        assert_eq!(board.flagged_mine_count(), 1);
    }

    #[test]
    fn area_reveal_leaves_mines_closed() {
        let mut board = layout((3, 3), &[(0, 0), (2, 2)]);

        let result = reveal_area(&mut board, (1, 1), RevealScoring::EveryOpenedCell);

        assert_eq!(result.opened.len(), 7);
        assert_eq!(result.score_delta, 7);
        assert_eq!(result.mine_hit, None);
        assert!(!board[(0, 0)].is_open());
    }
}
