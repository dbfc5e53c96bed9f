use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Dimensions and mine count of a single board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self { size, mines };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// One player's grid. The shape and every cell kind are fixed at creation, only cell flags change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    opened_safe: CellCount,
    opened_mines: CellCount,
    flagged_mines: CellCount,
}

impl Board {
    /// Builds a board from explicit positions, computing every neighbour count.
    pub fn from_layout(
        size: Coord2,
        mines: &[Coord2],
        surprises: &[Coord2],
        questions: &[Coord2],
    ) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        let in_bounds = |&(row, col): &Coord2| row < size.0 && col < size.1;

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mines {
            if !in_bounds(&coords) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mut kinds = classify(&mine_mask);
        let specials = surprises
            .iter()
            .map(|&coords| (coords, true))
            .chain(questions.iter().map(|&coords| (coords, false)));
        for (coords, surprise) in specials {
            if !in_bounds(&coords) || mine_mask[coords.to_nd_index()] {
                return Err(GameError::InvalidCoords);
            }
            let count = kinds[coords.to_nd_index()].neighbor_mines() as u8;
            kinds[coords.to_nd_index()] = if surprise {
                CellKind::Surprise(count)
            } else {
                CellKind::Question(count)
            };
        }

        let board = Self::from_kinds(kinds);
        BoardConfig::new(size, board.mine_count)?;
        Ok(board)
    }

    pub(crate) fn from_kinds(kinds: Array2<CellKind>) -> Self {
        let mine_count = kinds.iter().filter(|kind| kind.is_mine()).count() as CellCount;
        Self {
            cells: kinds.mapv(Cell::new),
            mine_count,
            opened_safe: 0,
            opened_mines: 0,
            flagged_mines: 0,
        }
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Safe cells opened so far, by clicks, cascades or bonus actions.
    pub fn opened_safe_count(&self) -> CellCount {
        self.opened_safe
    }

    pub fn opened_mine_count(&self) -> CellCount {
        self.opened_mines
    }

    /// Mines currently carrying a flag.
    pub fn flagged_mine_count(&self) -> CellCount {
        self.flagged_mines
    }

    /// Display counter of mines neither flagged nor already blown up, never negative.
    pub fn mines_left(&self) -> CellCount {
        self.mine_count
            .saturating_sub(self.flagged_mines + self.opened_mines)
    }

    /// Whether every mine carries a flag. Mines opened by a click never count.
    pub fn all_mines_flagged(&self) -> bool {
        self.mine_count > 0 && self.flagged_mines == self.mine_count
    }

    pub fn is_cleared(&self) -> bool {
        self.opened_safe >= self.safe_cell_count()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        self.cells.iter_neighbors(coords)
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// Opens a cell through play, counting it as opened.
    pub(crate) fn open_cell(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.open() {
            return false;
        }
        if cell.is_mine() {
            self.opened_mines += 1;
        } else {
            self.opened_safe += 1;
        }
        true
    }

    /// Opens a cell for display once the game is over. No counter changes.
    pub(crate) fn force_open_cell(&mut self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].force_open()
    }

    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> Option<(bool, bool)> {
        let cell = &mut self.cells[coords.to_nd_index()];
        let toggled = cell.toggle_flag();
        if let Some((flagged, _)) = toggled {
            if cell.is_mine() {
                if flagged {
                    self.flagged_mines += 1;
                } else {
                    self.flagged_mines -= 1;
                }
            }
        }
        toggled
    }

    /// Flags the first closed, unflagged mine in row-major order.
    pub(crate) fn gift_mine_flag(&mut self) -> Option<Coord2> {
        let target = self.iter_coords().find(|&pos| {
            let cell = self[pos];
            cell.is_mine() && cell.can_open()
        })?;
        self.cells[target.to_nd_index()].gift_flag();
        self.flagged_mines += 1;
        Some(target)
    }

    pub(crate) fn activate(&mut self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].activate()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Turns a mine mask into cell kinds with neighbour counts, without any special cells.
pub(crate) fn classify(mine_mask: &Array2<bool>) -> Array2<CellKind> {
    Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
        if mine_mask[[row, col]] {
            return CellKind::Mine;
        }
        let count = mine_mask
            .iter_neighbors((row as Coord, col as Coord))
            .filter(|&pos| mine_mask[pos.to_nd_index()])
            .count();
        CellKind::Normal(count as u8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_full_boards() {
        assert_eq!(BoardConfig::new((3, 3), 9), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new((0, 3), 0), Err(GameError::EmptyBoard));
        assert!(BoardConfig::new((3, 3), 8).is_ok());
    }

    #[test]
    fn layout_computes_neighbor_counts() {
        let board = Board::from_layout((3, 3), &[(0, 0), (2, 2)], &[], &[]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board[(0, 0)].neighbor_mines(), -1);
        assert_eq!(board[(1, 1)].neighbor_mines(), 2);
        assert_eq!(board[(0, 2)].neighbor_mines(), 0);
        assert_eq!(board.safe_cell_count(), 7);
    }

    #[test]
    fn layout_rejects_specials_on_mines() {
        let result = Board::from_layout((2, 2), &[(0, 0)], &[(0, 0)], &[]);
        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    #[test]
    fn layout_rejects_out_of_bounds() {
        let result = Board::from_layout((2, 2), &[(2, 0)], &[], &[]);
        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    #[test]
    fn mines_left_counts_flags_and_opened_mines() {
        let mut board = Board::from_layout((3, 3), &[(0, 0), (2, 2), (0, 2)], &[], &[]).unwrap();

        board.toggle_flag((0, 0));
        board.toggle_flag((1, 1));
        board.open_cell((2, 2));

        assert_eq!(board.mines_left(), 1);

        board.toggle_flag((0, 0));
        assert_eq!(board.mines_left(), 2);
    }

    #[test]
    fn opened_mines_do_not_count_as_flagged() {
        let mut board = Board::from_layout((3, 3), &[(0, 0), (2, 2)], &[], &[]).unwrap();

        board.toggle_flag((0, 0));
        board.open_cell((2, 2));

        assert_eq!(board.mines_left(), 0);
        assert!(!board.all_mines_flagged());

        board.toggle_flag((0, 0));
        board.toggle_flag((0, 0));
        assert!(!board.all_mines_flagged());
    }

    #[test]
    fn force_open_leaves_play_counters_alone() {
        let mut board = Board::from_layout((2, 3), &[(0, 0), (1, 2)], &[], &[]).unwrap();
        board.toggle_flag((0, 0));
        board.open_cell((0, 2));

        for pos in board.iter_coords() {
            board.force_open_cell(pos);
        }

        assert_eq!(board.opened_safe_count(), 1);
        assert_eq!(board.opened_mine_count(), 0);
        assert_eq!(board.flagged_mine_count(), 1);
        assert_eq!(board.mines_left(), 1);
        assert!(board.iter_coords().all(|pos| board[pos].is_open()));
        assert!(board[(0, 0)].is_flagged());
    }

    #[test]
    fn gift_skips_flagged_mines() {
        let mut board = Board::from_layout((1, 4), &[(0, 0), (0, 3)], &[], &[]).unwrap();
        board.toggle_flag((0, 0));

        assert_eq!(board.gift_mine_flag(), Some((0, 3)));
        assert_eq!(board.gift_mine_flag(), None);
        assert_eq!(board.mines_left(), 0);
        assert!(board[(0, 3)].is_flag_scored());
    }
}
