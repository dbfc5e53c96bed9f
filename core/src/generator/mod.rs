use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board>;
}

/// How many special cells of each kind go on a board with `empty_zero` candidate cells.
///
/// Both counts are raised to their minimum even on small boards, placement stops once candidates run out.
pub const fn special_cell_counts(empty_zero: usize) -> (usize, usize) {
    let surprises = empty_zero * 5 / 100;
    let questions = empty_zero * 8 / 100;
    (
        if surprises < 2 { 2 } else { surprises },
        if questions < 3 { 3 } else { questions },
    )
}
