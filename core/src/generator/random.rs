use ndarray::Array2;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;
use crate::board::classify;

/// Purely random mine placement, seeded so a board can be rebuilt from its seed alone.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(config, &mut rng)
    }
}

/// Places mines, computes neighbour counts and scatters special cells over the zero cells.
///
/// The same `rng` drives mine placement and the special cell shuffle, so a seeded rng reproduces the whole board.
pub fn generate_board<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Result<Board> {
    config.validate()?;

    let total_cells = usize::from(config.total_cells());
    let cols = usize::from(config.size.1);
    let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
    // validated above, so there is always a free cell left and this terminates
    let mut placed = 0;
    while placed < config.mines {
        let place = rng.random_range(0..total_cells);
        let index = [place / cols, place % cols];
        if !mine_mask[index] {
            mine_mask[index] = true;
            placed += 1;
        }
    }

    let mut kinds = classify(&mine_mask);

    let mut empty_zero: Vec<[usize; 2]> = kinds
        .indexed_iter()
        .filter(|(_, kind)| matches!(kind, CellKind::Normal(0)))
        .map(|((row, col), _)| [row, col])
        .collect();

    if empty_zero.is_empty() {
        log::debug!("No zero cells on {:?} board, skipping special cells", config.size);
        return Ok(Board::from_kinds(kinds));
    }

    empty_zero.shuffle(rng);
    let (surprises, questions) = special_cell_counts(empty_zero.len());
    log::debug!(
        "Placing {} surprise and {} question cells over {} zero cells",
        surprises,
        questions,
        empty_zero.len()
    );

    let mut candidates = empty_zero.into_iter();
    for index in candidates.by_ref().take(surprises) {
        kinds[index] = CellKind::Surprise(0);
    }
    for index in candidates.take(questions) {
        kinds[index] = CellKind::Question(0);
    }

    Ok(Board::from_kinds(kinds))
}
