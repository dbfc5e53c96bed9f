use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// Valid transitions:
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of opening a cell on the acting player's board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOutcome {
    pub opened: Vec<Coord2>,
    pub mine_hit: bool,
    pub discovered: Vec<(Coord2, SpecialKind)>,
    pub score_delta: i32,
    pub lives_delta: i32,
    pub state: SessionState,
}

impl OpenOutcome {
    /// Kind of the first special cell uncovered by this move, if any.
    pub fn special_discovered(&self) -> Option<SpecialKind> {
        self.discovered.first().map(|&(_, kind)| kind)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOutcome {
    pub flagged: bool,
    pub score_delta: i32,
    pub state: SessionState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionActivation {
    pub outcome: QuestionOutcome,
    /// Mine flagged by a mine gift.
    pub gifted_mine: Option<Coord2>,
    /// Cells opened by an area reveal, their points are already in the score.
    pub revealed: Vec<Coord2>,
    pub state: SessionState,
}

/// A cooperative game: two boards, one score and one pool of lives.
#[derive(Clone, Debug)]
pub struct GameSession {
    rules: Rules,
    difficulty: Difficulty,
    names: [String; 2],
    boards: [Board; 2],
    score: i32,
    lives: i32,
    current: Player,
    elapsed_secs: u32,
    state: SessionState,
    rng: SmallRng,
    history_entry: Option<HistoryEntry>,
}

impl GameSession {
    pub fn new(
        difficulty: Difficulty,
        player1: impl Into<String>,
        player2: impl Into<String>,
        seed: Option<u64>,
    ) -> Result<Self> {
        Self::with_rules(Rules::default(), difficulty, player1, player2, seed)
    }

    pub fn with_rules(
        rules: Rules,
        difficulty: Difficulty,
        player1: impl Into<String>,
        player2: impl Into<String>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let config = rules.profile(difficulty).board_config()?;
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let boards = [
            generate_board(config, &mut rng)?,
            generate_board(config, &mut rng)?,
        ];
        log::debug!(
            "New {} game on {:?} boards with {} mines",
            difficulty,
            config.size,
            config.mines
        );
        Ok(Self::build(rules, difficulty, player1, player2, boards, rng))
    }

    /// Starts a session on prepared boards, keeping the lives and point tables of `difficulty`.
    pub fn from_boards(
        rules: Rules,
        difficulty: Difficulty,
        player1: impl Into<String>,
        player2: impl Into<String>,
        boards: [Board; 2],
        seed: u64,
    ) -> Self {
        let rng = SmallRng::seed_from_u64(seed);
        Self::build(rules, difficulty, player1, player2, boards, rng)
    }

    fn build(
        rules: Rules,
        difficulty: Difficulty,
        player1: impl Into<String>,
        player2: impl Into<String>,
        boards: [Board; 2],
        rng: SmallRng,
    ) -> Self {
        let lives = rules.profile(difficulty).lives.min(rules.max_lives);
        Self {
            rules,
            difficulty,
            names: [player1.into(), player2.into()],
            boards,
            score: 0,
            lives,
            current: Player::One,
            elapsed_secs: 0,
            state: SessionState::Active,
            rng,
            history_entry: None,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player_name(&self, player: Player) -> &str {
        &self.names[player.index()]
    }

    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_active(&self) -> bool {
        !self.state.is_finished()
    }

    /// Safe cells opened across both boards.
    pub fn revealed_cells(&self) -> u32 {
        self.boards
            .iter()
            .map(|board| u32::from(board.opened_safe_count()))
            .sum()
    }

    pub fn mines_left(&self, player: Player) -> CellCount {
        self.board(player).mines_left()
    }

    /// Summary of the finished game, `None` while it is still running.
    pub fn history_entry(&self) -> Option<&HistoryEntry> {
        self.history_entry.as_ref()
    }

    /// Advances the game clock by one second. Ticks after the game ended are ignored.
    pub fn tick(&mut self) {
        if self.is_game_active() {
            self.elapsed_secs += 1;
        }
    }

    pub fn end_turn(&mut self) -> Result<Player> {
        self.check_active()?;
        self.switch_turn();
        Ok(self.current)
    }

    pub fn open_cell(&mut self, player: Player, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.check_move(player, coords)?;

        let scoring = self.rules.reveal_scoring;
        let revealed = reveal(&mut self.boards[player.index()], coords, scoring);
        if revealed.is_empty() {
            return Ok(OpenOutcome {
                state: self.state,
                ..Default::default()
            });
        }

        self.score += revealed.score_delta;
        let mut lives_delta = 0;
        if let Some(mine) = revealed.mine_hit {
            log::debug!("{:?} hit a mine at {:?}", player, mine);
            self.lives -= 1;
            lives_delta = -1;
        }

        self.evaluate();
        if self.is_game_active() {
            self.switch_turn();
        }

        Ok(OpenOutcome {
            opened: revealed.opened,
            mine_hit: revealed.mine_hit.is_some(),
            discovered: revealed.discovered,
            score_delta: revealed.score_delta,
            lives_delta,
            state: self.state,
        })
    }

    /// Toggles a flag. Each cell earns or costs points only the first time it is ever flagged.
    pub fn toggle_flag(&mut self, player: Player, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.check_move(player, coords)?;

        let board = &mut self.boards[player.index()];
        let (flagged, first) = board.toggle_flag(coords).ok_or(GameError::CellNotClosed)?;

        let score_delta = match (first, board[coords].is_mine()) {
            (false, _) => 0,
            (true, true) => self.rules.flag_mine_reward,
            (true, false) => -self.rules.flag_safe_penalty,
        };
        self.score += score_delta;
        log::debug!(
            "{:?} {} {:?}, score {:+}",
            player,
            if flagged { "flagged" } else { "unflagged" },
            coords,
            score_delta
        );

        self.evaluate();

        Ok(FlagOutcome {
            flagged,
            score_delta,
            state: self.state,
        })
    }

    /// Activates a discovered surprise cell. An unaffordable surprise changes nothing and keeps the turn.
    pub fn activate_surprise(&mut self, player: Player, coords: Coord2) -> Result<SurpriseOutcome> {
        let coords = self.check_activation(player, coords, SpecialKind::Surprise)?;

        let outcome = process_surprise(
            &self.rules,
            self.difficulty,
            self.score,
            self.lives,
            &mut self.rng,
        );
        if !outcome.allowed {
            return Ok(outcome);
        }

        self.boards[player.index()].activate(coords);
        self.score += outcome.score_delta;
        self.lives += outcome.lives_delta;

        self.evaluate();
        if self.is_game_active() {
            self.switch_turn();
        }
        Ok(outcome)
    }

    /// Activates a discovered question cell with the answer the players gave to `question`.
    pub fn activate_question(
        &mut self,
        player: Player,
        coords: Coord2,
        question: &Question,
        answered_correctly: bool,
    ) -> Result<QuestionActivation> {
        let coords = self.check_activation(player, coords, SpecialKind::Question)?;

        let outcome = process_question(
            &self.rules,
            self.difficulty,
            question.level,
            answered_correctly,
            self.score,
            self.lives,
            &mut self.rng,
        );

        self.boards[player.index()].activate(coords);
        self.score += outcome.score_delta;
        self.lives += outcome.lives_delta;

        let mut gifted_mine = None;
        let mut revealed = Vec::new();
        match outcome.bonus {
            Some(BonusAction::MineGift) => {
                gifted_mine = self.boards[player.index()].gift_mine_flag();
                log::debug!("Mine gift flagged {:?}", gifted_mine);
            }
            Some(BonusAction::RevealArea3x3) => {
                let area = self.reveal_random_area(player);
                self.score += area.score_delta;
                revealed = area.opened;
            }
            None => {}
        }

        self.evaluate();
        if self.is_game_active() {
            self.switch_turn();
        }

        Ok(QuestionActivation {
            outcome,
            gifted_mine,
            revealed,
            state: self.state,
        })
    }

    /// Whether the win condition holds, ending the game as won when it does.
    pub fn check_win(&mut self) -> bool {
        if self.state == SessionState::Active && self.win_condition() {
            self.finish(GameResult::Win);
        }
        self.state == SessionState::Won
    }

    /// Opens every remaining cell of a board for display. Only allowed once the game is over.
    pub fn reveal_all(&mut self, player: Player) -> Result<Vec<Coord2>> {
        if self.is_game_active() {
            return Err(GameError::StillActive);
        }
        Ok(reveal_all_force(&mut self.boards[player.index()]))
    }

    /// Persists the summary of a finished game.
    ///
    /// Returns `Ok(false)` while the game is still running. A failure is only reported, the session is unaffected.
    pub fn record_history<H: HistoryRepository + ?Sized>(
        &self,
        repository: &mut H,
    ) -> core::result::Result<bool, RepositoryError> {
        let Some(entry) = &self.history_entry else {
            return Ok(false);
        };
        repository.save(entry).inspect_err(|err| {
            log::warn!("Failed to save game history: {}", err);
        })?;
        Ok(true)
    }

    fn reveal_random_area(&mut self, player: Player) -> Reveal {
        let board = &self.boards[player.index()];
        let candidates: Vec<Coord2> = board
            .iter_coords()
            .filter(|&pos| board[pos].can_open() && !board[pos].is_mine())
            .collect();
        let Some(&center) = candidates.choose(&mut self.rng) else {
            log::debug!("No closed safe cells left for an area reveal");
            return Reveal::default();
        };
        log::debug!("Revealing 3x3 area around {:?}", center);
        reveal_area(
            &mut self.boards[player.index()],
            center,
            self.rules.reveal_scoring,
        )
    }

    fn win_condition(&self) -> bool {
        let safe_cells: u32 = self
            .boards
            .iter()
            .map(|board| u32::from(board.safe_cell_count()))
            .sum();
        if self.revealed_cells() >= safe_cells {
            return true;
        }
        self.boards
            .iter()
            .any(Board::all_mines_flagged)
    }

    /// Loss takes precedence over a win reached by the same move.
    fn evaluate(&mut self) {
        if self.lives <= 0 {
            self.finish(GameResult::Lose);
        } else {
            self.check_win();
        }
    }

    fn finish(&mut self, result: GameResult) {
        if self.state.is_finished() {
            return;
        }
        self.state = match result {
            GameResult::Win => SessionState::Won,
            GameResult::Lose => SessionState::Lost,
        };

        let life_bonus = self.lives.max(0) * self.rules.profile(self.difficulty).points_per_life;
        self.score += life_bonus;

        for board in &mut self.boards {
            reveal_all_force(board);
        }

        log::debug!(
            "Game ended: {:?}, final score {} ({} from lives) after {}s",
            result,
            self.score,
            life_bonus,
            self.elapsed_secs
        );
        self.history_entry = Some(HistoryEntry {
            date_time: Utc::now(),
            difficulty: self.difficulty,
            player1: self.names[0].clone(),
            player2: self.names[1].clone(),
            result,
            final_score: self.score,
            game_length_secs: self.elapsed_secs,
        });
    }

    fn switch_turn(&mut self) {
        self.current = self.current.other();
        log::debug!("Turn passes to {:?}", self.current);
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn check_move(&self, player: Player, coords: Coord2) -> Result<Coord2> {
        self.check_active()?;
        if player != self.current {
            return Err(GameError::NotYourTurn);
        }
        self.board(player).validate_coords(coords)
    }

    fn check_activation(&self, player: Player, coords: Coord2, expected: SpecialKind) -> Result<Coord2> {
        let coords = self.check_move(player, coords)?;
        let cell = self.board(player)[coords];
        match cell.kind().special_kind() {
            None => Err(GameError::NotSpecialCell),
            Some(kind) if kind != expected => Err(GameError::WrongSpecialKind),
            Some(_) if !cell.is_discovered() => Err(GameError::NotDiscovered),
            Some(_) if cell.is_activated() => Err(GameError::AlreadyActivated),
            Some(_) => Ok(coords),
        }
    }
}
