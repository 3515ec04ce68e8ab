//! Random self-play driver.
//!
//! Two uniformly random players alternate until the game ends. Every game
//! borrows the same [`CombinationIndex`], which is built once by the caller.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::MoveError;
use crate::game::{CombinationIndex, GameState, Outcome, Player, Position};

/// Picks uniformly among the columns that still have room.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        RandomPlayer {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `None` once the game is over or no column is open.
    pub fn select_column(&mut self, state: &GameState<'_>) -> Option<usize> {
        let actions = state.legal_actions();
        if actions.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..actions.len());
        Some(actions[idx])
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves and final outcome of one finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub moves: Vec<Position>,
    pub outcome: Outcome,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Win(player) => Some(player),
            Outcome::Draw | Outcome::Continue => None,
        }
    }
}

/// Play one game to the end. Returns the finished state with its record.
pub fn play_random_game<'a>(
    index: &'a CombinationIndex,
    player: &mut RandomPlayer,
) -> Result<(GameState<'a>, GameRecord), MoveError> {
    let mut state = GameState::new(index);
    let mut moves = Vec::new();

    loop {
        let column = player.select_column(&state).ok_or(MoveError::GameOver)?;
        let outcome = state.play(column)?;
        moves.extend(state.last_move());
        if outcome.is_terminal() {
            return Ok((state, GameRecord { moves, outcome }));
        }
    }
}

/// Aggregate results over many games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
    pub shortest_game: Option<usize>,
    pub longest_game: Option<usize>,
}

impl SimulationSummary {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        match game.outcome {
            Outcome::Win(Player::X) => self.x_wins += 1,
            Outcome::Win(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Continue => {}
        }

        let length = game.moves.len();
        self.total_moves += length;
        self.shortest_game = Some(self.shortest_game.map_or(length, |s| s.min(length)));
        self.longest_game = Some(self.longest_game.map_or(length, |l| l.max(length)));
    }

    pub fn average_length(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }
}

/// Play `games` random games on one shared index.
///
/// Also returns the final state of the last game so a caller can render it.
pub fn simulate<'a>(
    index: &'a CombinationIndex,
    games: usize,
    player: &mut RandomPlayer,
) -> Result<(SimulationSummary, Option<GameState<'a>>), MoveError> {
    let mut summary = SimulationSummary::default();
    let mut last = None;

    for game in 0..games {
        let (state, record) = play_random_game(index, player)?;
        log::debug!(
            "game {}: {:?} after {} moves",
            game + 1,
            record.outcome,
            record.moves.len()
        );
        summary.record(&record);
        last = Some(state);
    }

    log::info!(
        "{} games: X {} / O {} / draw {}, {:.1} moves on average",
        summary.games,
        summary.x_wins,
        summary.o_wins,
        summary.draws,
        summary.average_length()
    );
    Ok((summary, last))
}
