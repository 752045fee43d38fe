//! Session controller: owns the grid and turns input events into moves,
//! spawns and phase changes.
//!
//! [`Game::frame`] is a single non-blocking step, so any host loop can drive
//! it: a terminal, a windowed renderer, or a test feeding scripted inputs.
//!
//! ```
//! use game_2048::config::GameConfig;
//! use game_2048::engine::Move;
//! use game_2048::game::{Game, Input, Phase};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = Game::new(&GameConfig::default(), StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(game.grid().count_empty(), 14);
//! let phase = game.frame([Input::Move(Move::Left), Input::Move(Move::Up)]);
//! assert_eq!(phase, Phase::Playing);
//! assert_eq!(game.frame([Input::Quit]), Phase::Exiting);
//! ```

use log::{info, trace};
use rand::Rng;

use crate::config::GameConfig;
use crate::engine::{
    is_game_over, shift_with_rule, spawn_tile_with_odds, Grid, MergeRule, Move, Position,
};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    /// The grid is terminal; waiting for restart or quit.
    GameOverPrompt,
    Exiting,
}

/// An event produced by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Move(Move),
    Restart,
    Quit,
}

/// What a single input did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    pub changed: bool,
    pub spawned: Option<Position>,
}

pub struct Game<R> {
    grid: Grid,
    phase: Phase,
    rng: R,
    merge_rule: MergeRule,
    four_probability: f64,
    initial_tiles: usize,
}

impl<R: Rng> Game<R> {
    /// Start a session with a fresh grid holding `initial_tiles` spawned tiles.
    pub fn new(config: &GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Game {
            grid: Grid::new(config.grid_size),
            phase: Phase::Playing,
            rng,
            merge_rule: config.merge_rule,
            four_probability: config.four_probability,
            initial_tiles: config.initial_tiles,
        };
        game.reset();
        Ok(game)
    }

    /// Resume play from an existing grid with default rules.
    ///
    /// No tiles are spawned; the phase is corrected on the next [`Game::frame`].
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        let config = GameConfig::default();
        Game {
            grid,
            phase: Phase::Playing,
            rng,
            merge_rule: config.merge_rule,
            four_probability: config.four_probability,
            initial_tiles: config.initial_tiles,
        }
    }

    pub fn with_merge_rule(mut self, rule: MergeRule) -> Self {
        self.merge_rule = rule;
        self
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Clear the grid, spawn the starting tiles and return to `Playing`.
    pub fn reset(&mut self) {
        self.grid.clear();
        for _ in 0..self.initial_tiles {
            spawn_tile_with_odds(&mut self.grid, &mut self.rng, self.four_probability);
        }
        self.phase = Phase::Playing;
        info!("new game on a {0}x{0} grid", self.grid.size());
    }

    /// Process one batch of inputs, then run the terminal check.
    ///
    /// The check runs every frame, including frames with no input, so a grid
    /// that is already terminal moves to the prompt without waiting for a key.
    pub fn frame<I: IntoIterator<Item = Input>>(&mut self, inputs: I) -> Phase {
        for input in inputs {
            self.handle(input);
        }
        if self.phase == Phase::Playing && is_game_over(&self.grid) {
            info!("game over, highest tile {}", self.grid.highest_tile());
            self.phase = Phase::GameOverPrompt;
        }
        self.phase
    }

    /// Apply a single input according to the current phase.
    ///
    /// Inputs that mean nothing in the current phase are ignored.
    pub fn handle(&mut self, input: Input) -> MoveOutcome {
        match (self.phase, input) {
            (Phase::Exiting, _) => MoveOutcome::default(),
            (_, Input::Quit) => {
                info!("quit requested");
                self.phase = Phase::Exiting;
                MoveOutcome::default()
            }
            (Phase::Playing, Input::Move(dir)) => self.apply_move(dir),
            (Phase::GameOverPrompt, Input::Restart) => {
                self.reset();
                MoveOutcome::default()
            }
            (Phase::Playing, Input::Restart) | (Phase::GameOverPrompt, Input::Move(_)) => {
                MoveOutcome::default()
            }
        }
    }

    fn apply_move(&mut self, dir: Move) -> MoveOutcome {
        let before = self.grid.clone();
        shift_with_rule(&mut self.grid, dir, self.merge_rule);
        let changed = self.grid != before;
        let spawned = if changed && !is_game_over(&self.grid) {
            spawn_tile_with_odds(&mut self.grid, &mut self.rng, self.four_probability)
        } else {
            None
        };
        trace!("move {dir}: changed={changed} spawned={spawned:?}");
        MoveOutcome { changed, spawned }
    }
}
