//! game-2048: a renderer-agnostic 2048 grid engine
//!
//! This crate provides:
//! - A square `Grid` value type with the four slide/merge moves (`engine` module)
//! - A tile spawner driven by an injected RNG and a terminal-state detector
//! - A frame-stepped session controller (`game` module)
//! - TOML-backed settings (`config` module) and a small terminal front end
//!
//! Quick start:
//! ```
//! use game_2048::engine::{self, Grid, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic setup with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut grid = Grid::default();
//! engine::spawn_tile(&mut grid, &mut rng);
//! engine::spawn_tile(&mut grid, &mut rng);
//!
//! let sum = grid.tile_sum();
//! if engine::shift(&mut grid, Move::Left) {
//!     engine::spawn_tile(&mut grid, &mut rng);
//! }
//! assert!(grid.tile_sum() >= sum);
//! assert!(!engine::is_game_over(&grid));
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod game;
