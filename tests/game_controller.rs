//! Scenario tests for the session controller: scripted input batches against
//! hand-built grids and a seeded RNG.
use game_2048::config::GameConfig;
use game_2048::engine::{Grid, MergeRule, Move, Position, Tile};
use game_2048::game::{Game, Input, MoveOutcome, Phase};
use rand::{rngs::StdRng, SeedableRng};

fn grid4(rows: [[Tile; 4]; 4]) -> Grid {
    Grid::from_rows(&rows[..]).unwrap()
}

fn seeded() -> StdRng {
    StdRng::seed_from_u64(20261016)
}

const CHECKERBOARD: [[Tile; 4]; 4] = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];

#[test]
fn terminal_grid_enters_prompt_without_input() {
    let mut game = Game::with_grid(grid4(CHECKERBOARD), seeded());
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.frame([]), Phase::GameOverPrompt);
}

#[test]
fn move_whose_spawn_fills_the_board_ends_the_game() {
    // Left opens a single gap at (0, 3); a 2 or a 4 there has no equal neighbour.
    let mut game = Game::with_grid(
        grid4([[2, 2, 8, 16], [2, 4, 2, 8], [4, 2, 4, 2], [2, 4, 2, 4]]),
        seeded(),
    );
    assert_eq!(game.frame([Input::Move(Move::Left)]), Phase::GameOverPrompt);
    assert_eq!(game.grid().to_rows()[0][..3], [4, 8, 16]);
    assert!(matches!(game.grid()[Position::new(0, 3)], 2 | 4));
}

#[test]
fn spawn_lands_in_gap_opened_by_merge() {
    let mut game = Game::with_grid(
        grid4([[8, 8, 2, 4], [2, 4, 8, 2], [4, 2, 4, 8], [2, 4, 2, 4]]),
        seeded(),
    );
    let outcome = game.handle(Input::Move(Move::Left));
    assert!(outcome.changed);
    assert_eq!(outcome.spawned, Some(Position::new(0, 3)));
    assert_eq!(game.grid().to_rows()[0][..3], [16, 2, 4]);
    assert_eq!(game.grid().count_empty(), 0);
}

#[test]
fn prompt_ignores_moves_and_restarts_on_request() {
    let mut game = Game::with_grid(grid4(CHECKERBOARD), seeded());
    game.frame([]);
    assert_eq!(game.frame([Input::Move(Move::Left)]), Phase::GameOverPrompt);
    assert_eq!(game.grid(), &grid4(CHECKERBOARD));

    assert_eq!(game.frame([Input::Restart]), Phase::Playing);
    assert_eq!(game.grid().count_empty(), 14);
    assert!(game.grid().rows().flatten().all(|&v| matches!(v, 0 | 2 | 4)));
}

#[test]
fn quit_from_prompt_and_from_play() {
    let mut game = Game::with_grid(grid4(CHECKERBOARD), seeded());
    game.frame([]);
    assert_eq!(game.frame([Input::Quit]), Phase::Exiting);

    let mut game = Game::new(&GameConfig::default(), seeded()).unwrap();
    assert_eq!(game.frame([Input::Move(Move::Up), Input::Quit, Input::Restart]), Phase::Exiting);
}

#[test]
fn moves_in_one_frame_apply_in_order() {
    let cfg = GameConfig { four_probability: 0.0, ..GameConfig::default() };
    let mut game = Game::new(&cfg, seeded()).unwrap();
    let start_sum = game.grid().tile_sum();
    let mut expected_sum = start_sum;
    for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
        let outcome = game.handle(Input::Move(dir));
        if outcome.spawned.is_some() {
            expected_sum += 2;
        }
        assert_eq!(game.grid().tile_sum(), expected_sum);
    }
    assert_eq!(game.frame([]), Phase::Playing);
}

#[test]
fn unchanged_move_spawns_nothing() {
    let g = grid4([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
    let mut game = Game::with_grid(g.clone(), seeded());
    assert_eq!(game.handle(Input::Move(Move::Up)), MoveOutcome { changed: false, spawned: None });
    assert_eq!(game.grid(), &g);
}

#[test]
fn merge_rule_is_configurable() {
    let g = grid4([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);

    let mut single = Game::with_grid(g.clone(), seeded());
    single.handle(Input::Move(Move::Left));
    assert_eq!(single.grid().to_rows()[0][..2], [4, 4]);

    let mut chained = Game::with_grid(g, seeded()).with_merge_rule(MergeRule::Chained);
    chained.handle(Input::Move(Move::Left));
    assert_eq!(chained.grid().to_rows()[0][0], 8);
    assert_eq!(chained.grid().highest_tile(), 8);
}

#[test]
fn larger_grids_start_with_configured_tiles() {
    let cfg = GameConfig { grid_size: 6, initial_tiles: 3, ..GameConfig::default() };
    let game = Game::new(&cfg, seeded()).unwrap();
    assert_eq!(game.grid().size(), 6);
    assert_eq!(game.grid().count_empty(), 33);
}

#[test]
fn seeded_sessions_are_reproducible() {
    let script = [Move::Left, Move::Down, Move::Right, Move::Up, Move::Left, Move::Down];
    let play = || {
        let mut game = Game::new(&GameConfig::default(), seeded()).unwrap();
        game.frame(script.iter().map(|&m| Input::Move(m)));
        game.grid().clone()
    };
    assert_eq!(play(), play());
}
