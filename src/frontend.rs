//! Terminal presentation: key parsing and board rendering.
//!
//! Nothing in the engine or controller depends on this module.

use crate::engine::{format_tile, Grid, Move, Tile};
use crate::game::{Input, Phase};

pub type Rgb = (u8, u8, u8);

const BLACK: Rgb = (0, 0, 0);
const GRAY: Rgb = (128, 128, 128);

/// Background colour for a tile; values past 2048 share a neutral gray.
pub fn tile_color(value: Tile) -> Rgb {
    match value {
        2 => (238, 228, 218),
        4 => (237, 224, 200),
        8 => (242, 177, 121),
        16 => (245, 149, 99),
        32 => (246, 124, 95),
        64 => (246, 94, 59),
        128 => (237, 207, 114),
        256 => (237, 204, 97),
        512 => (237, 200, 80),
        1024 => (237, 197, 63),
        2048 => (237, 194, 46),
        _ => GRAY,
    }
}

/// Translate one line of terminal input into a frame's worth of events.
///
/// Accepts WASD, vim keys and ANSI arrow sequences for moves, `p`/`r` for
/// restart and `q` for quit. Anything else is dropped.
///
/// ```
/// use game_2048::engine::Move;
/// use game_2048::frontend::parse_frame;
/// use game_2048::game::Input;
/// assert_eq!(parse_frame("a\x1b[Aq"), vec![Input::Move(Move::Left), Input::Move(Move::Up), Input::Quit]);
/// ```
pub fn parse_frame(line: &str) -> Vec<Input> {
    let mut inputs = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.next_if_eq(&'[').is_some() {
                if let Some(dir) = chars.next().and_then(arrow_direction) {
                    inputs.push(Input::Move(dir));
                }
            }
            continue;
        }
        if let Some(input) = key_input(c) {
            inputs.push(input);
        }
    }
    inputs
}

fn key_input(c: char) -> Option<Input> {
    let input = match c.to_ascii_lowercase() {
        'w' | 'k' => Input::Move(Move::Up),
        's' | 'j' => Input::Move(Move::Down),
        'a' | 'h' => Input::Move(Move::Left),
        'd' | 'l' => Input::Move(Move::Right),
        'p' | 'r' => Input::Restart,
        'q' => Input::Quit,
        _ => return None,
    };
    Some(input)
}

fn arrow_direction(c: char) -> Option<Move> {
    match c {
        'A' => Some(Move::Up),
        'B' => Some(Move::Down),
        'C' => Some(Move::Right),
        'D' => Some(Move::Left),
        _ => None,
    }
}

/// Draw the board, followed by the restart prompt once the game is over.
pub fn render(grid: &Grid, phase: Phase, color: bool) -> String {
    let mut out = String::new();
    let separator = "-".repeat(grid.size() * (format_tile(0).len() + 1));
    for (idx, row) in grid.rows().enumerate() {
        if idx > 0 {
            out.push_str(&separator);
            out.push('\n');
        }
        let cells: Vec<String> = row.iter().map(|&v| paint(v, color)).collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
    }
    match phase {
        Phase::Playing => out.push_str("move: w/a/s/d or arrows, quit: q\n"),
        Phase::GameOverPrompt => out.push_str("Game Over!\nPlay Again (P)\nQuit (Q)\n"),
        Phase::Exiting => {}
    }
    out
}

fn paint(value: Tile, color: bool) -> String {
    let text = format_tile(value);
    if !color || value == 0 {
        return text;
    }
    let (r, g, b) = tile_color(value);
    let (fr, fg, fb) = BLACK;
    format!("\x1b[48;2;{r};{g};{b}m\x1b[38;2;{fr};{fg};{fb}m{text}\x1b[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_keys() {
        assert_eq!(
            parse_frame("wasd"),
            vec![
                Input::Move(Move::Up),
                Input::Move(Move::Left),
                Input::Move(Move::Down),
                Input::Move(Move::Right),
            ]
        );
        assert_eq!(parse_frame("KJHL"), parse_frame("wsad"));
        assert_eq!(parse_frame("P"), vec![Input::Restart]);
        assert_eq!(parse_frame(" x?q"), vec![Input::Quit]);
        assert!(parse_frame("").is_empty());
    }

    #[test]
    fn it_parses_arrow_sequences() {
        assert_eq!(
            parse_frame("\x1b[B\x1b[C\x1b[D"),
            vec![Input::Move(Move::Down), Input::Move(Move::Right), Input::Move(Move::Left)]
        );
        // A bare escape or an unknown sequence is dropped.
        assert_eq!(
            parse_frame("\x1bw\x1b[Zd"),
            vec![Input::Move(Move::Up), Input::Move(Move::Right)]
        );
    }

    #[test]
    fn tile_colors_fall_back_to_gray() {
        assert_eq!(tile_color(2), (238, 228, 218));
        assert_eq!(tile_color(2048), (237, 194, 46));
        assert_eq!(tile_color(4096), GRAY);
    }

    #[test]
    fn plain_render_matches_display() {
        let grid = Grid::from_rows(&[[2u32, 0], [0, 4]][..]).unwrap();
        let out = render(&grid, Phase::Exiting, false);
        assert_eq!(out, grid.to_string());
    }

    #[test]
    fn render_shows_prompt_when_over() {
        let grid = Grid::from_rows(&[[2u32, 4], [4, 2]][..]).unwrap();
        let out = render(&grid, Phase::GameOverPrompt, true);
        assert!(out.contains("\x1b[48;2;238;228;218m"));
        assert!(out.ends_with("Game Over!\nPlay Again (P)\nQuit (Q)\n"));
    }
}
