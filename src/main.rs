use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use game_2048::config::GameConfig;
use game_2048::engine::MergeRule;
use game_2048::frontend;
use game_2048::game::{Game, Phase};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "game-2048", about = "Play 2048 in the terminal, one line of keys per frame")]
struct Args {
    /// Read settings from this TOML file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the grid
    #[arg(long)]
    size: Option<usize>,

    /// Seed for tile spawning
    #[arg(long)]
    seed: Option<u64>,

    /// Chance that a spawned tile is a 4
    #[arg(long)]
    four_prob: Option<f64>,

    /// Whether a merged tile may merge again in the same move
    #[arg(long, value_enum)]
    merge_rule: Option<MergeRule>,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<GameConfig> {
        let mut cfg = match &self.config {
            Some(path) => GameConfig::from_toml(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size { cfg.grid_size = size; }
        if let Some(seed) = self.seed { cfg.seed = Some(seed); }
        if let Some(p) = self.four_prob { cfg.four_probability = p; }
        if let Some(rule) = self.merge_rule { cfg.merge_rule = rule; }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let cfg = args.resolve_config()?;
    log::debug!("config: {cfg:?}");

    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(&cfg, rng)?;
    let color = !args.no_color;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut phase = game.frame([]);
    write!(stdout, "{}", frontend::render(game.grid(), phase, color))?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        phase = game.frame(frontend::parse_frame(&line));
        if phase == Phase::Exiting {
            break;
        }
        write!(stdout, "{}", frontend::render(game.grid(), phase, color))?;
        stdout.flush()?;
    }
    Ok(())
}
