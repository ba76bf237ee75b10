use anyhow::Context;
use clap::Parser;
use minado_core::{Board, CellCount, Coord, Session};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

mod game;
mod view;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal minesweeper", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board rows
    #[arg(long, default_value_t = 9)]
    rows: Coord,

    /// Board columns
    #[arg(long, default_value_t = 9)]
    cols: Coord,

    /// Number of mines
    #[arg(long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Player name; prompted for when absent
    #[arg(short, long)]
    name: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let board = Board::create(args.rows, args.cols, args.mines)
        .context("could not set up the board")?;

    let name = match args.name {
        Some(name) => name,
        None => game::prompt_player_name()?,
    };

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {}", seed);

    let session = Session::new(name, board);
    game::run(session, SmallRng::seed_from_u64(seed))
}
