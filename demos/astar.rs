//! Terminal A* visualiser.
//!
//! Loads a map file (see `gridstar_core::map`) or generates a random one,
//! then animates the search step by step. Press `q` or Esc to stop a run.
//!
//! Run: cargo run --bin gridstar-demo -- --size 24 --density 0.3 --seed 7

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode};
use gridstar_core::GridMap;
use gridstar_demos::{Board, TerminalGuard, random_map};
use gridstar_paths::{
    AstarSearch, CancelToken, SearchConfig, SearchError, SearchEvent, SearchOutcome,
};
use log::info;

#[derive(Parser)]
#[command(name = "gridstar-demo")]
#[command(about = "Animate an A* search on a grid in the terminal")]
struct Args {
    /// Map file using `.`, `#`, `S` and `E`
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Size of a generated map
    #[arg(long, default_value = "20")]
    size: i32,

    /// Wall probability of a generated map
    #[arg(long, default_value = "0.25")]
    density: f64,

    /// Seed of a generated map
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Delay between steps in milliseconds
    #[arg(long, default_value = "15")]
    delay: u64,

    /// Stop after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Skip the animation and only print the result
    #[arg(long)]
    quiet: bool,
}

fn load_map(args: &Args) -> Result<GridMap, Box<dyn std::error::Error>> {
    match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(GridMap::parse(&text)?)
        }
        None => Ok(random_map(args.size, args.density, args.seed)),
    }
}

/// Poll the terminal for a quit key without blocking.
fn quit_requested() -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn animate(
    board: &mut Board,
    search: &mut AstarSearch,
    token: &CancelToken,
    delay: Duration,
) -> io::Result<Result<SearchOutcome, SearchError>> {
    let mut term = TerminalGuard::enter(io::stdout())?;
    let out = term.writer();
    board.render(out, "searching... (q to stop)")?;

    let mut draw_error = None;
    let grid = board.grid.clone();
    let (start, end) = (board.start, board.end);
    let result = search.run(&grid, start, end, &mut |e: &SearchEvent| {
        board.apply(e);
        if !e.is_step() || draw_error.is_some() {
            return;
        }
        let status = format!("step {}  (q to stop)", board.steps());
        let drawn = board.render(out, &status).and_then(|()| quit_requested());
        match drawn {
            Ok(true) => token.cancel(),
            Ok(false) => std::thread::sleep(delay),
            Err(err) => {
                draw_error = Some(err);
                token.cancel();
            }
        }
    });

    if let Some(err) = draw_error {
        return Err(err);
    }
    let summary = match &result {
        Ok(SearchOutcome::Found(path)) => format!("path found: {} steps (any key)", path.steps()),
        Ok(SearchOutcome::NoPath) => "no path (any key)".to_string(),
        Err(err) => format!("{err} (any key)"),
    };
    board.render(out, &summary)?;
    event::read()?;
    Ok(result)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let map = match load_map(&args) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let mut board = Board::from_map(map);
    info!(
        "grid {}x{}, {} walls, {} -> {}",
        board.grid.rows(),
        board.grid.rows(),
        board.grid.wall_count(),
        board.start,
        board.end
    );

    let token = CancelToken::new();
    let mut config = SearchConfig::default();
    config.max_expansions = args.max_expansions;
    let mut search = AstarSearch::new()
        .with_config(config)
        .with_cancel(token.clone());

    let result = if args.quiet {
        let grid = board.grid.clone();
        let (start, end) = (board.start, board.end);
        Ok(search.run(&grid, start, end, &mut |e: &SearchEvent| board.apply(e)))
    } else {
        animate(&mut board, &mut search, &token, Duration::from_millis(args.delay))
    };

    let stats = search.stats();
    match result {
        Ok(Ok(SearchOutcome::Found(path))) => {
            println!(
                "path found: {} steps, {} expansions, {} stale pops",
                path.steps(),
                stats.expanded,
                stats.stale_pops
            );
        }
        Ok(Ok(SearchOutcome::NoPath)) => {
            println!("no path: {} cells expanded", stats.expanded);
        }
        Ok(Err(e)) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("terminal error: {e}");
            std::process::exit(1);
        }
    }
}
