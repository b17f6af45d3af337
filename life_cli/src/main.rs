// main.rs - Print Game of Life generations to the terminal

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use flat_life::config::{DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_THRESHOLD};
use flat_life::{Board, Life, LifeConfig, patterns};
use log::info;

/// Run Conway's Game of Life on a bounded grid and print the result.
#[derive(Parser, Debug)]
#[command(name = "life_cli")]
struct Args {
    /// Number of rows on the board.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of columns on the board.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,

    /// Generation to compute.
    #[arg(long, short, default_value_t = 0)]
    iterations: usize,

    /// Chance that a random cell starts dead, from 0.0 to 1.0.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Seed for the random board.
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a named pattern instead of a random board.
    #[arg(long, conflicts_with = "board")]
    pattern: Option<String>,

    /// Read generation 0 from a text file (`O` alive, `.` dead).
    #[arg(long)]
    board: Option<PathBuf>,

    /// Print every generation up to the target, not just the last.
    #[arg(long)]
    every: bool,

    /// Print the live-neighbor count of each cell after each board.
    #[arg(long)]
    neighbors: bool,
}

impl Args {
    fn config(&self) -> LifeConfig {
        LifeConfig {
            rows: self.rows,
            columns: self.columns,
            threshold: self.threshold,
            iterations: self.iterations,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();
    config.validate().context("invalid board settings")?;

    let mut life = build_engine(&args, &config)?;
    info!(
        "running {} board to generation {}",
        life.dims(),
        config.iterations
    );

    let first = if args.every { 0 } else { config.iterations };
    for generation in first..=config.iterations {
        life.advance_to(generation);
        print!("{}", render(&life, args.neighbors));
    }

    if let Some(cycle) = life.cycle() {
        println!(
            "Repeats every {} generation(s) from generation {}",
            cycle.period, cycle.start
        );
    }
    Ok(())
}

fn build_engine(args: &Args, config: &LifeConfig) -> Result<Life> {
    if let Some(path) = &args.board {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let board = Board::parse(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        return Ok(Life::with_board(board));
    }
    if let Some(name) = &args.pattern {
        let pattern = patterns::find(name).ok_or_else(|| {
            let known: Vec<_> = patterns::PATTERNS.iter().map(|p| p.name).collect();
            anyhow!("unknown pattern {name:?}, expected one of: {}", known.join(", "))
        })?;
        return Ok(Life::with_board(pattern.place(config.dimensions()?)));
    }
    Ok(config.build()?)
}

fn render(life: &Life, neighbors: bool) -> String {
    let board = life.current_board();
    let mut out = format!(
        "Generation {} (population {})\n{}",
        life.generation(),
        board.population(),
        board
    );
    if neighbors {
        let counts = life.neighbor_counts();
        for row in counts.chunks(board.dims().columns()) {
            out.extend(row.iter().map(|count| count.to_string()));
            out.push('\n');
        }
    }
    out.push('\n');
    out
}
