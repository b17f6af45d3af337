// main.rs - Game of Life viewer driving the flat_life engine
// The engine lives on a background worker; this module holds the UI state.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use egui::Color32;
use flat_life::config::{DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_THRESHOLD};
use flat_life::{Board, Dimensions, LifeConfig};
use log::info;
use std::time::{Duration, Instant};

mod ui; // eframe::App impl
mod worker; // Background engine owner

use worker::{Reply, Request, Snapshot, Worker};

/// Interactive viewer for Conway's Game of Life on a bounded grid.
#[derive(Parser, Debug)]
#[command(name = "grid_display")]
struct Args {
    /// Rows on the initial board.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Columns on the initial board.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,

    /// Chance that a random cell starts dead, from 0.0 to 1.0.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Seed for the initial random board.
    #[arg(long)]
    seed: Option<u64>,

    /// Generation to show first.
    #[arg(long, default_value_t = 0)]
    iterations: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = LifeConfig {
        rows: args.rows,
        columns: args.columns,
        threshold: args.threshold,
        iterations: args.iterations,
        seed: args.seed,
    };
    let life = config.build().context("invalid board settings")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("life-worker")
        .build()
        .context("failed to start worker runtime")?;
    info!("starting viewer on a {} board", life.dims());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flat Life",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let worker = Worker::spawn(runtime, life, move || ctx.request_repaint());
            Box::new(GameOfLife::new(worker, &config))
        }),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}

/// UI state. Mirrors the engine's latest snapshot plus the input controls.
pub struct GameOfLife {
    worker: Worker,
    pub frame: Option<Snapshot>,

    pub rows: usize,
    pub columns: usize,
    pub iterations: usize,
    pub threshold: f64,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub show_neighbors: bool,
    pub status: Option<String>,
    // Reseed, resize and load requests the worker has not answered yet.
    pending_restarts: usize,
}

impl GameOfLife {
    fn new(worker: Worker, config: &LifeConfig) -> Self {
        let mut app = Self {
            worker,
            frame: None,
            rows: config.rows,
            columns: config.columns,
            iterations: 0,
            threshold: config.threshold,
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(200),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            show_neighbors: false,
            status: None,
            pending_restarts: 0,
        };
        if config.iterations > 0 {
            app.advance_to(config.iterations);
        }
        app
    }

    /// Applies replies that arrived from the worker since the last frame.
    pub fn poll_worker(&mut self) {
        while let Some(reply) = self.worker.try_recv() {
            self.handle(reply);
        }
    }

    fn handle(&mut self, reply: Reply) {
        match reply {
            Reply::Snapshot(snapshot) => {
                if self.is_running && snapshot.generation == self.iterations {
                    if let Some(cycle) = snapshot.cycle {
                        self.is_running = false;
                        self.status = Some(format!(
                            "Stopped: repeats every {} generation(s) from generation {}",
                            cycle.period, cycle.start
                        ));
                    }
                }
                self.frame = Some(snapshot);
            }
            Reply::Restarted(snapshot) => {
                self.pending_restarts = self.pending_restarts.saturating_sub(1);
                self.rows = snapshot.board.dims().rows();
                self.columns = snapshot.board.dims().columns();
                self.iterations = snapshot.generation;
                self.frame = Some(snapshot);
            }
            Reply::Rejected(message) => {
                self.pending_restarts = self.pending_restarts.saturating_sub(1);
                // The engine kept its board, so the size controls go back to it.
                if let Some(frame) = &self.frame {
                    self.rows = frame.board.dims().rows();
                    self.columns = frame.board.dims().columns();
                }
                self.status = Some(message);
            }
        }
    }

    /// Ignored while a reseed, resize or load is in flight.
    pub fn advance_to(&mut self, generation: usize) {
        if self.pending_restarts > 0 {
            return;
        }
        self.iterations = generation;
        self.worker.send(Request::Advance(generation));
    }

    pub fn step(&mut self) {
        self.advance_to(self.iterations + 1);
    }

    pub fn resize(&mut self) {
        self.restart();
        self.worker.send(Request::Resize {
            rows: self.rows,
            columns: self.columns,
        });
    }

    pub fn randomize(&mut self) {
        self.restart();
        self.worker.send(Request::Reseed {
            rows: self.rows,
            columns: self.columns,
            threshold: self.threshold,
        });
    }

    pub fn clear_grid(&mut self) {
        if let Some(dims) = self.dimensions() {
            self.load(Board::dead(dims));
        }
    }

    pub fn apply_selected_pattern(&mut self) {
        let Some(pattern) = flat_life::patterns::PATTERNS.get(self.selected_pattern) else {
            return;
        };
        if let Some(dims) = self.dimensions() {
            self.load(pattern.place(dims));
        }
    }

    /// Flips one cell of the displayed board and makes the result the new
    /// generation 0.
    pub fn toggle_cell(&mut self, index: usize) {
        if let Some(frame) = &self.frame {
            let board = frame.board.toggled(index);
            self.load(board);
        }
    }

    fn load(&mut self, board: Board) {
        self.restart();
        self.worker.send(Request::Load(board));
    }

    /// Stops playback ahead of a request that starts a new lineage. The
    /// generation and size controls follow once the worker answers.
    fn restart(&mut self) {
        self.is_running = false;
        self.status = None;
        self.pending_restarts += 1;
    }

    fn dimensions(&mut self) -> Option<Dimensions> {
        match Dimensions::new(self.rows, self.columns) {
            Ok(dims) => Some(dims),
            Err(e) => {
                self.status = Some(e.to_string());
                None
            }
        }
    }
}
