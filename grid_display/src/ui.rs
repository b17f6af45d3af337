// ui.rs - Controls and board rendering for the viewer
// Reads snapshots only; every change goes to the worker as a request.

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Stroke, Vec2};
use flat_life::patterns;
use std::time::{Duration, Instant};

use crate::GameOfLife;

const MAX_SIDE: usize = 200;
const MAX_GENERATION: usize = 100_000;
const MAX_BOX_SIZE: f32 = 30.0;
const MIN_BOX_SIZE: f32 = 3.0;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        // Auto-advance if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.step();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life (flat board)");

            // Board size and target generation
            ui.horizontal(|ui| {
                ui.label("Rows:");
                let rows = ui.add(egui::DragValue::new(&mut self.rows).clamp_range(1..=MAX_SIDE));
                ui.label("Columns:");
                let columns =
                    ui.add(egui::DragValue::new(&mut self.columns).clamp_range(1..=MAX_SIDE));
                if rows.changed() || columns.changed() {
                    self.resize();
                }

                ui.separator();

                ui.label("Generation:");
                let mut target = self.iterations;
                if ui
                    .add(egui::DragValue::new(&mut target).clamp_range(0..=MAX_GENERATION))
                    .changed()
                {
                    self.advance_to(target);
                }
                if ui.button("Step").clicked() {
                    self.is_running = false;
                    self.step();
                }
            });

            ui.separator();

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.status = None;
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }
            });

            ui.separator();

            // Speed, seeding threshold and colors
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis() as f32;
                if ui
                    .add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" gen/sec"))
                    .changed()
                {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Dead threshold:");
                ui.add(egui::Slider::new(&mut self.threshold, 0.0..=1.0));

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
                ui.checkbox(&mut self.show_neighbors, "Neighbor counts");
            });

            ui.separator();

            ui.label("Click a cell to toggle it. Editing the board starts again from generation 0.");
            if let Some(status) = &self.status {
                ui.colored_label(Color32::YELLOW, status);
            }

            ui.separator();

            let Some(frame) = self.frame.clone() else {
                ui.label("Computing…");
                return;
            };

            let dims = frame.board.dims();
            let spacing = 0.5;
            let available = ui.available_width();
            let box_size = ((available / dims.columns() as f32) - spacing)
                .clamp(MIN_BOX_SIZE, MAX_BOX_SIZE);

            let mut clicked = None;
            egui::ScrollArea::both().max_height(600.0).show(ui, |ui| {
                let total_size = Vec2::new(
                    (box_size + spacing) * dims.columns() as f32 - spacing,
                    (box_size + spacing) * dims.rows() as f32 - spacing,
                );
                let start_pos = ui.cursor().min;
                let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

                // Fill background
                painter.rect_filled(
                    Rect::from_min_size(start_pos, total_size),
                    0.0,
                    Color32::BLACK,
                );

                let pointer = response
                    .clicked()
                    .then(|| response.interact_pointer_pos())
                    .flatten();

                for (index, cell) in frame.board.cells().iter().enumerate() {
                    let row = index / dims.columns();
                    let col = index % dims.columns();
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let cell_color = if cell.is_alive() {
                        self.live_color
                    } else {
                        self.dead_color
                    };
                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

                    if self.show_neighbors && box_size >= 10.0 {
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            frame.neighbor_counts[index].to_string(),
                            FontId::monospace(box_size * 0.6),
                            Color32::WHITE,
                        );
                    }

                    if pointer.is_some_and(|pos| rect.contains(pos)) {
                        clicked = Some(index);
                    }
                }
            });

            if let Some(index) = clicked {
                if !self.is_running {
                    self.toggle_cell(index);
                }
            }

            ui.separator();

            let live_cells = frame.board.population();
            let total = dims.len();
            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", frame.generation));
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!(
                    "Population: {:.1}%",
                    (live_cells as f32 / total as f32) * 100.0
                ));
            });
        });

        // Keep ticking while running
        if self.is_running {
            ctx.request_repaint_after(self.update_interval);
        }
    }
}
