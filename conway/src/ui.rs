// ui.rs - egui surface: draws the session and turns pointer/keys into Actions

use crate::LifeApp;
use conway_core::render;
use conway_core::{resolve_click, Action, ClickHits, Flow, InputAdapter, Library, Mode, Rgb, SessionState};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::path::PathBuf;
use std::time::Instant;

pub const SPACING: f32 = 0.5;
pub const LIBRARY_WIDTH: f32 = 190.0;

/// Collects this frame's actions while the UI is laid out. Clicks are held
/// back and resolved once per frame, so a single press maps to one action.
#[derive(Default)]
pub struct EguiInput {
    pending: Vec<Action>,
    hits: ClickHits,
    clicked: bool,
}

impl EguiInput {
    fn push(&mut self, action: Action) {
        self.pending.push(action);
    }

    fn library(&mut self, name: &str) {
        self.hits.library = Some(name.to_string());
        self.clicked = true;
    }

    fn button(&mut self, action: Action) {
        self.hits.button = Some(action);
        self.clicked = true;
    }

    fn cell(&mut self, row: usize, col: usize) {
        self.hits.cell = Some((row, col));
        self.clicked = true;
    }

    fn cancel(&mut self) {
        self.hits.cancel = true;
        self.clicked = true;
    }

    fn finish_frame(&mut self, placing: bool) {
        let hits = std::mem::take(&mut self.hits);
        if std::mem::take(&mut self.clicked) {
            if let Some(action) = resolve_click(placing, hits) {
                self.pending.push(action);
            }
        }
    }
}

impl InputAdapter for EguiInput {
    fn poll(&mut self, out: &mut Vec<Action>) -> bool {
        out.append(&mut self.pending);
        true
    }
}

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

fn edit_color(ui: &mut egui::Ui, label: &str, rgb: &mut Rgb) {
    ui.label(label);
    let mut c = color(*rgb);
    if ui.color_edit_button_srgba(&mut c).changed() {
        *rgb = Rgb(c.r(), c.g(), c.b());
    }
}

/// Keys that stand in for buttons, per mode.
fn map_keys(ctx: &egui::Context, mode: &Mode) -> Vec<Action> {
    let mut out = Vec::new();
    if ctx.wants_keyboard_input() {
        return out;
    }
    ctx.input(|i| {
        if i.key_pressed(egui::Key::Q) {
            out.push(Action::Quit);
        }
        let confirm = i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::Enter);
        match mode {
            Mode::Editing => {
                if confirm {
                    out.push(Action::Start);
                }
                if i.key_pressed(egui::Key::C) {
                    out.push(Action::Clear);
                }
            }
            Mode::PlacingPattern { .. } => {
                if i.key_pressed(egui::Key::Escape) {
                    out.push(Action::CancelPlacement);
                }
            }
            Mode::Simulating => {}
            Mode::Terminated(_) => {
                if confirm {
                    out.push(Action::Acknowledge);
                }
            }
        }
    });
    out
}

impl LifeApp {
    fn controls(&mut self, ui: &mut egui::Ui) {
        let editing = self.state.is_editing();
        let can_start = self.state.can_start();
        ui.horizontal(|ui| {
            if ui.add_enabled(can_start, egui::Button::new("▶ Start")).clicked() {
                self.input.button(Action::Start);
            }
            if ui.add_enabled(editing, egui::Button::new("⏹ Clear")).clicked() {
                self.input.button(Action::Clear);
            }

            ui.separator();

            ui.label("File:");
            ui.add(egui::TextEdit::singleline(&mut self.file).desired_width(160.0));
            let path = PathBuf::from(self.file.trim());
            if ui.add_enabled(editing, egui::Button::new("Save")).clicked() {
                self.input.button(Action::Save(path.clone()));
            }
            if ui.add_enabled(editing, egui::Button::new("Save grid")).clicked() {
                self.input.button(Action::SaveGrid(path.clone()));
            }
            if ui.add_enabled(editing, egui::Button::new("Load")).clicked() {
                self.input.button(Action::Load(path));
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.state.generation()));
        });

        ui.horizontal(|ui| {
            edit_color(ui, "Newborn:", &mut self.palette.newborn);
            edit_color(ui, "Mature:", &mut self.palette.mature);
            edit_color(ui, "Dead:", &mut self.palette.dead);

            ui.separator();

            match self.state.mode() {
                Mode::Editing => match self.state.countdown() {
                    Some(left) => ui.label(format!("Starting in {:.1}s; any input cancels", left.as_secs_f32())),
                    None => ui.label("Click cells to toggle, drag to paint. Space starts."),
                },
                Mode::PlacingPattern { pattern, .. } => {
                    ui.label(format!("Placing {}: click to stamp, right-click or Esc to cancel", pattern.name()))
                }
                Mode::Simulating => ui.label(format!("Running, stable for {} ticks", self.state.stable_count())),
                Mode::Terminated(_) => ui.label("Finished"),
            };
        });

        if let Some(status) = self.state.status() {
            ui.label(status);
        }
    }

    fn library(&mut self, ui: &mut egui::Ui) {
        let editing = self.state.is_editing();
        ui.heading("Patterns");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for category in Library.categories() {
                egui::CollapsingHeader::new(category.name)
                    .default_open(true)
                    .show(ui, |ui| {
                        for def in category.patterns {
                            if ui.add_enabled(editing, egui::Button::new(def.name)).clicked() {
                                self.input.library(def.name);
                            }
                        }
                    });
            }
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let grid = self.state.grid();
        let (rows, cols) = (grid.rows(), grid.cols());
        let box_size = self.state.config().cell_size as f32;
        let pitch = box_size + SPACING;

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(pitch * cols as f32 - SPACING, pitch * rows as f32 - SPACING);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());

        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        let cell_rect = |row: usize, col: usize| {
            let x = start_pos.x + col as f32 * pitch;
            let y = start_pos.y + row as f32 * pitch;
            Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size))
        };
        let cell_at = |pos: egui::Pos2| {
            let rel = pos - start_pos;
            if rel.x < 0.0 || rel.y < 0.0 {
                return None;
            }
            let (row, col) = ((rel.y / pitch) as usize, (rel.x / pitch) as usize);
            (row < rows && col < cols).then_some((row, col))
        };

        for row in 0..rows {
            for col in 0..cols {
                let rect = cell_rect(row, col);
                painter.rect_filled(rect, 1.0, color(self.palette.cell_at(grid, row, col)));
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }
        }

        let hovered = response.hover_pos().and_then(cell_at);
        let placing = matches!(self.state.mode(), Mode::PlacingPattern { .. });

        if let Mode::PlacingPattern { pattern, .. } = self.state.mode() {
            if let Some((row, col)) = hovered {
                let cells = render::preview(grid, pattern, (row, col));
                for &(r, c) in cells.iter().flatten() {
                    let fill = color(self.palette.preview).linear_multiply(0.7);
                    painter.rect_filled(cell_rect(r, c), 1.0, fill);
                }
                let clipped = cells.iter().any(Option::is_none);
                let edge = if clipped { self.palette.preview_clipped } else { self.palette.preview };
                painter.rect_stroke(cell_rect(row, col), 1.0, Stroke::new(1.5, color(edge)));
            }
        }

        if placing {
            if let Some((row, col)) = hovered {
                self.input.push(Action::MoveCursor { row, col });
            }
            if response.secondary_clicked() {
                self.input.cancel();
            }
        }

        if response.clicked() {
            if let Some((row, col)) = response.interact_pointer_pos().and_then(cell_at) {
                self.input.cell(row, col);
            }
        } else if !placing && self.state.mode() == &Mode::Editing && response.dragged_by(egui::PointerButton::Primary) {
            if let Some((row, col)) = response.interact_pointer_pos().and_then(cell_at) {
                self.input.push(Action::Paint { row, col, alive: true });
            }
        }

        let grid = self.state.grid();
        let live = grid.live_count();
        let total = rows * cols;
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }

    fn report(&self, ui: &mut egui::Ui) {
        if let Some(t) = self.state.termination() {
            ui.separator();
            ui.colored_label(
                Color32::from_rgb(0, 255, 0),
                format!("{} Press Space to exit.", t.report()),
            );
        }
    }

    /// Feeds the frame's actions to the session. Steps only when a tick is due.
    fn drive(&mut self, ctx: &egui::Context) {
        let mut actions = map_keys(ctx, self.state.mode());
        self.input.poll(&mut actions);

        let flow = if self.last_tick.elapsed() >= self.tick_interval {
            let elapsed = self.last_tick.elapsed();
            self.last_tick = Instant::now();
            self.state.tick(actions, elapsed)
        } else {
            apply_all(&mut self.state, actions)
        };

        if flow == Flow::Exit {
            tracing::info!(generation = self.state.generation(), "closing window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

fn apply_all(state: &mut SessionState, actions: Vec<Action>) -> Flow {
    for action in actions {
        if state.apply(action) == Flow::Exit {
            return Flow::Exit;
        }
    }
    Flow::Continue
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
        });

        egui::SidePanel::left("library")
            .exact_width(LIBRARY_WIDTH)
            .show(ctx, |ui| self.library(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.board(ui);
                self.report(ui);
            });
        });

        let placing = matches!(self.state.mode(), Mode::PlacingPattern { .. });
        self.input.finish_frame(placing);

        // Keep ticking and the countdown moving without pointer activity.
        ctx.request_repaint_after(self.tick_interval);
    }
}
