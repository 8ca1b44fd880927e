// ui.rs - Paints the latest snapshot; dead cells are tinted by owning worker

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use conway::{Board, Region};

use crate::Update;

/// One tint per worker, cycled when there are more than eight.
const REGION_TINTS: [Color32; 8] = [
    Color32::from_rgb(230, 159, 0),
    Color32::from_rgb(86, 180, 233),
    Color32::from_rgb(0, 158, 115),
    Color32::from_rgb(240, 228, 66),
    Color32::from_rgb(0, 114, 178),
    Color32::from_rgb(213, 94, 0),
    Color32::from_rgb(204, 121, 167),
    Color32::from_rgb(150, 150, 150),
];

pub struct ViewerApp {
    rx: Receiver<Update>,
    cols: usize,
    /// Region id for every cell, row-major
    owner: Vec<usize>,
    board: Option<Board>,
    round: u32,
    live: i64,
    status: String,
    live_color: Color32,
    show_regions: bool,
}

impl ViewerApp {
    pub fn new(rx: Receiver<Update>, rows: usize, cols: usize, regions: &[Region]) -> Self {
        let mut owner = vec![0; rows * cols];
        for region in regions {
            for row in region.rows() {
                for col in region.cols() {
                    owner[row * cols + col] = region.id;
                }
            }
        }
        Self {
            rx,
            cols,
            owner,
            board: None,
            round: 0,
            live: 0,
            status: format!("Running on {} workers", regions.len()),
            live_color: Color32::BLACK,
            show_regions: true,
        }
    }

    /// Drain the channel, keeping only the newest board.
    fn poll(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(Update::Round { round, live, board }) => {
                    self.round = round;
                    self.live = live;
                    self.board = Some(board);
                }
                Ok(Update::Finished { live, elapsed }) => {
                    self.status = format!(
                        "Finished: {} live cells after {:.3} s",
                        live,
                        elapsed.as_secs_f64()
                    );
                }
                Ok(Update::Failed(message)) => self.status = format!("Failed: {message}"),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    fn dead_color(&self, row: usize, col: usize) -> Color32 {
        if self.show_regions {
            REGION_TINTS[self.owner[row * self.cols + col] % REGION_TINTS.len()]
        } else {
            Color32::WHITE
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Game of Life (one thread per region)");

            ui.horizontal(|ui| {
                ui.label(format!("Round: {}", self.round));
                ui.separator();
                ui.label(format!("Live cells: {}", self.live));
                ui.separator();
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.checkbox(&mut self.show_regions, "Tint regions");
            });
            ui.label(self.status.as_str());

            ui.separator();

            let Some(board) = &self.board else {
                ui.label("Waiting for the first round...");
                return;
            };

            let (rows, cols) = (board.rows(), board.cols());
            let longest = rows.max(cols) as f32;
            let box_size = (780.0 / longest).clamp(2.0, 15.0);
            let spacing = if box_size > 4.0 { 0.5 } else { 0.0 };

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * cols as f32 - spacing,
                (box_size + spacing) * rows as f32 - spacing,
            );
            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for row in 0..rows {
                for col in 0..cols {
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let cell_color = if board.is_alive(row, col) {
                        self.live_color
                    } else {
                        self.dead_color(row, col)
                    };
                    painter.rect_filled(rect, 0.0, cell_color);
                    if spacing > 0.0 {
                        painter.rect_stroke(rect, 0.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }
                }
            }
        });

        // keep polling while the simulation thread is producing rounds
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
