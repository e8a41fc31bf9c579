use std::collections::VecDeque;

use eframe::egui::{self, Align, Color32, Context, Layout, Margin, RichText, Stroke, Ui};

use holo_graph::render::with_alpha;
use holo_graph::{FrameStats, GraphConfig};

use super::super::host::EguiHost;
use super::super::{GraphSlot, ViewModel};

const CYAN: Color32 = Color32::from_rgb(34, 211, 238);
const PINK: Color32 = Color32::from_rgb(244, 114, 182);
const GREEN: Color32 = Color32::from_rgb(74, 222, 128);

fn badge(ui: &mut Ui, text: &str, color: Color32) {
    egui::Frame::new()
        .fill(with_alpha(color, 0.1))
        .stroke(Stroke::new(1.0, with_alpha(color, 0.3)))
        .corner_radius(6.0)
        .inner_margin(Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(color).small().strong());
        });
}

fn stat_card(ui: &mut Ui, title: &str, value: usize, color: Color32) {
    egui::Frame::new()
        .fill(Color32::from_black_alpha(100))
        .stroke(Stroke::new(1.0, Color32::from_white_alpha(25)))
        .corner_radius(8.0)
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(140.0);
            ui.label(RichText::new(title.to_uppercase()).small().weak());
            ui.label(RichText::new(value.to_string()).monospace().size(22.0).color(color));
        });
}

impl ViewModel {
    pub(in crate::app) fn new(host: EguiHost, config: GraphConfig) -> Self {
        Self {
            host,
            slot: GraphSlot::Pending,
            draft: config.clone(),
            config,
            stats: FrameStats::default(),
            show_controls: false,
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Living Graph");
                    ui.separator();
                    badge(ui, "SYSTEM PILOT VIEW", CYAN);
                    badge(ui, "MPC VALIDATORS: ACTIVE", PINK);
                    ui.separator();
                    if ui.button("Reset Simulation").clicked() {
                        self.reset_graph();
                    }
                    ui.toggle_value(&mut self.show_controls, "Controls");
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let status = match &self.slot {
                        GraphSlot::Running { .. } => ("NETWORK SYNCHRONIZED", GREEN),
                        GraphSlot::Pending => ("CONNECTING", CYAN),
                        GraphSlot::Unavailable(_) => ("OFFLINE", PINK),
                    };
                    ui.label(RichText::new(status.0).monospace().color(status.1));
                });
            });

        if self.show_controls {
            egui::SidePanel::left("controls")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| self.draw_controls(ui));
        }

        egui::SidePanel::right("stats")
            .resizable(false)
            .exact_width(170.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                stat_card(ui, "Active Nodes", self.stats.active_entities, Color32::WHITE);
                ui.add_space(6.0);
                stat_card(ui, "Synapses", self.stats.active_edges, CYAN);
                ui.add_space(6.0);
                stat_card(ui, "Data Packets", self.stats.active_packets, PINK);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| self.draw_graph(ui));
    }

    fn reset_graph(&mut self) {
        if let GraphSlot::Running { graph, .. } = &mut self.slot {
            graph.reset();
            self.stats = graph.stats();
        } else {
            self.slot = GraphSlot::Pending;
        }
    }

    /// Tears the running graph down; the next frame builds a fresh one from
    /// `config`.
    pub(in crate::app) fn restart_graph(&mut self) {
        if let GraphSlot::Running { graph, .. } = &mut self.slot {
            graph.dispose(&mut self.host);
        }
        self.slot = GraphSlot::Pending;
        self.stats = FrameStats::default();
    }
}
