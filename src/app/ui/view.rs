use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui};
use tracing::error;

use holo_graph::{Host, create_graph};

use super::super::canvas::{EguiCanvas, draw_background};
use super::super::{GraphSlot, ViewModel};

impl ViewModel {
    fn ensure_graph(&mut self) {
        if !matches!(self.slot, GraphSlot::Pending) {
            return;
        }

        self.slot = match create_graph(&mut self.host, self.config.clone()) {
            Ok(mut graph) => {
                let stats_rx = graph.subscribe_stats();
                GraphSlot::Running { graph, stats_rx }
            }
            Err(err) => {
                error!(%err, "failed to start holographic graph");
                GraphSlot::Unavailable(err.to_string())
            }
        };
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        let events = self.host.poll_events(rect);

        self.ensure_graph();

        match &mut self.slot {
            GraphSlot::Running { graph, stats_rx } => {
                for event in events {
                    graph.handle_event(event);
                }

                let Some(request) = self.host.take_due_frame() else {
                    draw_background(&painter, rect);
                    return;
                };
                let mut canvas = EguiCanvas::new(&painter, rect);
                graph.frame(&mut self.host, &mut canvas, request);

                if let Some(stats) = stats_rx.try_iter().last() {
                    self.stats = stats;
                }
            }
            GraphSlot::Unavailable(reason) => {
                draw_background(&painter, rect);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    format!("Network view unavailable: {reason}"),
                    FontId::proportional(14.0),
                    Color32::from_gray(160),
                );
                if ui
                    .put(
                        egui::Rect::from_center_size(
                            rect.center() + egui::vec2(0.0, 32.0),
                            egui::vec2(80.0, 24.0),
                        ),
                        egui::Button::new("Retry"),
                    )
                    .clicked()
                {
                    self.slot = GraphSlot::Pending;
                    ui.ctx().request_repaint();
                }
            }
            GraphSlot::Pending => {
                draw_background(&painter, rect);
                if self.host.has_surface() {
                    ui.ctx().request_repaint();
                }
            }
        }
    }
}
