use eframe::egui::{Color32, Pos2, vec2};

use crate::sim::entity::Entity;
use crate::sim::{FrameStats, TickScratch};

const NODE_GLOW: f32 = 10.0;
const PACKET_RADIUS: f32 = 1.5;
const PACKET_GLOW: f32 = 5.0;
const PULSE_AMPLITUDE: f32 = 0.2;
const LABEL_SCALE_THRESHOLD: f32 = 0.8;
const LABEL_TEXT: &str = "MPC-VAL";
const LABEL_SIZE: f32 = 10.0;
const LABEL_OFFSET: f32 = 10.0;

/// Drawing surface the renderer paints one frame into.
pub trait Canvas {
    fn clear(&mut self);
    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
    /// `glow` is a blur radius in points; zero draws a plain disc.
    fn circle(&mut self, center: Pos2, radius: f32, color: Color32, glow: f32);
    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32);
}

pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn pulse_factor(phase: f32) -> f32 {
    1.0 + PULSE_AMPLITUDE * phase.sin()
}

fn edge_color(validator: bool, opacity: f32) -> Color32 {
    if validator {
        Color32::from_rgba_unmultiplied(244, 114, 182, (opacity * 0.8 * 255.0) as u8)
    } else {
        Color32::from_rgba_unmultiplied(255, 255, 255, (opacity * 0.15 * 255.0) as u8)
    }
}

/// Paints a full frame and returns the stats it drew.
#[derive(Debug, Default)]
pub struct Renderer {
    draw_order: Vec<usize>,
}

impl Renderer {
    pub fn draw(
        &mut self,
        canvas: &mut dyn Canvas,
        entities: &[Entity],
        scratch: &TickScratch,
        active_packets: usize,
    ) -> FrameStats {
        canvas.clear();

        let projected = &scratch.projected;
        for edge in scratch.edges.iter().filter(|edge| edge.is_visible()) {
            let (Some(start), Some(end)) = (projected.get(edge.from), projected.get(edge.to)) else {
                continue;
            };
            canvas.line(start.screen, end.screen, 1.0, edge_color(edge.validator, edge.opacity));
        }

        let count = entities.len().min(projected.len());
        self.draw_order.clear();
        self.draw_order.extend(0..count);
        self.draw_order.sort_by(|a, b| {
            entities[*b]
                .position
                .z
                .total_cmp(&entities[*a].position.z)
        });

        for &index in &self.draw_order {
            let entity = &entities[index];
            let view = projected[index];
            let radius = entity.radius * view.scale * pulse_factor(entity.pulse_phase);
            let color = with_alpha(entity.kind.color(), view.scale.clamp(0.1, 1.0));
            let glow = if entity.is_validator() {
                NODE_GLOW * view.scale
            } else {
                0.0
            };
            canvas.circle(view.screen, radius, color, glow);

            if entity.is_validator() && view.scale > LABEL_SCALE_THRESHOLD {
                canvas.text(
                    view.screen + vec2(LABEL_OFFSET, 0.0),
                    LABEL_TEXT,
                    LABEL_SIZE * view.scale,
                    Color32::from_rgba_unmultiplied(255, 255, 255, 178),
                );
            }
        }

        for sprite in &scratch.sprites {
            canvas.circle(sprite.screen, PACKET_RADIUS * sprite.scale, Color32::WHITE, PACKET_GLOW);
        }

        FrameStats {
            active_entities: entities.len(),
            active_edges: scratch.edges.len(),
            active_packets,
        }
    }
}
