use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use holo_graph::Canvas;
use holo_graph::render::with_alpha;

const GRID_STEP: f32 = 40.0;
const GLOW_RINGS: usize = 3;

pub(in crate::app) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(6, 8, 12));

    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 8));

    let mut x = rect.left();
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += GRID_STEP;
    }

    let mut y = rect.top();
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += GRID_STEP;
    }
}

/// Paints into an egui rect; graph coordinates are relative to its corner.
pub(in crate::app) struct EguiCanvas<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> EguiCanvas<'a> {
    pub(in crate::app) fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        self.rect.min + point.to_vec2()
    }
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self) {
        draw_background(self.painter, self.rect);
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(width, color),
        );
    }

    fn circle(&mut self, center: Pos2, radius: f32, color: Color32, glow: f32) {
        let center = self.to_screen(center);

        // egui has no shadow blur; fake it with fading halos.
        if glow > 0.0 {
            let base_alpha = color.a() as f32 / 255.0;
            for ring in (1..=GLOW_RINGS).rev() {
                let t = ring as f32 / GLOW_RINGS as f32;
                let halo = with_alpha(color, base_alpha * 0.18 * (1.0 - t * 0.5));
                self.painter.circle_filled(center, radius + glow * t, halo);
            }
        }

        self.painter.circle_filled(center, radius.max(0.0), color);
    }

    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.to_screen(anchor),
            Align2::LEFT_CENTER,
            text,
            FontId::monospace(size.max(1.0)),
            color,
        );
    }
}
