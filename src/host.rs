use eframe::egui::{Pos2, Vec2};

/// Size of the container the graph is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical (CSS / egui point) size.
    pub size: Vec2,
    pub pixels_per_point: f32,
}

impl Viewport {
    pub fn new(size: Vec2, pixels_per_point: f32) -> Self {
        Self {
            size,
            pixels_per_point,
        }
    }

    fn ratio(&self) -> f32 {
        if self.pixels_per_point.is_finite() && self.pixels_per_point > 0.0 {
            self.pixels_per_point
        } else {
            1.0
        }
    }

    /// Physical backing-store size in pixels.
    pub fn backing_size(&self) -> [u32; 2] {
        let ratio = self.ratio();
        [
            (self.size.x.max(0.0) * ratio).round() as u32,
            (self.size.y.max(0.0) * ratio).round() as u32,
        ]
    }

    pub fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Resized(Viewport),
    /// Pointer position relative to the container's top-left corner.
    PointerMoved(Pos2),
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Resized(_) => EventKind::Resize,
            Self::PointerMoved(_) => EventKind::PointerMove,
        }
    }
}

/// The environment a graph is attached to: listener registry, frame
/// scheduler and the container it measures.
pub trait Host {
    fn has_surface(&self) -> bool;
    fn viewport(&self) -> Viewport;
    fn add_listener(&mut self, kind: EventKind) -> ListenerId;
    fn remove_listener(&mut self, id: ListenerId);
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn backing_size_scales_by_pixel_ratio() {
        let viewport = Viewport::new(vec2(800.0, 600.0), 2.0);
        assert_eq!(viewport.backing_size(), [1600, 1200]);

        let fractional = Viewport::new(vec2(333.0, 100.0), 1.5);
        assert_eq!(fractional.backing_size(), [500, 150]);
    }

    #[test]
    fn invalid_ratio_falls_back_to_one() {
        let viewport = Viewport::new(vec2(10.0, 20.0), 0.0);
        assert_eq!(viewport.backing_size(), [10, 20]);
    }

    #[test]
    fn zero_area_is_degenerate() {
        assert!(Viewport::new(vec2(0.0, 600.0), 1.0).is_degenerate());
        assert!(!Viewport::new(vec2(1.0, 1.0), 1.0).is_degenerate());
    }
}
