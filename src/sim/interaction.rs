use eframe::egui::{Pos2, Vec2, pos2};

/// Pointer state shared between input events and the tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionField {
    pub pointer: Pos2,
    pub radius: f32,
    pub strength: f32,
}

impl InteractionField {
    /// Far enough off-canvas that nothing is perturbed before real input.
    pub const IDLE_POINTER: Pos2 = pos2(-1000.0, -1000.0);

    pub fn new(radius: f32, strength: f32) -> Self {
        Self {
            pointer: Self::IDLE_POINTER,
            radius,
            strength,
        }
    }

    pub fn set_pointer(&mut self, pointer: Pos2) {
        self.pointer = pointer;
    }

    /// Velocity change for an entity currently drawn at `screen`.
    pub fn apply(&self, screen: Pos2) -> Vec2 {
        let delta = self.pointer - screen;
        let distance = delta.length();
        if distance >= self.radius {
            return Vec2::ZERO;
        }

        let force = (self.radius - distance) / self.radius;
        let angle = delta.y.atan2(delta.x);
        -Vec2::angled(angle) * force * self.strength
    }
}
