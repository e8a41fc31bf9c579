use std::ops::{Add, AddAssign, Sub};

use eframe::egui::Color32;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

pub const fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3 { x, y, z }
}

impl Vec3 {
    pub const ZERO: Self = vec3(0.0, 0.0, 0.0);

    pub fn length_sq(self) -> f32 {
        (self.x * self.x) + (self.y * self.y) + (self.z * self.z)
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        vec3(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        vec3(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Peer,
    Validator,
    StoragePeer,
}

impl EntityKind {
    pub fn color(self) -> Color32 {
        match self {
            Self::Peer => Color32::from_rgb(0x38, 0xbd, 0xf8),
            Self::Validator => Color32::from_rgb(0xf4, 0x72, 0xb6),
            Self::StoragePeer => Color32::from_rgb(0xa7, 0x8b, 0xfa),
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Peer => "peer",
            Self::Validator => "validator",
            Self::StoragePeer => "storage",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub kind: EntityKind,
    pub radius: f32,
    pub pulse_phase: f32,
}

impl Entity {
    pub fn is_validator(&self) -> bool {
        self.kind == EntityKind::Validator
    }
}

/// The simulation volume: `[0, width] x [0, height] x [0, depth]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Bounds {
    pub fn contains(&self, position: Vec3) -> bool {
        (0.0..=self.width).contains(&position.x)
            && (0.0..=self.height).contains(&position.y)
            && (0.0..=self.depth).contains(&position.z)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
