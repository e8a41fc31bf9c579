use eframe::egui::{Pos2, pos2};

use super::entity::{Bounds, Vec3};

pub const MIN_SCALE: f32 = 0.1;

/// Pinhole camera looking down +z at the center of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub center: Pos2,
    pub perspective: f32,
}

impl Camera {
    pub fn for_bounds(bounds: Bounds, perspective: f32) -> Self {
        Self {
            center: pos2(bounds.width * 0.5, bounds.height * 0.5),
            perspective,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: Pos2,
    pub scale: f32,
}

pub fn project(position: Vec3, camera: Camera) -> Projected {
    let raw = camera.perspective / (camera.perspective + position.z);
    let scale = if raw.is_finite() { raw.max(MIN_SCALE) } else { MIN_SCALE };
    let screen = pos2(
        (position.x - camera.center.x) * scale + camera.center.x,
        (position.y - camera.center.y) * scale + camera.center.y,
    );

    Projected { screen, scale }
}

pub fn project_all(
    positions: impl IntoIterator<Item = Vec3>,
    camera: Camera,
    out: &mut Vec<Projected>,
) {
    out.clear();
    out.extend(positions.into_iter().map(|position| project(position, camera)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::vec3;

    fn camera() -> Camera {
        Camera::for_bounds(
            Bounds {
                width: 800.0,
                height: 600.0,
                depth: 800.0,
            },
            800.0,
        )
    }

    #[test]
    fn front_plane_is_identity() {
        let projected = project(vec3(100.0, 50.0, 0.0), camera());
        assert_eq!(projected.scale, 1.0);
        assert_eq!(projected.screen, pos2(100.0, 50.0));
    }

    #[test]
    fn far_entities_shrink_toward_center() {
        let projected = project(vec3(0.0, 0.0, 800.0), camera());
        assert!((projected.scale - 0.5).abs() < 1e-6);
        assert!((projected.screen.x - 200.0).abs() < 1e-4);
        assert!((projected.screen.y - 150.0).abs() < 1e-4);
    }

    #[test]
    fn scale_stays_in_range_across_depth() {
        let camera = camera();
        for step in 0..=80 {
            let z = step as f32 * 10.0;
            let scale = project(vec3(400.0, 300.0, z), camera).scale;
            assert!((MIN_SCALE..=1.0).contains(&scale), "z={z} scale={scale}");
        }
    }

    #[test]
    fn extreme_depth_is_floored() {
        let camera = Camera {
            center: pos2(0.0, 0.0),
            perspective: 10.0,
        };
        assert_eq!(project(vec3(5.0, 5.0, 10_000.0), camera).scale, MIN_SCALE);
        assert_eq!(project(vec3(5.0, 5.0, -10.0), camera).scale, MIN_SCALE);
    }
}
