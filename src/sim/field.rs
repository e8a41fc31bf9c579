use std::f32::consts::TAU;

use rand::Rng;
use tracing::debug;

use crate::config::GraphConfig;

use super::entity::{Bounds, Entity, EntityKind, Vec3, vec3};
use super::interaction::InteractionField;
use super::projector::{Camera, project};

const PULSE_STEP: f32 = 0.05;
const VALIDATOR_RADIUS: f32 = 6.0;
const VALIDATOR_SPEED: f32 = 0.2;
const PEER_SPEED: f32 = 0.5;

/// Owns entity creation and per-tick kinematics.
#[derive(Debug, Default)]
pub struct NodeField {
    next_id: u64,
}

fn jitter(rng: &mut impl Rng, span: f32) -> f32 {
    (rng.gen_range(0.0..1.0_f32) - 0.5) * span
}

fn random_velocity(rng: &mut impl Rng, span: f32) -> Vec3 {
    vec3(jitter(rng, span), jitter(rng, span), jitter(rng, span))
}

fn unit(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..1.0_f32)
}

impl NodeField {
    fn next_id(&mut self, kind: EntityKind) -> String {
        let id = format!("{}-{}", kind.id_prefix(), self.next_id);
        self.next_id += 1;
        id
    }

    pub fn seed(
        &mut self,
        bounds: Bounds,
        config: &GraphConfig,
        rng: &mut impl Rng,
    ) -> Vec<Entity> {
        if bounds.is_degenerate() {
            debug!(
                width = bounds.width,
                height = bounds.height,
                "zero-area viewport, field left empty"
            );
            return Vec::new();
        }

        let mut entities = Vec::with_capacity(config.entity_count());

        for _ in 0..config.validator_count {
            let position = vec3(
                bounds.width * 0.2 + unit(rng) * bounds.width * 0.6,
                bounds.height * 0.2 + unit(rng) * bounds.height * 0.6,
                unit(rng) * bounds.depth * 0.3,
            );
            entities.push(Entity {
                id: self.next_id(EntityKind::Validator),
                position,
                velocity: random_velocity(rng, VALIDATOR_SPEED),
                kind: EntityKind::Validator,
                radius: VALIDATOR_RADIUS,
                pulse_phase: unit(rng) * TAU,
            });
        }

        for _ in 0..config.peer_count {
            let kind = if unit(rng) < config.storage_fraction {
                EntityKind::StoragePeer
            } else {
                EntityKind::Peer
            };
            let radius = match kind {
                EntityKind::StoragePeer => 2.5 + unit(rng),
                _ => 1.5 + unit(rng),
            };
            let position = vec3(
                unit(rng) * bounds.width,
                unit(rng) * bounds.height,
                unit(rng) * bounds.depth,
            );
            entities.push(Entity {
                id: self.next_id(kind),
                position,
                velocity: random_velocity(rng, PEER_SPEED),
                kind,
                radius,
                pulse_phase: unit(rng) * TAU,
            });
        }

        debug!(
            entities = entities.len(),
            width = bounds.width,
            height = bounds.height,
            depth = bounds.depth,
            "seeded node field"
        );
        entities
    }

    /// Integrate, pulse, bounce, then push away from the pointer using
    /// this tick's projected position.
    pub fn step(
        entities: &mut [Entity],
        bounds: Bounds,
        camera: Camera,
        interaction: &InteractionField,
    ) {
        for entity in entities.iter_mut() {
            entity.position += entity.velocity;
            entity.pulse_phase += PULSE_STEP;

            bounce(&mut entity.position.x, &mut entity.velocity.x, bounds.width);
            bounce(&mut entity.position.y, &mut entity.velocity.y, bounds.height);
            bounce(&mut entity.position.z, &mut entity.velocity.z, bounds.depth);

            let push = interaction.apply(project(entity.position, camera).screen);
            entity.velocity.x += push.x;
            entity.velocity.y += push.y;
        }
    }
}

/// Keeps `position` inside `[0, max]` and turns the velocity back inward.
fn bounce(position: &mut f32, velocity: &mut f32, max: f32) {
    if *position < 0.0 {
        *position = 0.0;
        *velocity = velocity.abs();
    } else if *position > max {
        *position = max;
        *velocity = -velocity.abs();
    }
}
