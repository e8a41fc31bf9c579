use rand::Rng;

use super::entity::Entity;
use super::packets::Packet;
use super::projector::Projected;

/// Edges fainter than this are counted but not drawn.
pub const VISIBILITY_FLOOR: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub opacity: f32,
    pub validator: bool,
}

impl Edge {
    pub fn is_visible(&self) -> bool {
        self.opacity > VISIBILITY_FLOOR
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SpawnPolicy {
    pub probability: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub max_packets: Option<usize>,
}

impl SpawnPolicy {
    fn has_room(&self, in_flight: usize) -> bool {
        self.max_packets.is_none_or(|ceiling| in_flight < ceiling)
    }

    fn speed(&self, rng: &mut impl Rng) -> f32 {
        if self.speed_max > self.speed_min {
            rng.gen_range(self.speed_min..self.speed_max)
        } else {
            self.speed_min
        }
    }
}

pub fn distance_3d(a: &Entity, b: &Entity) -> f32 {
    a.position.distance(b.position)
}

pub fn edge_opacity(distance: f32, connection_distance: f32, scale_a: f32, scale_b: f32) -> f32 {
    ((1.0 - distance / connection_distance) * scale_a.min(scale_b)).clamp(0.0, 1.0)
}

#[derive(Debug, Default)]
pub struct EvaluationOutcome {
    /// Spawns skipped because the packet ceiling was reached.
    pub suppressed_spawns: usize,
}

/// All-pairs scan over true 3D positions. Rebuilds `edges` from scratch and
/// may append freshly spawned packets to `packets`.
pub fn evaluate(
    entities: &[Entity],
    projected: &[Projected],
    connection_distance: f32,
    policy: &SpawnPolicy,
    rng: &mut impl Rng,
    edges: &mut Vec<Edge>,
    packets: &mut Vec<Packet>,
) -> EvaluationOutcome {
    edges.clear();
    let mut outcome = EvaluationOutcome::default();
    let count = entities.len().min(projected.len());

    for i in 0..count {
        for j in (i + 1)..count {
            let distance = distance_3d(&entities[i], &entities[j]);
            if distance >= connection_distance {
                continue;
            }

            edges.push(Edge {
                from: i,
                to: j,
                opacity: edge_opacity(
                    distance,
                    connection_distance,
                    projected[i].scale,
                    projected[j].scale,
                ),
                validator: entities[i].is_validator() || entities[j].is_validator(),
            });

            if policy.probability > 0.0 && rng.gen_bool(f64::from(policy.probability)) {
                if policy.has_room(packets.len()) {
                    packets.push(Packet::new(i, j, policy.speed(rng)));
                } else {
                    outcome.suppressed_spawns += 1;
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::sim::entity::{EntityKind, Vec3, vec3};

    fn entity(kind: EntityKind, position: Vec3) -> Entity {
        Entity {
            id: format!("{}-test", kind.id_prefix()),
            position,
            velocity: Vec3::ZERO,
            kind,
            radius: 2.0,
            pulse_phase: 0.0,
        }
    }

    fn front(count: usize) -> Vec<Projected> {
        vec![
            Projected {
                screen: pos2(0.0, 0.0),
                scale: 1.0,
            };
            count
        ]
    }

    fn quiet() -> SpawnPolicy {
        SpawnPolicy {
            probability: 0.0,
            speed_min: 0.01,
            speed_max: 0.03,
            max_packets: None,
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = entity(EntityKind::Peer, vec3(1.0, 2.0, 3.0));
        let b = entity(EntityKind::Validator, vec3(-40.0, 17.5, 300.0));
        assert_eq!(distance_3d(&a, &b), distance_3d(&b, &a));
    }

    #[test]
    fn connects_within_distance_only() {
        let entities = vec![
            entity(EntityKind::Peer, vec3(0.0, 0.0, 0.0)),
            entity(EntityKind::Peer, vec3(100.0, 0.0, 0.0)),
            entity(EntityKind::Peer, vec3(400.0, 0.0, 0.0)),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let mut edges = Vec::new();
        let mut packets = Vec::new();

        evaluate(&entities, &front(3), 250.0, &quiet(), &mut rng, &mut edges, &mut packets);

        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].from, edges[0].to), (0, 1));
        assert!(edges[0].opacity > 0.0);
        assert!((edges[0].opacity - 0.6).abs() < 1e-6);
        assert!(!edges[0].validator);
        assert!(packets.is_empty());
    }

    #[test]
    fn distance_300_is_not_connected() {
        let entities = vec![
            entity(EntityKind::Peer, vec3(0.0, 0.0, 0.0)),
            entity(EntityKind::Peer, vec3(0.0, 0.0, 300.0)),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let mut edges = Vec::new();
        let mut packets = Vec::new();

        evaluate(&entities, &front(2), 250.0, &quiet(), &mut rng, &mut edges, &mut packets);
        assert!(edges.is_empty());
    }

    #[test]
    fn opacity_uses_smaller_scale() {
        assert!((edge_opacity(125.0, 250.0, 1.0, 0.4) - 0.2).abs() < 1e-6);
        assert_eq!(edge_opacity(250.0, 250.0, 1.0, 1.0), 0.0);
        assert!(!Edge {
            from: 0,
            to: 1,
            opacity: 0.04,
            validator: false
        }
        .is_visible());
    }

    #[test]
    fn validator_pairs_are_flagged() {
        let entities = vec![
            entity(EntityKind::Validator, vec3(0.0, 0.0, 0.0)),
            entity(EntityKind::StoragePeer, vec3(10.0, 0.0, 0.0)),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let mut edges = Vec::new();
        let mut packets = Vec::new();

        evaluate(&entities, &front(2), 250.0, &quiet(), &mut rng, &mut edges, &mut packets);
        assert!(edges[0].validator);
    }

    #[test]
    fn certain_spawn_respects_ceiling() {
        let entities = (0..4)
            .map(|index| entity(EntityKind::Peer, vec3(index as f32, 0.0, 0.0)))
            .collect::<Vec<_>>();
        let policy = SpawnPolicy {
            probability: 1.0,
            max_packets: Some(4),
            ..quiet()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut edges = Vec::new();
        let mut packets = Vec::new();

        let outcome = evaluate(
            &entities,
            &front(4),
            250.0,
            &policy,
            &mut rng,
            &mut edges,
            &mut packets,
        );

        assert_eq!(edges.len(), 6);
        assert_eq!(packets.len(), 4);
        assert_eq!(outcome.suppressed_spawns, 2);
        for packet in &packets {
            assert_eq!(packet.progress, 0.0);
            assert!((0.01..=0.03).contains(&packet.speed));
        }
    }

    #[test]
    fn unbounded_policy_spawns_on_every_edge() {
        let entities = (0..5)
            .map(|index| entity(EntityKind::Peer, vec3(0.0, index as f32, 0.0)))
            .collect::<Vec<_>>();
        let policy = SpawnPolicy {
            probability: 1.0,
            ..quiet()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut edges = Vec::new();
        let mut packets = Vec::new();

        evaluate(&entities, &front(5), 250.0, &policy, &mut rng, &mut edges, &mut packets);
        assert_eq!(packets.len(), 10);
    }
}
