pub mod connections;
pub mod entity;
pub mod field;
pub mod interaction;
pub mod packets;
pub mod projector;

use eframe::egui::Pos2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::warn;

use crate::config::GraphConfig;
use connections::{Edge, SpawnPolicy};
use entity::{Bounds, Entity};
use field::NodeField;
use interaction::InteractionField;
use packets::{Packet, PacketSprite};
use projector::{Camera, Projected, project_all};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub active_entities: usize,
    pub active_edges: usize,
    pub active_packets: usize,
}

/// Per-tick derived data. Rebuilt every tick, kept only to reuse buffers.
#[derive(Debug, Default)]
pub struct TickScratch {
    pub projected: Vec<Projected>,
    pub edges: Vec<Edge>,
    pub sprites: Vec<PacketSprite>,
}

/// Everything the tick mutates, owned by a single controller.
pub struct SimulationState {
    config: GraphConfig,
    bounds: Bounds,
    field: NodeField,
    entities: Vec<Entity>,
    packets: Vec<Packet>,
    interaction: InteractionField,
    rng: StdRng,
    scratch: TickScratch,
    ceiling_reported: bool,
}

impl SimulationState {
    pub fn new(config: GraphConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let interaction = InteractionField::new(config.influence_radius, config.repulsion_strength);
        let bounds = Bounds {
            width: 0.0,
            height: 0.0,
            depth: config.depth,
        };

        Self {
            config,
            bounds,
            field: NodeField::default(),
            entities: Vec::new(),
            packets: Vec::new(),
            interaction,
            rng,
            scratch: TickScratch::default(),
            ceiling_reported: false,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn pointer(&self) -> Pos2 {
        self.interaction.pointer
    }

    pub fn scratch(&self) -> &TickScratch {
        &self.scratch
    }

    pub fn camera(&self) -> Camera {
        Camera::for_bounds(self.bounds, self.config.perspective)
    }

    /// Replaces the whole field for the given area; in-flight packets go
    /// with it since their indices would no longer mean anything.
    pub fn reseed(&mut self, width: f32, height: f32) {
        self.bounds = Bounds {
            width: width.max(0.0),
            height: height.max(0.0),
            depth: self.config.depth,
        };
        self.entities = self.field.seed(self.bounds, &self.config, &mut self.rng);
        self.packets.clear();
        self.scratch.projected.clear();
        self.scratch.edges.clear();
        self.scratch.sprites.clear();
        self.ceiling_reported = false;
    }

    pub fn reset(&mut self) {
        self.reseed(self.bounds.width, self.bounds.height);
    }

    pub fn set_pointer(&mut self, pointer: Pos2) {
        self.interaction.set_pointer(pointer);
    }

    /// Physics, projection, connections, packets. Drawing happens after this
    /// from [`SimulationState::scratch`].
    pub fn tick(&mut self) -> FrameStats {
        let camera = self.camera();

        NodeField::step(&mut self.entities, self.bounds, camera, &self.interaction);

        project_all(
            self.entities.iter().map(|entity| entity.position),
            camera,
            &mut self.scratch.projected,
        );

        let policy = SpawnPolicy {
            probability: self.config.spawn_probability,
            speed_min: self.config.packet_speed_min,
            speed_max: self.config.packet_speed_max,
            max_packets: self.config.max_packets,
        };
        let outcome = connections::evaluate(
            &self.entities,
            &self.scratch.projected,
            self.config.connection_distance,
            &policy,
            &mut self.rng,
            &mut self.scratch.edges,
            &mut self.packets,
        );
        if outcome.suppressed_spawns > 0 && !self.ceiling_reported {
            warn!(
                ceiling = ?self.config.max_packets,
                "packet ceiling reached, suppressing spawns"
            );
            self.ceiling_reported = true;
        }

        packets::step(
            &mut self.packets,
            &self.scratch.projected,
            &mut self.scratch.sprites,
        );

        self.stats()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            active_entities: self.entities.len(),
            active_edges: self.scratch.edges.len(),
            active_packets: self.packets.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn seeded_config() -> GraphConfig {
        GraphConfig {
            seed: Some(42),
            ..GraphConfig::default()
        }
    }

    #[test]
    fn reseed_matches_configured_count() {
        let mut state = SimulationState::new(seeded_config());
        state.reseed(800.0, 600.0);
        assert_eq!(state.entities().len(), 55);

        state.reset();
        assert_eq!(state.entities().len(), 55);
        assert_eq!(state.bounds().width, 800.0);
    }

    #[test]
    fn reset_clears_packets() {
        let mut state = SimulationState::new(GraphConfig {
            spawn_probability: 1.0,
            ..seeded_config()
        });
        state.reseed(200.0, 200.0);
        state.tick();
        assert!(!state.packets().is_empty());

        state.reset();
        assert!(state.packets().is_empty());
        assert_eq!(state.stats().active_packets, 0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = SimulationState::new(seeded_config());
        let mut b = SimulationState::new(seeded_config());
        a.reseed(800.0, 600.0);
        b.reseed(800.0, 600.0);

        for _ in 0..30 {
            assert_eq!(a.tick(), b.tick());
        }
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    fn tick_reports_all_connected_pairs() {
        let mut state = SimulationState::new(GraphConfig {
            connection_distance: 10_000.0,
            spawn_probability: 0.0,
            peer_count: 6,
            validator_count: 2,
            ..seeded_config()
        });
        state.reseed(400.0, 300.0);

        let stats = state.tick();
        assert_eq!(stats.active_entities, 8);
        assert_eq!(stats.active_edges, 28);
        assert_eq!(stats.active_packets, 0);
        assert_eq!(state.scratch().projected.len(), 8);
    }

    #[test]
    fn zero_area_ticks_are_empty() {
        let mut state = SimulationState::new(seeded_config());
        state.reseed(0.0, 0.0);
        assert_eq!(state.tick(), FrameStats::default());
    }

    #[test]
    fn packet_ceiling_holds() {
        let mut state = SimulationState::new(GraphConfig {
            spawn_probability: 1.0,
            packet_speed_min: 0.001,
            packet_speed_max: 0.002,
            max_packets: Some(20),
            ..seeded_config()
        });
        state.reseed(300.0, 300.0);

        for _ in 0..50 {
            assert!(state.tick().active_packets <= 20);
        }
    }

    #[test]
    fn stats_serialize_with_field_names() {
        let stats = FrameStats {
            active_entities: 55,
            active_edges: 12,
            active_packets: 3,
        };
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"active_entities":55,"active_edges":12,"active_packets":3}"#
        );
    }

    #[test]
    fn pointer_starts_off_canvas() {
        let mut state = SimulationState::new(seeded_config());
        assert_eq!(state.pointer(), InteractionField::IDLE_POINTER);
        state.set_pointer(pos2(10.0, 20.0));
        assert_eq!(state.pointer(), pos2(10.0, 20.0));
    }
}
