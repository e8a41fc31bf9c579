use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub peer_count: usize,
    pub validator_count: usize,
    /// 3D distance under which two entities are connected.
    pub connection_distance: f32,
    /// Extent of the z axis; entities live in `[0, depth]`.
    pub depth: f32,
    pub perspective: f32,
    /// Screen-space radius around the pointer that repels entities.
    pub influence_radius: f32,
    pub repulsion_strength: f32,
    /// Share of the peer pool that becomes storage peers.
    pub storage_fraction: f32,
    /// Per connected pair, per tick.
    pub spawn_probability: f32,
    pub packet_speed_min: f32,
    pub packet_speed_max: f32,
    /// `None` keeps spawning without a ceiling.
    pub max_packets: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            peer_count: 50,
            validator_count: 5,
            connection_distance: 250.0,
            depth: 800.0,
            perspective: 800.0,
            influence_radius: 250.0,
            repulsion_strength: 0.1,
            storage_fraction: 0.2,
            spawn_probability: 0.0005,
            packet_speed_min: 0.01,
            packet_speed_max: 0.03,
            max_packets: Some(512),
            seed: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("connection distance must be positive, got {0}")]
    ConnectionDistance(f32),
    #[error("depth must be finite and non-negative, got {0}")]
    Depth(f32),
    #[error("perspective must be positive, got {0}")]
    Perspective(f32),
    #[error("influence radius must be positive, got {0}")]
    InfluenceRadius(f32),
    #[error("{name} must lie in [0, 1], got {value}")]
    Probability { name: &'static str, value: f32 },
    #[error("packet speed range {min}..{max} must be positive and ordered")]
    PacketSpeed { min: f32, max: f32 },
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn unit_interval(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.connection_distance) {
            return Err(ConfigError::ConnectionDistance(self.connection_distance));
        }
        if !self.depth.is_finite() || self.depth < 0.0 {
            return Err(ConfigError::Depth(self.depth));
        }
        if !positive(self.perspective) {
            return Err(ConfigError::Perspective(self.perspective));
        }
        if !positive(self.influence_radius) {
            return Err(ConfigError::InfluenceRadius(self.influence_radius));
        }
        if !unit_interval(self.storage_fraction) {
            return Err(ConfigError::Probability {
                name: "storage fraction",
                value: self.storage_fraction,
            });
        }
        if !unit_interval(self.spawn_probability) {
            return Err(ConfigError::Probability {
                name: "spawn probability",
                value: self.spawn_probability,
            });
        }
        if !positive(self.packet_speed_min)
            || !self.packet_speed_max.is_finite()
            || self.packet_speed_max < self.packet_speed_min
        {
            return Err(ConfigError::PacketSpeed {
                min: self.packet_speed_min,
                max: self.packet_speed_max,
            });
        }

        Ok(())
    }

    pub fn entity_count(&self) -> usize {
        self.peer_count + self.validator_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GraphConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.entity_count(), 55);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GraphConfig =
            serde_json::from_str(r#"{ "peer_count": 12, "max_packets": null }"#).unwrap();
        assert_eq!(config.peer_count, 12);
        assert_eq!(config.validator_count, 5);
        assert_eq!(config.max_packets, None);
        assert_eq!(config.connection_distance, 250.0);
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let config = GraphConfig {
            packet_speed_min: 0.05,
            packet_speed_max: 0.01,
            ..GraphConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PacketSpeed { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let config = GraphConfig {
            spawn_probability: 1.5,
            ..GraphConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability { name: "spawn probability", .. })
        ));
    }

    #[test]
    fn zero_depth_is_allowed() {
        let config = GraphConfig {
            depth: 0.0,
            ..GraphConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
