use eframe::egui::Pos2;

use super::projector::Projected;

/// A token riding the edge between two entity indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Packet {
    pub from: usize,
    pub to: usize,
    pub progress: f32,
    pub speed: f32,
}

impl Packet {
    pub fn new(from: usize, to: usize, speed: f32) -> Self {
        Self {
            from,
            to,
            progress: 0.0,
            speed,
        }
    }
}

/// Where a surviving packet is drawn this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacketSprite {
    pub screen: Pos2,
    pub scale: f32,
}

/// Advances every packet, drops finished ones and those whose endpoints no
/// longer exist, and interpolates the survivors between the endpoints'
/// current projections.
pub fn step(packets: &mut Vec<Packet>, projected: &[Projected], sprites: &mut Vec<PacketSprite>) {
    sprites.clear();
    packets.retain_mut(|packet| {
        packet.progress += packet.speed;
        if packet.progress >= 1.0 {
            return false;
        }

        let (Some(start), Some(end)) = (projected.get(packet.from), projected.get(packet.to)) else {
            return false;
        };

        let t = packet.progress;
        sprites.push(PacketSprite {
            screen: start.screen + (end.screen - start.screen) * t,
            scale: start.scale + (end.scale - start.scale) * t,
        });
        true
    });
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn endpoints() -> Vec<Projected> {
        vec![
            Projected {
                screen: pos2(0.0, 0.0),
                scale: 1.0,
            },
            Projected {
                screen: pos2(100.0, 50.0),
                scale: 0.5,
            },
        ]
    }

    #[test]
    fn packet_lives_for_fifty_ticks_at_two_percent() {
        let projected = endpoints();
        let mut packets = vec![Packet::new(0, 1, 0.02)];
        let mut sprites = Vec::new();

        let mut last = 0.0;
        for tick in 1..=49 {
            step(&mut packets, &projected, &mut sprites);
            assert_eq!(packets.len(), 1, "dropped early on tick {tick}");
            assert!(packets[0].progress > last);
            last = packets[0].progress;
        }

        step(&mut packets, &projected, &mut sprites);
        if let Some(packet) = packets.first() {
            assert!((packet.progress - 1.0).abs() < 1e-4);
        }

        step(&mut packets, &projected, &mut sprites);
        assert!(packets.is_empty());
        assert!(sprites.is_empty());
    }

    #[test]
    fn sprite_rides_current_endpoints() {
        let mut projected = endpoints();
        let mut packets = vec![Packet::new(0, 1, 0.25)];
        let mut sprites = Vec::new();

        step(&mut packets, &projected, &mut sprites);
        assert_eq!(sprites[0].screen, pos2(25.0, 12.5));
        assert!((sprites[0].scale - 0.875).abs() < 1e-6);

        projected[1].screen = pos2(200.0, 0.0);
        step(&mut packets, &projected, &mut sprites);
        assert_eq!(sprites[0].screen, pos2(100.0, 0.0));
    }

    #[test]
    fn stale_indices_are_dropped() {
        let projected = endpoints();
        let mut packets = vec![Packet::new(0, 7, 0.01), Packet::new(1, 0, 0.01)];
        let mut sprites = Vec::new();

        step(&mut packets, &projected, &mut sprites);
        assert_eq!(packets, vec![Packet {
            from: 1,
            to: 0,
            progress: 0.01,
            speed: 0.01
        }]);
        assert_eq!(sprites.len(), 1);
    }

    #[test]
    fn empty_input_is_fine() {
        let mut packets = Vec::new();
        let mut sprites = vec![PacketSprite {
            screen: pos2(1.0, 1.0),
            scale: 1.0,
        }];
        step(&mut packets, &[], &mut sprites);
        assert!(packets.is_empty());
        assert!(sprites.is_empty());
    }
}
