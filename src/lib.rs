//! Holographic network visualization.
//!
//! A fixed population of peers, validators and storage peers drifts through
//! a bounded 3D volume, is projected onto the screen with a pinhole camera,
//! links up by proximity and passes packets along those links. The host
//! drives it through [`create_graph`] and the returned [`GraphHandle`].

pub mod config;
pub mod graph;
pub mod host;
pub mod render;
pub mod sim;
pub mod viewport;

pub use config::{ConfigError, GraphConfig};
pub use graph::{GraphError, GraphHandle, create_graph};
pub use host::{EventKind, FrameRequest, Host, HostEvent, ListenerId, Viewport};
pub use render::Canvas;
pub use sim::FrameStats;
