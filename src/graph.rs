use std::sync::mpsc::{self, Receiver, Sender};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::{ConfigError, GraphConfig};
use crate::host::{FrameRequest, Host, HostEvent};
use crate::render::{Canvas, Renderer};
use crate::sim::{FrameStats, SimulationState};
use crate::viewport::ViewportController;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("no drawing surface is available")]
    SurfaceUnavailable,
    #[error("invalid graph config: {0}")]
    Config(#[from] ConfigError),
}

/// Attaches a new graph to `host`, seeds it and schedules the first frame.
pub fn create_graph(host: &mut dyn Host, config: GraphConfig) -> Result<GraphHandle, GraphError> {
    config.validate()?;
    if !host.has_surface() {
        error!("holographic graph disabled: no drawing surface");
        return Err(GraphError::SurfaceUnavailable);
    }

    let viewport = ViewportController::attach(host);
    let mut state = SimulationState::new(config);
    let size = viewport.viewport().size;
    state.reseed(size.x, size.y);
    let pending = Some(host.request_frame());

    info!(
        entities = state.entities().len(),
        width = size.x,
        height = size.y,
        "holographic graph started"
    );

    Ok(GraphHandle {
        state,
        viewport,
        renderer: Renderer::default(),
        pending,
        running: true,
        stats: FrameStats::default(),
        subscribers: Vec::new(),
    })
}

/// The host-facing side of one running graph: input, frame loop, reset and
/// teardown.
pub struct GraphHandle {
    state: SimulationState,
    viewport: ViewportController,
    renderer: Renderer,
    pending: Option<FrameRequest>,
    running: bool,
    stats: FrameStats,
    subscribers: Vec<Sender<FrameStats>>,
}

impl GraphHandle {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Receives the stats of every subsequent frame.
    pub fn subscribe_stats(&mut self) -> Receiver<FrameStats> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn handle_event(&mut self, event: HostEvent) {
        if !self.running || !self.viewport.is_attached() {
            return;
        }

        match event {
            HostEvent::PointerMoved(pointer) => self.state.set_pointer(pointer),
            HostEvent::Resized(viewport) => {
                let viewport = self.viewport.resize(viewport);
                self.state.reseed(viewport.size.x, viewport.size.y);
            }
        }
    }

    /// One simulation tick plus a full repaint, then the next frame is
    /// requested. Stale or post-dispose requests are ignored.
    pub fn frame(&mut self, host: &mut dyn Host, canvas: &mut dyn Canvas, request: FrameRequest) {
        if !self.running || self.pending != Some(request) {
            debug!(?request, "ignoring stale frame request");
            return;
        }
        self.pending = None;

        self.state.tick();
        self.stats = self.renderer.draw(
            canvas,
            self.state.entities(),
            self.state.scratch(),
            self.state.packets().len(),
        );
        self.publish();

        self.pending = Some(host.request_frame());
    }

    fn publish(&mut self) {
        let stats = self.stats;
        self.subscribers.retain(|tx| tx.send(stats).is_ok());
    }

    /// Replaces entities and packets; the loop keeps running.
    pub fn reset(&mut self) {
        if !self.running {
            return;
        }
        self.state.reset();
        self.stats = self.state.stats();
        info!(entities = self.stats.active_entities, "holographic graph reset");
    }

    pub fn dispose(&mut self, host: &mut dyn Host) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(request) = self.pending.take() {
            host.cancel_frame(request);
        }
        self.viewport.dispose(host);
        self.subscribers.clear();
        info!(
            stats = %serde_json::to_string(&self.stats).unwrap_or_default(),
            "holographic graph disposed"
        );
    }
}
