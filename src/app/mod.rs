use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use eframe::egui::Context;
use tracing::warn;

use holo_graph::{FrameStats, GraphConfig, GraphHandle};

mod canvas;
mod host;
mod ui;

use host::EguiHost;

pub struct HolographicApp {
    model: ViewModel,
}

enum GraphSlot {
    /// Created on the first frame, once the container has a size.
    Pending,
    Running {
        graph: GraphHandle,
        stats_rx: Receiver<FrameStats>,
    },
    Unavailable(String),
}

struct ViewModel {
    host: EguiHost,
    slot: GraphSlot,
    config: GraphConfig,
    draft: GraphConfig,
    stats: FrameStats,
    show_controls: bool,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl HolographicApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: GraphConfig) -> Self {
        let surface = cc.gl.is_some();
        if !surface {
            warn!("no glow context available, the graph will stay idle");
        }

        Self {
            model: ViewModel::new(EguiHost::new(cc.egui_ctx.clone(), surface), config),
        }
    }
}

impl eframe::App for HolographicApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}

impl Drop for ViewModel {
    fn drop(&mut self) {
        if let GraphSlot::Running { graph, .. } = &mut self.slot {
            graph.dispose(&mut self.host);
        }
    }
}
