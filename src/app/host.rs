use std::collections::HashMap;

use eframe::egui::{Context, Pos2, Rect, Vec2};

use holo_graph::{EventKind, FrameRequest, Host, HostEvent, ListenerId, Viewport};

/// Bridges egui's immediate-mode frame to the graph's listener and frame
/// scheduling model. Resize and pointer events are only produced while a
/// listener of that kind is registered.
pub(in crate::app) struct EguiHost {
    ctx: Context,
    surface: bool,
    viewport: Viewport,
    listeners: HashMap<ListenerId, EventKind>,
    next_id: u64,
    pending_frame: Option<FrameRequest>,
    last_pointer: Option<Pos2>,
}

impl EguiHost {
    pub(in crate::app) fn new(ctx: Context, surface: bool) -> Self {
        let pixels_per_point = ctx.pixels_per_point();
        Self {
            ctx,
            surface,
            viewport: Viewport::new(Vec2::ZERO, pixels_per_point),
            listeners: HashMap::new(),
            next_id: 0,
            pending_frame: None,
            last_pointer: None,
        }
    }

    fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|&registered| registered == kind)
    }

    /// Measures the container for this egui frame and returns the input
    /// events the graph should see, in arrival order.
    pub(in crate::app) fn poll_events(&mut self, rect: Rect) -> Vec<HostEvent> {
        let mut events = Vec::new();

        let viewport = Viewport::new(rect.size(), self.ctx.pixels_per_point());
        if viewport != self.viewport {
            self.viewport = viewport;
            if self.is_listening(EventKind::Resize) {
                events.push(HostEvent::Resized(viewport));
            }
        }

        let hover = self.ctx.input(|input| input.pointer.hover_pos());
        if let Some(pointer) = hover.filter(|pointer| rect.contains(*pointer)) {
            let local = (pointer - rect.min).to_pos2();
            if self.last_pointer != Some(local) {
                self.last_pointer = Some(local);
                if self.is_listening(EventKind::PointerMove) {
                    events.push(HostEvent::PointerMoved(local));
                }
            }
        }

        events
    }

    pub(in crate::app) fn take_due_frame(&mut self) -> Option<FrameRequest> {
        self.pending_frame.take()
    }
}

impl Host for EguiHost {
    fn has_surface(&self) -> bool {
        self.surface
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending_frame = Some(request);
        self.ctx.request_repaint();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending_frame == Some(request) {
            self.pending_frame = None;
        }
    }
}
