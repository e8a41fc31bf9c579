use tracing::debug;

use crate::host::{EventKind, Host, ListenerId, Viewport};

/// Tracks the container size and owns the resize / pointer listeners.
#[derive(Debug)]
pub struct ViewportController {
    viewport: Viewport,
    listeners: Option<[ListenerId; 2]>,
}

impl ViewportController {
    /// Registers exactly one resize and one pointer listener.
    pub fn attach(host: &mut dyn Host) -> Self {
        let viewport = host.viewport();
        let listeners = [
            host.add_listener(EventKind::Resize),
            host.add_listener(EventKind::PointerMove),
        ];
        debug!(?viewport, backing = ?viewport.backing_size(), "viewport attached");

        Self {
            viewport,
            listeners: Some(listeners),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_attached(&self) -> bool {
        self.listeners.is_some()
    }

    /// Records the new size. The caller re-seeds the field from it.
    pub fn resize(&mut self, viewport: Viewport) -> Viewport {
        debug!(
            width = viewport.size.x,
            height = viewport.size.y,
            backing = ?viewport.backing_size(),
            "viewport resized"
        );
        self.viewport = viewport;
        viewport
    }

    /// Removes both listeners; later calls do nothing.
    pub fn dispose(&mut self, host: &mut dyn Host) {
        let Some(listeners) = self.listeners.take() else {
            return;
        };
        for id in listeners {
            host.remove_listener(id);
        }
    }
}
