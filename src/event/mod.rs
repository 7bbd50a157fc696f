mod events;

pub use events::CanvasEvent;

/// Receives gestures emitted by the canvas.
pub trait EventHandler {
    fn handle_event(&mut self, event: CanvasEvent);
}

/// Delivers a frame's worth of events in the order they were emitted.
pub fn dispatch(events: Vec<CanvasEvent>, handler: &mut dyn EventHandler) {
    for event in events {
        log::debug!("Dispatching canvas event: {}", event.name());
        handler.handle_event(event);
    }
}
