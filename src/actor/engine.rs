//! Engine: Entry point that owns the layout actor and its channels.
//!
//! Stage callbacks push [`StageEvent`]s through a cloneable sender; the
//! rendering side pulls [`LayoutUpdate`]s.

use super::messages::{LayoutUpdate, StageEvent};
use super::stage::{LayoutActor, StageState};
use crate::error::LayoutError;
use crate::layout::{GridLayout, TemplateTable, Viewport, MAX_PARTICIPANTS};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::time::Duration;

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Initial container width.
    pub width: f64,
    /// Initial container height.
    pub height: f64,
    /// Gutter between tiles.
    pub padding: f64,
    /// Tiles per page; clamped to what the template table supports.
    pub page_size: usize,
    /// Grid templates.
    pub templates: TemplateTable,
    /// Capacity of the incoming event channel.
    pub event_capacity: usize,
    /// Capacity of the outgoing update channel.
    pub update_capacity: usize,
    /// How long the actor waits for an event before checking for shutdown.
    pub recv_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            padding: 0.0,
            page_size: MAX_PARTICIPANTS,
            templates: TemplateTable::standard(),
            event_capacity: 64,
            update_capacity: 16,
            recv_timeout: Duration::from_millis(50),
        }
    }
}

impl EngineConfig {
    /// Set the initial container size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the tile padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Use a custom template table.
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateTable) -> Self {
        self.templates = templates;
        self
    }
}

/// The stage layout engine.
///
/// Dropping the engine stops the actor thread.
pub struct Engine {
    /// Event sender.
    event_tx: Sender<StageEvent>,
    /// Update receiver.
    update_rx: Receiver<LayoutUpdate>,
    /// Actor handle.
    actor: Option<LayoutActor>,
    /// Latest update seen through this engine.
    latest: Option<LayoutUpdate>,
}

impl Engine {
    /// Create a new engine with default configuration.
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        Self::with_config(EngineConfig::default().with_size(width, height))
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial viewport is invalid.
    pub fn with_config(config: EngineConfig) -> Result<Self, LayoutError> {
        let viewport = Viewport::new(config.width, config.height, config.padding)?;
        let state = StageState::new(GridLayout::new(config.templates), viewport, config.page_size)?;

        // Create channels
        let (event_tx, event_rx) = bounded::<StageEvent>(config.event_capacity);
        let (update_tx, update_rx) = bounded::<LayoutUpdate>(config.update_capacity);

        let actor = LayoutActor::spawn(event_rx, update_tx, state, config.recv_timeout);

        Ok(Self {
            event_tx,
            update_rx,
            actor: Some(actor),
            latest: None,
        })
    }

    /// A sender for stage events, cloneable across callback threads.
    pub fn sender(&self) -> Sender<StageEvent> {
        self.event_tx.clone()
    }

    /// Send a stage event.
    ///
    /// Returns `false` if the actor has stopped.
    pub fn send(&self, event: StageEvent) -> bool {
        self.event_tx.send(event).is_ok()
    }

    /// Get the update receiver for event-driven loops.
    pub const fn update_receiver(&self) -> &Receiver<LayoutUpdate> {
        &self.update_rx
    }

    /// Poll for the next layout update (non-blocking).
    pub fn poll_update(&mut self) -> Option<&LayoutUpdate> {
        let update = self.update_rx.try_recv().ok()?;
        self.latest = Some(update);
        self.latest.as_ref()
    }

    /// Wait for the next layout update (blocking with timeout).
    pub fn wait_update(&mut self, timeout: Duration) -> Option<&LayoutUpdate> {
        let update = self.update_rx.recv_timeout(timeout).ok()?;
        self.latest = Some(update);
        self.latest.as_ref()
    }

    /// Drain pending updates, keeping only the newest.
    pub fn sync(&mut self) -> Option<&LayoutUpdate> {
        while let Ok(update) = self.update_rx.try_recv() {
            self.latest = Some(update);
        }
        self.latest.as_ref()
    }

    /// The most recent update returned by this engine.
    pub const fn latest(&self) -> Option<&LayoutUpdate> {
        self.latest.as_ref()
    }

    /// Notify the engine that the container was resized.
    pub fn handle_resize(&self, width: f64, height: f64) -> bool {
        self.send(StageEvent::Resize { width, height })
    }

    /// Whether the actor thread is still accepting events.
    pub fn is_running(&self) -> bool {
        self.actor.as_ref().is_some_and(LayoutActor::is_running)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        let _ = self.event_tx.try_send(StageEvent::Shutdown);
        // Unblock an actor stuck on a full update channel.
        drop(std::mem::replace(&mut self.update_rx, crossbeam_channel::never()));
        if let Some(actor) = self.actor.take() {
            actor.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::messages::{ConnectionState, ParticipantInfo};
    use crate::layout::Rect;

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[test]
    fn test_engine_initial_update() {
        let mut engine = Engine::new(640.0, 360.0).unwrap();
        let update = engine.wait_update(TIMEOUT).unwrap();
        assert_eq!(update.tiles.len(), 1);
        assert_eq!(update.tiles[0].rect, Rect::from_size(640.0, 360.0));
    }

    #[test]
    fn test_engine_rejects_bad_viewport() {
        assert!(matches!(
            Engine::new(-1.0, 100.0),
            Err(LayoutError::InvalidInput { field: "width", .. })
        ));
    }

    #[test]
    fn test_engine_session() {
        let config = EngineConfig::default().with_size(400.0, 800.0).with_padding(4.0);
        let mut engine = Engine::with_config(config).unwrap();
        engine.wait_update(TIMEOUT).unwrap();

        let sender = engine.sender();
        std::thread::spawn(move || {
            sender.send(StageEvent::ConnectionChanged { state: ConnectionState::Connected, error: None }).unwrap();
            sender.send(StageEvent::ParticipantJoined(ParticipantInfo::local("me"))).unwrap();
            sender.send(StageEvent::ParticipantJoined(ParticipantInfo::remote("a"))).unwrap();
        })
        .join()
        .unwrap();

        let mut last = None;
        for _ in 0..3 {
            last = engine.wait_update(TIMEOUT).cloned();
        }
        let update = last.unwrap();
        assert_eq!(update.connection, ConnectionState::Connected);
        assert_eq!(update.tiles.len(), 2);
        assert_eq!(update.tiles[0].participant_id.as_deref(), Some("me"));
        // Portrait: two stacked full-width tiles.
        assert_eq!(update.tiles[1].rect, Rect::new(2.0, 402.0, 396.0, 396.0));
        assert_eq!(engine.latest().map(|u| u.tiles.len()), Some(2));
    }

    #[test]
    fn test_engine_resize() {
        let mut engine = Engine::new(100.0, 100.0).unwrap();
        engine.wait_update(TIMEOUT).unwrap();
        assert!(engine.handle_resize(300.0, 150.0));
        let update = engine.wait_update(TIMEOUT).unwrap();
        assert_eq!(update.tiles[0].rect, Rect::from_size(300.0, 150.0));
    }

    #[test]
    fn test_engine_sync_keeps_newest() {
        let mut engine = Engine::new(400.0, 800.0).unwrap();
        for id in ["a", "b", "c", "d", "e"] {
            assert!(engine.send(StageEvent::ParticipantJoined(ParticipantInfo::remote(id))));
        }

        // Initial snapshot plus one update per join.
        for _ in 0..100 {
            if engine.update_receiver().len() == 6 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(engine.update_receiver().len(), 6);

        let update = engine.sync().unwrap();
        assert_eq!(update.tiles.len(), 6);
        assert_eq!(update.tiles[5].participant_id.as_deref(), Some("e"));
        assert!(engine.update_receiver().is_empty());
        assert!(engine.poll_update().is_none());
        assert_eq!(engine.latest().map(|u| u.tiles.len()), Some(6));

        assert!(engine.handle_resize(800.0, 400.0));
        for _ in 0..100 {
            if !engine.update_receiver().is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let update = engine.poll_update().unwrap();
        assert_eq!(update.tiles.len(), 6);
        assert!(update.tiles.iter().all(|t| t.rect.bottom() <= 400.0 + 1e-9));
    }

    #[test]
    fn test_engine_stops_on_shutdown_event() {
        let engine = Engine::new(100.0, 100.0).unwrap();
        assert!(engine.is_running());
        assert!(engine.send(StageEvent::Shutdown));
        for _ in 0..100 {
            if !engine.is_running() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!engine.is_running());
    }
}
