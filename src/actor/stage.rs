//! Layout Actor: Dedicated thread that keeps the roster and grid in sync.
//!
//! This actor owns the [`Roster`] and [`StageLayout`]. It receives stage
//! events, applies them, recomputes the grid when needed and publishes a
//! full [`LayoutUpdate`] snapshot for the rendering layer.

use super::messages::{ConnectionState, LayoutUpdate, StageEvent, Tile};
use crate::error::LayoutError;
use crate::layout::{GridLayout, StageLayout, Viewport};
use crate::roster::{Roster, RosterChange};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Result of applying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Applied {
    /// State changed; publish an update.
    Changed(Option<RosterChange>),
    /// Nothing visible changed.
    Unchanged,
    /// Stop the actor.
    Shutdown,
}

/// Internal actor state.
pub(crate) struct StageState {
    roster: Roster,
    layout: StageLayout,
    connection: ConnectionState,
    page: usize,
    page_size: usize,
}

impl StageState {
    /// Create state for an empty stage.
    pub(crate) fn new(grid: GridLayout, viewport: Viewport, page_size: usize) -> Result<Self, LayoutError> {
        let mut state = Self {
            roster: Roster::new(),
            layout: StageLayout::new(grid, viewport)?,
            connection: ConnectionState::Disconnected,
            page: 0,
            page_size,
        };
        state.relayout()?;
        Ok(state)
    }

    pub(crate) const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Apply one event.
    pub(crate) fn apply(&mut self, event: StageEvent) -> Applied {
        let change = match event {
            StageEvent::ParticipantJoined(info) => Ok(Some(self.roster.join(&info.participant_id, info.is_local))),
            StageEvent::ParticipantLeft(info) => self.roster.leave(&info.participant_id, info.is_local).map(Some),
            StageEvent::PublishStateChanged { participant, state } => self
                .roster
                .set_publish_state(&participant.participant_id, state)
                .map(Some),
            StageEvent::SubscribeStateChanged { participant, state } => self
                .roster
                .set_subscribe_state(&participant.participant_id, state)
                .map(Some),
            StageEvent::StreamsAdded { participant, streams } => {
                self.roster
                    .add_streams(&participant.participant_id, participant.is_local, &streams)
            }
            StageEvent::StreamsRemoved { participant, urns } => {
                self.roster
                    .remove_streams(&participant.participant_id, participant.is_local, &urns)
            }
            StageEvent::StreamsMuted { participant, muted } => {
                self.roster
                    .streams_muted(&participant.participant_id, participant.is_local, &muted)
            }
            StageEvent::ConnectionChanged { state, error } => {
                if let Some(error) = error {
                    tracing::warn!(state = %state, %error, "stage connection error");
                }
                if state == self.connection {
                    return Applied::Unchanged;
                }
                tracing::info!(from = %self.connection, to = %state, "stage connection changed");
                self.connection = state;
                return Applied::Changed(None);
            }
            StageEvent::Resize { width, height } => {
                return match self.layout.resize(width, height) {
                    Ok(()) => Applied::Changed(None),
                    Err(e) => {
                        tracing::warn!(width, height, error = %e, "ignoring resize");
                        Applied::Unchanged
                    }
                };
            }
            StageEvent::ShowPage(page) => {
                if page >= self.page_count() || page == self.page {
                    return Applied::Unchanged;
                }
                self.page = page;
                return self.relayout_after(None);
            }
            StageEvent::Shutdown => return Applied::Shutdown,
        };

        match change {
            Ok(Some(change)) => self.relayout_after(Some(change)),
            Ok(None) => Applied::Unchanged,
            Err(e) => {
                tracing::warn!(error = %e, "skipping stage event");
                Applied::Unchanged
            }
        }
    }

    fn relayout_after(&mut self, change: Option<RosterChange>) -> Applied {
        match self.relayout() {
            Ok(()) => Applied::Changed(change),
            Err(e) => {
                tracing::warn!(error = %e, "layout recompute failed");
                Applied::Unchanged
            }
        }
    }

    fn page_count(&self) -> usize {
        self.roster.page_count(self.page_size, self.layout.capacity())
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        self.page = self.page.min(self.page_count().saturating_sub(1));
        let visible = self.roster.page(self.page, self.page_size, self.layout.capacity());
        self.layout.set_participant_count(visible.len())
    }

    /// Build a snapshot of the current state.
    pub(crate) fn snapshot(&self, change: Option<RosterChange>) -> LayoutUpdate {
        let visible = self.roster.page(self.page, self.page_size, self.layout.capacity());
        let tiles = self
            .layout
            .regions()
            .iter()
            .zip(visible)
            .filter_map(|(region, roster_index)| {
                let participant = self.roster.get(roster_index)?;
                Some(Tile {
                    id: region.id,
                    roster_index,
                    participant_id: participant.participant_id.clone(),
                    is_local: participant.is_local,
                    active_media: participant.active_media(),
                    rect: region.rect,
                })
            })
            .collect();

        LayoutUpdate {
            generation: self.layout.generation(),
            change,
            connection: self.connection,
            page: self.page,
            page_count: self.page_count(),
            tiles,
        }
    }
}

/// Layout actor handle.
pub(crate) struct LayoutActor {
    /// Handle to the layout thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl LayoutActor {
    /// Spawn the layout actor thread.
    ///
    /// # Arguments
    ///
    /// * `events` - Channel to receive stage events from.
    /// * `updates` - Channel to publish layout snapshots to.
    /// * `state` - Initial stage state.
    /// * `recv_timeout` - How long to wait for events before checking shutdown.
    pub(crate) fn spawn(
        events: Receiver<StageEvent>,
        updates: Sender<LayoutUpdate>,
        state: StageState,
        recv_timeout: Duration,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("stagegrid-layout".to_string())
            .spawn(move || {
                tracing::info!("layout actor started");
                Self::run_loop(&events, &updates, &shutdown_clone, state, recv_timeout);
                tracing::info!("layout actor stopped");
            })
            .expect("Failed to spawn layout thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the layout thread to shutdown.
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check whether the layout thread is still alive.
    pub(crate) fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the layout thread to finish.
    pub(crate) fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main event loop.
    fn run_loop(
        events: &Receiver<StageEvent>,
        updates: &Sender<LayoutUpdate>,
        shutdown: &Arc<AtomicBool>,
        mut state: StageState,
        recv_timeout: Duration,
    ) {
        // Publish the initial grid so the local preview has a tile immediately.
        if updates.send(state.snapshot(None)).is_err() {
            return;
        }

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let event = match events.recv_timeout(recv_timeout) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };

            match state.apply(event) {
                Applied::Changed(change) => {
                    let update = state.snapshot(change);
                    tracing::debug!(
                        generation = update.generation,
                        tiles = update.tiles.len(),
                        participants = state.roster().len(),
                        "publishing layout update"
                    );
                    if updates.send(update).is_err() {
                        // Receiver dropped, exit
                        break;
                    }
                }
                Applied::Unchanged => {}
                Applied::Shutdown => break,
            }
        }
    }
}

impl Drop for LayoutActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::messages::ParticipantInfo;
    use crate::layout::{Rect, TemplateTable, TileId};
    use crate::roster::{ChangeKind, MediaKind, MediaKinds, PublishState, StreamInfo};
    use crossbeam_channel::bounded;

    fn state(width: f64, height: f64, page_size: usize) -> StageState {
        StageState::new(GridLayout::default(), Viewport::new(width, height, 0.0).unwrap(), page_size).unwrap()
    }

    #[test]
    fn test_initial_snapshot_has_local_tile() {
        let state = state(400.0, 400.0, 12);
        let update = state.snapshot(None);
        assert_eq!(update.tiles.len(), 1);
        assert!(update.tiles[0].is_local);
        assert_eq!(update.tiles[0].rect, Rect::from_size(400.0, 400.0));
        assert_eq!(update.connection, ConnectionState::Disconnected);
        assert_eq!(update.page_count, 1);
    }

    #[test]
    fn test_join_relayouts() {
        let mut state = state(400.0, 400.0, 12);
        let applied = state.apply(StageEvent::ParticipantJoined(ParticipantInfo::remote("a")));
        let Applied::Changed(Some(change)) = applied else {
            panic!("expected a roster change, got {applied:?}");
        };
        assert_eq!(change.kind, ChangeKind::Joined);
        assert_eq!(change.index, 1);

        let update = state.snapshot(Some(change));
        assert_eq!(update.tiles.len(), 2);
        assert_eq!(update.tiles[1].participant_id.as_deref(), Some("a"));
        assert_eq!(update.tiles[1].rect, Rect::new(200.0, 0.0, 200.0, 400.0));
    }

    #[test]
    fn test_unknown_participant_is_skipped() {
        let mut state = state(400.0, 400.0, 12);
        let applied = state.apply(StageEvent::PublishStateChanged {
            participant: ParticipantInfo::remote("ghost"),
            state: PublishState::Published,
        });
        assert_eq!(applied, Applied::Unchanged);
        assert_eq!(state.roster().len(), 1);
    }

    #[test]
    fn test_streams_show_in_tiles() {
        let mut state = state(400.0, 400.0, 12);
        state.apply(StageEvent::ParticipantJoined(ParticipantInfo::remote("a")));
        state.apply(StageEvent::StreamsAdded {
            participant: ParticipantInfo::remote("a"),
            streams: vec![StreamInfo::new("urn:cam", MediaKind::Video)],
        });
        let update = state.snapshot(None);
        assert_eq!(update.tiles[1].active_media, MediaKinds::VIDEO);

        // Local stream events are ignored.
        let applied = state.apply(StageEvent::StreamsAdded {
            participant: ParticipantInfo::local("me"),
            streams: vec![StreamInfo::new("urn:cam", MediaKind::Video)],
        });
        assert_eq!(applied, Applied::Unchanged);
    }

    #[test]
    fn test_connection_and_resize() {
        let mut state = state(400.0, 400.0, 12);
        let connected = StageEvent::ConnectionChanged { state: ConnectionState::Connected, error: None };
        assert_eq!(state.apply(connected.clone()), Applied::Changed(None));
        assert_eq!(state.apply(connected), Applied::Unchanged);

        assert_eq!(state.apply(StageEvent::Resize { width: 200.0, height: 100.0 }), Applied::Changed(None));
        assert_eq!(state.snapshot(None).tiles[0].rect, Rect::from_size(200.0, 100.0));

        assert_eq!(state.apply(StageEvent::Resize { width: -1.0, height: 100.0 }), Applied::Unchanged);
    }

    #[test]
    fn test_paging_beyond_grid_capacity() {
        let mut state = state(1280.0, 720.0, 12);
        for i in 0..13 {
            state.apply(StageEvent::ParticipantJoined(ParticipantInfo::remote(format!("p{i}"))));
        }
        let update = state.snapshot(None);
        assert_eq!(update.page_count, 2);
        assert_eq!(update.tiles.len(), 12);

        assert_eq!(state.apply(StageEvent::ShowPage(1)), Applied::Changed(None));
        let update = state.snapshot(None);
        assert_eq!(update.page, 1);
        assert_eq!(update.tiles.len(), 2);
        assert_eq!(update.tiles[0].roster_index, 12);
        assert_eq!(update.tiles[0].id, TileId(0));

        // Leaving shrinks the roster back to one page.
        state.apply(StageEvent::ParticipantLeft(ParticipantInfo::remote("p12")));
        state.apply(StageEvent::ParticipantLeft(ParticipantInfo::remote("p11")));
        let update = state.snapshot(None);
        assert_eq!(update.page, 0);
        assert_eq!(update.page_count, 1);
        assert_eq!(update.tiles.len(), 12);

        assert_eq!(state.apply(StageEvent::ShowPage(5)), Applied::Unchanged);
    }

    #[test]
    fn test_custom_templates_cap_pages() {
        let grid = GridLayout::new(TemplateTable::custom(vec![vec![1], vec![2]]).unwrap());
        let mut state = StageState::new(grid, Viewport::new(100.0, 100.0, 0.0).unwrap(), 12).unwrap();
        state.apply(StageEvent::ParticipantJoined(ParticipantInfo::remote("a")));
        state.apply(StageEvent::ParticipantJoined(ParticipantInfo::remote("b")));
        let update = state.snapshot(None);
        assert_eq!(update.page_count, 2);
        assert_eq!(update.tiles.len(), 2);
    }

    #[test]
    fn test_actor_thread() {
        let (event_tx, event_rx) = bounded(8);
        let (update_tx, update_rx) = bounded(8);
        let actor = LayoutActor::spawn(event_rx, update_tx, state(400.0, 400.0, 12), Duration::from_millis(5));

        let initial = update_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(initial.tiles.len(), 1);

        event_tx
            .send(StageEvent::ParticipantJoined(ParticipantInfo::remote("a")))
            .unwrap();
        let update = update_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(update.tiles.len(), 2);
        assert_eq!(update.change.map(|c| c.kind), Some(ChangeKind::Joined));

        event_tx.send(StageEvent::Shutdown).unwrap();
        actor.join();
    }
}
