//! Message types for actor communication.
//!
//! [`StageEvent`]s flow into the layout actor from whatever drives the
//! stage (an SDK callback shim, a test, a replay). [`LayoutUpdate`]s flow
//! out to the rendering layer.

use crate::layout::{Rect, TileId};
use crate::roster::{MediaKinds, PublishState, RosterChange, StreamInfo, SubscribeState};

/// Connection state of the local user to the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// Not connected.
    #[default]
    Disconnected,
    /// Join in progress.
    Connecting,
    /// Joined.
    Connected,
}

impl ConnectionState {
    /// Human-readable label for status displays.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
        }
    }

    /// Whether a join is in progress or complete.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Disconnected)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of the participant an event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantInfo {
    /// Server-assigned ID.
    pub participant_id: String,
    /// Whether this is the local user.
    pub is_local: bool,
}

impl ParticipantInfo {
    /// The local user.
    pub fn local(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            is_local: true,
        }
    }

    /// A remote participant.
    pub fn remote(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            is_local: false,
        }
    }
}

/// Events sent to the layout actor.
#[derive(Debug, Clone)]
pub enum StageEvent {
    /// Someone joined.
    ParticipantJoined(ParticipantInfo),

    /// Someone left.
    ParticipantLeft(ParticipantInfo),

    /// Publish state changed.
    PublishStateChanged {
        /// Who.
        participant: ParticipantInfo,
        /// New state.
        state: PublishState,
    },

    /// Subscribe state changed.
    SubscribeStateChanged {
        /// Who.
        participant: ParticipantInfo,
        /// New state.
        state: SubscribeState,
    },

    /// Streams were attached.
    StreamsAdded {
        /// Who.
        participant: ParticipantInfo,
        /// The new streams.
        streams: Vec<StreamInfo>,
    },

    /// Streams were detached.
    StreamsRemoved {
        /// Who.
        participant: ParticipantInfo,
        /// Device URNs of the removed streams.
        urns: Vec<String>,
    },

    /// Streams were muted or unmuted.
    StreamsMuted {
        /// Who.
        participant: ParticipantInfo,
        /// `(urn, muted)` pairs.
        muted: Vec<(String, bool)>,
    },

    /// Connection state changed.
    ConnectionChanged {
        /// New state.
        state: ConnectionState,
        /// Error reported alongside the change, if any.
        error: Option<String>,
    },

    /// The rendering container was resized.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },

    /// Show a different page of the roster.
    ShowPage(usize),

    /// Stop the actor.
    Shutdown,
}

/// One tile in a [`LayoutUpdate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Grid slot.
    pub id: TileId,
    /// Index of the participant in the roster.
    pub roster_index: usize,
    /// Participant ID, if known.
    pub participant_id: Option<String>,
    /// Whether this is the local user.
    pub is_local: bool,
    /// Media kinds with an unmuted stream.
    pub active_media: MediaKinds,
    /// Where to draw it.
    pub rect: Rect,
}

/// Snapshot sent to the rendering layer after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutUpdate {
    /// Layout recompute count.
    pub generation: u64,
    /// The roster change that triggered this update, if any.
    pub change: Option<RosterChange>,
    /// Current connection state.
    pub connection: ConnectionState,
    /// Current page.
    pub page: usize,
    /// Total pages.
    pub page_count: usize,
    /// Tiles for the current page, in grid order.
    pub tiles: Vec<Tile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_labels() {
        assert_eq!(ConnectionState::Disconnected.label(), "Disconnected");
        assert_eq!(ConnectionState::Connecting.to_string(), "Connecting");
        assert_eq!(ConnectionState::Connected.label(), "Connected");
        assert!(!ConnectionState::Disconnected.is_active());
        assert!(ConnectionState::Connecting.is_active());
    }
}
