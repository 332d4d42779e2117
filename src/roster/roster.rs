//! Roster: Ordered participant list with the local user pinned first.
//!
//! Every mutation reports a [`RosterChange`] naming the affected index so a
//! rendering layer can insert, refresh or delete exactly one tile.

use super::participant::{Participant, PublishState, StreamInfo, SubscribeState};
use crate::error::RosterError;
use std::ops::Range;

/// How a roster entry changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A new entry was inserted.
    Joined,
    /// An existing entry was modified in place.
    Updated,
    /// An entry was removed.
    Left,
}

/// A single roster change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RosterChange {
    /// Index of the entry (for `Left`, its index before removal).
    pub index: usize,
    /// What happened.
    pub kind: ChangeKind,
}

impl RosterChange {
    const fn joined(index: usize) -> Self {
        Self { index, kind: ChangeKind::Joined }
    }

    const fn updated(index: usize) -> Self {
        Self { index, kind: ChangeKind::Updated }
    }

    const fn left(index: usize) -> Self {
        Self { index, kind: ChangeKind::Left }
    }
}

/// Ordered participants of a stage.
///
/// Index 0 is always the local user, whether or not they have joined, so
/// the self-preview keeps its tile across joins and leaves.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Create a roster holding only the local user.
    pub fn new() -> Self {
        Self {
            participants: vec![Participant::local()],
        }
    }

    /// Number of participants, local user included.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always `false`: the local user is never removed.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// All participants in display order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Get a participant by index.
    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    /// The local user.
    pub fn local(&self) -> &Participant {
        &self.participants[0]
    }

    /// Mutable access to the local user.
    pub fn local_mut(&mut self) -> &mut Participant {
        &mut self.participants[0]
    }

    /// Find a participant's index by ID.
    pub fn position(&self, participant_id: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.has_id(participant_id))
    }

    /// Record a participant joining.
    ///
    /// The local user's join only fills in their ID.
    pub fn join(&mut self, participant_id: &str, is_local: bool) -> RosterChange {
        if is_local {
            self.participants[0].participant_id = Some(participant_id.to_string());
            return RosterChange::updated(0);
        }
        self.participants.push(Participant::remote(participant_id));
        RosterChange::joined(self.participants.len() - 1)
    }

    /// Record a participant leaving.
    ///
    /// The local user keeps their entry with the ID cleared.
    pub fn leave(&mut self, participant_id: &str, is_local: bool) -> Result<RosterChange, RosterError> {
        if is_local {
            self.participants[0].participant_id = None;
            return Ok(RosterChange::updated(0));
        }
        // Never remove the pinned local entry, even if a remote event reuses its ID.
        let index = self.participants[1..]
            .iter()
            .position(|p| p.has_id(participant_id))
            .map(|i| i + 1)
            .ok_or_else(|| RosterError::UnknownParticipant(participant_id.to_string()))?;
        self.participants.remove(index);
        Ok(RosterChange::left(index))
    }

    /// Apply `f` to the participant with `participant_id`.
    pub fn update<F>(&mut self, participant_id: &str, f: F) -> Result<RosterChange, RosterError>
    where
        F: FnOnce(&mut Participant),
    {
        let index = self.require(participant_id)?;
        f(&mut self.participants[index]);
        Ok(RosterChange::updated(index))
    }

    /// Set a participant's publish state.
    pub fn set_publish_state(&mut self, participant_id: &str, state: PublishState) -> Result<RosterChange, RosterError> {
        self.update(participant_id, |p| p.publish_state = state)
    }

    /// Set a participant's subscribe state.
    pub fn set_subscribe_state(&mut self, participant_id: &str, state: SubscribeState) -> Result<RosterChange, RosterError> {
        self.update(participant_id, |p| p.subscribe_state = state)
    }

    /// Attach streams to a remote participant.
    ///
    /// Local streams are tracked by the capture side, so local events are
    /// ignored and yield `Ok(None)`.
    pub fn add_streams(
        &mut self,
        participant_id: &str,
        is_local: bool,
        streams: &[StreamInfo],
    ) -> Result<Option<RosterChange>, RosterError> {
        if is_local {
            return Ok(None);
        }
        self.update(participant_id, |p| p.streams.extend_from_slice(streams))
            .map(Some)
    }

    /// Detach a remote participant's streams by device URN.
    pub fn remove_streams(
        &mut self,
        participant_id: &str,
        is_local: bool,
        urns: &[String],
    ) -> Result<Option<RosterChange>, RosterError> {
        if is_local {
            return Ok(None);
        }
        self.update(participant_id, |p| p.streams.retain(|s| !urns.contains(&s.urn)))
            .map(Some)
    }

    /// Update mute flags on a remote participant's streams.
    ///
    /// `muted` lists `(urn, muted)` pairs; unknown URNs are skipped.
    pub fn streams_muted(
        &mut self,
        participant_id: &str,
        is_local: bool,
        muted: &[(String, bool)],
    ) -> Result<Option<RosterChange>, RosterError> {
        if is_local {
            return Ok(None);
        }
        self.update(participant_id, |p| {
            for (urn, is_muted) in muted {
                if let Some(stream) = p.streams.iter_mut().find(|s| &s.urn == urn) {
                    stream.muted = *is_muted;
                }
            }
        })
        .map(Some)
    }

    /// Index range of one display page.
    ///
    /// `page_size` is clamped to `1..=max_per_page` so a page always fits
    /// the grid. Out-of-range pages are empty.
    pub fn page(&self, page: usize, page_size: usize, max_per_page: usize) -> Range<usize> {
        let size = page_size.clamp(1, max_per_page.max(1));
        let start = page.saturating_mul(size).min(self.len());
        let end = start.saturating_add(size).min(self.len());
        start..end
    }

    /// Number of pages needed at `page_size` (clamped as in [`page`](Self::page)).
    pub fn page_count(&self, page_size: usize, max_per_page: usize) -> usize {
        let size = page_size.clamp(1, max_per_page.max(1));
        self.len().div_ceil(size)
    }

    fn require(&self, participant_id: &str) -> Result<usize, RosterError> {
        self.position(participant_id)
            .ok_or_else(|| RosterError::UnknownParticipant(participant_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::MediaKind;

    #[test]
    fn test_roster_starts_with_local() {
        let roster = Roster::new();
        assert_eq!(roster.len(), 1);
        assert!(roster.local().is_local);
        assert_eq!(roster.local().participant_id, None);
    }

    #[test]
    fn test_roster_local_join_and_leave() {
        let mut roster = Roster::new();
        assert_eq!(roster.join("me", true), RosterChange::updated(0));
        assert_eq!(roster.position("me"), Some(0));

        assert_eq!(roster.leave("me", true), Ok(RosterChange::updated(0)));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.local().participant_id, None);
    }

    #[test]
    fn test_roster_remote_join_and_leave() {
        let mut roster = Roster::new();
        assert_eq!(roster.join("a", false), RosterChange::joined(1));
        assert_eq!(roster.join("b", false), RosterChange::joined(2));
        assert_eq!(roster.join("c", false), RosterChange::joined(3));

        assert_eq!(roster.leave("b", false), Ok(RosterChange::left(2)));
        assert_eq!(roster.position("c"), Some(2));
        assert_eq!(
            roster.leave("b", false),
            Err(RosterError::UnknownParticipant("b".to_string()))
        );
    }

    #[test]
    fn test_roster_state_updates() {
        let mut roster = Roster::new();
        roster.join("a", false);

        let change = roster.set_publish_state("a", PublishState::Published).unwrap();
        assert_eq!(change, RosterChange::updated(1));
        assert_eq!(roster.get(1).unwrap().publish_state, PublishState::Published);

        roster.set_subscribe_state("a", SubscribeState::Subscribed).unwrap();
        assert_eq!(roster.get(1).unwrap().subscribe_state, SubscribeState::Subscribed);

        assert!(roster.set_publish_state("ghost", PublishState::Attempting).is_err());
    }

    #[test]
    fn test_roster_local_mut() {
        let mut roster = Roster::new();
        roster.join("b", false);
        roster.local_mut().publish_state = PublishState::Published;
        assert_eq!(roster.local().publish_state, PublishState::Published);
        assert_eq!(roster.get(1).unwrap().publish_state, PublishState::default());
    }

    #[test]
    fn test_roster_streams_muted_unknown_participant() {
        let mut roster = Roster::new();
        let muted = vec![("urn:a".to_string(), true)];
        assert!(matches!(
            roster.streams_muted("ghost", false, &muted),
            Err(RosterError::UnknownParticipant(id)) if id == "ghost"
        ));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_roster_streams() {
        let mut roster = Roster::new();
        roster.join("a", false);

        let streams = [
            StreamInfo::new("urn:cam", MediaKind::Video),
            StreamInfo::new("urn:mic", MediaKind::Audio),
        ];
        assert_eq!(roster.add_streams("a", false, &streams), Ok(Some(RosterChange::updated(1))));
        assert_eq!(roster.get(1).unwrap().streams.len(), 2);

        roster.streams_muted("a", false, &[("urn:mic".to_string(), true)]).unwrap();
        assert!(roster.get(1).unwrap().is_audio_muted());

        roster.remove_streams("a", false, &["urn:cam".to_string()]).unwrap();
        assert_eq!(roster.get(1).unwrap().streams.len(), 1);
        assert_eq!(roster.get(1).unwrap().streams[0].urn, "urn:mic");
    }

    #[test]
    fn test_roster_ignores_local_stream_events() {
        let mut roster = Roster::new();
        roster.join("me", true);
        let streams = [StreamInfo::new("urn:cam", MediaKind::Video)];
        assert_eq!(roster.add_streams("me", true, &streams), Ok(None));
        assert!(roster.local().streams.is_empty());
        assert_eq!(roster.remove_streams("me", true, &[]), Ok(None));
        assert_eq!(roster.streams_muted("me", true, &[]), Ok(None));
    }

    #[test]
    fn test_roster_pagination() {
        let mut roster = Roster::new();
        for i in 0..14 {
            roster.join(&format!("p{i}"), false);
        }
        assert_eq!(roster.len(), 15);
        assert_eq!(roster.page(0, 12, 12), 0..12);
        assert_eq!(roster.page(1, 12, 12), 12..15);
        assert_eq!(roster.page(2, 12, 12), 15..15);
        assert_eq!(roster.page_count(12, 12), 2);

        // Oversized pages are clamped to what the grid can hold.
        assert_eq!(roster.page(0, 50, 12), 0..12);
        assert_eq!(roster.page_count(0, 12), 15);
    }
}
