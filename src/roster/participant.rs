//! Participant: What the roster knows about one member of a stage.

use bitflags::bitflags;

/// Kind of media a stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Microphone or other audio source.
    Audio,
    /// Camera, screen or other video source.
    Video,
}

bitflags! {
    /// Media kinds a participant is subscribed to.
    ///
    /// ```
    /// use stagegrid::MediaKinds;
    /// let both = MediaKinds::AUDIO | MediaKinds::VIDEO;
    /// assert_eq!(both, MediaKinds::AUDIO_VIDEO);
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MediaKinds: u8 {
        /// Audio only.
        const AUDIO = 0b0000_0001;
        /// Video only.
        const VIDEO = 0b0000_0010;
        /// Both.
        const AUDIO_VIDEO = Self::AUDIO.bits() | Self::VIDEO.bits();
    }
}

impl std::fmt::Debug for MediaKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

impl From<MediaKind> for MediaKinds {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Audio => Self::AUDIO,
            MediaKind::Video => Self::VIDEO,
        }
    }
}

/// Publishing progress of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PublishState {
    /// Not sending media.
    #[default]
    NotPublished,
    /// Negotiating.
    Attempting,
    /// Sending media.
    Published,
}

/// Subscription progress for a participant's media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubscribeState {
    /// Not receiving media.
    #[default]
    NotSubscribed,
    /// Negotiating.
    Attempting,
    /// Receiving media.
    Subscribed,
}

/// One media stream owned by a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Device URN identifying the stream's source.
    pub urn: String,
    /// Audio or video.
    pub kind: MediaKind,
    /// Whether the sender has muted it.
    pub muted: bool,
}

impl StreamInfo {
    /// Create an unmuted stream.
    pub fn new(urn: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            urn: urn.into(),
            kind,
            muted: false,
        }
    }
}

/// A member of the stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Whether this is the local user.
    pub is_local: bool,
    /// Server-assigned ID. `None` for the local user before joining.
    pub participant_id: Option<String>,
    /// Publishing progress.
    pub publish_state: PublishState,
    /// Subscription progress.
    pub subscribe_state: SubscribeState,
    /// Media kinds we are subscribed to.
    pub subscribed_media: MediaKinds,
    /// Streams currently attached.
    pub streams: Vec<StreamInfo>,
}

impl Participant {
    /// Create a participant with no streams.
    pub fn new(is_local: bool, participant_id: Option<String>) -> Self {
        Self {
            is_local,
            participant_id,
            publish_state: PublishState::default(),
            subscribe_state: SubscribeState::default(),
            subscribed_media: MediaKinds::AUDIO_VIDEO,
            streams: Vec::new(),
        }
    }

    /// The local user, before joining.
    pub fn local() -> Self {
        Self::new(true, None)
    }

    /// A remote participant.
    pub fn remote(participant_id: impl Into<String>) -> Self {
        Self::new(false, Some(participant_id.into()))
    }

    /// Check whether this participant has `id`.
    pub fn has_id(&self, id: &str) -> bool {
        self.participant_id.as_deref() == Some(id)
    }

    /// First unmuted video stream, if any.
    pub fn video(&self) -> Option<&StreamInfo> {
        self.streams
            .iter()
            .find(|s| s.kind == MediaKind::Video && !s.muted)
    }

    /// Whether every audio stream is muted (or there is none).
    pub fn is_audio_muted(&self) -> bool {
        self.streams
            .iter()
            .filter(|s| s.kind == MediaKind::Audio)
            .all(|s| s.muted)
    }

    /// Media kinds with at least one unmuted stream.
    pub fn active_media(&self) -> MediaKinds {
        self.streams
            .iter()
            .filter(|s| !s.muted)
            .fold(MediaKinds::empty(), |acc, s| acc | s.kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_defaults() {
        let local = Participant::local();
        assert!(local.is_local);
        assert_eq!(local.participant_id, None);
        assert_eq!(local.publish_state, PublishState::NotPublished);
        assert_eq!(local.subscribe_state, SubscribeState::NotSubscribed);
        assert_eq!(local.subscribed_media, MediaKinds::AUDIO_VIDEO);

        let remote = Participant::remote("p-1");
        assert!(!remote.is_local);
        assert!(remote.has_id("p-1"));
        assert!(!remote.has_id("p-2"));
    }

    #[test]
    fn test_participant_media() {
        let mut p = Participant::remote("p-1");
        assert!(p.is_audio_muted());
        assert_eq!(p.active_media(), MediaKinds::empty());

        p.streams.push(StreamInfo::new("urn:cam", MediaKind::Video));
        p.streams.push(StreamInfo::new("urn:mic", MediaKind::Audio));
        assert_eq!(p.active_media(), MediaKinds::AUDIO_VIDEO);
        assert_eq!(p.video().map(|s| s.urn.as_str()), Some("urn:cam"));

        p.streams[0].muted = true;
        assert!(p.video().is_none());
        assert_eq!(p.active_media(), MediaKinds::AUDIO);
        assert!(!p.is_audio_muted());
    }

    #[test]
    fn test_media_kinds_debug() {
        assert_eq!(format!("{:?}", MediaKinds::AUDIO | MediaKinds::VIDEO), "AUDIO | VIDEO");
    }
}
