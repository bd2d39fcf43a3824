//! Media session boundary
//!
//! The media layer is external. This is the narrow, read-only view of it the
//! resolver needs, plus the change notifications it pushes.

use vista_core::{AgentState, ParticipantId, TrackSid};

/// Media-layer track source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackSource {
    Camera,
    Microphone,
    ScreenShare,
    ScreenShareAudio,
    Unknown,
}

/// Participant classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticipantKind {
    Standard,
    Agent,
}

/// A published track as seen by the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Publication {
    pub participant: ParticipantId,
    pub sid: TrackSid,
    pub source: TrackSource,
    pub muted: bool,
}

/// What the session knows about the designated assistant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssistantSnapshot {
    /// Assistant participant, if one has joined
    pub participant: Option<ParticipantId>,
    pub state: AgentState,
    pub audio: Option<Publication>,
    pub video: Option<Publication>,
}

/// Change notification pushed by the media layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    ParticipantJoined(ParticipantId),
    ParticipantLeft(ParticipantId),
    PublicationAdded {
        participant: ParticipantId,
        sid: TrackSid,
        source: TrackSource,
    },
    PublicationRemoved {
        participant: ParticipantId,
        sid: TrackSid,
        source: TrackSource,
    },
    MuteChanged {
        participant: ParticipantId,
        sid: TrackSid,
        muted: bool,
    },
    AgentStateChanged {
        participant: ParticipantId,
        state: AgentState,
    },
}

impl SessionEvent {
    /// Participant the event concerns
    pub fn participant(&self) -> ParticipantId {
        match self {
            SessionEvent::ParticipantJoined(p) | SessionEvent::ParticipantLeft(p) => *p,
            SessionEvent::PublicationAdded { participant, .. }
            | SessionEvent::PublicationRemoved { participant, .. }
            | SessionEvent::MuteChanged { participant, .. }
            | SessionEvent::AgentStateChanged { participant, .. } => *participant,
        }
    }
}

/// Read-only view of a live media session
pub trait MediaSession {
    /// The local participant
    fn local_identity(&self) -> ParticipantId;

    /// Local participant's publication for `source`
    fn local_publication(&self, source: TrackSource) -> Option<Publication>;

    /// Every currently published track of `source`, across participants,
    /// in publication order
    fn active_tracks(&self, source: TrackSource) -> Vec<Publication>;

    /// Designated assistant's state and tracks
    fn assistant(&self) -> AssistantSnapshot;
}

impl<S: MediaSession + ?Sized> MediaSession for &S {
    fn local_identity(&self) -> ParticipantId {
        (**self).local_identity()
    }

    fn local_publication(&self, source: TrackSource) -> Option<Publication> {
        (**self).local_publication(source)
    }

    fn active_tracks(&self, source: TrackSource) -> Vec<Publication> {
        (**self).active_tracks(source)
    }

    fn assistant(&self) -> AssistantSnapshot {
        (**self).assistant()
    }
}
