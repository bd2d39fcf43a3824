//! Track signals
//!
//! A `TrackSignal` is the normalized view of one media track: which kind it
//! is, whether it is enabled, and an opaque reference passed through to the
//! renderer. Absence is represented by the signal not existing at all.

use crate::{AgentState, ParticipantId, TrackSid};

/// Media source kinds the composition cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SourceKind {
    /// Local participant's camera
    LocalCamera = 0,
    /// Screen share (local participant preferred)
    LocalScreenShare = 1,
    /// Assistant participant's microphone
    RemoteAssistantAudio = 2,
    /// Assistant participant's avatar video
    RemoteAssistantVideo = 3,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::LocalCamera,
        SourceKind::LocalScreenShare,
        SourceKind::RemoteAssistantAudio,
        SourceKind::RemoteAssistantVideo,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this kind belongs to the assistant participant
    pub fn is_assistant(self) -> bool {
        matches!(
            self,
            SourceKind::RemoteAssistantAudio | SourceKind::RemoteAssistantVideo
        )
    }
}

/// Opaque handle to the underlying track
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackRef {
    pub participant: ParticipantId,
    pub sid: TrackSid,
}

impl TrackRef {
    pub fn new(participant: ParticipantId, sid: TrackSid) -> Self {
        TrackRef { participant, sid }
    }
}

/// Normalized signal for one source kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackSignal {
    pub kind: SourceKind,
    /// A track exists for this kind
    pub present: bool,
    /// `present && !muted`
    pub enabled: bool,
    pub reference: TrackRef,
}

impl TrackSignal {
    /// Signal for an existing track
    pub fn new(kind: SourceKind, reference: TrackRef, muted: bool) -> Self {
        TrackSignal {
            kind,
            present: true,
            enabled: !muted,
            reference,
        }
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.present && !self.enabled
    }
}

/// The current signal per source kind, plus the assistant's coarse state.
///
/// One slot per kind: writing a signal overwrites whatever was there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignalSet {
    slots: [Option<TrackSignal>; 4],
    pub agent_state: AgentState,
}

impl SignalSet {
    pub fn new() -> Self {
        SignalSet::default()
    }

    /// Get the signal for a kind
    #[inline]
    pub fn get(&self, kind: SourceKind) -> Option<&TrackSignal> {
        self.slots[kind.index()].as_ref()
    }

    /// Insert or overwrite the signal for its kind
    pub fn set(&mut self, signal: TrackSignal) {
        self.slots[signal.kind.index()] = Some(signal);
    }

    /// Replace the slot for `kind` (None clears it)
    pub fn put(&mut self, kind: SourceKind, signal: Option<TrackSignal>) {
        debug_assert!(signal.map_or(true, |s| s.kind == kind));
        self.slots[kind.index()] = signal;
    }

    /// Remove the signal for a kind
    pub fn clear(&mut self, kind: SourceKind) -> Option<TrackSignal> {
        self.slots[kind.index()].take()
    }

    pub fn camera(&self) -> Option<&TrackSignal> {
        self.get(SourceKind::LocalCamera)
    }

    pub fn screen_share(&self) -> Option<&TrackSignal> {
        self.get(SourceKind::LocalScreenShare)
    }

    pub fn assistant_audio(&self) -> Option<&TrackSignal> {
        self.get(SourceKind::RemoteAssistantAudio)
    }

    pub fn assistant_video(&self) -> Option<&TrackSignal> {
        self.get(SourceKind::RemoteAssistantVideo)
    }

    /// Iterate over present signals
    pub fn iter(&self) -> impl Iterator<Item = &TrackSignal> {
        self.slots.iter().flatten()
    }

    /// Number of present signals
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Builder: add a signal
    pub fn with(mut self, signal: TrackSignal) -> Self {
        self.set(signal);
        self
    }

    /// Builder: set agent state
    pub fn with_agent_state(mut self, state: AgentState) -> Self {
        self.agent_state = state;
        self
    }
}
