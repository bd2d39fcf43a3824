//! Track Signal Resolver
//!
//! Maps the session's raw publications onto one `TrackSignal` per source kind.
//! Absence is a normal outcome and resolves to `None`.

use tracing::trace;
use vista_core::{SignalSet, SourceKind, TrackRef, TrackSignal};

use crate::{MediaSession, Publication, SessionEvent, TrackSource};

fn to_signal(kind: SourceKind, publication: Publication) -> TrackSignal {
    TrackSignal::new(
        kind,
        TrackRef::new(publication.participant, publication.sid),
        publication.muted,
    )
}

/// Pure read of a media session into track signals
#[derive(Debug)]
pub struct TrackResolver<S> {
    session: S,
}

impl<S: MediaSession> TrackResolver<S> {
    pub fn new(session: S) -> Self {
        TrackResolver { session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Resolve the signal for one kind
    pub fn resolve(&self, kind: SourceKind) -> Option<TrackSignal> {
        let publication = match kind {
            SourceKind::LocalCamera => self.session.local_publication(TrackSource::Camera),
            SourceKind::LocalScreenShare => {
                let tracks = self.session.active_tracks(TrackSource::ScreenShare);
                let local = self.session.local_identity();
                tracks
                    .iter()
                    .find(|p| p.participant == local)
                    .or_else(|| tracks.first())
                    .copied()
            }
            SourceKind::RemoteAssistantAudio => self.session.assistant().audio,
            SourceKind::RemoteAssistantVideo => self.session.assistant().video,
        };
        publication.map(|p| to_signal(kind, p))
    }

    /// Resolve every kind plus the assistant state
    pub fn resolve_all(&self) -> SignalSet {
        let assistant = self.session.assistant();
        let mut signals = SignalSet::new().with_agent_state(assistant.state);
        for kind in [SourceKind::LocalCamera, SourceKind::LocalScreenShare] {
            signals.put(kind, self.resolve(kind));
        }
        signals.put(
            SourceKind::RemoteAssistantAudio,
            assistant
                .audio
                .map(|p| to_signal(SourceKind::RemoteAssistantAudio, p)),
        );
        signals.put(
            SourceKind::RemoteAssistantVideo,
            assistant
                .video
                .map(|p| to_signal(SourceKind::RemoteAssistantVideo, p)),
        );
        signals
    }
}

/// Result of one notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalUpdate {
    pub signals: SignalSet,
    /// Differs from the previously emitted set
    pub changed: bool,
    /// Number of notifications processed so far
    pub revision: u64,
}

/// Re-resolves the full signal set on every change notification
#[derive(Debug)]
pub struct SignalWatcher<S> {
    resolver: TrackResolver<S>,
    current: SignalSet,
    revision: u64,
}

impl<S: MediaSession> SignalWatcher<S> {
    /// Create a watcher primed with the session's current signals
    pub fn new(session: S) -> Self {
        let resolver = TrackResolver::new(session);
        let current = resolver.resolve_all();
        SignalWatcher {
            resolver,
            current,
            revision: 0,
        }
    }

    pub fn current(&self) -> &SignalSet {
        &self.current
    }

    pub fn resolver(&self) -> &TrackResolver<S> {
        &self.resolver
    }

    /// Re-evaluate after `event` and emit the fresh set
    pub fn notify(&mut self, event: &SessionEvent) -> SignalUpdate {
        let signals = self.resolver.resolve_all();
        let changed = signals != self.current;
        self.revision += 1;
        trace!(
            revision = self.revision,
            participant = %event.participant(),
            changed,
            "signals re-resolved"
        );
        self.current = signals.clone();
        SignalUpdate {
            signals,
            changed,
            revision: self.revision,
        }
    }
}
