//! In-memory media session
//!
//! Holds participants and their publications behind a shared lock. Every
//! mutator returns the `SessionEvent` it caused so the caller can forward it
//! to whatever is watching the session.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use vista_core::{AgentState, ParticipantId, TrackSid};

use crate::{
    AssistantSnapshot, MediaSession, ParticipantKind, Publication, SessionError, SessionEvent,
    SessionResult, TrackSource,
};

#[derive(Debug)]
struct Participant {
    id: ParticipantId,
    name: String,
    kind: ParticipantKind,
    agent_state: AgentState,
    publications: Vec<Publication>,
}

#[derive(Debug)]
struct SessionInner {
    local: ParticipantId,
    /// Join order
    participants: Vec<Participant>,
    /// Agent to treat as the assistant; first agent when unset
    agent_name: Option<String>,
    next_participant: u64,
    next_sid: u64,
}

impl SessionInner {
    fn participant(&self, id: ParticipantId) -> SessionResult<&Participant> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .ok_or(SessionError::UnknownParticipant(id))
    }

    fn participant_mut(&mut self, id: ParticipantId) -> SessionResult<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SessionError::UnknownParticipant(id))
    }

    fn assistant(&self) -> Option<&Participant> {
        let mut agents = self
            .participants
            .iter()
            .filter(|p| p.kind == ParticipantKind::Agent);
        match &self.agent_name {
            Some(name) => agents.find(|p| &p.name == name),
            None => agents.next(),
        }
    }
}

/// Shared in-memory session. Clones observe the same state.
#[derive(Clone, Debug)]
pub struct LocalSession {
    inner: Arc<RwLock<SessionInner>>,
}

impl LocalSession {
    /// Create a session containing only the local participant
    pub fn new(local_name: impl Into<String>) -> Self {
        let local = ParticipantId::new(1);
        LocalSession {
            inner: Arc::new(RwLock::new(SessionInner {
                local,
                participants: vec![Participant {
                    id: local,
                    name: local_name.into(),
                    kind: ParticipantKind::Standard,
                    agent_state: AgentState::Disconnected,
                    publications: Vec::new(),
                }],
                agent_name: None,
                next_participant: 2,
                next_sid: 1,
            })),
        }
    }

    /// Only treat the agent with this name as the assistant
    pub fn with_agent_name(self, name: Option<String>) -> Self {
        self.inner.write().agent_name = name;
        self
    }

    pub fn local_id(&self) -> ParticipantId {
        self.inner.read().local
    }

    /// Add a remote participant
    pub fn join(
        &self,
        name: impl Into<String>,
        kind: ParticipantKind,
    ) -> SessionResult<(ParticipantId, SessionEvent)> {
        let name = name.into();
        let mut inner = self.inner.write();
        if inner.participants.iter().any(|p| p.name == name) {
            return Err(SessionError::DuplicateParticipant(name));
        }
        let id = ParticipantId::new(inner.next_participant);
        inner.next_participant += 1;
        debug!(participant = %id, %name, ?kind, "participant joined");
        let agent_state = match kind {
            ParticipantKind::Agent => AgentState::Connecting,
            ParticipantKind::Standard => AgentState::Disconnected,
        };
        inner.participants.push(Participant {
            id,
            name,
            kind,
            agent_state,
            publications: Vec::new(),
        });
        Ok((id, SessionEvent::ParticipantJoined(id)))
    }

    /// Remove a remote participant along with its publications
    pub fn leave(&self, id: ParticipantId) -> SessionResult<SessionEvent> {
        let mut inner = self.inner.write();
        if id == inner.local {
            return Err(SessionError::LocalParticipant);
        }
        let before = inner.participants.len();
        inner.participants.retain(|p| p.id != id);
        if inner.participants.len() == before {
            return Err(SessionError::UnknownParticipant(id));
        }
        debug!(participant = %id, "participant left");
        Ok(SessionEvent::ParticipantLeft(id))
    }

    /// Publish a track. An existing publication of the same source from the
    /// same participant is replaced.
    pub fn publish(
        &self,
        participant: ParticipantId,
        source: TrackSource,
        muted: bool,
    ) -> SessionResult<(TrackSid, SessionEvent)> {
        let mut inner = self.inner.write();
        let sid = TrackSid::new(inner.next_sid);
        let entry = inner.participant_mut(participant)?;
        entry.publications.retain(|p| p.source != source);
        entry.publications.push(Publication {
            participant,
            sid,
            source,
            muted,
        });
        inner.next_sid += 1;
        debug!(%participant, %sid, ?source, muted, "track published");
        Ok((
            sid,
            SessionEvent::PublicationAdded {
                participant,
                sid,
                source,
            },
        ))
    }

    pub fn unpublish(&self, participant: ParticipantId, sid: TrackSid) -> SessionResult<SessionEvent> {
        let mut inner = self.inner.write();
        let entry = inner.participant_mut(participant)?;
        let index = entry
            .publications
            .iter()
            .position(|p| p.sid == sid)
            .ok_or(SessionError::UnknownTrack(sid))?;
        let removed = entry.publications.remove(index);
        debug!(%participant, %sid, "track unpublished");
        Ok(SessionEvent::PublicationRemoved {
            participant,
            sid,
            source: removed.source,
        })
    }

    pub fn set_muted(
        &self,
        participant: ParticipantId,
        sid: TrackSid,
        muted: bool,
    ) -> SessionResult<SessionEvent> {
        let mut inner = self.inner.write();
        let entry = inner.participant_mut(participant)?;
        let publication = entry
            .publications
            .iter_mut()
            .find(|p| p.sid == sid)
            .ok_or(SessionError::UnknownTrack(sid))?;
        publication.muted = muted;
        debug!(%participant, %sid, muted, "mute changed");
        Ok(SessionEvent::MuteChanged {
            participant,
            sid,
            muted,
        })
    }

    pub fn set_agent_state(
        &self,
        participant: ParticipantId,
        state: AgentState,
    ) -> SessionResult<SessionEvent> {
        let mut inner = self.inner.write();
        let entry = inner.participant_mut(participant)?;
        if entry.kind != ParticipantKind::Agent {
            return Err(SessionError::NotAnAgent(participant));
        }
        entry.agent_state = state;
        Ok(SessionEvent::AgentStateChanged { participant, state })
    }

    /// Look up a participant's publication for a source
    pub fn publication(
        &self,
        participant: ParticipantId,
        source: TrackSource,
    ) -> SessionResult<Option<Publication>> {
        let inner = self.inner.read();
        Ok(inner
            .participant(participant)?
            .publications
            .iter()
            .find(|p| p.source == source)
            .copied())
    }
}

impl MediaSession for LocalSession {
    fn local_identity(&self) -> ParticipantId {
        self.local_id()
    }

    fn local_publication(&self, source: TrackSource) -> Option<Publication> {
        let inner = self.inner.read();
        inner
            .participant(inner.local)
            .ok()?
            .publications
            .iter()
            .find(|p| p.source == source)
            .copied()
    }

    fn active_tracks(&self, source: TrackSource) -> Vec<Publication> {
        let inner = self.inner.read();
        let mut tracks: Vec<Publication> = inner
            .participants
            .iter()
            .flat_map(|p| p.publications.iter())
            .filter(|p| p.source == source)
            .copied()
            .collect();
        // sids are allocated in publication order
        tracks.sort_by_key(|p| p.sid);
        tracks
    }

    fn assistant(&self) -> AssistantSnapshot {
        let inner = self.inner.read();
        let Some(agent) = inner.assistant() else {
            return AssistantSnapshot::default();
        };
        let find = |source| agent.publications.iter().find(|p| p.source == source).copied();
        AssistantSnapshot {
            participant: Some(agent.id),
            state: agent.agent_state,
            audio: find(TrackSource::Microphone),
            video: find(TrackSource::Camera),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_replaces_same_source() {
        let session = LocalSession::new("me");
        let me = session.local_id();
        let (first, _) = session.publish(me, TrackSource::Camera, false).unwrap();
        let (second, _) = session.publish(me, TrackSource::Camera, true).unwrap();
        assert_ne!(first, second);

        let publication = session.local_publication(TrackSource::Camera).unwrap();
        assert_eq!(publication.sid, second);
        assert!(publication.muted);
        assert_eq!(session.active_tracks(TrackSource::Camera).len(), 1);
    }

    #[test]
    fn test_errors_on_unknown_ids() {
        let session = LocalSession::new("me");
        let ghost = ParticipantId::new(99);
        assert_eq!(
            session.publish(ghost, TrackSource::Camera, false).unwrap_err(),
            SessionError::UnknownParticipant(ghost)
        );
        assert_eq!(
            session
                .set_muted(session.local_id(), TrackSid::new(7), true)
                .unwrap_err(),
            SessionError::UnknownTrack(TrackSid::new(7))
        );
        assert_eq!(
            session.leave(session.local_id()).unwrap_err(),
            SessionError::LocalParticipant
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let session = LocalSession::new("me");
        session.join("agent", ParticipantKind::Agent).unwrap();
        assert!(matches!(
            session.join("agent", ParticipantKind::Agent),
            Err(SessionError::DuplicateParticipant(_))
        ));
    }

    #[test]
    fn test_assistant_designation() {
        let session = LocalSession::new("me").with_agent_name(Some("jarvis".into()));
        let (other, _) = session.join("other-agent", ParticipantKind::Agent).unwrap();
        assert_eq!(session.assistant().participant, None);

        let (jarvis, _) = session.join("jarvis", ParticipantKind::Agent).unwrap();
        session.publish(other, TrackSource::Microphone, false).unwrap();
        let (mic, _) = session.publish(jarvis, TrackSource::Microphone, false).unwrap();
        session.set_agent_state(jarvis, AgentState::Listening).unwrap();

        let snapshot = session.assistant();
        assert_eq!(snapshot.participant, Some(jarvis));
        assert_eq!(snapshot.state, AgentState::Listening);
        assert_eq!(snapshot.audio.map(|p| p.sid), Some(mic));
        assert!(snapshot.video.is_none());
    }

    #[test]
    fn test_first_agent_when_unnamed() {
        let session = LocalSession::new("me");
        let (human, _) = session.join("bob", ParticipantKind::Standard).unwrap();
        let (agent, _) = session.join("agent", ParticipantKind::Agent).unwrap();
        assert_eq!(session.assistant().participant, Some(agent));
        assert_eq!(session.assistant().state, AgentState::Connecting);
        assert_eq!(
            session.set_agent_state(human, AgentState::Speaking).unwrap_err(),
            SessionError::NotAnAgent(human)
        );
    }

    #[test]
    fn test_leave_drops_publications() {
        let session = LocalSession::new("me");
        let (bob, _) = session.join("bob", ParticipantKind::Standard).unwrap();
        session.publish(bob, TrackSource::ScreenShare, false).unwrap();
        assert_eq!(session.active_tracks(TrackSource::ScreenShare).len(), 1);

        assert_eq!(session.leave(bob).unwrap(), SessionEvent::ParticipantLeft(bob));
        assert!(session.active_tracks(TrackSource::ScreenShare).is_empty());
        assert!(session.publication(bob, TrackSource::ScreenShare).is_err());
    }
}
