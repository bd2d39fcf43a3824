//! Scenario harness
//!
//! Scripts a session step by step against a synchronous compositor driven
//! by a manual clock, recording every transition along the way.

use std::time::Duration;

use vista_core::{AgentState, FrameTime, ParticipantId, Region, TrackSid};
use vista_layout::{Composition, TransitionEvent, TransitionKind};
use vista_runtime::{Compositor, CompositorConfig};
use vista_time::{Clock, ManualClock};
use vista_tracks::{LocalSession, ParticipantKind, SessionEvent, SessionResult, TrackSource};

/// A published track in the scripted session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptedTrack {
    pub participant: ParticipantId,
    pub sid: TrackSid,
}

pub struct ScenarioHarness {
    session: LocalSession,
    clock: ManualClock,
    compositor: Compositor<LocalSession, ManualClock>,
    events: Vec<TransitionEvent>,
}

impl ScenarioHarness {
    pub fn new() -> Self {
        Self::with_config(&CompositorConfig::default())
    }

    pub fn with_config(config: &CompositorConfig) -> Self {
        let session = LocalSession::new("local");
        let clock = ManualClock::new();
        let compositor = Compositor::new(session.clone(), clock.clone(), config);
        ScenarioHarness {
            session,
            clock,
            compositor,
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> &LocalSession {
        &self.session
    }

    pub fn compositor(&self) -> &Compositor<LocalSession, ManualClock> {
        &self.compositor
    }

    pub fn now(&self) -> FrameTime {
        self.clock.now()
    }

    /// How long a full enter or exit takes
    pub fn transition_duration(&self) -> Duration {
        self.compositor.controller().timing().duration()
    }

    /// Forward a session change to the compositor
    pub fn deliver(&mut self, event: SessionEvent) {
        let events = self.compositor.handle_event(&event);
        self.events.extend(events);
    }

    /// Join an agent participant that will act as the assistant
    pub fn join_assistant(&mut self, name: &str) -> SessionResult<ParticipantId> {
        let (id, event) = self.session.join(name, ParticipantKind::Agent)?;
        self.deliver(event);
        Ok(id)
    }

    pub fn publish(
        &mut self,
        participant: ParticipantId,
        source: TrackSource,
        muted: bool,
    ) -> SessionResult<ScriptedTrack> {
        let (sid, event) = self.session.publish(participant, source, muted)?;
        self.deliver(event);
        Ok(ScriptedTrack { participant, sid })
    }

    pub fn publish_camera(&mut self, muted: bool) -> SessionResult<ScriptedTrack> {
        self.publish(self.session.local_id(), TrackSource::Camera, muted)
    }

    pub fn publish_screen_share(&mut self, muted: bool) -> SessionResult<ScriptedTrack> {
        self.publish(self.session.local_id(), TrackSource::ScreenShare, muted)
    }

    pub fn set_muted(&mut self, track: ScriptedTrack, muted: bool) -> SessionResult<()> {
        let event = self.session.set_muted(track.participant, track.sid, muted)?;
        self.deliver(event);
        Ok(())
    }

    pub fn unpublish(&mut self, track: ScriptedTrack) -> SessionResult<()> {
        let event = self.session.unpublish(track.participant, track.sid)?;
        self.deliver(event);
        Ok(())
    }

    pub fn set_agent_state(&mut self, agent: ParticipantId, state: AgentState) -> SessionResult<()> {
        let event = self.session.set_agent_state(agent, state)?;
        self.deliver(event);
        Ok(())
    }

    /// Let `dt` of frame time pass, then advance transitions
    pub fn wait(&mut self, dt: Duration) {
        self.clock.advance(dt);
        let events = self.compositor.tick();
        self.events.extend(events);
    }

    /// Wait long enough for every in-flight transition to finish
    pub fn settle(&mut self) {
        self.wait(self.transition_duration() + Duration::from_millis(1));
    }

    pub fn composition(&self) -> Composition {
        self.compositor.composition()
    }

    /// Every transition so far, in order
    pub fn events(&self) -> &[TransitionEvent] {
        &self.events
    }

    pub fn count(&self, region: Region, kind: TransitionKind) -> usize {
        self.events
            .iter()
            .filter(|e| e.region == region && e.kind == kind)
            .count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}
