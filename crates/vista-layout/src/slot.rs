//! Per-region tile state machine
//!
//! ```text
//!   Empty ──▶ Entering ──▶ Steady ──▶ Exiting ──▶ Empty
//!                ▲                       │
//!                └──────── resume ───────┘
//! ```
//!
//! A region holds at most one current tile (entering or steady) and at most
//! one departing tile (exiting). The two never share a role. Identities are
//! minted from a per-region generation counter that nothing outside the
//! region can touch.

use vista_core::{FrameTime, Region, TileIdentity, TileRole};

use crate::{TileContent, TransitionPhase, TransitionTiming};

/// What happened to a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Fresh identity started entering
    Entered,
    /// Exit cancelled, same identity animating back in
    Resumed,
    /// Started exiting
    Exiting,
    /// Enter finished
    Settled,
    /// Exit finished or cut short; identity discarded
    Retired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    pub region: Region,
    pub identity: TileIdentity,
    pub kind: TransitionKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Entering { started: FrameTime, from: f32 },
    Steady,
    Exiting { started: FrameTime, from: f32 },
}

/// One tile and its transition bookkeeping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub identity: TileIdentity,
    pub content: TileContent,
    phase: Phase,
}

impl Tile {
    /// Scale/opacity at `now`
    pub fn visibility(&self, now: FrameTime, timing: &TransitionTiming) -> f32 {
        match self.phase {
            Phase::Entering { started, from } => {
                from + (1.0 - from) * timing.progress(now.since(started))
            }
            Phase::Steady => 1.0,
            Phase::Exiting { started, from } => from * (1.0 - timing.progress(now.since(started))),
        }
    }

    pub fn phase(&self, now: FrameTime, timing: &TransitionTiming) -> TransitionPhase {
        let visibility = self.visibility(now, timing);
        match self.phase {
            Phase::Entering { .. } => TransitionPhase::Entering { visibility },
            Phase::Steady => TransitionPhase::Steady,
            Phase::Exiting { .. } => TransitionPhase::Exiting { visibility },
        }
    }

    pub fn role(&self) -> TileRole {
        self.content.role()
    }

    fn begin_exit(&mut self, now: FrameTime, timing: &TransitionTiming) {
        let from = self.visibility(now, timing);
        self.phase = Phase::Exiting { started: now, from };
    }

    /// Reverse an exit from wherever it got to
    fn resume(&mut self, now: FrameTime, timing: &TransitionTiming) {
        let from = self.visibility(now, timing);
        self.phase = Phase::Entering { started: now, from };
    }
}

/// Coarse state of a region, as seen by the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Entering,
    Steady,
    Exiting,
}

/// Tile registry and state machine for one region
#[derive(Clone, Debug)]
pub struct RegionSlot {
    region: Region,
    current: Option<Tile>,
    departing: Option<Tile>,
    next_generation: u64,
}

impl RegionSlot {
    pub fn new(region: Region) -> Self {
        RegionSlot {
            region,
            current: None,
            departing: None,
            next_generation: 1,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Entering or steady tile
    pub fn current(&self) -> Option<&Tile> {
        self.current.as_ref()
    }

    /// Exiting tile
    pub fn departing(&self) -> Option<&Tile> {
        self.departing.as_ref()
    }

    pub fn state(&self) -> SlotState {
        match (&self.current, &self.departing) {
            (Some(tile), _) => match tile.phase {
                Phase::Steady => SlotState::Steady,
                _ => SlotState::Entering,
            },
            (None, Some(_)) => SlotState::Exiting,
            (None, None) => SlotState::Empty,
        }
    }

    /// Departing tile first, so the renderer stacks it below the current one
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.departing.iter().chain(self.current.iter())
    }

    pub fn is_animating(&self) -> bool {
        self.departing.is_some()
            || self
                .current
                .as_ref()
                .is_some_and(|t| !matches!(t.phase, Phase::Steady))
    }

    /// Move the region toward showing `target`
    pub fn update(
        &mut self,
        target: Option<TileContent>,
        now: FrameTime,
        timing: &TransitionTiming,
        events: &mut Vec<TransitionEvent>,
    ) {
        let current_role = self.current.as_ref().map(Tile::role);
        match (current_role, target) {
            (None, None) => {}

            // Same logical tile: refresh the payload, keep the identity
            (Some(role), Some(content)) if role == content.role() => {
                if let Some(tile) = self.current.as_mut() {
                    tile.content = content;
                }
            }

            (Some(_), None) => {
                self.retire_departing(events);
                self.begin_exit_current(now, timing, events);
            }

            (None, Some(content)) => {
                let incoming = self.take_incoming(content, now, timing, events);
                self.current = Some(incoming);
            }

            // Content swap: the old tile exits while the new one enters
            (Some(_), Some(content)) => {
                let incoming = self.take_incoming(content, now, timing, events);
                self.begin_exit_current(now, timing, events);
                self.current = Some(incoming);
            }
        }
    }

    /// Complete transitions whose time is up
    pub fn advance(
        &mut self,
        now: FrameTime,
        timing: &TransitionTiming,
        events: &mut Vec<TransitionEvent>,
    ) {
        if let Some(tile) = self.current.as_mut() {
            if let Phase::Entering { started, .. } = tile.phase {
                if timing.is_complete(now.since(started)) {
                    tile.phase = Phase::Steady;
                    let identity = tile.identity;
                    self.emit(events, identity, TransitionKind::Settled);
                }
            }
        }
        if let Some(Phase::Exiting { started, .. }) = self.departing.map(|t| t.phase) {
            if timing.is_complete(now.since(started)) {
                self.retire_departing(events);
            }
        }
    }

    /// Tile to install as current for `content`: the departing tile if it has
    /// the same role (exit cancelled), otherwise a freshly minted one. Any
    /// other departing tile is cut short.
    fn take_incoming(
        &mut self,
        content: TileContent,
        now: FrameTime,
        timing: &TransitionTiming,
        events: &mut Vec<TransitionEvent>,
    ) -> Tile {
        if let Some(mut tile) = self.departing.take_if_role(content.role()) {
            tile.content = content;
            tile.resume(now, timing);
            self.emit(events, tile.identity, TransitionKind::Resumed);
            return tile;
        }
        self.retire_departing(events);
        self.mint(content, now, events)
    }

    fn mint(&mut self, content: TileContent, now: FrameTime, events: &mut Vec<TransitionEvent>) -> Tile {
        let identity = TileIdentity::new(content.role(), self.next_generation);
        self.next_generation += 1;
        self.emit(events, identity, TransitionKind::Entered);
        Tile {
            identity,
            content,
            phase: Phase::Entering {
                started: now,
                from: 0.0,
            },
        }
    }

    fn begin_exit_current(
        &mut self,
        now: FrameTime,
        timing: &TransitionTiming,
        events: &mut Vec<TransitionEvent>,
    ) {
        if let Some(mut tile) = self.current.take() {
            tile.begin_exit(now, timing);
            self.emit(events, tile.identity, TransitionKind::Exiting);
            self.departing = Some(tile);
        }
    }

    fn retire_departing(&mut self, events: &mut Vec<TransitionEvent>) {
        if let Some(tile) = self.departing.take() {
            self.emit(events, tile.identity, TransitionKind::Retired);
        }
    }

    fn emit(&self, events: &mut Vec<TransitionEvent>, identity: TileIdentity, kind: TransitionKind) {
        events.push(TransitionEvent {
            region: self.region,
            identity,
            kind,
        });
    }
}

trait TakeIfRole {
    fn take_if_role(&mut self, role: TileRole) -> Option<Tile>;
}

impl TakeIfRole for Option<Tile> {
    fn take_if_role(&mut self, role: TileRole) -> Option<Tile> {
        if self.as_ref().is_some_and(|t| t.role() == role) {
            self.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::signal;
    use std::time::Duration;
    use vista_core::{AgentState, SourceKind};

    fn camera(sid: u64) -> TileContent {
        TileContent::Camera(signal(SourceKind::LocalCamera, sid, false))
    }

    fn audio(state: AgentState) -> TileContent {
        TileContent::AssistantAudio {
            signal: signal(SourceKind::RemoteAssistantAudio, 10, false),
            state,
        }
    }

    fn video() -> TileContent {
        TileContent::AssistantVideo(signal(SourceKind::RemoteAssistantVideo, 11, false))
    }

    fn kinds(events: &[TransitionEvent]) -> Vec<TransitionKind> {
        events.iter().map(|e| e.kind).collect()
    }

    fn ms(n: i64) -> FrameTime {
        FrameTime::from_millis(n)
    }

    #[test]
    fn test_full_lifecycle() {
        let timing = TransitionTiming::default();
        let settle = timing.duration();
        let mut slot = RegionSlot::new(Region::FullScreen);
        let mut events = Vec::new();
        assert_eq!(slot.state(), SlotState::Empty);

        slot.update(Some(camera(1)), ms(0), &timing, &mut events);
        assert_eq!(slot.state(), SlotState::Entering);
        let identity = slot.current().unwrap().identity;
        assert_eq!(identity.role, TileRole::CameraFullscreen);

        slot.advance(FrameTime::ZERO + settle, &timing, &mut events);
        assert_eq!(slot.state(), SlotState::Steady);

        let t = FrameTime::ZERO + settle + Duration::from_millis(100);
        slot.update(None, t, &timing, &mut events);
        assert_eq!(slot.state(), SlotState::Exiting);
        assert_eq!(slot.departing().unwrap().identity, identity);

        slot.advance(t + settle, &timing, &mut events);
        assert_eq!(slot.state(), SlotState::Empty);
        assert!(!slot.is_animating());

        assert_eq!(
            kinds(&events),
            vec![
                TransitionKind::Entered,
                TransitionKind::Settled,
                TransitionKind::Exiting,
                TransitionKind::Retired
            ]
        );
        assert!(events.iter().all(|e| e.identity == identity));
    }

    #[test]
    fn test_payload_refresh_keeps_identity() {
        let timing = TransitionTiming::default();
        let mut slot = RegionSlot::new(Region::FullScreen);
        let mut events = Vec::new();
        slot.update(Some(camera(1)), ms(0), &timing, &mut events);
        let identity = slot.current().unwrap().identity;

        slot.update(Some(camera(2)), ms(10), &timing, &mut events);
        let tile = slot.current().unwrap();
        assert_eq!(tile.identity, identity);
        assert_eq!(tile.content, camera(2));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_exit_cancelled_by_reentry() {
        let timing = TransitionTiming::default();
        let mut slot = RegionSlot::new(Region::AssistantCorner);
        let mut events = Vec::new();
        slot.update(Some(audio(AgentState::Listening)), ms(0), &timing, &mut events);
        slot.advance(ms(2000), &timing, &mut events);
        let identity = slot.current().unwrap().identity;

        slot.update(None, ms(2000), &timing, &mut events);
        let midway = ms(2000) + timing.duration() / 3;
        let faded = slot.departing().unwrap().visibility(midway, &timing);
        assert!(faded > 0.0 && faded < 1.0);

        slot.update(Some(audio(AgentState::Speaking)), midway, &timing, &mut events);
        assert_eq!(slot.state(), SlotState::Entering);
        assert!(slot.departing().is_none());
        let tile = slot.current().unwrap();
        assert_eq!(tile.identity, identity);
        assert_eq!(tile.content.agent_state(), Some(AgentState::Speaking));
        // Picks up from where the exit left off
        assert!((tile.visibility(midway, &timing) - faded).abs() < 1e-4);

        let entered = events
            .iter()
            .filter(|e| e.kind == TransitionKind::Entered)
            .count();
        assert_eq!(entered, 1);
        assert_eq!(events.last().unwrap().kind, TransitionKind::Resumed);
    }

    #[test]
    fn test_swap_exits_old_and_enters_new() {
        let timing = TransitionTiming::default();
        let mut slot = RegionSlot::new(Region::AssistantCorner);
        let mut events = Vec::new();
        slot.update(Some(audio(AgentState::Listening)), ms(0), &timing, &mut events);
        slot.advance(ms(1000), &timing, &mut events);
        let old = slot.current().unwrap().identity;
        events.clear();

        slot.update(Some(video()), ms(1000), &timing, &mut events);
        let new = slot.current().unwrap().identity;
        assert_ne!(old, new);
        assert_eq!(new.role, TileRole::AvatarMinimized);
        assert_eq!(slot.departing().unwrap().identity, old);
        assert_eq!(slot.tiles().count(), 2);
        assert_eq!(
            kinds(&events),
            vec![TransitionKind::Entered, TransitionKind::Exiting]
        );
    }

    #[test]
    fn test_different_role_reentry_replaces_departing() {
        let timing = TransitionTiming::default();
        let mut slot = RegionSlot::new(Region::AssistantCorner);
        let mut events = Vec::new();
        slot.update(Some(audio(AgentState::Listening)), ms(0), &timing, &mut events);
        slot.advance(ms(1000), &timing, &mut events);
        slot.update(None, ms(1000), &timing, &mut events);
        let exiting = slot.departing().unwrap().identity;
        events.clear();

        slot.update(Some(video()), ms(1100), &timing, &mut events);
        assert!(slot.departing().is_none());
        assert_eq!(slot.tiles().count(), 1);
        assert_eq!(
            events,
            vec![
                TransitionEvent {
                    region: Region::AssistantCorner,
                    identity: exiting,
                    kind: TransitionKind::Retired
                },
                TransitionEvent {
                    region: Region::AssistantCorner,
                    identity: slot.current().unwrap().identity,
                    kind: TransitionKind::Entered
                },
            ]
        );
    }

    #[test]
    fn test_swap_back_resumes_departing() {
        let timing = TransitionTiming::default();
        let mut slot = RegionSlot::new(Region::AssistantCorner);
        let mut events = Vec::new();
        slot.update(Some(audio(AgentState::Listening)), ms(0), &timing, &mut events);
        let audio_id = slot.current().unwrap().identity;
        slot.update(Some(video()), ms(50), &timing, &mut events);
        let video_id = slot.current().unwrap().identity;

        // Video flickers away again before the audio glyph finished leaving
        slot.update(Some(audio(AgentState::Thinking)), ms(100), &timing, &mut events);
        assert_eq!(slot.current().unwrap().identity, audio_id);
        assert_eq!(slot.departing().unwrap().identity, video_id);
        assert_eq!(events.last().unwrap().kind, TransitionKind::Exiting);
    }

    #[test]
    fn test_fresh_identity_after_retirement() {
        let timing = TransitionTiming::default();
        let mut slot = RegionSlot::new(Region::PictureInPicture);
        let mut events = Vec::new();
        let share = TileContent::ScreenShare(signal(SourceKind::LocalScreenShare, 5, false));
        slot.update(Some(share), ms(0), &timing, &mut events);
        let first = slot.current().unwrap().identity;
        slot.update(None, ms(10), &timing, &mut events);
        slot.advance(ms(10) + timing.duration(), &timing, &mut events);
        slot.update(Some(share), ms(5000), &timing, &mut events);
        let second = slot.current().unwrap().identity;
        assert_eq!(first.role, second.role);
        assert!(second.generation > first.generation);
    }
}
