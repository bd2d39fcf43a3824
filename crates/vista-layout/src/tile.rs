//! Tiles, phases and renderer-facing descriptions

use std::time::Duration;

use vista_core::{AgentState, Anchor, Region, TileIdentity, TileRole, TrackRef, TrackSignal};
use vista_time::SpringProfile;

/// What a tile displays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileContent {
    Camera(TrackSignal),
    ScreenShare(TrackSignal),
    AssistantAudio {
        signal: TrackSignal,
        state: AgentState,
    },
    AssistantVideo(TrackSignal),
}

impl TileContent {
    /// Logical role, which doubles as the payload kind
    pub fn role(&self) -> TileRole {
        match self {
            TileContent::Camera(_) => TileRole::CameraFullscreen,
            TileContent::ScreenShare(_) => TileRole::ScreenPip,
            TileContent::AssistantAudio { .. } => TileRole::AgentMinimized,
            TileContent::AssistantVideo(_) => TileRole::AvatarMinimized,
        }
    }

    pub fn signal(&self) -> &TrackSignal {
        match self {
            TileContent::Camera(signal)
            | TileContent::ScreenShare(signal)
            | TileContent::AssistantVideo(signal)
            | TileContent::AssistantAudio { signal, .. } => signal,
        }
    }

    pub fn agent_state(&self) -> Option<AgentState> {
        match self {
            TileContent::AssistantAudio { state, .. } => Some(*state),
            _ => None,
        }
    }
}

/// Transition phase with current visibility (scale and opacity, 0.0 - 1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionPhase {
    Entering { visibility: f32 },
    Steady,
    Exiting { visibility: f32 },
}

impl TransitionPhase {
    pub fn visibility(&self) -> f32 {
        match self {
            TransitionPhase::Entering { visibility } | TransitionPhase::Exiting { visibility } => {
                *visibility
            }
            TransitionPhase::Steady => 1.0,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        !matches!(self, TransitionPhase::Steady)
    }
}

/// Everything the renderer needs for one tile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileDescription {
    pub identity: TileIdentity,
    pub region: Region,
    pub anchor: Anchor,
    pub kind: TileRole,
    pub track: TrackRef,
    /// False for a muted assistant video (shown frozen)
    pub enabled: bool,
    /// Only set on the audio indicator
    pub agent_state: Option<AgentState>,
    pub phase: TransitionPhase,
}

/// Spring plus its cached settle duration
#[derive(Clone, Copy, Debug)]
pub struct TransitionTiming {
    spring: SpringProfile,
    settle: Duration,
}

impl TransitionTiming {
    pub fn new(spring: SpringProfile) -> Self {
        TransitionTiming {
            spring,
            settle: spring.settle_duration(),
        }
    }

    pub fn spring(&self) -> &SpringProfile {
        &self.spring
    }

    /// How long an enter or exit lasts
    pub fn duration(&self) -> Duration {
        self.settle
    }

    /// Progress in [0, 1]; exactly 1 once settled
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed >= self.settle {
            1.0
        } else {
            self.spring.progress(elapsed).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.settle
    }
}

impl Default for TransitionTiming {
    fn default() -> Self {
        TransitionTiming::new(SpringProfile::default())
    }
}
