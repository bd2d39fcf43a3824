//! Layout Composition Controller
//!
//! Owns the three region slots. On every signal change it derives the new
//! layout and pushes each region toward its target; between changes it is
//! advanced on frame ticks so transitions can finish.

use tracing::{debug, trace};
use vista_core::{AgentState, FrameTime, Region, SignalSet, Viewport};
use vista_time::SpringProfile;

use crate::{
    derive_layout, AssistantIndicator, LayoutState, RegionSlot, SlotState, TileContent,
    TileDescription, TransitionEvent, TransitionPhase, TransitionTiming,
};

/// Controller configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Enter/exit spring
    pub spring: SpringProfile,
    /// Rendering surface
    pub viewport: Viewport,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            spring: SpringProfile::default(),
            viewport: Viewport::default(),
        }
    }
}

impl LayoutConfig {
    /// Shorter transitions for reduced-motion preferences
    pub fn reduced_motion() -> Self {
        LayoutConfig {
            spring: SpringProfile::snappy(),
            ..LayoutConfig::default()
        }
    }
}

/// Renderer-facing frame
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    pub layout: LayoutState,
    /// Base layer first, departing tiles before current ones within a region
    pub tiles: Vec<TileDescription>,
    /// Decorative camera overlay shown
    pub overlay_visible: bool,
}

impl Composition {
    /// Current (non-departing) tile of a region
    pub fn tile(&self, region: Region) -> Option<&TileDescription> {
        self.tiles
            .iter()
            .rev()
            .find(|t| t.region == region && !matches!(t.phase, TransitionPhase::Exiting { .. }))
    }
}

/// Target tile content per region
fn targets(layout: &LayoutState, agent_state: AgentState) -> [Option<TileContent>; 3] {
    let assistant = match layout.assistant_indicator {
        AssistantIndicator::None => None,
        AssistantIndicator::AudioOnly(signal) => Some(TileContent::AssistantAudio {
            signal,
            state: agent_state,
        }),
        AssistantIndicator::Video(signal) => Some(TileContent::AssistantVideo(signal)),
    };
    [
        layout.full_screen_camera.map(TileContent::Camera),
        layout.picture_in_picture.map(TileContent::ScreenShare),
        assistant,
    ]
}

pub struct CompositionController {
    config: LayoutConfig,
    timing: TransitionTiming,
    slots: [RegionSlot; 3],
    layout: LayoutState,
    last_update: FrameTime,
}

impl CompositionController {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        CompositionController {
            config,
            timing: TransitionTiming::new(config.spring),
            slots: Region::ALL.map(RegionSlot::new),
            layout: LayoutState::default(),
            last_update: FrameTime::ZERO,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn timing(&self) -> &TransitionTiming {
        &self.timing
    }

    /// Latest derived layout
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn slot(&self, region: Region) -> &RegionSlot {
        &self.slots[region.index()]
    }

    pub fn slot_state(&self, region: Region) -> SlotState {
        self.slot(region).state()
    }

    /// The camera overlay follows full-screen occupancy, not the camera
    /// tile's exit animation
    pub fn overlay_visible(&self) -> bool {
        self.layout.full_screen_camera.is_some()
    }

    /// Any tile mid-transition
    pub fn is_animating(&self) -> bool {
        self.slots.iter().any(RegionSlot::is_animating)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
    }

    /// Recompute the layout for a new signal set
    pub fn apply(&mut self, signals: &SignalSet, now: FrameTime) -> Vec<TransitionEvent> {
        let now = self.clamp_time(now);
        let mut events = Vec::new();
        // Finish what is already due so a late re-entry is not mistaken for
        // a resume
        for slot in &mut self.slots {
            slot.advance(now, &self.timing, &mut events);
        }

        self.layout = derive_layout(signals);
        trace!(layout = ?self.layout, ?now, "layout derived");

        for (slot, target) in self
            .slots
            .iter_mut()
            .zip(targets(&self.layout, signals.agent_state))
        {
            slot.update(target, now, &self.timing, &mut events);
        }
        log_events(&events);
        events
    }

    /// Complete transitions due by `now`
    pub fn advance(&mut self, now: FrameTime) -> Vec<TransitionEvent> {
        let now = self.clamp_time(now);
        let mut events = Vec::new();
        for slot in &mut self.slots {
            slot.advance(now, &self.timing, &mut events);
        }
        log_events(&events);
        events
    }

    /// Renderer-facing snapshot at `now`
    pub fn composition(&self, now: FrameTime) -> Composition {
        let now = now.max(self.last_update);
        let tiles = self
            .slots
            .iter()
            .flat_map(|slot| {
                let anchor = slot.region().anchor(self.config.viewport);
                slot.tiles().map(move |tile| TileDescription {
                    identity: tile.identity,
                    region: slot.region(),
                    anchor,
                    kind: tile.role(),
                    track: tile.content.signal().reference,
                    enabled: tile.content.signal().enabled,
                    agent_state: tile.content.agent_state(),
                    phase: tile.phase(now, &self.timing),
                })
            })
            .collect();
        Composition {
            layout: self.layout,
            tiles,
            overlay_visible: self.overlay_visible(),
        }
    }

    /// Frame time never runs backwards inside the controller
    fn clamp_time(&mut self, now: FrameTime) -> FrameTime {
        self.last_update = self.last_update.max(now);
        self.last_update
    }
}

impl Default for CompositionController {
    fn default() -> Self {
        Self::new()
    }
}

fn log_events(events: &[TransitionEvent]) {
    for event in events {
        debug!(
            region = %event.region,
            tile = %event.identity,
            kind = ?event.kind,
            "tile transition"
        );
    }
}
