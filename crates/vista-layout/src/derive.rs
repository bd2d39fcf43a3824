//! Layout derivation
//!
//! Each region is decided on its own from the current signals:
//! - full screen: local camera, only when enabled
//! - picture-in-picture: screen share, only when enabled
//! - assistant corner: video when present (muted or not), else audio when
//!   present, else nothing
//!
//! No history, no placeholders.

use vista_core::{Region, SignalSet, TrackSignal};

/// What the assistant corner shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssistantIndicator {
    #[default]
    None,
    /// Audio-reactive glyph
    AudioOnly(TrackSignal),
    /// Live (or frozen, if muted) video thumbnail
    Video(TrackSignal),
}

impl AssistantIndicator {
    pub fn is_none(&self) -> bool {
        matches!(self, AssistantIndicator::None)
    }

    pub fn signal(&self) -> Option<&TrackSignal> {
        match self {
            AssistantIndicator::None => None,
            AssistantIndicator::AudioOnly(signal) | AssistantIndicator::Video(signal) => Some(signal),
        }
    }
}

/// The derived, discrete layout at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutState {
    pub full_screen_camera: Option<TrackSignal>,
    pub picture_in_picture: Option<TrackSignal>,
    pub assistant_indicator: AssistantIndicator,
}

impl LayoutState {
    /// Region has something to show
    pub fn is_occupied(&self, region: Region) -> bool {
        match region {
            Region::FullScreen => self.full_screen_camera.is_some(),
            Region::PictureInPicture => self.picture_in_picture.is_some(),
            Region::AssistantCorner => !self.assistant_indicator.is_none(),
        }
    }

    pub fn occupied_regions(&self) -> impl Iterator<Item = Region> + '_ {
        Region::ALL.into_iter().filter(|r| self.is_occupied(*r))
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_regions().next().is_none()
    }
}

/// Derive the layout from the current signals
pub fn derive_layout(signals: &SignalSet) -> LayoutState {
    let enabled = |signal: Option<&TrackSignal>| signal.filter(|s| s.enabled).copied();

    // Presence, not enablement, decides the assistant corner. A muted avatar
    // still beats the generic glyph.
    let assistant_indicator = match (signals.assistant_video(), signals.assistant_audio()) {
        (Some(video), _) if video.present => AssistantIndicator::Video(*video),
        (_, Some(audio)) if audio.present => AssistantIndicator::AudioOnly(*audio),
        _ => AssistantIndicator::None,
    };

    LayoutState {
        full_screen_camera: enabled(signals.camera()),
        picture_in_picture: enabled(signals.screen_share()),
        assistant_indicator,
    }
}
