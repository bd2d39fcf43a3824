//! Identity types for Vista
//!
//! Participant and track identifiers are opaque 64-bit handles handed to us by
//! the media layer. Tile identities are minted locally by the layout controller.

use std::fmt;

/// Participant identity within a media session
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    pub const ZERO: ParticipantId = ParticipantId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        ParticipantId(id)
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Participant({:016x})", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Track server identifier - unique per publication
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TrackSid(pub u64);

impl TrackSid {
    #[inline]
    pub fn new(id: u64) -> Self {
        TrackSid(id)
    }
}

impl fmt::Debug for TrackSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TR_{:012x}", self.0)
    }
}

impl fmt::Display for TrackSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TR_{:012x}", self.0)
    }
}

/// Logical role of a tile. Each role maps to one layout key on the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileRole {
    /// Local camera occupying the whole viewport
    CameraFullscreen,
    /// Screen share floating in the bottom-right corner
    ScreenPip,
    /// Audio-reactive assistant glyph in the top-left corner
    AgentMinimized,
    /// Assistant video thumbnail in the top-left corner
    AvatarMinimized,
}

impl TileRole {
    /// Renderer layout key
    pub fn key(&self) -> &'static str {
        match self {
            Self::CameraFullscreen => "camera-fullscreen",
            Self::ScreenPip => "screen-pip",
            Self::AgentMinimized => "agent-minimized",
            Self::AvatarMinimized => "avatar-minimized",
        }
    }
}

impl fmt::Display for TileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Stable correlation key for one logical tile.
///
/// The generation distinguishes successive activations of the same role:
/// a role that goes away and comes back gets a new generation, so the
/// renderer animates a fresh entry instead of morphing the old node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIdentity {
    pub role: TileRole,
    pub generation: u64,
}

impl TileIdentity {
    #[inline]
    pub fn new(role: TileRole, generation: u64) -> Self {
        TileIdentity { role, generation }
    }
}

impl fmt::Debug for TileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}#{})", self.role.key(), self.generation)
    }
}

impl fmt::Display for TileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.role.key(), self.generation)
    }
}
