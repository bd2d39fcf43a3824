//! Layout regions and screen anchors
//!
//! Three fixed regions. The full-screen camera fills the base layer; the two
//! corner tiles float above it at opposite corners. Anchors only compete for
//! space with anchors on the same layer.

use std::fmt;

/// Inset of the corner tiles from the viewport edge, in pixels
pub const CORNER_INSET: f32 = 16.0;
/// Side of the square assistant indicator, in pixels
pub const ASSISTANT_TILE_SIZE: f32 = 96.0;
/// Screen share PIP takes this fraction of the viewport width...
pub const PIP_WIDTH_FRACTION: f32 = 0.25;
/// ...capped at this width, in pixels
pub const PIP_MAX_WIDTH: f32 = 320.0;
/// Aspect ratio assumed for the PIP height
pub const PIP_ASPECT: f32 = 16.0 / 9.0;

/// One of the three layout regions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Region {
    FullScreen = 0,
    PictureInPicture = 1,
    AssistantCorner = 2,
}

impl Region {
    pub const ALL: [Region; 3] = [
        Region::FullScreen,
        Region::PictureInPicture,
        Region::AssistantCorner,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Screen anchor of this region in the given viewport
    pub fn anchor(self, viewport: Viewport) -> Anchor {
        match self {
            Region::FullScreen => Anchor {
                rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
                layer: Layer::Base,
            },
            Region::PictureInPicture => {
                let width = (viewport.width * PIP_WIDTH_FRACTION).min(PIP_MAX_WIDTH);
                let height = width / PIP_ASPECT;
                Anchor {
                    rect: Rect::new(
                        viewport.width - CORNER_INSET - width,
                        viewport.height - CORNER_INSET - height,
                        width,
                        height,
                    ),
                    layer: Layer::Floating,
                }
            }
            Region::AssistantCorner => Anchor {
                rect: Rect::new(
                    CORNER_INSET,
                    CORNER_INSET,
                    ASSISTANT_TILE_SIZE,
                    ASSISTANT_TILE_SIZE,
                ),
                layer: Layer::Floating,
            },
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::FullScreen => "full-screen",
            Region::PictureInPicture => "picture-in-picture",
            Region::AssistantCorner => "assistant-corner",
        };
        f.write_str(name)
    }
}

/// Stacking layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Full-viewport content
    Base,
    /// Corner tiles above the base layer
    Floating,
}

impl Layer {
    /// Stacking order used by the renderer
    pub fn z_index(&self) -> u8 {
        match self {
            Layer::Base => 10,
            Layer::Floating => 60,
        }
    }
}

/// Axis-aligned rectangle in viewport pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Interiors intersect (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Placement of a region on screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub rect: Rect,
    pub layer: Layer,
}

impl Anchor {
    /// Two anchors claim the same space when they share a layer and intersect
    pub fn overlaps(&self, other: &Anchor) -> bool {
        self.layer == other.layer && self.rect.intersects(&other.rect)
    }
}

/// Rendering surface size in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Smallest supported surface; below it the corner tiles would collide
    pub const MIN: Viewport = Viewport {
        width: 320.0,
        height: 240.0,
    };

    /// Create a viewport, clamped to `Viewport::MIN`
    pub fn new(width: f32, height: f32) -> Self {
        let width = if width.is_finite() { width } else { 0.0 };
        let height = if height.is_finite() { height } else { 0.0 };
        Viewport {
            width: width.max(Self::MIN.width),
            height: height.max(Self::MIN.height),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1280.0, 720.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_no_overlap(viewport: Viewport) {
        for (i, a) in Region::ALL.iter().enumerate() {
            for b in &Region::ALL[i + 1..] {
                let (aa, bb) = (a.anchor(viewport), b.anchor(viewport));
                assert!(!aa.overlaps(&bb), "{a} overlaps {b} in {viewport:?}");
            }
        }
    }

    #[test]
    fn test_default_viewport_anchors() {
        let viewport = Viewport::default();
        let pip = Region::PictureInPicture.anchor(viewport);
        assert_eq!(pip.rect.width, 320.0);
        assert_eq!(pip.rect.right(), 1280.0 - CORNER_INSET);
        assert_eq!(pip.rect.bottom(), 720.0 - CORNER_INSET);

        let assistant = Region::AssistantCorner.anchor(viewport);
        assert_eq!(assistant.rect, Rect::new(16.0, 16.0, 96.0, 96.0));
        assert_no_overlap(viewport);
    }

    #[test]
    fn test_viewport_clamps_to_min() {
        let viewport = Viewport::new(10.0, f32::NAN);
        assert_eq!(viewport, Viewport::MIN);
        assert_no_overlap(viewport);
    }

    #[test]
    fn test_corner_tiles_stay_inside_viewport() {
        let viewport = Viewport::MIN;
        let screen = Region::FullScreen.anchor(viewport).rect;
        assert!(screen.contains(&Region::PictureInPicture.anchor(viewport).rect));
        assert!(screen.contains(&Region::AssistantCorner.anchor(viewport).rect));
    }

    #[test]
    fn test_layers_stack_floating_above_base() {
        assert!(Layer::Floating.z_index() > Layer::Base.z_index());
    }

    proptest! {
        #[test]
        fn prop_regions_never_overlap(w in 0.0f32..8000.0, h in 0.0f32..8000.0) {
            assert_no_overlap(Viewport::new(w, h));
        }
    }
}
