//! Viewport transform and pan/zoom interaction state.
//!
//! The transform is presentation-only: it maps untransformed world
//! coordinates to the screen at paint time and is never folded into the
//! routing geometry.

use crate::geom::Vec2;
use serde::{Deserialize, Serialize};

pub const SCALE_STEP: f32 = 0.1;
pub const SCALE_MIN: f32 = 0.5;
pub const SCALE_MAX: f32 = 3.0;

/// Affine viewport transform: `screen = world * scale + translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub translation: Vec2,
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.translation
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.translation.x) / self.scale,
            (screen.y - self.translation.y) / self.scale,
        )
    }

    /// One wheel notch of zoom anchored at `cursor` (in screen space,
    /// relative to the canvas origin). The translation is recentered so the
    /// world point under the cursor stays put. Returns false when clamping
    /// leaves the scale unchanged.
    pub fn zoom_around(&mut self, cursor: Vec2, zoom_in: bool) -> bool {
        let step = if zoom_in { SCALE_STEP } else { -SCALE_STEP };
        let new_scale = (self.scale + step).clamp(SCALE_MIN, SCALE_MAX);
        if new_scale == self.scale {
            return false;
        }

        let factor = new_scale / self.scale;
        self.translation = cursor - (cursor - self.translation) * factor;
        self.scale = new_scale;
        true
    }
}

/// Two-state pan machine. A press on empty canvas grabs the transform;
/// drags reposition it; release (or pointer loss) returns to idle. Presses
/// over interactive regions never reach [`PanState::press`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PanState {
    #[default]
    Idle,
    Panning {
        /// Pointer position minus the translation at press time.
        grab: Vec2,
    },
}

impl PanState {
    pub fn press(&mut self, pointer: Vec2, viewport: &Viewport) {
        *self = Self::Panning {
            grab: pointer - viewport.translation,
        };
    }

    /// New translation for a pointer move, or `None` while idle.
    pub fn drag(&self, pointer: Vec2) -> Option<Vec2> {
        match self {
            Self::Idle => None,
            Self::Panning { grab } => Some(pointer - *grab),
        }
    }

    pub fn release(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
