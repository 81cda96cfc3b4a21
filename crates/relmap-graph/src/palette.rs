//! Tag color registry.
//!
//! Every distinct relation tag gets a stable color assigned on first
//! encounter, cycling through a fixed palette. The registry lives for the
//! whole session and is never reset, so a tag keeps its color no matter how
//! often filters toggle or the scene is rebuilt.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_tuple(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

/// The fixed tag palette, cycled in first-seen order.
pub const PALETTE: [Color; 8] = [
    Color::rgb(0xE6, 0x39, 0x46),
    Color::rgb(0x45, 0x7B, 0x9D),
    Color::rgb(0x2A, 0x9D, 0x8F),
    Color::rgb(0xF4, 0xA2, 0x61),
    Color::rgb(0x9C, 0x89, 0xB8),
    Color::rgb(0xF6, 0x7E, 0x7D),
    Color::rgb(0x6B, 0x70, 0x5C),
    Color::rgb(0xCB, 0x99, 0x7E),
];

#[derive(Debug, Default, Clone)]
pub struct TagPalette {
    assigned: HashMap<String, Color>,
}

impl TagPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `tag`, assigning `PALETTE[seen % len]` on first sight.
    /// Deterministic given call order.
    pub fn color_for(&mut self, tag: &str) -> Color {
        if let Some(color) = self.assigned.get(tag) {
            return *color;
        }
        let color = PALETTE[self.assigned.len() % PALETTE.len()];
        self.assigned.insert(tag.to_owned(), color);
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_lookups_are_stable() {
        let mut palette = TagPalette::new();
        let first = palette.color_for("knows");
        palette.color_for("owns");
        assert_eq!(palette.color_for("knows"), first);
    }

    #[test]
    fn nth_distinct_tag_gets_nth_palette_entry() {
        let mut palette = TagPalette::new();
        for i in 0..PALETTE.len() {
            assert_eq!(palette.color_for(&format!("tag{i}")), PALETTE[i]);
        }
        // Ninth distinct tag wraps back around.
        assert_eq!(palette.color_for("tag8"), PALETTE[0]);
    }

    #[test]
    fn assignment_depends_on_first_seen_order() {
        let mut forward = TagPalette::new();
        forward.color_for("a");
        let b_forward = forward.color_for("b");

        let mut reverse = TagPalette::new();
        reverse.color_for("b");
        assert_eq!(reverse.color_for("a"), b_forward);
    }
}
