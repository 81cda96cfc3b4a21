//! Headless geometry and view state for the relation map.
//!
//! Everything in this crate operates on plain numeric coordinates so the
//! routing, filtering, and viewport logic can be tested without a GUI. The
//! egui shell in `relmap-gui` supplies node bounds and consumes the built
//! [`Scene`].

pub mod filter;
pub mod geom;
pub mod palette;
pub mod route;
pub mod scene;
pub mod view;

pub use filter::{Highlight, ViewFilter};
pub use geom::{EdgePath, QuadBezier, Rect, Vec2, clip_segment_to_rect, segment_intersection};
pub use palette::{Color, PALETTE, TagPalette};
pub use route::{NODE_CLIP_PAD, NodeBoundsMap, SIBLING_SPACING};
pub use scene::{EdgeVisual, Scene};
pub use view::{PanState, SCALE_MAX, SCALE_MIN, SCALE_STEP, Viewport};
