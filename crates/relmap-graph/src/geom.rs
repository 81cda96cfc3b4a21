//! Geometry primitives for edge routing.
//!
//! Everything here operates on untransformed coordinates: the viewport
//! transform is applied at paint time only and never reaches this module.

use serde::{Deserialize, Serialize};

/// Tolerance admitted when checking that an intersection lies within a
/// segment's bounding range. Lets boundary grazes count as hits.
pub const SEGMENT_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector perpendicular to `self` (rotated -90 degrees). Chords
    /// shorter than the length floor use 1.0 so the result is never NaN.
    pub fn perpendicular(self) -> Self {
        let len = self.length().max(1.0);
        Self::new(-self.y / len, self.x / len)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle given by its corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = Vec2::new(size.x / 2.0, size.y / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Grow the rectangle outward by `pad` on every side.
    pub fn expand(&self, pad: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x - pad, self.min.y - pad),
            max: Vec2::new(self.max.x + pad, self.max.y + pad),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// The four sides as segments, in the fixed order the clipper checks
    /// them: top, bottom, left, right.
    fn sides(&self) -> [(Vec2, Vec2); 4] {
        let (l, t, r, b) = (self.min.x, self.min.y, self.max.x, self.max.y);
        [
            (Vec2::new(l, t), Vec2::new(r, t)),
            (Vec2::new(l, b), Vec2::new(r, b)),
            (Vec2::new(l, t), Vec2::new(l, b)),
            (Vec2::new(r, t), Vec2::new(r, b)),
        ]
    }
}

/// Intersection point of two line segments, or `None` when the lines are
/// parallel or the crossing lies outside either segment's bounding range
/// (within [`SEGMENT_TOLERANCE`]).
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let denom = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if denom == 0.0 {
        return None;
    }

    let a_cross = a1.x * a2.y - a1.y * a2.x;
    let b_cross = b1.x * b2.y - b1.y * b2.x;
    let px = (a_cross * (b1.x - b2.x) - (a1.x - a2.x) * b_cross) / denom;
    let py = (a_cross * (b1.y - b2.y) - (a1.y - a2.y) * b_cross) / denom;

    let within = |v: f32, lo: f32, hi: f32| {
        v >= lo.min(hi) - SEGMENT_TOLERANCE && v <= lo.max(hi) + SEGMENT_TOLERANCE
    };
    if !within(px, a1.x, a2.x)
        || !within(px, b1.x, b2.x)
        || !within(py, a1.y, a2.y)
        || !within(py, b1.y, b2.y)
    {
        return None;
    }
    Some(Vec2::new(px, py))
}

/// Clip the segment `from -> to` against `rect`, returning where it first
/// crosses one of the four sides (checked top, bottom, left, right).
///
/// Falls back to `to` unchanged when no side is crossed, so the caller
/// always gets a usable point even for zero-length segments or endpoints
/// contained inside the rectangle. See DESIGN.md for the overlap caveat.
pub fn clip_segment_to_rect(from: Vec2, to: Vec2, rect: Rect) -> Vec2 {
    for (s1, s2) in rect.sides() {
        if let Some(hit) = segment_intersection(from, to, s1, s2) {
            return hit;
        }
    }
    to
}

/// Quadratic Bezier curve through a single control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadBezier {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl QuadBezier {
    /// Sample the curve at parameter t in [0, 1].
    pub fn sample(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        let x = mt * mt * self.start.x + 2.0 * mt * t * self.control.x + t * t * self.end.x;
        let y = mt * mt * self.start.y + 2.0 * mt * t * self.control.y + t * t * self.end.y;
        Vec2::new(x, y)
    }
}

/// The drawable path of one edge. Curvature below 1.0 collapses to a
/// straight line; anything else bows through a perpendicular control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgePath {
    Line { start: Vec2, end: Vec2 },
    Quad(QuadBezier),
}

impl EdgePath {
    pub fn between(start: Vec2, end: Vec2, curvature: f32) -> Self {
        if curvature.abs() < 1.0 {
            return Self::Line { start, end };
        }
        let mid = Vec2::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
        let control = mid + (end - start).perpendicular() * curvature;
        Self::Quad(QuadBezier {
            start,
            control,
            end,
        })
    }

    pub fn start(&self) -> Vec2 {
        match self {
            Self::Line { start, .. } => *start,
            Self::Quad(q) => q.start,
        }
    }

    pub fn end(&self) -> Vec2 {
        match self {
            Self::Line { end, .. } => *end,
            Self::Quad(q) => q.end,
        }
    }

    /// Point at parameter t; the label anchor is `point_at(0.5)`, the visual
    /// midpoint of the curve rather than the chord.
    pub fn point_at(&self, t: f32) -> Vec2 {
        match self {
            Self::Line { start, end } => *start + (*end - *start) * t,
            Self::Quad(q) => q.sample(t),
        }
    }

    /// Direction of travel at the terminal endpoint, for arrow heads.
    pub fn terminal_direction(&self) -> Vec2 {
        let (tail, tip) = match self {
            Self::Line { start, end } => (*start, *end),
            Self::Quad(q) => (q.control, q.end),
        };
        let d = tip - tail;
        let len = d.length().max(1.0);
        Vec2::new(d.x / len, d.y / len)
    }
}
