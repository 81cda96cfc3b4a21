//! Scene building: the pure redraw step.
//!
//! `Scene::build` turns (relations, node bounds, filter) into a flat list of
//! draw instructions. It has no rendering surface and no transform in it,
//! so building twice with the same inputs yields identical output and the
//! whole redraw path is testable headless.

use crate::filter::ViewFilter;
use crate::geom::{EdgePath, Vec2};
use crate::palette::{Color, TagPalette};
use crate::route::{NodeBoundsMap, clip_endpoints, sibling_curvatures, visible_relations};
use relmap_core::{EntityId, Relation};

/// Draw instructions for one visible edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeVisual {
    pub from: EntityId,
    pub to: EntityId,
    pub tag: String,
    pub label: String,
    pub color: Color,
    pub path: EdgePath,
    /// Label anchor: the point on the path at t = 0.5.
    pub label_pos: Vec2,
    /// Unit direction of travel at the arrow tip.
    pub arrow_dir: Vec2,
}

/// One fully computed frame of edge content. The surface clears and redraws
/// all of it on every rebuild; nothing is incremental.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub edges: Vec<EdgeVisual>,
}

impl Scene {
    pub fn build(
        relations: &[Relation],
        bounds: &NodeBoundsMap,
        filter: &ViewFilter,
        palette: &mut TagPalette,
    ) -> Self {
        let visible = visible_relations(relations, filter, bounds);
        let curvatures = sibling_curvatures(&visible);

        let edges = visible
            .iter()
            .zip(curvatures)
            .map(|(relation, curvature)| {
                // Bounds are guaranteed present for visible relations.
                let from_rect = bounds[&relation.from];
                let to_rect = bounds[&relation.to];
                let (start, end) = clip_endpoints(from_rect, to_rect);
                let path = EdgePath::between(start, end, curvature);

                EdgeVisual {
                    from: relation.from.clone(),
                    to: relation.to.clone(),
                    tag: relation.tag.clone(),
                    label: relation.label.clone(),
                    color: palette.color_for(&relation.tag),
                    path,
                    label_pos: path.point_at(0.5),
                    arrow_dir: path.terminal_direction(),
                }
            })
            .collect();

        Self { edges }
    }
}
