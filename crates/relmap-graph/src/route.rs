//! Edge routing: which relations are visible, where their lines start and
//! end, and how sibling edges fan out.

use crate::filter::ViewFilter;
use crate::geom::{Rect, Vec2, clip_segment_to_rect};
use relmap_core::{EntityId, Relation};
use std::collections::HashMap;

/// Outward padding added to a node's box before clipping, so edges stop
/// just short of the border instead of touching it.
pub const NODE_CLIP_PAD: f32 = 3.0;

/// Perpendicular spacing between sibling curves, in untransformed units.
pub const SIBLING_SPACING: f32 = 30.0;

/// Rendered bounds of each node in untransformed space, keyed by entity id.
/// The GUI fills this from resolved positions and measured widget sizes; in
/// tests it is built by hand.
pub type NodeBoundsMap = HashMap<EntityId, Rect>;

/// Relations that survive the tag and selection filters and whose endpoints
/// both have rendered bounds. Dangling references are skipped silently.
pub fn visible_relations<'a>(
    relations: &'a [Relation],
    filter: &ViewFilter,
    bounds: &NodeBoundsMap,
) -> Vec<&'a Relation> {
    relations
        .iter()
        .filter(|r| {
            if !filter.passes(r) {
                return false;
            }
            let resolved = bounds.contains_key(&r.from) && bounds.contains_key(&r.to);
            if !resolved {
                tracing::debug!(from = %r.from, to = %r.to, "skipping dangling relation");
            }
            resolved
        })
        .collect()
}

/// Curvature per visible relation, index-aligned with the input.
///
/// Siblings (relations over the same unordered pair) fan out symmetrically:
/// sibling `i` of `n` gets `(i - (n-1)/2) * SIBLING_SPACING`, negated when
/// `from > to` so both query directions draw the same fan. A lone relation
/// stays straight.
pub fn sibling_curvatures(visible: &[&Relation]) -> Vec<f32> {
    let mut totals: HashMap<(&EntityId, &EntityId), usize> = HashMap::new();
    for r in visible {
        *totals.entry(r.pair_key()).or_default() += 1;
    }

    let mut seen: HashMap<(&EntityId, &EntityId), usize> = HashMap::new();
    visible
        .iter()
        .map(|r| {
            let key = r.pair_key();
            let total = totals[&key];
            let index = seen.entry(key).or_default();
            let i = *index;
            *index += 1;

            if total <= 1 {
                return 0.0;
            }
            let mut curvature = (i as f32 - (total as f32 - 1.0) / 2.0) * SIBLING_SPACING;
            if r.from > r.to {
                curvature = -curvature;
            }
            curvature
        })
        .collect()
}

/// Clip the center-to-center line of a relation against both padded node
/// boxes. The start point is where the line from the target's center toward
/// the source's center crosses the source's box, and symmetrically for the
/// end point.
pub fn clip_endpoints(from_rect: Rect, to_rect: Rect) -> (Vec2, Vec2) {
    let from_center = from_rect.center();
    let to_center = to_rect.center();
    let start = clip_segment_to_rect(to_center, from_center, from_rect.expand(NODE_CLIP_PAD));
    let end = clip_segment_to_rect(from_center, to_center, to_rect.expand(NODE_CLIP_PAD));
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(from: &str, to: &str, tag: &str) -> Relation {
        Relation {
            from: from.into(),
            to: to.into(),
            tag: tag.into(),
            label: String::new(),
        }
    }

    fn bounds(entries: &[(&str, f32, f32)]) -> NodeBoundsMap {
        entries
            .iter()
            .map(|(id, x, y)| {
                (
                    EntityId::from(*id),
                    Rect::from_center_size(Vec2::new(*x, *y), Vec2::new(20.0, 20.0)),
                )
            })
            .collect()
    }

    #[test]
    fn dangling_relations_never_render() {
        let relations = vec![rel("a", "b", "t"), rel("a", "ghost", "t")];
        let bounds = bounds(&[("a", 0.0, 0.0), ("b", 100.0, 0.0)]);
        let visible = visible_relations(&relations, &ViewFilter::new(), &bounds);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].to, EntityId::from("b"));
    }

    #[test]
    fn lone_relation_is_straight() {
        let relations = vec![rel("a", "b", "t")];
        let visible: Vec<&Relation> = relations.iter().collect();
        assert_eq!(sibling_curvatures(&visible), vec![0.0]);
    }

    #[test]
    fn two_siblings_mirror_across_the_chord() {
        let relations = vec![rel("a", "b", "t"), rel("a", "b", "u")];
        let visible: Vec<&Relation> = relations.iter().collect();
        assert_eq!(sibling_curvatures(&visible), vec![-15.0, 15.0]);
    }

    #[test]
    fn fan_is_direction_invariant() {
        // Same logical pair queried from the other direction must produce
        // the same symmetric set of curvatures with signs flipped per edge.
        let forward = vec![rel("a", "b", "t"), rel("a", "b", "u")];
        let backward = vec![rel("b", "a", "t"), rel("b", "a", "u")];
        let fwd: Vec<&Relation> = forward.iter().collect();
        let bwd: Vec<&Relation> = backward.iter().collect();
        assert_eq!(sibling_curvatures(&fwd), vec![-15.0, 15.0]);
        assert_eq!(sibling_curvatures(&bwd), vec![15.0, -15.0]);
    }

    #[test]
    fn odd_fan_keeps_a_straight_middle() {
        let relations = vec![rel("a", "b", "t"), rel("a", "b", "u"), rel("a", "b", "v")];
        let visible: Vec<&Relation> = relations.iter().collect();
        assert_eq!(sibling_curvatures(&visible), vec![-30.0, 0.0, 30.0]);
    }

    #[test]
    fn mixed_pairs_fan_independently() {
        let relations = vec![
            rel("a", "b", "t"),
            rel("c", "d", "t"),
            rel("b", "a", "u"),
        ];
        let visible: Vec<&Relation> = relations.iter().collect();
        let curvatures = sibling_curvatures(&visible);
        // a|b pair has two siblings, c|d is alone.
        assert_eq!(curvatures[0], -15.0);
        assert_eq!(curvatures[1], 0.0);
        assert_eq!(curvatures[2], -15.0); // i=1 flipped because b > a
    }

    #[test]
    fn clip_stops_at_padded_boxes() {
        let a = Rect::from_center_size(Vec2::ZERO, Vec2::new(20.0, 20.0));
        let b = Rect::from_center_size(Vec2::new(100.0, 0.0), Vec2::new(20.0, 20.0));
        let (start, end) = clip_endpoints(a, b);
        assert!((start.x - 13.0).abs() < 1e-3 && start.y.abs() < 1e-3);
        assert!((end.x - 87.0).abs() < 1e-3 && end.y.abs() < 1e-3);
    }

    #[test]
    fn overlapping_boxes_fall_back_to_centers() {
        let a = Rect::from_center_size(Vec2::ZERO, Vec2::new(40.0, 40.0));
        let b = Rect::from_center_size(Vec2::new(5.0, 0.0), Vec2::new(40.0, 40.0));
        let (start, end) = clip_endpoints(a, b);
        // Each center sits inside the other's padded box, so the clip falls
        // back to the segment's far endpoint (the respective center).
        assert_eq!(start, a.center());
        assert_eq!(end, b.center());
    }
}
