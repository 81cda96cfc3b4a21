//! The map canvas: node boxes, edge curves, and pan/zoom input.
//!
//! All geometry arrives in untransformed coordinates; this module applies
//! the viewport transform only while converting to screen positions for the
//! painter, and feeds raw pointer input back into the view state.

use egui::epaint::QuadraticBezierShape;
use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke};
use relmap_core::{EntityId, GraphData, PosValue};
use relmap_graph::{
    Color, EdgePath, Highlight, NodeBoundsMap, PanState, Rect as WorldRect, Scene, Vec2 as WorldVec,
    ViewFilter, Viewport,
};
use std::collections::HashMap;

const NODE_FONT_SIZE: f32 = 13.0;
const EDGE_FONT_SIZE: f32 = 13.0;
const EDGE_STROKE_WIDTH: f32 = 2.0;
const NODE_PADDING_X: f32 = 10.0;
const NODE_PADDING_Y: f32 = 6.0;
const NODE_CORNER_RADIUS: f32 = 6.0;
const ARROW_LENGTH: f32 = 9.0;
const ARROW_HALF_WIDTH: f32 = 4.0;

fn to_color32(c: Color) -> Color32 {
    let (r, g, b, a) = c.to_tuple();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn world_to_screen(origin: Pos2, viewport: &Viewport, world: WorldVec) -> Pos2 {
    let v = viewport.to_screen(world);
    Pos2::new(origin.x + v.x, origin.y + v.y)
}

fn node_screen_rect(origin: Pos2, viewport: &Viewport, world: &WorldRect) -> egui::Rect {
    egui::Rect::from_min_max(
        world_to_screen(origin, viewport, world.min),
        world_to_screen(origin, viewport, world.max),
    )
}

/// One reusable arrow-head marker per distinct edge color, mirroring the
/// original's per-color SVG marker definitions: the base triangle is built
/// once and reused for every edge of that color.
#[derive(Default)]
pub struct MarkerCache {
    markers: HashMap<Color, ArrowMarker>,
}

pub struct ArrowMarker {
    fill: Color32,
    /// Triangle in unit space: tip at the origin, pointing along +x.
    base: [egui::Vec2; 3],
}

impl MarkerCache {
    fn marker_for(&mut self, color: Color) -> &ArrowMarker {
        self.markers.entry(color).or_insert_with(|| ArrowMarker {
            fill: to_color32(color),
            base: [
                egui::vec2(0.0, 0.0),
                egui::vec2(-ARROW_LENGTH, -ARROW_HALF_WIDTH),
                egui::vec2(-ARROW_LENGTH, ARROW_HALF_WIDTH),
            ],
        })
    }
}

/// What the canvas reports back to the app after a frame.
pub struct CanvasResponse {
    pub clicked_entity: Option<EntityId>,
}

pub struct GraphCanvas {
    markers: MarkerCache,
}

impl GraphCanvas {
    pub fn new() -> Self {
        Self {
            markers: MarkerCache::default(),
        }
    }

    /// Node bounds in untransformed space: centers from the resolved
    /// position descriptors, sizes from the measured label galleys plus
    /// padding. Independent of the viewport transform.
    pub fn measure_bounds(
        ui: &egui::Ui,
        data: &GraphData,
        container: egui::Vec2,
    ) -> NodeBoundsMap {
        let font = FontId::proportional(NODE_FONT_SIZE);
        data.entities
            .iter()
            .map(|entity| {
                let resolve = |pos: &Option<PosValue>, extent: f32| {
                    pos.as_ref().map_or(0.0, |p| p.resolve(extent))
                };
                let center = WorldVec::new(
                    resolve(&entity.x, container.x),
                    resolve(&entity.y, container.y),
                );
                let text_size = ui
                    .painter()
                    .layout_no_wrap(entity.label.clone(), font.clone(), Color32::WHITE)
                    .size();
                let size = WorldVec::new(
                    text_size.x + 2.0 * NODE_PADDING_X,
                    text_size.y + 2.0 * NODE_PADDING_Y,
                );
                (entity.id.clone(), WorldRect::from_center_size(center, size))
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        data: &GraphData,
        bounds: &NodeBoundsMap,
        scene: &Scene,
        filter: &ViewFilter,
        viewport: &mut Viewport,
        pan: &mut PanState,
    ) -> CanvasResponse {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let origin = rect.min;

        painter.rect_filled(rect, 0.0, Color32::from_gray(24));

        // Pointer position relative to the canvas origin, for zoom and pan.
        let canvas_pointer = |pos: Pos2| WorldVec::new(pos.x - origin.x, pos.y - origin.y);

        // Wheel zoom, one fixed step per event, anchored at the cursor.
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if response.hovered() && scroll != 0.0 {
            if let Some(pointer) = response.hover_pos() {
                viewport.zoom_around(canvas_pointer(pointer), scroll > 0.0);
            }
        }

        let pointer_over_node = response.hover_pos().is_some_and(|pointer| {
            data.entities.iter().any(|entity| {
                bounds
                    .get(&entity.id)
                    .is_some_and(|world| node_screen_rect(origin, viewport, world).contains(pointer))
            })
        });

        // Background pan. Presses over nodes never start a pan; egui keeps
        // delivering drag events after the pointer leaves the canvas, which
        // matches the original's document-scoped move/up listeners.
        if response.drag_started() && !pointer_over_node {
            if let Some(pointer) = response.interact_pointer_pos() {
                pan.press(canvas_pointer(pointer), viewport);
            }
        }
        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                if let Some(translation) = pan.drag(canvas_pointer(pointer)) {
                    viewport.translation = translation;
                }
            }
        }
        if response.drag_stopped() {
            pan.release();
        }

        if pan.is_panning() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() && !pointer_over_node {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }

        self.paint_edges(&painter, scene, viewport, origin);

        let clicked_entity = self.paint_nodes(ui, &painter, data, bounds, filter, viewport, origin);

        CanvasResponse { clicked_entity }
    }

    fn paint_edges(
        &mut self,
        painter: &egui::Painter,
        scene: &Scene,
        viewport: &Viewport,
        origin: Pos2,
    ) {
        let to_screen = |world: WorldVec| world_to_screen(origin, viewport, world);
        let scale = viewport.scale;

        for edge in &scene.edges {
            let color = to_color32(edge.color);
            let stroke = Stroke::new(EDGE_STROKE_WIDTH * scale, color);

            match edge.path {
                EdgePath::Line { start, end } => {
                    painter.line_segment([to_screen(start), to_screen(end)], stroke);
                }
                EdgePath::Quad(q) => {
                    let shape = QuadraticBezierShape::from_points_stroke(
                        [to_screen(q.start), to_screen(q.control), to_screen(q.end)],
                        false,
                        Color32::TRANSPARENT,
                        stroke,
                    );
                    painter.add(shape);
                }
            }

            // Arrow head at the terminal endpoint, from the per-color marker.
            let marker = self.markers.marker_for(edge.color);
            let tip = to_screen(edge.path.end());
            let angle = edge.arrow_dir.y.atan2(edge.arrow_dir.x);
            let (sin, cos) = angle.sin_cos();
            let points = marker
                .base
                .iter()
                .map(|p| {
                    let rotated = egui::vec2(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
                    tip + rotated * scale
                })
                .collect::<Vec<_>>();
            painter.add(Shape::convex_polygon(points, marker.fill, Stroke::NONE));

            if !edge.label.is_empty() {
                painter.text(
                    to_screen(edge.label_pos),
                    Align2::CENTER_CENTER,
                    &edge.label,
                    FontId::proportional(EDGE_FONT_SIZE * scale),
                    color,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_nodes(
        &self,
        ui: &mut egui::Ui,
        painter: &egui::Painter,
        data: &GraphData,
        bounds: &NodeBoundsMap,
        filter: &ViewFilter,
        viewport: &Viewport,
        origin: Pos2,
    ) -> Option<EntityId> {
        let mut clicked = None;
        let scale = viewport.scale;

        for entity in &data.entities {
            let Some(world) = bounds.get(&entity.id) else {
                continue;
            };
            let screen_rect = node_screen_rect(origin, viewport, world);

            let (fill, stroke_color, text_color) = match filter.highlight(&entity.id) {
                Highlight::Selected => (
                    Color32::from_rgb(66, 66, 40),
                    Color32::from_rgb(255, 200, 100),
                    Color32::WHITE,
                ),
                Highlight::Dimmed => (
                    Color32::from_gray(40),
                    Color32::from_gray(60),
                    Color32::from_gray(110),
                ),
                Highlight::Normal => (
                    Color32::from_gray(48),
                    Color32::from_gray(100),
                    Color32::from_gray(230),
                ),
            };

            painter.rect_filled(screen_rect, NODE_CORNER_RADIUS, fill);
            painter.rect_stroke(
                screen_rect,
                NODE_CORNER_RADIUS,
                Stroke::new(1.5 * scale, stroke_color),
                egui::StrokeKind::Middle,
            );
            painter.text(
                screen_rect.center(),
                Align2::CENTER_CENTER,
                &entity.label,
                FontId::proportional(NODE_FONT_SIZE * scale),
                text_color,
            );

            // Registered after the background widget, so node clicks win and
            // never fall through into pan handling.
            let id = ui.id().with(("node", &entity.id));
            if ui.interact(screen_rect, id, Sense::click()).clicked() {
                clicked = Some(entity.id.clone());
            }
        }
        clicked
    }
}
