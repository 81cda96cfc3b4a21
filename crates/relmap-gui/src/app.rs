//! Application shell: filter sidebar, reset control, and the redraw cycle.
//!
//! The scene is a cached pure function of (data, filter, node bounds).
//! Selection and tag changes invalidate it; pan and zoom never do, they only
//! change the paint-time transform. Container resizes are debounced so a
//! resize burst triggers a single rebuild.

use crate::canvas::GraphCanvas;
use egui::RichText;
use relmap_core::GraphData;
use relmap_graph::{NodeBoundsMap, PanState, Scene, TagPalette, ViewFilter, Viewport};
use std::time::{Duration, Instant};

const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

pub struct RelmapApp {
    data: GraphData,
    /// Distinct tags in first-appearance order, fixed at load.
    tags: Vec<String>,

    filter: ViewFilter,
    palette: TagPalette,
    viewport: Viewport,
    pan: PanState,
    canvas: GraphCanvas,

    scene: Scene,
    bounds: NodeBoundsMap,
    scene_dirty: bool,
    /// Canvas size the current scene was built against.
    canvas_size: egui::Vec2,
    resize_pending: Option<(Instant, egui::Vec2)>,
}

impl RelmapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data: GraphData) -> Self {
        Self::from_data(data)
    }

    pub fn from_data(data: GraphData) -> Self {
        let tags: Vec<String> = data.tags().iter().map(|t| t.to_string()).collect();

        // Seed the registry in tag order so the sidebar swatches and the
        // edge colors agree no matter which edge is drawn first.
        let mut palette = TagPalette::new();
        for tag in &tags {
            palette.color_for(tag);
        }

        Self {
            data,
            tags,
            filter: ViewFilter::new(),
            palette,
            viewport: Viewport::default(),
            pan: PanState::default(),
            canvas: GraphCanvas::new(),
            scene: Scene::default(),
            bounds: NodeBoundsMap::default(),
            scene_dirty: true,
            canvas_size: egui::Vec2::ZERO,
            resize_pending: None,
        }
    }

    fn filter_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tags");
        ui.add_space(4.0);

        for tag in &self.tags {
            let color = self.palette.color_for(tag);
            let (r, g, b, _) = color.to_tuple();
            let mut checked = self.filter.tag_checked(tag);
            let label = RichText::new(tag).color(egui::Color32::from_rgb(r, g, b));
            if ui.checkbox(&mut checked, label).changed() {
                self.filter.set_tag(tag, checked);
                self.scene_dirty = true;
            }
        }

        ui.separator();
        if ui.button("Reset view").clicked() {
            self.viewport.reset();
        }
    }

    /// Debounced resize tracking: rebuild only once the canvas size has been
    /// stable for [`RESIZE_DEBOUNCE`]. The first observed size builds
    /// immediately.
    fn track_resize(&mut self, ctx: &egui::Context, size: egui::Vec2) {
        if size == self.canvas_size {
            self.resize_pending = None;
            return;
        }
        if self.canvas_size == egui::Vec2::ZERO {
            self.canvas_size = size;
            self.scene_dirty = true;
            return;
        }
        match self.resize_pending {
            Some((since, observed)) if observed == size => {
                let elapsed = since.elapsed();
                if elapsed >= RESIZE_DEBOUNCE {
                    self.canvas_size = size;
                    self.scene_dirty = true;
                    self.resize_pending = None;
                } else {
                    ctx.request_repaint_after(RESIZE_DEBOUNCE - elapsed);
                }
            }
            _ => {
                self.resize_pending = Some((Instant::now(), size));
                ctx.request_repaint_after(RESIZE_DEBOUNCE);
            }
        }
    }
}

impl eframe::App for RelmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("filter-panel")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| self.filter_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.track_resize(ctx, ui.available_size());

                if self.scene_dirty {
                    self.bounds = GraphCanvas::measure_bounds(ui, &self.data, self.canvas_size);
                    self.scene = Scene::build(
                        &self.data.relations,
                        &self.bounds,
                        &self.filter,
                        &mut self.palette,
                    );
                    self.scene_dirty = false;
                    tracing::debug!(edges = self.scene.edges.len(), "scene rebuilt");
                }

                let output = self.canvas.show(
                    ui,
                    &self.data,
                    &self.bounds,
                    &self.scene,
                    &self.filter,
                    &mut self.viewport,
                    &mut self.pan,
                );

                if let Some(id) = output.clicked_entity {
                    self.filter.toggle_selection(&id);
                    self.scene_dirty = true;
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> RelmapApp {
        RelmapApp::from_data(GraphData::default())
    }

    #[test]
    fn first_observed_size_rebuilds_immediately() {
        let mut app = app();
        let ctx = egui::Context::default();
        app.scene_dirty = false;

        app.track_resize(&ctx, egui::vec2(800.0, 600.0));
        assert!(app.scene_dirty);
        assert_eq!(app.canvas_size, egui::vec2(800.0, 600.0));
        assert!(app.resize_pending.is_none());
    }

    #[test]
    fn resize_rebuilds_only_after_the_quiet_window() {
        let mut app = app();
        let ctx = egui::Context::default();
        app.track_resize(&ctx, egui::vec2(800.0, 600.0));
        app.scene_dirty = false;

        // A new size starts the debounce window but does not rebuild.
        let grown = egui::vec2(900.0, 600.0);
        app.track_resize(&ctx, grown);
        assert!(!app.scene_dirty);
        assert!(app.resize_pending.is_some());

        // Still inside the window: no rebuild yet.
        app.track_resize(&ctx, grown);
        assert!(!app.scene_dirty);

        // Once the size has been stable for the full window, exactly one
        // rebuild happens and the pending marker clears.
        app.resize_pending = Some((Instant::now() - RESIZE_DEBOUNCE, grown));
        app.track_resize(&ctx, grown);
        assert!(app.scene_dirty);
        assert_eq!(app.canvas_size, grown);
        assert!(app.resize_pending.is_none());

        app.scene_dirty = false;
        app.track_resize(&ctx, grown);
        assert!(!app.scene_dirty);
    }

    #[test]
    fn a_different_size_mid_burst_restarts_the_window() {
        let mut app = app();
        let ctx = egui::Context::default();
        app.track_resize(&ctx, egui::vec2(800.0, 600.0));
        app.scene_dirty = false;

        app.track_resize(&ctx, egui::vec2(900.0, 600.0));
        let first_pending = app.resize_pending;
        app.track_resize(&ctx, egui::vec2(950.0, 600.0));
        let second_pending = app.resize_pending;

        assert!(!app.scene_dirty);
        assert_ne!(first_pending.map(|(_, s)| s), second_pending.map(|(_, s)| s));
        assert_eq!(second_pending.map(|(_, s)| s), Some(egui::vec2(950.0, 600.0)));
    }

    #[test]
    fn settling_back_to_the_built_size_cancels_the_burst() {
        let mut app = app();
        let ctx = egui::Context::default();
        let built = egui::vec2(800.0, 600.0);
        app.track_resize(&ctx, built);
        app.scene_dirty = false;

        app.track_resize(&ctx, egui::vec2(900.0, 600.0));
        assert!(app.resize_pending.is_some());

        app.track_resize(&ctx, built);
        assert!(app.resize_pending.is_none());
        assert!(!app.scene_dirty);
    }
}
