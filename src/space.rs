//! The plot space facade.

use crate::binder::{Connection, PlotBinder, PlottedPoint};
use crate::config::PlotConfig;
use crate::core::{Axis, Color, GridCategory, Plane, TextSpec};
use crate::frame::{AxisFrame, GridLine};
use crate::highlight::{HighlightSettings, Highlights};
use crate::labels::LabelSet;
use crate::mapping::SceneMapping;
use crate::scene::{HitTest, NodeId, NodeRole, Scene};
use crate::source::{PlotDataSource, PlotDelegate};
use crate::Result;
use bevy_math::Vec2;
use std::sync::{Arc, Weak};

/// A 3D Cartesian plot: axis frame, plotted data, labels and highlights over
/// one retained [`Scene`].
///
/// Collaborators are held weakly. Once the application drops its data source
/// or delegate, every data-bound operation becomes a no-op.
pub struct PlotSpace {
    config: PlotConfig,
    mapping: SceneMapping,
    scene: Scene,
    frame: AxisFrame,
    binder: PlotBinder,
    labels: LabelSet,
    highlights: Highlights,
    highlight_settings: HighlightSettings,
    data_source: Option<Weak<dyn PlotDataSource>>,
    delegate: Option<Weak<dyn PlotDelegate>>,
}

impl std::fmt::Debug for PlotSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotSpace")
            .field("config", &self.config)
            .field("points", &self.binder.points().len())
            .field("connections", &self.binder.connections().len())
            .field("highlights", &self.highlights.len())
            .finish_non_exhaustive()
    }
}

impl PlotSpace {
    /// Validates `config` and builds the axis frame.
    pub fn new(config: PlotConfig) -> Result<Self> {
        let mapping = config.validate()?;
        let mut scene = Scene::new();
        let frame = AxisFrame::build(&mut scene, &config, &mapping);
        let binder = PlotBinder::new(&mut scene);

        Ok(Self {
            config,
            mapping,
            scene,
            frame,
            binder,
            labels: LabelSet::default(),
            highlights: Highlights::default(),
            highlight_settings: HighlightSettings::default(),
            data_source: None,
            delegate: None,
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn mapping(&self) -> &SceneMapping {
        &self.mapping
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frame(&self) -> &AxisFrame {
        &self.frame
    }

    // ---------- collaborators ----------

    /// Binds the data source. Only a weak reference is kept.
    pub fn set_data_source<S: PlotDataSource + 'static>(&mut self, source: &Arc<S>) {
        let weak: Weak<dyn PlotDataSource> = Arc::<S>::downgrade(source);
        self.data_source = Some(weak);
    }

    /// Binds the delegate. Only a weak reference is kept.
    pub fn set_delegate<D: PlotDelegate + 'static>(&mut self, delegate: &Arc<D>) {
        let weak: Weak<dyn PlotDelegate> = Arc::<D>::downgrade(delegate);
        self.delegate = Some(weak);
    }

    fn data_source(&self) -> Option<Arc<dyn PlotDataSource>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    fn delegate(&self) -> Option<Arc<dyn PlotDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    // ---------- data binding ----------

    /// Clears every plotted point and connection and plots the whole dataset
    /// again. Highlights are kept.
    pub fn reload_data(&mut self) {
        let source = self.data_source();
        let delegate = self.delegate();
        self.binder.reload(
            &mut self.scene,
            &self.mapping,
            source.as_deref(),
            delegate.as_deref(),
        );
    }

    /// Plots points the data source reports beyond those already plotted.
    pub fn append_points(&mut self) -> usize {
        let (Some(source), Some(delegate)) = (self.data_source(), self.delegate()) else {
            tracing::debug!("append without data source or delegate");
            return 0;
        };
        self.binder.append_points(&mut self.scene, &self.mapping, &*source, &*delegate)
    }

    /// Plots connections the data source reports beyond those already asked for.
    pub fn append_connections(&mut self) -> usize {
        let (Some(source), Some(delegate)) = (self.data_source(), self.delegate()) else {
            tracing::debug!("append without data source or delegate");
            return 0;
        };
        self.binder.append_connections(&mut self.scene, &*source, &*delegate)
    }

    /// Appends new points, then new connections.
    pub fn plot_new_points(&mut self) {
        let points = self.append_points();
        let connections = self.append_connections();
        tracing::debug!(points, connections, "new data plotted");
    }

    pub fn plotted_point<I: TryInto<usize>>(&self, index: I) -> Option<&PlottedPoint> {
        self.binder.point(index)
    }

    pub fn plotted_points(&self) -> &[PlottedPoint] {
        self.binder.points()
    }

    pub fn connection<I: TryInto<usize>>(&self, index: I) -> Option<&Connection> {
        self.binder.connection(index)
    }

    pub fn connections(&self) -> &[Connection] {
        self.binder.connections()
    }

    // ---------- highlights & selection ----------

    pub fn highlight_settings(&self) -> &HighlightSettings {
        &self.highlight_settings
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight_settings.enabled = enabled;
    }

    pub fn set_multiple_highlights_enabled(&mut self, enabled: bool) {
        self.highlight_settings.multiple = enabled;
    }

    /// Applies to highlights created afterwards.
    pub fn set_highlight_radius(&mut self, radius: f32) {
        self.highlight_settings.radius = radius;
    }

    /// Applies to highlights created afterwards.
    pub fn set_highlight_color(&mut self, color: Color) {
        self.highlight_settings.color = color;
    }

    /// Highlights the point at `index`. Unknown indices and points already
    /// highlighted are left alone.
    pub fn highlight<I: TryInto<usize>>(&mut self, index: I) {
        let Some(point) = self.binder.point(index) else {
            return;
        };
        let HighlightSettings { radius, color, .. } = self.highlight_settings;
        self.highlights.highlight(&mut self.scene, point, radius, color);
    }

    pub fn remove_highlights(&mut self) {
        self.highlights.clear(&mut self.scene);
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Resolves a completed tap at `screen`. If it lands on a plotted point,
    /// highlights it per the highlight settings and tells the delegate.
    /// Returns the selected point index.
    pub fn handle_tap(&mut self, screen: Vec2, hit_test: &impl HitTest) -> Option<usize> {
        let node = hit_test.hit_test(screen)?;
        self.select_node(node)
    }

    /// Selection for an already resolved hit. Nodes other than plotted
    /// points are ignored.
    pub fn select_node(&mut self, node: NodeId) -> Option<usize> {
        let NodeRole::Point(index) = self.scene.get(node)?.role else {
            return None;
        };

        if self.highlight_settings.enabled {
            if !self.highlight_settings.multiple {
                self.remove_highlights();
            }
            self.highlight(index);
        }
        if let Some(delegate) = self.delegate() {
            delegate.did_select(index);
        }
        tracing::debug!(index, "point selected");
        Some(index)
    }

    // ---------- labels ----------

    /// Sets the title of `axis` and rebuilds all labels.
    pub fn set_axis_title(&mut self, axis: Axis, title: TextSpec) {
        self.labels.set_title(axis, title);
        self.reload_labels();
    }

    /// Rebuilds tick labels and axis titles.
    pub fn reload_labels(&mut self) {
        let delegate = self.delegate();
        self.labels.rebuild(
            &mut self.scene,
            &self.frame,
            &self.mapping,
            delegate.as_deref(),
        );
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    // ---------- gridlines ----------

    pub fn grid_lines(&self, category: GridCategory) -> &[GridLine] {
        self.frame.grid_lines(category)
    }

    pub fn horizontal_grid_lines(&self, plane: Plane) -> &[GridLine] {
        self.frame.horizontal_grid_lines(plane)
    }

    pub fn vertical_grid_lines(&self, plane: Plane) -> &[GridLine] {
        self.frame.vertical_grid_lines(plane)
    }

    // ---------- visual toggles ----------

    pub fn set_unit_plane_hidden(&mut self, plane: Plane, hidden: bool) {
        self.scene.set_visible(self.frame.unit_plane_node(plane), !hidden);
    }

    pub fn set_unit_planes_hidden(&mut self, hidden: bool) {
        for plane in Plane::ALL {
            self.set_unit_plane_hidden(plane, hidden);
        }
    }

    pub fn set_wall_hidden(&mut self, plane: Plane, hidden: bool) {
        self.scene.set_visible(self.frame.wall_node(plane), !hidden);
    }

    pub fn set_walls_hidden(&mut self, hidden: bool) {
        for plane in Plane::ALL {
            self.set_wall_hidden(plane, hidden);
        }
    }

    pub fn set_wall_color(&mut self, plane: Plane, color: Color) {
        self.scene.set_color(self.frame.wall_node(plane), color);
    }

    pub fn is_unit_plane_hidden(&self, plane: Plane) -> bool {
        !self.scene.is_visible(self.frame.unit_plane_node(plane))
    }

    pub fn is_wall_hidden(&self, plane: Plane) -> bool {
        !self.scene.is_visible(self.frame.wall_node(plane))
    }

    pub fn wall_color(&self, plane: Plane) -> Option<Color> {
        self.scene.get(self.frame.wall_node(plane))?.color
    }
}
