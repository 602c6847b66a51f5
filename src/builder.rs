use crate::config::PlotConfig;
use crate::core::{Axis, Color, Plane, TextSpec};
use crate::highlight::HighlightSettings;
use crate::render::{PlotCollaborators, PlotHostOptions};
use crate::source::{PlotDataSource, PlotDelegate};
use crate::space::PlotSpace;
use crate::Result;
use bevy_math::Vec3;
use std::sync::Arc;

pub fn plot_space() -> PlotSpaceBuilder {
    PlotSpaceBuilder {
        config: PlotConfig::default(),
        options: PlotHostOptions::default(),
        highlight: HighlightSettings::default(),
        titles: Vec::new(),
        unit_planes_hidden: [false; 3],
        walls_hidden: [false; 3],
        wall_colors: Vec::new(),
    }
}

/// Fluent setup of a plot space and the app hosting it.
pub struct PlotSpaceBuilder {
    config: PlotConfig,
    options: PlotHostOptions,
    highlight: HighlightSettings,
    titles: Vec<(Axis, TextSpec)>,
    unit_planes_hidden: [bool; 3],
    walls_hidden: [bool; 3],
    wall_colors: Vec<(Plane, Color)>,
}

impl PlotSpaceBuilder {
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Edits the configuration in place.
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut PlotConfig),
    {
        f(&mut self.config);
        self
    }

    pub fn background_color(mut self, c: Color) -> Self {
        self.options.background = c;
        self
    }

    pub fn camera_position(mut self, position: Vec3) -> Self {
        self.options.camera_position = position;
        self
    }

    pub fn look_at(mut self, target: Vec3) -> Self {
        self.options.camera_target = target;
        self
    }

    /// Keep appending whatever the data source reports while running.
    pub fn follow_data(mut self, follow: bool) -> Self {
        self.options.follow_data = follow;
        self
    }

    pub fn axis_title(mut self, axis: Axis, title: impl Into<String>) -> Self {
        self.titles.push((axis, TextSpec::title(title)));
        self
    }

    pub fn axis_title_spec(mut self, axis: Axis, spec: TextSpec) -> Self {
        self.titles.push((axis, spec));
        self
    }

    pub fn highlight<F>(mut self, f: F) -> Self
    where
        F: FnOnce(HighlightSettings) -> HighlightSettings,
    {
        self.highlight = f(self.highlight);
        self
    }

    pub fn unit_planes_hidden(mut self, hidden: bool) -> Self {
        self.unit_planes_hidden = [hidden; 3];
        self
    }

    pub fn unit_plane_hidden(mut self, plane: Plane, hidden: bool) -> Self {
        self.unit_planes_hidden[plane.slot()] = hidden;
        self
    }

    pub fn walls_hidden(mut self, hidden: bool) -> Self {
        self.walls_hidden = [hidden; 3];
        self
    }

    pub fn wall_hidden(mut self, plane: Plane, hidden: bool) -> Self {
        self.walls_hidden[plane.slot()] = hidden;
        self
    }

    pub fn wall_color(mut self, plane: Plane, c: Color) -> Self {
        self.wall_colors.push((plane, c));
        self
    }

    /// Builds the plot space without any data bound.
    pub fn build(self) -> Result<PlotSpace> {
        Ok(self.build_parts()?.0)
    }

    fn build_parts(self) -> Result<(PlotSpace, PlotHostOptions)> {
        let mut space = PlotSpace::new(self.config)?;

        let HighlightSettings {
            enabled,
            multiple,
            radius,
            color,
        } = self.highlight;
        space.set_highlight_enabled(enabled);
        space.set_multiple_highlights_enabled(multiple);
        space.set_highlight_radius(radius);
        space.set_highlight_color(color);

        for plane in Plane::ALL {
            space.set_unit_plane_hidden(plane, self.unit_planes_hidden[plane.slot()]);
            space.set_wall_hidden(plane, self.walls_hidden[plane.slot()]);
        }
        for (plane, c) in self.wall_colors {
            space.set_wall_color(plane, c);
        }
        for (axis, title) in self.titles {
            space.set_axis_title(axis, title);
        }
        Ok((space, self.options))
    }

    /// Builds the plot space bound to `data` and plots it.
    pub fn bind<D>(self, data: &Arc<D>) -> Result<(PlotSpace, PlotHostOptions)>
    where
        D: PlotDataSource + PlotDelegate + 'static,
    {
        let (mut space, options) = self.build_parts()?;
        space.set_data_source(data);
        space.set_delegate(data);
        space.reload_data();
        space.reload_labels();
        Ok((space, options))
    }

    /// Builds the hosting app without running it (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn into_app<D>(self, data: Arc<D>) -> Result<bevy::prelude::App>
    where
        D: PlotDataSource + PlotDelegate + 'static,
    {
        let (space, options) = self.bind(&data)?;
        Ok(crate::runtime::plot_app(
            space,
            options,
            PlotCollaborators::holding(data),
        ))
    }

    /// Run the plot locally using Bevy (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run_local<D>(self, data: Arc<D>) -> Result<()>
    where
        D: PlotDataSource + PlotDelegate + 'static,
    {
        let (space, options) = self.bind(&data)?;
        crate::runtime::run_plot(space, options, PlotCollaborators::holding(data));
        Ok(())
    }

    /// Run the plot in the given canvas (wasm only)
    #[cfg(target_arch = "wasm32")]
    pub fn run_web<D>(self, data: Arc<D>, canvas_id: &str) -> Result<()>
    where
        D: PlotDataSource + PlotDelegate + 'static,
    {
        let (space, options) = self.bind(&data)?;
        crate::runtime::run_plot(space, options, PlotCollaborators::holding(data), canvas_id);
        Ok(())
    }
}
