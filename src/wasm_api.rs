//! WASM API exports for JavaScript interop
//!
//! Lets a page configure a plot space from JSON, feed it points and
//! connections, and start it in a canvas. It is only compiled when targeting
//! wasm32.

#![cfg(target_arch = "wasm32")]

use std::sync::Arc;
use wasm_bindgen::prelude::*;

use crate::config::PlotConfig;
use crate::core::{Axis, Color, ConnectionSpec, DomainPoint, Marker, TextSpec};
use crate::dataset::PlotDataset;

/// JavaScript-accessible plot space
#[wasm_bindgen]
pub struct JsPlotSpace {
    config: PlotConfig,
    titles: Vec<(Axis, String)>,
    data: Arc<PlotDataset>,
    canvas_id: String,
    started: bool,
}

#[wasm_bindgen]
impl JsPlotSpace {
    /// Create a plot space from a JSON configuration (`"{}"` for defaults)
    ///
    /// # Arguments
    /// * `json` - JSON object of configuration fields
    /// * `canvas_id` - HTML canvas element ID (without #)
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, canvas_id: &str) -> Result<JsPlotSpace, JsValue> {
        let config = PlotConfig::from_json_str(json)
            .map_err(|report| JsValue::from_str(&format!("{report:?}")))?;
        let data = Arc::new(PlotDataset::new());
        data.numeric_tick_labels(&config);

        Ok(JsPlotSpace {
            config,
            titles: Vec::new(),
            data,
            canvas_id: canvas_id.to_string(),
            started: false,
        })
    }

    /// Add a point drawn as a sphere. Returns its index.
    #[wasm_bindgen]
    pub fn push_point(&self, x: f32, y: f32, z: f32, radius: f32, r: f32, g: f32, b: f32) -> usize {
        self.data.push_point(
            DomainPoint::new(x, y, z),
            Some(Marker::sphere(radius, Color::rgb(r, g, b))),
        )
    }

    /// Connect two points by index
    #[wasm_bindgen]
    pub fn push_connection(&self, p0: usize, p1: usize) {
        self.data.push_connection(p0, p1, ConnectionSpec::default());
    }

    /// Set an axis title (`"x"`, `"y"` or `"z"`)
    #[wasm_bindgen]
    pub fn set_axis_title(&mut self, axis: &str, title: &str) -> Result<(), JsValue> {
        let axis = match axis {
            "x" | "X" => Axis::X,
            "y" | "Y" => Axis::Y,
            "z" | "Z" => Axis::Z,
            other => return Err(JsValue::from_str(&format!("Unknown axis: {other}"))),
        };
        self.titles.push((axis, title.to_string()));
        Ok(())
    }

    /// Indices of the points selected so far, oldest first
    #[wasm_bindgen]
    pub fn selections(&self) -> Vec<u32> {
        self.data.selections().into_iter().map(|i| i as u32).collect()
    }

    /// Start the Bevy render loop
    ///
    /// Points pushed afterwards are plotted on the next frame.
    #[wasm_bindgen]
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.started {
            return Err(JsValue::from_str("Plot space already started"));
        }
        self.started = true;

        let mut builder = crate::builder::plot_space()
            .config(self.config.clone())
            .follow_data(true);
        for (axis, title) in &self.titles {
            builder = builder.axis_title_spec(*axis, TextSpec::title(title.clone()));
        }
        builder
            .run_web(self.data.clone(), &self.canvas_id)
            .map_err(|report| JsValue::from_str(&format!("{report:?}")))
    }

    /// Get the canvas ID
    #[wasm_bindgen(getter)]
    pub fn canvas_id(&self) -> String {
        self.canvas_id.clone()
    }

    /// Check if the plot space has been started
    #[wasm_bindgen(getter)]
    pub fn is_started(&self) -> bool {
        self.started
    }
}
