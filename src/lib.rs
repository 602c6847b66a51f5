pub mod binder;
pub mod builder;
pub mod config;
pub mod core;
pub mod dataset;
pub mod frame;
pub mod highlight;
pub mod labels;
pub mod mapping;
pub mod render;
pub mod runtime;
pub mod scene;
pub mod source;
pub mod space;
pub mod wasm_api;

use thiserror::Error;

/// Failure categories surfaced by the plot space.
///
/// Steady-state data binding never fails; these only come out of configuration
/// validation and parsing, where a bad value is a programmer error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("invalid plot configuration")]
    InvalidConfig,
    #[error("degenerate domain range on the {0} axis")]
    DegenerateDomain(core::Axis),
    #[error("tick interval on the {0} axis must be positive")]
    InvalidTickInterval(core::Axis),
    #[error("failed to parse plot configuration")]
    Parse,
}

pub type Result<T> = std::result::Result<T, error_stack::Report<PlotError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::builder::*;
    pub use crate::config::PlotConfig;
    pub use crate::core::*;
    pub use crate::dataset::PlotDataset;
    pub use crate::highlight::HighlightSettings;
    pub use crate::render::*;
    pub use crate::runtime::*;
    pub use crate::scene::{HitTest, NodeId, Primitive};
    pub use crate::source::{PlotDataSource, PlotDelegate};
    pub use crate::space::PlotSpace;
    pub use crate::{PlotError, Result};
}
