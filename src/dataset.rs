//! An in-memory data source and delegate.

use crate::config::PlotConfig;
use crate::core::{Axis, ConnectionSpec, DomainPoint, Marker, TextSpec};
use crate::source::{PlotDataSource, PlotDelegate};
use parking_lot::{Mutex, RwLock};

#[derive(Clone, Debug)]
struct Item {
    point: DomainPoint,
    marker: Option<Marker>,
}

#[derive(Debug, Default)]
struct Data {
    items: Vec<Item>,
    connections: Vec<(usize, usize, ConnectionSpec)>,
    tick_labels: [Vec<Option<TextSpec>>; 3],
}

/// Points, connections and tick labels kept behind a lock, so the dataset can
/// be shared with a running plot and grown from any thread.
///
/// Selections reported by the plot are recorded in order.
#[derive(Debug, Default)]
pub struct PlotDataset {
    data: RwLock<Data>,
    selections: Mutex<Vec<usize>>,
}

impl PlotDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point and returns its index.
    pub fn push_point(&self, point: impl Into<DomainPoint>, marker: Option<Marker>) -> usize {
        let mut data = self.data.write();
        data.items.push(Item {
            point: point.into(),
            marker,
        });
        data.items.len() - 1
    }

    pub fn push_connection(&self, p0: usize, p1: usize, spec: ConnectionSpec) {
        self.data.write().connections.push((p0, p1, spec));
    }

    pub fn len(&self) -> usize {
        self.data.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().items.is_empty()
    }

    /// Labels for `axis`, by tick index. `None` leaves that tick unlabeled.
    pub fn set_tick_labels(&self, axis: Axis, labels: Vec<Option<TextSpec>>) {
        self.data.write().tick_labels[axis.slot()] = labels;
    }

    /// Labels every tick of every axis with the domain value it marks.
    pub fn numeric_tick_labels(&self, config: &PlotConfig) {
        let mut data = self.data.write();
        for axis in Axis::ALL {
            let scale = config.axis_scale(axis);
            data.tick_labels[axis.slot()] = (0..scale.gridline_count())
                .map(|i| {
                    let value = scale.min + scale.tick_interval * (i + 1) as f32;
                    Some(TextSpec::new(format_tick(value)))
                })
                .collect();
        }
    }

    /// Indices the plot reported as selected, oldest first.
    pub fn selections(&self) -> Vec<usize> {
        self.selections.lock().clone()
    }

    pub fn last_selection(&self) -> Option<usize> {
        self.selections.lock().last().copied()
    }
}

fn format_tick(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

impl PlotDataSource for PlotDataset {
    fn number_of_points(&self) -> usize {
        self.data.read().items.len()
    }

    fn number_of_connections(&self) -> usize {
        self.data.read().connections.len()
    }
}

impl PlotDelegate for PlotDataset {
    // Indices past the end yield the origin; the plot only asks for indices
    // below the reported count.
    fn point(&self, index: usize) -> DomainPoint {
        self.data
            .read()
            .items
            .get(index)
            .map(|i| i.point)
            .unwrap_or_default()
    }

    fn marker(&self, index: usize) -> Option<Marker> {
        self.data.read().items.get(index)?.marker.clone()
    }

    fn points_to_connect(&self, index: usize) -> Option<(usize, usize)> {
        let (p0, p1, _) = *self.data.read().connections.get(index)?;
        Some((p0, p1))
    }

    fn connection(&self, index: usize) -> Option<ConnectionSpec> {
        self.data.read().connections.get(index).map(|c| c.2)
    }

    fn text_at_tick(&self, index: usize, axis: Axis) -> Option<TextSpec> {
        self.data.read().tick_labels[axis.slot()]
            .get(index)?
            .clone()
    }

    fn did_select(&self, index: usize) {
        self.selections.lock().push(index);
    }
}
