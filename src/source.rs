//! Callback interfaces through which an application feeds the plot space.

use crate::core::{Axis, ConnectionSpec, DomainPoint, Marker, TextSpec};

/// Supplies item counts. The plot space asks again on every reload or append
/// and only requests the items it has not plotted yet.
pub trait PlotDataSource: Send + Sync {
    fn number_of_points(&self) -> usize;

    fn number_of_connections(&self) -> usize {
        0
    }
}

/// Supplies items and receives selection notifications.
///
/// Every optional hook defaults to declining. A declined marker still plots
/// the point (it just has no geometry); a declined connection or tick label is
/// skipped.
pub trait PlotDelegate: Send + Sync {
    fn point(&self, index: usize) -> DomainPoint;

    fn marker(&self, _index: usize) -> Option<Marker> {
        None
    }

    fn points_to_connect(&self, _index: usize) -> Option<(usize, usize)> {
        None
    }

    fn connection(&self, _index: usize) -> Option<ConnectionSpec> {
        None
    }

    fn text_at_tick(&self, _index: usize, _axis: Axis) -> Option<TextSpec> {
        None
    }

    fn did_select(&self, _index: usize) {}
}
