//! The render sink contract.

use super::{ChartSeries, MapLayers, SummaryRow};
use serde::{Deserialize, Serialize};

/// View hints forwarded to the map sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub zoom: f64,
    pub height: u32,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            zoom: 10.0,
            height: 500,
        }
    }
}

/// Anything that can draw the explorer's output.
///
/// Implementors receive fully shaped row sets; they never see the cleaned
/// table itself.
pub trait RenderSink {
    /// Scatter map of the base layer with the highlighted subset on top.
    fn map(&mut self, title: &str, layers: &MapLayers, view: &MapView);

    /// Pie or bar chart of a ranking.
    fn chart(&mut self, series: &ChartSeries, caption: &str);

    /// Tabular listing.
    fn table(&mut self, title: &str, rows: &[SummaryRow]);

    /// Message shown in place of a chart with no data.
    fn notice(&mut self, message: &str);
}
