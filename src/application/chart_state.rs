// Chart state - filtered series plus the dirty flag gating re-renders
use crate::application::buffer::ReadingBuffer;
use crate::application::selection::SeriesSelector;
use crate::domain::reading::Reading;

/// The renderer's view of the world: one series per selected category (in
/// selection order) and a parallel list of display labels.
///
/// The dirty flag coalesces change notifications: any number of selection
/// changes and data arrivals before a draw cycle produce exactly one render.
#[derive(Debug, Default)]
pub struct ChartState {
    series: Vec<Vec<Reading>>,
    labels: Vec<String>,
    dirty: bool,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called exactly when a render has completed.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Recompute series and labels from the buffer and the current
    /// selection. Does not touch the dirty flag; callers decide when the
    /// recomputed data has actually been drawn.
    pub fn rebuild(&mut self, buffer: &ReadingBuffer, selector: &SeriesSelector) {
        self.series.clear();
        self.labels.clear();

        for id in selector.selected_ids() {
            self.series.push(buffer.series_for(*id));
            self.labels
                .push(selector.display_name(*id).unwrap_or_default().to_string());
        }

        debug_assert_eq!(self.series.len(), self.labels.len());
    }

    pub fn series(&self) -> &[Vec<Reading>] {
        &self.series
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
