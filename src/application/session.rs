// Dashboard session - the explicitly constructed application context
use std::sync::Arc;

use crate::application::buffer::ReadingBuffer;
use crate::application::chart_state::ChartState;
use crate::application::error::DashboardError;
use crate::application::logger_repository::LoggerRepository;
use crate::application::selection::SeriesSelector;
use crate::domain::category::CategoryId;
use crate::domain::logger::LoggerStatus;
use crate::domain::reading::Reading;
use crate::presentation::chart;
use crate::presentation::scene::{Scene, Viewport};
use crate::presentation::sparkline;
use crate::presentation::targets::RenderTargets;

/// Owns all mutable dashboard state for one logging session: the category
/// selection, the reading buffer, the chart state and the last known logger
/// status. Created at session start and dropped at session end; there is no
/// global singleton behind it.
pub struct DashboardSession {
    repository: Arc<dyn LoggerRepository>,
    selector: SeriesSelector,
    buffer: ReadingBuffer,
    chart_state: ChartState,
    status: LoggerStatus,
}

impl DashboardSession {
    pub fn new(repository: Arc<dyn LoggerRepository>) -> Self {
        Self {
            repository,
            selector: SeriesSelector::new(),
            buffer: ReadingBuffer::new(),
            chart_state: ChartState::new(),
            status: LoggerStatus::default(),
        }
    }

    /// Load the initial status, category list and cached readings. Any of
    /// the three fetches failing is logged and skipped; the session starts
    /// with whatever subset succeeded.
    pub async fn initialize(&mut self) {
        match self.repository.status().await {
            Ok(status) => self.handle_status(status),
            Err(e) => tracing::warn!(error = %e, "initial status fetch failed"),
        }

        match self.repository.categories().await {
            Ok(categories) => self.selector.set_categories(categories),
            Err(e) => tracing::warn!(error = %e, "category fetch failed"),
        }

        match self.repository.readings_since(None).await {
            Ok(readings) => {
                self.merge_readings(readings);
            }
            Err(e) => tracing::warn!(error = %e, "initial cache fetch failed"),
        }
    }

    /// Apply a status response to the session.
    pub fn handle_status(&mut self, status: LoggerStatus) {
        self.status = status;
    }

    pub fn status(&self) -> &LoggerStatus {
        &self.status
    }

    pub fn is_logging(&self) -> bool {
        self.status.logging
    }

    /// Start a logging session on the device. Clears the reading buffer so
    /// the chart shows only the new session's data.
    pub async fn start_logging(&mut self) -> Result<(), DashboardError> {
        if self.status.logging {
            tracing::info!("logging already underway, start request skipped");
            return Ok(());
        }

        let status = self.repository.start().await?;
        self.handle_status(status);
        self.buffer.clear();
        self.chart_state.rebuild(&self.buffer, &self.selector);
        self.chart_state.mark_dirty();
        Ok(())
    }

    /// Stop the current logging session.
    pub async fn stop_logging(&mut self) -> Result<(), DashboardError> {
        if !self.status.logging {
            tracing::info!("logging is not underway, stop request skipped");
            self.status.logging = false;
            return Ok(());
        }

        let status = self.repository.stop().await?;
        self.handle_status(status);
        Ok(())
    }

    /// Refresh the logger status from the device, e.g. the periodic re-sync
    /// performed by the poller.
    pub async fn refresh_status(&mut self) -> Result<(), DashboardError> {
        let status = self.repository.status().await?;
        self.handle_status(status);
        Ok(())
    }

    /// Inbound "category toggled" notification from the host UI.
    pub fn toggle_category(&mut self, id: CategoryId) {
        if self.selector.toggle(id) {
            self.chart_state.mark_dirty();
        }
    }

    /// Merge a fetched batch into the buffer, marking the chart dirty only
    /// when at least one reading was new.
    pub fn merge_readings(&mut self, readings: Vec<Reading>) -> usize {
        let appended = self.buffer.merge(readings);
        if appended > 0 {
            self.chart_state.mark_dirty();
        }
        appended
    }

    pub fn selector(&self) -> &SeriesSelector {
        &self.selector
    }

    pub fn buffer(&self) -> &ReadingBuffer {
        &self.buffer
    }

    pub fn chart_state(&self) -> &ChartState {
        &self.chart_state
    }

    /// Recompute the chart data and render it into the named target. Does
    /// nothing while the chart is clean, so rapid dirty signals coalesce
    /// into a single draw. A missing target is a silent no-op and leaves
    /// the state dirty for when the target appears.
    pub fn render_chart(
        &mut self,
        targets: &mut RenderTargets,
        target_id: &str,
        viewport: Viewport,
    ) -> bool {
        if !self.chart_state.is_dirty() {
            return false;
        }

        self.chart_state.rebuild(&self.buffer, &self.selector);
        let scene = chart::render(self.chart_state.series(), self.chart_state.labels(), viewport);

        if !targets.render_into(target_id, scene) {
            tracing::debug!(target_id, "render target not registered, chart left dirty");
            return false;
        }

        self.chart_state.mark_clean();
        true
    }

    /// Render the hover sparkline for one category. `None` when the
    /// category has no readings yet.
    pub fn sparkline_for(&self, id: CategoryId, viewport: Viewport) -> Option<Scene> {
        sparkline::render_sparkline(&self.buffer.series_for(id), viewport)
    }
}
