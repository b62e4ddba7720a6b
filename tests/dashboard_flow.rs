//! End-to-end flow: poll -> merge -> select -> render

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use datalog_dashboard::application::error::DashboardError;
use datalog_dashboard::application::logger_repository::LoggerRepository;
use datalog_dashboard::application::poller::Poller;
use datalog_dashboard::application::session::DashboardSession;
use datalog_dashboard::domain::category::{Category, CategoryId};
use datalog_dashboard::domain::logger::{LoggerConfig, LoggerStatus, SessionSummary};
use datalog_dashboard::domain::reading::Reading;
use datalog_dashboard::presentation::chart::SERIES_PALETTE;
use datalog_dashboard::presentation::scene::{Node, Viewport};
use datalog_dashboard::presentation::sparkline::SPARKLINE_VIEWPORT;
use datalog_dashboard::presentation::targets::RenderTargets;

/// Serves one queued batch of readings per poll, like a device filling its
/// cache between requests.
struct FakeLogger {
    batches: Mutex<Vec<Vec<Reading>>>,
    logging: Mutex<bool>,
}

impl FakeLogger {
    fn new(batches: Vec<Vec<Reading>>) -> Self {
        Self {
            batches: Mutex::new(batches),
            logging: Mutex::new(false),
        }
    }

    fn status_snapshot(&self) -> LoggerStatus {
        LoggerStatus {
            connected: true,
            logging: *self.logging.lock().unwrap(),
            errors: Vec::new(),
        }
    }
}

#[async_trait]
impl LoggerRepository for FakeLogger {
    async fn categories(&self) -> Result<Vec<Category>, DashboardError> {
        Ok(vec![
            Category::new(CategoryId(1), "Accelerator".to_string()),
            Category::new(CategoryId(2), "Brake".to_string()),
        ])
    }

    async fn readings_since(&self, since: Option<i64>) -> Result<Vec<Reading>, DashboardError> {
        let mut batches = self.batches.lock().unwrap();
        let batch = if batches.is_empty() {
            Vec::new()
        } else {
            batches.remove(0)
        };
        // A real device applies the timestamp filter server-side; doing it
        // here keeps the fake honest about the incremental contract.
        Ok(batch
            .into_iter()
            .filter(|r| since.is_none_or(|ts| r.timestamp > ts))
            .collect())
    }

    async fn status(&self) -> Result<LoggerStatus, DashboardError> {
        Ok(self.status_snapshot())
    }

    async fn start(&self) -> Result<LoggerStatus, DashboardError> {
        *self.logging.lock().unwrap() = true;
        Ok(self.status_snapshot())
    }

    async fn stop(&self) -> Result<LoggerStatus, DashboardError> {
        *self.logging.lock().unwrap() = false;
        Ok(self.status_snapshot())
    }

    async fn config(&self) -> Result<LoggerConfig, DashboardError> {
        Ok(LoggerConfig::default())
    }

    async fn save_config(&self, _config: &LoggerConfig) -> Result<(), DashboardError> {
        Ok(())
    }

    async fn sessions(&self) -> Result<Vec<SessionSummary>, DashboardError> {
        Ok(Vec::new())
    }
}

fn reading(category: i64, timestamp: i64, value: f64) -> Reading {
    Reading::new(CategoryId(category), timestamp, value)
}

#[tokio::test]
async fn test_poll_merge_select_render_pipeline() {
    let repo = Arc::new(FakeLogger::new(vec![
        // The initial cache fetch during initialize sees an empty device.
        Vec::new(),
        vec![reading(1, 100, 1.0), reading(2, 100, 2.0)],
        // A batch with an internal duplicate: only one copy is appended.
        vec![reading(1, 200, 5.0), reading(1, 200, 5.0)],
        vec![reading(1, 300, 3.0), reading(2, 250, 2.0)],
    ]));
    let mut session = DashboardSession::new(repo.clone());
    session.initialize().await;
    session.start_logging().await.unwrap();

    let poller = Poller::with_schedule(repo, Duration::from_millis(1), 10);
    assert_eq!(poller.poll_once(&mut session).await, 2);
    assert_eq!(poller.poll_once(&mut session).await, 1);
    assert_eq!(poller.poll_once(&mut session).await, 2);

    assert_eq!(session.buffer().len(), 5);
    assert_eq!(session.buffer().last_seen(), Some(300));

    session.toggle_category(CategoryId(1));
    session.toggle_category(CategoryId(2));

    let mut targets = RenderTargets::new();
    targets.register("chart");
    assert!(session.render_chart(&mut targets, "chart", Viewport::new(800.0, 600.0)));

    let scene = targets.scene("chart").unwrap();
    assert_eq!(scene.paths().count(), 2);

    // Colour follows selection order: Accelerator first, Brake second.
    let strokes: Vec<&str> = scene
        .paths()
        .map(|n| match n {
            Node::Path { stroke, .. } => stroke.as_str(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(strokes, vec![SERIES_PALETTE[0], SERIES_PALETTE[1]]);

    // One marker per merged reading.
    assert_eq!(scene.circles().count(), 5);

    let svg = scene.to_svg();
    assert!(svg.contains("Accelerator"));
    assert!(svg.contains("Brake"));
}

#[tokio::test]
async fn test_rerender_replaces_the_previous_scene() {
    let repo = Arc::new(FakeLogger::new(vec![
        Vec::new(),
        vec![reading(1, 100, 1.0)],
        vec![reading(1, 200, 2.0)],
    ]));
    let mut session = DashboardSession::new(repo.clone());
    session.initialize().await;
    session.toggle_category(CategoryId(1));

    let poller = Poller::with_schedule(repo, Duration::from_millis(1), 10);
    let mut targets = RenderTargets::new();
    targets.register("chart");
    let viewport = Viewport::new(800.0, 600.0);

    poller.poll_once(&mut session).await;
    assert!(session.render_chart(&mut targets, "chart", viewport));
    let first_nodes = targets.scene("chart").unwrap().nodes.len();

    poller.poll_once(&mut session).await;
    assert!(session.render_chart(&mut targets, "chart", viewport));
    let scene = targets.scene("chart").unwrap();

    // Still exactly one chart's worth of elements: one series path, one
    // marker per point, no leftovers from the first render.
    assert_eq!(scene.paths().count(), 1);
    assert_eq!(scene.circles().count(), 2);
    assert_eq!(scene.nodes.len(), first_nodes + 1);
}

#[tokio::test]
async fn test_selection_changes_alone_trigger_a_redraw() {
    let repo = Arc::new(FakeLogger::new(vec![vec![
        reading(1, 100, 1.0),
        reading(2, 150, 4.0),
    ]]));
    let mut session = DashboardSession::new(repo.clone());
    session.initialize().await;

    let mut targets = RenderTargets::new();
    targets.register("chart");
    let viewport = Viewport::new(800.0, 600.0);

    assert!(session.render_chart(&mut targets, "chart", viewport));
    assert!(!session.render_chart(&mut targets, "chart", viewport));

    session.toggle_category(CategoryId(2));
    assert!(session.render_chart(&mut targets, "chart", viewport));
    assert_eq!(targets.scene("chart").unwrap().paths().count(), 1);
}

#[tokio::test]
async fn test_sparkline_preview_for_a_category() {
    let repo = Arc::new(FakeLogger::new(vec![vec![
        reading(1, 0, 10.0),
        reading(1, 1, 2.0),
        reading(1, 2, 7.0),
    ]]));
    let mut session = DashboardSession::new(repo.clone());
    session.initialize().await;

    let poller = Poller::with_schedule(repo, Duration::from_millis(1), 10);
    poller.poll_once(&mut session).await;

    let scene = session
        .sparkline_for(CategoryId(1), SPARKLINE_VIEWPORT)
        .unwrap();
    assert_eq!(scene.paths().count(), 1);
    assert_eq!(scene.circles().count(), 1);

    // Hovering a category with no readings shows nothing.
    assert!(session
        .sparkline_for(CategoryId(2), SPARKLINE_VIEWPORT)
        .is_none());
}
