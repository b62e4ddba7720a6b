// Main entry point - wires the HTTP repository, session and poller together
use std::sync::Arc;
use std::time::Duration;

use datalog_dashboard::application::poller::Poller;
use datalog_dashboard::application::session::DashboardSession;
use datalog_dashboard::infrastructure::config::load_dashboard_config;
use datalog_dashboard::infrastructure::http_repository::HttpLoggerRepository;
use datalog_dashboard::presentation::scene::Viewport;
use datalog_dashboard::presentation::targets::RenderTargets;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_dashboard_config()?;
    let viewport = Viewport::new(config.chart.width, config.chart.height);

    let repository = Arc::new(HttpLoggerRepository::new(config.api.base_url.clone()));
    let mut session = DashboardSession::new(repository.clone());
    session.initialize().await;

    let mut targets = RenderTargets::new();
    targets.register(config.chart.target.clone());

    session.start_logging().await?;
    tracing::info!(
        api = %config.api.base_url,
        interval_ms = config.poll.interval_ms,
        "logging started, polling for readings"
    );

    // Chart every category so the output is useful without interactive
    // toggling; a host UI would call toggle_category from its click handler.
    let ids: Vec<_> = session.selector().categories().iter().map(|c| c.id).collect();
    for id in ids {
        session.toggle_category(id);
    }

    let poller = Poller::with_schedule(
        repository,
        Duration::from_millis(config.poll.interval_ms),
        config.poll.status_stride,
    );

    let target_id = config.chart.target.clone();
    let output_path = config.chart.output_path.clone();
    poller
        .run(&mut session, |session| {
            if session.render_chart(&mut targets, &target_id, viewport) {
                if let Some(scene) = targets.scene(&target_id) {
                    if let Err(e) = std::fs::write(&output_path, scene.to_svg()) {
                        tracing::error!(error = %e, path = %output_path, "failed to write chart");
                    }
                }
            }
        })
        .await;

    tracing::info!("session finished");
    session.stop_logging().await?;

    Ok(())
}
