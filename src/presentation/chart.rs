// Chart renderer - scales, axes, series paths, markers and legend
use chrono::DateTime;

use crate::domain::reading::Reading;
use crate::presentation::scale::{LinearScale, TimeScale};
use crate::presentation::scene::{Margin, Node, Scene, TextAnchor, Viewport};

/// Colour per series index, assigned in selection order. A sixth or later
/// series wraps around the palette; distinct colours beyond five are a
/// known limitation.
pub const SERIES_PALETTE: [&str; 5] = ["#0078e7", "#198A34", "#ff158a", "#cfda20", "#202020"];

/// Margin around the plot area. The legend strip lives in the top margin.
pub const CHART_MARGIN: Margin = Margin {
    top: 80.0,
    right: 60.0,
    bottom: 60.0,
    left: 60.0,
};

/// Default axis range shown before any data arrives: 2011-04-09 through
/// 2011-07-14 UTC.
pub const FALLBACK_X_DOMAIN: (i64, i64) = (1_302_307_200_000, 1_310_601_600_000);
pub const FALLBACK_Y_DOMAIN: (f64, f64) = (0.0, 1.0);

const AXIS_COLOR: &str = "#333333";
const X_TICKS: usize = 6;
const Y_TICKS: usize = 4;
const TICK_LEN: f64 = 6.0;
const MARKER_RADIUS: f64 = 3.0;
const LEGEND_X_OFFSET: f64 = 25.0;
const LEGEND_STRIDE: f64 = 130.0;

/// X domain is the timestamp extent across every series; Y domain is
/// anchored at zero and runs to the maximum value, so magnitudes stay
/// comparable between series. Degenerate input gets the fixed fallbacks.
pub fn compute_domains(series_list: &[Vec<Reading>]) -> ((i64, i64), (f64, f64)) {
    let readings = series_list.iter().flatten();
    let mut x_extent: Option<(i64, i64)> = None;
    let mut y_max: Option<f64> = None;

    for r in readings {
        x_extent = Some(match x_extent {
            Some((lo, hi)) => (lo.min(r.timestamp), hi.max(r.timestamp)),
            None => (r.timestamp, r.timestamp),
        });
        y_max = Some(match y_max {
            Some(max) => max.max(r.value),
            None => r.value,
        });
    }

    match (x_extent, y_max) {
        (Some(x), Some(max)) => (x, (0.0, max)),
        _ => (FALLBACK_X_DOMAIN, FALLBACK_Y_DOMAIN),
    }
}

/// Render the full chart for the given series into a fresh scene. Empty or
/// degenerate input produces a chart with axes over the fallback domains
/// and no series paths; it never fails.
pub fn render(series_list: &[Vec<Reading>], labels: &[String], viewport: Viewport) -> Scene {
    let margin = CHART_MARGIN;
    let plot_width = (viewport.width - margin.left - margin.right).max(1.0);
    let plot_height = (viewport.height - margin.top - margin.bottom).max(1.0);

    let (x_domain, y_domain) = compute_domains(series_list);
    let x = TimeScale::new(x_domain, (margin.left, margin.left + plot_width));
    let y = LinearScale::new(y_domain, (margin.top + plot_height, margin.top));

    let mut scene = Scene::new(viewport);
    draw_axes(&mut scene, &x, &y, &margin, plot_width, plot_height);

    for (index, series) in series_list.iter().enumerate() {
        let color = SERIES_PALETTE[index % SERIES_PALETTE.len()];

        if !series.is_empty() {
            let points: Vec<(f64, f64)> = series
                .iter()
                .map(|r| (x.scale(r.timestamp), y.scale(r.value)))
                .collect();
            scene.push(Node::Path {
                points,
                stroke: color.to_string(),
                stroke_width: 2.0,
            });

            for r in series {
                scene.push(Node::Circle {
                    cx: x.scale(r.timestamp),
                    cy: y.scale(r.value),
                    r: MARKER_RADIUS,
                    fill: color.to_string(),
                    title: Some(format!("{} at {}", format_value(r.value), r.title_date())),
                });
            }
        }

        draw_legend_entry(&mut scene, &margin, index, labels.get(index), color);
    }

    scene
}

fn draw_axes(
    scene: &mut Scene,
    x: &TimeScale,
    y: &LinearScale,
    margin: &Margin,
    plot_width: f64,
    plot_height: f64,
) {
    let x0 = margin.left;
    let y0 = margin.top + plot_height;

    scene.push(Node::Line {
        x1: x0,
        y1: y0,
        x2: x0 + plot_width,
        y2: y0,
        stroke: AXIS_COLOR.to_string(),
    });
    scene.push(Node::Line {
        x1: x0,
        y1: margin.top,
        x2: x0,
        y2: y0,
        stroke: AXIS_COLOR.to_string(),
    });

    for tick in x.ticks(X_TICKS) {
        let tx = x.scale(tick);
        scene.push(Node::Line {
            x1: tx,
            y1: y0,
            x2: tx,
            y2: y0 + TICK_LEN,
            stroke: AXIS_COLOR.to_string(),
        });
        scene.push(Node::Text {
            x: tx,
            y: y0 + TICK_LEN + 14.0,
            content: format_tick_time(tick),
            anchor: TextAnchor::Middle,
        });
    }

    for tick in y.ticks(Y_TICKS) {
        let ty = y.scale(tick);
        scene.push(Node::Line {
            x1: x0 - TICK_LEN,
            y1: ty,
            x2: x0,
            y2: ty,
            stroke: AXIS_COLOR.to_string(),
        });
        scene.push(Node::Text {
            x: x0 - TICK_LEN - 4.0,
            y: ty + 4.0,
            content: format_value(tick),
            anchor: TextAnchor::End,
        });
    }
}

fn draw_legend_entry(
    scene: &mut Scene,
    margin: &Margin,
    index: usize,
    label: Option<&String>,
    color: &str,
) {
    let x = margin.left + LEGEND_X_OFFSET + LEGEND_STRIDE * index as f64;
    scene.push(Node::Rect {
        x,
        y: margin.top - 46.0,
        width: 22.0,
        height: 3.0,
        fill: color.to_string(),
    });

    let text = match label {
        Some(label) if !label.is_empty() => label.clone(),
        _ => format!("Series {}", index + 1),
    };
    scene.push(Node::Text {
        x: x + 25.0,
        y: margin.top - 40.0,
        content: text,
        anchor: TextAnchor::Start,
    });
}

fn format_tick_time(timestamp: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp) {
        Some(utc) => utc.format("%H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

fn format_value(value: f64) -> String {
    if value == value.trunc() {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
