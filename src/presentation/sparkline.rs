// Sparkline renderer - tiny single-series preview without axes or legend
use crate::domain::reading::Reading;
use crate::presentation::scale::{LinearScale, TimeScale};
use crate::presentation::scene::{Node, Scene, Viewport};

/// Default compact viewport for the hover preview next to a category row.
pub const SPARKLINE_VIEWPORT: Viewport = Viewport::new(120.0, 20.0);

const SPARKLINE_MARGIN: f64 = 5.0;
const LINE_COLOR: &str = "#ffffff";
const ACCENT_COLOR: &str = "#ff158a";
const ACCENT_RADIUS: f64 = 2.0;

/// Render a single series as a bare line with an accent marker on its final
/// element. The Y domain is anchored at the series' own minimum (not zero)
/// to maximize visible variation in the tiny viewport.
///
/// The series is assumed, not checked, to be time-ordered; an out-of-order
/// series just gets its accent on whatever element happens to be last.
/// Empty input produces no scene.
pub fn render_sparkline(series: &[Reading], viewport: Viewport) -> Option<Scene> {
    let last = series.last()?;

    let (mut t_min, mut t_max) = (last.timestamp, last.timestamp);
    let (mut v_min, mut v_max) = (last.value, last.value);
    for r in series {
        t_min = t_min.min(r.timestamp);
        t_max = t_max.max(r.timestamp);
        v_min = v_min.min(r.value);
        v_max = v_max.max(r.value);
    }

    let width = (viewport.width - 2.0 * SPARKLINE_MARGIN).max(1.0);
    let height = (viewport.height - 2.0 * SPARKLINE_MARGIN).max(1.0);
    let x = TimeScale::new((t_min, t_max), (SPARKLINE_MARGIN, SPARKLINE_MARGIN + width));
    let y = LinearScale::new((v_min, v_max), (SPARKLINE_MARGIN + height, SPARKLINE_MARGIN));

    let mut scene = Scene::new(viewport);
    scene.push(Node::Path {
        points: series
            .iter()
            .map(|r| (x.scale(r.timestamp), y.scale(r.value)))
            .collect(),
        stroke: LINE_COLOR.to_string(),
        stroke_width: 2.0,
    });
    scene.push(Node::Circle {
        cx: x.scale(last.timestamp),
        cy: y.scale(last.value),
        r: ACCENT_RADIUS,
        fill: ACCENT_COLOR.to_string(),
        title: None,
    });

    Some(scene)
}
