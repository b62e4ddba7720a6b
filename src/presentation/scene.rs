// Drawable scene graph and its SVG serialization
use std::fmt::Write;

/// Pixel dimensions the renderer is asked to fill. Renderers keep no layout
/// state of their own, so resizing is just a re-render with a new viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot area for axis labels and the legend strip.
#[derive(Debug, Clone, Copy)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One drawable element. Coordinates are absolute within the viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A connected polyline through `points`, stroked but not filled.
    Path {
        points: Vec<(f64, f64)>,
        stroke: String,
        stroke_width: f64,
    },
    /// A point marker. `title` becomes a hover tooltip.
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        title: Option<String>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: TextAnchor,
    },
}

/// The renderer's output: an ordered list of drawable nodes for one
/// viewport. The host either inspects the nodes directly or serializes the
/// whole scene to an SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn paths(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| matches!(n, Node::Path { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| matches!(n, Node::Text { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| matches!(n, Node::Rect { .. }))
    }

    /// Serialize to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.0} {h:.0}\">",
            w = self.viewport.width,
            h = self.viewport.height,
        );

        for node in &self.nodes {
            match node {
                Node::Path {
                    points,
                    stroke,
                    stroke_width,
                } => {
                    let _ = write!(
                        svg,
                        "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                        path_data(points),
                        stroke,
                        stroke_width,
                    );
                }
                Node::Circle {
                    cx,
                    cy,
                    r,
                    fill,
                    title,
                } => match title {
                    Some(title) => {
                        let _ = write!(
                            svg,
                            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r}\" fill=\"{fill}\"><title>{}</title></circle>",
                            escape(title),
                        );
                    }
                    None => {
                        let _ = write!(
                            svg,
                            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r}\" fill=\"{fill}\"/>",
                        );
                    }
                },
                Node::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    let _ = write!(
                        svg,
                        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{fill}\"/>",
                    );
                }
                Node::Line { x1, y1, x2, y2, stroke } => {
                    let _ = write!(
                        svg,
                        "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{stroke}\"/>",
                    );
                }
                Node::Text {
                    x,
                    y,
                    content,
                    anchor,
                } => {
                    let anchor = match anchor {
                        TextAnchor::Start => "start",
                        TextAnchor::Middle => "middle",
                        TextAnchor::End => "end",
                    };
                    let _ = write!(
                        svg,
                        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\">{}</text>",
                        escape(content),
                    );
                }
            }
        }

        svg.push_str("</svg>");
        svg
    }
}

fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{}{x:.2},{y:.2}", if i == 0 { "" } else { " " }, command);
    }
    d
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
