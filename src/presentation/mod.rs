// Presentation layer - scene graph, scales and the chart renderers
pub mod chart;
pub mod scale;
pub mod scene;
pub mod sparkline;
pub mod targets;
