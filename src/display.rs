//! Layout display sinks.
//!
//! The optimizer hands the initial and the optimized layout to a
//! [`LayoutSink`] together with a title. What the sink does with them
//! (render, print, store) is up to the caller.

use crate::geometry::ShapeRecord;
use log::info;

/// Title used for the layout before optimization.
pub const INITIAL_LAYOUT_TITLE: &str = "Initial Layout - Particle Swarm";

/// Title used for the optimized layout.
pub const OPTIMIZED_LAYOUT_TITLE: &str = "Optimized Layout - Particle Swarm";

/// Receives layouts to display.
///
/// Implemented for any `Fn(&[ShapeRecord], &str)`.
pub trait LayoutSink {
    fn display_layout(&self, layout: &[ShapeRecord], title: &str);
}

impl<F> LayoutSink for F
where
    F: Fn(&[ShapeRecord], &str),
{
    fn display_layout(&self, layout: &[ShapeRecord], title: &str) {
        self(layout, title)
    }
}

/// Writes layouts to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LayoutSink for LogSink {
    fn display_layout(&self, layout: &[ShapeRecord], title: &str) {
        info!("{title} ({} shapes)", layout.len());
        for (i, record) in layout.iter().enumerate() {
            let dims = match (record.width, record.height, record.radius) {
                (Some(w), Some(h), _) => format!("{w} x {h}"),
                (_, _, Some(r)) => format!("r = {r}"),
                _ => "?".to_string(),
            };
            match record.position() {
                Some(p) => info!("  #{i} {} {dims} at ({:.3}, {:.3})", record.kind, p.x, p.y),
                None => info!("  #{i} {} {dims}", record.kind),
            }
        }
    }
}
