pub mod diff;
pub mod recording;

pub use diff::*;
pub use recording::*;

use overlay::plan::OverlayPlan;

/// A declarative rendering sink (a map widget, in practice).
///
/// The sink receives the full desired state on every submission. It must
/// support placing markers with a label and avatar reference, drawing line
/// segments, circles, and setting the visible bounding region;
/// `ViewportAction::Keep` means leave the camera alone. Sinks that animate
/// transitions can diff for themselves or use [`PlanDiff`].
pub trait RenderSurface {
    fn apply(&mut self, plan: &OverlayPlan);
}
