//! Viewport and interaction controller.
//!
//! Owns the canvas [`Transform`] and the interaction state machine: panning
//! on empty canvas, zooming around a fixed point, dragging frames to custom
//! positions, and programmatic focus-and-center. This is the only component
//! holding mutable state; planners, router, and scheduler stay pure.
//!
//! Continuous updates (pan/zoom) go through a single-slot mailbox and are
//! committed at most once per display frame via [`ViewportController::commit_frame`];
//! the most recent pending value always wins. Invalid transforms are
//! rejected before application, keeping the last known-good transform.

use indexmap::IndexMap;
use log::{debug, trace, warn};

use atelier_core::{
    geometry::{Point, Rect, Size},
    identifier::ArtifactId,
    transform::Transform,
};

use crate::config::ViewportConfig;

/// Dragged frames snap to multiples of this many content units on release.
pub const SNAP_GRID_UNIT: f32 = 25.0;

/// The current interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// No pointer interaction in progress.
    Idle,
    /// Dragging on empty canvas; the transform translation follows.
    Panning {
        /// Screen position of the last processed pointer event.
        last: Point,
    },
    /// Dragging a frame; panning is suspended.
    DraggingFrame {
        id: ArtifactId,
        /// Offset from the frame origin to the grab point, in content units.
        grab_offset: Point,
        /// Live frame origin while the drag is in flight.
        current: Point,
    },
    /// A programmatic focus-and-center operation awaiting its corrective
    /// re-measurement.
    Focusing {
        generation: u64,
        id: ArtifactId,
        target: Rect,
    },
}

/// Owns the pan/zoom transform, custom overrides, and interaction state.
#[derive(Debug)]
pub struct ViewportController {
    config: ViewportConfig,
    viewport_size: Size,
    transform: Transform,
    pending: Option<Transform>,
    interaction: Interaction,
    overrides: IndexMap<ArtifactId, Point>,
    focus_generation: u64,
}

impl ViewportController {
    /// Creates a controller for a viewport of the given screen size.
    pub fn new(config: ViewportConfig, viewport_size: Size) -> Self {
        Self {
            config,
            viewport_size,
            transform: Transform::default(),
            pending: None,
            interaction: Interaction::Idle,
            overrides: IndexMap::new(),
            focus_generation: 0,
        }
    }

    /// The current committed transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The current interaction state.
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// The screen size of the viewport.
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Updates the viewport screen size (host window resized).
    pub fn resize(&mut self, viewport_size: Size) {
        self.viewport_size = viewport_size;
    }

    /// Restores a transform from persisted state.
    ///
    /// Invalid persisted values are ignored and the current transform kept.
    pub fn restore_transform(&mut self, transform: Transform) {
        if transform.is_valid() {
            self.transform = transform;
        } else {
            warn!(scale = transform.scale(); "Ignoring invalid persisted transform");
        }
    }

    /// The custom position overrides, in insertion order.
    pub fn overrides(&self) -> &IndexMap<ArtifactId, Point> {
        &self.overrides
    }

    /// Restores overrides from persisted state.
    pub fn restore_overrides(&mut self, overrides: IndexMap<ArtifactId, Point>) {
        self.overrides = overrides;
    }

    /// Clears one override; returns whether it existed.
    pub fn clear_override(&mut self, id: ArtifactId) -> bool {
        self.overrides.shift_remove(&id).is_some()
    }

    /// Begins an interaction at `screen`.
    ///
    /// A hit on a frame starts a drag (`hit` carries the frame's
    /// authoritative content origin); empty canvas starts a pan. Either way
    /// an in-flight focus is superseded.
    pub fn pointer_down(&mut self, screen: Point, hit: Option<(ArtifactId, Point)>) {
        self.cancel_focus();
        self.interaction = match hit {
            Some((id, origin)) => {
                let grab_offset = self.transform.to_content(screen).sub(origin);
                trace!(id = id.name(); "Starting frame drag");
                Interaction::DraggingFrame {
                    id,
                    grab_offset,
                    current: origin,
                }
            }
            None => Interaction::Panning { last: screen },
        };
    }

    /// Processes pointer movement for the active interaction.
    pub fn pointer_move(&mut self, screen: Point) {
        match self.interaction {
            Interaction::Panning { last } => {
                let delta = screen.sub(last);
                let latest = self.latest();
                self.request(latest.with_translate(latest.translate().add(delta)));
                self.interaction = Interaction::Panning { last: screen };
            }
            Interaction::DraggingFrame {
                id, grab_offset, ..
            } => {
                let current = self.transform.to_content(screen).sub(grab_offset);
                self.interaction = Interaction::DraggingFrame {
                    id,
                    grab_offset,
                    current,
                };
            }
            Interaction::Idle | Interaction::Focusing { .. } => {}
        }
    }

    /// Ends the active interaction.
    ///
    /// Releasing a dragged frame snaps its position to the grid and records
    /// it as a custom override; the override is returned so the host can
    /// persist it.
    pub fn pointer_up(&mut self) -> Option<(ArtifactId, Point)> {
        match self.interaction {
            Interaction::DraggingFrame { id, current, .. } => {
                let snapped = current.snapped(SNAP_GRID_UNIT);
                self.overrides.insert(id, snapped);
                self.interaction = Interaction::Idle;
                debug!(id = id.name(), x = snapped.x(), y = snapped.y(); "Frame drag settled");
                Some((id, snapped))
            }
            Interaction::Panning { .. } => {
                self.interaction = Interaction::Idle;
                None
            }
            Interaction::Idle | Interaction::Focusing { .. } => None,
        }
    }

    /// The live position of the frame being dragged, if any.
    pub fn drag_preview(&self) -> Option<(ArtifactId, Point)> {
        match self.interaction {
            Interaction::DraggingFrame { id, current, .. } => Some((id, current)),
            _ => None,
        }
    }

    /// Zooms by `factor` around a screen anchor, clamped to the configured
    /// bounds. The content point under the anchor stays stationary.
    pub fn zoom_by(&mut self, factor: f32, anchor: Point) {
        self.zoom_to(self.latest().scale() * factor, anchor);
    }

    /// Zooms to an absolute scale around a screen anchor.
    pub fn zoom_to(&mut self, scale: f32, anchor: Point) {
        self.cancel_focus();
        let scale = self.config.clamp_zoom(scale);
        let content = self.latest().to_content(anchor);
        let translate = anchor.sub(content.scale(scale));
        self.request(Transform::new(scale, translate));
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.cancel_focus();
        let latest = self.latest();
        self.request(latest.with_translate(latest.translate().add(delta)));
    }

    /// Applies the latest pending transform, if any.
    ///
    /// Called once per display frame by the host; intermediate values that
    /// were superseded before the frame are never applied.
    pub fn commit_frame(&mut self) -> bool {
        match self.pending.take() {
            Some(next) if next.is_valid() => {
                self.transform = next;
                true
            }
            Some(next) => {
                warn!(scale = next.scale(); "Rejecting invalid transform, keeping last known-good");
                false
            }
            None => false,
        }
    }

    /// Starts a focus-and-center operation on `target` (a live measurement
    /// when the frame is mounted, else the computed rect).
    ///
    /// The fitting transform applies immediately; the returned generation
    /// token must accompany the corrective call to [`Self::correct_focus`].
    pub fn focus_on(&mut self, id: ArtifactId, target: Rect) -> u64 {
        self.focus_generation += 1;
        let generation = self.focus_generation;

        if let Some(transform) = self.fitting_transform(target) {
            self.apply(transform);
            self.interaction = Interaction::Focusing {
                generation,
                id,
                target,
            };
            debug!(id = id.name(), generation; "Focusing on artifact");
        }
        generation
    }

    /// Applies the one corrective nudge of a focus operation.
    ///
    /// Ignored unless `generation` still names the in-flight focus: a newer
    /// focus or any manual pan/zoom supersedes it. The view is nudged only
    /// when the re-measured rect has drifted more than the configured pixel
    /// threshold. Returns whether a nudge was applied.
    pub fn correct_focus(&mut self, generation: u64, measured: Rect) -> bool {
        let current = matches!(
            self.interaction,
            Interaction::Focusing { generation: g, .. } if g == generation
        );
        if !current {
            trace!(generation; "Stale focus correction ignored");
            return false;
        }
        self.interaction = Interaction::Idle;

        let Some(ideal) = self.fitting_transform(measured) else {
            return false;
        };
        let drift = ideal
            .translate()
            .sub(self.transform.translate());
        let drift_px = drift.x().hypot(drift.y());
        if drift_px > self.config.focus_drift_threshold() {
            self.apply(ideal);
            debug!(generation, drift_px; "Focus corrected after re-measurement");
            return true;
        }
        false
    }

    /// The artifact a focus operation is keeping force-mounted, if any.
    pub fn focusing_artifact(&self) -> Option<ArtifactId> {
        match self.interaction {
            Interaction::Focusing { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Computes the transform that centers `target` at a scale fitting it
    /// with the configured fractional padding, clamped to the zoom bounds.
    fn fitting_transform(&self, target: Rect) -> Option<Transform> {
        if target.width() <= 0.0 || target.height() <= 0.0 {
            return None;
        }
        let padded = 1.0 + self.config.focus_padding();
        let scale_x = self.viewport_size.width() / (target.width() * padded);
        let scale_y = self.viewport_size.height() / (target.height() * padded);
        let scale = self.config.clamp_zoom(scale_x.min(scale_y));

        let viewport_center = Point::new(
            self.viewport_size.width() / 2.0,
            self.viewport_size.height() / 2.0,
        );
        let translate = viewport_center.sub(target.center().scale(scale));
        Some(Transform::new(scale, translate))
    }

    /// The newest transform: the pending mailbox value when one exists,
    /// else the committed transform. Gestures accumulate against this so a
    /// burst of events within one frame is not lost.
    fn latest(&self) -> Transform {
        self.pending.unwrap_or(self.transform)
    }

    /// Supersedes any in-flight focus operation.
    fn cancel_focus(&mut self) {
        if matches!(self.interaction, Interaction::Focusing { .. }) {
            self.interaction = Interaction::Idle;
        }
    }

    /// Stores a candidate transform in the single-slot mailbox.
    fn request(&mut self, transform: Transform) {
        if transform.is_valid() {
            self.pending = Some(transform);
        } else {
            warn!(scale = transform.scale(); "Rejecting invalid transform request");
        }
    }

    /// Applies a transform immediately, bypassing the mailbox.
    ///
    /// Used by programmatic jumps (focus); still validated.
    fn apply(&mut self, transform: Transform) {
        if transform.is_valid() {
            self.transform = transform;
            self.pending = None;
        } else {
            warn!(scale = transform.scale(); "Rejecting invalid transform, keeping last known-good");
        }
    }
}
