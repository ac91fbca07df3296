//! Discrete stepped-timeline state.
//!
//! Owns the active marker count and the marker positions. Slot pitch is
//! derived from the configured maximum, never the active count, so existing
//! markers keep their place as steps come and go.

use tracing::warn;

use crate::geometry::{self, Segment, TrackGeometry};

/// Structural change produced by one increment/decrement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StepDelta {
    /// A marker was appended at `position` (center x).
    Added { index: usize, position: f64 },
    /// The last marker was removed.
    Removed { index: usize, position: f64 },
    /// Increment no-op: the timeline already holds `max_steps + 1` markers.
    AtCapacity,
    /// Decrement no-op: a timeline never drops below one marker.
    AtFloor,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TimelineState {
    active: usize,
    max_steps: usize,
    markers: Vec<f64>,
    interval: f64,
    /// Center x of slot 0, fixed by the current geometry.
    origin: f64,
    /// Center-to-center distance between adjacent slots.
    pitch: f64,
}

impl TimelineState {
    /// Lays out `initial_steps` markers over a track subdivided into
    /// `max_steps` intervals.
    pub fn new(initial_steps: usize, max_steps: usize, geometry: &TrackGeometry) -> Self {
        let max_steps = max_steps.max(1);
        let mut state = Self {
            active: initial_steps.clamp(1, max_steps),
            max_steps,
            markers: Vec::new(),
            interval: 0.0,
            origin: 0.0,
            pitch: 0.0,
        };
        state.resize(geometry);
        state
    }

    pub fn count(&self) -> usize {
        self.active
    }

    pub fn markers(&self) -> &[f64] {
        &self.markers
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Appends one marker at the next slot, up to `max_steps + 1`.
    pub fn increment(&mut self) -> StepDelta {
        if self.active > self.max_steps {
            return StepDelta::AtCapacity;
        }
        let index = self.active;
        let position = self.origin + index as f64 * self.pitch;
        self.markers.push(position);
        self.active += 1;
        StepDelta::Added { index, position }
    }

    /// Removes the last marker, down to one.
    pub fn decrement(&mut self) -> StepDelta {
        if self.active <= 1 {
            return StepDelta::AtFloor;
        }
        self.active -= 1;
        let position = self.markers.pop().unwrap_or_default();
        StepDelta::Removed {
            index: self.active,
            position,
        }
    }

    /// Recomputes spacing and every marker position for a new track width.
    /// The active count is untouched.
    pub fn resize(&mut self, geometry: &TrackGeometry) {
        let spacing = geometry::marker_spacing(
            geometry.timeline_width(),
            self.max_steps,
            geometry.marker_radius,
        );
        if spacing.overcrowded {
            warn!(
                track_width = geometry.track_width,
                max_steps = self.max_steps,
                "track too narrow for the configured step count; clamping marker spacing to zero"
            );
        }
        self.interval = spacing.interval;
        self.origin = geometry::slot_center(0, self.interval, geometry);
        self.pitch = self.interval + 2.0 * geometry.marker_radius;
        self.markers = (0..self.active)
            .map(|i| self.origin + i as f64 * self.pitch)
            .collect();
    }

    /// Connecting-segment bounds spanning the active markers.
    pub fn segment(&self, geometry: &TrackGeometry) -> Segment {
        geometry::timeline_segment(self.active, self.interval, geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geometry() -> TrackGeometry {
        TrackGeometry::new(300.0)
    }

    #[test]
    fn increments_cap_at_max_plus_one() {
        let g = geometry();
        let mut state = TimelineState::new(1, 5, &g);
        assert_eq!(state.count(), 1);
        for expected in 2..=6 {
            assert!(matches!(state.increment(), StepDelta::Added { .. }));
            assert_eq!(state.count(), expected);
        }
        assert_eq!(state.increment(), StepDelta::AtCapacity);
        assert_eq!(state.count(), 6);
        assert_eq!(state.markers().len(), 6);
    }

    #[test]
    fn decrements_floor_at_one() {
        let g = geometry();
        let mut state = TimelineState::new(3, 5, &g);
        assert!(matches!(state.decrement(), StepDelta::Removed { index: 2, .. }));
        assert!(matches!(state.decrement(), StepDelta::Removed { index: 1, .. }));
        assert_eq!(state.decrement(), StepDelta::AtFloor);
        assert_eq!(state.count(), 1);
        assert_eq!(state.markers().len(), 1);
    }

    #[test]
    fn initial_count_is_clamped_to_the_configured_range() {
        let g = geometry();
        assert_eq!(TimelineState::new(0, 5, &g).count(), 1);
        assert_eq!(TimelineState::new(9, 5, &g).count(), 5);
    }

    #[test]
    fn appended_markers_keep_the_slot_pitch() {
        let g = geometry();
        let mut state = TimelineState::new(1, 5, &g);
        state.increment();
        state.increment();
        let m = state.markers();
        let pitch = state.interval() + 2.0 * g.marker_radius;
        assert!((m[1] - m[0] - pitch).abs() < 1e-9);
        assert!((m[2] - m[1] - pitch).abs() < 1e-9);
    }

    #[test]
    fn resize_repositions_without_changing_the_count() {
        let g = geometry();
        let mut state = TimelineState::new(4, 5, &g);
        let before = state.interval();
        let wider = TrackGeometry::new(600.0);
        state.resize(&wider);
        assert_eq!(state.count(), 4);
        assert_eq!(state.markers().len(), 4);
        assert!(state.interval() > before);
        let pitch = state.interval() + 2.0 * wider.marker_radius;
        for w in state.markers().windows(2) {
            assert!((w[1] - w[0] - pitch).abs() < 1e-9);
        }
    }

    #[test]
    fn segment_spans_the_active_markers() {
        let g = geometry();
        let mut state = TimelineState::new(1, 5, &g);
        assert_eq!(state.segment(&g).width, 0.0);
        state.increment();
        assert!((state.segment(&g).width - state.interval()).abs() < 1e-9);
        state.increment();
        let expected = 2.0 * state.interval() + 2.0 * g.marker_radius;
        assert!((state.segment(&g).width - expected).abs() < 1e-9);
    }

    #[test]
    fn overcrowded_track_clamps_spacing_to_zero() {
        let g = TrackGeometry::new(40.0);
        let state = TimelineState::new(3, 8, &g);
        assert_eq!(state.interval(), 0.0);
        // Markers still lay out shoulder to shoulder.
        let m = state.markers();
        assert!((m[1] - m[0] - 2.0 * g.marker_radius).abs() < 1e-9);
    }

    proptest! {
        /// The marker list always mirrors the active count, whatever the
        /// operation order.
        #[test]
        fn marker_list_tracks_the_count(
            initial in 0usize..10,
            ops in prop::collection::vec(prop::bool::ANY, 0..30),
        ) {
            let g = geometry();
            let mut state = TimelineState::new(initial, 5, &g);
            for grow in ops {
                if grow {
                    state.increment();
                } else {
                    state.decrement();
                }
                prop_assert_eq!(state.markers().len(), state.count());
                prop_assert!(state.count() >= 1 && state.count() <= 6);
            }
        }
    }
}
