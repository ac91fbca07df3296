//! Track geometry — percent/pixel mapping and marker layout.
//!
//! All mapping here is pure. Percent values run 0–100 along the logical
//! track; pixel values are local widget coordinates.

use crate::constants;

/// Pixel dimensions of a selector track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    /// Full widget width in pixels.
    pub track_width: f64,
    /// Draggable thumb diameter.
    pub thumb_size: f64,
    /// Fixed marker radius.
    pub marker_radius: f64,
    /// Horizontal margin excluded from the draggable zone.
    pub margin: f64,
}

impl TrackGeometry {
    pub fn new(track_width: f64) -> Self {
        Self {
            track_width,
            thumb_size: constants::THUMB_SIZE,
            marker_radius: constants::MARKER_RADIUS,
            margin: constants::TRACK_MARGIN,
        }
    }

    /// Overrides the default thumb diameter.
    pub fn thumb_size(mut self, thumb_size: f64) -> Self {
        self.thumb_size = thumb_size;
        self
    }

    /// Pixel span over which a thumb center may travel.
    pub fn zone_width(&self) -> f64 {
        (self.track_width - self.thumb_size - self.margin).max(0.0)
    }

    /// Width available to timeline slots, excluding the end-stop circles.
    pub(crate) fn timeline_width(&self) -> f64 {
        (self.track_width - 4.0 * self.marker_radius - self.margin).max(0.0)
    }
}

/// Connecting-segment bounds, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub start: f64,
    pub width: f64,
}

/// Left/right anchor points for a thumb at a given percent.
///
/// The two anchors sit [`constants::ANCHOR_SPLIT`] to either side of the
/// nominal center so coincident thumbs never render at identical positions:
/// the first thumb uses `left`, the second `right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HandleAnchors {
    pub left: f64,
    pub right: f64,
}

/// Maps a percent in 0–100 to the thumb anchor points.
pub(crate) fn handle_anchors(percent: f64, geometry: &TrackGeometry) -> HandleAnchors {
    let center = geometry.zone_width() * percent / 100.0
        + geometry.margin / 2.0
        + geometry.thumb_size / 2.0;
    HandleAnchors {
        left: center - constants::ANCHOR_SPLIT,
        right: center + constants::ANCHOR_SPLIT,
    }
}

/// Converts a pixel delta into a percent delta.
///
/// Exact algebraic inverse of the scale term in [`handle_anchors`], so a
/// drag followed by its undo returns to the original percent.
pub(crate) fn percent_delta(pixel_delta: f64, zone_width: f64) -> f64 {
    if zone_width <= 0.0 {
        return 0.0;
    }
    pixel_delta * 100.0 / zone_width
}

/// Inter-marker spacing for a timeline track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MarkerSpacing {
    /// Free pixels between two adjacent marker circles.
    pub interval: f64,
    /// The track cannot fit `step_count` markers without negative spacing.
    pub overcrowded: bool,
}

/// Computes the free interval between adjacent markers when `timeline_width`
/// is subdivided into `step_count` slots of `2 * marker_radius` each.
///
/// Callers must guard `step_count > 0`. A too-narrow track clamps the
/// interval to 0 and flags the condition instead of producing a negative
/// layout.
pub(crate) fn marker_spacing(
    timeline_width: f64,
    step_count: usize,
    marker_radius: f64,
) -> MarkerSpacing {
    debug_assert!(step_count > 0);
    let steps = step_count as f64;
    let interval = (timeline_width - steps * 2.0 * marker_radius) / steps - 1.0;
    MarkerSpacing {
        interval: interval.max(0.0),
        overcrowded: interval < 0.0,
    }
}

/// Center x of timeline slot `index`, given the current spacing.
pub(crate) fn slot_center(index: usize, interval: f64, geometry: &TrackGeometry) -> f64 {
    index as f64 * (interval + 2.0 * geometry.marker_radius)
        + geometry.margin / 2.0
        + geometry.marker_radius
}

/// Connecting-segment bounds between the two range thumbs.
pub(crate) fn range_segment(first: f64, second: f64, geometry: &TrackGeometry) -> Segment {
    let zone = geometry.zone_width();
    Segment {
        start: zone * first / 100.0 + geometry.thumb_size / 2.0,
        width: zone * (second - first) / 100.0,
    }
}

/// Length of the segment spanning `active_count` timeline markers.
///
/// Runs from the right edge of the first marker to the left edge of the
/// last; a single marker has nothing to connect.
pub(crate) fn timeline_segment(
    active_count: usize,
    interval: f64,
    geometry: &TrackGeometry,
) -> Segment {
    let start = geometry.margin / 2.0 + 2.0 * geometry.marker_radius;
    if active_count < 2 {
        return Segment { start, width: 0.0 };
    }
    let n = active_count as f64;
    Segment {
        start,
        width: (n - 1.0) * interval + (n - 2.0) * 2.0 * geometry.marker_radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geometry() -> TrackGeometry {
        // 300px draggable zone with the default 32px thumb and 2px margin.
        TrackGeometry::new(334.0)
    }

    #[test]
    fn zone_width_excludes_thumb_and_margin() {
        assert_eq!(geometry().zone_width(), 300.0);
    }

    #[test]
    fn zone_width_clamps_at_zero() {
        assert_eq!(TrackGeometry::new(10.0).zone_width(), 0.0);
    }

    #[test]
    fn anchors_split_around_the_center() {
        let g = geometry();
        let a = handle_anchors(50.0, &g);
        assert_eq!(a.right - a.left, 2.0 * constants::ANCHOR_SPLIT);
        assert!((a.left - (150.0 + 1.0 + 16.0 - 5.0)).abs() < 1e-9);
    }

    #[test]
    fn percent_delta_ignores_degenerate_zone() {
        assert_eq!(percent_delta(40.0, 0.0), 0.0);
    }

    #[test]
    fn spacing_for_a_comfortable_track() {
        let s = marker_spacing(300.0, 5, 8.0);
        assert!(!s.overcrowded);
        assert!((s.interval - 43.0).abs() < 1e-9);
    }

    #[test]
    fn spacing_clamps_when_overcrowded() {
        let s = marker_spacing(30.0, 5, 8.0);
        assert!(s.overcrowded);
        assert_eq!(s.interval, 0.0);
    }

    #[test]
    fn timeline_segment_spans_marker_edges() {
        let g = geometry();
        let interval = 43.0;
        // One marker: nothing to connect.
        assert_eq!(timeline_segment(1, interval, &g).width, 0.0);
        // Two markers: exactly the gap between their facing edges.
        assert_eq!(timeline_segment(2, interval, &g).width, interval);
        // Width grows by one interval plus one marker diameter per step.
        let w3 = timeline_segment(3, interval, &g).width;
        assert_eq!(w3, 2.0 * interval + 2.0 * 8.0);
        // Consistent with the slot layout.
        let edge_to_edge =
            (slot_center(2, interval, &g) - g.marker_radius) - (slot_center(0, interval, &g) + g.marker_radius);
        assert!((w3 - edge_to_edge).abs() < 1e-9);
    }

    #[test]
    fn range_segment_matches_anchor_span() {
        let g = geometry();
        let s = range_segment(20.0, 60.0, &g);
        assert!((s.width - 120.0).abs() < 1e-9);
        // Segment midpoint sits at the midpoint percent.
        let mid = s.start + s.width / 2.0;
        assert!((mid - (g.zone_width() * 40.0 / 100.0 + g.thumb_size / 2.0)).abs() < 1e-9);
    }

    proptest! {
        /// Forward mapping then the inverse scale round-trips within 1e-3.
        #[test]
        fn percent_round_trips(p in 0.0f64..=100.0) {
            let g = geometry();
            let dx = handle_anchors(p, &g).left - handle_anchors(0.0, &g).left;
            let back = percent_delta(dx, g.zone_width());
            prop_assert!((back - p).abs() < 1e-3);
        }

        /// Slot pitch is constant: one interval plus one marker diameter.
        #[test]
        fn slot_pitch_is_constant(i in 0usize..32, width in 100.0f64..2000.0) {
            let g = TrackGeometry::new(width);
            let s = marker_spacing(g.timeline_width(), 5, g.marker_radius);
            let pitch = slot_center(i + 1, s.interval, &g) - slot_center(i, s.interval, &g);
            prop_assert!((pitch - (s.interval + 2.0 * g.marker_radius)).abs() < 1e-9);
        }
    }
}
