//! Continuous two-thumb range state.
//!
//! Owns the pair of percent values and enforces the ordering invariant
//! `first + min_gap <= second` together with the 0–100 bounds. Every
//! mutation clamps; nothing here fails or panics.

use crate::constants;
use crate::geometry::{self, Segment, TrackGeometry};

/// One of the two draggable thumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    First,
    Second,
}

impl Handle {
    pub(crate) fn index(self) -> usize {
        match self {
            Handle::First => 0,
            Handle::Second => 1,
        }
    }
}

/// Which invariant absorbed an out-of-range drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clamp {
    /// The moving thumb was snapped to `min_gap` from the other thumb.
    Gap,
    /// The moving thumb was snapped to the nearest track bound.
    Bound,
}

/// Result of one drag step: the updated pair plus the clamp, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragOutcome {
    pub first: f64,
    pub second: f64,
    pub clamp: Option<Clamp>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RangeState {
    first: f64,
    second: f64,
    min_gap: f64,
}

impl RangeState {
    pub fn new(first: f64, second: f64) -> Self {
        let mut state = Self {
            first: 0.0,
            second: 100.0,
            min_gap: constants::MIN_GAP,
        };
        state.set_both(first, second);
        state
    }

    pub fn values(&self) -> (f64, f64) {
        (self.first, self.second)
    }

    /// Moves the first thumb, clamped against the current second value.
    pub fn set_first(&mut self, value: f64) {
        self.first = value.clamp(0.0, self.second - self.min_gap);
    }

    /// Moves the second thumb, clamped against the current first value.
    pub fn set_second(&mut self, value: f64) {
        self.second = value.clamp(self.first + self.min_gap, 100.0);
    }

    /// Moves both thumbs atomically.
    ///
    /// An invalid pair is clamped to the nearest valid configuration: the
    /// value closer to zero keeps its place and the other is pushed out to
    /// `min_gap` distance, spilling back only at the 100 end.
    pub fn set_both(&mut self, first: f64, second: f64) {
        self.first = first.clamp(0.0, 100.0 - self.min_gap);
        self.second = second.clamp(0.0, 100.0);
        if self.second - self.first < self.min_gap {
            self.second = self.first + self.min_gap;
            if self.second > 100.0 {
                self.second = 100.0;
                self.first = self.second - self.min_gap;
            }
        }
    }

    /// Applies one drag step to `handle`.
    ///
    /// The pixel delta is converted through the track zone, the thumb is
    /// tentatively moved, and the invariants are re-checked gap first, then
    /// bounds. At most one clamp applies per call; a gap clamp shadows the
    /// bound check.
    pub fn apply_drag(
        &mut self,
        handle: Handle,
        pixel_delta: f64,
        geometry: &TrackGeometry,
    ) -> DragOutcome {
        let delta = geometry::percent_delta(pixel_delta, geometry.zone_width());
        let clamp = match handle {
            Handle::First => {
                let target = self.first + delta;
                if target > self.second - self.min_gap {
                    self.first = self.second - self.min_gap;
                    Some(Clamp::Gap)
                } else if target < 0.0 {
                    self.first = 0.0;
                    Some(Clamp::Bound)
                } else {
                    self.first = target;
                    None
                }
            }
            Handle::Second => {
                let target = self.second + delta;
                if target < self.first + self.min_gap {
                    self.second = self.first + self.min_gap;
                    Some(Clamp::Gap)
                } else if target > 100.0 {
                    self.second = 100.0;
                    Some(Clamp::Bound)
                } else {
                    self.second = target;
                    None
                }
            }
        };
        DragOutcome {
            first: self.first,
            second: self.second,
            clamp,
        }
    }

    /// Connecting-segment bounds for the current pair.
    pub fn segment(&self, geometry: &TrackGeometry) -> Segment {
        geometry::range_segment(self.first, self.second, geometry)
    }
}
