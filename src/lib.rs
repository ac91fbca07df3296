//! # floem-timeline
//!
//! A dual-mode range/timeline selector widget for [Floem](https://github.com/lapce/floem).
//!
//! Two widgets share one track vocabulary:
//!
//! - [`range_selector`]: two draggable thumbs over 0–100, kept at least ten
//!   percent apart, joined by a connecting segment.
//! - [`stepped_timeline`]: a fixed row of evenly spaced slots whose active
//!   markers are added and removed by horizontal swipes.
//!
//! A widget is one mode or the other for its whole life; the modes are
//! separate view types, not a runtime flag.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_timeline::range_selector;
//!
//! let first = RwSignal::new(50.0);
//! let second = RwSignal::new(100.0);
//! // Use `range_selector(first, second)` in your Floem view tree.
//! ```

mod constants;
mod controller;
mod geometry;
mod range;
mod range_view;
mod render;
mod timeline;
mod timeline_view;

pub use geometry::{Segment, TrackGeometry};
pub use range::Handle;
pub use range_view::{range_selector, RangeSelector};
pub use render::{ControlObserver, RenderAdapter};
pub use timeline_view::{stepped_timeline, SteppedTimeline};
