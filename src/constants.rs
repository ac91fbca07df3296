//! Sizing and styling constants for the selector widgets.

/// Draggable thumb diameter (range mode and active timeline markers)
pub const THUMB_SIZE: f64 = 32.0;

/// Fixed track marker radius (end stops and timeline slots)
pub const MARKER_RADIUS: f64 = 8.0;

/// Horizontal margin excluded from the draggable zone
pub const TRACK_MARGIN: f64 = 2.0;

/// Minimum percent distance kept between the two range handles
pub const MIN_GAP: f64 = 10.0;

/// Half the horizontal split between coincident handle anchors
pub const ANCHOR_SPLIT: f64 = 5.0;

/// Vertical offset of the track circles within the widget
pub const TRACK_TOP: f64 = 10.0;

/// Vertical center line of thumbs, markers, and segment
pub const TRACK_CENTER_Y: f64 = 18.0;

/// Connecting segment thickness
pub const SEGMENT_HEIGHT: f64 = 3.0;

/// Minimum horizontal pointer travel for a release to count as a swipe
pub const SWIPE_THRESHOLD: f64 = 24.0;

/// Default widget height
pub const WIDGET_HEIGHT: f32 = 36.0;
