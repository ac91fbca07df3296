//! Continuous two-thumb range selector.
//!
//! The view owns a [`RangeController`] and feeds it pointer deltas; painting
//! reads back the target geometry the controller pushed into the scene.

use floem::kurbo::{Circle, Line, Point, Rect, Stroke};
use floem::peniko::Color;

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::constants;
use crate::controller::RangeController;
use crate::geometry::TrackGeometry;
use crate::range::Handle;
use crate::render::{ControlObserver, Scene};

enum RangeUpdate {
    Values(f64, f64),
}

/// Relays controller notifications to the host callbacks and the signals.
struct RangeObserver<'a> {
    write_back: Option<&'a dyn Fn(f64, f64)>,
    on_dragging: Option<&'a dyn Fn(f64, f64)>,
    on_drag_end: Option<&'a dyn Fn(f64, f64)>,
}

impl ControlObserver for RangeObserver<'_> {
    fn dragging(&mut self, first: f64, second: f64) {
        if let Some(cb) = self.write_back {
            cb(first, second);
        }
        if let Some(cb) = self.on_dragging {
            cb(first, second);
        }
    }

    fn drag_ended(&mut self, first: f64, second: f64) {
        if let Some(cb) = self.write_back {
            cb(first, second);
        }
        if let Some(cb) = self.on_drag_end {
            cb(first, second);
        }
    }
}

pub struct RangeSelector {
    id: ViewId,
    controller: RangeController,
    geometry: TrackGeometry,
    scene: Scene,
    active: Option<Handle>,
    last_x: f64,
    size: floem::taffy::prelude::Size<f32>,
    initialized: bool,
    thumb_size: f64,
    line_color: Color,
    on_dragging: Option<Box<dyn Fn(f64, f64)>>,
    on_drag_end: Option<Box<dyn Fn(f64, f64)>>,
    write_back: Option<Box<dyn Fn(f64, f64)>>,
}

/// Creates a two-thumb range selector over 0–100.
///
/// The view reads from and writes to `first`/`second`. External writes move
/// the thumbs (clamped to the minimum gap); drags update the signals on
/// every pointer event.
pub fn range_selector(first: RwSignal<f64>, second: RwSignal<f64>) -> RangeSelector {
    let id = ViewId::new();

    create_effect(move |_| {
        let f = first.get();
        let s = second.get();
        id.update_state(RangeUpdate::Values(f, s));
    });

    RangeSelector {
        id,
        controller: RangeController::new(first.get_untracked(), second.get_untracked()),
        geometry: TrackGeometry::new(0.0),
        scene: Scene::default(),
        active: None,
        last_x: 0.0,
        size: Default::default(),
        initialized: false,
        thumb_size: constants::THUMB_SIZE,
        line_color: Color::rgb8(5, 173, 247),
        on_dragging: None,
        on_drag_end: None,
        write_back: Some(Box::new(move |f, s| {
            first.set(f);
            second.set(s);
        })),
    }
    .style(|s| {
        s.height(constants::WIDGET_HEIGHT)
            .width_full()
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl RangeSelector {
    /// Called on every pointer event while a thumb is held.
    pub fn on_dragging(mut self, callback: impl Fn(f64, f64) + 'static) -> Self {
        self.on_dragging = Some(Box::new(callback));
        self
    }

    /// Called once when the drag gesture ends.
    pub fn on_drag_end(mut self, callback: impl Fn(f64, f64) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(callback));
        self
    }

    /// Track and thumb color.
    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    /// Thumb diameter in pixels.
    pub fn thumb_size(mut self, size: f64) -> Self {
        self.thumb_size = size;
        self
    }

    fn hit_handle(&self, pos: Point) -> Option<Handle> {
        let radius = self.geometry.thumb_size / 2.0;
        let dy = pos.y - constants::TRACK_CENTER_Y;
        let d1 = ((pos.x - self.scene.first_center).powi(2) + dy * dy).sqrt();
        let d2 = ((pos.x - self.scene.second_center).powi(2) + dy * dy).sqrt();
        // The second thumb sits on top when the two coincide.
        if d2 <= radius && d2 <= d1 {
            Some(Handle::Second)
        } else if d1 <= radius {
            Some(Handle::First)
        } else {
            None
        }
    }
}

impl View for RangeSelector {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<RangeUpdate>() {
            let RangeUpdate::Values(f, s) = *update;
            let (cf, cs) = self.controller.values();
            let first_changed = (f - cf).abs() > 0.001;
            let second_changed = (s - cs).abs() > 0.001;
            if first_changed && second_changed {
                self.controller.set_both(f, s, &self.geometry, &mut self.scene);
            } else if first_changed {
                self.controller.set_first(f, &self.geometry, &mut self.scene);
            } else if second_changed {
                self.controller.set_second(s, &self.geometry, &mut self.scene);
            }
            if first_changed || second_changed {
                self.id.request_layout();
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                if let Some(handle) = self.hit_handle(e.pos) {
                    cx.update_active(self.id());
                    self.active = Some(handle);
                    self.last_x = e.pos.x;
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                if let Some(handle) = self.active {
                    let delta = e.pos.x - self.last_x;
                    self.last_x = e.pos.x;
                    let mut observer = RangeObserver {
                        write_back: self.write_back.as_deref(),
                        on_dragging: self.on_dragging.as_deref(),
                        on_drag_end: self.on_drag_end.as_deref(),
                    };
                    self.controller.drag_update(
                        handle,
                        delta,
                        &self.geometry,
                        &mut self.scene,
                        &mut observer,
                    );
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                if let Some(handle) = self.active.take() {
                    let mut observer = RangeObserver {
                        write_back: self.write_back.as_deref(),
                        on_dragging: self.on_dragging.as_deref(),
                        on_drag_end: self.on_drag_end.as_deref(),
                    };
                    self.controller.drag_end(handle, &mut observer);
                    self.id.request_layout();
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        let width_changed = (layout.size.width - self.size.width).abs() > f32::EPSILON;
        self.size = layout.size;
        if (!self.initialized || width_changed) && layout.size.width > 0.0 {
            self.geometry = TrackGeometry::new(layout.size.width as f64).thumb_size(self.thumb_size);
            self.controller.sync(&self.geometry, &mut self.scene);
            self.initialized = true;
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        if w == 0.0 {
            return;
        }
        let r = self.geometry.marker_radius;
        let outline = Color::rgba8(0, 0, 0, 80);
        let track_y = constants::TRACK_TOP + r;

        // Track end stops and baseline
        let left_stop = Circle::new((self.geometry.margin / 2.0 + r, track_y), r);
        let right_stop = Circle::new((w - self.geometry.margin / 2.0 - r, track_y), r);
        cx.stroke(&left_stop, outline, &Stroke::new(1.0));
        cx.stroke(&right_stop, outline, &Stroke::new(1.0));
        let baseline = Line::new(Point::new(2.0 * r, track_y), Point::new(w - 2.0 * r, track_y));
        cx.stroke(&baseline, outline, &Stroke::new(1.0));

        // Connecting segment between the thumbs
        let half = constants::SEGMENT_HEIGHT / 2.0;
        let segment = Rect::new(
            self.scene.segment.start,
            constants::TRACK_CENTER_Y - half,
            self.scene.segment.start + self.scene.segment.width,
            constants::TRACK_CENTER_Y + half,
        )
        .to_rounded_rect(half);
        cx.fill(&segment, self.line_color, 0.0);

        // Thumbs
        let thumb_r = self.geometry.thumb_size / 2.0 - constants::ANCHOR_SPLIT;
        for center in [self.scene.first_center, self.scene.second_center] {
            let thumb = Circle::new((center, constants::TRACK_CENTER_Y), thumb_r);
            cx.fill(&thumb, self.line_color, 0.0);
        }
    }
}
