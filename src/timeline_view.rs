//! Stepped timeline navigated by horizontal swipes.
//!
//! Marker layout is deferred to the first layout pass — slot spacing needs
//! the track width. Pointer travel is classified as a left/right swipe on
//! release; the controller does the rest.

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
use crate::controller::{SteppedController, SwipeDirection};
use crate::geometry::{self, TrackGeometry};
use crate::render::{ControlObserver, Scene};
use crate::timeline::StepDelta;

enum TimelineUpdate {
    Steps(usize),
}

/// Relays step notifications to the host callbacks and the signal.
struct StepObserver<'a> {
    write_back: Option<&'a dyn Fn(usize)>,
    on_step_added: Option<&'a dyn Fn(usize)>,
    on_step_removed: Option<&'a dyn Fn(usize)>,
}

impl ControlObserver for StepObserver<'_> {
    fn step_added(&mut self, count: usize) {
        if let Some(cb) = self.write_back {
            cb(count);
        }
        if let Some(cb) = self.on_step_added {
            cb(count);
        }
    }

    fn step_removed(&mut self, count: usize) {
        if let Some(cb) = self.write_back {
            cb(count);
        }
        if let Some(cb) = self.on_step_removed {
            cb(count);
        }
    }
}

pub struct SteppedTimeline {
    id: ViewId,
    controller: Option<SteppedController>,
    max_steps: usize,
    pending_steps: usize,
    geometry: TrackGeometry,
    scene: Scene,
    press_x: Option<f64>,
    size: floem::taffy::prelude::Size<f32>,
    thumb_size: f64,
    line_color: Color,
    on_step_added: Option<Box<dyn Fn(usize)>>,
    on_step_removed: Option<Box<dyn Fn(usize)>>,
    write_back: Option<Box<dyn Fn(usize)>>,
}

/// Creates a stepped timeline with `max_steps` intervals.
///
/// `steps` tracks the active marker count (1 to `max_steps + 1`) both ways:
/// swipes write the new count to the signal, and external writes add or
/// remove markers to match.
pub fn stepped_timeline(steps: RwSignal<usize>, max_steps: usize) -> SteppedTimeline {
    let id = ViewId::new();

    create_effect(move |_| {
        let n = steps.get();
        id.update_state(TimelineUpdate::Steps(n));
    });

    SteppedTimeline {
        id,
        controller: None,
        max_steps: max_steps.max(1),
        pending_steps: steps.get_untracked(),
        geometry: TrackGeometry::new(0.0),
        scene: Scene::default(),
        press_x: None,
        size: Default::default(),
        thumb_size: constants::THUMB_SIZE,
        line_color: Color::rgb8(5, 173, 247),
        on_step_added: None,
        on_step_removed: None,
        write_back: Some(Box::new(move |n| {
            steps.set(n);
        })),
    }
    .style(|s| {
        s.height(constants::WIDGET_HEIGHT)
            .width_full()
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl SteppedTimeline {
    /// Called after a right swipe with the resulting count.
    pub fn on_step_added(mut self, callback: impl Fn(usize) + 'static) -> Self {
        self.on_step_added = Some(Box::new(callback));
        self
    }

    /// Called after a left swipe with the resulting count.
    pub fn on_step_removed(mut self, callback: impl Fn(usize) + 'static) -> Self {
        self.on_step_removed = Some(Box::new(callback));
        self
    }

    /// Track and marker color.
    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    /// Active-marker diameter in pixels.
    pub fn thumb_size(mut self, size: f64) -> Self {
        self.thumb_size = size;
        self
    }
}

impl View for SteppedTimeline {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<TimelineUpdate>() {
            let TimelineUpdate::Steps(target) = *update;
            match &mut self.controller {
                Some(controller) => {
                    let mut changed = false;
                    while controller.count() < target {
                        if matches!(
                            controller.add_step(&self.geometry, &mut self.scene),
                            StepDelta::AtCapacity
                        ) {
                            break;
                        }
                        changed = true;
                    }
                    while controller.count() > target.max(1) {
                        if matches!(
                            controller.remove_step(&self.geometry, &mut self.scene),
                            StepDelta::AtFloor
                        ) {
                            break;
                        }
                        changed = true;
                    }
                    if changed {
                        self.id.request_layout();
                    }
                }
                None => {
                    self.pending_steps = target;
                }
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.press_x = Some(e.pos.x);
                EventPropagation::Stop
            }
            Event::PointerUp(e) => {
                if let (Some(press_x), Some(controller)) = (self.press_x.take(), &mut self.controller)
                {
                    let travel = e.pos.x - press_x;
                    if travel.abs() >= constants::SWIPE_THRESHOLD {
                        let direction = if travel > 0.0 {
                            SwipeDirection::Right
                        } else {
                            SwipeDirection::Left
                        };
                        let mut observer = StepObserver {
                            write_back: self.write_back.as_deref(),
                            on_step_added: self.on_step_added.as_deref(),
                            on_step_removed: self.on_step_removed.as_deref(),
                        };
                        controller.swipe(direction, &self.geometry, &mut self.scene, &mut observer);
                        self.id.request_layout();
                    }
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.press_x = None;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        let width_changed = (layout.size.width - self.size.width).abs() > f32::EPSILON;
        self.size = layout.size;
        if layout.size.width > 0.0 {
            match &mut self.controller {
                None => {
                    self.geometry =
                        TrackGeometry::new(layout.size.width as f64).thumb_size(self.thumb_size);
                    let controller = SteppedController::new(
                        self.pending_steps,
                        self.max_steps,
                        &self.geometry,
                        &mut self.scene,
                    );
                    // Keep the signal honest when the initial count clamps.
                    if let Some(cb) = self.write_back.as_deref() {
                        if controller.count() != self.pending_steps {
                            cb(controller.count());
                        }
                    }
                    self.controller = Some(controller);
                }
                Some(controller) if width_changed => {
                    self.geometry =
                        TrackGeometry::new(layout.size.width as f64).thumb_size(self.thumb_size);
                    controller.resize(&self.geometry, &mut self.scene);
                }
                _ => {}
            }
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
        let interval =
            geometry::marker_spacing(self.geometry.timeline_width(), self.max_steps, r).interval;

        // Static slots with connecting dashes
        for i in 0..=self.max_steps {
            let center = geometry::slot_center(i, interval, &self.geometry);
            let slot = Circle::new((center, track_y), r);
            cx.stroke(&slot, outline, &Stroke::new(1.0));
            if i != self.max_steps {
                let dash = Line::new(
                    Point::new(center + r, track_y),
                    Point::new(center + r + interval, track_y),
                );
                cx.stroke(&dash, outline, &Stroke::new(1.0));
            }
        }

        // Segment spanning the active markers
        let half = constants::SEGMENT_HEIGHT / 2.0;
        let segment = Rect::new(
            self.scene.segment.start,
            constants::TRACK_CENTER_Y - half,
            self.scene.segment.start + self.scene.segment.width,
            constants::TRACK_CENTER_Y + half,
        )
        .to_rounded_rect(half);
        cx.fill(&segment, self.line_color, 0.0);

        // Active markers
        let marker_r = self.geometry.thumb_size / 2.0 - constants::ANCHOR_SPLIT;
        for &center in &self.scene.markers {
            let marker = Circle::new((center, constants::TRACK_CENTER_Y), marker_r);
            cx.fill(&marker, self.line_color, 0.0);
        }
    }
}
