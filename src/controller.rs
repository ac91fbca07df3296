//! Gesture-lifecycle controllers.
//!
//! Translate already-classified input events (drag deltas, drag ends,
//! swipes) into state mutations, push the resulting target geometry into a
//! [`RenderAdapter`], and report values through a [`ControlObserver`].
//! Framework-free; the view modules own one controller each.

use tracing::{debug, trace};

use crate::geometry::{self, TrackGeometry};
use crate::range::{Handle, RangeState};
use crate::render::{ControlObserver, RenderAdapter};
use crate::timeline::{StepDelta, TimelineState};

/// Horizontal swipe, as delivered by the gesture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwipeDirection {
    Left,
    Right,
}

/// Per-gesture scratch state for one thumb.
///
/// The latch lives here rather than on the thumb so it dies with its own
/// gesture and cannot leak into a concurrent session on the other thumb.
#[derive(Debug, Clone, Copy, Default)]
struct DragSession {
    accumulated: f64,
    latched: bool,
}

/// Continuous-mode controller: two thumbs, at most one live session each.
pub(crate) struct RangeController {
    state: RangeState,
    sessions: [Option<DragSession>; 2],
}

impl RangeController {
    pub fn new(first: f64, second: f64) -> Self {
        Self {
            state: RangeState::new(first, second),
            sessions: [None, None],
        }
    }

    pub fn values(&self) -> (f64, f64) {
        self.state.values()
    }

    /// Feeds one drag delta to `handle`.
    ///
    /// The first delta of a gesture opens the session. A clamped drag
    /// latches the session: the thumb stays put and the observer stays
    /// silent until the gesture ends.
    pub fn drag_update(
        &mut self,
        handle: Handle,
        pixel_delta: f64,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
        observer: &mut impl ControlObserver,
    ) {
        let session = self.sessions[handle.index()].get_or_insert_with(DragSession::default);
        if session.latched {
            return;
        }
        session.accumulated += pixel_delta;
        let outcome = self.state.apply_drag(handle, pixel_delta, geometry);
        if let Some(clamp) = outcome.clamp {
            session.latched = true;
            trace!(
                ?handle,
                ?clamp,
                accumulated = session.accumulated,
                "thumb latched until release"
            );
        }
        let center = match handle {
            Handle::First => geometry::handle_anchors(outcome.first, geometry).left,
            Handle::Second => geometry::handle_anchors(outcome.second, geometry).right,
        };
        adapter.place_handle(handle, center);
        adapter.set_segment(self.state.segment(geometry));
        observer.dragging(outcome.first, outcome.second);
    }

    /// Ends the gesture on `handle`: drops the session (clearing any latch)
    /// and notifies the final pair exactly once per call.
    pub fn drag_end(&mut self, handle: Handle, observer: &mut impl ControlObserver) {
        self.sessions[handle.index()] = None;
        let (first, second) = self.state.values();
        observer.drag_ended(first, second);
    }

    /// Programmatic move of the first thumb. No notification.
    pub fn set_first(
        &mut self,
        value: f64,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
    ) {
        self.state.set_first(value);
        self.sync(geometry, adapter);
    }

    /// Programmatic move of the second thumb. No notification.
    pub fn set_second(
        &mut self,
        value: f64,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
    ) {
        self.state.set_second(value);
        self.sync(geometry, adapter);
    }

    /// Programmatic move of both thumbs, validated atomically.
    pub fn set_both(
        &mut self,
        first: f64,
        second: f64,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
    ) {
        self.state.set_both(first, second);
        self.sync(geometry, adapter);
    }

    /// Pushes the full target layout: both thumbs plus the segment.
    pub fn sync(&self, geometry: &TrackGeometry, adapter: &mut impl RenderAdapter) {
        let (first, second) = self.state.values();
        adapter.place_handle(Handle::First, geometry::handle_anchors(first, geometry).left);
        adapter.place_handle(Handle::Second, geometry::handle_anchors(second, geometry).right);
        adapter.set_segment(self.state.segment(geometry));
    }
}

/// Stepped-mode controller. Swipes are instantaneous, no sessions.
pub(crate) struct SteppedController {
    state: TimelineState,
}

impl SteppedController {
    pub fn new(
        initial_steps: usize,
        max_steps: usize,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
    ) -> Self {
        let controller = Self {
            state: TimelineState::new(initial_steps, max_steps, geometry),
        };
        controller.push_all(geometry, adapter);
        controller
    }

    pub fn count(&self) -> usize {
        self.state.count()
    }

    /// Appends one step. No notification; swipes wrap this.
    pub fn add_step(
        &mut self,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
    ) -> StepDelta {
        let delta = self.state.increment();
        if let StepDelta::Added { index, position } = delta {
            adapter.add_marker(index, position);
            adapter.set_segment(self.state.segment(geometry));
            debug!(count = self.state.count(), "step added");
        }
        delta
    }

    /// Removes one step. No notification; swipes wrap this.
    pub fn remove_step(
        &mut self,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
    ) -> StepDelta {
        let delta = self.state.decrement();
        if let StepDelta::Removed { index, .. } = delta {
            adapter.remove_marker(index);
            adapter.set_segment(self.state.segment(geometry));
            debug!(count = self.state.count(), "step removed");
        }
        delta
    }

    /// Applies one swipe. The observer hears the resulting count on every
    /// swipe, no-ops included.
    pub fn swipe(
        &mut self,
        direction: SwipeDirection,
        geometry: &TrackGeometry,
        adapter: &mut impl RenderAdapter,
        observer: &mut impl ControlObserver,
    ) {
        match direction {
            SwipeDirection::Right => {
                self.add_step(geometry, adapter);
                observer.step_added(self.state.count());
            }
            SwipeDirection::Left => {
                self.remove_step(geometry, adapter);
                observer.step_removed(self.state.count());
            }
        }
    }

    /// Relays a container resize: every marker is re-placed, the count is
    /// untouched.
    pub fn resize(&mut self, geometry: &TrackGeometry, adapter: &mut impl RenderAdapter) {
        self.state.resize(geometry);
        self.push_all(geometry, adapter);
    }

    fn push_all(&self, geometry: &TrackGeometry, adapter: &mut impl RenderAdapter) {
        for (index, &position) in self.state.markers().iter().enumerate() {
            adapter.add_marker(index, position);
        }
        adapter.set_segment(self.state.segment(geometry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Scene;

    #[derive(Default)]
    struct Events {
        dragging: Vec<(f64, f64)>,
        ended: Vec<(f64, f64)>,
        added: Vec<usize>,
        removed: Vec<usize>,
    }

    impl ControlObserver for Events {
        fn dragging(&mut self, first: f64, second: f64) {
            self.dragging.push((first, second));
        }
        fn drag_ended(&mut self, first: f64, second: f64) {
            self.ended.push((first, second));
        }
        fn step_added(&mut self, count: usize) {
            self.added.push(count);
        }
        fn step_removed(&mut self, count: usize) {
            self.removed.push(count);
        }
    }

    fn geometry() -> TrackGeometry {
        TrackGeometry::new(334.0) // 300px zone
    }

    #[test]
    fn drag_updates_notify_every_event_and_push_geometry() {
        let g = geometry();
        let mut scene = Scene::default();
        let mut events = Events::default();
        let mut controller = RangeController::new(50.0, 100.0);
        controller.sync(&g, &mut scene);
        let before = scene.first_center;

        controller.drag_update(Handle::First, 30.0, &g, &mut scene, &mut events);
        controller.drag_update(Handle::First, 30.0, &g, &mut scene, &mut events);
        assert_eq!(events.dragging.len(), 2);
        assert_eq!(events.dragging[1], (70.0, 100.0));
        assert!((scene.first_center - before - 60.0).abs() < 1e-9);
        assert!((scene.segment.width - 90.0).abs() < 1e-9);
    }

    #[test]
    fn clamped_drag_latches_the_session_until_release() {
        let g = geometry();
        let mut scene = Scene::default();
        let mut events = Events::default();
        let mut controller = RangeController::new(50.0, 100.0);

        // Overshoot: gap clamp fires, notifying the clamped pair once.
        controller.drag_update(Handle::First, 180.0, &g, &mut scene, &mut events);
        assert_eq!(events.dragging, vec![(90.0, 100.0)]);

        // Latched: further motion is absorbed silently.
        controller.drag_update(Handle::First, 50.0, &g, &mut scene, &mut events);
        controller.drag_update(Handle::First, -50.0, &g, &mut scene, &mut events);
        assert_eq!(events.dragging.len(), 1);
        assert_eq!(controller.values(), (90.0, 100.0));

        // Release clears the latch; the thumb moves again.
        controller.drag_end(Handle::First, &mut events);
        controller.drag_update(Handle::First, -30.0, &g, &mut scene, &mut events);
        assert_eq!(events.dragging.len(), 2);
        assert!(controller.values().0 < 90.0);
    }

    #[test]
    fn drag_end_is_idempotent() {
        let g = geometry();
        let mut scene = Scene::default();
        let mut events = Events::default();
        let mut controller = RangeController::new(50.0, 100.0);
        controller.drag_update(Handle::Second, -30.0, &g, &mut scene, &mut events);

        controller.drag_end(Handle::Second, &mut events);
        controller.drag_end(Handle::Second, &mut events);
        assert_eq!(events.ended.len(), 2);
        assert_eq!(events.ended[0], events.ended[1]);
    }

    #[test]
    fn sessions_latch_independently() {
        let g = geometry();
        let mut scene = Scene::default();
        let mut events = Events::default();
        let mut controller = RangeController::new(50.0, 100.0);

        // First thumb latches against the gap.
        controller.drag_update(Handle::First, 300.0, &g, &mut scene, &mut events);
        assert_eq!(controller.values(), (90.0, 100.0));

        // The second thumb's own session is unaffected.
        controller.drag_update(Handle::Second, -15.0, &g, &mut scene, &mut events);
        assert!(controller.values().1 < 100.0);
    }

    #[test]
    fn programmatic_moves_push_geometry_without_notifying() {
        let g = geometry();
        let mut scene = Scene::default();
        let mut controller = RangeController::new(50.0, 100.0);
        controller.set_both(20.0, 60.0, &g, &mut scene);
        assert_eq!(controller.values(), (20.0, 60.0));
        assert!((scene.segment.width - 120.0).abs() < 1e-9);
        controller.set_first(30.0, &g, &mut scene);
        controller.set_second(50.0, &g, &mut scene);
        assert_eq!(controller.values(), (30.0, 50.0));
    }

    #[test]
    fn swipes_notify_even_when_nothing_changes() {
        let g = TrackGeometry::new(300.0);
        let mut scene = Scene::default();
        let mut events = Events::default();
        let mut controller = SteppedController::new(1, 2, &g, &mut scene);

        controller.swipe(SwipeDirection::Right, &g, &mut scene, &mut events);
        controller.swipe(SwipeDirection::Right, &g, &mut scene, &mut events);
        assert_eq!(events.added, vec![2, 3]);
        assert_eq!(scene.markers.len(), 3);

        // At capacity: the count no longer moves but the observer still hears.
        controller.swipe(SwipeDirection::Right, &g, &mut scene, &mut events);
        assert_eq!(events.added, vec![2, 3, 3]);
        assert_eq!(scene.markers.len(), 3);

        for _ in 0..3 {
            controller.swipe(SwipeDirection::Left, &g, &mut scene, &mut events);
        }
        assert_eq!(events.removed, vec![2, 1, 1]);
        assert_eq!(scene.markers.len(), 1);
    }

    #[test]
    fn resize_replaces_every_marker_position() {
        let g = TrackGeometry::new(300.0);
        let mut scene = Scene::default();
        let mut controller = SteppedController::new(3, 5, &g, &mut scene);
        let narrow = scene.markers.clone();

        let wider = TrackGeometry::new(600.0);
        controller.resize(&wider, &mut scene);
        assert_eq!(controller.count(), 3);
        assert_eq!(scene.markers.len(), 3);
        assert!(scene.markers[2] > narrow[2]);
        assert!(scene.segment.width > 0.0);
    }
}
