//! Standalone demo: a range selector and a stepped timeline in one window.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_timeline::{range_selector, stepped_timeline};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let first = RwSignal::new(50.0);
    let second = RwSignal::new(100.0);
    let steps = RwSignal::new(1usize);

    floem::Application::new()
        .window(
            move |_| {
                v_stack((
                    label(move || format!("range: {:.0} to {:.0}", first.get(), second.get())),
                    range_selector(first, second).on_drag_end(|first, second| {
                        tracing::info!(first, second, "drag ended");
                    }),
                    label(move || format!("steps: {}", steps.get())),
                    stepped_timeline(steps, 5)
                        .on_step_added(|count| tracing::info!(count, "step added"))
                        .on_step_removed(|count| tracing::info!(count, "step removed")),
                ))
                .style(|s| s.gap(16.0).padding(24.0).size_full())
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((420.0, 240.0))
                    .title("floem-timeline"),
            ),
        )
        .run();
}
