// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop driving both presentation strategies.
//!
//! Builds a small scene (a panel holding a spinning view and a badge with a
//! queued animation), then runs 90 synthetic 60 Hz frames. Each frame ticks
//! the tree, expires animation timeouts, and presents the same tree through
//! the canvas strategy (a recording [`DisplayList`]) and the DOM strategy (an
//! in-memory element tree). Set `RUST_LOG=debug` for more detail.

use kurbo::Rect;
use tableau_core::anim::{Easing, Transition};
use tableau_core::backend::{Presenter, Surface, TickContext, View};
use tableau_core::error::PaintError;
use tableau_core::scene::{NodeId, SceneTree};
use tableau_core::style::{Color, StyleProp, StyleUpdate};
use tableau_core::time::{Duration, HostTime};
use tableau_dom::{DomConfig, DomPresenter, MemoryElement};
use tableau_render::{CanvasPresenter, DisplayList};
use tracing_subscriber::EnvFilter;

const FRAME_COUNT: u64 = 90;
const FRAME_MS: u64 = 16;

/// Application state threaded through the tick pass.
#[derive(Debug, Default)]
struct Stats {
    ticks: u64,
}

/// Rotates at a fixed speed and paints a bar.
struct Spinner {
    radians_per_ms: f64,
}

impl View<Stats> for Spinner {
    fn has_tick(&self) -> bool {
        true
    }

    fn has_render(&self) -> bool {
        true
    }

    fn tick(&mut self, cx: &mut TickContext<'_, Stats>) {
        let dr = self.radians_per_ms * cx.dt.as_millis() as f64;
        let r = cx.tree.style(cx.node).r + dr;
        let _ = cx.tree.set_style_prop(cx.node, StyleProp::R(r % core::f64::consts::TAU));
        cx.app.ticks += 1;
    }

    fn render(&mut self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        surface.fill_rect(Rect::new(0.0, 18.0, 40.0, 22.0), Color::WHITE);
        Ok(())
    }
}

fn build(tree: &mut SceneTree<Stats>) -> (NodeId, NodeId, NodeId) {
    let panel = tree.create_node();
    tree.update_style(
        panel,
        &StyleUpdate::new()
            .size(320.0, 240.0)
            .with(StyleProp::BackgroundColor(Some(Color::rgb(32, 32, 48))))
            .with(StyleProp::Clip(true)),
    );

    let spinner = tree.create_node_with_view(Spinner {
        radians_per_ms: 0.004,
    });
    tree.update_style(
        spinner,
        &StyleUpdate::new()
            .x(140.0)
            .y(100.0)
            .with(StyleProp::CenterAnchor(true))
            .size(40.0, 40.0),
    );

    let badge = tree.create_node();
    tree.update_style(
        badge,
        &StyleUpdate::new()
            .x(10.0)
            .y(10.0)
            .size(24.0, 24.0)
            .opacity(0.0)
            .z_index(5)
            .with(StyleProp::BackgroundColor(Some(Color::rgb(220, 60, 60)))),
    );

    let _ = tree.add_subview(panel, spinner);
    let _ = tree.add_subview(panel, badge);
    (panel, spinner, badge)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut tree = SceneTree::<Stats>::new();
    let mut stats = Stats::default();
    let (panel, spinner, badge) = build(&mut tree);

    let mut canvas = CanvasPresenter::new(DisplayList::with_size(320.0, 240.0));
    let mut dom = DomPresenter::new(MemoryElement::body(), DomConfig::webkit());

    let quick = Transition::new(Duration::from_millis(200), Easing::EaseOut);
    let _ = tree
        .animate(badge, HostTime(0))
        .fade_in(quick)
        .then(StyleUpdate::new().x(280.0), Transition::default())
        .wait(Duration::from_millis(100))
        .callback(|tree, node| {
            tracing::info!(?node, x = tree.style(node).x, "badge arrived");
        });

    let mut now = HostTime(0);
    for frame in 0..FRAME_COUNT {
        tree.wrap_tick(panel, Duration::from_millis(FRAME_MS), &mut stats);
        let timed_out = tree.advance_animations(now);
        let ended = dom.dispatch_transition_ends(&mut tree, now);

        dom.present(&mut tree, panel);
        canvas.present(&mut tree, panel);

        // The host reports the slide's CSS transition finishing early.
        if frame == 20
            && let Some(el) = dom.element(badge)
        {
            let _ = el.fire_transition_end();
        }

        if timed_out + ended > 0 {
            tracing::debug!(frame, timed_out, ended, "animation steps completed");
        }
        now = now.saturating_add(Duration::from_millis(FRAME_MS));
    }

    let fills = canvas.surface().fills().count();
    let spinner_el = dom.element(spinner).cloned();
    let badge_el = dom.element(badge).cloned();

    tracing::info!(
        frames = canvas.frames(),
        ticks = stats.ticks,
        fills,
        spinner_r = tree.style(spinner).r,
        spinner_transform = ?spinner_el.and_then(|el| el.style("transform")),
        badge_opacity = ?badge_el.as_ref().and_then(|el| el.style("opacity")),
        badge_has_canvas = dom.canvas(badge).is_some(),
        container_children = dom.container().children().len(),
        "done"
    );
}
