// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` frame source.
//!
//! [`RafLoop`] calls back once per browser frame with a [`Frame`] carrying
//! the callback's [`DOMHighResTimeStamp`][mdn] as [`HostTime`] and the time
//! since the previous frame, ready for `wrap_tick` and
//! `advance_animations`.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use tableau_core::time::{Duration, HostTime};

// Direct global bindings instead of `web_sys::Window` methods, so frames do
// not fetch the Window/Performance objects.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// One animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Timestamp of the frame.
    pub now: HostTime,
    /// Time since the previous frame; zero for the first one.
    pub dt: Duration,
    /// Frames delivered before this one since [`RafLoop::start`].
    pub index: u64,
}

impl Frame {
    fn after(prev: Option<HostTime>, now: HostTime, index: u64) -> Self {
        Self {
            now,
            dt: prev.map_or(Duration::ZERO, |p| now.saturating_duration_since(p)),
            index,
        }
    }
}

/// A `requestAnimationFrame` loop.
///
/// Create with [`RafLoop::new`], then call [`start`](Self::start). The loop
/// re-registers itself each frame until [`stop`](Self::stop) is called or
/// the `RafLoop` is dropped.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// Registered with `requestAnimationFrame`. Kept in its own cell so the
    /// closure can re-register itself while `callback` is borrowed.
    closure: RefCell<Option<RafClosure>>,
    callback: RefCell<Box<dyn FnMut(Frame)>>,
    frame_counter: Cell<u64>,
    last: Cell<Option<HostTime>>,
    running: Cell<bool>,
    raf_id: Cell<i32>,
}

impl RafLoop {
    /// Creates a loop that is **not yet running**.
    pub fn new(callback: impl FnMut(Frame) + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frame_counter: Cell::new(0),
                last: Cell::new(None),
                running: Cell::new(false),
                raf_id: Cell::new(0),
            }),
        }
    }

    /// Starts the loop. No-op if already running.
    ///
    /// The first frame after a start reports a zero `dt`.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);
        self.inner.last.set(None);
        self.inner.frame_counter.set(0);

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            if !inner.running.get() {
                return;
            }

            let now = crate::host_time(timestamp_ms);
            let index = inner.frame_counter.get();
            inner.frame_counter.set(index + 1);
            let frame = Frame::after(inner.last.replace(Some(now)), now, index);

            inner.callback.borrow_mut()(frame);

            if inner.running.get()
                && let Some(ref closure) = *inner.closure.borrow()
            {
                let id = request_animation_frame(closure.as_ref().unchecked_ref());
                inner.raf_id.set(id);
            }
        }) as Box<dyn FnMut(f64)>);

        let id = request_animation_frame(closure.as_ref().unchecked_ref());
        self.inner.raf_id.set(id);
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    /// Stops the loop and cancels the pending frame. It can be restarted.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.raf_id.get());
    }

    /// Returns `true` if the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Breaks the closure's reference cycle through `inner`.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.inner.running.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_dt() {
        let f = Frame::after(None, HostTime(1_000), 0);
        assert_eq!(f.dt, Duration::ZERO);
    }

    #[test]
    fn dt_is_time_since_previous_frame() {
        let f = Frame::after(Some(HostTime(1_000)), HostTime(1_016), 1);
        assert_eq!(f.dt, Duration::from_millis(16));
        assert_eq!(f.index, 1);
    }

    #[test]
    fn clock_going_backwards_saturates() {
        let f = Frame::after(Some(HostTime(20)), HostTime(10), 3);
        assert_eq!(f.dt, Duration::ZERO);
    }
}
