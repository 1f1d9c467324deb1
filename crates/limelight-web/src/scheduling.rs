//! Browser timers behind cancellation handles.
//!
//! Dropping a handle cancels the underlying timeout, interval or animation
//! frame, so components stop everything they started by dropping their state.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use limelight_core::SiteError;
use limelight_core::clock::{MonotonicClock, duration_from_millis_f64};
use limelight_core::logging::targets;
use limelight_core::rate_limit::{Debounce, Throttle, ThrottleDecision};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom::{js_error, window};

/// Page-lifetime monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageClock;

thread_local! {
    static ORIGIN: web_time::Instant = web_time::Instant::now();
}

impl MonotonicClock for PageClock {
    fn now_mono(&self) -> Duration {
        ORIGIN.with(web_time::Instant::elapsed)
    }
}

pub fn now() -> Duration {
    PageClock.now_mono()
}

fn clamp_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

/// One-shot `setTimeout`. The callback is owned by JS and freed after it
/// runs, so a handle may be dropped from inside its own callback.
#[derive(Debug)]
pub struct Timeout {
    id: i32,
}

impl Timeout {
    pub fn new(delay: Duration, f: impl FnOnce() + 'static) -> Result<Self, SiteError> {
        let callback = Closure::once_into_js(f);
        let id = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                clamp_millis(delay),
            )
            .map_err(js_error)?;
        Ok(Self { id })
    }

    /// Fire-and-forget variant for work that must not be cancelled.
    pub fn detached(delay: Duration, f: impl FnOnce() + 'static) {
        match Self::new(delay, f) {
            Ok(handle) => core::mem::forget(handle),
            Err(err) => tracing::warn!(target: targets::SITE, %err, "setTimeout failed"),
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}

/// Repeating `setInterval`.
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period: Duration, f: impl FnMut() + 'static) -> Result<Self, SiteError> {
        let callback = Closure::<dyn FnMut()>::new(f);
        let id = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                clamp_millis(period),
            )
            .map_err(js_error)?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// Whether a frame loop wants another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Done,
}

struct FrameState {
    request: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameState {
    fn request(&self) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        let result = window().and_then(|w| {
            w.request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(js_error)
        });
        match result {
            Ok(id) => self.request.set(Some(id)),
            Err(err) => tracing::warn!(target: targets::SITE, %err, "requestAnimationFrame failed"),
        }
    }
}

/// A `requestAnimationFrame` loop. `step` receives the frame timestamp and
/// decides whether to continue. Dropping the handle cancels the next frame.
pub struct AnimationFrame {
    state: Rc<FrameState>,
}

impl AnimationFrame {
    pub fn start(mut step: impl FnMut(Duration) -> Frame + 'static) -> Self {
        let state = Rc::new(FrameState {
            request: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak: Weak<FrameState> = Rc::downgrade(&state);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.request.set(None);
            match step(duration_from_millis_f64(timestamp)) {
                Frame::Continue => state.request(),
                Frame::Done => {
                    let _ = state.callback.borrow_mut().take();
                }
            }
        });
        *state.callback.borrow_mut() = Some(callback);
        state.request();
        Self { state }
    }
}

impl Drop for AnimationFrame {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.state.request.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        let _ = self.state.callback.borrow_mut().take();
    }
}

struct ThrottledState {
    throttle: RefCell<Throttle>,
    timer: RefCell<Option<Timeout>>,
    handler: RefCell<Box<dyn FnMut()>>,
}

impl ThrottledState {
    fn run(&self) {
        let mut handler = self.handler.borrow_mut();
        (*handler)();
    }

    fn arm(self: &Rc<Self>, after: Duration) {
        let weak = Rc::downgrade(self);
        let timer = Timeout::new(after, move || {
            if let Some(state) = weak.upgrade() {
                state.fire();
            }
        });
        match timer {
            Ok(timer) => *self.timer.borrow_mut() = Some(timer),
            Err(err) => tracing::warn!(target: targets::SITE, %err, "trailing call not armed"),
        }
    }

    fn fire(self: &Rc<Self>) {
        let _ = self.timer.borrow_mut().take();
        let now = now();
        let due = self.throttle.borrow_mut().poll(now);
        if due {
            self.run();
            return;
        }
        let remaining = self.throttle.borrow().remaining(now);
        if let Some(after) = remaining {
            self.arm(after);
        }
    }
}

/// Leading-edge throttle with one trailing call, driven by [`Throttle`].
#[derive(Clone)]
pub struct Throttled {
    state: Rc<ThrottledState>,
}

impl Throttled {
    pub fn new(delay: Duration, handler: impl FnMut() + 'static) -> Self {
        Self {
            state: Rc::new(ThrottledState {
                throttle: RefCell::new(Throttle::new(delay)),
                timer: RefCell::new(None),
                handler: RefCell::new(Box::new(handler)),
            }),
        }
    }

    pub fn call(&self) {
        let decision = self.state.throttle.borrow_mut().call(now());
        match decision {
            ThrottleDecision::RunNow => {
                let _ = self.state.timer.borrow_mut().take();
                self.state.run();
            }
            ThrottleDecision::Schedule { after } => {
                if self.state.timer.borrow().is_none() {
                    self.state.arm(after);
                }
            }
        }
    }

    pub fn cancel(&self) {
        self.state.throttle.borrow_mut().cancel();
        let _ = self.state.timer.borrow_mut().take();
    }
}

struct DebouncedState {
    debounce: RefCell<Debounce>,
    timer: RefCell<Option<Timeout>>,
    handler: RefCell<Box<dyn FnMut()>>,
}

impl DebouncedState {
    fn arm(self: &Rc<Self>, after: Duration) {
        let weak = Rc::downgrade(self);
        let timer = Timeout::new(after, move || {
            if let Some(state) = weak.upgrade() {
                state.fire();
            }
        });
        match timer {
            Ok(timer) => *self.timer.borrow_mut() = Some(timer),
            Err(err) => tracing::warn!(target: targets::SITE, %err, "debounce not armed"),
        }
    }

    fn fire(self: &Rc<Self>) {
        let _ = self.timer.borrow_mut().take();
        let now = now();
        let due = self.debounce.borrow_mut().poll(now);
        if due {
            let mut handler = self.handler.borrow_mut();
            (*handler)();
            return;
        }
        // Calls arrived after the timer was armed; wait out the new deadline.
        let remaining = self.debounce.borrow().remaining(now);
        if let Some(after) = remaining {
            self.arm(after);
        }
    }
}

/// Trailing-edge debounce driven by [`Debounce`]. Keeps a single timer armed
/// and re-arms it for whatever quiet time is left when it fires early.
#[derive(Clone)]
pub struct Debounced {
    state: Rc<DebouncedState>,
}

impl Debounced {
    pub fn new(delay: Duration, handler: impl FnMut() + 'static) -> Self {
        Self {
            state: Rc::new(DebouncedState {
                debounce: RefCell::new(Debounce::new(delay)),
                timer: RefCell::new(None),
                handler: RefCell::new(Box::new(handler)),
            }),
        }
    }

    pub fn call(&self) {
        let after = self.state.debounce.borrow_mut().call(now());
        if self.state.timer.borrow().is_none() {
            self.state.arm(after);
        }
    }

    pub fn cancel(&self) {
        self.state.debounce.borrow_mut().cancel();
        let _ = self.state.timer.borrow_mut().take();
    }
}
