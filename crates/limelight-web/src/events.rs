//! Event listeners and intersection observers that detach on drop.

use limelight_core::SiteError;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry};

use crate::dom::js_error;

/// `addEventListener` registration, removed again when dropped.
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, SiteError> {
        let callback = Closure::<dyn FnMut(Event)>::new(f);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    /// Typed variant: events that fail the cast are ignored.
    pub fn typed<E: JsCast>(
        target: &EventTarget,
        kind: &'static str,
        mut f: impl FnMut(E) + 'static,
    ) -> Result<Self, SiteError> {
        Self::new(target, kind, move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                f(event);
            }
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Options for [`VisibilityObserver`]. `None` keeps the browser default.
#[derive(Debug, Clone, Default)]
pub struct ObserverOptions {
    pub threshold: Option<f64>,
    pub root_margin: Option<String>,
}

/// `IntersectionObserver` that reports elements entering the viewport.
/// Disconnects on drop.
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    /// Whether the browser has `IntersectionObserver` at all.
    pub fn supported(window: &web_sys::Window) -> bool {
        js_sys::Reflect::has(window, &"IntersectionObserver".into()).unwrap_or(false)
    }

    /// `on_visible(target, observer)` runs for every entry that is intersecting.
    pub fn new(
        options: &ObserverOptions,
        mut on_visible: impl FnMut(Element, &IntersectionObserver) + 'static,
    ) -> Result<Self, SiteError> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        on_visible(entry.target(), &observer);
                    }
                }
            },
        );

        let init = web_sys::IntersectionObserverInit::new();
        if let Some(threshold) = options.threshold {
            init.set_threshold(&threshold.into());
        }
        if let Some(margin) = &options.root_margin {
            init.set_root_margin(margin);
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(js_error)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
