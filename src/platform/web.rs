//! Browser host: mounts a wheel into a DOM container
//!
//! Each [`WebWheel`] owns its canvas, pointer listeners, resize observer and
//! frame loop, so several wheels can live on one page. Dropping it (or
//! calling [`WebWheel::remove`]) tears all of that down.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, PointerEvent, ResizeObserver};

use super::FrameLoop;
use crate::easing::Easing;
use crate::error::{Result, WheelError};
use crate::renderer::{CanvasSurface, render};
use crate::wheel::{PointerInput, ValidationReport, Wheel, WheelConfig, WheelEvent};

type EventHandler = Box<dyn FnMut(&WheelEvent)>;

struct Mounted {
    wheel: Wheel,
    surface: CanvasSurface,
    frames: FrameLoop,
    on_event: Option<EventHandler>,
}

type Shared = Rc<RefCell<Mounted>>;

const POINTER_EVENTS: [&str; 5] = ["pointerdown", "pointermove", "pointerup", "pointercancel", "pointerleave"];

/// A wheel mounted in the page
pub struct WebWheel {
    shared: Shared,
    container: Element,
    canvas: HtmlCanvasElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(PointerEvent)>)>,
    observer: ResizeObserver,
    _on_resize: Closure<dyn FnMut(js_sys::Array)>,
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| WheelError::Surface("no window".into()))
}

fn js_error(context: &str, err: JsValue) -> WheelError {
    WheelError::Surface(format!("{context}: {err:?}"))
}

impl WebWheel {
    /// Create a canvas inside `container` and start animating `config`
    pub fn add(container: &Element, config: WheelConfig) -> Result<Self> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| WheelError::Surface("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| js_error("create canvas", e))?
            .dyn_into()
            .map_err(|_| WheelError::Surface("created element is not a canvas".into()))?;
        canvas
            .set_attribute("style", "display:block;width:100%;height:100%;touch-action:none")
            .map_err(|e| js_error("style canvas", e))?;
        container
            .append_child(&canvas)
            .map_err(|e| js_error("append canvas", e))?;

        let surface = CanvasSurface::new(canvas.clone())?;
        let shared = Rc::new(RefCell::new(Mounted {
            wheel: Wheel::new(config),
            surface,
            frames: FrameLoop::default(),
            on_event: None,
        }));
        resize_canvas(&shared, container, &canvas);

        let listeners = POINTER_EVENTS
            .into_iter()
            .map(|name| -> Result<(&'static str, Closure<dyn FnMut(PointerEvent)>)> {
                let shared = Rc::clone(&shared);
                let target = canvas.clone();
                let closure = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
                    on_pointer(&shared, &target, name, &event);
                });
                canvas
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                    .map_err(|e| js_error(name, e))?;
                Ok((name, closure))
            })
            .collect::<Result<Vec<_>>>()?;

        let on_resize = {
            let shared = Rc::clone(&shared);
            let container = container.clone();
            let canvas = canvas.clone();
            Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
                resize_canvas(&shared, &container, &canvas);
            })
        };
        let observer =
            ResizeObserver::new(on_resize.as_ref().unchecked_ref()).map_err(|e| js_error("ResizeObserver", e))?;
        observer.observe(container);

        let generation = shared.borrow_mut().frames.start();
        schedule_frame(&shared, generation)?;
        log::info!("Wheel mounted ({} items)", shared.borrow().wheel.items().len());

        Ok(Self {
            shared,
            container: container.clone(),
            canvas,
            listeners,
            observer,
            _on_resize: on_resize,
        })
    }

    /// Stop animating and remove the canvas and every subscription
    pub fn remove(self) {
        drop(self);
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Run `f` against the wheel, then deliver any events it produced
    pub fn with_wheel<R>(&self, f: impl FnOnce(&mut Wheel) -> R) -> R {
        let (result, events) = {
            let mut mounted = self.shared.borrow_mut();
            let result = f(&mut mounted.wheel);
            (result, mounted.wheel.drain_events())
        };
        dispatch(&self.shared, events);
        result
    }

    pub fn set_event_handler(&self, handler: impl FnMut(&WheelEvent) + 'static) {
        self.shared.borrow_mut().on_event = Some(Box::new(handler));
    }

    pub fn configure(&self, config: WheelConfig) -> ValidationReport {
        let report = self.with_wheel(|wheel| wheel.configure(config));
        resize_canvas(&self.shared, &self.container, &self.canvas);
        report
    }

    /// Start loading an image referenced by `image`, `overlayImage` or an item
    pub fn load_image(&self, key: &str, src: &str) -> Result<()> {
        self.shared.borrow_mut().surface.load_image(key, src)
    }

    pub fn spin(&self, speed: f64) {
        self.with_wheel(|wheel| wheel.spin(speed));
    }

    pub fn spin_to(&self, rotation: f64, duration_ms: f64, easing: Easing) {
        self.with_wheel(|wheel| wheel.spin_to(rotation, duration_ms, easing));
    }

    pub fn spin_to_item(
        &self,
        index: usize,
        duration_ms: f64,
        spin_to_center: bool,
        revolutions: u32,
        direction: i8,
        easing: Easing,
    ) -> Result<f64> {
        self.with_wheel(|wheel| wheel.spin_to_item(index, duration_ms, spin_to_center, revolutions, direction, easing))
    }

    pub fn stop(&self) {
        self.with_wheel(Wheel::stop);
    }
}

impl Drop for WebWheel {
    fn drop(&mut self) {
        // The callback already queued still fires once, sees the stale
        // generation and releases its handle on `shared`.
        self.shared.borrow_mut().frames.stop();
        self.observer.disconnect();
        for (name, closure) in &self.listeners {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        self.canvas.remove();
        log::info!("Wheel removed");
    }
}

fn resize_canvas(shared: &Shared, container: &Element, canvas: &HtmlCanvasElement) {
    let Ok(window) = window() else {
        return;
    };
    let mut guard = shared.borrow_mut();
    let Mounted { wheel, surface, .. } = &mut *guard;

    let override_ratio = wheel.config().pixel_ratio;
    let pixel_ratio = if override_ratio > 0.0 {
        override_ratio
    } else {
        window.device_pixel_ratio()
    };
    let rect = container.get_bounding_client_rect();
    let width = (rect.width() * pixel_ratio).round().max(0.0);
    let height = (rect.height() * pixel_ratio).round().max(0.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    wheel.refresh_layout(width, height, pixel_ratio, surface);
    let origin = canvas.get_bounding_client_rect();
    wheel.set_canvas_origin(DVec2::new(origin.left(), origin.top()));
    log::debug!("Canvas resized to {width}x{height} @{pixel_ratio}");
}

fn on_pointer(shared: &Shared, canvas: &HtmlCanvasElement, name: &str, event: &PointerEvent) {
    let point = DVec2::new(f64::from(event.client_x()), f64::from(event.client_y()));
    let input = match name {
        "pointerdown" => PointerInput::Down(point),
        "pointermove" => PointerInput::Move(point),
        "pointerup" => PointerInput::Up(point),
        "pointercancel" => PointerInput::Cancel,
        _ => PointerInput::Leave,
    };

    let (cursor, dragging, events) = {
        let mut mounted = shared.borrow_mut();
        let rect = canvas.get_bounding_client_rect();
        mounted.wheel.set_canvas_origin(DVec2::new(rect.left(), rect.top()));
        let cursor = mounted.wheel.handle_pointer(input, event.time_stamp());
        (cursor, mounted.wheel.is_dragging(), mounted.wheel.drain_events())
    };

    if matches!(input, PointerInput::Down(_)) && dragging {
        event.prevent_default();
        let _ = canvas.set_pointer_capture(event.pointer_id());
    }
    let _ = canvas.style().set_property("cursor", cursor.as_css());
    dispatch(shared, events);
}

/// Deliver events with no borrow held, so handlers may call back into the wheel
fn dispatch(shared: &Shared, events: Vec<WheelEvent>) {
    if events.is_empty() {
        return;
    }
    let handler = shared.borrow_mut().on_event.take();
    let Some(mut handler) = handler else {
        return;
    };
    for event in &events {
        handler(event);
    }
    let mut mounted = shared.borrow_mut();
    if mounted.on_event.is_none() {
        mounted.on_event = Some(handler);
    }
}

fn schedule_frame(shared: &Shared, generation: u64) -> Result<()> {
    let next = Rc::clone(shared);
    let callback = Closure::once_into_js(move |now: f64| frame(next, generation, now));
    window()?
        .request_animation_frame(callback.unchecked_ref())
        .map_err(|e| js_error("requestAnimationFrame", e))?;
    Ok(())
}

fn frame(shared: Shared, generation: u64, now: f64) {
    let events = {
        let mut guard = shared.borrow_mut();
        let Mounted {
            wheel, surface, frames, ..
        } = &mut *guard;
        if !frames.is_current(generation) {
            return;
        }
        crate::wheel::tick(wheel, now);
        if wheel.needs_label_fit() {
            wheel.fit_labels(surface);
        }
        render(wheel, surface);
        wheel.drain_events()
    };
    dispatch(&shared, events);

    if shared.borrow().frames.is_current(generation) {
        if let Err(err) = schedule_frame(&shared, generation) {
            log::error!("Frame loop stopped: {err}");
        }
    }
}

fn easing_option(name: Option<String>) -> Easing {
    name.as_deref().map_or_else(Easing::default, Easing::from_name)
}

/// JavaScript-facing wrapper: `new Wheel(container, options)`
#[wasm_bindgen(js_name = Wheel)]
pub struct JsWheel {
    inner: Option<WebWheel>,
}

#[wasm_bindgen(js_class = Wheel)]
impl JsWheel {
    /// `options` is a plain object in the camelCase option format
    #[wasm_bindgen(constructor)]
    pub fn new(container: Option<Element>, options: JsValue) -> std::result::Result<JsWheel, JsError> {
        let container = container.ok_or(WheelError::MissingContainer)?;
        let config = if options.is_undefined() || options.is_null() {
            WheelConfig::default()
        } else {
            let json: String = js_sys::JSON::stringify(&options)
                .map_err(|_| WheelError::InvalidConfig("options are not serializable".into()))?
                .into();
            let value: serde_json::Value = serde_json::from_str(&json).map_err(WheelError::from)?;
            WheelConfig::from_json_value(value).0
        };
        let inner = WebWheel::add(&container, config)?;
        Ok(JsWheel { inner: Some(inner) })
    }

    /// Receive every wheel event as a parsed JSON object
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: js_sys::Function) {
        let Some(inner) = &self.inner else {
            return;
        };
        inner.set_event_handler(move |event| {
            let Ok(json) = serde_json::to_string(event) else {
                return;
            };
            if let Ok(value) = js_sys::JSON::parse(&json) {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        });
    }

    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&self, key: &str, src: &str) -> std::result::Result<(), JsError> {
        if let Some(inner) = &self.inner {
            inner.load_image(key, src)?;
        }
        Ok(())
    }

    pub fn spin(&self, speed: f64) {
        if let Some(inner) = &self.inner {
            inner.spin(speed);
        }
    }

    /// `easing` is an option name such as `"cubicOut"`; omitted means sine-out
    #[wasm_bindgen(js_name = spinTo)]
    pub fn spin_to(&self, rotation: f64, duration_ms: f64, easing: Option<String>) {
        if let Some(inner) = &self.inner {
            inner.spin_to(rotation, duration_ms, easing_option(easing));
        }
    }

    /// Returns the target rotation
    #[wasm_bindgen(js_name = spinToItem)]
    pub fn spin_to_item(
        &self,
        index: usize,
        duration_ms: f64,
        spin_to_center: bool,
        revolutions: u32,
        direction: i8,
        easing: Option<String>,
    ) -> std::result::Result<f64, JsError> {
        let Some(inner) = &self.inner else {
            return Err(WheelError::MissingContainer.into());
        };
        let easing = easing_option(easing);
        Ok(inner.spin_to_item(index, duration_ms, spin_to_center, revolutions, direction, easing)?)
    }

    pub fn stop(&self) {
        if let Some(inner) = &self.inner {
            inner.stop();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.as_ref().map_or(0.0, |inner| inner.with_wheel(|w| w.rotation()))
    }

    #[wasm_bindgen(getter, js_name = currentIndex)]
    pub fn current_index(&self) -> Option<usize> {
        self.inner.as_ref().and_then(|inner| inner.with_wheel(|w| w.current_index()))
    }

    /// Unmount; further calls are no-ops
    pub fn remove(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.remove();
        }
    }
}
