//! Browser bridge for the Starfall background.
//!
//! ```ignore
//! import init, { starfield_start } from "./pkg/starfall_web.js";
//! await init();
//! const handle = starfield_start("starfield-canvas");
//! // later, on teardown
//! handle.stop();
//! ```
//!
//! Tunables come from the `--star-density` and `--shooting-chance` CSS
//! custom properties on `<html>`; `prefers-reduced-motion: reduce` turns
//! meteors off.

pub mod canvas;
pub mod css;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use starfall::{ConfigSource, LoopHandle, StarfieldConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub use canvas::CanvasSurface;
pub use css::CssConfigSource;
pub use runner::{RunningLoop, StarfieldRunner};

/// JS-facing handle to a started (or pending) starfield.
#[wasm_bindgen]
pub struct StarfieldHandle {
    handle: LoopHandle,
    running: Rc<RefCell<Option<RunningLoop>>>,
    window: Window,
    on_ready: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl StarfieldHandle {
    /// Stop rescheduling frames and detach all listeners. Idempotent.
    pub fn stop(&mut self) {
        self.handle.stop();
        if let Some(mut running) = self.running.borrow_mut().take() {
            running.shutdown();
            log::info!("starfield: stopped");
        }
        if let Some(on_ready) = self.on_ready.take() {
            if let Some(document) = self.window.document() {
                let _ = document.remove_event_listener_with_callback(
                    "DOMContentLoaded",
                    on_ready.as_ref().unchecked_ref(),
                );
            }
        }
    }

    /// True once the loop has started and until it is stopped.
    pub fn is_running(&self) -> bool {
        !self.handle.is_stopped() && self.running.borrow().is_some()
    }

    pub fn star_count(&self) -> u32 {
        self.with_runner(|r| r.star_count()).unwrap_or(0)
    }

    pub fn meteor_count(&self) -> u32 {
        self.with_runner(|r| r.meteor_count()).unwrap_or(0)
    }
}

impl Drop for StarfieldHandle {
    // Listeners must be detached before the closures they point at are freed
    fn drop(&mut self) {
        self.stop();
    }
}

impl StarfieldHandle {
    fn with_runner<R>(&self, f: impl FnOnce(&StarfieldRunner) -> R) -> Option<R> {
        let running = self.running.borrow();
        let running = running.as_ref()?;
        let runner = running.runner().borrow();
        Some(f(&runner))
    }
}

/// Start the starfield on `<canvas id=canvas_id>`, configured from CSS.
#[wasm_bindgen]
pub fn starfield_start(canvas_id: &str) -> Result<StarfieldHandle, JsValue> {
    init_logging();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let config = StarfieldConfig::from_source(&CssConfigSource::from_window(&window));
    start_with(window, canvas_id, config)
}

/// Start the starfield with an explicit JSON config (`starDensity`,
/// `shootingChance`, `reducedMotion`, `motion`, `seed`). The user's
/// reduced-motion preference still applies.
#[wasm_bindgen]
pub fn starfield_start_with_config(
    canvas_id: &str,
    config_json: &str,
) -> Result<StarfieldHandle, JsValue> {
    init_logging();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let mut config = StarfieldConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("invalid starfield config: {}", e)))?;
    config.reduced_motion |= CssConfigSource::from_window(&window).prefers_reduced_motion();
    start_with(window, canvas_id, config)
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Launch now if the document is parsed, otherwise on `DOMContentLoaded`.
fn start_with(
    window: Window,
    canvas_id: &str,
    mut config: StarfieldConfig,
) -> Result<StarfieldHandle, JsValue> {
    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * (1u64 << 53) as f64) as u64);
    }

    let handle = LoopHandle::new();
    let running: Rc<RefCell<Option<RunningLoop>>> = Rc::new(RefCell::new(None));
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut on_ready = None;
    match document.ready_state().as_str() {
        "interactive" | "complete" => {
            let surface = CanvasSurface::from_element_id(&window, canvas_id)?;
            let runner = StarfieldRunner::new(surface, config);
            *running.borrow_mut() = Some(RunningLoop::launch(&window, runner, handle.clone())?);
            log::info!("starfield: started on #{}", canvas_id);
        }
        _ => {
            let window_cb = window.clone();
            let handle_cb = handle.clone();
            let running_cb = running.clone();
            let canvas_id = canvas_id.to_owned();
            let mut config = Some(config);
            let cb = Closure::wrap(Box::new(move || {
                let Some(config) = config.take() else {
                    return;
                };
                if handle_cb.is_stopped() {
                    return;
                }
                let launched = CanvasSurface::from_element_id(&window_cb, &canvas_id)
                    .map(|surface| StarfieldRunner::new(surface, config))
                    .and_then(|runner| RunningLoop::launch(&window_cb, runner, handle_cb.clone()));
                match launched {
                    Ok(running) => {
                        *running_cb.borrow_mut() = Some(running);
                        log::info!("starfield: started on #{}", canvas_id);
                    }
                    Err(e) => log::error!("starfield: failed to start: {:?}", e),
                }
            }) as Box<dyn FnMut()>);
            document
                .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())?;
            on_ready = Some(cb);
        }
    }

    Ok(StarfieldHandle {
        handle,
        running,
        window,
        on_ready,
    })
}
