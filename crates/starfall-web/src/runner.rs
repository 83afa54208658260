use std::cell::{Cell, RefCell};
use std::rc::Rc;

use starfall::{LoopHandle, Starfield, StarfieldConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::canvas::CanvasSurface;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Couples one [`Starfield`] with the canvas it draws into.
pub struct StarfieldRunner {
    engine: Starfield,
    surface: CanvasSurface,
}

impl StarfieldRunner {
    pub fn new(surface: CanvasSurface, config: StarfieldConfig) -> Self {
        Self {
            engine: Starfield::new(config),
            surface,
        }
    }

    /// Measure the canvas, build the first star field and start the clock.
    pub fn start(&mut self, now_ms: f64) -> Result<(), JsValue> {
        let (width, height, dpr) = self.surface.measure();
        self.engine.start(width, height, dpr, now_ms);
        self.surface.apply(self.engine.surface())
    }

    /// Re-measure after a window resize. Regenerates stars only.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height, dpr) = self.surface.measure();
        self.engine.resize(width, height, dpr);
        self.surface.apply(self.engine.surface())
    }

    /// Run one frame at `requestAnimationFrame` timestamp `t`.
    pub fn tick(&mut self, t: f64) {
        self.engine.tick(&mut self.surface, t);
    }

    pub fn star_count(&self) -> u32 {
        self.engine.star_count() as u32
    }

    pub fn meteor_count(&self) -> u32 {
        self.engine.meteor_count() as u32
    }
}

/// A started animation: the self-rescheduling frame callback plus the
/// resize listener. Dropping it shuts it down.
pub struct RunningLoop {
    window: Window,
    runner: Rc<RefCell<StarfieldRunner>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    frame_id: Rc<Cell<Option<i32>>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl RunningLoop {
    /// Start `runner` and schedule its first frame. The loop reschedules
    /// itself every frame until `handle` is stopped.
    pub fn launch(
        window: &Window,
        mut runner: StarfieldRunner,
        handle: LoopHandle,
    ) -> Result<Self, JsValue> {
        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        runner.start(now)?;
        let runner = Rc::new(RefCell::new(runner));

        let resize_runner = runner.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Err(e) = resize_runner.borrow_mut().resize() {
                log::warn!("starfield: resize failed: {:?}", e);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let frame: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));
        {
            let window = window.clone();
            let runner = runner.clone();
            let frame_self = frame.clone();
            let frame_id = frame_id.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |t: f64| {
                frame_id.set(None);
                if handle.is_stopped() {
                    return;
                }
                runner.borrow_mut().tick(t);
                if handle.is_stopped() {
                    return;
                }
                if let Some(cb) = frame_self.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => frame_id.set(Some(id)),
                        Err(e) => log::error!("starfield: requestAnimationFrame failed: {:?}", e),
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }

        if let Some(cb) = frame.borrow().as_ref() {
            frame_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }

        Ok(Self {
            window: window.clone(),
            runner,
            frame,
            frame_id,
            on_resize: Some(on_resize),
        })
    }

    /// Cancel the pending frame, detach the resize listener and release the
    /// callbacks. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some(on_resize) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
        // Breaks the callback's reference to itself
        self.frame.borrow_mut().take();
    }

    pub fn runner(&self) -> &Rc<RefCell<StarfieldRunner>> {
        &self.runner
    }
}

impl Drop for RunningLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
