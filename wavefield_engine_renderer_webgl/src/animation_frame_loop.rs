/// AnimationFrameLoop - requestAnimationFrame host loop for AnimationController
///
/// The loop owns one JS closure. Each invocation ticks the controller and
/// re-requests itself while the controller asks for more frames; host
/// signals (`play`, pointer, visibility) request the first frame of a run
/// through `AnimationFrameScheduler`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wavefield_engine::wavefield::animation::{AnimationController, FrameScheduler};
use wavefield_engine::wavefield::{Error, Result};
use wavefield_engine::{engine_error, engine_warn};
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request(window: &Window, callback: &FrameCallback) -> std::result::Result<i32, JsValue> {
    match callback.borrow().as_ref() {
        Some(closure) => window.request_animation_frame(closure.as_ref().unchecked_ref()),
        None => Err(JsValue::from_str("frame loop has no controller attached")),
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// `FrameScheduler` handed to the controller
pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        if let Err(e) = request(&self.window, &self.callback) {
            engine_error!("wavefield::webgl::FrameLoop", "requestAnimationFrame failed: {:?}", e);
        }
    }
}

// ============================================================================
// Loop
// ============================================================================

pub struct AnimationFrameLoop {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrameLoop {
    pub fn new() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| Error::InitializationFailed("no global window".to_string()))?;
        Ok(Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        })
    }

    /// Scheduler sharing this loop's frame callback
    pub fn scheduler(&self) -> AnimationFrameScheduler {
        AnimationFrameScheduler {
            window: self.window.clone(),
            callback: self.callback.clone(),
        }
    }

    /// Install the frame callback driving `controller`
    ///
    /// The controller must have been built with `self.scheduler()`.
    pub fn attach(&self, controller: Rc<RefCell<AnimationController>>) {
        let window = self.window.clone();
        let callback = self.callback.clone();

        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            let keep_going = match controller.try_borrow_mut() {
                Ok(mut controller) => controller.tick(timestamp),
                Err(_) => {
                    engine_warn!("wavefield::webgl::FrameLoop", "Controller busy, frame deferred");
                    true
                }
            };
            if keep_going {
                if let Err(e) = request(&window, &callback) {
                    engine_error!("wavefield::webgl::FrameLoop", "requestAnimationFrame failed: {:?}", e);
                }
            }
        }) as Box<dyn FnMut(f64)>);

        *self.callback.borrow_mut() = Some(closure);
    }

    pub fn is_attached(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

impl Drop for AnimationFrameLoop {
    /// The closure holds a handle to its own slot; clearing the slot breaks
    /// the cycle. A frame already queued by the browser then fails to run.
    fn drop(&mut self) {
        self.callback.borrow_mut().take();
    }
}
