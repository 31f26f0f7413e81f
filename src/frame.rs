use crate::dom;
use crate::render::GpuState;
use crate::scene::{FieldState, FrameLoop, FrameScheduler, LoopState, Viewport};
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` behind the loop's scheduler seam.
pub struct RafScheduler {
    window: web::Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

pub struct FieldContext {
    pub state: FieldState,
    pub gpu: GpuState,
    pub canvas: web::HtmlCanvasElement,
    frame_loop: FrameLoop<RafScheduler>,
    callback: FrameCallback,
    last_instant: Option<Instant>,
}

impl FieldContext {
    /// Build the context and its frame callback. The callback holds only a
    /// weak reference, so dropping the last strong handle ends the loop.
    pub fn create(
        state: FieldState,
        gpu: GpuState,
        canvas: web::HtmlCanvasElement,
        window: web::Window,
    ) -> Rc<RefCell<Self>> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let ctx = Rc::new(RefCell::new(Self {
            state,
            gpu,
            canvas,
            frame_loop: FrameLoop::new(RafScheduler {
                window,
                callback: callback.clone(),
            }),
            callback: callback.clone(),
            last_instant: None,
        }));
        let weak: Weak<RefCell<Self>> = Rc::downgrade(&ctx);
        let tick = Closure::wrap(Box::new(move |_ts: f64| {
            let Some(ctx) = weak.upgrade() else {
                return;
            };
            if let Ok(mut c) = ctx.try_borrow_mut() {
                c.frame();
            }
        }) as Box<dyn FnMut(f64)>);
        *callback.borrow_mut() = Some(tick);
        ctx
    }

    pub fn start(&mut self) {
        self.last_instant = None;
        self.frame_loop.start();
    }

    pub fn frame(&mut self) {
        if !self.frame_loop.begin_frame() {
            return;
        }
        let now = Instant::now();
        let dt_sec = self
            .last_instant
            .map(|prev| (now - prev).as_secs_f32())
            .unwrap_or(0.0);
        self.last_instant = Some(now);

        self.state.step(dt_sec);
        match self.gpu.render(&self.state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[frame] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
        self.frame_loop.end_frame();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.frame_loop.state() == LoopState::Stopped {
            return;
        }
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas, &viewport);
        self.state.resize(viewport);
        self.gpu.resize(w, h, viewport.effective_pixel_ratio());
    }

    pub fn set_visible(&mut self, visible: bool) {
        // Elapsed time keeps its phase; the hidden gap is not replayed.
        self.last_instant = None;
        self.frame_loop.set_visible(visible);
        log::info!(
            "[frame] visible={} loop={:?}",
            visible,
            self.frame_loop.state()
        );
    }

    /// Stop the loop for good and release GPU resources. Idempotent.
    pub fn shutdown(&mut self) {
        if self.frame_loop.state() == LoopState::Stopped {
            return;
        }
        self.frame_loop.stop();
        self.gpu.release();
        // Dropping the closure breaks the scheduler -> closure -> context chain.
        self.callback.borrow_mut().take();
        log::info!("[frame] stopped after {} frames", self.state.frames());
    }
}
